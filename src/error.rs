//! # Error Types Module
//!
//! Questo modulo definisce i tipi di errore per l'elaborazione di un singolo file.
//!
//! ## Responsabilità:
//! - Definisce `ResizeError` enum per categorizzare gli errori per-file
//! - Fornisce messaggi di errore descrittivi
//! - Integra con `thiserror` per automatic error conversion
//!
//! ## Categorie di errori:
//! - `Io`: Errori di I/O (lettura sorgente, scrittura destinazione)
//! - `Image`: Errori di decodifica/codifica immagini (formati corrotti, etc.)
//! - `JpegEncode`: Errori dell'encoder JPEG progressivo
//! - `UnsupportedFormat`: Estensione di output non riconosciuta
//! - `Task`: Il task bloccante di elaborazione è fallito
//!
//! Gli errori fatali del batch (directory sorgente mancante) sono gestiti con
//! `anyhow` nell'orchestratore e non passano da questo enum.

/// Errors raised while processing a single image
#[derive(thiserror::Error, Debug)]
pub enum ResizeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Image(#[from] image::ImageError),

    #[error("JPEG encoding failed: {0}")]
    JpegEncode(std::io::Error),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Processing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
