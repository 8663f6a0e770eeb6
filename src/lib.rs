//! # Batch Image Resizer Library
//!
//! Questo è il modulo principale della libreria che espone tutte le API pubbliche.
//!
//! ## Responsabilità:
//! - Definisce la struttura modulare dell'applicazione
//! - Espone i tipi e le funzioni principali tramite re-exports
//! - Fornisce un'interfaccia pulita per il main.rs e per i test di integrazione
//!
//! ## Architettura dei moduli:
//! - `config`: Opzioni di elaborazione e validazione parametri
//! - `error`: Tipi di errore per il singolo file
//! - `file_manager`: Discovery delle immagini nella cartella sorgente
//! - `resize`: Bounding box, resize Lanczos e normalizzazione colore
//! - `image_processor`: Pipeline decode → resize → encode per un file
//! - `optimizer`: Orchestratore della run e risoluzione dei path
//! - `progress`: Output a console e statistiche
//! - `json_output`: Eventi JSON per uso programmatico
//!
//! ## Utilizzo:
//! ```rust,no_run
//! use batch_image_resizer::{BatchResizer, Config};
//! use std::path::Path;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let resizer = BatchResizer::new(Path::new("photos"), Path::new("web"), Config::default()).await?;
//! let stats = resizer.run().await?;
//! println!("{}", stats.format_summary());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod file_manager;
pub mod image_processor;
pub mod json_output;
pub mod optimizer;
pub mod progress;
pub mod resize;

pub use config::Config;
pub use error::ResizeError;
pub use image_processor::{ImageAction, ImageProcessor, ProcessedImage};
pub use optimizer::{BatchResizer, PathResolver};
pub use progress::{FileFailure, RunStats};
