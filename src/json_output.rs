//! # JSON Output Module
//!
//! Questo modulo gestisce l'output strutturato in JSON per l'uso da script o altre applicazioni.
//!
//! ## Responsabilità:
//! - Emette un oggetto JSON per riga su stdout per ogni evento della run
//! - Riutilizza `ProcessedImage` e `RunStats` come sorgente dei dati
//!
//! ## Tipi di messaggi:
//! - `start`: Inizio della run con configurazione
//! - `file_skipped`: Output già esistente, file saltato
//! - `file_complete`: File ridimensionato/ottimizzato e scritto
//! - `file_error`: Errore durante l'elaborazione di un file
//! - `complete`: Fine della run con i contatori finali

use crate::config::Config;
use crate::image_processor::{ImageAction, ProcessedImage};
use crate::progress::RunStats;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Tipo di messaggio JSON
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JsonMessage {
    /// Inizio della run
    Start {
        input_dir: PathBuf,
        output_dir: PathBuf,
        total_files: usize,
        config: JsonConfig,
    },

    /// Output già presente, nessuna scrittura
    FileSkipped { file: PathBuf, destination: PathBuf },

    /// File scritto
    FileComplete {
        file: PathBuf,
        destination: PathBuf,
        action: ImageAction,
        original_width: u32,
        original_height: u32,
        width: u32,
        height: u32,
        bytes_written: u64,
    },

    /// Errore su un singolo file
    FileError { file: PathBuf, message: String },

    /// Run completata
    Complete {
        files_processed: usize,
        resized: usize,
        optimized: usize,
        skipped: usize,
        errors: usize,
        output_dir: PathBuf,
        duration_seconds: f64,
    },
}

/// Configurazione per output JSON
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonConfig {
    pub max_width: u32,
    pub max_height: u32,
    pub jpeg_quality: u8,
    pub overwrite: bool,
}

impl JsonMessage {
    /// Emette il messaggio JSON su stdout
    pub fn emit(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            println!("{}", json);
        }
    }

    pub fn start(
        input_dir: PathBuf,
        output_dir: PathBuf,
        total_files: usize,
        config: JsonConfig,
    ) -> Self {
        Self::Start {
            input_dir,
            output_dir,
            total_files,
            config,
        }
    }

    pub fn file_skipped(file: PathBuf, destination: PathBuf) -> Self {
        Self::FileSkipped { file, destination }
    }

    pub fn file_complete(processed: &ProcessedImage) -> Self {
        Self::FileComplete {
            file: processed.source.clone(),
            destination: processed.destination.clone(),
            action: processed.action(),
            original_width: processed.original.0,
            original_height: processed.original.1,
            width: processed.output.0,
            height: processed.output.1,
            bytes_written: processed.bytes_written,
        }
    }

    pub fn file_error(file: PathBuf, message: String) -> Self {
        Self::FileError { file, message }
    }

    pub fn complete(stats: &RunStats, output_dir: PathBuf, duration_seconds: f64) -> Self {
        Self::Complete {
            files_processed: stats.total,
            resized: stats.resized,
            optimized: stats.optimized,
            skipped: stats.skipped,
            errors: stats.errors(),
            output_dir,
            duration_seconds,
        }
    }
}

/// Converti Config in JsonConfig
impl From<&Config> for JsonConfig {
    fn from(config: &Config) -> Self {
        Self {
            max_width: config.max_width,
            max_height: config.max_height,
            jpeg_quality: config.jpeg_quality,
            overwrite: config.overwrite,
        }
    }
}
