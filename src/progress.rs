//! # Progress Tracking and Statistics Module
//!
//! Questo modulo gestisce il feedback a console e le statistiche della run.
//!
//! ## Responsabilità:
//! - Progress bar visual con `indicatif` (solo se stderr è un terminale)
//! - Righe per-file su stdout, errori su stderr
//! - Eventi JSON al posto del testo quando `json_output` è attivo
//! - Contatori della run (`RunStats`) e riepilogo finale
//!
//! ## Output testuale:
//! ```text
//! ↷ Skip (exists): a.jpg
//! ✔ Resized: b.jpg  →  b.jpg  (2000x1500 → 1280x960)
//! ✖ Error processing c.png: Format error decoding Png: ...
//!
//! Done. Files processed: 3, resized: 1, optimized: 0
//! Output folder: /abs/path/out
//! ```
//!
//! ## Statistiche tracciate:
//! - **total**: File idonei trovati (inclusi quelli saltati)
//! - **resized**: File scritti con dimensioni diverse
//! - **optimized**: File riscritti con le stesse dimensioni
//! - **skipped**: Output già esistenti lasciati invariati
//! - **failures**: Coppie (file, messaggio) per gli errori

use crate::config::Config;
use crate::image_processor::{ImageAction, ProcessedImage};
use crate::json_output::{JsonConfig, JsonMessage};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

/// A file that could not be processed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub file_name: String,
    pub message: String,
}

/// Counters accumulated over one run
#[derive(Debug, Default, Clone, Serialize)]
pub struct RunStats {
    pub total: usize,
    pub resized: usize,
    pub optimized: usize,
    pub skipped: usize,
    pub failures: Vec<FileFailure>,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count an eligible file. Called before the skip check.
    pub fn add_found(&mut self) {
        self.total += 1;
    }

    pub fn add_processed(&mut self, processed: &ProcessedImage) {
        match processed.action() {
            ImageAction::Resized => self.resized += 1,
            ImageAction::Optimized => self.optimized += 1,
        }
    }

    pub fn add_skipped(&mut self) {
        self.skipped += 1;
    }

    pub fn add_error(&mut self, file_name: impl Into<String>, message: impl Into<String>) {
        self.failures.push(FileFailure {
            file_name: file_name.into(),
            message: message.into(),
        });
    }

    pub fn errors(&self) -> usize {
        self.failures.len()
    }

    pub fn format_summary(&self) -> String {
        format!(
            "Done. Files processed: {}, resized: {}, optimized: {}",
            self.total, self.resized, self.optimized
        )
    }
}

/// Manages console output for a run
pub struct ProgressManager {
    bar: ProgressBar,
    json_output: bool,
}

impl ProgressManager {
    /// Create a progress manager for `total_files` files
    pub fn new(total_files: u64, json_output: bool) -> Self {
        let bar = if json_output {
            ProgressBar::hidden()
        } else {
            ProgressBar::with_draw_target(Some(total_files), ProgressDrawTarget::stderr())
        };

        if !bar.is_hidden() {
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("=>-"),
            );
            bar.enable_steady_tick(Duration::from_millis(100));
        }

        Self { bar, json_output }
    }

    /// Announce the run
    pub fn start(&self, input_dir: &Path, output_dir: &Path, total_files: usize, config: &Config) {
        if self.json_output {
            JsonMessage::start(
                input_dir.to_path_buf(),
                output_dir.to_path_buf(),
                total_files,
                JsonConfig::from(config),
            )
            .emit();
        }
    }

    /// An existing output was left untouched
    pub fn file_skipped(&self, source: &Path, destination: &Path) {
        if self.json_output {
            JsonMessage::file_skipped(source.to_path_buf(), destination.to_path_buf()).emit();
        } else {
            self.println(&format!("↷ Skip (exists): {}", file_name(destination)));
        }
        self.advance(source);
    }

    /// A file was written
    pub fn file_complete(&self, processed: &ProcessedImage) {
        if self.json_output {
            JsonMessage::file_complete(processed).emit();
        } else {
            self.println(&format!(
                "✔ {}: {}  →  {}  ({}x{} → {}x{})",
                processed.action().label(),
                file_name(&processed.source),
                file_name(&processed.destination),
                processed.original.0,
                processed.original.1,
                processed.output.0,
                processed.output.1
            ));
        }
        self.advance(&processed.source);
    }

    /// A file failed; always reported on stderr
    pub fn file_error(&self, source: &Path, message: &str) {
        self.bar.suspend(|| {
            eprintln!("✖ Error processing {}: {}", file_name(source), message);
        });
        if self.json_output {
            JsonMessage::file_error(source.to_path_buf(), message.to_string()).emit();
        }
        self.advance(source);
    }

    /// Clear the bar and print the summary
    pub fn finish(&self, stats: &RunStats, output_dir: &Path, duration: Duration) {
        self.bar.finish_and_clear();

        if self.json_output {
            JsonMessage::complete(stats, output_dir.to_path_buf(), duration.as_secs_f64()).emit();
        } else {
            println!("\n{}", stats.format_summary());
            println!("Output folder: {}", output_dir.display());
        }
    }

    fn println(&self, line: &str) {
        self.bar.suspend(|| println!("{}", line));
    }

    fn advance(&self, source: &Path) {
        self.bar.inc(1);
        self.bar.set_message(file_name(source));
    }
}

fn file_name(path: &Path) -> String {
    path.file_name().unwrap_or_default().to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn processed(original: (u32, u32), output: (u32, u32)) -> ProcessedImage {
        ProcessedImage {
            source: PathBuf::from("in/a.jpg"),
            destination: PathBuf::from("out/a.jpg"),
            original,
            output,
            bytes_written: 1,
        }
    }

    #[test]
    fn test_stats_counting() {
        let mut stats = RunStats::new();

        stats.add_found();
        stats.add_processed(&processed((2000, 1500), (1280, 960)));
        stats.add_found();
        stats.add_processed(&processed((400, 300), (400, 300)));
        stats.add_found();
        stats.add_skipped();
        stats.add_found();
        stats.add_error("bad.png", "decode failed");

        assert_eq!(stats.total, 4);
        assert_eq!(stats.resized, 1);
        assert_eq!(stats.optimized, 1);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.errors(), 1);
        assert_eq!(stats.failures[0].file_name, "bad.png");
    }

    #[test]
    fn test_format_summary() {
        let stats = RunStats {
            total: 2,
            resized: 1,
            optimized: 1,
            ..Default::default()
        };
        assert_eq!(
            stats.format_summary(),
            "Done. Files processed: 2, resized: 1, optimized: 1"
        );
    }

    #[test]
    fn test_hidden_manager_in_json_mode() {
        let manager = ProgressManager::new(3, true);
        assert!(manager.bar.is_hidden());
    }
}
