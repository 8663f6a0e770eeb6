//! # File Management Module
//!
//! Questo modulo gestisce la discovery delle immagini nella cartella sorgente.
//!
//! ## Responsabilità:
//! - Enumerazione NON ricorsiva dei file nella directory sorgente
//! - Filtro per estensione (case-insensitive): JPG, JPEG, PNG
//! - Ordinamento per nome file per un output deterministico
//! - Formattazione human-readable delle dimensioni
//!
//! ## Regole di selezione:
//! - Solo file regolari direttamente dentro la directory (i symlink vengono seguiti)
//! - Sottocartelle e file con altre estensioni vengono ignorati senza essere letti
//!
//! ## Esempio:
//! ```rust,no_run
//! use batch_image_resizer::file_manager::FileManager;
//! use std::path::Path;
//!
//! let files = FileManager::find_images(Path::new("/path/to/photos")).unwrap();
//! for file in files {
//!     println!("{}", file.display());
//! }
//! ```

use anyhow::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions accepted as source images (lowercase)
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Manages file discovery in the source folder
pub struct FileManager;

impl FileManager {
    /// Find all eligible images directly inside `dir`, sorted by file name
    pub fn find_images(dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(anyhow::anyhow!("Not a directory: {}", dir.display()));
        }

        let files = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|path| Self::is_supported_format(path))
            .collect();

        Ok(files)
    }

    /// Check if a file has one of the supported image extensions
    pub fn is_supported_format(path: &Path) -> bool {
        Self::lowercase_extension(path)
            .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
            .unwrap_or(false)
    }

    /// Check if a path targets JPEG output
    pub fn is_jpeg(path: &Path) -> bool {
        matches!(Self::lowercase_extension(path).as_deref(), Some("jpg") | Some("jpeg"))
    }

    /// Lowercased extension of a path, if any
    pub fn lowercase_extension(path: &Path) -> Option<String> {
        path.extension().map(|ext| ext.to_string_lossy().to_lowercase())
    }

    /// Get human-readable file size
    pub fn format_size(size: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", size as u64, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}
