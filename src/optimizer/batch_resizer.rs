//! # Batch Resizer
//!
//! Orchestratore della run: un singolo passaggio sequenziale sulla cartella sorgente.
//!
//! ## Flusso per file:
//! 1. Incrementa `total` (anche per i file che verranno saltati)
//! 2. Se la destinazione esiste e `overwrite` è disattivo: skip
//! 3. Altrimenti decode → orient → resize → normalize → encode → write
//! 4. Gli errori vengono registrati e la run prosegue col file successivo

use crate::{
    config::Config,
    file_manager::FileManager,
    image_processor::ImageProcessor,
    optimizer::path_resolver::PathResolver,
    progress::{ProgressManager, RunStats},
};
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Resizes every eligible image of one folder into another
pub struct BatchResizer {
    config: Config,
    input_dir: PathBuf,
    output_dir: PathBuf,
    processor: ImageProcessor,
}

impl BatchResizer {
    /// Validate the configuration and the source folder, then create the output folder
    pub async fn new(input_dir: &Path, output_dir: &Path, config: Config) -> Result<Self> {
        config.validate()?;

        let input_dir = PathResolver::resolve(input_dir);
        if !input_dir.is_dir() {
            return Err(anyhow::anyhow!("input folder not found: {}", input_dir.display()));
        }

        let output_dir = PathResolver::ensure_dir(&PathResolver::expand_home(output_dir)).await?;

        if input_dir == output_dir {
            info!("Input and output folders are the same, resizing in place");
        }

        Ok(Self {
            processor: ImageProcessor::new(config.clone()),
            config,
            input_dir,
            output_dir,
        })
    }

    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Process every eligible file once and return the run counters
    pub async fn run(&self) -> Result<RunStats> {
        let start_time = Instant::now();

        let files = FileManager::find_images(&self.input_dir)?;
        info!(
            "Found {} images in {} (box {}x{}, quality {}, overwrite {})",
            files.len(),
            self.input_dir.display(),
            self.config.max_width,
            self.config.max_height,
            self.config.jpeg_quality,
            self.config.overwrite
        );

        let progress = ProgressManager::new(files.len() as u64, self.config.json_output);
        progress.start(&self.input_dir, &self.output_dir, files.len(), &self.config);

        let mut stats = RunStats::new();
        for source in &files {
            stats.add_found();
            self.process_file(source, &progress, &mut stats).await;
        }

        progress.finish(&stats, &self.output_dir, start_time.elapsed());
        Ok(stats)
    }

    async fn process_file(&self, source: &Path, progress: &ProgressManager, stats: &mut RunStats) {
        let file_name = source.file_name().unwrap_or_default().to_string_lossy().into_owned();

        let destination = match PathResolver::destination_for(source, &self.output_dir) {
            Ok(destination) => destination,
            Err(e) => {
                stats.add_error(file_name, e.to_string());
                progress.file_error(source, &e.to_string());
                return;
            }
        };

        if !self.config.overwrite && tokio::fs::try_exists(&destination).await.unwrap_or(false) {
            debug!("Skipping {}, output already exists", destination.display());
            stats.add_skipped();
            progress.file_skipped(source, &destination);
            return;
        }

        match self
            .processor
            .process_blocking(source.to_path_buf(), destination)
            .await
        {
            Ok(processed) => {
                stats.add_processed(&processed);
                progress.file_complete(&processed);
            }
            Err(e) => {
                warn!("Failed to process {}: {:?}", source.display(), e);
                let message = e.to_string();
                progress.file_error(source, &message);
                stats.add_error(file_name, message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::fs;
    use tempfile::TempDir;

    fn config() -> Config {
        Config {
            max_width: 64,
            max_height: 48,
            json_output: true,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_missing_input_dir() {
        let temp_dir = TempDir::new().unwrap();
        let result = BatchResizer::new(
            &temp_dir.path().join("missing"),
            &temp_dir.path().join("out"),
            config(),
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_input_must_be_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("file.jpg");
        fs::write(&file, b"x").unwrap();

        assert!(BatchResizer::new(&file, &temp_dir.path().join("out"), config())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_invalid_config_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let bad = Config {
            max_width: 0,
            ..config()
        };
        assert!(BatchResizer::new(temp_dir.path(), temp_dir.path(), bad)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_empty_folder() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("in");
        fs::create_dir(&input).unwrap();
        fs::write(input.join("readme.md"), b"hello").unwrap();

        let resizer = BatchResizer::new(&input, &temp_dir.path().join("out"), config())
            .await
            .unwrap();
        let stats = resizer.run().await.unwrap();

        assert_eq!(stats.total, 0);
        assert_eq!(stats.errors(), 0);
        assert!(fs::read_dir(resizer.output_dir()).unwrap().next().is_none());
    }

    #[tokio::test]
    async fn test_in_place_without_overwrite_skips_everything() {
        let temp_dir = TempDir::new().unwrap();
        let photo = temp_dir.path().join("photo.jpg");
        RgbImage::from_pixel(100, 100, Rgb([1, 1, 1])).save(&photo).unwrap();
        let before = fs::read(&photo).unwrap();

        let resizer = BatchResizer::new(temp_dir.path(), temp_dir.path(), config())
            .await
            .unwrap();
        let stats = resizer.run().await.unwrap();

        assert_eq!(stats.total, 1);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.resized + stats.optimized, 0);
        assert_eq!(fs::read(&photo).unwrap(), before);
    }

    #[tokio::test]
    async fn test_in_place_with_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let photo = temp_dir.path().join("photo.jpg");
        RgbImage::from_pixel(100, 100, Rgb([1, 1, 1])).save(&photo).unwrap();

        let overwrite = Config {
            overwrite: true,
            ..config()
        };
        let resizer = BatchResizer::new(temp_dir.path(), temp_dir.path(), overwrite)
            .await
            .unwrap();
        let stats = resizer.run().await.unwrap();

        assert_eq!(stats.resized, 1);
        assert_eq!(image::image_dimensions(&photo).unwrap(), (48, 48));
    }
}
