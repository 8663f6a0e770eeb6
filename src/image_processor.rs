//! # Image Processing Module
//!
//! Questo modulo gestisce la pipeline completa per un singolo file immagine,
//! interamente in memoria con il crate `image` e l'encoder `mozjpeg`.
//!
//! ## Pipeline
//!
//! 1. **Decodifica**: Formato rilevato dal contenuto (non solo dall'estensione)
//! 2. **Orientamento EXIF**: Rotazione/flip applicati prima del resize
//! 3. **Resize**: Downscale Lanczos3 dentro il bounding box (mai upscaling)
//! 4. **Normalizzazione colore**: Solo per output JPEG (alpha → RGB)
//! 5. **Codifica**: Opzioni specifiche per formato
//! 6. **Scrittura**: Il file di destinazione viene sovrascritto
//!
//! ## Formati di output
//!
//! | Estensione | Encoder | Opzioni |
//! |------------|---------|---------|
//! | jpg/jpeg   | mozjpeg | qualità configurabile, Huffman ottimizzato, progressivo |
//! | png        | image   | compressione massima, filtro adattivo, alpha invariato |
//! | altro      | image   | formato dedotto dall'estensione |
//!
//! Nessun metadato (EXIF, ICC, testo) viene scritto nei file di output.
//!
//! ## Classificazione
//!
//! - **Resized**: Le dimensioni finali differiscono da quelle decodificate
//! - **Optimized**: Stesse dimensioni, file ricodificato per rimuovere i metadati
//!
//! ## Esempio
//!
//! ```rust,no_run
//! use batch_image_resizer::{Config, ImageProcessor};
//! use std::path::Path;
//!
//! let processor = ImageProcessor::new(Config::default());
//! let processed = processor.process(Path::new("in/a.jpg"), Path::new("out/a.jpg")).unwrap();
//! println!("{}: {}x{}", processed.action().label(), processed.output.0, processed.output.1);
//! ```

use crate::config::Config;
use crate::error::ResizeError;
use crate::file_manager::FileManager;
use crate::resize::ImageResizer;
use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::{ColorType, DynamicImage, GenericImageView, ImageDecoder, ImageFormat, ImageReader};
use serde::Serialize;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Encoding chosen from the destination extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
    /// Fallback for any other extension the `image` crate can write
    Other(ImageFormat),
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<Self, ResizeError> {
        match FileManager::lowercase_extension(path).as_deref() {
            Some("jpg") | Some("jpeg") => Ok(Self::Jpeg),
            Some("png") => Ok(Self::Png),
            _ => ImageFormat::from_path(path)
                .map(Self::Other)
                .map_err(|_| ResizeError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// How a written image relates to its source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageAction {
    /// Dimensions changed
    Resized,
    /// Same dimensions, re-encoded
    Optimized,
}

impl ImageAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Resized => "Resized",
            Self::Optimized => "Optimized",
        }
    }
}

/// Result of processing one source file
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// Decoded dimensions, before EXIF orientation
    pub original: (u32, u32),
    /// Dimensions written to the destination
    pub output: (u32, u32),
    pub bytes_written: u64,
}

impl ProcessedImage {
    pub fn action(&self) -> ImageAction {
        if self.output != self.original {
            ImageAction::Resized
        } else {
            ImageAction::Optimized
        }
    }
}

/// Decodes, resizes and re-encodes single images
#[derive(Debug, Clone)]
pub struct ImageProcessor {
    config: Config,
    resizer: ImageResizer,
}

impl ImageProcessor {
    pub fn new(config: Config) -> Self {
        let resizer = ImageResizer::new(&config);
        Self { config, resizer }
    }

    /// Process `input` and write the result to `output`.
    ///
    /// The source is fully decoded before the destination is opened, so
    /// `input` and `output` may be the same path.
    pub fn process(&self, input: &Path, output: &Path) -> Result<ProcessedImage, ResizeError> {
        let format = OutputFormat::from_path(output)?;

        let (img, original) = Self::decode_oriented(input)?;
        let img = self.resizer.resize_to_box(img);
        let img = match format {
            OutputFormat::Jpeg => ImageResizer::ensure_jpeg_compatible(img),
            _ => img,
        };

        let bytes = self.encode(&img, format)?;
        std::fs::write(output, &bytes)?;

        debug!(
            "Wrote {} ({}, {:?})",
            output.display(),
            FileManager::format_size(bytes.len() as u64),
            img.color()
        );

        Ok(ProcessedImage {
            source: input.to_path_buf(),
            destination: output.to_path_buf(),
            original,
            output: img.dimensions(),
            bytes_written: bytes.len() as u64,
        })
    }

    /// Run [`ImageProcessor::process`] on the blocking thread pool and wait for it
    pub async fn process_blocking(
        &self,
        input: PathBuf,
        output: PathBuf,
    ) -> Result<ProcessedImage, ResizeError> {
        let processor = self.clone();
        tokio::task::spawn_blocking(move || processor.process(&input, &output)).await?
    }

    /// Decode an image and apply its EXIF orientation.
    ///
    /// Returns the oriented image and the dimensions as stored in the file.
    pub fn decode_oriented(path: &Path) -> Result<(DynamicImage, (u32, u32)), ResizeError> {
        let mut decoder = ImageReader::open(path)?
            .with_guessed_format()?
            .into_decoder()?;
        let orientation = decoder.orientation()?;

        let mut img = DynamicImage::from_decoder(decoder)?;
        let original = img.dimensions();

        debug!(
            "Decoded {} {}x{} {:?} (orientation {:?})",
            path.display(),
            original.0,
            original.1,
            img.color(),
            orientation
        );

        img.apply_orientation(orientation);
        Ok((img, original))
    }

    /// Encode `img` in memory with the options for `format`
    pub fn encode(&self, img: &DynamicImage, format: OutputFormat) -> Result<Vec<u8>, ResizeError> {
        match format {
            OutputFormat::Jpeg => Self::encode_jpeg(img, self.config.jpeg_quality),
            OutputFormat::Png => Self::encode_png(img),
            OutputFormat::Other(format) => {
                let mut buffer = Vec::new();
                img.write_to(&mut Cursor::new(&mut buffer), format)?;
                Ok(buffer)
            }
        }
    }

    /// Progressive JPEG with optimized Huffman tables
    fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>, ResizeError> {
        let color_space = match img.color() {
            ColorType::Rgb8 => mozjpeg::ColorSpace::JCS_RGB,
            ColorType::L8 => mozjpeg::ColorSpace::JCS_GRAYSCALE,
            other => {
                return Err(ResizeError::UnsupportedFormat(format!(
                    "{:?} pixels cannot be written as JPEG",
                    other
                )))
            }
        };
        let (width, height) = img.dimensions();

        let mut comp = mozjpeg::Compress::new(color_space);
        comp.set_size(width as usize, height as usize);
        comp.set_quality(quality as f32);
        comp.set_progressive_mode();
        comp.set_optimize_coding(true);

        let mut comp = comp
            .start_compress(Vec::new())
            .map_err(ResizeError::JpegEncode)?;
        comp.write_scanlines(img.as_bytes())
            .map_err(ResizeError::JpegEncode)?;
        comp.finish().map_err(ResizeError::JpegEncode)
    }

    /// Best compression with adaptive filtering; color type is left as decoded
    fn encode_png(img: &DynamicImage) -> Result<Vec<u8>, ResizeError> {
        let mut buffer = Vec::new();
        let encoder =
            PngEncoder::new_with_quality(&mut buffer, CompressionType::Best, PngFilterType::Adaptive);
        img.write_with_encoder(encoder)?;
        Ok(buffer)
    }
}
