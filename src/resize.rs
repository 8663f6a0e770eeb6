//! # Image Resize Module
//!
//! Questo modulo gestisce il ridimensionamento delle immagini dentro un bounding box.
//!
//! ## Caratteristiche
//! - **Solo downscaling**: Le immagini già contenute nel box non vengono toccate
//! - **Aspect ratio preservato**: Il lato più vincolante determina la scala
//! - **Filtro Lanczos3**: Miglior qualità per il downscaling
//! - **Normalizzazione colore JPEG**: Alpha e formati non 8-bit vengono convertiti in RGB
//!
//! ## Calcolo dimensioni
//! ```text
//! scale = min(max_w / w, max_h / h)
//! new_w = round(w * scale)   (clamp 1..=max_w)
//! new_h = round(h * scale)   (clamp 1..=max_h)
//! ```
//!
//! ## Esempio
//! ```rust
//! use batch_image_resizer::resize::BoundingBox;
//!
//! let bounds = BoundingBox::new(1280, 960);
//! assert_eq!(bounds.fit(2000, 1500), (1280, 960));
//! assert_eq!(bounds.fit(400, 300), (400, 300));
//! ```

use crate::config::Config;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use tracing::debug;

/// The maximum width/height an image must fit within
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub max_width: u32,
    pub max_height: u32,
}

impl BoundingBox {
    pub fn new(max_width: u32, max_height: u32) -> Self {
        Self { max_width, max_height }
    }

    /// True if both dimensions already fit
    pub fn contains(&self, width: u32, height: u32) -> bool {
        width <= self.max_width && height <= self.max_height
    }

    /// Target dimensions for an image of the given size. Never upscales.
    pub fn fit(&self, width: u32, height: u32) -> (u32, u32) {
        if self.contains(width, height) || width == 0 || height == 0 {
            return (width, height);
        }

        let scale = f64::min(
            self.max_width as f64 / width as f64,
            self.max_height as f64 / height as f64,
        );

        let new_width = ((width as f64 * scale).round() as u32).clamp(1, self.max_width);
        let new_height = ((height as f64 * scale).round() as u32).clamp(1, self.max_height);

        (new_width, new_height)
    }
}

/// Downscales decoded images into the configured bounding box
#[derive(Debug, Clone)]
pub struct ImageResizer {
    bounds: BoundingBox,
    filter: FilterType,
}

impl ImageResizer {
    /// Create a resizer for the bounding box in `config`, using Lanczos3
    pub fn new(config: &Config) -> Self {
        Self {
            bounds: BoundingBox::new(config.max_width, config.max_height),
            filter: FilterType::Lanczos3,
        }
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    /// Shrink `img` to fit the bounding box. Images that already fit are returned as-is.
    pub fn resize_to_box(&self, img: DynamicImage) -> DynamicImage {
        let (width, height) = img.dimensions();
        let (target_width, target_height) = self.bounds.fit(width, height);

        if (target_width, target_height) == (width, height) {
            return img;
        }

        debug!(
            "Resizing {}x{} -> {}x{} ({:?})",
            width, height, target_width, target_height, self.filter
        );
        img.resize_exact(target_width, target_height, self.filter)
    }

    /// Convert an image to a color type the JPEG encoder accepts.
    ///
    /// 8-bit gray and RGB pass through, 16-bit gray becomes 8-bit gray, and
    /// everything else (alpha channels, 16-bit/float RGB) becomes RGB8. Alpha
    /// is dropped, not composited.
    pub fn ensure_jpeg_compatible(img: DynamicImage) -> DynamicImage {
        match img {
            DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => img,
            DynamicImage::ImageLuma16(_) => DynamicImage::ImageLuma8(img.to_luma8()),
            other => {
                debug!("Converting {:?} to RGB8 for JPEG output", other.color());
                DynamicImage::ImageRgb8(other.to_rgb8())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ColorType, GrayAlphaImage, LumaA, Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn test_fit_keeps_small_images() {
        let bounds = BoundingBox::new(1280, 960);
        assert_eq!(bounds.fit(400, 300), (400, 300));
        assert_eq!(bounds.fit(1280, 960), (1280, 960));
        assert_eq!(bounds.fit(1, 1), (1, 1));
    }

    #[test]
    fn test_fit_scales_by_most_constraining_side() {
        let bounds = BoundingBox::new(1280, 960);
        assert_eq!(bounds.fit(2000, 1500), (1280, 960));
        // Wide panorama: width constrains
        assert_eq!(bounds.fit(4000, 1000), (1280, 320));
        // Tall portrait: height constrains
        assert_eq!(bounds.fit(1500, 3000), (480, 960));
        // Only one side too large
        assert_eq!(bounds.fit(1300, 500), (1280, 492));
    }

    #[test]
    fn test_fit_never_returns_zero() {
        let bounds = BoundingBox::new(100, 100);
        assert_eq!(bounds.fit(10000, 1), (100, 1));
    }

    #[test]
    fn test_fit_preserves_aspect_ratio() {
        let bounds = BoundingBox::new(1280, 960);
        for (w, h) in [(3024, 4032), (5000, 2813), (1921, 1081), (7777, 333)] {
            let (nw, nh) = bounds.fit(w, h);
            assert!(nw <= 1280 && nh <= 960);
            // Each side is off by at most half a pixel of rounding
            let scale_w = nw as f64 / w as f64;
            let scale_h = nh as f64 / h as f64;
            let tolerance = 0.5 / w as f64 + 0.5 / h as f64;
            assert!((scale_w - scale_h).abs() <= tolerance, "{w}x{h} -> {nw}x{nh}");
        }
    }

    #[test]
    fn test_resize_to_box() {
        let resizer = ImageResizer::new(&Config {
            max_width: 64,
            max_height: 48,
            ..Default::default()
        });

        let big = DynamicImage::ImageRgb8(RgbImage::from_pixel(200, 150, Rgb([10, 20, 30])));
        assert_eq!(resizer.resize_to_box(big).dimensions(), (64, 48));

        let small = DynamicImage::ImageRgb8(RgbImage::from_pixel(32, 20, Rgb([10, 20, 30])));
        assert_eq!(resizer.resize_to_box(small).dimensions(), (32, 20));
    }

    #[test]
    fn test_ensure_jpeg_compatible_drops_alpha() {
        let rgba = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 128])));
        let converted = ImageResizer::ensure_jpeg_compatible(rgba);
        assert_eq!(converted.color(), ColorType::Rgb8);

        let gray_alpha = DynamicImage::ImageLumaA8(GrayAlphaImage::from_pixel(4, 4, LumaA([9, 0])));
        let converted = ImageResizer::ensure_jpeg_compatible(gray_alpha);
        assert_eq!(converted.color(), ColorType::Rgb8);
    }

    #[test]
    fn test_ensure_jpeg_compatible_keeps_rgb_and_gray() {
        let rgb = DynamicImage::ImageRgb8(RgbImage::new(2, 2));
        assert_eq!(ImageResizer::ensure_jpeg_compatible(rgb).color(), ColorType::Rgb8);

        let gray = DynamicImage::new_luma8(2, 2);
        assert_eq!(ImageResizer::ensure_jpeg_compatible(gray).color(), ColorType::L8);

        let gray16 = DynamicImage::new_luma16(2, 2);
        assert_eq!(ImageResizer::ensure_jpeg_compatible(gray16).color(), ColorType::L8);
    }
}
