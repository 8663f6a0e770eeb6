//! # Configuration Management Module
//!
//! Questo modulo gestisce le opzioni di elaborazione dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce la struct `Config` con tutti i parametri di ridimensionamento
//! - Fornisce validazione dei parametri di input
//! - Fornisce valori di default sensati per tutti i parametri
//!
//! ## Parametri di configurazione:
//! - `max_width`: Larghezza massima del bounding box (default: 1280)
//! - `max_height`: Altezza massima del bounding box (default: 960)
//! - `jpeg_quality`: Qualità JPEG (0-100, default: 82, ignorata per PNG)
//! - `overwrite`: Sovrascrive i file già presenti nella destinazione (default: false)
//! - `json_output`: Emette eventi JSON invece delle righe di testo (default: false)
//!
//! ## Validazione:
//! - Controlla che max_width e max_height siano > 0
//! - Controlla che jpeg_quality sia 0-100
//!
//! ## Esempio:
//! ```rust
//! use batch_image_resizer::Config;
//!
//! let config = Config {
//!     max_width: 800,
//!     max_height: 600,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Default bounding width in pixels
pub const DEFAULT_MAX_WIDTH: u32 = 1280;
/// Default bounding height in pixels
pub const DEFAULT_MAX_HEIGHT: u32 = 960;
/// Default JPEG quality
pub const DEFAULT_JPEG_QUALITY: u8 = 82;

/// Processing options, fixed for the whole run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Bounding box width
    pub max_width: u32,
    /// Bounding box height
    pub max_height: u32,
    /// JPEG quality (0-100, ignored for PNG)
    pub jpeg_quality: u8,
    /// Reprocess files whose output already exists
    pub overwrite: bool,
    /// Output progress and status as JSON for programmatic use
    pub json_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            overwrite: false,
            json_output: false,
        }
    }
}

impl Config {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.max_width == 0 {
            return Err(anyhow::anyhow!("Max width must be greater than 0"));
        }

        if self.max_height == 0 {
            return Err(anyhow::anyhow!("Max height must be greater than 0"));
        }

        if self.jpeg_quality > 100 {
            return Err(anyhow::anyhow!("JPEG quality must be between 0 and 100"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.max_width = 0;
        assert!(config.validate().is_err());

        config.max_width = 1280;
        config.max_height = 0;
        assert!(config.validate().is_err());

        config.max_height = 960;
        config.jpeg_quality = 101;
        assert!(config.validate().is_err());

        config.jpeg_quality = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_width, 1280);
        assert_eq!(config.max_height, 960);
        assert_eq!(config.jpeg_quality, 82);
        assert!(!config.overwrite);
        assert!(!config.json_output);
    }

    #[test]
    fn test_config_json_roundtrip() {
        let config = Config {
            max_width: 640,
            max_height: 480,
            jpeg_quality: 70,
            overwrite: true,
            json_output: false,
        };

        let json = serde_json::to_string(&config).unwrap();
        let loaded: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, config);
    }
}
