//! # Optimizer Module
//!
//! Modulo che separa le responsabilità in sottomoduli:
//! - `batch_resizer`: Orchestratore della run sulla cartella sorgente
//! - `path_resolver`: Logica di calcolo path centralizzata

pub mod batch_resizer;
pub mod path_resolver;

pub use batch_resizer::BatchResizer;
pub use path_resolver::PathResolver;
