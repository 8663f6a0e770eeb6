//! # Batch Image Resizer - Main Entry Point
//!
//! Questo è il punto di ingresso principale dell'applicazione.
//!
//! ## Responsabilità:
//! - Parsing degli argomenti della command line con `clap`
//! - Inizializzazione del sistema di logging con `tracing` (su stderr)
//! - Validazione della cartella di input (exit code 1 se mancante)
//! - Creazione della configurazione e avvio del `BatchResizer`
//!
//! ## Flusso di esecuzione:
//! 1. Parsa gli argomenti CLI (input, output, bounding box, qualità, overwrite)
//! 2. Configura il logging (WARN, o DEBUG con --verbose; RUST_LOG ha priorità)
//! 3. Valida che la cartella di input esista
//! 4. Crea la cartella di output e processa tutti i file
//!
//! ## Esempio di utilizzo:
//! ```bash
//! resize-images -i ~/Pictures/trip -o ./web --max-width 1600 --quality 85
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use batch_image_resizer::{config, BatchResizer, Config, PathResolver};

#[derive(Parser)]
#[command(name = "resize-images")]
#[command(about = "Resize images for web.")]
struct Args {
    /// Input images folder
    #[arg(short, long)]
    input: PathBuf,

    /// Output folder (can be same as input for in-place)
    #[arg(short, long)]
    output: PathBuf,

    /// Bounding box width
    #[arg(long, default_value_t = config::DEFAULT_MAX_WIDTH, value_parser = clap::value_parser!(u32).range(1..))]
    max_width: u32,

    /// Bounding box height
    #[arg(long, default_value_t = config::DEFAULT_MAX_HEIGHT, value_parser = clap::value_parser!(u32).range(1..))]
    max_height: u32,

    /// JPEG quality (ignored for PNG)
    #[arg(long, default_value_t = config::DEFAULT_JPEG_QUALITY, value_parser = clap::value_parser!(u8).range(0..=100))]
    quality: u8,

    /// Overwrite even if output exists
    #[arg(long)]
    overwrite: bool,

    /// Emit one JSON event per line instead of text
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging on stderr so stdout carries only the report
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if args.verbose { "debug" } else { "warn" }));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Validate arguments
    let input_dir = PathResolver::resolve(&args.input);
    if !input_dir.is_dir() {
        eprintln!("ERROR: input folder not found: {}", input_dir.display());
        std::process::exit(1);
    }

    let config = Config {
        max_width: args.max_width,
        max_height: args.max_height,
        jpeg_quality: args.quality,
        overwrite: args.overwrite,
        json_output: args.json,
    };

    let resizer = BatchResizer::new(&input_dir, &args.output, config).await?;
    resizer.run().await?;

    Ok(())
}
