//! CV Generator - producing finished documents
//!
//! This crate wires the composition core to the outside world:
//! - [`GeneratorConfig`] with template and output locations
//! - [`AssetSource`] for background images, looked up by extension with a timeout
//! - [`DocumentSink`] for persisting finished PDFs
//! - [`Generator`] for single documents and the sequential six-office batch
//!
//! # Example
//!
//! ```ignore
//! use cv_generator::{Generator, GeneratorConfig};
//!
//! let config = GeneratorConfig::from_file("tkcv.json")?;
//! let generator = Generator::from_config(config)?;
//! let record = cv_template::parse_record(&record_json)?;
//! let saved = generator.generate_all(&record).await?;
//! ```

mod assets;
mod config;
mod generator;
mod sink;

pub use assets::{load_backgrounds, AssetSource, FsAssetSource, MemoryAssetSource};
pub use config::GeneratorConfig;
pub use generator::Generator;
pub use sink::{DocumentSink, FileSink, MemorySink};

use cv_template::{Office, TemplateError};
use thiserror::Error;

/// Errors that can occur while generating documents
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(
        "Batch stopped at {office} with {} saved and {skipped} not attempted: {source}",
        .saved.len()
    )]
    BatchStep {
        office: Office,
        saved: Vec<String>,
        skipped: usize,
        source: Box<GeneratorError>,
    },
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;
