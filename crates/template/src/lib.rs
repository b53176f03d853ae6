//! CV Template - composing applicant records onto office templates
//!
//! This crate provides:
//! - Layout tables for every office, embedded as JSON
//! - Country/office resolution with logged fallbacks
//! - Full-name fitting, record normalization and mark rules
//! - A drawing [`Surface`] abstraction with PDF and recording implementations
//! - Batch planning for the combined "generate all" form
//!
//! # Example
//!
//! ```ignore
//! use cv_template::{parse_record, Backgrounds, DocumentRenderer, LayoutRegistry};
//!
//! let registry = LayoutRegistry::builtin()?;
//! let record = parse_record(record_json)?;
//! let office = registry.resolve("kuwait", "fahad").office;
//! let today = chrono::Local::now().date_naive();
//! let doc = DocumentRenderer::new(&registry, today)
//!     .render_pdf(&record, office, &Backgrounds::default())?;
//! std::fs::write(&doc.file_name, &doc.bytes)?;
//! ```

pub mod batch;
pub mod checkmark;
pub mod format;
mod namefit;
mod naming;
pub mod normalize;
pub mod parser;
mod record;
mod registry;
mod renderer;
mod resolve;
mod schema;
pub mod surface;

pub use batch::{plan_batch, BatchJob};
pub use checkmark::draw_checkmark;
pub use namefit::adjust_full_name;
pub use naming::output_file_name;
pub use normalize::{normalize, NormalizedRecord};
pub use parser::{parse_layout, parse_record};
pub use record::*;
pub use registry::LayoutRegistry;
pub use renderer::{Backgrounds, DocumentRenderer, RenderedDocument};
pub use resolve::{resolve_office, Match, Resolution};
pub use schema::*;
pub use surface::{PdfSurface, Placement, RecordingSurface, Surface};

use thiserror::Error;

/// Errors that can occur while composing documents
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Failed to parse layout: {0}")]
    ParseError(String),

    #[error("Invalid record: {0}")]
    RecordError(String),

    #[error("Invalid layout registry: {0}")]
    InvalidRegistry(String),

    #[error("Batch generation needs a combined record, got {0}")]
    NotCombined(String),

    #[error("Rendering engine failed: {0}")]
    Engine(#[from] pdf_core::PdfError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type for template operations
pub type Result<T> = std::result::Result<T, TemplateError>;
