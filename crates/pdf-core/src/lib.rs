//! PDF Core - Low-level PDF drawing
//!
//! This crate provides functionality for:
//! - Creating blank A4 documents and appending pages
//! - Drawing text with the standard PDF fonts
//! - Stroking straight line segments
//! - Inserting images (JPEG, PNG)
//! - Saving the result to a file or to bytes
//!
//! Coordinates are in points with the origin at the top-left corner of the
//! page, `y` growing downwards.
//!
//! # Example
//!
//! ```ignore
//! use pdf_core::{FontFamily, FontWeight, PdfDocument};
//!
//! let mut doc = PdfDocument::a4();
//! doc.set_font(FontFamily::Helvetica, 12.0);
//! doc.set_font_weight(FontWeight::Bold);
//! doc.insert_text("Hello, World!", 1, 100.0, 700.0)?;
//! doc.save("output.pdf")?;
//! ```

mod document;
mod font;
mod image;
mod text;

pub use document::{Color, PdfDocument};
pub use font::{FontFamily, FontStyle, FontWeight};
pub use image::{detect_format, ImageFormat};
pub use text::{
    encode_win_ansi, generate_line_operators, generate_text_operators, TextRenderContext,
};

use thiserror::Error;

/// A4 page width in points
pub const A4_WIDTH_PT: f64 = 595.28;

/// A4 page height in points
pub const A4_HEIGHT_PT: f64 = 841.89;

/// Points per millimetre
pub const PT_PER_MM: f64 = 72.0 / 25.4;

/// Convert millimetres to points
pub fn mm_to_pt(mm: f64) -> f64 {
    mm * PT_PER_MM
}

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Invalid page number: {0} (document has {1} pages)")]
    InvalidPage(usize, usize),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("PDF structure error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mm_to_pt() {
        assert!((mm_to_pt(25.4) - 72.0).abs() < 1e-9);
        assert!((mm_to_pt(210.0) - A4_WIDTH_PT).abs() < 0.01);
        assert!((mm_to_pt(297.0) - A4_HEIGHT_PT).abs() < 0.01);
    }
}
