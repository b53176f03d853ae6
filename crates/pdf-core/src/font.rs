//! Standard PDF fonts
//!
//! Only the base-14 families are supported. They need no embedding: a viewer
//! resolves them by name, so the document carries a small Type1 dictionary
//! per variant.

use lopdf::{Dictionary, Object};

/// Font weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

/// Font style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

/// Standard font family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontFamily {
    #[default]
    Helvetica,
    Times,
    Courier,
}

impl FontFamily {
    /// PostScript name of the variant selected by weight and style
    pub fn base_font(self, weight: FontWeight, style: FontStyle) -> &'static str {
        use FontStyle::*;
        use FontWeight::*;

        match (self, weight, style) {
            (FontFamily::Helvetica, Regular, Normal) => "Helvetica",
            (FontFamily::Helvetica, Bold, Normal) => "Helvetica-Bold",
            (FontFamily::Helvetica, Regular, Italic) => "Helvetica-Oblique",
            (FontFamily::Helvetica, Bold, Italic) => "Helvetica-BoldOblique",
            (FontFamily::Times, Regular, Normal) => "Times-Roman",
            (FontFamily::Times, Bold, Normal) => "Times-Bold",
            (FontFamily::Times, Regular, Italic) => "Times-Italic",
            (FontFamily::Times, Bold, Italic) => "Times-BoldItalic",
            (FontFamily::Courier, Regular, Normal) => "Courier",
            (FontFamily::Courier, Bold, Normal) => "Courier-Bold",
            (FontFamily::Courier, Regular, Italic) => "Courier-Oblique",
            (FontFamily::Courier, Bold, Italic) => "Courier-BoldOblique",
        }
    }
}

/// Build the Type1 font dictionary for a standard font
pub(crate) fn standard_font_dictionary(base_font: &str) -> Dictionary {
    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"Font".to_vec()));
    dict.set("Subtype", Object::Name(b"Type1".to_vec()));
    dict.set("BaseFont", Object::Name(base_font.as_bytes().to_vec()));
    dict.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
    dict
}
