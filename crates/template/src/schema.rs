//! Layout table schema types

use crate::record::{LanguageLevel, Skill};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Font size used when a text placement does not set one
pub const DEFAULT_FONT_SIZE: f32 = 11.0;

/// A4 page width in millimetres
pub const PAGE_WIDTH_MM: f64 = 210.0;

/// A4 page height in millimetres
pub const PAGE_HEIGHT_MM: f64 = 297.0;

/// Country a layout belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Country {
    Kuwait,
    Saudi,
    Jordan,
}

impl Country {
    /// All countries, in batch order
    pub const ALL: [Country; 3] = [Country::Kuwait, Country::Saudi, Country::Jordan];

    /// Lower-case name used in asset paths
    pub fn name(self) -> &'static str {
        match self {
            Country::Kuwait => "kuwait",
            Country::Saudi => "saudi",
            Country::Jordan => "jordan",
        }
    }

    /// Office used when the requested one is not known
    pub fn primary_office(self) -> Office {
        match self {
            Country::Kuwait => Office::Alnoor,
            Country::Saudi => Office::Aldhahran,
            Country::Jordan => Office::Ewan,
        }
    }

    /// Offices operating in this country
    pub fn offices(self) -> &'static [Office] {
        match self {
            Country::Kuwait => &[Office::Alnoor, Office::Fahad],
            Country::Saudi => &[Office::Aldhahran],
            Country::Jordan => &[Office::Ewan, Office::Option, Office::Injaz],
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Country {
    type Err = ();

    /// Case-insensitive, surrounding whitespace ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Country::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

/// Recruitment office, one layout each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Office {
    Alnoor,
    Fahad,
    Aldhahran,
    Ewan,
    Option,
    Injaz,
}

impl Office {
    /// All offices, in batch order
    pub const ALL: [Office; 6] = [
        Office::Alnoor,
        Office::Fahad,
        Office::Aldhahran,
        Office::Ewan,
        Office::Option,
        Office::Injaz,
    ];

    /// Canonical upper-case name
    pub fn name(self) -> &'static str {
        match self {
            Office::Alnoor => "ALNOOR",
            Office::Fahad => "FAHAD",
            Office::Aldhahran => "ALDHAHRAN",
            Office::Ewan => "EWAN",
            Office::Option => "OPTION",
            Office::Injaz => "INJAZ",
        }
    }

    pub fn country(self) -> Country {
        match self {
            Office::Alnoor | Office::Fahad => Country::Kuwait,
            Office::Aldhahran => Country::Saudi,
            Office::Ewan | Office::Option | Office::Injaz => Country::Jordan,
        }
    }

    /// Stem of the background image names, e.g. `kuwait_alnoor`
    pub fn asset_stem(self) -> String {
        format!("{}_{}", self.country().name(), self.name().to_lowercase())
    }

    /// Position in [`Office::ALL`]
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Office {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Office {
    type Err = ();

    /// Case-insensitive, surrounding whitespace ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Office::ALL
            .into_iter()
            .find(|o| o.name().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

/// The fixed vocabulary of placeable fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    // Header
    RefNo,
    Salary,
    AppliedFor,
    ContractPeriod,
    AgentName,
    PrintDate,

    // Personal
    FullName,
    Religion,
    Dob,
    Age,
    Pob,
    MaritalStatus,
    Children,
    Weight,
    Height,
    Education,
    Nationality,

    // Passport
    PassportNumber,
    IssueDate,
    PlaceOfIssue,
    ExpiryDate,

    // Employment
    ExpCountry,
    ExpPeriod,
    ExpPosition,
    ExpCountry2,
    ExpPeriod2,
    ExpPosition2,

    // Contact
    ContactName,
    ContactPhone,
    ContactRelationship,
    ContactAddress,

    // Photos
    PhotoFace,
    PhotoFull,
    PhotoPassport,
}

/// RGB color, 0-255 per channel, written as `[r, g, b]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
}

impl From<Rgb> for pdf_core::Color {
    fn from(c: Rgb) -> Self {
        pdf_core::Color::from_rgb(c.0, c.1, c.2)
    }
}

/// Font family names accepted in layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TextFont {
    #[default]
    Helvetica,
    Times,
    Courier,
}

impl From<TextFont> for pdf_core::FontFamily {
    fn from(font: TextFont) -> Self {
        match font {
            TextFont::Helvetica => pdf_core::FontFamily::Helvetica,
            TextFont::Times => pdf_core::FontFamily::Times,
            TextFont::Courier => pdf_core::FontFamily::Courier,
        }
    }
}

/// Where and how a text field is drawn
///
/// `y` is the baseline. `{x: 0, y: 0}` hides the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPlacement {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgb>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<TextFont>,
}

impl TextPlacement {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            size: None,
            color: None,
            font: None,
        }
    }

    /// Hidden sentinel check
    pub fn is_hidden(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Resolved drawing style, defaults filled in
    pub fn style(&self) -> TextStyle {
        TextStyle {
            font: self.font.unwrap_or_default(),
            size: self.size.unwrap_or(DEFAULT_FONT_SIZE),
            color: self.color.unwrap_or(Rgb::BLACK),
        }
    }
}

/// Box a raster image is stretched into (top-left corner)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePlacement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Placement of one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LayoutDescriptor {
    Image(ImagePlacement),
    Text(TextPlacement),
}

/// Fully resolved text style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: TextFont,
    pub size: f32,
    pub color: Rgb,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font: TextFont::Helvetica,
            size: DEFAULT_FONT_SIZE,
            color: Rgb::BLACK,
        }
    }
}

/// How an office keeps long full names inside their box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NameFit {
    /// Reduce the size and move the name left
    #[serde(rename_all = "camelCase")]
    Shrink {
        min_chars: usize,
        size_step: f32,
        x_shift: f64,
    },
    /// Move the name to a fixed alternate position and size
    #[serde(rename_all = "camelCase")]
    Replace {
        min_chars: usize,
        x: f64,
        y: f64,
        size: f32,
    },
}

impl NameFit {
    pub fn min_chars(&self) -> usize {
        match self {
            NameFit::Shrink { min_chars, .. } | NameFit::Replace { min_chars, .. } => *min_chars,
        }
    }
}

/// What a mark rule reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkCondition {
    Skill(Skill),
    English(LanguageLevel),
    Arabic(LanguageLevel),
}

/// Glyph drawn when a mark rule fires
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkKind {
    /// The text "YES" in the layout's mark style
    Yes,
    /// A two-stroke tick
    Check { size: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkRule {
    pub when: MarkCondition,
    pub x: f64,
    pub y: f64,
    pub mark: MarkKind,
}

/// Text style of "YES" marks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MarkStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgb>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f32>,
}

impl MarkStyle {
    pub fn text_style(&self) -> TextStyle {
        TextStyle {
            font: TextFont::Helvetica,
            size: self.size.unwrap_or(DEFAULT_FONT_SIZE),
            color: self.color.unwrap_or(Rgb::BLACK),
        }
    }
}

/// Coordinate table of one (country, office) template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutTable {
    pub country: Country,
    pub office: Office,

    pub fields: BTreeMap<Field, LayoutDescriptor>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_fit: Option<NameFit>,

    #[serde(default)]
    pub mark_style: MarkStyle,

    #[serde(default)]
    pub marks: Vec<MarkRule>,
}

impl LayoutTable {
    /// Text placement of a field, if it is defined and not hidden
    pub fn text(&self, field: Field) -> Option<&TextPlacement> {
        match self.fields.get(&field) {
            Some(LayoutDescriptor::Text(t)) if !t.is_hidden() => Some(t),
            _ => None,
        }
    }

    /// Image placement of a field
    pub fn image(&self, field: Field) -> Option<&ImagePlacement> {
        match self.fields.get(&field) {
            Some(LayoutDescriptor::Image(i)) => Some(i),
            _ => None,
        }
    }

    /// Whether anything would be drawn for the field
    pub fn is_visible(&self, field: Field) -> bool {
        self.text(field).is_some() || self.image(field).is_some()
    }

    pub(crate) fn text_mut(&mut self, field: Field) -> Option<&mut TextPlacement> {
        match self.fields.get_mut(&field) {
            Some(LayoutDescriptor::Text(t)) => Some(t),
            _ => None,
        }
    }
}
