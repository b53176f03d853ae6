//! Drawing surfaces
//!
//! The renderer only talks to [`Surface`]. [`PdfSurface`] produces the real
//! document; [`RecordingSurface`] keeps a list of every placement, which is
//! what the tests assert on.
//!
//! All coordinates are millimetres from the top-left corner of the page.

use crate::schema::{Rgb, TextStyle};
use crate::Result;
use pdf_core::{mm_to_pt, FontStyle, FontWeight, PdfDocument};

/// A multi-page canvas
pub trait Surface {
    /// Draw `text` with its baseline starting at `(x, y)`
    fn draw_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) -> Result<()>;

    /// Stroke a straight segment
    fn draw_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Rgb)
        -> Result<()>;

    /// Stretch an encoded raster image into a box with its top-left corner at `(x, y)`
    fn draw_image(&mut self, data: &[u8], x: f64, y: f64, width: f64, height: f64)
        -> Result<()>;

    /// Continue on a new blank page
    fn next_page(&mut self) -> Result<()>;
}

/// Surface backed by an A4 [`PdfDocument`]
///
/// Text is always bold, the house style of every form.
pub struct PdfSurface {
    doc: PdfDocument,
    page: usize,
}

impl PdfSurface {
    pub fn new() -> Self {
        let mut doc = PdfDocument::a4();
        doc.set_font_weight(FontWeight::Bold);
        doc.set_font_style(FontStyle::Normal);
        Self { doc, page: 1 }
    }

    /// Current page number (1-indexed)
    pub fn page(&self) -> usize {
        self.page
    }

    /// Serialize the finished document
    pub fn finish(mut self) -> Result<Vec<u8>> {
        Ok(self.doc.to_bytes()?)
    }
}

impl Default for PdfSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for PdfSurface {
    fn draw_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) -> Result<()> {
        self.doc.set_font(style.font.into(), style.size);
        self.doc.set_text_color(style.color.into());
        self.doc
            .insert_text(text, self.page, mm_to_pt(x), mm_to_pt(y))?;
        Ok(())
    }

    fn draw_line(
        &mut self,
        from: (f64, f64),
        to: (f64, f64),
        width: f64,
        color: Rgb,
    ) -> Result<()> {
        self.doc.set_line_width(mm_to_pt(width));
        self.doc.set_stroke_color(color.into());
        self.doc.draw_line(
            self.page,
            (mm_to_pt(from.0), mm_to_pt(from.1)),
            (mm_to_pt(to.0), mm_to_pt(to.1)),
        )?;
        Ok(())
    }

    fn draw_image(&mut self, data: &[u8], x: f64, y: f64, width: f64, height: f64) -> Result<()> {
        self.doc.insert_image(
            data,
            self.page,
            mm_to_pt(x),
            mm_to_pt(y),
            mm_to_pt(width),
            mm_to_pt(height),
        )?;
        Ok(())
    }

    fn next_page(&mut self) -> Result<()> {
        self.page = self.doc.add_blank_page()?;
        Ok(())
    }
}

/// One recorded drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum Placement {
    Text {
        page: usize,
        text: String,
        x: f64,
        y: f64,
        style: TextStyle,
    },
    Line {
        page: usize,
        from: (f64, f64),
        to: (f64, f64),
        width: f64,
        color: Rgb,
    },
    Image {
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        /// Size of the encoded image
        bytes: usize,
    },
}

impl Placement {
    pub fn page(&self) -> usize {
        match self {
            Placement::Text { page, .. }
            | Placement::Line { page, .. }
            | Placement::Image { page, .. } => *page,
        }
    }
}

/// Surface that only records what would be drawn
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    pub placements: Vec<Placement>,
    page: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            placements: Vec::new(),
            page: 1,
        }
    }

    pub fn page_count(&self) -> usize {
        self.page
    }

    /// All drawn strings, in order
    pub fn texts(&self) -> Vec<&str> {
        self.placements
            .iter()
            .filter_map(|p| match p {
                Placement::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// First text placement showing exactly `needle`
    pub fn find_text(&self, needle: &str) -> Option<&Placement> {
        self.placements
            .iter()
            .find(|p| matches!(p, Placement::Text { text, .. } if text == needle))
    }

    /// Text drawn at a position, if any
    pub fn text_at(&self, x: f64, y: f64) -> Option<&str> {
        self.placements.iter().find_map(|p| match p {
            Placement::Text {
                text, x: px, y: py, ..
            } if *px == x && *py == y => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn lines(&self) -> Vec<&Placement> {
        self.placements
            .iter()
            .filter(|p| matches!(p, Placement::Line { .. }))
            .collect()
    }

    pub fn images(&self) -> Vec<&Placement> {
        self.placements
            .iter()
            .filter(|p| matches!(p, Placement::Image { .. }))
            .collect()
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for RecordingSurface {
    fn draw_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) -> Result<()> {
        self.placements.push(Placement::Text {
            page: self.page,
            text: text.to_string(),
            x,
            y,
            style: *style,
        });
        Ok(())
    }

    fn draw_line(
        &mut self,
        from: (f64, f64),
        to: (f64, f64),
        width: f64,
        color: Rgb,
    ) -> Result<()> {
        self.placements.push(Placement::Line {
            page: self.page,
            from,
            to,
            width,
            color,
        });
        Ok(())
    }

    fn draw_image(&mut self, data: &[u8], x: f64, y: f64, width: f64, height: f64) -> Result<()> {
        pdf_core::detect_format(data)?;
        self.placements.push(Placement::Image {
            page: self.page,
            x,
            y,
            width,
            height,
            bytes: data.len(),
        });
        Ok(())
    }

    fn next_page(&mut self) -> Result<()> {
        self.page += 1;
        Ok(())
    }
}
