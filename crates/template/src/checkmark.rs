//! Tick mark glyph

use crate::schema::Rgb;
use crate::surface::Surface;
use crate::Result;

/// Stroke width of the tick, in millimetres
pub const CHECKMARK_LINE_WIDTH: f64 = 0.5;

/// Draw a two-stroke tick whose short stroke starts at `(x, y)`
///
/// The short stroke goes down to `(x + size/3, y + size)`, the long one back
/// up to `(x + size, y - size/2)`.
pub fn draw_checkmark<S: Surface + ?Sized>(
    surface: &mut S,
    x: f64,
    y: f64,
    size: f64,
    color: Rgb,
) -> Result<()> {
    let bottom = (x + size / 3.0, y + size);
    surface.draw_line((x, y), bottom, CHECKMARK_LINE_WIDTH, color)?;
    surface.draw_line(bottom, (x + size, y - size / 2.0), CHECKMARK_LINE_WIDTH, color)
}
