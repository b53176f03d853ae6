//! Document rendering

use crate::checkmark::draw_checkmark;
use crate::namefit::adjust_full_name;
use crate::naming::output_file_name;
use crate::normalize::normalize;
use crate::record::{ApplicantRecord, Photo};
use crate::registry::LayoutRegistry;
use crate::schema::{
    Field, LayoutTable, MarkCondition, MarkKind, Office, Rgb, PAGE_HEIGHT_MM, PAGE_WIDTH_MM,
};
use crate::surface::{PdfSurface, Surface};
use crate::{Result, TemplateError};
use chrono::NaiveDate;

/// Encoded background images of the two pages
#[derive(Debug, Clone, Default)]
pub struct Backgrounds {
    pub first: Option<Vec<u8>>,
    pub second: Option<Vec<u8>>,
}

/// A finished document
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub office: Office,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Composes records onto office templates
///
/// Rendering is deterministic: the only date it uses is the reference date,
/// which feeds the age and the default print date. The renderer never reads
/// the clock; callers pass today's date themselves.
pub struct DocumentRenderer<'a> {
    registry: &'a LayoutRegistry,
    reference_date: NaiveDate,
}

impl<'a> DocumentRenderer<'a> {
    pub fn new(registry: &'a LayoutRegistry, reference_date: NaiveDate) -> Self {
        Self {
            registry,
            reference_date,
        }
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// Render `record` for `office` into a PDF
    pub fn render_pdf(
        &self,
        record: &ApplicantRecord,
        office: Office,
        backgrounds: &Backgrounds,
    ) -> Result<RenderedDocument> {
        let mut surface = PdfSurface::new();
        self.render(&mut surface, record, office, backgrounds)?;
        let bytes = surface.finish()?;
        let file_name = output_file_name(record, office);
        log::debug!("rendered {file_name} ({} bytes)", bytes.len());

        Ok(RenderedDocument {
            office,
            file_name,
            bytes,
        })
    }

    /// Draw both pages of the document onto `surface`
    ///
    /// Missing or undecodable backgrounds and photos are skipped; any other
    /// surface failure aborts the render.
    pub fn render<S: Surface>(
        &self,
        surface: &mut S,
        record: &ApplicantRecord,
        office: Office,
        backgrounds: &Backgrounds,
    ) -> Result<()> {
        let layout = adjust_full_name(self.registry.get(office), &record.core.full_name);
        let normalized = normalize(record, &layout, self.reference_date);

        // Page 1
        if let Some(bg) = &backgrounds.first {
            draw_background(surface, bg, office, 1)?;
        }

        for item in &normalized.texts {
            if let Some(placement) = layout.text(item.field) {
                surface.draw_text(&item.text, placement.x, placement.y, &placement.style())?;
            }
        }

        draw_photo(surface, &layout, Field::PhotoFace, normalized.face)?;
        draw_photo(surface, &layout, Field::PhotoFull, normalized.full)?;

        self.draw_marks(surface, &layout, record)?;

        // Page 2
        surface.next_page()?;
        if let Some(bg) = &backgrounds.second {
            draw_background(surface, bg, office, 2)?;
        }
        draw_photo(surface, &layout, Field::PhotoPassport, normalized.passport)?;

        Ok(())
    }

    /// Skill and language marks of page 1
    fn draw_marks<S: Surface>(
        &self,
        surface: &mut S,
        layout: &LayoutTable,
        record: &ApplicantRecord,
    ) -> Result<()> {
        let style = layout.mark_style.text_style();

        for rule in &layout.marks {
            let fires = match rule.when {
                MarkCondition::Skill(skill) => record.has_skill(skill),
                MarkCondition::English(level) => record.core.english_level == Some(level),
                MarkCondition::Arabic(level) => record.core.arabic_level == Some(level),
            };
            if !fires {
                continue;
            }

            match rule.mark {
                MarkKind::Yes => surface.draw_text("YES", rule.x, rule.y, &style)?,
                MarkKind::Check { size } => {
                    draw_checkmark(surface, rule.x, rule.y, size, Rgb::BLACK)?
                }
            }
        }

        Ok(())
    }
}

fn draw_background<S: Surface>(
    surface: &mut S,
    data: &[u8],
    office: Office,
    page: u8,
) -> Result<()> {
    tolerate_image_error(
        surface.draw_image(data, 0.0, 0.0, PAGE_WIDTH_MM, PAGE_HEIGHT_MM),
        || format!("{office} background {page}"),
    )
}

fn draw_photo<S: Surface>(
    surface: &mut S,
    layout: &LayoutTable,
    field: Field,
    photo: Option<&Photo>,
) -> Result<()> {
    let (Some(photo), Some(placement)) = (photo, layout.image(field)) else {
        return Ok(());
    };
    tolerate_image_error(
        surface.draw_image(
            photo.bytes(),
            placement.x,
            placement.y,
            placement.width,
            placement.height,
        ),
        || format!("{} photo {field:?}", layout.office),
    )
}

/// Undecodable images are skipped, everything else propagates
fn tolerate_image_error(result: Result<()>, what: impl FnOnce() -> String) -> Result<()> {
    match result {
        Err(TemplateError::Engine(pdf_core::PdfError::ImageError(reason))) => {
            log::warn!("skipping {}: {reason}", what());
            Ok(())
        }
        other => other,
    }
}
