//! WASM bindings for tkcv
//!
//! This crate provides a JavaScript-friendly API for:
//! - Registering template background images fetched by the page
//! - Rendering a single CV for a country/office pair
//! - Rendering the six documents of a combined record
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { CvGenerator } from 'cv-wasm';
//!
//! await init();
//!
//! const generator = new CvGenerator();
//! generator.addBackground('kuwait_fahad_1', new Uint8Array(await page1.arrayBuffer()));
//! generator.addBackground('kuwait_fahad_2', new Uint8Array(await page2.arrayBuffer()));
//!
//! const pdf = generator.render(record, 'kuwait', 'FAHAD');
//! download(pdf.fileName, pdf.bytes);
//! ```

use chrono::NaiveDate;
use cv_template::{
    parse_record, plan_batch, resolve_office, ApplicantRecord, Backgrounds, DocumentRenderer,
    LayoutRegistry, Office, TemplateError,
};
use serde::Serialize;
use std::collections::HashMap;
use wasm_bindgen::prelude::*;

// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn to_js(err: TemplateError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[cfg(target_arch = "wasm32")]
fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
    .unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// A finished PDF
#[wasm_bindgen]
pub struct RenderedPdf {
    office: Office,
    file_name: String,
    bytes: Vec<u8>,
}

#[wasm_bindgen]
impl RenderedPdf {
    /// Suggested download name, e.g. `TK-501_ABEBE_KEBEDE_ALNOOR.pdf`
    #[wasm_bindgen(getter, js_name = fileName)]
    pub fn file_name(&self) -> String {
        self.file_name.clone()
    }

    /// @returns PDF bytes (Uint8Array)
    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn office(&self) -> String {
        self.office.name().to_string()
    }
}

#[derive(Serialize)]
struct ResolvedOffice {
    country: &'static str,
    office: &'static str,
    fallback: bool,
}

/// CV renderer with the built-in office layouts
#[wasm_bindgen]
pub struct CvGenerator {
    registry: LayoutRegistry,
    backgrounds: HashMap<String, Vec<u8>>,
    reference_date: Option<NaiveDate>,
}

#[wasm_bindgen]
impl CvGenerator {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<CvGenerator, JsValue> {
        let registry = LayoutRegistry::builtin().map_err(to_js)?;
        Ok(CvGenerator {
            registry,
            backgrounds: HashMap::new(),
            reference_date: None,
        })
    }

    /// Register a background page
    ///
    /// @param name - `{country}_{office}_{page}`, e.g. `saudi_aldhahran_1`
    /// @param data - JPEG or PNG bytes (Uint8Array)
    #[wasm_bindgen(js_name = addBackground)]
    pub fn add_background(&mut self, name: &str, data: &[u8]) {
        self.backgrounds.insert(name.to_lowercase(), data.to_vec());
    }

    #[wasm_bindgen(js_name = clearBackgrounds)]
    pub fn clear_backgrounds(&mut self) {
        self.backgrounds.clear();
    }

    /// Fix the date used for ages and default print dates
    ///
    /// @param date - `YYYY-MM-DD`
    #[wasm_bindgen(js_name = setReferenceDate)]
    pub fn set_reference_date(&mut self, date: &str) -> Result<(), JsValue> {
        let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|e| JsValue::from_str(&format!("Invalid date '{date}': {e}")))?;
        self.reference_date = Some(parsed);
        Ok(())
    }

    /// Which office a country/office pair renders as
    ///
    /// @returns `{ country, office, fallback }`
    #[wasm_bindgen(js_name = resolveOffice)]
    pub fn resolve_office(&self, country: &str, office: &str) -> Result<JsValue, JsValue> {
        let resolution = resolve_office(country, office);
        let resolved = ResolvedOffice {
            country: resolution.office.country().name(),
            office: resolution.office.name(),
            fallback: resolution.is_fallback(),
        };
        Ok(serde_wasm_bindgen::to_value(&resolved)?)
    }

    /// Render one document
    ///
    /// @param record - Applicant record object
    /// @param country - Country selector
    /// @param office - Office selector
    pub fn render(
        &self,
        record: JsValue,
        country: &str,
        office: &str,
    ) -> Result<RenderedPdf, JsValue> {
        let record: ApplicantRecord = serde_wasm_bindgen::from_value(record)?;
        let office = resolve_office(country, office).office;
        self.render_record(&record, office).map_err(to_js)
    }

    /// Render one document from a record JSON string
    #[wasm_bindgen(js_name = renderJson)]
    pub fn render_json(
        &self,
        json: &str,
        country: &str,
        office: &str,
    ) -> Result<RenderedPdf, JsValue> {
        let record = parse_record(json).map_err(to_js)?;
        let office = resolve_office(country, office).office;
        self.render_record(&record, office).map_err(to_js)
    }

    /// Render all six documents of a combined record
    ///
    /// Pacing the downloads is left to the page.
    /// @returns Array of RenderedPdf
    #[wasm_bindgen(js_name = renderBatch)]
    pub fn render_batch(&self, record: JsValue) -> Result<js_sys::Array, JsValue> {
        let record: ApplicantRecord = serde_wasm_bindgen::from_value(record)?;
        let documents = self.render_all(&record).map_err(to_js)?;
        Ok(documents.into_iter().map(JsValue::from).collect())
    }
}

impl CvGenerator {
    fn backgrounds_for(&self, office: Office) -> Backgrounds {
        let stem = office.asset_stem();
        let page = |n: u8| {
            let found = self.backgrounds.get(&format!("{stem}_{n}")).cloned();
            if found.is_none() {
                log::warn!("no background for {office} page {n}");
            }
            found
        };
        Backgrounds {
            first: page(1),
            second: page(2),
        }
    }

    fn render_record(
        &self,
        record: &ApplicantRecord,
        office: Office,
    ) -> Result<RenderedPdf, TemplateError> {
        let reference_date = self.reference_date.unwrap_or_else(today);
        let renderer = DocumentRenderer::new(&self.registry, reference_date);
        let document = renderer.render_pdf(record, office, &self.backgrounds_for(office))?;
        Ok(RenderedPdf {
            office: document.office,
            file_name: document.file_name,
            bytes: document.bytes,
        })
    }

    fn render_all(&self, record: &ApplicantRecord) -> Result<Vec<RenderedPdf>, TemplateError> {
        plan_batch(record)?
            .iter()
            .map(|job| self.render_record(&job.record, job.office))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cv_template::{ApplicantCore, CombinedDetails, FamilyDetails, SaudiDetails};
    use pretty_assertions::assert_eq;
    use wasm_bindgen_test::*;

    fn generator() -> CvGenerator {
        let mut generator = CvGenerator::new().unwrap();
        generator.set_reference_date("2024-06-01").unwrap();
        generator
    }

    fn core() -> ApplicantCore {
        ApplicantCore {
            full_name: "ABEBE KEBEDE".to_string(),
            ..Default::default()
        }
    }

    #[wasm_bindgen_test]
    fn test_render_record() {
        let record = ApplicantRecord::new(
            core(),
            FamilyDetails::Saudi(SaudiDetails {
                ref_no: "S-7".to_string(),
                ..Default::default()
            }),
        );
        let pdf = generator()
            .render_record(&record, Office::Aldhahran)
            .unwrap();
        assert_eq!(pdf.file_name(), "TK-S-7_ABEBE_KEBEDE_ALDHAHRAN.pdf");
        assert_eq!(pdf.office(), "ALDHAHRAN");
        assert!(pdf.bytes().starts_with(b"%PDF"));
    }

    #[wasm_bindgen_test]
    fn test_render_all() {
        let record = ApplicantRecord::new(
            core(),
            FamilyDetails::Combined(CombinedDetails {
                ref_no: "C-1".to_string(),
                ..Default::default()
            }),
        );
        let offices: Vec<String> = generator()
            .render_all(&record)
            .unwrap()
            .iter()
            .map(|pdf| pdf.office())
            .collect();
        assert_eq!(
            offices,
            vec!["ALNOOR", "FAHAD", "ALDHAHRAN", "EWAN", "OPTION", "INJAZ"]
        );
    }

    #[wasm_bindgen_test]
    fn test_background_lookup() {
        let mut generator = generator();
        generator.add_background("Kuwait_Fahad_2", b"bg");

        let backgrounds = generator.backgrounds_for(Office::Fahad);
        assert_eq!(backgrounds.first, None);
        assert_eq!(backgrounds.second, Some(b"bg".to_vec()));
    }
}
