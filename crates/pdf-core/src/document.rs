//! PDF Document wrapper

use crate::font::standard_font_dictionary;
use crate::image::{generate_image_operators, ImageXObject};
use crate::text::{
    encode_win_ansi, generate_line_operators, generate_text_operators, to_hex_string,
    TextRenderContext,
};
use crate::{FontFamily, FontStyle, FontWeight, PdfError, Result, A4_HEIGHT_PT, A4_WIDTH_PT};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeMap, HashMap};
use std::hash::{Hash, Hasher};
use std::path::Path;

/// RGB Color (values 0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Create a new RGB color (values 0.0 - 1.0)
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create color from RGB values (0-255)
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Black color
    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// Page bookkeeping: the page object and its resource names
#[derive(Debug)]
struct PageEntry {
    id: ObjectId,
    height: f64,
    /// Base font name -> resource name
    fonts: BTreeMap<String, String>,
    /// Resource name -> image object
    images: BTreeMap<String, ObjectId>,
    /// Buffered content operators, flushed at save time
    content: Vec<u8>,
}

/// PDF document built from blank pages
///
/// Drawing state (font, colors, line width) is sticky, the way a PDF content
/// stream is: set it once and every following call uses it.
pub struct PdfDocument {
    /// The underlying lopdf document
    inner: Document,
    /// Root Pages object
    pages_id: ObjectId,
    /// Pages in order (page number = index + 1)
    pages: Vec<PageEntry>,
    /// Width and height of newly added pages, in points
    page_size: (f64, f64),
    current_family: FontFamily,
    current_weight: FontWeight,
    current_style: FontStyle,
    current_font_size: f32,
    current_text_color: Color,
    current_stroke_color: Color,
    current_line_width: f64,
    /// Font dictionaries already added (base font name -> object ID)
    embedded_fonts: HashMap<String, ObjectId>,
    next_font_resource: u32,
    /// Embedded images (data hash -> object ID and pixel size)
    embedded_images: HashMap<u64, (ObjectId, u32, u32)>,
    next_image_resource: u32,
    finalized: bool,
}

impl PdfDocument {
    /// Create an empty document whose pages will have the given size in points
    ///
    /// The document starts without pages; call [`add_blank_page`](Self::add_blank_page).
    pub fn new(page_width: f64, page_height: f64) -> Self {
        let mut inner = Document::with_version("1.5");
        let pages_id = inner.new_object_id();

        let mut pages_dict = Dictionary::new();
        pages_dict.set("Type", Object::Name(b"Pages".to_vec()));
        pages_dict.set("Kids", Object::Array(Vec::new()));
        pages_dict.set("Count", 0i64);
        inner.objects.insert(pages_id, Object::Dictionary(pages_dict));

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(pages_id));
        let catalog_id = inner.add_object(catalog);
        inner.trailer.set("Root", Object::Reference(catalog_id));

        Self {
            inner,
            pages_id,
            pages: Vec::new(),
            page_size: (page_width, page_height),
            current_family: FontFamily::default(),
            current_weight: FontWeight::default(),
            current_style: FontStyle::default(),
            current_font_size: 12.0,
            current_text_color: Color::default(),
            current_stroke_color: Color::default(),
            current_line_width: 1.0,
            embedded_fonts: HashMap::new(),
            next_font_resource: 1,
            embedded_images: HashMap::new(),
            next_image_resource: 1,
            finalized: false,
        }
    }

    /// Create a portrait A4 document with one blank page
    pub fn a4() -> Self {
        let mut doc = Self::new(A4_WIDTH_PT, A4_HEIGHT_PT);
        doc.push_page();
        doc
    }

    /// Get the number of pages in the document
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Add a blank page at the end of the document
    ///
    /// # Returns
    /// New page number (1-indexed)
    pub fn add_blank_page(&mut self) -> Result<usize> {
        if self.finalized {
            return Err(PdfError::SaveError("Document already saved".to_string()));
        }
        Ok(self.push_page())
    }

    fn push_page(&mut self) -> usize {
        let (width, height) = self.page_size;

        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(self.pages_id));
        page_dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Real(0.0),
                Object::Real(0.0),
                Object::Real(width as f32),
                Object::Real(height as f32),
            ]),
        );
        let id = self.inner.add_object(page_dict);

        self.pages.push(PageEntry {
            id,
            height,
            fonts: BTreeMap::new(),
            images: BTreeMap::new(),
            content: Vec::new(),
        });
        self.pages.len()
    }

    /// Set the current font family and size
    pub fn set_font(&mut self, family: FontFamily, size: f32) {
        self.current_family = family;
        self.current_font_size = size;
    }

    /// Set only the font size (keeps current family/weight/style)
    pub fn set_font_size(&mut self, size: f32) {
        self.current_font_size = size;
    }

    /// Set the font weight (keeps current family/size/style)
    pub fn set_font_weight(&mut self, weight: FontWeight) {
        self.current_weight = weight;
    }

    /// Set the font style (keeps current family/size/weight)
    pub fn set_font_style(&mut self, style: FontStyle) {
        self.current_style = style;
    }

    /// Set the fill color used for text
    pub fn set_text_color(&mut self, color: Color) {
        self.current_text_color = color;
    }

    /// Set the stroke color used for lines
    pub fn set_stroke_color(&mut self, color: Color) {
        self.current_stroke_color = color;
    }

    /// Set the stroke width in points
    pub fn set_line_width(&mut self, width: f64) {
        self.current_line_width = width;
    }

    fn page_mut(&mut self, page: usize) -> Result<&mut PageEntry> {
        let count = self.pages.len();
        if page == 0 || page > count {
            return Err(PdfError::InvalidPage(page, count));
        }
        Ok(&mut self.pages[page - 1])
    }

    /// Insert text with its baseline starting at a position
    ///
    /// # Arguments
    /// * `text` - Text to insert
    /// * `page` - Page number (1-indexed)
    /// * `x` - X coordinate in points
    /// * `y` - Baseline Y coordinate in points (from top)
    pub fn insert_text(&mut self, text: &str, page: usize, x: f64, y: f64) -> Result<()> {
        let base_font = self
            .current_family
            .base_font(self.current_weight, self.current_style);
        let font_size = self.current_font_size;
        let color = self.current_text_color;

        self.page_mut(page)?;
        if text.is_empty() {
            return Ok(());
        }

        let next_font_resource = &mut self.next_font_resource;
        let entry = &mut self.pages[page - 1];

        let resource_name = entry
            .fonts
            .entry(base_font.to_string())
            .or_insert_with(|| {
                let name = format!("F{next_font_resource}");
                *next_font_resource += 1;
                name
            })
            .clone();

        let ctx = TextRenderContext {
            font_name: resource_name,
            font_size,
            color,
        };
        let hex = to_hex_string(&encode_win_ansi(text));
        let ops = generate_text_operators(&hex, x, entry.height - y, &ctx);
        entry.content.extend_from_slice(&ops);

        Ok(())
    }

    /// Stroke a straight line between two points (top-left origin)
    pub fn draw_line(&mut self, page: usize, from: (f64, f64), to: (f64, f64)) -> Result<()> {
        let width = self.current_line_width;
        let color = self.current_stroke_color;
        let entry = self.page_mut(page)?;
        let height = entry.height;

        let ops = generate_line_operators(
            (from.0, height - from.1),
            (to.0, height - to.1),
            width,
            color,
        );
        entry.content.extend_from_slice(&ops);

        Ok(())
    }

    /// Insert an image stretched to a box
    ///
    /// # Arguments
    /// * `data` - Image file bytes (JPEG or PNG)
    /// * `page` - Page number (1-indexed)
    /// * `x` - X coordinate of the top-left corner in points
    /// * `y` - Y coordinate of the top-left corner in points (from top)
    /// * `width` - Image width in points
    /// * `height` - Image height in points
    pub fn insert_image(
        &mut self,
        data: &[u8],
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<()> {
        self.page_mut(page)?;

        let (object_id, _, _) = self.get_or_embed_image(data)?;

        let next_image_resource = &mut self.next_image_resource;
        let entry = &mut self.pages[page - 1];
        let resource_name = match entry.images.iter().find(|(_, id)| **id == object_id) {
            Some((name, _)) => name.clone(),
            None => {
                let name = format!("Im{next_image_resource}");
                *next_image_resource += 1;
                entry.images.insert(name.clone(), object_id);
                name
            }
        };

        let pdf_y = entry.height - y - height;
        let ops = generate_image_operators(&resource_name, x, pdf_y, width, height);
        entry.content.extend_from_slice(&ops);

        Ok(())
    }

    /// Embed image data once per distinct content
    ///
    /// Returns the XObject ID and the pixel size.
    fn get_or_embed_image(&mut self, data: &[u8]) -> Result<(ObjectId, u32, u32)> {
        let mut hasher = DefaultHasher::new();
        data.hash(&mut hasher);
        let data_hash = hasher.finish();

        if let Some(existing) = self.embedded_images.get(&data_hash) {
            return Ok(*existing);
        }

        let xobject = ImageXObject::from_bytes(data)?;
        let object_id = self.inner.add_object(xobject.to_pdf_stream());
        let embedded = (object_id, xobject.width, xobject.height);
        self.embedded_images.insert(data_hash, embedded);

        Ok(embedded)
    }

    /// Save the document to a file
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Save the document to bytes
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        if !self.finalized {
            self.finalize()?;
        }

        let mut buffer = Vec::new();
        self.inner
            .save_to(&mut buffer)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;
        Ok(buffer)
    }

    /// Write content streams and resources into the page objects
    fn finalize(&mut self) -> Result<()> {
        if self.pages.is_empty() {
            return Err(PdfError::SaveError("Document has no pages".to_string()));
        }

        let mut kids = Vec::with_capacity(self.pages.len());
        for index in 0..self.pages.len() {
            let content = std::mem::take(&mut self.pages[index].content);
            let contents_id = self.inner.add_object(Stream::new(Dictionary::new(), content));

            let fonts: Vec<(String, String)> = self.pages[index]
                .fonts
                .iter()
                .map(|(base, name)| (base.clone(), name.clone()))
                .collect();
            let mut font_dict = Dictionary::new();
            for (base_font, resource_name) in fonts {
                let font_id = self.font_object(&base_font);
                font_dict.set(resource_name.as_bytes(), Object::Reference(font_id));
            }

            let entry = &self.pages[index];
            let mut xobject_dict = Dictionary::new();
            for (resource_name, object_id) in &entry.images {
                xobject_dict.set(resource_name.as_bytes(), Object::Reference(*object_id));
            }

            let mut resources = Dictionary::new();
            resources.set("Font", Object::Dictionary(font_dict));
            resources.set("XObject", Object::Dictionary(xobject_dict));

            let page_id = entry.id;
            let page_dict = self
                .inner
                .get_object_mut(page_id)?
                .as_dict_mut()
                .map_err(|_| PdfError::ParseError("Page object is not a dictionary".to_string()))?;
            page_dict.set("Resources", Object::Dictionary(resources));
            page_dict.set("Contents", Object::Reference(contents_id));

            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        let pages_dict = self
            .inner
            .get_object_mut(self.pages_id)?
            .as_dict_mut()
            .map_err(|_| PdfError::ParseError("Pages object is not a dictionary".to_string()))?;
        pages_dict.set("Kids", Object::Array(kids));
        pages_dict.set("Count", count);

        self.finalized = true;
        log::debug!("finalized PDF with {count} page(s)");
        Ok(())
    }

    /// Get or add the shared Type1 dictionary for a standard font
    fn font_object(&mut self, base_font: &str) -> ObjectId {
        if let Some(id) = self.embedded_fonts.get(base_font) {
            return *id;
        }
        let id = self.inner.add_object(standard_font_dictionary(base_font));
        self.embedded_fonts.insert(base_font.to_string(), id);
        id
    }

    /// Get a reference to the underlying lopdf document
    pub fn inner(&self) -> &Document {
        &self.inner
    }
}

impl Default for PdfDocument {
    fn default() -> Self {
        Self::a4()
    }
}
