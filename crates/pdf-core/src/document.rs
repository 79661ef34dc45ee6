//! PDF Document writer

use crate::canvas::PageCanvas;
use crate::font::{encode_win_ansi, StandardFont};
use crate::image::ImageXObject;
use crate::{PdfError, Result};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::io::Write;
use std::path::Path;

/// Page dimensions in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    /// ISO A4 portrait
    pub const A4: PageSize = PageSize {
        width: 595.28,
        height: 841.89,
    };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

/// Reference to an image embedded in a `PdfDocument`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageHandle {
    pub id: u32,
    /// Pixel width
    pub width: u32,
    /// Pixel height
    pub height: u32,
}

impl ImageHandle {
    /// XObject resource name (e.g., "Im1")
    pub fn resource_name(&self) -> String {
        format!("Im{}", self.id)
    }

    /// Width divided by height
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            return 1.0;
        }
        self.width as f64 / self.height as f64
    }
}

/// A new PDF document built page by page
pub struct PdfDocument {
    /// The underlying lopdf document
    inner: Document,
    /// Reserved id of the page tree root
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
    page_size: PageSize,
    /// Font dictionaries created so far
    font_objects: HashMap<StandardFont, ObjectId>,
    /// Embedded images (data hash -> handle)
    embedded_images: HashMap<u64, ImageHandle>,
    /// Image handle id -> XObject id
    image_objects: HashMap<u32, ObjectId>,
    next_image_id: u32,
    title: Option<String>,
}

impl PdfDocument {
    /// Create an empty document whose pages all have `page_size`
    pub fn new(page_size: PageSize) -> Self {
        let mut inner = Document::with_version("1.5");
        let pages_id = inner.new_object_id();

        Self {
            inner,
            pages_id,
            page_ids: Vec::new(),
            page_size,
            font_objects: HashMap::new(),
            embedded_images: HashMap::new(),
            image_objects: HashMap::new(),
            next_image_id: 1,
            title: None,
        }
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Get the number of pages added so far
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Start a canvas sized for this document's pages
    pub fn new_page(&self) -> PageCanvas {
        PageCanvas::new(self.page_size)
    }

    /// Set the /Title entry of the document information dictionary
    pub fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    /// Embed an image (JPEG or PNG bytes) and return its handle
    ///
    /// Identical bytes are embedded once; later calls return the same handle.
    pub fn add_image(&mut self, data: &[u8]) -> Result<ImageHandle> {
        let mut hasher = DefaultHasher::new();
        data.hash(&mut hasher);
        let data_hash = hasher.finish();

        if let Some(handle) = self.embedded_images.get(&data_hash) {
            return Ok(*handle);
        }

        let xobject = ImageXObject::from_bytes(data)?;
        let handle = self.add_image_xobject(&xobject);
        self.embedded_images.insert(data_hash, handle);
        Ok(handle)
    }

    /// Embed an already decoded image
    pub fn add_image_xobject(&mut self, xobject: &ImageXObject) -> ImageHandle {
        let mut stream = xobject.to_pdf_stream();
        if let Some(mask) = xobject.mask_stream() {
            let mask_id = self.inner.add_object(mask);
            stream.dict.set("SMask", Object::Reference(mask_id));
        }
        let object_id = self.inner.add_object(stream);

        let handle = ImageHandle {
            id: self.next_image_id,
            width: xobject.width,
            height: xobject.height,
        };
        self.next_image_id += 1;
        self.image_objects.insert(handle.id, object_id);

        log::debug!(
            "Embedded image {} ({}x{}, {})",
            handle.resource_name(),
            xobject.width,
            xobject.height,
            xobject.filter
        );
        handle
    }

    fn font_object(&mut self, font: StandardFont) -> ObjectId {
        if let Some(id) = self.font_objects.get(&font) {
            return *id;
        }
        let id = self.inner.add_object(font.to_pdf_dictionary());
        self.font_objects.insert(font, id);
        id
    }

    /// Append a finished canvas as the next page
    ///
    /// # Returns
    /// The new page number (1-indexed)
    pub fn add_page(&mut self, canvas: &PageCanvas) -> Result<usize> {
        let mut fonts = Dictionary::new();
        for font in canvas.fonts() {
            let font_id = self.font_object(*font);
            fonts.set(font.resource_name(), Object::Reference(font_id));
        }

        let mut xobjects = Dictionary::new();
        for image in canvas.images() {
            let object_id = self
                .image_objects
                .get(&image.id)
                .ok_or(PdfError::UnknownImage(image.id))?;
            xobjects.set(image.resource_name(), Object::Reference(*object_id));
        }

        let mut resources = Dictionary::new();
        if !fonts.is_empty() {
            resources.set("Font", Object::Dictionary(fonts));
        }
        if !xobjects.is_empty() {
            resources.set("XObject", Object::Dictionary(xobjects));
        }

        let contents_id = self.inner.add_object(content_stream(canvas.content())?);

        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(self.pages_id));
        page_dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(self.page_size.width as f32),
                Object::Real(self.page_size.height as f32),
            ]),
        );
        page_dict.set("Resources", Object::Dictionary(resources));
        page_dict.set("Contents", Object::Reference(contents_id));

        let page_id = self.inner.add_object(page_dict);
        self.page_ids.push(page_id);

        Ok(self.page_ids.len())
    }

    /// Write the page tree, catalog and info dictionary
    fn finalize(&mut self) -> Result<()> {
        // A PDF with no pages is not valid
        if self.page_ids.is_empty() {
            let blank = self.new_page();
            self.add_page(&blank)?;
        }

        let kids = self
            .page_ids
            .iter()
            .map(|id| Object::Reference(*id))
            .collect::<Vec<_>>();

        let mut pages = Dictionary::new();
        pages.set("Type", Object::Name(b"Pages".to_vec()));
        pages.set("Kids", Object::Array(kids));
        pages.set("Count", self.page_ids.len() as i64);
        self.inner
            .objects
            .insert(self.pages_id, Object::Dictionary(pages));

        if self.inner.trailer.get(b"Root").is_err() {
            let mut catalog = Dictionary::new();
            catalog.set("Type", Object::Name(b"Catalog".to_vec()));
            catalog.set("Pages", Object::Reference(self.pages_id));
            let catalog_id = self.inner.add_object(catalog);
            self.inner.trailer.set("Root", Object::Reference(catalog_id));
        }

        if let Some(title) = self.title.take() {
            let mut info = Dictionary::new();
            info.set(
                "Title",
                Object::String(encode_win_ansi(&title), StringFormat::Literal),
            );
            info.set(
                "Producer",
                Object::String(b"pdf-core".to_vec(), StringFormat::Literal),
            );
            let info_id = self.inner.add_object(info);
            self.inner.trailer.set("Info", Object::Reference(info_id));
        }

        Ok(())
    }

    /// Write the document to any writer
    pub fn write_to<W: Write>(&mut self, writer: &mut W) -> Result<()> {
        self.finalize()?;
        self.inner
            .save_to(writer)
            .map_err(|e| PdfError::SaveError(e.to_string()))
    }

    /// Save the document to bytes
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(buffer)
    }

    /// Save the document to a file
    ///
    /// # Arguments
    /// * `path` - Output file path
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let mut file = std::fs::File::create(path)?;
        self.write_to(&mut file)?;
        file.sync_all()?;
        Ok(())
    }

    /// Get reference to the underlying lopdf document
    pub fn inner(&self) -> &Document {
        &self.inner
    }
}

/// Flate-compressed content stream
fn content_stream(content: &[u8]) -> Result<Stream> {
    let mut encoder =
        flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(content)?;
    let compressed = encoder.finish()?;

    let mut dict = Dictionary::new();
    dict.set("Filter", Object::Name(b"FlateDecode".to_vec()));
    dict.set("Length", compressed.len() as i64);
    Ok(Stream::new(dict, compressed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::TextRenderContext;
    use image::{DynamicImage, ImageFormat};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::new_rgb8(width, height)
            .write_to(&mut buffer, ImageFormat::Png)
            .unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_empty_document_still_has_one_page() {
        let mut doc = PdfDocument::new(PageSize::A4);
        let bytes = doc.to_bytes().unwrap();

        let loaded = Document::load_mem(&bytes).unwrap();
        assert_eq!(loaded.get_pages().len(), 1);
    }

    #[test]
    fn test_add_page_returns_page_number() {
        let mut doc = PdfDocument::new(PageSize::A4);
        let canvas = doc.new_page();
        assert_eq!(doc.add_page(&canvas).unwrap(), 1);
        assert_eq!(doc.add_page(&canvas).unwrap(), 2);
        assert_eq!(doc.page_count(), 2);
    }

    #[test]
    fn test_add_image_deduplicates() {
        let mut doc = PdfDocument::new(PageSize::A4);
        let data = png_bytes(4, 2);

        let first = doc.add_image(&data).unwrap();
        let second = doc.add_image(&data).unwrap();
        let other = doc.add_image(&png_bytes(2, 2)).unwrap();

        assert_eq!(first, second);
        assert_ne!(first.id, other.id);
        assert_eq!((first.width, first.height), (4, 2));
        assert!((first.aspect_ratio() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_add_image_rejects_garbage() {
        let mut doc = PdfDocument::new(PageSize::A4);
        assert!(matches!(
            doc.add_image(b"definitely not an image"),
            Err(PdfError::ImageError(_))
        ));
    }

    #[test]
    fn test_unknown_image_handle_fails() {
        let mut doc = PdfDocument::new(PageSize::A4);
        let mut canvas = doc.new_page();
        let foreign = ImageHandle {
            id: 42,
            width: 1,
            height: 1,
        };
        canvas.draw_image(foreign, 0.0, 0.0, 10.0, 10.0);

        assert!(matches!(
            doc.add_page(&canvas),
            Err(PdfError::UnknownImage(42))
        ));
    }

    #[test]
    fn test_page_resources_round_trip() {
        let mut doc = PdfDocument::new(PageSize::A4);
        doc.set_title("Contrato de Crédito");
        let image = doc.add_image(&png_bytes(4, 4)).unwrap();

        let mut canvas = doc.new_page();
        canvas.draw_text(
            "Olá",
            50.0,
            50.0,
            &TextRenderContext::new(StandardFont::Helvetica, 11.0),
        );
        canvas.draw_image(image, 10.0, 10.0, 40.0, 40.0);
        doc.add_page(&canvas).unwrap();

        let bytes = doc.to_bytes().unwrap();
        let loaded = Document::load_mem(&bytes).unwrap();
        let pages = loaded.get_pages();
        let page_id = pages[&1];

        let content = loaded.get_page_content(page_id).unwrap();
        let content = String::from_utf8_lossy(&content);
        assert!(content.contains("/F1 11 Tf"));
        assert!(content.contains("/Im1 Do"));

        let (resources, _) = loaded.get_page_resources(page_id);
        let resources = resources.unwrap();
        let fonts = resources.get(b"Font").unwrap().as_dict().unwrap();
        assert!(fonts.has(b"F1"));
        let xobjects = resources.get(b"XObject").unwrap().as_dict().unwrap();
        assert!(xobjects.has(b"Im1"));
    }
}
