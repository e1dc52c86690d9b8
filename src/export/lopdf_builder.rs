//! PDF output through `lopdf`.
//!
//! Each page gets its own image XObject and a one-line content stream that
//! scales the unit square to the page:
//!
//! ```text
//! q  W 0 0 H 0 0 cm  /Im0 Do  Q
//! ```
//!
//! Images are re-encoded as baseline JPEG (`DCTDecode`) by the image backend,
//! so every source format ends up with the same, widely supported filter.
//! A side longer than a JPEG frame allows is embedded as raw RGB8 instead,
//! flate-compressed along with the rest of the document when `compress` is on.
//! The page tree object id is reserved up front and filled in by
//! [`finish`](DocumentBuilder::finish) once all kids are known.

use super::ExportError;
use super::builder::{DocumentBuilder, PageSpec};
use crate::content::DataUri;
use crate::imaging::{ImageBackend, Quality, RawImage, RustBackend};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

const PRODUCER: &str = concat!("pdf-carousel ", env!("CARGO_PKG_VERSION"));

pub struct LopdfBuilder<B: ImageBackend = RustBackend> {
    backend: B,
    quality: Quality,
    compress: bool,
    doc: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
}

impl LopdfBuilder<RustBackend> {
    pub fn new(quality: Quality, compress: bool) -> Self {
        Self::with_backend(RustBackend::new(), quality, compress)
    }
}

fn name(value: &str) -> Object {
    Object::Name(value.as_bytes().to_vec())
}

fn int(value: u32) -> Object {
    Object::Integer(i64::from(value))
}

impl<B: ImageBackend> LopdfBuilder<B> {
    pub fn with_backend(backend: B, quality: Quality, compress: bool) -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        Self {
            backend,
            quality,
            compress,
            doc,
            pages_id,
            kids: Vec::new(),
        }
    }

    /// JPEG page image, embedded as-is under `DCTDecode`.
    fn jpeg_stream(&self, content: &DataUri) -> Result<Stream, ExportError> {
        let jpeg = self.backend.encode_jpeg(content, self.quality)?;
        let color_space = if jpeg.components == 1 {
            "DeviceGray"
        } else {
            "DeviceRGB"
        };
        let mut dict = image_dict(jpeg.width, jpeg.height, color_space);
        dict.set("Filter", name("DCTDecode"));
        // Already JPEG; flate on top only costs time.
        Ok(Stream::new(dict, jpeg.bytes).with_compression(false))
    }

    /// Unfiltered RGB8 page image for sides past the JPEG frame limit.
    /// Left compressible so `compress` turns it into `FlateDecode`.
    fn raw_stream(&self, content: &DataUri) -> Result<Stream, ExportError> {
        let raw = self.backend.decode_rgb(content)?;
        let dict = image_dict(raw.width, raw.height, "DeviceRGB");
        Ok(Stream::new(dict, raw.pixels))
    }
}

fn image_dict(width: u32, height: u32, color_space: &str) -> Dictionary {
    Dictionary::from_iter([
        ("Type", name("XObject")),
        ("Subtype", name("Image")),
        ("Width", int(width)),
        ("Height", int(height)),
        ("ColorSpace", name(color_space)),
        ("BitsPerComponent", Object::Integer(8)),
    ])
}

impl<B: ImageBackend> DocumentBuilder for LopdfBuilder<B> {
    fn add_page(&mut self, spec: &PageSpec, content: &DataUri) -> Result<(), ExportError> {
        let image = if RawImage::fits_jpeg(spec.width, spec.height) {
            self.jpeg_stream(content)?
        } else {
            self.raw_stream(content)?
        };
        let image_id = self.doc.add_object(image);

        let drawing = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        int(spec.width),
                        int(0),
                        int(0),
                        int(spec.height),
                        int(0),
                        int(0),
                    ],
                ),
                Operation::new("Do", vec![name("Im0")]),
                Operation::new("Q", vec![]),
            ],
        };
        let drawing_bytes = drawing
            .encode()
            .map_err(|e| ExportError::Pdf(e.to_string()))?;
        let content_id = self
            .doc
            .add_object(Stream::new(Dictionary::new(), drawing_bytes));

        let resources = Dictionary::from_iter([(
            "XObject",
            Object::Dictionary(Dictionary::from_iter([("Im0", Object::Reference(image_id))])),
        )]);
        let page_id = self.doc.add_object(Dictionary::from_iter([
            ("Type", name("Page")),
            ("Parent", Object::Reference(self.pages_id)),
            (
                "MediaBox",
                Object::Array(vec![int(0), int(0), int(spec.width), int(spec.height)]),
            ),
            ("Contents", Object::Reference(content_id)),
            ("Resources", Object::Dictionary(resources)),
        ]));
        self.kids.push(Object::Reference(page_id));
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<u8>, ExportError> {
        let count = self.kids.len() as i64;
        let pages = Dictionary::from_iter([
            ("Type", name("Pages")),
            ("Kids", Object::Array(self.kids)),
            ("Count", Object::Integer(count)),
        ]);
        self.doc
            .objects
            .insert(self.pages_id, Object::Dictionary(pages));

        let catalog_id = self.doc.add_object(Dictionary::from_iter([
            ("Type", name("Catalog")),
            ("Pages", Object::Reference(self.pages_id)),
        ]));
        let info_id = self.doc.add_object(Dictionary::from_iter([(
            "Producer",
            Object::string_literal(PRODUCER),
        )]));
        self.doc.trailer.set("Root", Object::Reference(catalog_id));
        self.doc.trailer.set("Info", Object::Reference(info_id));

        if self.compress {
            self.doc.compress();
        }

        let mut output = Vec::new();
        self.doc
            .save_to(&mut output)
            .map_err(|e| ExportError::Pdf(e.to_string()))?;
        Ok(output)
    }
}
