//! Shared test utilities.
//!
//! Fixture images are generated in memory with the `image` crate so no binary
//! files need to live in the repository.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let png = solid_png(100, 50);
//! let pages = collection_of(&["a", "b", "c"]);
//! assert_eq!(names(&pages), ["a", "b", "c"]);
//! ```

use crate::collection::PageCollection;
use crate::content::DataUri;
use crate::types::{PageDescriptor, PageId};
use image::{DynamicImage, GrayImage, ImageFormat, Luma, Rgb, RgbImage, Rgba, RgbaImage};
use std::io::Cursor;

// =========================================================================
// Fixture images
// =========================================================================

fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).unwrap();
    buf.into_inner()
}

/// An opaque PNG filled with a single color.
pub fn solid_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([200, 40, 40]));
    encode(DynamicImage::ImageRgb8(img), ImageFormat::Png)
}

/// A half-transparent RGBA PNG.
pub fn png_with_alpha(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([10, 120, 250, 128]));
    encode(DynamicImage::ImageRgba8(img), ImageFormat::Png)
}

/// A grayscale JPEG.
pub fn gray_jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = GrayImage::from_pixel(width, height, Luma([128]));
    encode(DynamicImage::ImageLuma8(img), ImageFormat::Jpeg)
}

// =========================================================================
// Descriptors and collections
// =========================================================================

/// A descriptor with fake content; good enough for ordering tests.
pub fn page(name: &str, width: u32, height: u32) -> PageDescriptor {
    PageDescriptor {
        id: PageId::new(),
        name: name.to_string(),
        content: DataUri::encode("image/png", name.as_bytes()),
        size: name.len() as u64,
        width,
        height,
        mime_type: "image/png".to_string(),
    }
}

/// A collection holding one 10×10 page per name, in the given order.
pub fn collection_of(names: &[&str]) -> PageCollection {
    let mut collection = PageCollection::new();
    for name in names {
        collection.append(page(name, 10, 10));
    }
    collection
}

/// Page names in collection order.
pub fn names(collection: &PageCollection) -> Vec<String> {
    collection.iter().map(|p| p.name.clone()).collect()
}

/// Id of the first page with the given name. Panics if not found.
pub fn id_of(collection: &PageCollection, name: &str) -> PageId {
    collection
        .find_by_name(name)
        .map(|p| p.id)
        .unwrap_or_else(|| panic!("page '{name}' not found. Available: {:?}", names(collection)))
}
