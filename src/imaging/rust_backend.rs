//! Pure Rust image backend on top of the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, GIF, WebP, BMP, TIFF) | `image::ImageReader` with guessed format |
//! | Identify | full decode, then `GenericImageView::dimensions` |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` on RGB8 pixels |
//! | Raw pixels | `DynamicImage::to_rgb8` |
//!
//! The format is sniffed from the bytes, not taken from the data URI's media
//! type, so a mislabelled file still decodes.

use super::backend::{BackendError, ImageBackend};
use super::params::{JpegImage, Quality, RawImage};
use crate::content::DataUri;
use crate::types::Dimensions;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, GenericImageView, ImageReader};
use std::io::Cursor;

/// Backend using the `image` crate ecosystem.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode a data URI's payload into pixels.
fn load_image(content: &DataUri) -> Result<DynamicImage, BackendError> {
    let decoded = content.decode()?;
    ImageReader::new(Cursor::new(decoded.bytes))
        .with_guessed_format()
        .map_err(|e| BackendError::DecodeFailed(e.to_string()))?
        .decode()
        .map_err(|e| BackendError::DecodeFailed(e.to_string()))
}

impl ImageBackend for RustBackend {
    fn identify(&self, content: &DataUri) -> Result<Dimensions, BackendError> {
        let img = load_image(content)?;
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(BackendError::DecodeFailed("image has no pixels".into()));
        }
        Ok(Dimensions { width, height })
    }

    fn encode_jpeg(&self, content: &DataUri, quality: Quality) -> Result<JpegImage, BackendError> {
        // JPEG has no alpha; flatten to RGB first.
        let rgb = load_image(content)?.to_rgb8();
        let (width, height) = rgb.dimensions();

        let mut bytes = Vec::new();
        JpegEncoder::new_with_quality(&mut bytes, quality.value())
            .encode(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
            .map_err(|e| BackendError::EncodeFailed(e.to_string()))?;

        Ok(JpegImage {
            width,
            height,
            components: 3,
            bytes,
        })
    }

    fn decode_rgb(&self, content: &DataUri) -> Result<RawImage, BackendError> {
        let rgb = load_image(content)?.to_rgb8();
        let (width, height) = rgb.dimensions();
        Ok(RawImage {
            width,
            height,
            pixels: rgb.into_raw(),
        })
    }
}
