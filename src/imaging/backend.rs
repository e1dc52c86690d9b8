//! Image backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations the rest of the
//! crate needs from an image library: identify (decode + measure) during
//! ingestion, and JPEG re-encoding during export. Images too large for a
//! JPEG frame are handed over as raw pixels instead.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate. Tests use the recording `MockBackend` below.

use super::params::{JpegImage, Quality, RawImage};
use crate::content::{ContentError, DataUri};
use crate::types::Dimensions;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("unreadable content: {0}")]
    Content(#[from] ContentError),
    #[error("decode failed: {0}")]
    DecodeFailed(String),
    #[error("encode failed: {0}")]
    EncodeFailed(String),
}

/// Trait for image backends.
///
/// `identify` must fully decode the image, not just sniff a header: a
/// truncated file has to fail here so it never becomes a page.
pub trait ImageBackend: Sync {
    /// Decode the content and report its intrinsic pixel size.
    fn identify(&self, content: &DataUri) -> Result<Dimensions, BackendError>;

    /// Decode the content and re-encode it as baseline RGB JPEG.
    fn encode_jpeg(&self, content: &DataUri, quality: Quality) -> Result<JpegImage, BackendError>;

    /// Decode the content to RGB8 pixels with any alpha dropped.
    fn decode_rgb(&self, content: &DataUri) -> Result<RawImage, BackendError>;
}
