//! Parameter and result types for image operations.
//!
//! - [`Quality`]: lossy JPEG quality (1-100, default 75), clamped on construction.
//! - [`JpegImage`]: a re-encoded page image ready to embed as a `DCTDecode` stream.
//! - [`RawImage`]: plain RGB8 pixels for images JPEG cannot hold.

/// Longest side baseline JPEG can encode; its frame header stores 16-bit sizes.
pub const MAX_JPEG_EDGE: u32 = 65535;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u8);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(75)
    }
}

/// Baseline JPEG bytes plus the pixel geometry a PDF image dictionary needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JpegImage {
    pub width: u32,
    pub height: u32,
    /// Always 3 (DeviceRGB) for images produced by the Rust backend.
    pub components: u8,
    pub bytes: Vec<u8>,
}

/// Decoded RGB8 pixels, row-major, three bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl RawImage {
    /// Whether an image of this size fits in a JPEG frame.
    pub fn fits_jpeg(width: u32, height: u32) -> bool {
        width <= MAX_JPEG_EDGE && height <= MAX_JPEG_EDGE
    }
}
