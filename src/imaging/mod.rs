//! Image decoding and re-encoding, pure Rust.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image` full decode → pixel dimensions |
//! | **Encode for PDF** | `image` JPEG encoder (RGB8) |
//! | **Raw pixels** | `image` decode → RGB8 buffer, for sides JPEG cannot hold |
//!
//! The module is split into:
//! - **Parameters**: [`Quality`], [`JpegImage`] and [`RawImage`]
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use params::{JpegImage, MAX_JPEG_EDGE, Quality, RawImage};
pub use rust_backend::RustBackend;
