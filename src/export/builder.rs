//! The document-building seam.
//!
//! The export pipeline decides *which* pages go into the document and in what
//! order; a [`DocumentBuilder`] decides how a page becomes PDF objects. The
//! production builder is [`LopdfBuilder`](super::lopdf_builder::LopdfBuilder);
//! tests use the recording `MockBuilder` below.

use super::ExportError;
use crate::content::DataUri;
use crate::types::{Orientation, PageDescriptor};

/// Geometry of one output page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec {
    /// Page width in PDF user units (one per source pixel).
    pub width: u32,
    pub height: u32,
    pub orientation: Orientation,
}

impl PageSpec {
    /// The page for a descriptor: exactly its pixel size.
    pub fn for_page(page: &PageDescriptor) -> Self {
        Self {
            width: page.width,
            height: page.height,
            orientation: page.orientation(),
        }
    }
}

pub trait DocumentBuilder {
    /// Append one page showing `content` edge to edge.
    fn add_page(&mut self, spec: &PageSpec, content: &DataUri) -> Result<(), ExportError>;

    /// Serialize the finished document.
    fn finish(self) -> Result<Vec<u8>, ExportError>;
}
