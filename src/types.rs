//! Shared types used across ingestion, ordering and export.
//!
//! A [`PageDescriptor`] is created once by the ingest stage and then only
//! moved around (collection, reorder) or read (export). Nothing mutates a
//! descriptor after it has been built.

use crate::content::DataUri;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque identity of one page-to-be.
///
/// Assigned at ingestion and never derived from content: two identical
/// images dropped twice are still two distinct pages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageId(Uuid);

impl PageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pixel dimensions of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn orientation(self) -> Orientation {
        if self.width > self.height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

/// Page orientation. Square images are portrait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Portrait => f.write_str("portrait"),
            Orientation::Landscape => f.write_str("landscape"),
        }
    }
}

/// One page of the carousel: a decoded, measured image plus display metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct PageDescriptor {
    /// Unique key for collection membership and reorder targeting
    pub id: PageId,
    /// Original file name (display only)
    pub name: String,
    /// Self-describing encoded image (`data:<mime>;base64,...`)
    pub content: DataUri,
    /// Byte length of the original file (display only)
    pub size: u64,
    pub width: u32,
    pub height: u32,
    /// MIME type of the original file; empty when unknown
    pub mime_type: String,
}

impl PageDescriptor {
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width,
            height: self.height,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.dimensions().orientation()
    }

    /// Serializable view without the (potentially large) content payload.
    pub fn summary(&self) -> PageSummary {
        PageSummary {
            id: self.id,
            name: self.name.clone(),
            size: self.size,
            width: self.width,
            height: self.height,
            mime_type: self.mime_type.clone(),
            orientation: self.orientation(),
        }
    }
}

/// What `list --json` prints for each page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSummary {
    pub id: PageId,
    pub name: String,
    pub size: u64,
    pub width: u32,
    pub height: u32,
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub mime_type: String,
    pub orientation: Orientation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_ids_are_unique() {
        let a = PageId::new();
        let b = PageId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn wider_than_tall_is_landscape() {
        let dims = Dimensions {
            width: 800,
            height: 600,
        };
        assert_eq!(dims.orientation(), Orientation::Landscape);
    }

    #[test]
    fn taller_than_wide_is_portrait() {
        let dims = Dimensions {
            width: 400,
            height: 500,
        };
        assert_eq!(dims.orientation(), Orientation::Portrait);
    }

    #[test]
    fn square_is_portrait() {
        let dims = Dimensions {
            width: 300,
            height: 300,
        };
        assert_eq!(dims.orientation(), Orientation::Portrait);
    }

    #[test]
    fn summary_serializes_type_field() {
        let page = PageDescriptor {
            id: PageId::new(),
            name: "a.png".to_string(),
            content: DataUri::encode("image/png", b"png"),
            size: 3,
            width: 100,
            height: 50,
            mime_type: "image/png".to_string(),
        };
        let json = serde_json::to_value(page.summary()).unwrap();
        assert_eq!(json["type"], "image/png");
        assert_eq!(json["orientation"], "landscape");
        assert!(json.get("content").is_none());
    }

    #[test]
    fn summary_omits_unknown_type() {
        let page = PageDescriptor {
            id: PageId::new(),
            name: "scan".to_string(),
            content: DataUri::encode("", b"x"),
            size: 1,
            width: 1,
            height: 1,
            mime_type: String::new(),
        };
        let json = serde_json::to_value(page.summary()).unwrap();
        assert!(json.get("type").is_none());
    }
}
