//! Self-describing page content.
//!
//! Page content is kept as a `data:` URI (RFC 2397, base64 form) so a
//! descriptor carries both the format and the bytes of its image in one
//! opaque value. Only the decoder and the PDF builder ever look inside.
//!
//! ```text
//! data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAA...
//! ```

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::ImageFormat;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Media type used in the URI when the file type is unknown.
const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// Picker-offered types the `image` crate has no format for.
const EXTRA_MIME_TYPES: &[(&str, &str)] = &[("svg", "image/svg+xml"), ("heic", "image/heic")];

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("not a data URI")]
    NotDataUri,
    #[error("data URI is not base64-encoded")]
    NotBase64,
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Guess a MIME type from a file name's extension.
///
/// Case-insensitive. Unknown extensions give an empty type, the same as a
/// file whose type the platform could not guess.
pub fn mime_for_name(name: &str) -> &'static str {
    let Some(ext) = Path::new(name).extension().and_then(|e| e.to_str()) else {
        return "";
    };
    if let Some(format) = ImageFormat::from_extension(ext) {
        return format.to_mime_type();
    }
    EXTRA_MIME_TYPES
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(ext))
        .map_or("", |(_, mime)| *mime)
}

/// A `data:<mime>;base64,<payload>` string.
///
/// Cloning is cheap (shared buffer), so descriptors and snapshots can be
/// copied freely without duplicating image bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct DataUri(Arc<str>);

/// The two halves of a parsed [`DataUri`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedContent {
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl DataUri {
    /// Encode raw file bytes. An empty `media_type` becomes
    /// `application/octet-stream`.
    pub fn encode(media_type: &str, bytes: &[u8]) -> Self {
        let media_type = if media_type.is_empty() {
            FALLBACK_MEDIA_TYPE
        } else {
            media_type
        };
        let uri = format!("data:{};base64,{}", media_type, STANDARD.encode(bytes));
        Self(uri.into())
    }

    /// Wrap an existing URI string after checking that it parses.
    pub fn parse(uri: &str) -> Result<Self, ContentError> {
        split_uri(uri)?;
        Ok(Self(uri.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Media type declared in the URI header.
    pub fn media_type(&self) -> &str {
        split_uri(&self.0).map(|(mime, _)| mime).unwrap_or("")
    }

    pub fn decode(&self) -> Result<DecodedContent, ContentError> {
        let (media_type, payload) = split_uri(&self.0)?;
        let bytes = STANDARD.decode(payload)?;
        Ok(DecodedContent {
            media_type: media_type.to_string(),
            bytes,
        })
    }
}

/// Split `data:<mime>;base64,<payload>` into `(mime, payload)`.
fn split_uri(uri: &str) -> Result<(&str, &str), ContentError> {
    let rest = uri.strip_prefix("data:").ok_or(ContentError::NotDataUri)?;
    let (header, payload) = rest.split_once(',').ok_or(ContentError::NotDataUri)?;
    let media_type = header
        .strip_suffix(";base64")
        .ok_or(ContentError::NotBase64)?;
    Ok((media_type, payload))
}

impl fmt::Debug for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DataUri({}, {} chars)", self.media_type(), self.0.len())
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
