//! # PDF Carousel
//!
//! Turn a handful of images into a PDF "carousel": one image per page, each
//! page exactly the size of its image, in an order the user chooses.
//!
//! # Architecture
//!
//! ```text
//! files ──▶ ingest ──▶ PageCollection ◀──▶ ReorderEngine
//!                            │
//!                        snapshot
//!                            ▼
//!                         export ──▶ DocumentBuilder ──▶ my_images.pdf
//!                            │
//!                            ├──▶ ExportEvent ──▶ StatusSurface / CLI
//!                            └──▶ Telemetry
//! ```
//!
//! - **Ingestion** decodes every file in parallel and appends a page only once
//!   its dimensions are known. Files that fail to decode simply never appear.
//! - **The collection** is the single ordered list of pages. Every edit swaps
//!   in a new order whole, so snapshots handed to export never change.
//! - **The reorder engine** turns drag gestures into at most one
//!   `move_before` per drop.
//! - **Export** walks a snapshot front to back and reports progress as
//!   events rather than writing to any display itself.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`ingest`] | File handles in, measured [`types::PageDescriptor`]s out, on the rayon pool |
//! | [`collection`] | Ordered, id-keyed page list with copy-on-write snapshots |
//! | [`reorder`] | Drag-and-drop state machine and derived row affordances |
//! | [`export`] | Export pipeline, progress events and the `lopdf` document builder |
//! | [`status`] | Single-line status text driven by export events |
//! | [`telemetry`] | Per-export summary handed to a pluggable sink |
//! | [`content`] | `data:` URI encoding and MIME lookup |
//! | [`imaging`] | Decoding, measuring and JPEG re-encoding through the `image` crate |
//! | [`config`] | TOML configuration: stock defaults, merging, validation |
//! | [`output`] | CLI output formatting |
//! | [`types`] | Shared data model (`PageId`, `PageDescriptor`, `Orientation`) |
//!
//! # Design Decisions
//!
//! ## Pages Keep Their Pixel Size
//!
//! A page is `width × height` PDF user units for a `width × height` image and
//! the image fills it edge to edge. There is no paper size, margin or scaling
//! step, so what the user saw in the list is what the PDF shows.
//!
//! ## Everything Becomes JPEG
//!
//! Page images are re-encoded as baseline JPEG and embedded with `DCTDecode`.
//! PNG, WebP, GIF and friends all end up in one filter every PDF reader
//! handles, and the quality knob in the config applies uniformly. The one
//! exception is an image with a side over 65535 pixels, which no JPEG frame
//! can describe: it is embedded as raw RGB pixels and flate-compressed.
//!
//! ## Identity Is Not Content
//!
//! Pages are keyed by a random [`types::PageId`]. Adding the same file twice
//! gives two independent pages that can be moved and removed separately.
//!
//! ## Drop Means "Before"
//!
//! Dropping page A on page B always leaves A immediately before B, whichever
//! direction A travelled. See [`collection::PageCollection::move_before`].

pub mod collection;
pub mod config;
pub mod content;
pub mod export;
pub mod imaging;
pub mod ingest;
pub mod output;
pub mod reorder;
pub mod status;
pub mod telemetry;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
