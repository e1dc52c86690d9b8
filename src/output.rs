//! CLI output formatting.
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Ingest
//!
//! ```text
//! + beach.jpg (1600x1200)
//! - notes.txt: failed to decode notes.txt: ...
//! ```
//!
//! ## Page list
//!
//! ```text
//! 001 beach.jpg
//!     482.31 KB - image/jpeg
//!     1600x1200 landscape
//! 002 portrait.png
//!     1.2 MB - image/png
//!     900x1600 portrait
//! ```
//!
//! ## Export
//!
//! ```text
//! Generating...
//! Processed 1 of 2
//! Processed 2 of 2
//! Finished
//! Wrote 2 pages to out/my_images.pdf (612.4 KB)
//! ```

use crate::collection::PageCollection;
use crate::export::{ExportArtifact, ExportEvent};
use crate::ingest::{IngestEvent, IngestReport};
use crate::status::status_text;
use std::path::Path;

const SIZE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Human-readable byte count with binary units.
///
/// Up to two decimals, trailing zeros dropped: `1536` → `"1.5 KB"`. Zero is
/// `"0 Byte"`.
pub fn bytes_to_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Byte".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let fixed = format!("{:.2}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, SIZE_UNITS[unit])
}

// ============================================================================
// Ingest output
// ============================================================================

pub fn format_ingest_event(event: &IngestEvent) -> Vec<String> {
    match event {
        IngestEvent::Added {
            name,
            width,
            height,
        } => vec![format!("+ {} ({}x{})", name, width, height)],
        IngestEvent::Skipped { name, reason } => vec![format!("- {}: {}", name, reason)],
    }
}

pub fn format_ingest_summary(report: &IngestReport) -> Vec<String> {
    let mut line = format!("Added {} pages", report.added.len());
    if !report.skipped.is_empty() {
        line.push_str(&format!(", skipped {}", report.skipped.len()));
    }
    vec![line]
}

// ============================================================================
// Page list
// ============================================================================

/// Format the collection in its current order.
///
/// Each page leads with its position and file name; size, type and geometry
/// follow as indented context lines.
pub fn format_page_list(collection: &PageCollection) -> Vec<String> {
    if collection.is_empty() {
        return vec!["No pages".to_string()];
    }
    let mut lines = Vec::new();
    for (i, page) in collection.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), page.name));
        let kind = if page.mime_type.is_empty() {
            "unknown type"
        } else {
            page.mime_type.as_str()
        };
        lines.push(format!("    {} - {}", bytes_to_size(page.size), kind));
        lines.push(format!(
            "    {}x{} {}",
            page.width,
            page.height,
            page.orientation()
        ));
    }
    lines
}

pub fn print_page_list(collection: &PageCollection) {
    for line in format_page_list(collection) {
        println!("{}", line);
    }
}

// ============================================================================
// Export output
// ============================================================================

/// One status line per event. `Cleared` prints nothing.
pub fn format_export_event(event: &ExportEvent) -> Vec<String> {
    let text = status_text(event);
    if text.is_empty() {
        Vec::new()
    } else {
        vec![text]
    }
}

pub fn format_export_summary(artifact: &ExportArtifact, path: &Path) -> Vec<String> {
    let noun = if artifact.page_count == 1 {
        "page"
    } else {
        "pages"
    };
    vec![format!(
        "Wrote {} {} to {} ({})",
        artifact.page_count,
        noun,
        path.display(),
        bytes_to_size(artifact.bytes.len() as u64)
    )]
}

pub fn print_export_summary(artifact: &ExportArtifact, path: &Path) {
    for line in format_export_summary(artifact, path) {
        println!("{}", line);
    }
}
