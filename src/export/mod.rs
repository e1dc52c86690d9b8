//! Export: ordered pages in, one PDF out.
//!
//! [`export`] walks a snapshot of the collection and hands each page to a
//! [`DocumentBuilder`], reporting progress as it goes:
//!
//! ```text
//! Generating { total: 3 }
//! Processed { index: 1, total: 3 }
//! Processed { index: 2, total: 3 }
//! Processed { index: 3, total: 3 }
//! Finished
//! Cleared            ← after `clear_after`, from a timer thread
//! ```
//!
//! A builder error ends the export immediately and is returned as-is. No
//! artifact is produced and no `Finished`/`Cleared` is sent, so a status line
//! driven by these events stays on the last `Processed` message.

pub mod builder;
pub mod lopdf_builder;

pub use builder::{DocumentBuilder, PageSpec};
pub use lopdf_builder::LopdfBuilder;

use crate::imaging::BackendError;
use crate::telemetry::{ExportSummary, Telemetry};
use crate::types::PageDescriptor;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("image encoding failed: {0}")]
    Image(#[from] BackendError),
    #[error("PDF serialization failed: {0}")]
    Pdf(String),
    /// For [`DocumentBuilder`] implementations outside this crate to report
    /// their own failures; [`LopdfBuilder`] uses `Image` and `Pdf`.
    #[error("document builder failed: {0}")]
    Builder(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Progress of one export, in the order the events are sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportEvent {
    Generating { total: usize },
    /// `index` is 1-based.
    Processed { index: usize, total: usize },
    Finished,
    Cleared,
}

#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Name the artifact is saved under.
    pub file_name: String,
    /// Delay between `Finished` and `Cleared`.
    pub clear_after: Duration,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            file_name: "my_images.pdf".to_string(),
            clear_after: Duration::from_millis(2000),
        }
    }
}

/// A finished document, not yet written anywhere.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

impl ExportArtifact {
    /// Write into `dir` under [`file_name`](Self::file_name), creating the
    /// directory if needed. Returns the written path.
    pub fn save_into(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        self.save_as(&path)?;
        Ok(path)
    }

    /// Write to exactly `path`, ignoring [`file_name`](Self::file_name).
    pub fn save_as(&self, path: &Path) -> Result<(), ExportError> {
        std::fs::write(path, &self.bytes)?;
        Ok(())
    }
}

/// Build one document from `pages`, in order.
///
/// `pages` should be a [`snapshot`](crate::collection::PageCollection::snapshot)
/// so the export is unaffected by later edits. Zero pages is fine and yields
/// an empty document.
pub fn export<D: DocumentBuilder>(
    mut builder: D,
    pages: &[PageDescriptor],
    options: &ExportOptions,
    events: Option<Sender<ExportEvent>>,
    telemetry: Option<&dyn Telemetry>,
) -> Result<ExportArtifact, ExportError> {
    if let Some(sink) = telemetry {
        sink.record_export(&ExportSummary::from_pages(pages));
    }

    let total = pages.len();
    notify(events.as_ref(), ExportEvent::Generating { total });

    for (i, page) in pages.iter().enumerate() {
        builder.add_page(&PageSpec::for_page(page), &page.content)?;
        notify(
            events.as_ref(),
            ExportEvent::Processed {
                index: i + 1,
                total,
            },
        );
    }

    let bytes = builder.finish()?;
    notify(events.as_ref(), ExportEvent::Finished);
    log::info!("exported {} pages ({} bytes)", total, bytes.len());

    if let Some(tx) = events {
        schedule_clear(tx, options.clear_after);
    }

    Ok(ExportArtifact {
        file_name: options.file_name.clone(),
        bytes,
        page_count: total,
    })
}

fn notify(events: Option<&Sender<ExportEvent>>, event: ExportEvent) {
    if let Some(tx) = events {
        // A listener that went away is not an export failure
        let _ = tx.send(event);
    }
}

/// Send `Cleared` after `delay` without holding up the caller.
fn schedule_clear(tx: Sender<ExportEvent>, delay: Duration) {
    if delay.is_zero() {
        let _ = tx.send(ExportEvent::Cleared);
        return;
    }
    std::thread::spawn(move || {
        std::thread::sleep(delay);
        let _ = tx.send(ExportEvent::Cleared);
    });
}
