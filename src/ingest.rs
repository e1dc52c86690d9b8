//! File ingestion: raw files in, page descriptors out.
//!
//! Each file in a batch is handled by its own task on the rayon pool:
//!
//! ```text
//! read bytes → data URI → decode + measure → PageDescriptor
//! ```
//!
//! Tasks report back over an `mpsc` channel with `(batch_index, Result)`.
//! The calling thread drains that channel and is the only one touching the
//! [`PageCollection`], so every append happens whole and in one place.
//!
//! ## Failures
//!
//! A file that cannot be read or decoded produces no page and does not
//! affect the rest of the batch. It is reported as
//! [`IngestEvent::Skipped`] and listed in [`IngestReport::skipped`]; it
//! never reaches the export status line.
//!
//! ## Append order
//!
//! With [`AppendOrder::Arrival`] (the default) pages are appended as their
//! decode finishes, so a large first file can land after a small second one.
//! [`AppendOrder::Input`] holds results until the batch is done and appends
//! survivors in the order the files were given.

use crate::collection::PageCollection;
use crate::content::{DataUri, mime_for_name};
use crate::imaging::{BackendError, ImageBackend};
use crate::types::{PageDescriptor, PageId};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{self, Sender};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("input not found: {0}")]
    InputNotFound(PathBuf),
    #[error("failed to read {name}: {source}")]
    Read {
        name: String,
        source: std::io::Error,
    },
    #[error("failed to decode {name}: {source}")]
    Decode {
        name: String,
        source: BackendError,
    },
    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}

/// When decoded pages join the collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppendOrder {
    /// As each decode completes.
    #[default]
    Arrival,
    /// After the whole batch, in input order.
    Input,
}

#[derive(Debug, Clone)]
enum FileSource {
    Path(PathBuf),
    Memory(Arc<[u8]>),
}

/// A file picked by the user, not yet read.
#[derive(Debug, Clone)]
pub struct FileHandle {
    pub name: String,
    /// Type guessed from the file name; empty when unknown.
    pub mime_type: String,
    source: FileSource,
}

impl FileHandle {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self {
            mime_type: mime_for_name(&name).to_string(),
            name,
            source: FileSource::Path(path),
        }
    }

    pub fn from_bytes(name: &str, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.to_string(),
            mime_type: mime_for_name(name).to_string(),
            source: FileSource::Memory(bytes.into().into()),
        }
    }

    fn read(&self) -> std::io::Result<Vec<u8>> {
        match &self.source {
            FileSource::Path(path) => std::fs::read(path),
            FileSource::Memory(bytes) => Ok(bytes.to_vec()),
        }
    }
}

/// Turn command-line inputs into file handles.
///
/// Files are taken as given. Directories contribute their direct children
/// (not recursive), sorted by file name, hidden files skipped. No extension
/// filter is applied: decoding is the only gate.
pub fn expand_inputs(inputs: &[PathBuf]) -> Result<Vec<FileHandle>, IngestError> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_file() {
            files.push(FileHandle::from_path(input));
        } else if input.is_dir() {
            for entry in WalkDir::new(input)
                .min_depth(1)
                .max_depth(1)
                .sort_by_file_name()
            {
                let entry = entry?;
                if entry.file_type().is_file() && !is_hidden(entry.path()) {
                    files.push(FileHandle::from_path(entry.path()));
                }
            }
        } else {
            return Err(IngestError::InputNotFound(input.clone()));
        }
    }
    Ok(files)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

/// Progress notifications, one per file.
#[derive(Debug, Clone, PartialEq)]
pub enum IngestEvent {
    Added {
        name: String,
        width: u32,
        height: u32,
    },
    Skipped {
        name: String,
        reason: String,
    },
}

/// Outcome of one batch.
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Ids of the pages appended, in append order.
    pub added: Vec<PageId>,
    /// `(file name, reason)` for every file that produced no page.
    pub skipped: Vec<(String, String)>,
}

/// Read, encode and measure a single file.
pub fn ingest_one(
    backend: &impl ImageBackend,
    file: &FileHandle,
) -> Result<PageDescriptor, IngestError> {
    let bytes = file.read().map_err(|source| IngestError::Read {
        name: file.name.clone(),
        source,
    })?;
    let content = DataUri::encode(&file.mime_type, &bytes);
    let dims = backend
        .identify(&content)
        .map_err(|source| IngestError::Decode {
            name: file.name.clone(),
            source,
        })?;

    Ok(PageDescriptor {
        id: PageId::new(),
        name: file.name.clone(),
        content,
        size: bytes.len() as u64,
        width: dims.width,
        height: dims.height,
        mime_type: file.mime_type.clone(),
    })
}

/// Ingest a batch of files into `collection`.
///
/// Blocks until every file has been handled. Per-file failures are absorbed
/// into the report; this function itself cannot fail.
pub fn ingest<B: ImageBackend>(
    backend: &B,
    files: Vec<FileHandle>,
    order: AppendOrder,
    collection: &mut PageCollection,
    events: Option<Sender<IngestEvent>>,
) -> IngestReport {
    let total = files.len();
    let mut report = IngestReport::default();
    let (tx, rx) = mpsc::channel();

    std::thread::scope(|scope| {
        // Producers run on the rayon pool from a helper thread so this thread
        // is free to drain results as they complete.
        scope.spawn(move || {
            files
                .into_par_iter()
                .enumerate()
                .for_each_with(tx, |tx, (index, file)| {
                    let result = ingest_one(backend, &file);
                    // Receiver lives until the scope ends
                    let _ = tx.send((index, result));
                });
        });

        match order {
            AppendOrder::Arrival => {
                for (_, result) in rx {
                    settle(result, collection, &mut report, events.as_ref());
                }
            }
            AppendOrder::Input => {
                let mut slots: Vec<Option<Result<PageDescriptor, IngestError>>> =
                    (0..total).map(|_| None).collect();
                for (index, result) in rx {
                    slots[index] = Some(result);
                }
                for result in slots.into_iter().flatten() {
                    settle(result, collection, &mut report, events.as_ref());
                }
            }
        }
    });

    log::debug!(
        "ingested {} of {} files ({} skipped)",
        report.added.len(),
        total,
        report.skipped.len()
    );
    report
}

/// Apply one finished task to the collection.
fn settle(
    result: Result<PageDescriptor, IngestError>,
    collection: &mut PageCollection,
    report: &mut IngestReport,
    events: Option<&Sender<IngestEvent>>,
) {
    match result {
        Ok(page) => {
            if let Some(tx) = events {
                let _ = tx.send(IngestEvent::Added {
                    name: page.name.clone(),
                    width: page.width,
                    height: page.height,
                });
            }
            report.added.push(page.id);
            collection.append(page);
        }
        Err(err) => {
            let name = match &err {
                IngestError::Read { name, .. } | IngestError::Decode { name, .. } => name.clone(),
                other => other.to_string(),
            };
            log::warn!("skipping {name}: {err}");
            if let Some(tx) = events {
                let _ = tx.send(IngestEvent::Skipped {
                    name: name.clone(),
                    reason: err.to_string(),
                });
            }
            report.skipped.push((name, err.to_string()));
        }
    }
}
