//! Export analytics.
//!
//! One [`ExportSummary`] is handed to a [`Telemetry`] sink per export. Sinks
//! only observe; nothing they do can change or fail the export.

use crate::types::PageDescriptor;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    pub file_count: usize,
    pub max_width: u32,
    pub max_height: u32,
    /// Distinct lower-cased MIME types, sorted and comma-joined.
    pub types: String,
}

impl ExportSummary {
    pub fn from_pages(pages: &[PageDescriptor]) -> Self {
        let types: BTreeSet<String> = pages
            .iter()
            .filter(|p| !p.mime_type.is_empty())
            .map(|p| p.mime_type.to_lowercase())
            .collect();

        Self {
            file_count: pages.len(),
            max_width: pages.iter().map(|p| p.width).max().unwrap_or(0),
            max_height: pages.iter().map(|p| p.height).max().unwrap_or(0),
            types: types.into_iter().collect::<Vec<_>>().join(","),
        }
    }
}

pub trait Telemetry {
    fn record_export(&self, summary: &ExportSummary);
}

/// Sends summaries to the `log` facade at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTelemetry;

impl Telemetry for LogTelemetry {
    fn record_export(&self, summary: &ExportSummary) {
        log::info!(
            "export: files={} max_width={} max_height={} types={}",
            summary.file_count,
            summary.max_width,
            summary.max_height,
            summary.types
        );
    }
}
