//! The single-line export status.
//!
//! Text moves `""` → `Generating...` → `Processed i of N` … → `Finished` → `""`.
//! Ingestion never writes here.

use crate::export::ExportEvent;

/// Status text for one event.
pub fn status_text(event: &ExportEvent) -> String {
    match event {
        ExportEvent::Generating { .. } => "Generating...".to_string(),
        ExportEvent::Processed { index, total } => format!("Processed {index} of {total}"),
        ExportEvent::Finished => "Finished".to_string(),
        ExportEvent::Cleared => String::new(),
    }
}

#[derive(Debug, Default, Clone)]
pub struct StatusSurface {
    text: String,
}

impl StatusSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: &ExportEvent) {
        self.text = status_text(event);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}
