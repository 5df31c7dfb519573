use egui::Pos2;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::document::Document;
use crate::editor::LineEditor;
use crate::util::time;

/// Version of the snapshot file layout
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Errors that can occur while saving or loading drawings
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize drawing: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to access file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Unsupported drawing format version {0}")]
    UnsupportedVersion(u32),

    #[error("Invalid drawing data: {0}")]
    InvalidData(String),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// A saved drawing: the document plus where the next segment would start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingSnapshot {
    pub format_version: u32,
    /// Version of the application that wrote the snapshot
    pub app_version: String,
    /// Seconds since the UNIX epoch when the snapshot was taken
    pub timestamp: u64,
    pub document: Document,
    pub cursor: Option<Pos2>,
}

impl DrawingSnapshot {
    /// Capture the current drawing of an editor
    pub fn capture(editor: &LineEditor) -> Self {
        Self {
            format_version: SNAPSHOT_FORMAT_VERSION,
            app_version: env!("CARGO_PKG_VERSION").to_owned(),
            timestamp: time::timestamp_secs(),
            document: editor.document().clone(),
            cursor: editor.cursor(),
        }
    }

    /// Checks the snapshot can be loaded without corrupting the editor
    pub fn validate(&self) -> PersistenceResult<()> {
        if self.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(PersistenceError::UnsupportedVersion(self.format_version));
        }
        let cursor_ok = self.cursor.is_none_or(|c| c.x.is_finite() && c.y.is_finite());
        if !self.document.is_finite() || !cursor_ok {
            return Err(PersistenceError::InvalidData(
                "coordinates must be finite numbers".to_owned(),
            ));
        }
        Ok(())
    }

    /// Replace the editor's drawing with this snapshot
    pub fn restore(self, editor: &mut LineEditor) -> PersistenceResult<()> {
        self.validate()?;
        if self.app_version != env!("CARGO_PKG_VERSION") {
            log::warn!(
                "Drawing was saved by version {}, running {}",
                self.app_version,
                env!("CARGO_PKG_VERSION")
            );
        }
        editor.load_document(self.document, self.cursor);
        Ok(())
    }

    pub fn to_json(&self) -> PersistenceResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> PersistenceResult<Self> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }
}

/// Save the editor's drawing as JSON
pub fn save_drawing(path: &Path, editor: &LineEditor) -> PersistenceResult<()> {
    let json = DrawingSnapshot::capture(editor).to_json()?;
    fs::write(path, json)?;
    log::info!("Drawing saved to {}", path.display());
    Ok(())
}

/// Read a drawing saved by [`save_drawing`]
pub fn load_drawing(path: &Path) -> PersistenceResult<DrawingSnapshot> {
    let json = fs::read_to_string(path)?;
    let snapshot = DrawingSnapshot::from_json(&json)?;
    log::info!("Drawing loaded from {}", path.display());
    Ok(snapshot)
}
