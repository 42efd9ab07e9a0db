use crate::error::Result;
use crate::model::Note;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Portable backup snapshot: `{ app, version, exportedAt, data: { notes } }`.
///
/// Always carries the full collection, unfiltered by any active search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub app: String,
    pub version: String,
    /// ISO-8601, millisecond precision, UTC.
    pub exported_at: String,
    pub data: ExportData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportData {
    pub notes: Vec<Note>,
}

impl ExportDocument {
    /// The finished backup text, pretty-printed for human inspection.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Snapshot `notes` into a backup document stamped `exported_at`. Pure;
/// the store is not touched.
pub fn snapshot(notes: &[Note], exported_at: DateTime<Utc>) -> ExportDocument {
    ExportDocument {
        app: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        exported_at: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        data: ExportData {
            notes: notes.to_vec(),
        },
    }
}
