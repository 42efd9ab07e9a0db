//! Serialization codec for the persisted note collection and selection
//! pointer.
//!
//! Encoding is plain serde; decoding is deliberately defensive. Persisted
//! data may be malformed or partial (interrupted writes, hand-edited files,
//! older layouts), and a corrupt single record must never fail the whole
//! load: non-object entries are dropped, missing or mistyped fields are
//! replaced with type-appropriate defaults.

use crate::error::Result;
use crate::model::Note;
use chrono::{DateTime, TimeZone, Utc};
use log::warn;
use serde_json::Value;
use uuid::Uuid;

/// Encode the note collection for persistence.
pub fn encode_notes(notes: &[Note]) -> Result<String> {
    Ok(serde_json::to_string(notes)?)
}

/// Decode a persisted note collection. Never fails: undecodable payloads
/// yield an empty collection, undecodable records are dropped, and missing
/// fields are defaulted (`now` fills absent timestamps, a fresh id fills an
/// absent id).
pub fn decode_notes(raw: &str, now: DateTime<Utc>) -> Vec<Note> {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            warn!("persisted notes are not valid JSON, starting empty: {err}");
            return Vec::new();
        }
    };

    let Value::Array(entries) = value else {
        warn!("persisted notes are not an array, starting empty");
        return Vec::new();
    };

    let total = entries.len();
    let notes: Vec<Note> = entries
        .into_iter()
        .filter_map(|entry| decode_record(entry, now))
        .collect();

    if notes.len() < total {
        warn!("dropped {} corrupt note record(s)", total - notes.len());
    }
    notes
}

fn decode_record(entry: Value, now: DateTime<Utc>) -> Option<Note> {
    let Value::Object(fields) = entry else {
        return None;
    };

    let id = fields
        .get("id")
        .and_then(Value::as_str)
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .unwrap_or_else(Uuid::new_v4);

    let created_at = timestamp_field(&fields, "createdAt").unwrap_or(now);
    let mut updated_at = timestamp_field(&fields, "updatedAt").unwrap_or(now);
    // updated_at >= created_at is a store invariant; repair rather than trust
    if updated_at < created_at {
        updated_at = created_at;
    }

    Some(Note {
        id,
        title: text_field(&fields, "title"),
        content: text_field(&fields, "content"),
        created_at,
        updated_at,
    })
}

fn text_field(fields: &serde_json::Map<String, Value>, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn timestamp_field(fields: &serde_json::Map<String, Value>, key: &str) -> Option<DateTime<Utc>> {
    let millis = fields.get(key)?.as_i64()?;
    Utc.timestamp_millis_opt(millis).single()
}

/// Encode the selection pointer. Empty string means "no selection".
pub fn encode_selection(selected: Option<Uuid>) -> String {
    selected.map(|id| id.to_string()).unwrap_or_default()
}

/// Decode the selection pointer; anything unparseable degrades to none.
pub fn decode_selection(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}
