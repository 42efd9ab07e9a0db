use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user-authored note. `id` is assigned at creation and never changes;
/// `updated_at` is bumped on every title/content mutation and is always
/// `>= created_at`.
///
/// Field names are camelCase on the wire and timestamps are integer
/// milliseconds since the epoch, matching the persisted layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// A fresh, empty note stamped with `now` for both timestamps.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: String::new(),
            content: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the note's title or content contains `needle`,
    /// case-insensitively. Empty needles match everything.
    pub fn matches(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.content.to_lowercase().contains(&needle)
    }
}

/// Partial update applied by [`crate::store::NoteStore::update`]: `None`
/// fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl NotePatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: None,
        }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self {
            title: None,
            content: Some(content.into()),
        }
    }

    /// True if applying this patch to `note` would change nothing.
    pub fn is_noop_for(&self, note: &Note) -> bool {
        let title_same = self.title.as_ref().is_none_or(|t| *t == note.title);
        let content_same = self.content.as_ref().is_none_or(|c| *c == note.content);
        title_same && content_same
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    #[test]
    fn new_note_is_empty_with_equal_timestamps() {
        let note = Note::new(at(1000));
        assert!(note.title.is_empty());
        assert!(note.content.is_empty());
        assert_eq!(note.created_at, note.updated_at);
    }

    #[test]
    fn matches_is_case_insensitive_over_both_fields() {
        let mut note = Note::new(at(0));
        note.title = "Groceries".into();
        note.content = "Milk and Eggs".into();

        assert!(note.matches("grocer"));
        assert!(note.matches("EGGS"));
        assert!(note.matches(""));
        assert!(!note.matches("zz-no-match"));
    }

    #[test]
    fn noop_patch_detection() {
        let mut note = Note::new(at(0));
        note.title = "A".into();

        assert!(NotePatch::default().is_noop_for(&note));
        assert!(NotePatch::title("A").is_noop_for(&note));
        assert!(!NotePatch::title("B").is_noop_for(&note));
        assert!(!NotePatch::content("body").is_noop_for(&note));
    }
}
