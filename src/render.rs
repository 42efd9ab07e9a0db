//! Render/notification collaborator boundary.
//!
//! The store owns data and timing; the sink owns pixels. After every state
//! change the store pushes enough information through [`RenderSink`] to
//! redraw, and it never reads anything back. All methods default to no-ops
//! so hosts implement only what they present.

use crate::model::Note;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A user-facing message (toast material, not a log line).
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub content: String,
}

impl Notice {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            content: content.into(),
        }
    }
}

/// Presentation-side collaborator notified after every store state change.
pub trait RenderSink {
    /// Full redraw: the visible (search-filtered, sorted) note list, the
    /// current selection, and the active search query.
    fn render_full(&self, visible: &[Note], selected: Option<Uuid>, search: &str) {
        let _ = (visible, selected, search);
    }

    /// Incremental redraw of the list only; the editor already reflects
    /// the live edit.
    fn render_list(&self, visible: &[Note], search: &str) {
        let _ = (visible, search);
    }

    /// A deletion entered `Pending`: start the removal animation for `id`
    /// and disable editing until the next full render.
    fn begin_removal(&self, id: Uuid) {
        let _ = id;
    }

    /// Surface a user-facing notice (e.g. a persistence warning).
    fn notice(&self, notice: Notice) {
        let _ = notice;
    }
}

/// Headless sink for hosts and tests that do not present anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRender;

impl RenderSink for NullRender {}
