use chrono::{DateTime, Duration, Utc};

/// Debounce window for edit-triggered saves.
pub const DEFAULT_DEBOUNCE_MS: i64 = 350;

/// Debounces persistence writes triggered by edits.
///
/// At most one deadline is armed at a time; scheduling again replaces it
/// (coalescing, not queuing). The store flushes once the deadline passes
/// with no further mutation, so a burst of keystrokes costs one durable
/// write. Discrete events (create, select, delete completion) bypass this
/// entirely and cancel any pending deadline when they persist everything
/// themselves.
#[derive(Debug)]
pub struct SaveScheduler {
    window: Duration,
    deadline: Option<DateTime<Utc>>,
}

impl SaveScheduler {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// Arm (or re-arm) the deadline at `now + window`. The latest mutation
    /// always wins.
    pub fn schedule(&mut self, now: DateTime<Utc>) {
        self.deadline = Some(now + self.window);
    }

    /// Disarm without firing. Used when an immediate save already made the
    /// pending flush redundant.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// If the armed deadline has passed, disarm and report that a flush is
    /// due. At most one flush fires per armed deadline.
    pub fn take_due(&mut self, now: DateTime<Utc>) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }
}
