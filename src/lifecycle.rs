use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// Delay between the delete request and the actual removal, covering the
/// removal animation the render collaborator runs.
pub const DEFAULT_DELETE_DELAY_MS: i64 = 230;

/// The deletion state machine: `Idle` → `Pending` → `Idle`.
///
/// A delete request does not remove the note; it enters `Pending` and the
/// removal happens only once the delay elapses. While `Pending`, every
/// other mutation is rejected by the store, so the collection never
/// observes a half-deleted note and the debounced save can never race the
/// removal. Only one deletion can be in flight; the delay is not
/// cancellable once started.
#[derive(Debug, Default)]
pub enum DeletionLifecycle {
    #[default]
    Idle,
    Pending {
        id: Uuid,
        due_at: DateTime<Utc>,
    },
}

impl DeletionLifecycle {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    /// Enter `Pending` for `id`. Returns `false` (and stays put) if a
    /// deletion is already in flight.
    pub fn begin(&mut self, id: Uuid, now: DateTime<Utc>, delay: Duration) -> bool {
        if self.is_pending() {
            return false;
        }
        *self = Self::Pending {
            id,
            due_at: now + delay,
        };
        true
    }

    /// If the pending delay has elapsed, return to `Idle` and yield the id
    /// whose removal is now due.
    pub fn take_due(&mut self, now: DateTime<Utc>) -> Option<Uuid> {
        match *self {
            Self::Pending { id, due_at } if now >= due_at => {
                *self = Self::Idle;
                Some(id)
            }
            _ => None,
        }
    }

    pub fn due_at(&self) -> Option<DateTime<Utc>> {
        match *self {
            Self::Pending { due_at, .. } => Some(due_at),
            Self::Idle => None,
        }
    }
}
