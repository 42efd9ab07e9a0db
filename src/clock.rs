use chrono::{DateTime, TimeZone, Utc};
use std::cell::Cell;
use std::rc::Rc;

/// Time source for the store. The two timers in this crate (save debounce,
/// deletion delay) are deadlines against this clock, so hosts and tests can
/// drive time explicitly instead of sleeping.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock, truncated to millisecond precision. The persisted format
/// carries millisecond timestamps, so truncating here keeps an encode/decode
/// round trip exact.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        let ms = Utc::now().timestamp_millis();
        // timestamp_millis of a real wall-clock reading is always in range
        Utc.timestamp_millis_opt(ms).unwrap()
    }
}

/// A hand-cranked clock for tests and deterministic hosts. Clones share the
/// same underlying instant; the store is single-threaded so `Rc` suffices.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    millis: Rc<Cell<i64>>,
}

impl ManualClock {
    pub fn new(start_millis: i64) -> Self {
        Self {
            millis: Rc::new(Cell::new(start_millis)),
        }
    }

    pub fn advance(&self, millis: i64) {
        self.millis.set(self.millis.get() + millis);
    }

    pub fn set(&self, millis: i64) {
        self.millis.set(millis);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.millis.get()).unwrap()
    }
}
