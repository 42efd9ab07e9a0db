use super::StorageBackend;
use std::collections::HashMap;

/// In-memory storage for testing and development.
/// Does NOT persist data across sessions.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
    fail_writes: bool,
    writes: u64,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set` report failure, for exercising the
    /// write-failure warning path.
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Number of successful writes so far. Debounce tests count these.
    pub fn write_count(&self) -> u64 {
        self.writes
    }

    /// Direct read access for assertions.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Seed an entry, bypassing the write counter.
    pub fn seed(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        if self.fail_writes {
            return false;
        }
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_round_trips() {
        let mut backend = MemoryBackend::new();
        assert!(backend.set("k", "v"));
        assert_eq!(backend.get("k").as_deref(), Some("v"));
        assert_eq!(backend.write_count(), 1);
    }

    #[test]
    fn failed_writes_leave_entries_untouched() {
        let mut backend = MemoryBackend::new();
        backend.set("k", "old");
        backend.fail_writes(true);

        assert!(!backend.set("k", "new"));
        assert_eq!(backend.get("k").as_deref(), Some("old"));
        assert_eq!(backend.write_count(), 1);
    }
}
