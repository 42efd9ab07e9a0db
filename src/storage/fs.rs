use super::StorageBackend;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// File-based storage: each key becomes one file under `root`.
///
/// Writes go through a temp-file rename so a crash mid-write leaves the
/// previous value intact rather than a truncated one.
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Per-user data directory (e.g. `~/.local/share/jotter` on Linux),
    /// or the current directory if the platform offers none.
    pub fn default_root() -> PathBuf {
        directories::ProjectDirs::from("", "", "jotter")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl StorageBackend for FileBackend {
    fn get(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.entry_path(key)) {
            Ok(value) => Some(value),
            Err(err) => {
                debug!("no persisted value for {key:?}: {err}");
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        if let Err(err) = fs::create_dir_all(&self.root) {
            warn!("cannot create storage root {:?}: {err}", self.root);
            return false;
        }

        let path = self.entry_path(key);
        let tmp = self.root.join(format!("{key}.tmp"));
        if let Err(err) = fs::write(&tmp, value) {
            warn!("write failed for {key:?}: {err}");
            return false;
        }
        match fs::rename(&tmp, &path) {
            Ok(()) => true,
            Err(err) => {
                warn!("rename failed for {key:?}: {err}");
                let _ = fs::remove_file(&tmp);
                false
            }
        }
    }
}
