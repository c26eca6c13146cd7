//! Key-value backend trait and implementations.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// The durable key-value capability the store needs from its environment.
///
/// The actual medium (browser storage, files, a database) is an
/// interchangeable collaborator. Implementations never panic: failures are
/// reported as `false` or `None`.
pub trait StorageBackend {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`, overwriting any existing entry.
    fn set(&mut self, key: &str, value: &str) -> bool;

    /// Remove the entry under `key`. Removing an absent key succeeds.
    fn remove(&mut self, key: &str) -> bool;

    /// All keys currently stored.
    fn keys(&self) -> Vec<String>;
}

/// In-memory backend for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
}

impl MemoryBackend {
    /// Create an empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        self.entries.insert(key.to_string(), value.to_string());
        true
    }

    fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key);
        true
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

/// File-per-key backend rooted at a directory.
///
/// Keys are normalized to filesystem-safe names: anything outside
/// `[A-Za-z0-9._-]` becomes `_`. Two keys that normalize to the same name
/// share an entry; last write wins, which matches the store's slot-collision
/// semantics.
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Create a backend rooted at `root`. The directory is created lazily on
    /// first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The backing directory.
    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", sanitize(key)))
    }
}

fn sanitize(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

impl StorageBackend for FileBackend {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        if let Err(e) = fs::create_dir_all(&self.root) {
            tracing::warn!(dir = %self.root.display(), error = %e, "cannot create save directory");
            return false;
        }
        match fs::write(self.path_for(key), value) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key, error = %e, "save write failed");
                false
            }
        }
    }

    fn remove(&mut self, key: &str) -> bool {
        let path = self.path_for(key);
        if !path.exists() {
            return true;
        }
        match fs::remove_file(&path) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key, error = %e, "save delete failed");
                false
            }
        }
    }

    fn keys(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.root) else {
            return Vec::new();
        };
        entries
            .filter_map(|entry| {
                let path = entry.ok()?.path();
                if path.extension().is_some_and(|ext| ext == "json") {
                    Some(path.file_stem()?.to_string_lossy().into_owned())
                } else {
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn memory_backend_basics() {
        let mut backend = MemoryBackend::new();
        assert_eq!(backend.get("a"), None);

        assert!(backend.set("a", "1"));
        assert_eq!(backend.get("a").as_deref(), Some("1"));

        assert!(backend.set("a", "2"));
        assert_eq!(backend.get("a").as_deref(), Some("2"));

        assert!(backend.remove("a"));
        assert_eq!(backend.get("a"), None);
        // Removing an absent key is still a success.
        assert!(backend.remove("a"));
    }

    #[test]
    fn file_backend_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut backend = FileBackend::new(dir.path());

        assert!(backend.set("story-save-demo-auto", "{}"));
        assert_eq!(backend.get("story-save-demo-auto").as_deref(), Some("{}"));

        let keys = backend.keys();
        assert_eq!(keys, vec!["story-save-demo-auto".to_string()]);

        assert!(backend.remove("story-save-demo-auto"));
        assert_eq!(backend.get("story-save-demo-auto"), None);
    }

    #[test]
    fn file_backend_sanitizes_keys() {
        let dir = TempDir::new().unwrap();
        let mut backend = FileBackend::new(dir.path());

        assert!(backend.set("story-save-demo-my save/1", "x"));
        assert_eq!(backend.get("story-save-demo-my save/1").as_deref(), Some("x"));
        assert!(!dir.path().join("story-save-demo-my save/1.json").exists());
        assert!(dir.path().join("story-save-demo-my_save_1.json").exists());
    }

    #[test]
    fn file_backend_missing_dir_reads_empty() {
        let backend = FileBackend::new("/nonexistent/talespinner-saves");
        assert_eq!(backend.get("anything"), None);
        assert!(backend.keys().is_empty());
    }

    #[test]
    fn file_backend_creates_dir_on_first_write() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("saves");
        let mut backend = FileBackend::new(&nested);

        assert!(backend.set("k", "v"));
        assert!(nested.is_dir());
    }
}
