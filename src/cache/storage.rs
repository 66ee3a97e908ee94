//! Storage Module
//!
//! The durable key-value store the cache writes through, modelled on the
//! browser's page storage: string keys, string values, enumerable keys.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::StorageError;

// == Key-Value Store Trait ==
/// String-to-string store with key enumeration.
///
/// The cache only ever touches keys under its own prefix, but
/// implementations hold keys for any owner.
pub trait KeyValueStore {
    /// Reads the text stored under `key`.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes `value` under `key`, replacing any previous text.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Deletes `key`. Deleting a missing key is not an error.
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;

    /// Lists every key currently in the store.
    fn keys(&self) -> Result<Vec<String>, StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        (**self).keys()
    }
}

// == Memory Storage ==
/// In-memory store with an optional byte quota.
///
/// Usage is counted as key bytes plus value bytes, the way browsers meter
/// page storage. Data is lost when the store is dropped.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryStorage {
    /// Creates an unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects writes beyond `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            items: HashMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Bytes currently in use.
    pub fn used_bytes(&self) -> usize {
        self.items.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    /// Number of keys held, across all owners.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drops every key, as if another owner wiped the store.
    pub fn clear_all(&mut self) {
        self.items.clear();
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota_bytes {
            let replaced = self.items.get(key).map_or(0, |old| key.len() + old.len());
            let needed = self.used_bytes() - replaced + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded { needed, quota });
            }
        }

        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.items.keys().cloned().collect())
    }
}

// == File Storage ==
/// Store persisted as a single JSON object on disk.
///
/// The whole map is loaded on open and rewritten on every mutation through a
/// temporary file and a rename, so a crash mid-write leaves the previous
/// contents intact.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl FileStorage {
    /// Opens the store at `path`, starting empty if the file does not exist.
    ///
    /// A file that does not parse is moved aside to `<path>.corrupt` and the
    /// store starts empty. Only I/O failures are returned.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();

        let items = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                match serde_json::from_str(&content) {
                    Ok(items) => items,
                    Err(e) => {
                        Self::set_aside(&path, &e);
                        BTreeMap::new()
                    }
                }
            }
        } else {
            BTreeMap::new()
        };

        debug!(path = %path.display(), keys = items.len(), "Opened file storage");
        Ok(Self { path, items })
    }

    fn set_aside(path: &Path, error: &serde_json::Error) {
        let aside = path.with_extension("corrupt");
        warn!(
            path = %path.display(),
            aside = %aside.display(),
            error = %error,
            "Backing file is unreadable, starting empty"
        );
        if let Err(e) = fs::rename(path, &aside) {
            warn!(path = %path.display(), error = %e, "Failed to move unreadable file aside");
        }
    }

    fn persist(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string(&self.items)
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let previous = self.items.insert(key.to_string(), value.to_string());

        if let Err(e) = self.persist() {
            // Keep memory in step with what is on disk
            match previous {
                Some(old) => self.items.insert(key.to_string(), old),
                None => self.items.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        if let Some(old) = self.items.remove(key) {
            if let Err(e) = self.persist() {
                self.items.insert(key.to_string(), old);
                return Err(e);
            }
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.items.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_storage_roundtrip() {
        let mut store = MemoryStorage::new();
        store.set_item("a", "1").unwrap();

        assert_eq!(store.get_item("a").unwrap(), Some("1".to_string()));
        assert_eq!(store.get_item("b").unwrap(), None);

        store.remove_item("a").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_memory_storage_remove_missing_is_ok() {
        let mut store = MemoryStorage::new();
        assert!(store.remove_item("nope").is_ok());
    }

    #[test]
    fn test_memory_storage_quota() {
        let mut store = MemoryStorage::with_quota(10);
        store.set_item("k", "12345").unwrap();

        let err = store.set_item("k2", "1234567").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { quota: 10, .. }));
        assert_eq!(store.get_item("k2").unwrap(), None);
    }

    #[test]
    fn test_memory_storage_quota_counts_replacement() {
        let mut store = MemoryStorage::with_quota(10);
        store.set_item("k", "123456789").unwrap();

        // Overwriting frees the old value first
        store.set_item("k", "987654321").unwrap();
        assert_eq!(store.used_bytes(), 10);
    }

    #[test]
    fn test_file_storage_survives_reopen() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("store.json");

        {
            let mut store = FileStorage::open(&path).unwrap();
            store.set_item("signal_cache_PLTY", "{}").unwrap();
            store.set_item("other", "x").unwrap();
            store.remove_item("other").unwrap();
        }

        let store = FileStorage::open(&path).unwrap();
        assert_eq!(store.keys().unwrap(), vec!["signal_cache_PLTY".to_string()]);
        assert_eq!(store.get_item("signal_cache_PLTY").unwrap(), Some("{}".to_string()));
    }

    #[test]
    fn test_file_storage_creates_parent_dirs() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("dir").join("store.json");

        let mut store = FileStorage::open(&path).unwrap();
        store.set_item("k", "v").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_file_storage_sets_corrupt_file_aside() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("store.json");
        fs::write(&path, "not json").unwrap();

        let mut store = FileStorage::open(&path).unwrap();
        assert!(store.keys().unwrap().is_empty());
        assert_eq!(
            fs::read_to_string(tmp.path().join("store.corrupt")).unwrap(),
            "not json"
        );

        store.set_item("k", "v").unwrap();
        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get_item("k").unwrap(), Some("v".to_string()));
    }

    #[test]
    fn test_boxed_store_delegates() {
        let mut store: Box<dyn KeyValueStore> = Box::new(MemoryStorage::new());
        store.set_item("k", "v").unwrap();
        assert_eq!(store.keys().unwrap(), vec!["k".to_string()]);
    }
}
