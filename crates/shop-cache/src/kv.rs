//! Key-value store wrapper with automatic serialization.

use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Type-safe cache backed by a single JSON file.
///
/// The file holds one JSON object; each key maps to one stored value. Writes
/// go to a sibling temp file that is then renamed over the store, so a
/// reader never sees a half-written file.
#[derive(Debug, Clone)]
pub struct Cache {
    path: PathBuf,
}

impl Cache {
    /// Open a store at `path`.
    ///
    /// The file is created lazily on the first write. An existing file must
    /// contain a JSON object.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = Cache::open("state.json")?;
    /// ```
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let cache = Self { path: path.into() };
        cache.read_entries()?;
        Ok(cache)
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cart: Option<Cart> = cache.get("cart")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.read_entries()?.remove(key) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// cache.set("cart", &cart)?;
    /// ```
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let value = serde_json::to_value(value)?;
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value);
        self.write_entries(&entries)
    }

    /// Delete a value from the cache.
    ///
    /// Deleting a missing key is not an error.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut entries = self.read_entries()?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }

    fn read_entries(&self) -> Result<Map<String, Value>, CacheError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(CacheError::OpenError {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content)? {
            Value::Object(entries) => Ok(entries),
            _ => Err(CacheError::Corrupt(self.path.clone())),
        }
    }

    fn write_entries(&self, entries: &Map<String, Value>) -> Result<(), CacheError> {
        let write_err = |source| CacheError::WriteError {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let bytes = serde_json::to_vec_pretty(entries)?;
        let tmp = self.temp_path();
        fs::write(&tmp, bytes).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(write_err)?;

        tracing::trace!(path = %self.path.display(), keys = entries.len(), "store written");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "store.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        name: String,
        quantity: u32,
    }

    fn temp_cache() -> (tempfile::TempDir, Cache) {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::open(dir.path().join("state.json")).unwrap();
        (dir, cache)
    }

    #[test]
    fn test_missing_file_is_empty() {
        let (dir, cache) = temp_cache();
        let value: Option<Entry> = cache.get("cart").unwrap();
        assert!(value.is_none());
        assert!(!dir.path().join("state.json").exists());
    }

    #[test]
    fn test_set_and_get() {
        let (_dir, cache) = temp_cache();
        let entry = Entry {
            name: "Apple".into(),
            quantity: 2,
        };
        cache.set("cart", &entry).unwrap();

        let loaded: Option<Entry> = cache.get("cart").unwrap();
        assert_eq!(loaded, Some(entry));
    }

    #[test]
    fn test_values_survive_reopen() {
        let (dir, cache) = temp_cache();
        cache.set("a", &1u32).unwrap();
        cache.set("b", &2u32).unwrap();

        let reopened = Cache::open(dir.path().join("state.json")).unwrap();
        assert_eq!(reopened.get::<u32>("a").unwrap(), Some(1));
        assert_eq!(reopened.get::<u32>("b").unwrap(), Some(2));
    }

    #[test]
    fn test_delete() {
        let (_dir, cache) = temp_cache();
        cache.set("cart", &1u32).unwrap();
        cache.delete("cart").unwrap();
        assert_eq!(cache.get::<u32>("cart").unwrap(), None);

        // Missing keys are fine
        cache.delete("cart").unwrap();
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let (dir, cache) = temp_cache();
        cache.set("cart", &1u32).unwrap();
        assert!(!dir.path().join("state.json.tmp").exists());
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");
        let cache = Cache::open(&path).unwrap();
        cache.set("cart", &1u32).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_corrupt_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(matches!(Cache::open(&path), Err(CacheError::Corrupt(_))));
    }
}
