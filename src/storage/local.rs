// SPDX-License-Identifier: MPL-2.0
//! File-backed key-value store with a byte quota.
//!
//! The whole map is kept in memory and rewritten as one CBOR document on
//! every change. Writes that would exceed the quota are rejected before
//! anything is touched.

use super::Storage;
use crate::error::StorageError;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct LocalStorage {
    entries: BTreeMap<String, String>,
    /// `None` keeps the store in memory only.
    path: Option<PathBuf>,
    quota: usize,
}

impl LocalStorage {
    /// Creates an empty store that never touches the filesystem.
    #[must_use]
    pub fn in_memory(quota: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            path: None,
            quota,
        }
    }

    /// Opens the store at `path`.
    ///
    /// A missing file yields an empty store. An unreadable or corrupt file
    /// also yields an empty store, together with the read error so the
    /// caller can log it; the file is overwritten on the next write.
    pub fn open(path: PathBuf, quota: usize) -> (Self, Option<StorageError>) {
        let (entries, warning) = match read_entries(&path) {
            Ok(entries) => (entries, None),
            Err(err) => (BTreeMap::new(), Some(err)),
        };
        (
            Self {
                entries,
                path: Some(path),
                quota,
            },
            warning,
        )
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[must_use]
    pub fn quota(&self) -> usize {
        self.quota
    }

    /// Bytes used by keys and values.
    #[must_use]
    pub fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    fn flush(&self) -> Result<(), StorageError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::Write(e.to_string()))?;
        }
        let file = File::create(path).map_err(|e| StorageError::Write(e.to_string()))?;
        ciborium::into_writer(&self.entries, BufWriter::new(file))
            .map_err(|e| StorageError::Write(e.to_string()))
    }
}

fn read_entries(path: &Path) -> Result<BTreeMap<String, String>, StorageError> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let file = File::open(path).map_err(|e| StorageError::Read(e.to_string()))?;
    ciborium::from_reader(BufReader::new(file)).map_err(|e| StorageError::Read(e.to_string()))
}

impl Storage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        let replaced = self.entries.get(key).map_or(0, |old| key.len() + old.len());
        let needed = self.used_bytes() - replaced + key.len() + value.len();
        if needed > self.quota {
            return Err(StorageError::QuotaExceeded {
                needed,
                quota: self.quota,
            });
        }

        let previous = self.entries.insert(key.to_string(), value);
        if let Err(err) = self.flush() {
            // Keep memory and disk in agreement.
            match previous {
                Some(old) => self.entries.insert(key.to_string(), old),
                None => self.entries.remove(key),
            };
            return Err(err);
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn in_memory_get_set_remove() {
        let mut storage = LocalStorage::in_memory(1024);
        assert_eq!(storage.get("k"), None);

        storage.set("k", "v".to_string()).expect("set");
        assert_eq!(storage.get("k").as_deref(), Some("v"));

        storage.remove("k").expect("remove");
        assert_eq!(storage.get("k"), None);
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("data").join("local_storage.cbor");

        let (mut storage, warning) = LocalStorage::open(path.clone(), 1024);
        assert!(warning.is_none());
        storage.set("answer", "42".to_string()).expect("set");

        let (reopened, warning) = LocalStorage::open(path, 1024);
        assert!(warning.is_none());
        assert_eq!(reopened.get("answer").as_deref(), Some("42"));
    }

    #[test]
    fn corrupt_file_opens_empty_with_warning() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("local_storage.cbor");
        fs::write(&path, [0xff, 0x00, 0x13]).expect("write garbage");

        let (storage, warning) = LocalStorage::open(path, 1024);
        assert!(matches!(warning, Some(StorageError::Read(_))));
        assert_eq!(storage.used_bytes(), 0);
    }

    #[test]
    fn quota_rejects_oversized_write_without_change() {
        let mut storage = LocalStorage::in_memory(10);
        storage.set("a", "1234".to_string()).expect("fits");

        let err = storage.set("b", "123456789".to_string()).unwrap_err();
        assert_eq!(
            err,
            StorageError::QuotaExceeded {
                needed: 15,
                quota: 10
            }
        );
        assert_eq!(storage.get("b"), None);
        assert_eq!(storage.get("a").as_deref(), Some("1234"));
    }

    #[test]
    fn replacing_a_value_only_counts_the_new_size() {
        let mut storage = LocalStorage::in_memory(10);
        storage.set("k", "123456789".to_string()).expect("fits exactly");
        storage.set("k", "987654321".to_string()).expect("replacement fits");
        assert_eq!(storage.used_bytes(), 10);
    }

    #[test]
    fn failed_flush_rolls_back() {
        let dir = tempdir().expect("temp dir");
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"file, not a dir").expect("write blocker");

        let (mut storage, _) = LocalStorage::open(blocker.join("local_storage.cbor"), 1024);
        let err = storage.set("k", "v".to_string()).unwrap_err();
        assert!(matches!(err, StorageError::Write(_)));
        assert_eq!(storage.get("k"), None);
    }
}
