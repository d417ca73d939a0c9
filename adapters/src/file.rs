//! JSON-file storage backend.
//!
//! All keys live in one [`StorageDocument`] on disk. The document is loaded
//! once at open time and every mutation rewrites it through a sibling temp
//! file followed by a rename, so a crash mid-write leaves the previous
//! document intact.

use parking_lot::RwLock;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{KeyValueStore, StorageDocument, StorageError, DOCUMENT_VERSION};

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    document: RwLock<StorageDocument>,
}

impl FileStore {
    /// Opens the store at `path`, creating an empty document in memory if the
    /// file does not exist yet. Nothing is written until the first mutation.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let document = match fs::read_to_string(&path) {
            Ok(raw) => {
                let doc: StorageDocument =
                    serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
                        path: path.clone(),
                        source,
                    })?;
                doc.check_version()?;
                log::debug!(
                    "loaded storage document from {} ({} keys)",
                    path.display(),
                    doc.entries.len()
                );
                doc
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no storage document at {}, starting empty", path.display());
                StorageDocument::default()
            }
            Err(err) => return Err(StorageError::io(&path, err)),
        };

        Ok(Self {
            path,
            document: RwLock::new(document),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, doc: &StorageDocument) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }
        let encoded = serde_json::to_vec_pretty(doc)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, encoded).map_err(|e| StorageError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| StorageError::io(&self.path, e))?;
        Ok(())
    }

    fn update(&self, apply: impl FnOnce(&mut StorageDocument)) -> Result<(), StorageError> {
        let mut guard = self.document.write();
        let mut next = guard.clone();
        next.version = DOCUMENT_VERSION;
        apply(&mut next);
        self.persist(&next)?;
        *guard = next;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.document.read().entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|doc| {
            doc.entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if !self.document.read().entries.contains_key(key) {
            return Ok(());
        }
        self.update(|doc| {
            doc.entries.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn open_missing_file_starts_empty() {
        let dir = tempdir().expect("tempdir");
        let store = FileStore::open(dir.path().join("session.json")).expect("open");
        assert!(store.get("token").expect("get").is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        {
            let store = FileStore::open(&path).expect("open");
            store.set("token", "t-1").expect("set");
            store.set("profile", r#"{"name":"Ana"}"#).expect("set");
        }
        let reopened = FileStore::open(&path).expect("reopen");
        assert_eq!(reopened.get("token").expect("get").as_deref(), Some("t-1"));
        assert_eq!(
            reopened.get("profile").expect("get").as_deref(),
            Some(r#"{"name":"Ana"}"#)
        );
    }

    #[test]
    fn remove_is_persisted() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        let store = FileStore::open(&path).expect("open");
        store.set("token", "t-1").expect("set");
        store.remove("token").expect("remove");

        let reopened = FileStore::open(&path).expect("reopen");
        assert!(reopened.get("token").expect("get").is_none());
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("deeper").join("session.json");
        let store = FileStore::open(&path).expect("open");
        store.set("token", "t").expect("set");
        assert!(path.exists());
    }

    #[test]
    fn written_document_carries_version() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        let store = FileStore::open(&path).expect("open");
        store.set("token", "t").expect("set");

        let raw = fs::read_to_string(&path).expect("read");
        let doc: StorageDocument = serde_json::from_str(&raw).expect("parse");
        assert_eq!(doc.version, DOCUMENT_VERSION);
        assert_eq!(doc.entries.get("token").map(String::as_str), Some("t"));
    }

    #[test]
    fn older_document_is_rewritten_at_current_version() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        fs::write(&path, r#"{"version":0,"entries":{"token":"old"}}"#).expect("write");

        let store = FileStore::open(&path).expect("open");
        store.set("profile", "p").expect("set");

        let raw = fs::read_to_string(&path).expect("read");
        let doc: StorageDocument = serde_json::from_str(&raw).expect("parse");
        assert_eq!(doc.version, DOCUMENT_VERSION);
        assert_eq!(doc.entries.get("token").map(String::as_str), Some("old"));
    }

    #[test]
    fn corrupt_document_is_reported() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").expect("write");

        let err = FileStore::open(&path).expect_err("corrupt");
        assert!(matches!(err, StorageError::Corrupt { .. }), "got: {err}");
    }

    #[test]
    fn newer_document_version_is_rejected() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        fs::write(&path, r#"{"version":99,"entries":{}}"#).expect("write");

        let err = FileStore::open(&path).expect_err("newer version");
        assert!(matches!(err, StorageError::UnsupportedVersion { found: 99, .. }));
    }
}
