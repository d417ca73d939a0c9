//! On-disk data model shared by the storage backends.
//!
//! The file backend keeps every key in a single JSON document tagged with a
//! format version, so the layout can evolve without orphaning sessions that
//! were written by an older build.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::StorageError;

/// Current version of [`StorageDocument`].
pub const DOCUMENT_VERSION: u32 = 1;

/// Versioned key/value document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageDocument {
    pub version: u32,
    #[serde(default)]
    pub entries: BTreeMap<String, String>,
}

impl Default for StorageDocument {
    fn default() -> Self {
        Self {
            version: DOCUMENT_VERSION,
            entries: BTreeMap::new(),
        }
    }
}

impl StorageDocument {
    /// Rejects documents written by a newer build.
    pub fn check_version(&self) -> Result<(), StorageError> {
        if self.version > DOCUMENT_VERSION {
            return Err(StorageError::UnsupportedVersion {
                found: self.version,
                supported: DOCUMENT_VERSION,
            });
        }
        Ok(())
    }
}
