//! Key-value persistence handle for document blobs.
//!
//! An explicit [`DocumentStore`] is passed to each
//! [`DocumentState`](crate::DocumentState) at construction; there is no
//! global default storage. Blobs live in memory, with an optional data
//! directory that mirrors every write to disk.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ArtResult;

/// Extension used for blob files on disk.
const BLOB_EXTENSION: &str = "json";

/// Identifies one document for persistence purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Create a new unique document ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// The store key this document's blob lives under.
    #[must_use]
    pub fn storage_key(&self) -> String {
        format!("document-{}", self.0)
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Blob store shared between open documents.
///
/// Reads are served from memory. Writes update memory and, when a data
/// directory is configured, mirror to disk best-effort: a write that
/// fails to reach disk logs a warning and moves on, so the mutation that
/// triggered it is never interrupted.
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    blobs: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    data_dir: Option<PathBuf>,
}

impl DocumentStore {
    /// In-memory store with no disk mirror.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Store mirrored to `data_dir`.
    ///
    /// The directory is created if needed and any blobs already present
    /// are loaded eagerly.
    ///
    /// # Errors
    ///
    /// Returns [`ArtError::Io`](crate::ArtError::Io) if the directory
    /// cannot be created or listed.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> ArtResult<Self> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;

        let mut blobs = HashMap::new();
        for entry in std::fs::read_dir(&data_dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == BLOB_EXTENSION) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    match std::fs::read(&path) {
                        Ok(bytes) => {
                            blobs.insert(stem.to_owned(), bytes);
                        }
                        Err(e) => {
                            tracing::warn!("skipping unreadable blob {}: {e}", path.display());
                        }
                    }
                }
            }
        }

        Ok(Self {
            blobs: Arc::new(RwLock::new(blobs)),
            data_dir: Some(data_dir),
        })
    }

    /// Read a blob by key.
    #[must_use]
    pub fn read(&self, key: &str) -> Option<Vec<u8>> {
        let blobs = self
            .blobs
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        blobs.get(key).cloned()
    }

    /// Write a blob under a key, mirroring to disk best-effort.
    pub fn write(&self, key: &str, bytes: Vec<u8>) {
        {
            let mut blobs = self
                .blobs
                .write()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            blobs.insert(key.to_owned(), bytes.clone());
        }
        let Some(path) = self.blob_path(key) else {
            return;
        };
        if let Err(e) = std::fs::write(&path, bytes) {
            tracing::warn!("failed to persist blob {key} to {}: {e}", path.display());
        }
    }

    /// Remove a blob and its on-disk mirror, if any.
    pub fn delete(&self, key: &str) {
        {
            let mut blobs = self
                .blobs
                .write()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            blobs.remove(key);
        }
        let Some(path) = self.blob_path(key) else {
            return;
        };
        if path.exists() {
            if let Err(e) = std::fs::remove_file(&path) {
                tracing::warn!("failed to delete blob file {}: {e}", path.display());
            }
        }
    }

    /// Whether a blob exists under this key.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        let blobs = self
            .blobs
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        blobs.contains_key(key)
    }

    /// All keys currently stored.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let blobs = self
            .blobs
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        blobs.keys().cloned().collect()
    }

    fn blob_path(&self, key: &str) -> Option<PathBuf> {
        self.data_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.{BLOB_EXTENSION}", sanitize_filename(key))))
    }
}

/// Sanitize a store key for use as a filename.
///
/// Replaces any character that is not alphanumeric, `-`, or `_` with `_`.
fn sanitize_filename(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_read_write() {
        let store = DocumentStore::in_memory();
        assert!(store.read("missing").is_none());

        store.write("doc", b"payload".to_vec());
        assert_eq!(store.read("doc").as_deref(), Some(b"payload".as_ref()));
        assert!(store.contains("doc"));

        store.delete("doc");
        assert!(!store.contains("doc"));
    }

    #[test]
    fn test_writes_survive_reopen_with_data_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = DocumentStore::with_data_dir(dir.path()).expect("store");
        store.write("doc", b"payload".to_vec());

        let reopened = DocumentStore::with_data_dir(dir.path()).expect("store");
        assert_eq!(reopened.read("doc").as_deref(), Some(b"payload".as_ref()));
    }

    #[test]
    fn test_delete_removes_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = DocumentStore::with_data_dir(dir.path()).expect("store");
        store.write("doc", b"payload".to_vec());
        assert!(dir.path().join("doc.json").exists());

        store.delete("doc");
        assert!(!dir.path().join("doc.json").exists());
    }

    #[test]
    fn test_document_ids_are_unique() {
        let a = DocumentId::new();
        let b = DocumentId::new();
        assert_ne!(a, b);
        assert_ne!(a.storage_key(), b.storage_key());
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("simple"), "simple");
        assert_eq!(sanitize_filename("document-ab12"), "document-ab12");
        assert_eq!(sanitize_filename("has/slash"), "has_slash");
        assert_eq!(sanitize_filename("a.b.c"), "a_b_c");
    }

    #[test]
    fn test_keys_lists_stored_blobs() {
        let store = DocumentStore::in_memory();
        store.write("a", vec![1]);
        store.write("b", vec![2]);
        let mut keys = store.keys();
        keys.sort();
        assert_eq!(keys, vec!["a".to_owned(), "b".to_owned()]);
    }
}
