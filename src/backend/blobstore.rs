//! Blob store contract: file uploads resolving to public URLs.

use super::error::BlobError;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

/// Write access to the remote file host.
///
/// Uploads are addressed by a caller-chosen path, not a content hash:
/// uploading to an existing path overwrites it, which is how image
/// replacement works without accumulating orphans.
pub trait BlobStore {
    /// Stores `bytes` at `path`, returning the publicly resolvable URL.
    fn upload(&self, path: &str, bytes: &[u8]) -> Result<String, BlobError>;
}

/// In-memory [`BlobStore`] used by tests and demos.
pub struct MemoryBlobStore {
    base_url: String,
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    /// Creates a store whose URLs hang off the given base.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            objects: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the stored bytes at `path`, when present.
    pub fn object(&self, path: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(path).cloned()
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    /// Returns true when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BlobStore for MemoryBlobStore {
    fn upload(&self, path: &str, bytes: &[u8]) -> Result<String, BlobError> {
        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() {
            return Err(BlobError::InvalidPath {
                path: path.to_string(),
            });
        }
        self.objects
            .lock()
            .unwrap()
            .insert(trimmed.to_string(), bytes.to_vec());
        debug!(path = trimmed, size = bytes.len(), "stored blob");
        Ok(format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            trimmed
        ))
    }
}
