//! Upload store
//!
//! Persists uploaded file bytes under server-generated identifiers. The
//! original filename is never part of the storage key; only a sanitized copy
//! of its extension survives, so user-supplied names can neither collide nor
//! escape the upload directory.

use std::path::{Path, PathBuf};

use tracing::debug;
use uuid::Uuid;

use crate::error::Result;

/// Public URL prefix under which stored files are served read-only
pub const DOWNLOADS_PREFIX: &str = "/downloads";

/// Longest extension carried over from the original filename
const MAX_EXTENSION_LEN: usize = 16;

/// Record of one stored upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Server-generated storage identifier
    pub id: Uuid,
    /// Name on disk: `<id>` plus the sanitized original extension, if any
    pub stored_name: String,
    /// Original filename as supplied by the client, for display only
    pub original_name: String,
    /// Exact byte size of the stored content
    pub size: u64,
    /// Public retrieval URL
    pub url: String,
}

/// Persists uploaded blobs and hands out retrieval URLs
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    /// Create the store, creating the storage directory if needed.
    ///
    /// Failure here is startup-fatal.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Directory holding stored files
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist one upload under a fresh storage identifier.
    ///
    /// Two uploads with identical original names always land in distinct
    /// files: the id is a v4 UUID, unique for the process lifetime with
    /// overwhelming probability.
    pub async fn store(&self, bytes: &[u8], original_name: &str) -> Result<StoredFile> {
        let id = Uuid::new_v4();
        let stored_name = match sanitized_extension(original_name) {
            Some(ext) => format!("{}.{}", id, ext),
            None => id.to_string(),
        };

        let path = self.root.join(&stored_name);
        tokio::fs::write(&path, bytes).await?;
        debug!(stored_name = %stored_name, size = bytes.len(), "Stored upload");

        Ok(StoredFile {
            id,
            url: format!("{}/{}", DOWNLOADS_PREFIX, stored_name),
            stored_name,
            original_name: original_name.to_string(),
            size: bytes.len() as u64,
        })
    }
}

/// Extract the original extension if it is plain ASCII alphanumeric.
///
/// Anything else (path separators, dots, control characters, absurd lengths)
/// is dropped rather than sanitized in place.
fn sanitized_extension(name: &str) -> Option<String> {
    let ext = Path::new(name).extension()?.to_str()?;
    if ext.is_empty() || ext.len() > MAX_EXTENSION_LEN {
        return None;
    }
    if !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_string())
}
