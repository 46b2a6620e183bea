//! In-memory store that turns fetched bytes into local URLs.

use crate::error::Result;
use crate::video::types::{GeneratedArtifact, VideoMetadata};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

const URL_PREFIX: &str = "blob:veo-studio/";

#[derive(Debug)]
struct Blob {
    data: Arc<Vec<u8>>,
    mime_type: String,
}

/// Holds generated videos until their URLs are revoked.
///
/// Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct ArtifactStore {
    blobs: Arc<Mutex<HashMap<Uuid, Blob>>>,
}

impl ArtifactStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `data` and returns an artifact addressing it.
    pub fn materialize(
        &self,
        data: Vec<u8>,
        mime_type: impl Into<String>,
        metadata: VideoMetadata,
    ) -> GeneratedArtifact {
        let id = Uuid::new_v4();
        let mime_type = mime_type.into();
        let size_bytes = data.len();
        self.lock().insert(
            id,
            Blob {
                data: Arc::new(data),
                mime_type: mime_type.clone(),
            },
        );
        GeneratedArtifact {
            local_url: format!("{URL_PREFIX}{id}"),
            mime_type,
            size_bytes,
            metadata,
        }
    }

    /// Returns the bytes behind `url`, if it is still live.
    pub fn resolve(&self, url: &str) -> Option<Arc<Vec<u8>>> {
        let id = parse_url(url)?;
        self.lock().get(&id).map(|blob| Arc::clone(&blob.data))
    }

    /// Returns the MIME type of a live URL.
    pub fn mime_type(&self, url: &str) -> Option<String> {
        let id = parse_url(url)?;
        self.lock().get(&id).map(|blob| blob.mime_type.clone())
    }

    /// Releases the bytes behind `url`. Returns false if it was not live.
    pub fn revoke(&self, url: &str) -> bool {
        match parse_url(url) {
            Some(id) => self.lock().remove(&id).is_some(),
            None => false,
        }
    }

    /// Writes the bytes behind `url` to `path`.
    pub async fn save(&self, url: &str, path: impl AsRef<Path>) -> Result<()> {
        let data = self.resolve(url).ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no live artifact at {url}"),
            )
        })?;
        tokio::fs::write(path, data.as_slice()).await?;
        Ok(())
    }

    /// Number of live artifacts.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Blob>> {
        // The map stays consistent even if a holder panicked.
        self.blobs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn parse_url(url: &str) -> Option<Uuid> {
    url.strip_prefix(URL_PREFIX)
        .and_then(|id| Uuid::parse_str(id).ok())
}
