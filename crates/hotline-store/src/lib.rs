//! Audio artifact store for synthesized speech.
//!
//! A directory of immutable, write-once WAV files keyed by random id. Every
//! turn that synthesizes speech puts one artifact here and hands the
//! telephony provider a retrieval URL; the provider fetches it back over
//! `GET /audio/{name}` for playback.
//!
//! Writes are append-only with fresh uuid-v4 names, so concurrent calls never
//! contend on a file and no locking is needed. Reads target already-fully
//!-written files. Call audio is short-lived, so a periodic sweep deletes
//! artifacts past a configured age rather than letting the directory grow
//! without bound.

pub mod error;

pub use error::StoreError;

use std::path::{Path, PathBuf};
use std::time::Duration;
use uuid::Uuid;

/// Content-addressed-by-random-id store of synthesized audio artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Opens the store at `dir`, creating the directory if needed.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Stores a WAV payload under a fresh random id and returns the artifact
    /// name (`{uuid}.wav`).
    ///
    /// Collision probability for uuid-v4 names is treated as negligible;
    /// there is no collision-detection retry.
    pub async fn put(&self, bytes: &[u8]) -> Result<String, StoreError> {
        let name = format!("{}.wav", Uuid::new_v4());
        tokio::fs::write(self.dir.join(&name), bytes).await?;
        tracing::debug!(artifact = %name, size = bytes.len(), "stored audio artifact");
        Ok(name)
    }

    /// Reads an artifact back, byte-exact.
    pub async fn get(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        validate_name(name)?;
        match tokio::fs::read(self.dir.join(name)).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(name.to_string()))
            }
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    /// Deletes artifacts whose modification time is older than `max_age`.
    /// Returns the number of artifacts removed.
    pub async fn sweep_older_than(&self, max_age: Duration) -> Result<usize, StoreError> {
        let now = std::time::SystemTime::now();
        let mut removed = 0usize;

        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let metadata = match entry.metadata().await {
                Ok(m) if m.is_file() => m,
                _ => continue,
            };
            let modified = match metadata.modified() {
                Ok(t) => t,
                Err(_) => continue,
            };
            let age = match now.duration_since(modified) {
                Ok(age) => age,
                // Clock skew: mtime in the future. Leave the file alone.
                Err(_) => continue,
            };
            if age > max_age {
                match tokio::fs::remove_file(entry.path()).await {
                    Ok(()) => removed += 1,
                    // Lost a race with a concurrent sweep; nothing to do.
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                    Err(e) => return Err(StoreError::Io(e)),
                }
            }
        }

        Ok(removed)
    }
}

/// Rejects names that could escape the store directory.
fn validate_name(name: &str) -> Result<(), StoreError> {
    if name.is_empty()
        || name.contains("..")
        || name.contains('/')
        || name.contains('\\')
        || name.starts_with('.')
    {
        return Err(StoreError::InvalidName(name.to_string()));
    }
    Ok(())
}
