use sha2::{Digest, Sha256};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const AUDIO_EXTENSION: &str = "mp3";

#[derive(Debug, thiserror::Error)]
pub enum AudioCacheError {
    #[error("audio cache io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Persistent, content-addressed store for generated speech.
///
/// Files are named by the SHA-256 of the exact announced text, so identical
/// phrases hit the same entry. Entries are only removed by [`clear`].
///
/// [`clear`]: AudioCacheRepository::clear
pub struct AudioCacheRepository {
    cache_dir: PathBuf,
}

impl AudioCacheRepository {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Lowercase hex SHA-256 of the text
    pub fn cache_key(text: &str) -> String {
        hex::encode(Sha256::digest(text.as_bytes()))
    }

    fn file_path(&self, text: &str) -> PathBuf {
        self.cache_dir
            .join(format!("{}.{}", Self::cache_key(text), AUDIO_EXTENSION))
    }

    pub async fn contains(&self, text: &str) -> bool {
        tokio::fs::try_exists(self.file_path(text))
            .await
            .unwrap_or(false)
    }

    /// Cached audio for `text`; read failures are logged and count as a miss
    pub async fn get(&self, text: &str) -> Option<Vec<u8>> {
        let path = self.file_path(text);
        match tokio::fs::read(&path).await {
            Ok(data) => {
                tracing::debug!(
                    text_preview = %text.chars().take(30).collect::<String>(),
                    audio_size = data.len(),
                    "Audio cache hit"
                );
                Some(data)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(error = %e, path = %path.display(), "Failed to read cached audio");
                None
            }
        }
    }

    /// Write audio for `text`.
    ///
    /// Writes go to a unique temp file and are renamed into place, so
    /// concurrent writers of the same text never expose a torn file; the
    /// last rename wins.
    pub async fn store(&self, text: &str, audio: &[u8]) -> Result<(), AudioCacheError> {
        tokio::fs::create_dir_all(&self.cache_dir).await?;

        let path = self.file_path(text);
        let tmp_path = path.with_extension(format!("{}.{}.tmp", AUDIO_EXTENSION, Uuid::new_v4()));
        tokio::fs::write(&tmp_path, audio).await?;
        if let Err(e) = tokio::fs::rename(&tmp_path, &path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }

        tracing::debug!(
            key = %Self::cache_key(text),
            audio_size = audio.len(),
            "Audio cached"
        );
        Ok(())
    }

    /// Remove every cached file; returns how many were removed
    pub async fn clear(&self) -> Result<usize, AudioCacheError> {
        let mut entries = match tokio::fs::read_dir(&self.cache_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let mut removed = 0;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                tokio::fs::remove_file(entry.path()).await?;
                removed += 1;
            }
        }

        tracing::info!(removed, cache_dir = %self.cache_dir.display(), "Audio cache cleared");
        Ok(removed)
    }

    /// Total bytes on disk; 0 when the directory is missing or unreadable
    pub async fn size_bytes(&self) -> u64 {
        self.scan().await.map(|(_, size)| size).unwrap_or(0)
    }

    pub async fn file_count(&self) -> usize {
        self.scan().await.map(|(count, _)| count).unwrap_or(0)
    }

    async fn scan(&self) -> std::io::Result<(usize, u64)> {
        let mut entries = tokio::fs::read_dir(&self.cache_dir).await?;
        let mut count = 0;
        let mut size = 0;
        while let Some(entry) = entries.next_entry().await? {
            let metadata = entry.metadata().await?;
            if metadata.is_file() {
                count += 1;
                size += metadata.len();
            }
        }
        Ok((count, size))
    }
}
