use std::sync::Arc;

use crate::infrastructure::repositories::{AudioCacheError, RemoteTtsError};

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("remote synthesis disabled")]
    RemoteDisabled,
    #[error("remote synthesis failed: {0}")]
    Remote(Arc<RemoteTtsError>),
    #[error("playback failed: {0}")]
    Playback(String),
    #[error("audio cache error: {0}")]
    Cache(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<RemoteTtsError> for SpeechError {
    fn from(err: RemoteTtsError) -> Self {
        SpeechError::Remote(Arc::new(err))
    }
}

impl From<Arc<RemoteTtsError>> for SpeechError {
    fn from(err: Arc<RemoteTtsError>) -> Self {
        SpeechError::Remote(err)
    }
}

impl From<AudioCacheError> for SpeechError {
    fn from(err: AudioCacheError) -> Self {
        SpeechError::Cache(err.to_string())
    }
}
