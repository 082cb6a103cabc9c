use crate::domain::speech::SpeechError;
use crate::infrastructure::config::ConfigError;
use crate::infrastructure::repositories::{AudioCacheError, PlanRepositoryError};

/// Crate-level error type.
///
/// Session operations themselves never fail; these surface from setup,
/// cache maintenance, and talking to a shut-down engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Speech error: {0}")]
    Speech(String),

    #[error("Audio cache error: {0}")]
    Cache(String),

    #[error("Plan store error: {0}")]
    PlanStore(String),

    #[error("Session engine unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ConfigError> for EngineError {
    fn from(err: ConfigError) -> Self {
        EngineError::Config(err.to_string())
    }
}

impl From<SpeechError> for EngineError {
    fn from(err: SpeechError) -> Self {
        match err {
            SpeechError::Cache(msg) => EngineError::Cache(msg),
            SpeechError::Other(e) => EngineError::Internal(e.to_string()),
            other => EngineError::Speech(other.to_string()),
        }
    }
}

impl From<AudioCacheError> for EngineError {
    fn from(err: AudioCacheError) -> Self {
        EngineError::Cache(err.to_string())
    }
}

impl From<PlanRepositoryError> for EngineError {
    fn from(err: PlanRepositoryError) -> Self {
        EngineError::PlanStore(err.to_string())
    }
}

/// Custom result type for the engine
pub type EngineResult<T> = Result<T, EngineError>;
