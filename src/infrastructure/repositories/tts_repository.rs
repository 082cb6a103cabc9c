use async_trait::async_trait;

/// What the remote backend needs to synthesize one coaching line
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteSpeechRequest {
    pub text: String,
    pub api_key: Option<String>,
    /// Provider voice id; empty means the provider default
    pub voice_id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RemoteTtsError {
    #[error("no remote TTS API key configured")]
    NoApiKey,
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid API key")]
    Unauthorized,
    #[error("monthly character quota exceeded")]
    QuotaExceeded,
    #[error("API error ({status}): {}", .message.as_deref().unwrap_or("Unknown"))]
    Api { status: u16, message: Option<String> },
    #[error("empty audio response")]
    EmptyAudio,
}

/// Repository for remote TTS synthesis.
/// Abstracts the premium provider the coach talks to.
///
/// Implementations are responsible for:
/// - Credential checks before any network traffic
/// - Provider-specific voice and model selection
/// - Mapping provider failures onto [`RemoteTtsError`]
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize one utterance.
    ///
    /// Returns encoded audio ready for playback (MP3 format)
    ///
    /// # Errors
    /// Returns error if no credential is set, the request fails, or the
    /// provider rejects it
    async fn synthesize(&self, request: &RemoteSpeechRequest) -> Result<Vec<u8>, RemoteTtsError>;
}
