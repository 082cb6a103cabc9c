use super::tts_repository::{RemoteSpeechRequest, RemoteTtsError, TtsRepository};
use crate::domain::settings::DEFAULT_REMOTE_VOICE_ID;
use crate::infrastructure::config::{ConfigError, TtsConfig};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

pub const API_KEY_HEADER: &str = "xi-api-key";

/// Voice tuning for a clear, slightly expressive coach
const STABILITY: f64 = 0.5;
const SIMILARITY_BOOST: f64 = 0.75;
const STYLE: f64 = 0.3;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SynthesisBody {
    pub text: String,
    pub model_id: String,
    pub voice_settings: VoiceSettings,
    pub output_format: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct VoiceSettings {
    pub stability: f64,
    pub similarity_boost: f64,
    pub style: f64,
    pub use_speaker_boost: bool,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    detail: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

/// ElevenLabs implementation of the TTS repository
pub struct ElevenLabsTtsRepository {
    http_client: reqwest::Client,
    base_url: String,
    model_id: String,
    output_format: String,
}

impl ElevenLabsTtsRepository {
    pub fn new(config: &TtsConfig) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model_id: config.model_id.clone(),
            output_format: config.output_format.clone(),
        })
    }

    fn endpoint(&self, voice_id: &str) -> String {
        let voice_id = if voice_id.is_empty() {
            DEFAULT_REMOTE_VOICE_ID
        } else {
            voice_id
        };
        format!(
            "{}/text-to-speech/{}",
            self.base_url,
            urlencoding::encode(voice_id)
        )
    }

    fn body(&self, text: &str) -> SynthesisBody {
        SynthesisBody {
            text: text.to_string(),
            model_id: self.model_id.clone(),
            voice_settings: VoiceSettings {
                stability: STABILITY,
                similarity_boost: SIMILARITY_BOOST,
                style: STYLE,
                use_speaker_boost: true,
            },
            output_format: self.output_format.clone(),
        }
    }

    /// Best-effort extraction of `{ detail: { message } }`
    fn parse_error_message(body: &[u8]) -> Option<String> {
        serde_json::from_slice::<ErrorResponse>(body)
            .ok()
            .and_then(|r| r.detail)
            .and_then(|d| d.message)
    }
}

#[async_trait]
impl TtsRepository for ElevenLabsTtsRepository {
    async fn synthesize(&self, request: &RemoteSpeechRequest) -> Result<Vec<u8>, RemoteTtsError> {
        let api_key = match request.api_key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => return Err(RemoteTtsError::NoApiKey),
        };

        let start_time = std::time::Instant::now();
        let url = self.endpoint(&request.voice_id);

        tracing::info!(
            model = %self.model_id,
            voice_id = %request.voice_id,
            text_length = request.text.len(),
            "Calling remote TTS API"
        );

        let response = self
            .http_client
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .header("Content-Type", "application/json")
            .header("Accept", "audio/mpeg")
            .json(&self.body(&request.text))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, url = %url, "Remote TTS request failed");
                RemoteTtsError::Network(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| RemoteTtsError::Network(e.to_string()))?;

        match status {
            StatusCode::OK => {
                if body.is_empty() {
                    return Err(RemoteTtsError::EmptyAudio);
                }
                tracing::info!(
                    provider = "elevenlabs",
                    latency_ms = start_time.elapsed().as_millis(),
                    audio_size_bytes = body.len(),
                    "TTS synthesis completed"
                );
                Ok(body.to_vec())
            }
            StatusCode::UNAUTHORIZED => Err(RemoteTtsError::Unauthorized),
            StatusCode::TOO_MANY_REQUESTS => Err(RemoteTtsError::QuotaExceeded),
            other => Err(RemoteTtsError::Api {
                status: other.as_u16(),
                message: Self::parse_error_message(&body),
            }),
        }
    }
}
