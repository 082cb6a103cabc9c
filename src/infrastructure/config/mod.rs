use directories::ProjectDirs;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_TTS_BASE_URL: &str = "https://api.elevenlabs.io/v1";
/// Fastest model, lowest latency between cue and speech
pub const DEFAULT_TTS_MODEL_ID: &str = "eleven_flash_v2_5";
pub const DEFAULT_TTS_OUTPUT_FORMAT: &str = "mp3_44100_128";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    pub audio_cache_dir: PathBuf,
    pub completion_dismiss_delay_secs: u64,
    pub log_format: LogFormat,
    pub tts: TtsConfig,
}

/// Remote speech backend settings
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    pub base_url: String,
    pub model_id: String,
    pub output_format: String,
    /// 0 keeps the transport default
    pub request_timeout_secs: u64,
    /// Entries held in the in-memory layer over the disk cache
    pub memory_cache_capacity: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_TTS_BASE_URL.to_string(),
            model_id: DEFAULT_TTS_MODEL_ID.to_string(),
            output_format: DEFAULT_TTS_OUTPUT_FORMAT.to_string(),
            request_timeout_secs: 0,
            memory_cache_capacity: 200,
        }
    }
}

impl TtsConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            audio_cache_dir: default_audio_cache_dir(),
            completion_dismiss_delay_secs: 2,
            log_format: LogFormat::Pretty,
            tts: TtsConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        let tts_defaults = TtsConfig::default();

        let config = EngineConfig {
            audio_cache_dir: env::var("AUDIO_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.audio_cache_dir),
            completion_dismiss_delay_secs: parse_var(
                "COMPLETION_DISMISS_DELAY_SECS",
                defaults.completion_dismiss_delay_secs,
            )?,
            log_format: match env::var("LOG_FORMAT").map(|s| s.to_lowercase()).as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            tts: TtsConfig {
                base_url: env::var("TTS_BASE_URL").unwrap_or(tts_defaults.base_url),
                model_id: env::var("TTS_MODEL_ID").unwrap_or(tts_defaults.model_id),
                output_format: env::var("TTS_OUTPUT_FORMAT")
                    .unwrap_or(tts_defaults.output_format),
                request_timeout_secs: parse_var(
                    "TTS_REQUEST_TIMEOUT_SECS",
                    tts_defaults.request_timeout_secs,
                )?,
                memory_cache_capacity: parse_var(
                    "TTS_MEMORY_CACHE_CAPACITY",
                    tts_defaults.memory_cache_capacity,
                )?,
            },
        };

        Ok(config)
    }

    pub fn completion_dismiss_delay(&self) -> Duration {
        Duration::from_secs(self.completion_dismiss_delay_secs)
    }
}

fn parse_var(key: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        Err(_) => Ok(default),
    }
}

fn default_audio_cache_dir() -> PathBuf {
    ProjectDirs::from("com", "gymbuddy", "workout-coach")
        .map(|dirs| dirs.cache_dir().join("audio_cache"))
        .unwrap_or_else(|| env::temp_dir().join("workout-coach").join("audio_cache"))
}
