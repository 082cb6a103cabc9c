use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Default remote coaching voice ("Rachel": clear, natural female voice)
pub const DEFAULT_REMOTE_VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";

/// ISO 639-1 language codes the coach can speak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "de")]
    German,
}

impl Locale {
    /// Get the ISO 639-1 code as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::German => "de",
        }
    }

    /// Parse a language code, accepting region suffixes ("de-AT")
    pub fn from_code(code: &str) -> Option<Self> {
        let primary = code.split(['-', '_']).next().unwrap_or_default();
        match primary.to_lowercase().as_str() {
            "en" => Some(Locale::English),
            "de" => Some(Locale::German),
            _ => None,
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How chatty the coach is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoachVerbosity {
    /// Essential cues only
    Minimal,
    /// Balanced feedback
    #[default]
    Normal,
    /// Full coaching
    High,
}

/// User-facing coaching settings, read at the moment of each announcement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachSettings {
    pub locale: Locale,
    pub voice_enabled: bool,
    pub voice_countdown_enabled: bool,
    pub coach_verbosity: CoachVerbosity,
    pub preferred_voice_id: Option<String>,
    pub use_remote_tts: bool,
    #[serde(skip_serializing)]
    pub remote_api_key: Option<String>,
    pub remote_voice_id: String,
}

impl Default for CoachSettings {
    fn default() -> Self {
        Self {
            locale: Locale::English,
            voice_enabled: true,
            voice_countdown_enabled: true,
            coach_verbosity: CoachVerbosity::Normal,
            preferred_voice_id: None,
            use_remote_tts: true,
            remote_api_key: None,
            remote_voice_id: DEFAULT_REMOTE_VOICE_ID.to_string(),
        }
    }
}

/// Source of the current coaching settings.
///
/// Polled on every announcement; implementations must be cheap and must not
/// block on IO.
pub trait SettingsProvider: Send + Sync {
    fn current(&self) -> CoachSettings;
}

/// Settings held in memory, updated by the host's settings screen
#[derive(Debug, Default)]
pub struct InMemorySettingsProvider {
    settings: RwLock<CoachSettings>,
}

impl InMemorySettingsProvider {
    pub fn new(settings: CoachSettings) -> Self {
        Self {
            settings: RwLock::new(settings),
        }
    }

    /// Apply an in-place change to the stored settings
    pub fn update(&self, change: impl FnOnce(&mut CoachSettings)) {
        let mut settings = self.settings.write();
        change(&mut settings);
    }
}

impl SettingsProvider for InMemorySettingsProvider {
    fn current(&self) -> CoachSettings {
        self.settings.read().clone()
    }
}
