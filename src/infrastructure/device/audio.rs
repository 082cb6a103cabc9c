use serde::{Deserialize, Serialize};

/// Plays encoded audio (MP3) produced by the remote backend or read from cache
pub trait AudioPlayer: Send + Sync {
    /// Start playing `audio`, replacing anything currently playing
    fn play(&self, audio: &[u8]) -> anyhow::Result<()>;
    fn stop(&self);
}

/// A single utterance for the on-device synthesizer
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    /// BCP 47 language of the voice, e.g. "en-US"
    pub language: String,
    /// Built-in voice identifier; `None` lets the platform pick
    pub voice_id: Option<String>,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

/// The platform's built-in speech synthesizer
pub trait LocalSynthesizer: Send + Sync {
    fn speak(&self, utterance: &Utterance);
    fn stop(&self);
}

/// Built-in voice quality tiers, ordered worst to best
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceQuality {
    Default,
    Enhanced,
    Premium,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalVoice {
    pub id: String,
    pub name: String,
    /// BCP 47 language, e.g. "de-DE"
    pub language: String,
    pub quality: VoiceQuality,
}

/// Lists the built-in voices installed on the device
pub trait VoiceCatalog: Send + Sync {
    fn voices(&self) -> Vec<LocalVoice>;
}

/// Fixed voice list, for hosts that enumerate voices once at startup
#[derive(Debug, Default, Clone)]
pub struct StaticVoiceCatalog {
    voices: Vec<LocalVoice>,
}

impl StaticVoiceCatalog {
    pub fn new(voices: Vec<LocalVoice>) -> Self {
        Self { voices }
    }
}

impl VoiceCatalog for StaticVoiceCatalog {
    fn voices(&self) -> Vec<LocalVoice> {
        self.voices.clone()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAudioPlayer;

impl AudioPlayer for TracingAudioPlayer {
    fn play(&self, audio: &[u8]) -> anyhow::Result<()> {
        tracing::debug!(audio_size = audio.len(), "Playing audio");
        Ok(())
    }

    fn stop(&self) {
        tracing::trace!("Audio playback stopped");
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSynthesizer;

impl LocalSynthesizer for TracingSynthesizer {
    fn speak(&self, utterance: &Utterance) {
        tracing::debug!(
            text = %utterance.text,
            language = %utterance.language,
            voice_id = ?utterance.voice_id,
            rate = utterance.rate,
            pitch = utterance.pitch,
            "Speaking on device"
        );
    }

    fn stop(&self) {
        tracing::trace!("On-device speech stopped");
    }
}
