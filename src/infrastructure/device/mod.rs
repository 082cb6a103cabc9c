//! Outward device integrations: haptics, the lock-screen transport, audio
//! playback and the on-device speech synthesizer.
//!
//! The host platform implements these traits; the tracing-backed versions
//! here keep the engine usable headless.

pub mod audio;
pub mod haptics;
pub mod now_playing;

pub use audio::{
    AudioPlayer, LocalSynthesizer, LocalVoice, StaticVoiceCatalog, TracingAudioPlayer,
    TracingSynthesizer, Utterance, VoiceCatalog, VoiceQuality,
};
pub use haptics::{HapticSink, TracingHaptics};
pub use now_playing::{NowPlayingInfo, NowPlayingSink, RemoteCommand, TracingNowPlaying};
