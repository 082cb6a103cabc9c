pub mod model;

pub use model::{
    CoachSettings, CoachVerbosity, InMemorySettingsProvider, Locale, SettingsProvider,
    DEFAULT_REMOTE_VOICE_ID,
};
