pub mod error;
pub mod service;

pub use error::SpeechError;
pub use service::{
    SpeechOutcome, SpeechRequest, SpeechService, SpeechServiceApi, COACH_SPEECH_PITCH,
    COACH_SPEECH_RATE,
};
