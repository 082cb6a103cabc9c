//! Coaching voice: cue vocabulary, phrase corpus, anti-repetition selection,
//! voice resolution, and the announcer that ties them to speech output.

pub mod announcer;
pub mod corpus;
pub mod cue;
pub mod selector;
pub mod voice;

pub use announcer::{Announcer, CoachingAnnouncer};
pub use cue::{Cue, PhraseCategory};
pub use selector::{PhraseSelector, HISTORY_LIMIT};
pub use voice::VoiceResolver;
