pub mod audio_cache_repository;
pub mod elevenlabs_tts_repository;
pub mod plan_repository;
pub mod tts_repository;

pub use audio_cache_repository::{AudioCacheError, AudioCacheRepository};
pub use elevenlabs_tts_repository::ElevenLabsTtsRepository;
pub use plan_repository::{InMemoryPlanRepository, PlanRepository, PlanRepositoryError};
pub use tts_repository::{RemoteSpeechRequest, RemoteTtsError, TtsRepository};
