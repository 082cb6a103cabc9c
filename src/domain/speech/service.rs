use super::error::SpeechError;
use crate::domain::settings::{CoachSettings, Locale};
use crate::infrastructure::device::{AudioPlayer, LocalSynthesizer, Utterance};
use crate::infrastructure::repositories::{
    AudioCacheRepository, RemoteSpeechRequest, RemoteTtsError, TtsRepository,
};
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// On-device delivery tuned for an energetic coach
pub const COACH_SPEECH_RATE: f32 = 0.52;
pub const COACH_SPEECH_PITCH: f32 = 1.1;

/// One utterance plus everything needed to route it to a backend
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechRequest {
    pub text: String,
    pub locale: Locale,
    /// Resolved built-in voice for the on-device fallback
    pub local_voice_id: Option<String>,
    pub use_remote: bool,
    pub api_key: Option<String>,
    pub remote_voice_id: String,
}

impl SpeechRequest {
    pub fn new(text: String, settings: &CoachSettings, local_voice_id: Option<String>) -> Self {
        Self {
            text,
            locale: settings.locale,
            local_voice_id,
            use_remote: settings.use_remote_tts,
            api_key: settings.remote_api_key.clone(),
            remote_voice_id: settings.remote_voice_id.clone(),
        }
    }

    fn remote_request(&self) -> RemoteSpeechRequest {
        RemoteSpeechRequest {
            text: self.text.clone(),
            api_key: self.api_key.clone(),
            voice_id: self.remote_voice_id.clone(),
        }
    }

    fn utterance(&self) -> Utterance {
        Utterance {
            text: self.text.clone(),
            language: match self.locale {
                Locale::English => "en-US".to_string(),
                Locale::German => "de-DE".to_string(),
            },
            voice_id: self.local_voice_id.clone(),
            rate: COACH_SPEECH_RATE,
            pitch: COACH_SPEECH_PITCH,
            volume: 1.0,
        }
    }
}

/// How an utterance ended up being delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechOutcome {
    PlayedCached,
    PlayedRemote,
    SpokeLocally,
    /// A newer announcement started before this one was ready
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AudioSource {
    Cache,
    Remote,
}

#[async_trait]
pub trait SpeechServiceApi: Send + Sync {
    /// Stop whatever is playing and claim the next playback slot.
    ///
    /// Returns a ticket; only the holder of the latest ticket may play.
    fn begin(&self) -> u64;

    /// Deliver the utterance: audio cache, then remote backend, then the
    /// on-device synthesizer. Never fails; failures are logged.
    async fn speak(&self, request: SpeechRequest, ticket: u64) -> SpeechOutcome;

    /// Speak straight through the on-device synthesizer
    fn speak_locally(&self, request: &SpeechRequest);

    /// Drop all cached audio, e.g. after the remote voice changed
    async fn clear_cache(&self) -> Result<usize, SpeechError>;
}

pub struct SpeechService {
    audio_cache: Arc<AudioCacheRepository>,
    tts_repo: Arc<dyn TtsRepository>,
    synthesizer: Arc<dyn LocalSynthesizer>,
    player: Arc<dyn AudioPlayer>,
    // Coalesces concurrent generations of the same text into one request
    memory_cache: Cache<String, Arc<Vec<u8>>>,
    latest_ticket: AtomicU64,
    // Bumped on every clear; generations begun under an older epoch are not kept
    cache_epoch: AtomicU64,
}

impl SpeechService {
    pub fn new(
        audio_cache: Arc<AudioCacheRepository>,
        tts_repo: Arc<dyn TtsRepository>,
        synthesizer: Arc<dyn LocalSynthesizer>,
        player: Arc<dyn AudioPlayer>,
        memory_cache_capacity: u64,
    ) -> Self {
        Self {
            audio_cache,
            tts_repo,
            synthesizer,
            player,
            memory_cache: Cache::builder()
                .max_capacity(memory_cache_capacity)
                .build(),
            latest_ticket: AtomicU64::new(0),
            cache_epoch: AtomicU64::new(0),
        }
    }

    pub fn audio_cache(&self) -> &AudioCacheRepository {
        &self.audio_cache
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.latest_ticket.load(Ordering::SeqCst) == ticket
    }

    async fn fetch_audio(
        &self,
        request: &SpeechRequest,
    ) -> Result<(Arc<Vec<u8>>, AudioSource), SpeechError> {
        // Cached clips were rendered by the remote voice, so they go unused too
        if !request.use_remote {
            return Err(SpeechError::RemoteDisabled);
        }

        let epoch = self.cache_epoch.load(Ordering::SeqCst);
        let fetched_remotely = AtomicBool::new(false);

        let audio = self
            .memory_cache
            .try_get_with(request.text.clone(), async {
                if let Some(cached) = self.audio_cache.get(&request.text).await {
                    return Ok(Arc::new(cached));
                }

                let audio = self.tts_repo.synthesize(&request.remote_request()).await?;
                fetched_remotely.store(true, Ordering::SeqCst);

                if self.cache_epoch.load(Ordering::SeqCst) != epoch {
                    tracing::debug!("Cache cleared during generation, not storing audio");
                } else if let Err(e) = self.audio_cache.store(&request.text, &audio).await {
                    tracing::warn!(error = %e, "Failed to cache generated audio");
                }
                Ok::<_, RemoteTtsError>(Arc::new(audio))
            })
            .await?;

        if self.cache_epoch.load(Ordering::SeqCst) != epoch {
            self.memory_cache.invalidate(&request.text).await;
        }

        let source = if fetched_remotely.load(Ordering::SeqCst) {
            AudioSource::Remote
        } else {
            AudioSource::Cache
        };
        Ok((audio, source))
    }

    fn speak_locally_if_current(&self, request: &SpeechRequest, ticket: u64) -> SpeechOutcome {
        if !self.is_current(ticket) {
            return SpeechOutcome::Superseded;
        }
        self.speak_locally(request);
        SpeechOutcome::SpokeLocally
    }
}

#[async_trait]
impl SpeechServiceApi for SpeechService {
    fn begin(&self) -> u64 {
        self.player.stop();
        self.synthesizer.stop();
        self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn speak(&self, request: SpeechRequest, ticket: u64) -> SpeechOutcome {
        match self.fetch_audio(&request).await {
            Ok((audio, source)) => {
                if !self.is_current(ticket) {
                    tracing::debug!(ticket, "Speech superseded before playback");
                    return SpeechOutcome::Superseded;
                }
                match self.player.play(&audio) {
                    Ok(()) => match source {
                        AudioSource::Cache => SpeechOutcome::PlayedCached,
                        AudioSource::Remote => SpeechOutcome::PlayedRemote,
                    },
                    Err(e) => {
                        let error = SpeechError::Playback(e.to_string());
                        tracing::warn!(error = %error, "Falling back to on-device speech");
                        self.speak_locally(&request);
                        SpeechOutcome::SpokeLocally
                    }
                }
            }
            Err(e) => {
                match &e {
                    SpeechError::RemoteDisabled => {}
                    SpeechError::Remote(inner) if matches!(**inner, RemoteTtsError::NoApiKey) => {
                        tracing::debug!("No remote TTS key, using on-device speech");
                    }
                    _ => {
                        tracing::warn!(error = %e, "Remote speech failed, falling back to on-device speech");
                    }
                }
                self.speak_locally_if_current(&request, ticket)
            }
        }
    }

    fn speak_locally(&self, request: &SpeechRequest) {
        self.synthesizer.speak(&request.utterance());
    }

    async fn clear_cache(&self) -> Result<usize, SpeechError> {
        self.cache_epoch.fetch_add(1, Ordering::SeqCst);
        self.memory_cache.invalidate_all();
        Ok(self.audio_cache.clear().await?)
    }
}
