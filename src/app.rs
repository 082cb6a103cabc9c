use crate::domain::coaching::CoachingAnnouncer;
use crate::domain::settings::SettingsProvider;
use crate::domain::speech::{SpeechService, SpeechServiceApi};
use crate::domain::workout::{SessionDependencies, SessionEngine, SessionHandle};
use crate::error::EngineResult;
use crate::infrastructure::config::EngineConfig;
use crate::infrastructure::device::{
    AudioPlayer, HapticSink, LocalSynthesizer, NowPlayingSink, StaticVoiceCatalog,
    TracingAudioPlayer, TracingHaptics, TracingNowPlaying, TracingSynthesizer, VoiceCatalog,
};
use crate::infrastructure::repositories::{
    AudioCacheRepository, ElevenLabsTtsRepository, InMemoryPlanRepository, PlanRepository,
    TtsRepository,
};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Platform services the host hands to the engine
#[derive(Clone)]
pub struct HostCollaborators {
    pub settings: Arc<dyn SettingsProvider>,
    pub plan_repo: Arc<dyn PlanRepository>,
    pub haptics: Arc<dyn HapticSink>,
    pub now_playing: Arc<dyn NowPlayingSink>,
    pub player: Arc<dyn AudioPlayer>,
    pub synthesizer: Arc<dyn LocalSynthesizer>,
    pub voices: Arc<dyn VoiceCatalog>,
}

impl HostCollaborators {
    /// Log-only device integrations, for running without a device
    pub fn headless(settings: Arc<dyn SettingsProvider>) -> Self {
        Self {
            settings,
            plan_repo: Arc::new(InMemoryPlanRepository::new()),
            haptics: Arc::new(TracingHaptics),
            now_playing: Arc::new(TracingNowPlaying),
            player: Arc::new(TracingAudioPlayer),
            synthesizer: Arc::new(TracingSynthesizer),
            voices: Arc::new(StaticVoiceCatalog::default()),
        }
    }
}

/// A fully wired coaching engine
pub struct WorkoutCoach {
    session: SessionHandle,
    announcer: Arc<CoachingAnnouncer>,
    speech: Arc<SpeechService>,
    engine_task: JoinHandle<()>,
}

impl WorkoutCoach {
    /// Wire everything against the configured remote TTS backend.
    ///
    /// Must be called from within a tokio runtime.
    pub fn launch(config: &EngineConfig, host: HostCollaborators) -> EngineResult<Self> {
        let tts_repo: Arc<dyn TtsRepository> = Arc::new(ElevenLabsTtsRepository::new(&config.tts)?);
        Ok(Self::with_tts_repository(config, host, tts_repo))
    }

    /// Wire everything against a caller-provided remote backend
    pub fn with_tts_repository(
        config: &EngineConfig,
        host: HostCollaborators,
        tts_repo: Arc<dyn TtsRepository>,
    ) -> Self {
        tracing::info!(
            cache_dir = %config.audio_cache_dir.display(),
            tts_base_url = %config.tts.base_url,
            "Wiring workout coach"
        );

        let audio_cache = Arc::new(AudioCacheRepository::new(config.audio_cache_dir.clone()));
        let speech = Arc::new(SpeechService::new(
            audio_cache,
            tts_repo,
            host.synthesizer.clone(),
            host.player.clone(),
            config.tts.memory_cache_capacity,
        ));
        let announcer = Arc::new(CoachingAnnouncer::new(
            host.settings.clone(),
            host.voices.clone(),
            speech.clone(),
        ));

        let deps = SessionDependencies {
            announcer: announcer.clone(),
            haptics: host.haptics,
            now_playing: host.now_playing,
            plan_repo: host.plan_repo,
        };
        let (session, engine_task) =
            SessionEngine::spawn(deps, config.completion_dismiss_delay());

        Self {
            session,
            announcer,
            speech,
            engine_task,
        }
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn announcer(&self) -> &Arc<CoachingAnnouncer> {
        &self.announcer
    }

    pub fn audio_cache(&self) -> &AudioCacheRepository {
        self.speech.audio_cache()
    }

    /// The coaching voice changed: cached clips and the resolved built-in
    /// voice no longer apply
    pub async fn on_voice_changed(&self) -> EngineResult<usize> {
        self.announcer.invalidate_voice_cache();
        let removed = self.speech.clear_cache().await?;
        tracing::info!(removed, "Coaching voice changed, audio cache cleared");
        Ok(removed)
    }

    /// Stop the engine and wait for it to wind down
    pub async fn shutdown(self) -> EngineResult<()> {
        self.session.shutdown()?;
        if let Err(e) = self.engine_task.await {
            tracing::warn!(error = %e, "Session engine task ended abnormally");
        }
        Ok(())
    }
}
