use super::corpus;
use super::cue::{Cue, PhraseCategory};
use super::selector::PhraseSelector;
use super::voice::VoiceResolver;
use crate::domain::settings::{CoachSettings, CoachVerbosity, SettingsProvider};
use crate::domain::speech::{SpeechError, SpeechRequest, SpeechServiceApi};
use crate::infrastructure::device::VoiceCatalog;
use parking_lot::Mutex;
use std::sync::Arc;

/// Turns cues into speech without blocking the caller
pub trait Announcer: Send + Sync {
    fn announce(&self, cue: Cue);
}

pub struct CoachingAnnouncer {
    settings: Arc<dyn SettingsProvider>,
    selector: Mutex<PhraseSelector>,
    voices: VoiceResolver,
    speech: Arc<dyn SpeechServiceApi>,
}

impl CoachingAnnouncer {
    pub fn new(
        settings: Arc<dyn SettingsProvider>,
        catalog: Arc<dyn VoiceCatalog>,
        speech: Arc<dyn SpeechServiceApi>,
    ) -> Self {
        Self {
            settings,
            selector: Mutex::new(PhraseSelector::new()),
            voices: VoiceResolver::new(catalog),
            speech,
        }
    }

    pub fn with_selector(mut self, selector: PhraseSelector) -> Self {
        self.selector = Mutex::new(selector);
        self
    }

    /// Final spoken text for `cue`, or `None` when settings silence it
    pub fn compose(&self, cue: &Cue, settings: &CoachSettings) -> Option<String> {
        if !settings.voice_enabled {
            return None;
        }

        if let Cue::Countdown(seconds) = cue {
            if !settings.voice_countdown_enabled {
                return None;
            }
            return corpus::countdown_word(settings.locale, *seconds).map(str::to_string);
        }

        if settings.coach_verbosity == CoachVerbosity::Minimal && !cue.is_essential() {
            return None;
        }

        let category = cue.category()?;
        let mut selector = self.selector.lock();
        let mut text = cue.fill(selector.select(settings.locale, category)?);

        if settings.coach_verbosity == CoachVerbosity::High && cue.takes_encouragement() {
            if let Some(extra) = selector.select(settings.locale, PhraseCategory::Encouragement) {
                text.push(' ');
                text.push_str(extra);
            }
        }
        Some(text)
    }

    /// Forget the resolved built-in voice, e.g. after the device voice list changed
    pub fn invalidate_voice_cache(&self) {
        self.voices.invalidate();
    }

    /// Drop cached audio; cached clips belong to the voice that generated them
    pub async fn clear_audio_cache(&self) -> Result<usize, SpeechError> {
        self.speech.clear_cache().await
    }
}

impl Announcer for CoachingAnnouncer {
    fn announce(&self, cue: Cue) {
        let settings = self.settings.current();
        let Some(text) = self.compose(&cue, &settings) else {
            tracing::trace!(?cue, "Cue silenced by settings");
            return;
        };

        let voice = self
            .voices
            .resolve(settings.locale, settings.preferred_voice_id.as_deref());
        let request = SpeechRequest::new(text, &settings, voice);
        let ticket = self.speech.begin();

        tracing::info!(?cue, text = %request.text, locale = %settings.locale, "Coaching announcement");

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let speech = self.speech.clone();
                handle.spawn(async move {
                    let outcome = speech.speak(request, ticket).await;
                    tracing::debug!(?outcome, ticket, "Announcement delivered");
                });
            }
            Err(_) => {
                tracing::debug!("No async runtime, speaking on device");
                self.speech.speak_locally(&request);
            }
        }
    }
}
