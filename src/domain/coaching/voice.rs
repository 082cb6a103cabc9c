use crate::domain::settings::Locale;
use crate::infrastructure::device::{LocalVoice, VoiceCatalog};
use parking_lot::Mutex;
use std::sync::Arc;

/// Preferred built-in voices, best first
fn preferred_names(locale: Locale) -> &'static [&'static str] {
    match locale {
        Locale::English => &["Ava", "Evan", "Zoe", "Nathan", "Samantha"],
        Locale::German => &["Anna", "Petra", "Markus", "Yannick"],
    }
}

/// Resolves which built-in voice the on-device fallback speaks with
pub struct VoiceResolver {
    catalog: Arc<dyn VoiceCatalog>,
    resolved: Mutex<Option<(Locale, Option<String>)>>,
}

impl VoiceResolver {
    pub fn new(catalog: Arc<dyn VoiceCatalog>) -> Self {
        Self {
            catalog,
            resolved: Mutex::new(None),
        }
    }

    /// The user's preferred voice when set, otherwise the best catalog
    /// voice for `locale`. Catalog picks are cached until the locale changes.
    pub fn resolve(&self, locale: Locale, preferred_voice_id: Option<&str>) -> Option<String> {
        if let Some(id) = preferred_voice_id.filter(|id| !id.is_empty()) {
            return Some(id.to_string());
        }

        let mut resolved = self.resolved.lock();
        if let Some((cached_locale, voice)) = resolved.as_ref() {
            if *cached_locale == locale {
                return voice.clone();
            }
        }

        let voice = best_voice(&self.catalog.voices(), locale).map(|v| v.id.clone());
        tracing::debug!(locale = %locale, voice_id = ?voice, "Resolved coaching voice");
        *resolved = Some((locale, voice.clone()));
        voice
    }

    pub fn invalidate(&self) {
        *self.resolved.lock() = None;
    }
}

fn best_voice(voices: &[LocalVoice], locale: Locale) -> Option<&LocalVoice> {
    let names = preferred_names(locale);
    let rank = |voice: &LocalVoice| {
        names
            .iter()
            .position(|name| voice.name.contains(name))
            .unwrap_or(names.len())
    };

    voices
        .iter()
        .filter(|voice| voice.language.to_lowercase().starts_with(locale.as_str()))
        .min_by(|a, b| {
            b.quality
                .cmp(&a.quality)
                .then_with(|| rank(a).cmp(&rank(b)))
                .then_with(|| a.name.cmp(&b.name))
        })
}
