use super::corpus;
use super::cue::PhraseCategory;
use crate::domain::settings::Locale;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, VecDeque};

/// Recently used phrases remembered per category
pub const HISTORY_LIMIT: usize = 3;

/// Picks phrases at random while avoiding the last few used in a category.
///
/// History lives as long as the selector and is never persisted.
pub struct PhraseSelector<R: Rng = StdRng> {
    rng: R,
    history: HashMap<PhraseCategory, VecDeque<&'static str>>,
}

impl PhraseSelector<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for PhraseSelector<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> PhraseSelector<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            history: HashMap::new(),
        }
    }

    /// Choose a template for `category`, falling back to the full corpus
    /// when every entry was used recently
    pub fn select(&mut self, locale: Locale, category: PhraseCategory) -> Option<&'static str> {
        let corpus = corpus::phrases(locale, category);
        let history = self.history.entry(category).or_default();

        let fresh: Vec<&'static str> = corpus
            .iter()
            .copied()
            .filter(|phrase| !history.contains(phrase))
            .collect();

        let choice = if fresh.is_empty() {
            corpus.choose(&mut self.rng).copied()?
        } else {
            fresh.choose(&mut self.rng).copied()?
        };

        history.push_back(choice);
        while history.len() > HISTORY_LIMIT {
            history.pop_front();
        }
        Some(choice)
    }

    pub fn recent(&self, category: PhraseCategory) -> Vec<&'static str> {
        self.history
            .get(&category)
            .map(|h| h.iter().copied().collect())
            .unwrap_or_default()
    }
}
