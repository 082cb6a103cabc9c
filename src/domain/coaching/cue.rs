use serde::{Deserialize, Serialize};

/// A semantic coaching event raised by the session engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    WorkoutStarted { plan: String, exercise: String },
    SetCompleted,
    NextExercise { exercise: String },
    ExerciseJump { exercise: String },
    RestEnded,
    /// 3, 2 or 1 seconds of rest left
    Countdown(u8),
    Paused,
    Resumed,
    WorkoutCompleted,
}

/// Phrase families in the corpus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhraseCategory {
    WorkoutStart,
    SetComplete,
    NextExercise,
    ExerciseJump,
    RestEnd,
    WorkoutComplete,
    Paused,
    Resumed,
    Encouragement,
}

impl Cue {
    /// Corpus category for phrase-based cues; `None` for countdown words
    pub fn category(&self) -> Option<PhraseCategory> {
        match self {
            Cue::WorkoutStarted { .. } => Some(PhraseCategory::WorkoutStart),
            Cue::SetCompleted => Some(PhraseCategory::SetComplete),
            Cue::NextExercise { .. } => Some(PhraseCategory::NextExercise),
            Cue::ExerciseJump { .. } => Some(PhraseCategory::ExerciseJump),
            Cue::RestEnded => Some(PhraseCategory::RestEnd),
            Cue::Paused => Some(PhraseCategory::Paused),
            Cue::Resumed => Some(PhraseCategory::Resumed),
            Cue::WorkoutCompleted => Some(PhraseCategory::WorkoutComplete),
            Cue::Countdown(_) => None,
        }
    }

    /// Cues still spoken at minimal verbosity
    pub fn is_essential(&self) -> bool {
        matches!(
            self,
            Cue::RestEnded | Cue::WorkoutCompleted | Cue::Countdown(_)
        )
    }

    /// Whether high verbosity appends an encouragement line
    pub fn takes_encouragement(&self) -> bool {
        matches!(self, Cue::SetCompleted | Cue::RestEnded)
    }

    /// Values substituted into `{plan}` and `{exercise}` placeholders
    pub fn fill(&self, template: &str) -> String {
        match self {
            Cue::WorkoutStarted { plan, exercise } => template
                .replace("{plan}", plan)
                .replace("{exercise}", exercise),
            Cue::NextExercise { exercise } | Cue::ExerciseJump { exercise } => {
                template.replace("{exercise}", exercise)
            }
            _ => template.to_string(),
        }
    }
}
