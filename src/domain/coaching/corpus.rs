use super::cue::PhraseCategory;
use crate::domain::settings::Locale;

const EN_WORKOUT_START: &[&str] = &[
    "Let's go! {plan} starts now. First up: {exercise}.",
    "Time to work. {plan} begins with {exercise}.",
    "Welcome to {plan}. We open with {exercise}. You've got this!",
    "Here we go! First exercise: {exercise}.",
    "{plan} is on. Start strong with {exercise}.",
];

const EN_SET_COMPLETE: &[&str] = &[
    "Set done. Nice work!",
    "Great set! Take a breather.",
    "That's one more in the bag.",
    "Solid set. Rest up.",
    "Well done. Recover and reload.",
    "Strong work. Catch your breath.",
];

const EN_NEXT_EXERCISE: &[&str] = &[
    "Exercise done! Next up: {exercise}.",
    "Moving on to {exercise}.",
    "Great job. Get ready for {exercise}.",
    "On to the next one: {exercise}.",
    "That's a wrap on that one. {exercise} is next.",
];

const EN_EXERCISE_JUMP: &[&str] = &[
    "Switching to {exercise}.",
    "Okay, jumping to {exercise}.",
    "Change of plan. Let's do {exercise}.",
    "Going straight to {exercise}.",
];

const EN_REST_END: &[&str] = &[
    "Rest is over. Let's go!",
    "Time's up. Back to work!",
    "Break's over. Next set!",
    "Let's get back at it!",
    "Ready? Let's move!",
    "Up you get. Next set starts now.",
];

const EN_WORKOUT_COMPLETE: &[&str] = &[
    "Workout complete! Outstanding effort today.",
    "That's it, you're done! Great session.",
    "Finished! You crushed it today.",
    "All done. Be proud of that one.",
    "Workout complete. See you next time!",
];

const EN_PAUSED: &[&str] = &["Workout paused.", "Taking a pause.", "Paused."];

const EN_RESUMED: &[&str] = &["Back at it!", "Resuming. Let's go!", "And we're back."];

const EN_ENCOURAGEMENT: &[&str] = &[
    "You're getting stronger every set.",
    "Keep that form tight.",
    "Stay focused. You've got this.",
    "Every rep counts.",
    "Push through. You're doing great.",
    "Breathe and stay strong.",
];

const DE_WORKOUT_START: &[&str] = &[
    "Los geht's! {plan} startet jetzt. Zuerst: {exercise}.",
    "Zeit zu arbeiten. {plan} beginnt mit {exercise}.",
    "Willkommen zu {plan}. Wir starten mit {exercise}. Du schaffst das!",
    "Auf geht's! Erste Übung: {exercise}.",
    "{plan} läuft. Starte stark mit {exercise}.",
];

const DE_SET_COMPLETE: &[&str] = &[
    "Satz geschafft. Gute Arbeit!",
    "Starker Satz! Kurz durchatmen.",
    "Wieder einer erledigt.",
    "Sauberer Satz. Erhol dich.",
    "Gut gemacht. Kurz regenerieren.",
    "Stark! Hol Luft.",
];

const DE_NEXT_EXERCISE: &[&str] = &[
    "Übung geschafft! Als Nächstes: {exercise}.",
    "Weiter mit {exercise}.",
    "Super. Mach dich bereit für {exercise}.",
    "Auf zur nächsten: {exercise}.",
    "Die hast du. Jetzt kommt {exercise}.",
];

const DE_EXERCISE_JUMP: &[&str] = &[
    "Wechsel zu {exercise}.",
    "Okay, wir springen zu {exercise}.",
    "Planänderung. Jetzt {exercise}.",
    "Direkt weiter mit {exercise}.",
];

const DE_REST_END: &[&str] = &[
    "Pause vorbei. Los geht's!",
    "Zeit ist um. Weiter geht's!",
    "Genug ausgeruht. Nächster Satz!",
    "Zurück an die Arbeit!",
    "Bereit? Auf geht's!",
    "Hoch mit dir. Der nächste Satz beginnt.",
];

const DE_WORKOUT_COMPLETE: &[&str] = &[
    "Training beendet! Starke Leistung heute.",
    "Das war's, du bist fertig! Tolles Training.",
    "Geschafft! Du hast alles gegeben.",
    "Fertig. Darauf kannst du stolz sein.",
    "Training abgeschlossen. Bis zum nächsten Mal!",
];

const DE_PAUSED: &[&str] = &["Training pausiert.", "Kurze Pause.", "Pausiert."];

const DE_RESUMED: &[&str] = &["Weiter geht's!", "Es geht weiter. Los!", "Wir sind zurück."];

const DE_ENCOURAGEMENT: &[&str] = &[
    "Du wirst mit jedem Satz stärker.",
    "Achte auf saubere Technik.",
    "Bleib fokussiert. Du schaffst das.",
    "Jede Wiederholung zählt.",
    "Zieh durch. Du machst das super.",
    "Atmen und stark bleiben.",
];

/// Phrase templates for a category in the given locale
pub fn phrases(locale: Locale, category: PhraseCategory) -> &'static [&'static str] {
    match locale {
        Locale::English => match category {
            PhraseCategory::WorkoutStart => EN_WORKOUT_START,
            PhraseCategory::SetComplete => EN_SET_COMPLETE,
            PhraseCategory::NextExercise => EN_NEXT_EXERCISE,
            PhraseCategory::ExerciseJump => EN_EXERCISE_JUMP,
            PhraseCategory::RestEnd => EN_REST_END,
            PhraseCategory::WorkoutComplete => EN_WORKOUT_COMPLETE,
            PhraseCategory::Paused => EN_PAUSED,
            PhraseCategory::Resumed => EN_RESUMED,
            PhraseCategory::Encouragement => EN_ENCOURAGEMENT,
        },
        Locale::German => match category {
            PhraseCategory::WorkoutStart => DE_WORKOUT_START,
            PhraseCategory::SetComplete => DE_SET_COMPLETE,
            PhraseCategory::NextExercise => DE_NEXT_EXERCISE,
            PhraseCategory::ExerciseJump => DE_EXERCISE_JUMP,
            PhraseCategory::RestEnd => DE_REST_END,
            PhraseCategory::WorkoutComplete => DE_WORKOUT_COMPLETE,
            PhraseCategory::Paused => DE_PAUSED,
            PhraseCategory::Resumed => DE_RESUMED,
            PhraseCategory::Encouragement => DE_ENCOURAGEMENT,
        },
    }
}

/// Spoken countdown word for 3, 2 or 1
pub fn countdown_word(locale: Locale, seconds: u8) -> Option<&'static str> {
    let word = match (locale, seconds) {
        (Locale::English, 3) => "Three",
        (Locale::English, 2) => "Two",
        (Locale::English, 1) => "One",
        (Locale::German, 3) => "Drei",
        (Locale::German, 2) => "Zwei",
        (Locale::German, 1) => "Eins",
        _ => return None,
    };
    Some(word)
}
