use serde::Deserialize;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use workout_coach::app::{HostCollaborators, WorkoutCoach};
use workout_coach::domain::settings::{CoachSettings, InMemorySettingsProvider};
use workout_coach::domain::workout::{Exercise, SessionHandle, WorkoutPlan};
use workout_coach::infrastructure::config::EngineConfig;
use workout_coach::infrastructure::logging::init_logging;

/// Plan file accepted on the command line
#[derive(Debug, Deserialize)]
struct PlanFile {
    name: String,
    exercises: Vec<PlanFileExercise>,
}

#[derive(Debug, Deserialize)]
struct PlanFileExercise {
    name: String,
    sets: u32,
    rest_seconds: u32,
    #[serde(default)]
    muscle_group: String,
}

impl From<PlanFile> for WorkoutPlan {
    fn from(file: PlanFile) -> Self {
        let exercises = file
            .exercises
            .into_iter()
            .enumerate()
            .map(|(i, e)| {
                Exercise::new(e.name, e.sets, e.rest_seconds, i as i32)
                    .with_muscle_group(e.muscle_group)
            })
            .collect();
        WorkoutPlan::new(file.name, exercises)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = EngineConfig::from_env()?;
    init_logging(&config);

    let plan_path = std::env::args()
        .nth(1)
        .ok_or("usage: workout-coach <plan.json>")?;
    let plan: PlanFile = serde_json::from_str(&tokio::fs::read_to_string(&plan_path).await?)?;
    let plan = WorkoutPlan::from(plan);
    tracing::info!(plan = %plan.name, exercises = plan.exercises.len(), "Plan loaded");

    let settings = Arc::new(InMemorySettingsProvider::new(CoachSettings {
        remote_api_key: std::env::var("ELEVENLABS_API_KEY").ok(),
        ..CoachSettings::default()
    }));
    let coach = WorkoutCoach::launch(&config, HostCollaborators::headless(settings))?;

    let mut updates = coach.session().subscribe();
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let snapshot = updates.borrow_and_update().clone();
            match snapshot {
                Some(s) => tracing::info!(
                    state = ?s.state,
                    paused = s.paused,
                    exercise = %s.exercise_name,
                    set = s.set_number,
                    rest_remaining = s.rest_time_remaining,
                    "Session"
                ),
                None => tracing::info!("No active session"),
            }
        }
    });

    coach.session().start(plan)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if !dispatch(coach.session(), line.trim())? {
            break;
        }
    }

    coach.shutdown().await?;
    Ok(())
}

/// Apply one console command; `false` ends the loop
fn dispatch(session: &SessionHandle, input: &str) -> workout_coach::error::EngineResult<bool> {
    let mut parts = input.split_whitespace();
    match (parts.next(), parts.next().and_then(|n| n.parse::<i64>().ok())) {
        (None, _) | (Some("done"), _) => session.complete_set()?,
        (Some("skip"), _) => session.skip_rest()?,
        (Some("pause"), _) => session.toggle_pause()?,
        (Some("jump"), Some(index)) => session.jump_to_exercise(index.max(0) as usize)?,
        (Some("finish"), Some(index)) => session.mark_exercise_complete(index.max(0) as usize)?,
        (Some("rest"), Some(delta)) => session.adjust_rest(delta.clamp(-600, 600) as i32)?,
        (Some("cancel"), _) => session.cancel()?,
        (Some("quit"), _) => return Ok(false),
        (Some(other), _) => tracing::warn!(command = other, "Unknown command"),
    }
    Ok(true)
}
