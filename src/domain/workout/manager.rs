use super::engine::SessionCommand;
use super::model::{SessionSlot, SessionSnapshot, SessionState, WorkoutPlan, WorkoutSession};
use super::timer::{RestTimer, TickScheduler, TimerHandle};
use crate::domain::coaching::{Announcer, Cue};
use crate::infrastructure::device::{HapticSink, NowPlayingInfo, NowPlayingSink, RemoteCommand};
use crate::infrastructure::repositories::PlanRepository;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Shortest rest the user can shorten a countdown to
pub const MIN_REST_SECONDS: u32 = 5;
/// How far past its starting length a rest may be extended
pub const MAX_REST_EXTENSION_SECONDS: u32 = 60;
const WARNING_AT_SECONDS: u32 = 10;

/// Collaborators the session state machine talks to
#[derive(Clone)]
pub struct SessionDependencies {
    pub announcer: Arc<dyn Announcer>,
    pub haptics: Arc<dyn HapticSink>,
    pub now_playing: Arc<dyn NowPlayingSink>,
    pub plan_repo: Arc<dyn PlanRepository>,
}

/// What finishing the current set leads to
enum SetOutcome {
    NextSet { rest: u32 },
    NextExercise { rest: u32, exercise: String },
    Finished,
}

/// The session state machine.
///
/// Owns the single session slot and the rest timer. Invalid operations are
/// ignored: they correspond to UI affordances that should already be
/// disabled.
pub struct WorkoutSessionManager {
    deps: SessionDependencies,
    scheduler: Arc<dyn TickScheduler>,
    rest_timer: RestTimer,
    dismiss_timer: Option<TimerHandle>,
    dismiss_delay: Duration,
    slot: SessionSlot,
}

impl WorkoutSessionManager {
    pub fn new(
        deps: SessionDependencies,
        scheduler: Arc<dyn TickScheduler>,
        dismiss_delay: Duration,
    ) -> Self {
        Self {
            deps,
            rest_timer: RestTimer::new(scheduler.clone()),
            scheduler,
            dismiss_timer: None,
            dismiss_delay,
            slot: SessionSlot::NoSession,
        }
    }

    pub fn slot(&self) -> &SessionSlot {
        &self.slot
    }

    pub fn session(&self) -> Option<&WorkoutSession> {
        self.slot.session()
    }

    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.slot.session().map(SessionSnapshot::from)
    }

    /// Generation of the running rest countdown, if one is running
    pub fn active_timer_generation(&self) -> Option<u64> {
        self.rest_timer.generation()
    }

    pub fn handle(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::Start(plan) => self.start(plan),
            SessionCommand::CompleteSet => self.complete_set(),
            SessionCommand::SkipRest => self.skip_rest(),
            SessionCommand::JumpToExercise(index) => self.jump_to_exercise(index),
            SessionCommand::MarkExerciseComplete(index) => self.mark_exercise_complete(index),
            SessionCommand::TogglePause => self.toggle_pause(),
            SessionCommand::AdjustRest(delta) => self.adjust_rest(delta),
            SessionCommand::Cancel | SessionCommand::Shutdown => self.cancel(),
            SessionCommand::Dismiss => self.dismiss(),
            SessionCommand::AutoDismiss { session_id } => self.auto_dismiss(session_id),
            SessionCommand::Tick { generation } => self.tick(generation),
            SessionCommand::Remote(remote) => self.handle_remote(remote),
        }
    }

    /// Start a workout, replacing any session already in the slot
    pub fn start(&mut self, plan: Arc<WorkoutPlan>) {
        let Some(session) = WorkoutSession::begin(plan.clone(), Utc::now()) else {
            tracing::warn!(plan_id = %plan.id, "Ignoring start of a plan without exercises");
            return;
        };

        if let Some(previous) = self.slot.session() {
            tracing::info!(previous_session_id = %previous.id, "Replacing running session");
        }
        self.rest_timer.stop();
        self.dismiss_timer = None;

        let cue = Cue::WorkoutStarted {
            plan: session.plan.name.clone(),
            exercise: session.exercises[0].name.clone(),
        };
        tracing::info!(
            session_id = %session.id,
            plan_id = %session.plan.id,
            plan_name = %session.plan.name,
            exercises = session.total_exercises(),
            "Workout started"
        );

        self.slot = SessionSlot::InProgress(session);
        self.deps.now_playing.activate();
        self.deps.announcer.announce(cue);
        self.publish_now_playing();
    }

    pub fn complete_set(&mut self) {
        let Some(session) = self.slot.session_mut() else {
            return;
        };
        if session.paused || session.is_completed() {
            return;
        }
        let Some(exercise) = session.current_exercise() else {
            return;
        };
        let sets = exercise.sets;
        let rest = exercise.rest_seconds;

        let outcome = if session.current_set_number < sets {
            session.current_set_number += 1;
            SetOutcome::NextSet { rest }
        } else if !session.is_last_exercise() {
            session.current_exercise_index += 1;
            session.current_set_number = 1;
            let exercise = session
                .current_exercise()
                .map(|e| e.name.clone())
                .unwrap_or_default();
            SetOutcome::NextExercise { rest, exercise }
        } else {
            SetOutcome::Finished
        };

        tracing::debug!(
            session_id = %session.id,
            exercise_index = session.current_exercise_index,
            set_number = session.current_set_number,
            "Set completed"
        );

        match outcome {
            SetOutcome::NextSet { rest } => {
                self.deps.haptics.medium();
                self.deps.announcer.announce(Cue::SetCompleted);
                self.begin_rest(rest);
            }
            SetOutcome::NextExercise { rest, exercise } => {
                self.deps.haptics.medium();
                self.deps.announcer.announce(Cue::NextExercise { exercise });
                // Recover from the exercise just finished
                self.begin_rest(rest);
            }
            SetOutcome::Finished => self.finish(),
        }
    }

    fn begin_rest(&mut self, seconds: u32) {
        let Some(session) = self.slot.session_mut() else {
            return;
        };

        if seconds == 0 {
            self.rest_timer.stop();
            session.state = SessionState::Active;
            session.clear_rest();
            self.publish_now_playing();
            return;
        }

        session.state = SessionState::Resting;
        session.rest_time_remaining = seconds;
        session.original_rest_duration = seconds;
        session.rest_base_duration = seconds;
        tracing::debug!(session_id = %session.id, seconds, "Rest started");

        self.rest_timer.start();
        self.publish_now_playing();
    }

    pub fn tick(&mut self, generation: u64) {
        if !self.rest_timer.accepts(generation) {
            tracing::trace!(generation, "Dropping stale tick");
            return;
        }
        let Some(session) = self.slot.session_mut() else {
            self.rest_timer.stop();
            return;
        };
        if session.state != SessionState::Resting || session.paused {
            return;
        }

        session.rest_time_remaining = session.rest_time_remaining.saturating_sub(1);
        let remaining = session.rest_time_remaining;
        if remaining == 0 {
            self.end_rest();
            return;
        }

        self.publish_now_playing();
        match remaining {
            WARNING_AT_SECONDS => self.deps.haptics.warning(),
            3 => {
                self.deps.haptics.light();
                self.deps.announcer.announce(Cue::Countdown(3));
            }
            2 => {
                self.deps.haptics.medium();
                self.deps.announcer.announce(Cue::Countdown(2));
            }
            1 => {
                self.deps.haptics.heavy();
                self.deps.announcer.announce(Cue::Countdown(1));
            }
            _ => {}
        }
    }

    fn end_rest(&mut self) {
        self.rest_timer.stop();
        let Some(session) = self.slot.session_mut() else {
            return;
        };
        session.state = SessionState::Active;
        session.clear_rest();
        tracing::debug!(session_id = %session.id, "Rest ended");

        self.deps.haptics.heavy();
        self.deps.announcer.announce(Cue::RestEnded);
        self.publish_now_playing();
    }

    /// End the rest now, as if the countdown reached zero.
    ///
    /// Works while paused too; the pause flag is left as it was.
    pub fn skip_rest(&mut self) {
        let resting = matches!(
            self.slot.session(),
            Some(s) if s.state == SessionState::Resting
        );
        if resting {
            self.end_rest();
        }
    }

    pub fn jump_to_exercise(&mut self, index: usize) {
        let Some(session) = self.slot.session_mut() else {
            return;
        };
        if session.is_completed() || index >= session.total_exercises() {
            return;
        }

        self.rest_timer.stop();
        session.current_exercise_index = index;
        session.current_set_number = 1;
        session.state = SessionState::Active;
        session.paused = false;
        session.clear_rest();
        let exercise = session.exercises[index].name.clone();
        tracing::info!(session_id = %session.id, exercise_index = index, "Jumped to exercise");

        self.deps.haptics.light();
        self.deps.announcer.announce(Cue::ExerciseJump { exercise });
        self.publish_now_playing();
    }

    pub fn mark_exercise_complete(&mut self, index: usize) {
        let Some(session) = self.slot.session_mut() else {
            return;
        };
        if session.is_completed() || index >= session.total_exercises() {
            return;
        }

        self.rest_timer.stop();
        session.paused = false;
        session.clear_rest();

        if index + 1 < session.total_exercises() {
            session.current_exercise_index = index + 1;
            session.current_set_number = 1;
            session.state = SessionState::Active;
            let exercise = session.exercises[index + 1].name.clone();
            tracing::info!(session_id = %session.id, exercise_index = index, "Exercise marked complete");

            self.deps.haptics.medium();
            self.deps.announcer.announce(Cue::NextExercise { exercise });
            self.publish_now_playing();
        } else {
            session.current_exercise_index = index;
            session.current_set_number = session.exercises[index].sets;
            self.finish();
        }
    }

    pub fn toggle_pause(&mut self) {
        let Some(session) = self.slot.session_mut() else {
            return;
        };
        if session.is_completed() {
            return;
        }

        session.paused = !session.paused;
        let paused = session.paused;
        let resume_countdown = session.state == SessionState::Resting && session.rest_time_remaining > 0;
        tracing::info!(session_id = %session.id, paused, "Pause toggled");

        if paused {
            self.rest_timer.stop();
            self.deps.announcer.announce(Cue::Paused);
        } else {
            if resume_countdown {
                self.rest_timer.start();
            }
            self.deps.announcer.announce(Cue::Resumed);
        }
        self.deps.haptics.medium();
        self.publish_now_playing();
    }

    /// Lengthen or shorten the running rest, within
    /// `[MIN_REST_SECONDS, base + MAX_REST_EXTENSION_SECONDS]`
    pub fn adjust_rest(&mut self, delta_seconds: i32) {
        let Some(session) = self.slot.session_mut() else {
            return;
        };
        if session.state != SessionState::Resting || session.paused {
            return;
        }

        let ceiling = (session.rest_base_duration + MAX_REST_EXTENSION_SECONDS).max(MIN_REST_SECONDS);
        let target = (i64::from(session.rest_time_remaining) + i64::from(delta_seconds))
            .clamp(i64::from(MIN_REST_SECONDS), i64::from(ceiling));
        session.rest_time_remaining = u32::try_from(target).unwrap_or(MIN_REST_SECONDS);
        if session.rest_time_remaining > session.original_rest_duration {
            session.original_rest_duration = session.rest_time_remaining;
        }
        tracing::debug!(
            session_id = %session.id,
            delta_seconds,
            remaining = session.rest_time_remaining,
            "Rest adjusted"
        );

        self.deps.haptics.light();
        self.publish_now_playing();
    }

    /// Discard the session unconditionally
    pub fn cancel(&mut self) {
        self.rest_timer.stop();
        self.dismiss_timer = None;
        if let SessionSlot::InProgress(session) = std::mem::take(&mut self.slot) {
            tracing::info!(session_id = %session.id, state = ?session.state, "Workout cancelled");
            self.deps.now_playing.clear();
            self.deps.now_playing.deactivate();
        }
    }

    /// Close a completed session before the auto-dismiss delay runs out
    pub fn dismiss(&mut self) {
        if matches!(self.slot.session(), Some(s) if s.is_completed()) {
            self.dismiss_timer = None;
            self.slot = SessionSlot::NoSession;
        }
    }

    fn auto_dismiss(&mut self, session_id: Uuid) {
        let due = matches!(
            self.slot.session(),
            Some(s) if s.id == session_id && s.is_completed()
        );
        if due {
            tracing::debug!(session_id = %session_id, "Completed session dismissed");
            self.dismiss_timer = None;
            self.slot = SessionSlot::NoSession;
        }
    }

    fn finish(&mut self) {
        self.rest_timer.stop();
        let Some(session) = self.slot.session_mut() else {
            return;
        };

        let now = Utc::now();
        session.state = SessionState::Completed;
        session.paused = false;
        session.end_time = Some(now);
        session.clear_rest();
        let session_id = session.id;
        let plan_id = session.plan.id;

        tracing::info!(
            session_id = %session_id,
            plan_id = %plan_id,
            duration_seconds = session.duration_seconds_at(now),
            total_sets = session.total_sets(),
            "Workout completed"
        );

        self.deps.haptics.success();
        self.deps.announcer.announce(Cue::WorkoutCompleted);
        self.deps.now_playing.clear();
        self.deps.now_playing.deactivate();
        self.record_plan_used(plan_id, now);

        self.dismiss_timer = Some(
            self.scheduler
                .after(self.dismiss_delay, SessionCommand::AutoDismiss { session_id }),
        );
    }

    fn record_plan_used(&self, plan_id: Uuid, used_at: chrono::DateTime<Utc>) {
        let plan_repo = self.deps.plan_repo.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = plan_repo.mark_used(plan_id, used_at).await {
                        tracing::warn!(error = %e, plan_id = %plan_id, "Failed to record plan usage");
                    }
                });
            }
            Err(_) => {
                tracing::warn!(plan_id = %plan_id, "No async runtime, plan usage not recorded");
            }
        }
    }

    fn handle_remote(&mut self, command: RemoteCommand) {
        let paused = self.slot.session().map(|s| s.paused);
        tracing::debug!(?command, "Remote command received");
        match (command, paused) {
            (_, None) => {}
            (RemoteCommand::Play, Some(true)) | (RemoteCommand::Pause, Some(false)) => {
                self.toggle_pause()
            }
            (RemoteCommand::TogglePlayPause, Some(_)) => self.toggle_pause(),
            (RemoteCommand::NextTrack, Some(_)) => self.complete_set(),
            _ => {}
        }
    }

    fn publish_now_playing(&self) {
        if let Some(info) = self.slot.session().and_then(NowPlayingInfo::for_session) {
            self.deps.now_playing.update(info);
        }
    }
}
