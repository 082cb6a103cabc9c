use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// One named movement with prescribed sets and rest, as stored in a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: Uuid,
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    pub weight_kg: f64,
    pub rest_seconds: u32,
    pub order_index: i32,
    pub muscle_group: String,
    pub equipment: String,
}

impl Exercise {
    pub fn new(name: impl Into<String>, sets: u32, rest_seconds: u32, order_index: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            sets,
            reps: 10,
            weight_kg: 0.0,
            rest_seconds,
            order_index,
            muscle_group: String::new(),
            equipment: String::new(),
        }
    }

    pub fn with_muscle_group(mut self, muscle_group: impl Into<String>) -> Self {
        self.muscle_group = muscle_group.into();
        self
    }
}

/// An ordered collection of exercises followed in one workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    pub id: Uuid,
    pub name: String,
    pub exercises: Vec<Exercise>,
    pub last_used_at: Option<DateTime<Utc>>,
}

impl WorkoutPlan {
    pub fn new(name: impl Into<String>, exercises: Vec<Exercise>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            exercises,
            last_used_at: None,
        }
    }

    /// Exercises in canonical `order_index` order, never storage order
    pub fn sorted_exercises(&self) -> Vec<Exercise> {
        let mut exercises = self.exercises.clone();
        exercises.sort_by_key(|e| e.order_index);
        exercises
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Active,
    Resting,
    Completed,
}

/// The live state of one workout. Owned by the session manager, never persisted.
#[derive(Debug, Clone)]
pub struct WorkoutSession {
    pub id: Uuid,
    pub plan: Arc<WorkoutPlan>,
    /// `plan.exercises` sorted by `order_index`, captured at start
    pub exercises: Vec<Exercise>,
    pub state: SessionState,
    /// Orthogonal to `state`: freezes the rest countdown without renaming the state
    pub paused: bool,
    pub current_exercise_index: usize,
    /// 1-based
    pub current_set_number: u32,
    pub rest_time_remaining: u32,
    /// Denominator for rest progress; grows when the rest is extended
    pub original_rest_duration: u32,
    /// Rest length this countdown started with, before any extension
    pub rest_base_duration: u32,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
}

impl WorkoutSession {
    /// Begin a session at the first exercise, set 1. `None` for an empty plan.
    pub fn begin(plan: Arc<WorkoutPlan>, now: DateTime<Utc>) -> Option<Self> {
        if plan.exercises.is_empty() {
            return None;
        }
        let exercises = plan.sorted_exercises();
        Some(Self {
            id: Uuid::new_v4(),
            plan,
            exercises,
            state: SessionState::Active,
            paused: false,
            current_exercise_index: 0,
            current_set_number: 1,
            rest_time_remaining: 0,
            original_rest_duration: 0,
            rest_base_duration: 0,
            start_time: now,
            end_time: None,
        })
    }

    pub fn total_exercises(&self) -> usize {
        self.exercises.len()
    }

    pub fn current_exercise(&self) -> Option<&Exercise> {
        self.exercises.get(self.current_exercise_index)
    }

    pub fn next_exercise(&self) -> Option<&Exercise> {
        self.exercises.get(self.current_exercise_index + 1)
    }

    pub fn is_last_exercise(&self) -> bool {
        self.current_exercise_index + 1 >= self.exercises.len()
    }

    pub fn is_last_set(&self) -> bool {
        match self.current_exercise() {
            Some(exercise) => self.current_set_number >= exercise.sets,
            None => true,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.state == SessionState::Completed
    }

    /// Seconds elapsed: until `now` while running, until `end_time` once completed
    pub fn duration_seconds_at(&self, now: DateTime<Utc>) -> i64 {
        let end = self.end_time.unwrap_or(now);
        (end - self.start_time).num_seconds().max(0)
    }

    pub fn duration_seconds(&self) -> i64 {
        self.duration_seconds_at(Utc::now())
    }

    /// Duration as MM:SS
    pub fn duration_formatted(&self) -> String {
        let total = self.duration_seconds();
        format!("{:02}:{:02}", total / 60, total % 60)
    }

    pub fn total_sets(&self) -> u32 {
        self.exercises.iter().map(|e| e.sets).sum()
    }

    /// Finished exercises' sets plus the sets done so far in the current one
    pub fn total_sets_completed(&self) -> u32 {
        let finished: u32 = self
            .exercises
            .iter()
            .take(self.current_exercise_index)
            .map(|e| e.sets)
            .sum();
        let current = self.current_set_number.saturating_sub(1);
        let last = u32::from(self.is_completed());
        finished + current + last
    }

    /// Remaining fraction of the rest countdown, 1.0 = full, 0.0 = done
    pub fn rest_progress(&self) -> f64 {
        if self.original_rest_duration == 0 {
            return 0.0;
        }
        f64::from(self.rest_time_remaining) / f64::from(self.original_rest_duration)
    }

    pub(crate) fn clear_rest(&mut self) {
        self.rest_time_remaining = 0;
        self.original_rest_duration = 0;
        self.rest_base_duration = 0;
    }
}

/// Either no workout is running or exactly one is
#[derive(Debug, Clone, Default)]
pub enum SessionSlot {
    #[default]
    NoSession,
    InProgress(WorkoutSession),
}

impl SessionSlot {
    pub fn session(&self) -> Option<&WorkoutSession> {
        match self {
            SessionSlot::NoSession => None,
            SessionSlot::InProgress(session) => Some(session),
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut WorkoutSession> {
        match self {
            SessionSlot::NoSession => None,
            SessionSlot::InProgress(session) => Some(session),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, SessionSlot::InProgress(_))
    }
}

/// Read model published to the UI after every command and tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub plan_name: String,
    pub state: SessionState,
    pub paused: bool,
    pub exercise_index: usize,
    pub exercise_name: String,
    pub set_number: u32,
    pub exercise_sets: u32,
    pub total_exercises: usize,
    pub rest_time_remaining: u32,
    pub original_rest_duration: u32,
    pub rest_progress: f64,
    pub total_sets_completed: u32,
    pub total_sets: u32,
    pub next_exercise_name: Option<String>,
    pub duration_seconds: i64,
}

impl From<&WorkoutSession> for SessionSnapshot {
    fn from(session: &WorkoutSession) -> Self {
        let current = session.current_exercise();
        Self {
            session_id: session.id,
            plan_name: session.plan.name.clone(),
            state: session.state,
            paused: session.paused,
            exercise_index: session.current_exercise_index,
            exercise_name: current.map(|e| e.name.clone()).unwrap_or_default(),
            set_number: session.current_set_number,
            exercise_sets: current.map(|e| e.sets).unwrap_or_default(),
            total_exercises: session.total_exercises(),
            rest_time_remaining: session.rest_time_remaining,
            original_rest_duration: session.original_rest_duration,
            rest_progress: session.rest_progress(),
            total_sets_completed: session.total_sets_completed(),
            total_sets: session.total_sets(),
            next_exercise_name: session.next_exercise().map(|e| e.name.clone()),
            duration_seconds: session.duration_seconds(),
        }
    }
}
