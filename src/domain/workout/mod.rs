pub mod engine;
pub mod manager;
pub mod model;
pub mod timer;

pub use engine::{SessionCommand, SessionEngine, SessionHandle};
pub use manager::{
    SessionDependencies, WorkoutSessionManager, MAX_REST_EXTENSION_SECONDS, MIN_REST_SECONDS,
};
pub use model::{
    Exercise, SessionSlot, SessionSnapshot, SessionState, WorkoutPlan, WorkoutSession,
};
pub use timer::{RestTimer, TickScheduler, TimerHandle, TokioTickScheduler, REST_TICK_PERIOD};
