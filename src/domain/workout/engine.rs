use super::manager::{SessionDependencies, WorkoutSessionManager};
use super::model::{SessionSnapshot, WorkoutPlan};
use super::timer::TokioTickScheduler;
use crate::error::{EngineError, EngineResult};
use crate::infrastructure::device::RemoteCommand;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Everything that can change a session, user-initiated or timed
#[derive(Debug)]
pub enum SessionCommand {
    Start(Arc<WorkoutPlan>),
    CompleteSet,
    SkipRest,
    JumpToExercise(usize),
    MarkExerciseComplete(usize),
    TogglePause,
    AdjustRest(i32),
    Cancel,
    Dismiss,
    AutoDismiss { session_id: Uuid },
    Tick { generation: u64 },
    Remote(RemoteCommand),
    Shutdown,
}

/// Cloneable front door to a running [`SessionEngine`]
#[derive(Clone)]
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<SessionCommand>,
    snapshots: watch::Receiver<Option<SessionSnapshot>>,
}

impl SessionHandle {
    pub fn start(&self, plan: WorkoutPlan) -> EngineResult<()> {
        self.send(SessionCommand::Start(Arc::new(plan)))
    }

    pub fn complete_set(&self) -> EngineResult<()> {
        self.send(SessionCommand::CompleteSet)
    }

    pub fn skip_rest(&self) -> EngineResult<()> {
        self.send(SessionCommand::SkipRest)
    }

    pub fn jump_to_exercise(&self, index: usize) -> EngineResult<()> {
        self.send(SessionCommand::JumpToExercise(index))
    }

    pub fn mark_exercise_complete(&self, index: usize) -> EngineResult<()> {
        self.send(SessionCommand::MarkExerciseComplete(index))
    }

    pub fn toggle_pause(&self) -> EngineResult<()> {
        self.send(SessionCommand::TogglePause)
    }

    pub fn adjust_rest(&self, delta_seconds: i32) -> EngineResult<()> {
        self.send(SessionCommand::AdjustRest(delta_seconds))
    }

    pub fn cancel(&self) -> EngineResult<()> {
        self.send(SessionCommand::Cancel)
    }

    /// Close a completed workout without waiting for the auto-dismiss
    pub fn dismiss(&self) -> EngineResult<()> {
        self.send(SessionCommand::Dismiss)
    }

    /// Forward a lock-screen or headset command
    pub fn remote(&self, command: RemoteCommand) -> EngineResult<()> {
        self.send(SessionCommand::Remote(command))
    }

    /// Stop the engine; the current session is discarded
    pub fn shutdown(&self) -> EngineResult<()> {
        self.send(SessionCommand::Shutdown)
    }

    /// Receiver notified after every processed command and tick
    pub fn subscribe(&self) -> watch::Receiver<Option<SessionSnapshot>> {
        self.snapshots.clone()
    }

    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.snapshots.borrow().clone()
    }

    fn send(&self, command: SessionCommand) -> EngineResult<()> {
        self.commands
            .send(command)
            .map_err(|_| EngineError::Unavailable("session engine has stopped".to_string()))
    }
}

/// Single task that owns the session and applies commands in arrival order.
///
/// Timer ticks arrive through the same queue as user commands, so a tick can
/// never interleave with a half-applied operation.
pub struct SessionEngine {
    manager: WorkoutSessionManager,
    commands: mpsc::UnboundedReceiver<SessionCommand>,
    snapshots: watch::Sender<Option<SessionSnapshot>>,
}

impl SessionEngine {
    /// Spawn the engine on the current tokio runtime
    pub fn spawn(
        deps: SessionDependencies,
        dismiss_delay: Duration,
    ) -> (SessionHandle, JoinHandle<()>) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let scheduler = Arc::new(TokioTickScheduler::new(command_tx.downgrade()));
        let (snapshot_tx, snapshot_rx) = watch::channel(None);

        let engine = Self {
            manager: WorkoutSessionManager::new(deps, scheduler, dismiss_delay),
            commands: command_rx,
            snapshots: snapshot_tx,
        };
        let task = tokio::spawn(engine.run());

        let handle = SessionHandle {
            commands: command_tx,
            snapshots: snapshot_rx,
        };
        (handle, task)
    }

    async fn run(mut self) {
        tracing::info!("Session engine started");

        while let Some(command) = self.commands.recv().await {
            let shutdown = matches!(command, SessionCommand::Shutdown);
            self.manager.handle(command);
            self.snapshots.send_replace(self.manager.snapshot());
            if shutdown {
                break;
            }
        }

        self.manager.cancel();
        tracing::info!("Session engine stopped");
    }
}
