use super::engine::SessionCommand;
use std::time::Duration;
use tokio::sync::mpsc::WeakUnboundedSender;
use tokio::task::AbortHandle;
use tokio::time::{Instant, MissedTickBehavior};

pub const REST_TICK_PERIOD: Duration = Duration::from_secs(1);

/// Cancels a scheduled task when cancelled or dropped
#[derive(Debug, Default)]
pub struct TimerHandle {
    abort: Option<AbortHandle>,
}

impl TimerHandle {
    pub fn new(abort: AbortHandle) -> Self {
        Self { abort: Some(abort) }
    }

    /// A handle with nothing behind it, for schedulers driven by hand
    pub fn detached() -> Self {
        Self { abort: None }
    }

    pub fn cancel(&mut self) {
        if let Some(abort) = self.abort.take() {
            abort.abort();
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Source of timed commands fed back into the session engine
pub trait TickScheduler: Send + Sync {
    /// Deliver `Tick { generation }` every `period`, first one a full period from now
    fn repeating(&self, period: Duration, generation: u64) -> TimerHandle;

    /// Deliver `command` once after `delay`
    fn after(&self, delay: Duration, command: SessionCommand) -> TimerHandle;
}

/// Scheduler on the tokio clock, posting into the engine's command queue.
///
/// Holds a weak sender so pending timers never keep a stopped engine alive.
pub struct TokioTickScheduler {
    sender: WeakUnboundedSender<SessionCommand>,
}

impl TokioTickScheduler {
    pub fn new(sender: WeakUnboundedSender<SessionCommand>) -> Self {
        Self { sender }
    }
}

impl TickScheduler for TokioTickScheduler {
    fn repeating(&self, period: Duration, generation: u64) -> TimerHandle {
        let sender = self.sender.clone();
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let Some(tx) = sender.upgrade() else {
                    break;
                };
                if tx.send(SessionCommand::Tick { generation }).is_err() {
                    break;
                }
            }
        });
        TimerHandle::new(task.abort_handle())
    }

    fn after(&self, delay: Duration, command: SessionCommand) -> TimerHandle {
        let sender = self.sender.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(tx) = sender.upgrade() {
                let _ = tx.send(command);
            }
        });
        TimerHandle::new(task.abort_handle())
    }
}

/// The rest countdown's clock.
///
/// Every start bumps the generation, so ticks already queued from an earlier
/// countdown are recognised as stale and dropped.
pub struct RestTimer {
    scheduler: std::sync::Arc<dyn TickScheduler>,
    handle: Option<TimerHandle>,
    generation: u64,
}

impl RestTimer {
    pub fn new(scheduler: std::sync::Arc<dyn TickScheduler>) -> Self {
        Self {
            scheduler,
            handle: None,
            generation: 0,
        }
    }

    /// Stop any running countdown, then start a fresh one
    pub fn start(&mut self) -> u64 {
        self.stop();
        self.generation += 1;
        self.handle = Some(self.scheduler.repeating(REST_TICK_PERIOD, self.generation));
        tracing::trace!(generation = self.generation, "Rest timer started");
        self.generation
    }

    pub fn stop(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.cancel();
            tracing::trace!(generation = self.generation, "Rest timer stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Generation of the running countdown, if any
    pub fn generation(&self) -> Option<u64> {
        self.handle.as_ref().map(|_| self.generation)
    }

    pub fn accepts(&self, generation: u64) -> bool {
        self.handle.is_some() && generation == self.generation
    }
}
