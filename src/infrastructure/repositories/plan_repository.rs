use crate::domain::workout::WorkoutPlan;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum PlanRepositoryError {
    #[error("plan not found: {0}")]
    NotFound(Uuid),
    #[error("plan store error: {0}")]
    Storage(String),
}

/// The host's plan store, as seen by the session engine.
///
/// The engine never edits plans; its only write is stamping `last_used_at`
/// when a workout completes.
#[async_trait]
pub trait PlanRepository: Send + Sync {
    async fn mark_used(&self, plan_id: Uuid, used_at: DateTime<Utc>)
        -> Result<(), PlanRepositoryError>;
}

/// Plans kept in memory, for headless hosts and tests
#[derive(Debug, Default)]
pub struct InMemoryPlanRepository {
    plans: RwLock<HashMap<Uuid, WorkoutPlan>>,
}

impl InMemoryPlanRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, plan: WorkoutPlan) {
        self.plans.write().insert(plan.id, plan);
    }

    pub fn find_by_id(&self, plan_id: Uuid) -> Option<WorkoutPlan> {
        self.plans.read().get(&plan_id).cloned()
    }
}

#[async_trait]
impl PlanRepository for InMemoryPlanRepository {
    async fn mark_used(
        &self,
        plan_id: Uuid,
        used_at: DateTime<Utc>,
    ) -> Result<(), PlanRepositoryError> {
        let mut plans = self.plans.write();
        let plan = plans
            .get_mut(&plan_id)
            .ok_or(PlanRepositoryError::NotFound(plan_id))?;
        plan.last_used_at = Some(used_at);
        Ok(())
    }
}
