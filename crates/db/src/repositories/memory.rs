use async_trait::async_trait;
use eyre::Result;
use routine_core::{
    models::routine::{Cohort, RoutineStore, WeeklyRoutine},
    repository::RoutineRepository,
};
use tokio::sync::RwLock;

/// Process-local store, used when no database or file is configured.
#[derive(Debug, Default)]
pub struct MemoryRoutineRepository {
    store: RwLock<RoutineStore>,
}

impl MemoryRoutineRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(store: RoutineStore) -> Self {
        Self {
            store: RwLock::new(store),
        }
    }
}

#[async_trait]
impl RoutineRepository for MemoryRoutineRepository {
    async fn load(&self) -> Result<RoutineStore> {
        Ok(self.store.read().await.clone())
    }

    async fn save(&self, routine: WeeklyRoutine) -> Result<()> {
        self.store.write().await.upsert(routine);
        Ok(())
    }

    async fn delete(&self, cohort: &Cohort, slot_id: &str) -> Result<()> {
        self.store.write().await.remove_slot(cohort, slot_id);
        Ok(())
    }
}
