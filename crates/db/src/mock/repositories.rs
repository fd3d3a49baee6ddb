use async_trait::async_trait;
use mockall::mock;
use routine_core::{
    models::routine::{Cohort, RoutineStore, WeeklyRoutine},
    repository::RoutineRepository,
};

// Mock repository for testing
mock! {
    pub RoutineRepo {}

    #[async_trait]
    impl RoutineRepository for RoutineRepo {
        async fn load(&self) -> eyre::Result<RoutineStore>;

        async fn save(&self, routine: WeeklyRoutine) -> eyre::Result<()>;

        async fn delete(&self, cohort: &Cohort, slot_id: &str) -> eyre::Result<()>;
    }
}
