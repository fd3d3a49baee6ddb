use async_trait::async_trait;
use eyre::Result;

use crate::models::routine::{Cohort, RoutineStore, WeeklyRoutine};

/// Storage for the whole timetable document.
///
/// Implementations read and write the document wholesale; the last write wins.
#[async_trait]
pub trait RoutineRepository: Send + Sync {
    /// Reads every routine. An empty store yields an empty document.
    async fn load(&self) -> Result<RoutineStore>;

    /// Inserts the routine, or replaces the one with the same department and semester.
    async fn save(&self, routine: WeeklyRoutine) -> Result<()>;

    /// Removes one slot from a cohort's routine. Unknown cohorts or slots are ignored.
    async fn delete(&self, cohort: &Cohort, slot_id: &str) -> Result<()>;
}
