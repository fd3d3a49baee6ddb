use std::path::{Path, PathBuf};

use async_trait::async_trait;
use eyre::{Result, WrapErr};
use routine_core::{
    models::routine::{Cohort, RoutineStore, WeeklyRoutine},
    repository::RoutineRepository,
};
use tokio::{fs, sync::Mutex};
use tracing::{debug, warn};

/// Keeps the timetable as a JSON file, rewritten on every change.
#[derive(Debug)]
pub struct FileRoutineRepository {
    path: PathBuf,
    // Serialises read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl FileRoutineRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<RoutineStore> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(RoutineStore::default());
            }
            Err(err) => {
                return Err(err).wrap_err_with(|| format!("Failed to read {}", self.path.display()));
            }
        };

        if raw.trim().is_empty() {
            warn!(path = %self.path.display(), "routine file is empty, starting fresh");
            return Ok(RoutineStore::default());
        }

        serde_json::from_str(&raw).wrap_err_with(|| format!("Malformed routine file {}", self.path.display()))
    }

    async fn write(&self, store: &RoutineStore) -> Result<()> {
        let body = serde_json::to_vec_pretty(store)?;

        // Write beside the target, then rename over it
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, body)
            .await
            .wrap_err_with(|| format!("Failed to write {}", staging.display()))?;
        fs::rename(&staging, &self.path)
            .await
            .wrap_err_with(|| format!("Failed to replace {}", self.path.display()))?;

        debug!(path = %self.path.display(), routines = store.routines.len(), "routine file written");
        Ok(())
    }
}

#[async_trait]
impl RoutineRepository for FileRoutineRepository {
    async fn load(&self) -> Result<RoutineStore> {
        self.read().await
    }

    async fn save(&self, routine: WeeklyRoutine) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut store = self.read().await?;
        store.upsert(routine);
        self.write(&store).await
    }

    async fn delete(&self, cohort: &Cohort, slot_id: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut store = self.read().await?;
        if store.remove_slot(cohort, slot_id) {
            self.write(&store).await?;
        }
        Ok(())
    }
}
