//! Timetable operations composed over an injected repository.
//!
//! Writes are serialised: the store is loaded, validated against and saved
//! while holding one lock, so two submissions can never both pass validation
//! against the same snapshot.

use std::sync::Arc;

use eyre::WrapErr;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    catalog::Catalog,
    conflict::{self, ConflictQuery},
    errors::{RoutineError, RoutineResult, SlotField, SlotViolation},
    export::render_routine_html,
    models::routine::{Availability, Cohort, Day, RoutineSlot, RoutineStore, SlotDraft, WeeklyRoutine},
    repository::RoutineRepository,
    validation::{CheckedSlot, validate_slot},
};

pub struct RoutineService {
    repository: Arc<dyn RoutineRepository>,
    catalog: Arc<Catalog>,
    writes: Mutex<()>,
}

impl RoutineService {
    pub fn new(repository: Arc<dyn RoutineRepository>, catalog: Arc<Catalog>) -> Self {
        Self {
            repository,
            catalog,
            writes: Mutex::new(()),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub async fn load(&self) -> RoutineResult<RoutineStore> {
        self.repository
            .load()
            .await
            .wrap_err("Failed to load routines")
            .map_err(RoutineError::Storage)
    }

    /// The cohort's routine, or an empty one if nothing was saved yet.
    pub async fn routine(&self, cohort: &Cohort) -> RoutineResult<WeeklyRoutine> {
        let store = self.load().await?;
        Ok(store
            .routine(cohort)
            .cloned()
            .unwrap_or_else(|| WeeklyRoutine::empty(cohort)))
    }

    pub async fn find_conflicts(&self, query: &ConflictQuery) -> RoutineResult<Vec<RoutineSlot>> {
        let store = self.load().await?;
        Ok(conflict::find_conflicts(&store, &self.catalog, query)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Validates a draft without saving it.
    pub async fn check_slot(
        &self,
        cohort: &Cohort,
        draft: &SlotDraft,
        editing_id: Option<&str>,
    ) -> RoutineResult<CheckedSlot> {
        let store = self.load().await?;
        Ok(validate_slot(draft, cohort, editing_id, &store, &self.catalog)?)
    }

    pub async fn add_slot(&self, cohort: &Cohort, draft: &SlotDraft) -> RoutineResult<RoutineSlot> {
        let _guard = self.writes.lock().await;
        let store = self.load().await?;

        let checked = validate_slot(draft, cohort, None, &store, &self.catalog).inspect_err(|violation| {
            warn!(%cohort, code = violation.code(), "rejected new slot: {violation}");
        })?;

        let mut routine = store
            .routine(cohort)
            .cloned()
            .unwrap_or_else(|| WeeklyRoutine::empty(cohort));

        let id = match SlotDraft::value(&draft.id) {
            Some(id) if !store.slots().any(|slot| slot.id == id) => id.to_string(),
            Some(id) => {
                warn!(%cohort, id, "slot id already in use, assigning a new one");
                Uuid::new_v4().to_string()
            }
            None => Uuid::new_v4().to_string(),
        };

        let slot = checked.into_routine_slot(id, cohort);
        routine.slots.push(slot.clone());
        self.save(routine).await?;

        info!(%cohort, id = %slot.id, day = %slot.day, start = %slot.start_time, "slot added");
        Ok(slot)
    }

    pub async fn update_slot(
        &self,
        cohort: &Cohort,
        slot_id: &str,
        draft: &SlotDraft,
    ) -> RoutineResult<RoutineSlot> {
        let _guard = self.writes.lock().await;
        let store = self.load().await?;

        let mut routine = store
            .routine(cohort)
            .filter(|routine| routine.slot(slot_id).is_some())
            .cloned()
            .ok_or_else(|| RoutineError::NotFound(format!("Slot {slot_id} not found in {cohort}")))?;

        let checked =
            validate_slot(draft, cohort, Some(slot_id), &store, &self.catalog).inspect_err(|violation| {
                warn!(%cohort, id = slot_id, code = violation.code(), "rejected slot update: {violation}");
            })?;

        let slot = checked.into_routine_slot(slot_id.to_string(), cohort);
        if let Some(existing) = routine.slots.iter_mut().find(|existing| existing.id == slot_id) {
            *existing = slot.clone();
        }
        self.save(routine).await?;

        info!(%cohort, id = slot_id, "slot updated");
        Ok(slot)
    }

    pub async fn delete_slot(&self, cohort: &Cohort, slot_id: &str) -> RoutineResult<()> {
        let _guard = self.writes.lock().await;
        self.repository
            .delete(cohort, slot_id)
            .await
            .wrap_err("Failed to delete routine slot")
            .map_err(RoutineError::Storage)?;

        info!(%cohort, id = slot_id, "slot deleted");
        Ok(())
    }

    /// Rooms and teachers of the cohort's department still free in a cell.
    pub async fn availability(
        &self,
        cohort: &Cohort,
        day: Day,
        start_time: &str,
        exclude_id: Option<&str>,
    ) -> RoutineResult<Availability> {
        if self.catalog.time_slot(start_time).is_none() {
            return Err(SlotViolation::InvalidReference {
                field: SlotField::StartTime,
                value: start_time.to_string(),
            }
            .into());
        }

        let store = self.load().await?;
        Ok(conflict::availability(
            &store,
            &self.catalog,
            cohort,
            day,
            start_time,
            exclude_id,
        ))
    }

    pub async fn export_html(&self, cohort: &Cohort) -> RoutineResult<String> {
        let routine = self.routine(cohort).await?;
        Ok(render_routine_html(&routine, &self.catalog))
    }

    async fn save(&self, routine: WeeklyRoutine) -> RoutineResult<()> {
        self.repository
            .save(routine)
            .await
            .wrap_err("Failed to save routine")
            .map_err(RoutineError::Storage)
    }
}
