#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use routine_core::{
    catalog::Catalog,
    models::routine::{Cohort, Day, RoutineSlot, RoutineStore, SlotDraft, WeeklyRoutine},
    repository::RoutineRepository,
};

pub fn catalog() -> Catalog {
    Catalog::builtin().expect("built-in catalog should load")
}

pub fn slot(id: &str, cohort: &Cohort, day: Day, start: &str, room: &str, teacher: &str) -> RoutineSlot {
    let end = catalog()
        .time_slot(start)
        .map(|period| period.end.clone())
        .expect("known period");
    RoutineSlot {
        id: id.to_string(),
        day,
        start_time: start.to_string(),
        end_time: end,
        subject_id: "UCSE301".to_string(),
        teacher_id: teacher.to_string(),
        room_no: room.to_string(),
        department: cohort.department.clone(),
        semester: cohort.semester,
    }
}

pub fn draft(day: &str, start: &str, end: &str, room: &str, teacher: &str) -> SlotDraft {
    SlotDraft {
        id: None,
        day: Some(day.to_string()),
        start_time: Some(start.to_string()),
        end_time: Some(end.to_string()),
        subject_id: Some("UCSE303".to_string()),
        teacher_id: Some(teacher.to_string()),
        room_no: Some(room.to_string()),
    }
}

pub fn store_with(slots: Vec<RoutineSlot>) -> RoutineStore {
    let mut store = RoutineStore::default();
    for slot in slots {
        let cohort = slot.cohort();
        let mut routine = store
            .routine(&cohort)
            .cloned()
            .unwrap_or_else(|| WeeklyRoutine::empty(&cohort));
        routine.slots.push(slot);
        store.upsert(routine);
    }
    store
}

/// Repository keeping the document in memory.
#[derive(Default)]
pub struct FakeRepository {
    pub store: Mutex<RoutineStore>,
}

impl FakeRepository {
    pub fn with(store: RoutineStore) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    pub fn snapshot(&self) -> RoutineStore {
        self.store.lock().unwrap().clone()
    }
}

#[async_trait]
impl RoutineRepository for FakeRepository {
    async fn load(&self) -> eyre::Result<RoutineStore> {
        Ok(self.snapshot())
    }

    async fn save(&self, routine: WeeklyRoutine) -> eyre::Result<()> {
        self.store.lock().unwrap().upsert(routine);
        Ok(())
    }

    async fn delete(&self, cohort: &Cohort, slot_id: &str) -> eyre::Result<()> {
        self.store.lock().unwrap().remove_slot(cohort, slot_id);
        Ok(())
    }
}
