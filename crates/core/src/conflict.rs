//! Conflict lookups over every routine in the store.
//!
//! Rooms and teachers are shared between departments, so these queries always
//! scan all cohorts rather than the one being edited.

use serde::{Deserialize, Serialize};

use crate::{
    catalog::Catalog,
    models::{
        catalog::{Room, Teacher},
        routine::{Availability, Cohort, Day, RoutineSlot, RoutineStore},
    },
};

/// Which grid cell to look at and what resources to look for in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictQuery {
    pub day: Day,
    pub start_time: String,
    #[serde(default)]
    pub room_no: Option<String>,
    #[serde(default)]
    pub teacher_id: Option<String>,
    /// The slot being edited; never reported as conflicting with itself.
    ///
    /// Slot ids are only unique within a cohort, so the slot is named by both.
    #[serde(default)]
    pub exclude: Option<(Cohort, String)>,
}

impl ConflictQuery {
    pub fn new(day: Day, start_time: impl Into<String>) -> Self {
        Self {
            day,
            start_time: start_time.into(),
            room_no: None,
            teacher_id: None,
            exclude: None,
        }
    }

    pub fn room(mut self, room_no: impl Into<String>) -> Self {
        self.room_no = Some(room_no.into());
        self
    }

    pub fn teacher(mut self, teacher_id: impl Into<String>) -> Self {
        self.teacher_id = Some(teacher_id.into());
        self
    }

    pub fn excluding(mut self, cohort: Cohort, slot_id: impl Into<String>) -> Self {
        self.exclude = Some((cohort, slot_id.into()));
        self
    }
}

fn same_cell<'a>(
    store: &'a RoutineStore,
    catalog: &Catalog,
    day: Day,
    start_time: &str,
    exclude: Option<(&Cohort, &str)>,
) -> impl Iterator<Item = &'a RoutineSlot> {
    let start = catalog.canonical_start(start_time);
    let exclude = exclude.map(|(cohort, id)| (cohort.clone(), id.to_string()));
    store.slots().filter(move |slot| {
        let excluded = exclude
            .as_ref()
            .is_some_and(|(cohort, id)| slot.id == *id && slot.belongs_to(cohort));
        slot.day == day && catalog.canonical_start(&slot.start_time) == start && !excluded
    })
}

/// Every slot in the cell that uses the queried room or the queried teacher.
///
/// A query naming neither room nor teacher matches nothing.
pub fn find_conflicts<'a>(
    store: &'a RoutineStore,
    catalog: &Catalog,
    query: &ConflictQuery,
) -> Vec<&'a RoutineSlot> {
    let room_no = query.room_no.as_deref();
    let teacher_id = query.teacher_id.as_deref();

    same_cell(
        store,
        catalog,
        query.day,
        &query.start_time,
        query.exclude.as_ref().map(|(cohort, id)| (cohort, id.as_str())),
    )
    .filter(|slot| room_no == Some(slot.room_no.as_str()) || teacher_id == Some(slot.teacher_id.as_str()))
    .collect()
}

/// The slot a cohort already has in a cell, if any.
///
/// `exclude_id` names a slot of this same cohort.
pub fn cell_occupant<'a>(
    store: &'a RoutineStore,
    catalog: &Catalog,
    cohort: &Cohort,
    day: Day,
    start_time: &str,
    exclude_id: Option<&str>,
) -> Option<&'a RoutineSlot> {
    let exclude = exclude_id.map(|id| (cohort, id));
    same_cell(store, catalog, day, start_time, exclude).find(|slot| slot.belongs_to(cohort))
}

/// Rooms and teachers of the cohort's department that nobody has booked in the cell.
pub fn availability(
    store: &RoutineStore,
    catalog: &Catalog,
    cohort: &Cohort,
    day: Day,
    start_time: &str,
    exclude_id: Option<&str>,
) -> Availability {
    let exclude = exclude_id.map(|id| (cohort, id));
    let busy: Vec<&RoutineSlot> = same_cell(store, catalog, day, start_time, exclude).collect();

    let rooms: Vec<Room> = catalog
        .rooms_for_department(&cohort.department)
        .into_iter()
        .filter(|room| !busy.iter().any(|slot| slot.room_no == room.number))
        .collect();

    let teachers: Vec<Teacher> = catalog
        .teachers_for_department(&cohort.department)
        .iter()
        .filter(|teacher| !busy.iter().any(|slot| slot.teacher_id == teacher.id))
        .cloned()
        .collect();

    Availability {
        day,
        start_time: catalog.canonical_start(start_time),
        rooms,
        teachers,
    }
}
