//! Static reference data: rooms, teachers, subjects and the teaching periods.
//!
//! The catalog is read-only at runtime. It ships embedded in the crate and can
//! be replaced by an operator-supplied JSON document of the same shape.

use std::{collections::BTreeMap, path::Path};

use chrono::NaiveTime;
use eyre::{Result, WrapErr, eyre};
use serde::{Deserialize, Serialize};

use crate::models::{
    catalog::{Room, Subject, Teacher},
    time_slot::{TimeSlot, time_label_candidates},
};

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentCatalog {
    #[serde(default)]
    pub classrooms: Vec<Room>,
    /// Labs and other rooms owned by the department.
    #[serde(default)]
    pub shared: Vec<Room>,
    /// Departments whose classrooms this one also teaches in.
    #[serde(default)]
    pub borrows: Vec<String>,
    #[serde(default)]
    pub teachers: Vec<Teacher>,
    #[serde(default)]
    pub subjects: BTreeMap<u8, Vec<Subject>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub departments: BTreeMap<String, DepartmentCatalog>,
    #[serde(default)]
    pub shared_locations: Vec<Room>,
    pub time_slots: Vec<TimeSlot>,
}

impl Catalog {
    /// The catalog compiled into the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG).wrap_err("Built-in catalog is malformed")
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read catalog from {}", path.display()))?;
        Self::from_json(&raw).wrap_err_with(|| format!("Invalid catalog in {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(raw)?;
        catalog.check()?;
        Ok(catalog)
    }

    /// Every slot label must parse, and slots must run strictly forward in time.
    fn check(&self) -> Result<()> {
        if self.time_slots.is_empty() {
            return Err(eyre!("catalog defines no time slots"));
        }
        let mut previous_end = None;
        for slot in &self.time_slots {
            let start = slot
                .start_time()
                .ok_or_else(|| eyre!("unreadable slot start '{}'", slot.start))?;
            let end = slot
                .end_time()
                .ok_or_else(|| eyre!("unreadable slot end '{}'", slot.end))?;
            if end <= start {
                return Err(eyre!("slot {} ends before it starts", slot.display));
            }
            if previous_end.is_some_and(|previous| start < previous) {
                return Err(eyre!("slot {} overlaps the previous slot", slot.display));
            }
            previous_end = Some(end);
        }
        Ok(())
    }

    pub fn departments(&self) -> impl Iterator<Item = &str> {
        self.departments.keys().map(String::as_str)
    }

    pub fn time_slots(&self) -> &[TimeSlot] {
        &self.time_slots
    }

    fn find_period(&self, label: &str, time_of: fn(&TimeSlot) -> Option<NaiveTime>) -> Option<&TimeSlot> {
        time_label_candidates(label).into_iter().find_map(|time| {
            self.time_slots
                .iter()
                .find(|slot| time_of(slot) == Some(time))
        })
    }

    /// Finds the slot starting at `label`, accepting any clock style.
    ///
    /// `2:30` matches a `2:30 PM` period when the day has no `2:30 AM` one.
    pub fn time_slot(&self, label: &str) -> Option<&TimeSlot> {
        self.find_period(label, TimeSlot::start_time)
    }

    /// Finds the slot ending at `label`.
    pub fn time_slot_ending(&self, label: &str) -> Option<&TimeSlot> {
        self.find_period(label, TimeSlot::end_time)
    }

    /// Rewrites a start label to its catalog spelling, leaving unknown labels as-is.
    pub fn canonical_start(&self, label: &str) -> String {
        self.time_slot(label)
            .map(|slot| slot.start.clone())
            .unwrap_or_else(|| label.trim().to_string())
    }

    pub fn is_valid_room(&self, room_no: &str) -> bool {
        self.departments
            .values()
            .flat_map(|dept| dept.classrooms.iter().chain(dept.shared.iter()))
            .chain(self.shared_locations.iter())
            .any(|room| room.number == room_no)
    }

    pub fn is_valid_teacher(&self, teacher_id: &str) -> bool {
        self.departments
            .values()
            .flat_map(|dept| dept.teachers.iter())
            .any(|teacher| teacher.id == teacher_id)
    }

    /// Rooms a department may book: its own, those it borrows, then campus-wide locations.
    pub fn rooms_for_department(&self, department: &str) -> Vec<Room> {
        let Some(dept) = self.departments.get(department) else {
            return Vec::new();
        };

        let borrowed = dept
            .borrows
            .iter()
            .filter_map(|other| self.departments.get(other))
            .flat_map(|other| other.classrooms.iter());

        let mut rooms: Vec<Room> = Vec::new();
        for room in dept
            .classrooms
            .iter()
            .chain(dept.shared.iter())
            .chain(borrowed)
            .chain(self.shared_locations.iter())
        {
            if !rooms.iter().any(|known| known.number == room.number) {
                rooms.push(room.clone());
            }
        }
        rooms
    }

    pub fn teachers_for_department(&self, department: &str) -> &[Teacher] {
        self.departments
            .get(department)
            .map(|dept| dept.teachers.as_slice())
            .unwrap_or_default()
    }

    pub fn subjects_for_semester(&self, department: &str, semester: u8) -> &[Subject] {
        self.departments
            .get(department)
            .and_then(|dept| dept.subjects.get(&semester))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// `CODE - Name` for known subjects, otherwise the code itself.
    pub fn subject_label(&self, code: &str) -> String {
        self.departments
            .values()
            .flat_map(|dept| dept.subjects.values().flatten())
            .find(|subject| subject.code == code)
            .map(|subject| format!("{} - {}", subject.code, subject.name))
            .unwrap_or_else(|| code.to_string())
    }
}
