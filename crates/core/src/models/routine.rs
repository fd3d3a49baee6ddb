use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A teaching day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Day {
    pub const ALL: [Day; 5] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Day {
    type Err = String;

    /// Accepts full names and three-letter abbreviations, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Day::ALL
            .into_iter()
            .find(|day| {
                let name = day.as_str().to_ascii_lowercase();
                lower == name || (lower.len() == 3 && name.starts_with(&lower))
            })
            .ok_or_else(|| s.to_string())
    }
}

/// A (department, semester) pair identifying one weekly routine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cohort {
    pub department: String,
    pub semester: u8,
}

impl Cohort {
    pub fn new(department: impl Into<String>, semester: u8) -> Self {
        Self {
            department: department.into(),
            semester,
        }
    }

    /// Identifier of the routine stored for this cohort, e.g. `CSE-3`.
    pub fn routine_id(&self) -> String {
        format!("{}-{}", self.department, self.semester)
    }
}

impl fmt::Display for Cohort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} semester {}", self.department, self.semester)
    }
}

/// One class placed in the weekly grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineSlot {
    pub id: String,
    pub day: Day,
    pub start_time: String,
    pub end_time: String,
    pub subject_id: String,
    pub teacher_id: String,
    pub room_no: String,
    pub department: String,
    pub semester: u8,
}

impl RoutineSlot {
    pub fn cohort(&self) -> Cohort {
        Cohort::new(self.department.clone(), self.semester)
    }

    pub fn belongs_to(&self, cohort: &Cohort) -> bool {
        self.department == cohort.department && self.semester == cohort.semester
    }
}

/// All slots of a single cohort. Persisted and replaced as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyRoutine {
    pub id: String,
    pub department: String,
    pub semester: u8,
    #[serde(default)]
    pub slots: Vec<RoutineSlot>,
}

impl WeeklyRoutine {
    pub fn empty(cohort: &Cohort) -> Self {
        Self {
            id: cohort.routine_id(),
            department: cohort.department.clone(),
            semester: cohort.semester,
            slots: Vec::new(),
        }
    }

    pub fn cohort(&self) -> Cohort {
        Cohort::new(self.department.clone(), self.semester)
    }

    pub fn is_for(&self, cohort: &Cohort) -> bool {
        self.department == cohort.department && self.semester == cohort.semester
    }

    pub fn slot(&self, slot_id: &str) -> Option<&RoutineSlot> {
        self.slots.iter().find(|slot| slot.id == slot_id)
    }
}

/// The complete persisted document: every routine of every cohort.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineStore {
    #[serde(default)]
    pub routines: Vec<WeeklyRoutine>,
}

impl RoutineStore {
    pub fn routine(&self, cohort: &Cohort) -> Option<&WeeklyRoutine> {
        self.routines.iter().find(|routine| routine.is_for(cohort))
    }

    /// Replaces the routine with the same cohort key, or appends it.
    pub fn upsert(&mut self, routine: WeeklyRoutine) {
        match self
            .routines
            .iter_mut()
            .find(|existing| existing.department == routine.department && existing.semester == routine.semester)
        {
            Some(existing) => *existing = routine,
            None => self.routines.push(routine),
        }
    }

    /// Removes a slot from a cohort's routine. Returns whether anything was removed.
    pub fn remove_slot(&mut self, cohort: &Cohort, slot_id: &str) -> bool {
        let Some(routine) = self.routines.iter_mut().find(|routine| routine.is_for(cohort)) else {
            return false;
        };
        let before = routine.slots.len();
        routine.slots.retain(|slot| slot.id != slot_id);
        routine.slots.len() != before
    }

    /// Every slot of every cohort, in routine order then slot order.
    pub fn slots(&self) -> impl Iterator<Item = &RoutineSlot> {
        self.routines.iter().flat_map(|routine| routine.slots.iter())
    }
}

/// Form submission where any field may still be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotDraft {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub subject_id: Option<String>,
    #[serde(default)]
    pub teacher_id: Option<String>,
    #[serde(default)]
    pub room_no: Option<String>,
}

impl SlotDraft {
    /// Returns a field's trimmed value, treating blank strings as absent.
    pub fn value(field: &Option<String>) -> Option<&str> {
        field.as_deref().map(str::trim).filter(|value| !value.is_empty())
    }
}

impl From<&RoutineSlot> for SlotDraft {
    fn from(slot: &RoutineSlot) -> Self {
        Self {
            id: Some(slot.id.clone()),
            day: Some(slot.day.to_string()),
            start_time: Some(slot.start_time.clone()),
            end_time: Some(slot.end_time.clone()),
            subject_id: Some(slot.subject_id.clone()),
            teacher_id: Some(slot.teacher_id.clone()),
            room_no: Some(slot.room_no.clone()),
        }
    }
}

/// Rooms and teachers still free for a given grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub day: Day,
    pub start_time: String,
    pub rooms: Vec<super::catalog::Room>,
    pub teachers: Vec<super::catalog::Teacher>,
}

/// Outcome of checking a draft without saving it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflict: Option<crate::errors::ConflictingSlot>,
}

impl ValidationResponse {
    pub fn valid() -> Self {
        Self {
            valid: true,
            error: None,
            code: None,
            conflict: None,
        }
    }

    pub fn rejected(violation: &crate::errors::SlotViolation) -> Self {
        Self {
            valid: false,
            error: Some(violation.to_string()),
            code: Some(violation.code()),
            conflict: violation.conflict().cloned(),
        }
    }
}
