use serde::Serialize;
use thiserror::Error;

use crate::models::routine::{Cohort, Day};

/// Form fields that must be filled before a slot is checked any further.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SlotField {
    Day,
    StartTime,
    EndTime,
    SubjectId,
    TeacherId,
    RoomNo,
}

impl SlotField {
    pub fn label(&self) -> &'static str {
        match self {
            SlotField::Day => "Day",
            SlotField::StartTime => "Start time",
            SlotField::EndTime => "End time",
            SlotField::SubjectId => "Subject",
            SlotField::TeacherId => "Teacher",
            SlotField::RoomNo => "Room number",
        }
    }
}

/// The assignment a rejected slot collided with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictingSlot {
    pub slot_id: String,
    pub department: String,
    pub semester: u8,
}

impl ConflictingSlot {
    pub fn cohort(&self) -> Cohort {
        Cohort::new(self.department.clone(), self.semester)
    }
}

/// Why a submitted slot cannot be placed in the timetable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotViolation {
    #[error("{} is required", .0.label())]
    MissingField(SlotField),

    #[error("{} '{value}' does not exist", .field.label())]
    InvalidReference { field: SlotField, value: String },

    #[error("End time '{end}' must be a slot end after start time '{start}'")]
    InvalidTimeRange { start: String, end: String },

    #[error("This time slot is already occupied ({day} {start_time})")]
    CellOccupied {
        day: Day,
        start_time: String,
        existing: ConflictingSlot,
    },

    #[error(
        "Teacher {teacher_id} is already assigned to {} semester {} at this time",
        .existing.department, .existing.semester
    )]
    TeacherConflict {
        teacher_id: String,
        existing: ConflictingSlot,
    },

    #[error(
        "Room {room_no} is already occupied by {} semester {} at this time",
        .existing.department, .existing.semester
    )]
    RoomConflict {
        room_no: String,
        existing: ConflictingSlot,
    },
}

impl SlotViolation {
    /// Stable machine-readable code for clients.
    pub fn code(&self) -> &'static str {
        match self {
            SlotViolation::MissingField(_) => "missing_field",
            SlotViolation::InvalidReference { .. } => "invalid_reference",
            SlotViolation::InvalidTimeRange { .. } => "invalid_time_range",
            SlotViolation::CellOccupied { .. } => "cell_occupied",
            SlotViolation::TeacherConflict { .. } => "teacher_conflict",
            SlotViolation::RoomConflict { .. } => "room_conflict",
        }
    }

    /// The existing assignment involved, for violations caused by one.
    pub fn conflict(&self) -> Option<&ConflictingSlot> {
        match self {
            SlotViolation::CellOccupied { existing, .. }
            | SlotViolation::TeacherConflict { existing, .. }
            | SlotViolation::RoomConflict { existing, .. } => Some(existing),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum RoutineError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Validation(#[from] SlotViolation),

    #[error("{0}")]
    Storage(eyre::Report),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

pub type RoutineResult<T> = Result<T, RoutineError>;
