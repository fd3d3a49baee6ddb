//! Slot validation.
//!
//! Rules run in a fixed order and stop at the first failure:
//!
//! 1. every required field is filled in
//! 2. day, period, teacher and room refer to something in the catalog
//! 3. the cohort does not already have a class in the cell
//! 4. the teacher is not teaching anywhere else in the cell
//! 5. the room is not used by anyone else in the cell
//!
//! The slot being edited is ignored by rules 3 to 5.

use tracing::debug;

use crate::{
    catalog::Catalog,
    conflict::{ConflictQuery, cell_occupant, find_conflicts},
    errors::{ConflictingSlot, SlotField, SlotViolation},
    models::routine::{Cohort, Day, RoutineSlot, RoutineStore, SlotDraft},
};

/// A draft that passed validation, with every value in canonical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedSlot {
    pub day: Day,
    pub start_time: String,
    pub end_time: String,
    pub subject_id: String,
    pub teacher_id: String,
    pub room_no: String,
}

impl CheckedSlot {
    pub fn into_routine_slot(self, id: String, cohort: &Cohort) -> RoutineSlot {
        RoutineSlot {
            id,
            day: self.day,
            start_time: self.start_time,
            end_time: self.end_time,
            subject_id: self.subject_id,
            teacher_id: self.teacher_id,
            room_no: self.room_no,
            department: cohort.department.clone(),
            semester: cohort.semester,
        }
    }
}

struct Required<'a> {
    day: &'a str,
    start_time: &'a str,
    end_time: &'a str,
    subject_id: &'a str,
    teacher_id: &'a str,
    room_no: &'a str,
}

fn required(draft: &SlotDraft) -> Result<Required<'_>, SlotViolation> {
    fn field(value: &Option<String>, field: SlotField) -> Result<&str, SlotViolation> {
        SlotDraft::value(value).ok_or(SlotViolation::MissingField(field))
    }

    Ok(Required {
        day: field(&draft.day, SlotField::Day)?,
        start_time: field(&draft.start_time, SlotField::StartTime)?,
        end_time: field(&draft.end_time, SlotField::EndTime)?,
        subject_id: field(&draft.subject_id, SlotField::SubjectId)?,
        teacher_id: field(&draft.teacher_id, SlotField::TeacherId)?,
        room_no: field(&draft.room_no, SlotField::RoomNo)?,
    })
}

fn invalid(field: SlotField, value: &str) -> SlotViolation {
    SlotViolation::InvalidReference {
        field,
        value: value.to_string(),
    }
}

fn conflicting(slot: &RoutineSlot) -> ConflictingSlot {
    ConflictingSlot {
        slot_id: slot.id.clone(),
        department: slot.department.clone(),
        semester: slot.semester,
    }
}

fn resolve_times(
    catalog: &Catalog,
    start_label: &str,
    end_label: &str,
) -> Result<(String, String), SlotViolation> {
    let start = catalog
        .time_slot(start_label)
        .ok_or_else(|| invalid(SlotField::StartTime, start_label))?;

    let range_error = || SlotViolation::InvalidTimeRange {
        start: start.start.clone(),
        end: end_label.to_string(),
    };
    let end = catalog.time_slot_ending(end_label).ok_or_else(range_error)?;

    if end.end_time() <= start.start_time() {
        return Err(range_error());
    }

    Ok((start.start.clone(), end.end.clone()))
}

/// Checks a draft for `cohort` against everything already in `store`.
///
/// `editing_id` names the slot being replaced, if any.
pub fn validate_slot(
    draft: &SlotDraft,
    cohort: &Cohort,
    editing_id: Option<&str>,
    store: &RoutineStore,
    catalog: &Catalog,
) -> Result<CheckedSlot, SlotViolation> {
    let fields = required(draft)?;

    let day: Day = fields
        .day
        .parse()
        .map_err(|_| invalid(SlotField::Day, fields.day))?;
    let (start_time, end_time) = resolve_times(catalog, fields.start_time, fields.end_time)?;
    if !catalog.is_valid_teacher(fields.teacher_id) {
        return Err(invalid(SlotField::TeacherId, fields.teacher_id));
    }
    if !catalog.is_valid_room(fields.room_no) {
        return Err(invalid(SlotField::RoomNo, fields.room_no));
    }

    if let Some(occupant) = cell_occupant(store, catalog, cohort, day, &start_time, editing_id) {
        return Err(SlotViolation::CellOccupied {
            day,
            start_time,
            existing: conflicting(occupant),
        });
    }

    let mut query = ConflictQuery::new(day, start_time.clone())
        .room(fields.room_no)
        .teacher(fields.teacher_id);
    if let Some(id) = editing_id {
        query = query.excluding(cohort.clone(), id);
    }
    let conflicts = find_conflicts(store, catalog, &query);

    if let Some(slot) = conflicts.iter().find(|slot| slot.teacher_id == fields.teacher_id) {
        return Err(SlotViolation::TeacherConflict {
            teacher_id: fields.teacher_id.to_string(),
            existing: conflicting(slot),
        });
    }
    if let Some(slot) = conflicts.iter().find(|slot| slot.room_no == fields.room_no) {
        return Err(SlotViolation::RoomConflict {
            room_no: fields.room_no.to_string(),
            existing: conflicting(slot),
        });
    }

    debug!(%cohort, %day, start = %start_time, "slot passed validation");

    Ok(CheckedSlot {
        day,
        start_time,
        end_time,
        subject_id: fields.subject_id.to_string(),
        teacher_id: fields.teacher_id.to_string(),
        room_no: fields.room_no.to_string(),
    })
}

/// Returns every pair of slots that break the no-double-booking invariant.
///
/// Empty for any store built only through [`validate_slot`].
pub fn audit(store: &RoutineStore, catalog: &Catalog) -> Vec<(RoutineSlot, RoutineSlot)> {
    let slots: Vec<&RoutineSlot> = store.slots().collect();
    let mut clashes = Vec::new();
    for (index, first) in slots.iter().enumerate() {
        for second in &slots[index + 1..] {
            let same_cell = first.day == second.day
                && catalog.canonical_start(&first.start_time) == catalog.canonical_start(&second.start_time);
            if same_cell && (first.room_no == second.room_no || first.teacher_id == second.teacher_id) {
                clashes.push(((*first).clone(), (*second).clone()));
            }
        }
    }
    clashes
}
