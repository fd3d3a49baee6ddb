pub mod availability;
pub mod catalog;
pub mod conflict;
pub mod routine;

use routine_core::{
    errors::{SlotField, SlotViolation},
    models::routine::Day,
};

/// Parses a day from a path or query parameter.
pub(crate) fn parse_day(raw: &str) -> Result<Day, SlotViolation> {
    raw.parse().map_err(|_| SlotViolation::InvalidReference {
        field: SlotField::Day,
        value: raw.to_string(),
    })
}
