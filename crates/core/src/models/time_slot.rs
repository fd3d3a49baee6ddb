use chrono::{Duration, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// One fixed teaching period of the day, e.g. `8:30 AM` to `9:30 AM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: String,
    pub end: String,
    pub display: String,
}

impl TimeSlot {
    pub fn start_time(&self) -> Option<NaiveTime> {
        parse_time_label(&self.start)
    }

    pub fn end_time(&self) -> Option<NaiveTime> {
        parse_time_label(&self.end)
    }
}

/// Parses a clock label such as `8:30 AM`, `08:30` or `13:30`.
pub fn parse_time_label(label: &str) -> Option<NaiveTime> {
    let label = label.trim().to_ascii_uppercase();
    NaiveTime::parse_from_str(&label, "%I:%M %p")
        .or_else(|_| NaiveTime::parse_from_str(&label, "%I:%M%p"))
        .or_else(|_| NaiveTime::parse_from_str(&label, "%H:%M"))
        .ok()
}

/// Every time a clock label could name, most literal reading first.
///
/// A bare `H:MM` without AM/PM or a leading zero may be morning or afternoon,
/// so `2:30` yields both 02:30 and 14:30.
pub fn time_label_candidates(label: &str) -> Vec<NaiveTime> {
    let Some(time) = parse_time_label(label) else {
        return Vec::new();
    };
    let label = label.trim().to_ascii_uppercase();
    let bare = !label.ends_with('M') && !label.starts_with('0') && (1..12).contains(&time.hour());
    if bare {
        vec![time, time + Duration::hours(12)]
    } else {
        vec![time]
    }
}
