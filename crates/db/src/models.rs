use chrono::{DateTime, Utc};
use routine_core::models::routine::RoutineStore;
use sqlx::{FromRow, types::Json};

/// Key under which the timetable document is stored.
pub const STORE_KEY: &str = "class-routine-data";

#[derive(Debug, Clone, FromRow)]
pub struct DbRoutineDocument {
    pub key: String,
    pub data: Json<RoutineStore>,
    pub updated_at: DateTime<Utc>,
}
