//! # Availability Handlers
//!
//! Recomputes which rooms and teachers are still free while a slot form is
//! being filled in. A room or teacher is free in a cell when no cohort has
//! booked it there; the slot being edited does not count against itself.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use routine_core::models::routine::{Availability, Cohort};
use serde::Deserialize;
use std::sync::Arc;

use super::parse_day;
use crate::{ApiState, middleware::error_handling::AppError};

/// Query parameters for the availability endpoint
///
/// * `day` - Teaching day, e.g. `Monday` or `mon`
/// * `start_time` - Period start, e.g. `8:30 AM`
/// * `exclude_id` - Slot being edited
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub day: String,
    pub start_time: String,
    pub exclude_id: Option<String>,
}

pub async fn get_availability(
    State(state): State<Arc<ApiState>>,
    Path((department, semester)): Path<(String, u8)>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Availability>, AppError> {
    let cohort = Cohort::new(department, semester);
    let day = parse_day(&query.day)?;

    let availability = state
        .service
        .availability(&cohort, day, &query.start_time, query.exclude_id.as_deref())
        .await?;

    Ok(Json(availability))
}
