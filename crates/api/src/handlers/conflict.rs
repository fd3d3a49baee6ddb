use axum::{
    Json,
    extract::{Query, State},
};
use routine_core::{
    conflict::ConflictQuery,
    errors::RoutineError,
    models::routine::{Cohort, RoutineSlot},
};
use serde::Deserialize;
use std::sync::Arc;

use super::parse_day;
use crate::{ApiState, middleware::error_handling::AppError};

/// Query parameters for the conflict lookup
///
/// ```text
/// GET /api/conflicts?day=Monday&start_time=8:30 AM&room_no=228&teacher_id=APS
/// GET /api/conflicts?day=Monday&start_time=8:30 AM&room_no=228&department=CSE&semester=3&exclude_id=17
/// ```
///
/// Slot ids repeat across cohorts, so `exclude_id` needs `department` and `semester`.
#[derive(Debug, Deserialize)]
pub struct ConflictParams {
    pub day: String,
    pub start_time: String,
    pub room_no: Option<String>,
    pub teacher_id: Option<String>,
    pub department: Option<String>,
    pub semester: Option<u8>,
    pub exclude_id: Option<String>,
}

/// Lists every slot, in any cohort, using the room or the teacher in the cell.
pub async fn find_conflicts(
    State(state): State<Arc<ApiState>>,
    Query(params): Query<ConflictParams>,
) -> Result<Json<Vec<RoutineSlot>>, AppError> {
    let exclude = match (params.exclude_id, params.department, params.semester) {
        (None, _, _) => None,
        (Some(id), Some(department), Some(semester)) => Some((Cohort::new(department, semester), id)),
        (Some(_), _, _) => {
            return Err(RoutineError::BadRequest(
                "exclude_id needs department and semester".to_string(),
            )
            .into());
        }
    };

    let query = ConflictQuery {
        day: parse_day(&params.day)?,
        start_time: params.start_time,
        room_no: params.room_no,
        teacher_id: params.teacher_id,
        exclude,
    };

    Ok(Json(state.service.find_conflicts(&query).await?))
}
