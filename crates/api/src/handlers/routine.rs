//! # Routine Handlers
//!
//! Reading a cohort's timetable, placing, moving and removing slots, and
//! checking a half-filled form before it is submitted.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
};
use routine_core::{
    errors::RoutineError,
    models::routine::{Cohort, RoutineSlot, RoutineStore, SlotDraft, ValidationResponse, WeeklyRoutine},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{ApiState, middleware::error_handling::AppError};

/// Query parameters for the validate endpoint
#[derive(Debug, Deserialize)]
pub struct ValidateQuery {
    /// Slot being edited; it is not checked against itself
    pub editing_id: Option<String>,
}

/// Returns every routine of every cohort.
pub async fn get_store(State(state): State<Arc<ApiState>>) -> Result<Json<RoutineStore>, AppError> {
    Ok(Json(state.service.load().await?))
}

/// Returns a cohort's routine, empty if nothing was saved for it yet.
#[axum::debug_handler]
pub async fn get_routine(
    State(state): State<Arc<ApiState>>,
    Path((department, semester)): Path<(String, u8)>,
) -> Result<Json<WeeklyRoutine>, AppError> {
    let cohort = Cohort::new(department, semester);
    Ok(Json(state.service.routine(&cohort).await?))
}

#[axum::debug_handler]
pub async fn add_slot(
    State(state): State<Arc<ApiState>>,
    Path((department, semester)): Path<(String, u8)>,
    Json(draft): Json<SlotDraft>,
) -> Result<(StatusCode, Json<RoutineSlot>), AppError> {
    let cohort = Cohort::new(department, semester);
    let slot = state.service.add_slot(&cohort, &draft).await?;
    Ok((StatusCode::CREATED, Json(slot)))
}

#[axum::debug_handler]
pub async fn update_slot(
    State(state): State<Arc<ApiState>>,
    Path((department, semester, id)): Path<(String, u8, String)>,
    Json(draft): Json<SlotDraft>,
) -> Result<Json<RoutineSlot>, AppError> {
    let cohort = Cohort::new(department, semester);
    let slot = state.service.update_slot(&cohort, &id, &draft).await?;
    Ok(Json(slot))
}

#[axum::debug_handler]
pub async fn delete_slot(
    State(state): State<Arc<ApiState>>,
    Path((department, semester, id)): Path<(String, u8, String)>,
) -> Result<StatusCode, AppError> {
    let cohort = Cohort::new(department, semester);
    state.service.delete_slot(&cohort, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Checks a draft without saving it.
///
/// A rejected draft is still a successful request: the verdict is in the body.
#[axum::debug_handler]
pub async fn validate_slot(
    State(state): State<Arc<ApiState>>,
    Path((department, semester)): Path<(String, u8)>,
    Query(query): Query<ValidateQuery>,
    Json(draft): Json<SlotDraft>,
) -> Result<Json<ValidationResponse>, AppError> {
    let cohort = Cohort::new(department, semester);
    let verdict = match state
        .service
        .check_slot(&cohort, &draft, query.editing_id.as_deref())
        .await
    {
        Ok(_) => ValidationResponse::valid(),
        Err(RoutineError::Validation(violation)) => ValidationResponse::rejected(&violation),
        Err(err) => return Err(err.into()),
    };
    Ok(Json(verdict))
}

/// Printable HTML grid of a cohort's routine.
#[axum::debug_handler]
pub async fn export_routine(
    State(state): State<Arc<ApiState>>,
    Path((department, semester)): Path<(String, u8)>,
) -> Result<Html<String>, AppError> {
    let cohort = Cohort::new(department, semester);
    Ok(Html(state.service.export_html(&cohort).await?))
}
