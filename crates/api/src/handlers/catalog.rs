use axum::{
    Json,
    extract::{Query, State},
};
use routine_core::models::{
    catalog::{Room, Subject, Teacher},
    time_slot::TimeSlot,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::ApiState;

#[derive(Debug, Deserialize)]
pub struct DepartmentQuery {
    pub department: String,
}

#[derive(Debug, Deserialize)]
pub struct SubjectQuery {
    pub department: String,
    pub semester: u8,
}

pub async fn list_departments(State(state): State<Arc<ApiState>>) -> Json<Vec<String>> {
    Json(state.service.catalog().departments().map(str::to_string).collect())
}

pub async fn list_rooms(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<DepartmentQuery>,
) -> Json<Vec<Room>> {
    Json(state.service.catalog().rooms_for_department(&query.department))
}

pub async fn list_teachers(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<DepartmentQuery>,
) -> Json<Vec<Teacher>> {
    Json(state.service.catalog().teachers_for_department(&query.department).to_vec())
}

pub async fn list_subjects(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<SubjectQuery>,
) -> Json<Vec<Subject>> {
    Json(
        state
            .service
            .catalog()
            .subjects_for_semester(&query.department, query.semester)
            .to_vec(),
    )
}

pub async fn list_time_slots(State(state): State<Arc<ApiState>>) -> Json<Vec<TimeSlot>> {
    Json(state.service.catalog().time_slots().to_vec())
}
