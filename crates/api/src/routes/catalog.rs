use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/catalog/departments", get(handlers::catalog::list_departments))
        .route("/api/catalog/rooms", get(handlers::catalog::list_rooms))
        .route("/api/catalog/teachers", get(handlers::catalog::list_teachers))
        .route("/api/catalog/subjects", get(handlers::catalog::list_subjects))
        .route("/api/catalog/time-slots", get(handlers::catalog::list_time_slots))
}
