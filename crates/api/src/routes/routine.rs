use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/routines", get(handlers::routine::get_store))
        .route(
            "/api/routines/:department/:semester",
            get(handlers::routine::get_routine),
        )
        .route(
            "/api/routines/:department/:semester/slots",
            post(handlers::routine::add_slot),
        )
        .route(
            "/api/routines/:department/:semester/slots/:id",
            put(handlers::routine::update_slot).delete(handlers::routine::delete_slot),
        )
        .route(
            "/api/routines/:department/:semester/validate",
            post(handlers::routine::validate_slot),
        )
        .route(
            "/api/routines/:department/:semester/export",
            get(handlers::routine::export_routine),
        )
}
