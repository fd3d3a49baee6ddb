use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use routine_core::models::routine::Availability;

use crate::test_utils::{TestContext, slot_body};

#[tokio::test]
async fn test_busy_room_and_teacher_are_not_offered() {
    let ctx = TestContext::new();
    ctx.add("ECE", 4, slot_body("Tuesday", "10:30 AM", "11:30 AM", "Seminar Hall", "APS"))
        .await;

    let response = ctx
        .server
        .get("/api/routines/CSE/3/availability")
        .add_query_param("day", "Tuesday")
        .add_query_param("start_time", "10:30 AM")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let free = response.json::<Availability>();
    assert_eq!(free.start_time, "10:30 AM");
    assert!(!free.rooms.iter().any(|room| room.number == "Seminar Hall"));
    assert!(free.rooms.iter().any(|room| room.number == "228"));
    assert!(!free.teachers.iter().any(|teacher| teacher.id == "APS"));
    assert!(free.teachers.iter().any(|teacher| teacher.id == "RNM"));
}

#[tokio::test]
async fn test_slot_being_edited_keeps_its_resources() {
    let ctx = TestContext::new();
    let (_, slot) = ctx
        .add("CSE", 3, slot_body("Tuesday", "10:30 AM", "11:30 AM", "228", "APS"))
        .await;

    let free = ctx
        .server
        .get("/api/routines/CSE/3/availability")
        .add_query_param("day", "tue")
        .add_query_param("start_time", "10:30")
        .add_query_param("exclude_id", slot["id"].as_str().unwrap())
        .await
        .json::<Availability>();

    assert!(free.rooms.iter().any(|room| room.number == "228"));
    assert!(free.teachers.iter().any(|teacher| teacher.id == "APS"));
}

#[tokio::test]
async fn test_unknown_period_is_rejected() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get("/api/routines/CSE/3/availability")
        .add_query_param("day", "Monday")
        .add_query_param("start_time", "6:00 AM")
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}
