use axum::http::StatusCode;
use mockall::predicate;
use pretty_assertions::assert_eq;
use routine_core::models::routine::{RoutineStore, WeeklyRoutine};
use routine_db::mock::repositories::MockRoutineRepo;
use serde_json::{Value, json};

use crate::test_utils::{TestContext, slot_body};

#[test_log::test(tokio::test)]
async fn test_add_slot_then_read_routine() {
    let ctx = TestContext::new();

    let (status, slot) = ctx
        .add("CSE", 3, slot_body("Monday", "8:30 AM", "9:30 AM", "228", "APS"))
        .await;
    assert_eq!(status, 201);
    assert_eq!(slot["department"], "CSE");
    assert_eq!(slot["semester"], 3);

    let routine = ctx.server.get("/api/routines/CSE/3").await.json::<WeeklyRoutine>();
    assert_eq!(routine.id, "CSE-3");
    assert_eq!(routine.slots.len(), 1);
    assert_eq!(routine.slots[0].id, slot["id"].as_str().unwrap());
}

#[tokio::test]
async fn test_unknown_cohort_reads_as_empty_routine() {
    let ctx = TestContext::new();

    let routine = ctx.server.get("/api/routines/ECE/5").await.json::<WeeklyRoutine>();

    assert_eq!(routine.id, "ECE-5");
    assert!(routine.slots.is_empty());
}

#[tokio::test]
async fn test_room_conflict_references_existing_cohort() {
    let ctx = TestContext::new();
    ctx.add("CSE", 3, slot_body("Monday", "8:30 AM", "9:30 AM", "228", "APS"))
        .await;

    let (status, body) = ctx
        .add("IT", 5, slot_body("Monday", "8:30 AM", "9:30 AM", "228", "RNM"))
        .await;

    assert_eq!(status, 422);
    assert_eq!(body["code"], "room_conflict");
    assert_eq!(body["conflict"]["department"], "CSE");
    assert_eq!(body["conflict"]["semester"], 3);
    assert_eq!(
        body["error"],
        "Room 228 is already occupied by CSE semester 3 at this time"
    );
}

#[tokio::test]
async fn test_teacher_conflict_is_rejected() {
    let ctx = TestContext::new();
    ctx.add("CSE", 3, slot_body("Monday", "8:30 AM", "9:30 AM", "228", "APS"))
        .await;

    let (status, body) = ctx
        .add("IT", 5, slot_body("Monday", "8:30 AM", "9:30 AM", "229", "APS"))
        .await;

    assert_eq!(status, 422);
    assert_eq!(body["code"], "teacher_conflict");
    assert_eq!(body["conflict"]["department"], "CSE");
}

#[tokio::test]
async fn test_unknown_teacher_is_invalid_reference() {
    let ctx = TestContext::new();

    let (status, body) = ctx
        .add("CSE", 3, slot_body("Monday", "8:30 AM", "9:30 AM", "228", "ZZZ"))
        .await;

    assert_eq!(status, 422);
    assert_eq!(body["code"], "invalid_reference");
    assert_eq!(body["conflict"], Value::Null);
}

#[tokio::test]
async fn test_missing_field_is_reported() {
    let ctx = TestContext::new();

    let (status, body) = ctx
        .add("CSE", 3, json!({ "day": "Monday", "startTime": "8:30 AM", "endTime": "9:30 AM" }))
        .await;

    assert_eq!(status, 422);
    assert_eq!(body["code"], "missing_field");
    assert_eq!(body["error"], "Subject is required");
}

#[tokio::test]
async fn test_edit_in_place_does_not_conflict_with_itself() {
    let ctx = TestContext::new();
    let (_, slot) = ctx
        .add("CSE", 3, slot_body("Monday", "8:30 AM", "9:30 AM", "228", "APS"))
        .await;
    let id = slot["id"].as_str().unwrap();

    let response = ctx
        .server
        .put(&format!("/api/routines/CSE/3/slots/{id}"))
        .json(&slot_body("Monday", "8:30 AM", "9:30 AM", "228", "APS"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["id"], id);
}

#[tokio::test]
async fn test_update_unknown_slot_is_not_found() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .put("/api/routines/CSE/3/slots/nope")
        .json(&slot_body("Monday", "8:30 AM", "9:30 AM", "228", "APS"))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_clears_conflict() {
    let ctx = TestContext::new();
    let (_, slot) = ctx
        .add("CSE", 3, slot_body("Monday", "8:30 AM", "9:30 AM", "228", "APS"))
        .await;
    let id = slot["id"].as_str().unwrap();

    let response = ctx
        .server
        .delete(&format!("/api/routines/CSE/3/slots/{id}"))
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let conflicts = ctx
        .server
        .get("/api/conflicts")
        .add_query_param("day", "Monday")
        .add_query_param("start_time", "8:30 AM")
        .add_query_param("room_no", "228")
        .await
        .json::<Vec<Value>>();
    assert!(conflicts.is_empty());
}

#[tokio::test]
async fn test_conflict_query_lists_colliding_slots() {
    let ctx = TestContext::new();
    ctx.add("CSE", 3, slot_body("Monday", "8:30 AM", "9:30 AM", "228", "APS"))
        .await;
    ctx.add("ECE", 3, slot_body("Monday", "8:30 AM", "9:30 AM", "123", "NMD"))
        .await;

    let response = ctx
        .server
        .get("/api/conflicts")
        .add_query_param("day", "mon")
        .add_query_param("start_time", "08:30")
        .add_query_param("teacher_id", "NMD")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let conflicts = response.json::<Vec<Value>>();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0]["department"], "ECE");
}

#[tokio::test]
async fn test_conflict_query_rejects_unknown_day() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get("/api/conflicts")
        .add_query_param("day", "Sunday")
        .add_query_param("start_time", "8:30 AM")
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

fn store_sharing_slot_id() -> RoutineStore {
    let slot = |department: &str, semester: u8, start: &str, end: &str, room: &str| {
        json!({
            "id": "x",
            "day": "Monday",
            "startTime": start,
            "endTime": end,
            "subjectId": "UCSE301",
            "teacherId": "APS",
            "roomNo": room,
            "department": department,
            "semester": semester,
        })
    };
    serde_json::from_value(json!({
        "routines": [
            { "id": "CSE-1", "department": "CSE", "semester": 1,
              "slots": [slot("CSE", 1, "8:30 AM", "9:30 AM", "228")] },
            { "id": "CSE-3", "department": "CSE", "semester": 3,
              "slots": [slot("CSE", 3, "8:30 AM", "9:30 AM", "229")] },
        ]
    }))
    .unwrap()
}

#[tokio::test]
async fn test_conflict_exclusion_is_scoped_to_cohort() {
    let ctx = TestContext::with_store(store_sharing_slot_id());

    let response = ctx
        .server
        .get("/api/conflicts")
        .add_query_param("day", "Monday")
        .add_query_param("start_time", "8:30 AM")
        .add_query_param("teacher_id", "APS")
        .add_query_param("department", "CSE")
        .add_query_param("semester", "1")
        .add_query_param("exclude_id", "x")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let conflicts = response.json::<Vec<Value>>();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0]["semester"], 3);
}

#[tokio::test]
async fn test_conflict_exclusion_without_cohort_is_bad_request() {
    let ctx = TestContext::with_store(store_sharing_slot_id());

    let response = ctx
        .server
        .get("/api/conflicts")
        .add_query_param("day", "Monday")
        .add_query_param("start_time", "8:30 AM")
        .add_query_param("teacher_id", "APS")
        .add_query_param("exclude_id", "x")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_edit_cannot_double_book_through_shared_id() {
    let ctx = TestContext::with_store(store_sharing_slot_id());

    let response = ctx
        .server
        .put("/api/routines/CSE/1/slots/x")
        .json(&slot_body("Monday", "8:30 AM", "9:30 AM", "229", "APS"))
        .await;

    // CSE-1's own slot x is the one being moved, so only CSE-3 can clash.
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response.json::<Value>();
    assert_eq!(body["code"], "teacher_conflict");
    assert_eq!(body["conflict"]["semester"], 3);
}

#[tokio::test]
async fn test_validate_reports_verdict_without_saving() {
    let ctx = TestContext::new();
    ctx.add("CSE", 3, slot_body("Monday", "8:30 AM", "9:30 AM", "228", "APS"))
        .await;

    let rejected = ctx
        .server
        .post("/api/routines/IT/5/validate")
        .json(&slot_body("Monday", "8:30 AM", "9:30 AM", "228", "RNM"))
        .await;
    assert_eq!(rejected.status_code(), StatusCode::OK);
    let verdict = rejected.json::<Value>();
    assert_eq!(verdict["valid"], false);
    assert_eq!(verdict["code"], "room_conflict");

    let accepted = ctx
        .server
        .post("/api/routines/IT/5/validate")
        .json(&slot_body("Monday", "8:30 AM", "9:30 AM", "229", "RNM"))
        .await
        .json::<Value>();
    assert_eq!(accepted, json!({ "valid": true }));

    let store = ctx.server.get("/api/routines").await.json::<RoutineStore>();
    assert_eq!(store.slots().count(), 1);
}

#[tokio::test]
async fn test_validate_honours_editing_id() {
    let ctx = TestContext::new();
    let (_, slot) = ctx
        .add("CSE", 3, slot_body("Monday", "8:30 AM", "9:30 AM", "228", "APS"))
        .await;

    let verdict = ctx
        .server
        .post("/api/routines/CSE/3/validate")
        .add_query_param("editing_id", slot["id"].as_str().unwrap())
        .json(&slot_body("Monday", "8:30 AM", "9:30 AM", "228", "APS"))
        .await
        .json::<Value>();

    assert_eq!(verdict["valid"], true);
}

#[tokio::test]
async fn test_export_returns_printable_html() {
    let ctx = TestContext::new();
    ctx.add("CSE", 3, slot_body("Friday", "4:30 PM", "5:30 PM", "304", "HKK"))
        .await;

    let response = ctx.server.get("/api/routines/CSE/3/export").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let html = response.text();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Teacher: HKK"));
}

#[tokio::test]
async fn test_storage_failure_returns_generic_message() {
    let mut repository = MockRoutineRepo::new();
    repository
        .expect_load()
        .returning(|| Ok(RoutineStore::default()));
    repository
        .expect_save()
        .with(predicate::function(|routine: &WeeklyRoutine| routine.id == "CSE-3"))
        .times(1)
        .returning(|_| Err(eyre::eyre!("connection refused")));
    let ctx = TestContext::with_mock(repository);

    let (status, body) = ctx
        .add("CSE", 3, slot_body("Monday", "8:30 AM", "9:30 AM", "228", "APS"))
        .await;

    assert_eq!(status, 500);
    assert_eq!(body["error"], "Failed to save routine");
}
