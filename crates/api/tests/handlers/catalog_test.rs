use pretty_assertions::assert_eq;
use routine_core::models::{
    catalog::{Room, Subject, Teacher},
    time_slot::TimeSlot,
};

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_departments_are_listed() {
    let ctx = TestContext::new();

    let departments = ctx.server.get("/api/catalog/departments").await.json::<Vec<String>>();

    assert_eq!(departments, vec!["CE", "CSE", "ECE", "IE", "IT"]);
}

#[tokio::test]
async fn test_rooms_include_borrowed_and_shared() {
    let ctx = TestContext::new();

    let rooms = ctx
        .server
        .get("/api/catalog/rooms")
        .add_query_param("department", "IT")
        .await
        .json::<Vec<Room>>();

    assert!(rooms.iter().any(|room| room.number == "230"));
    assert!(rooms.iter().any(|room| room.number == "G1"));
}

#[tokio::test]
async fn test_teachers_and_subjects_by_department() {
    let ctx = TestContext::new();

    let teachers = ctx
        .server
        .get("/api/catalog/teachers")
        .add_query_param("department", "IE")
        .await
        .json::<Vec<Teacher>>();
    let subjects = ctx
        .server
        .get("/api/catalog/subjects")
        .add_query_param("department", "CSE")
        .add_query_param("semester", 6)
        .await
        .json::<Vec<Subject>>();

    assert_eq!(teachers.len(), 6);
    assert!(subjects.iter().any(|subject| subject.name == "Compiler Design"));
}

#[tokio::test]
async fn test_time_slots_are_in_order() {
    let ctx = TestContext::new();

    let slots = ctx.server.get("/api/catalog/time-slots").await.json::<Vec<TimeSlot>>();

    let starts: Vec<_> = slots.iter().map(|slot| slot.start.as_str()).collect();
    assert_eq!(
        starts,
        vec!["8:30 AM", "9:30 AM", "10:30 AM", "11:30 AM", "1:30 PM", "2:30 PM", "3:30 PM", "4:30 PM"]
    );
}
