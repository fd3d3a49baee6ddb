use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use routine_db::mock::repositories::MockRoutineRepo;
use serde_json::{Value, json};

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_health_reports_routine_count() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({ "status": "ok", "routines": 0 }));
}

#[tokio::test]
async fn test_health_reports_unreadable_store() {
    let mut repository = MockRoutineRepo::new();
    repository
        .expect_load()
        .returning(|| Err(eyre::eyre!("database is down")));
    let ctx = TestContext::with_mock(repository);

    let response = ctx.server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_version_matches_package() {
    let ctx = TestContext::new();

    let body = ctx.server.get("/version").await.json::<Value>();

    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
