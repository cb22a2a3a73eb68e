//! HTTP router tests
//!
//! The first group runs without a database: authentication and field rules
//! reject requests before any query is made. The second group needs one.

mod helpers;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use helpers::*;
use serde_json::{json, Value};
use serial_test::serial;
use tower::ServiceExt;
use RetakeManager::models::Role;
use RetakeManager::{build_router, AppState};

fn offline_router() -> Router {
    let pool = sqlx::PgPool::connect_lazy("postgresql://localhost:1/unreachable").unwrap();
    build_router(AppState::new(pool, test_settings()))
}

fn get(uri: &str, user_id: Option<i32>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(id) = user_id {
        builder = builder.header("x-user-id", id.to_string());
    }
    builder.body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_missing_identity_is_unauthorized() {
    let response = offline_router().oneshot(get("/institutes", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Authentication required");
}

#[tokio::test]
async fn test_malformed_identity_is_unauthorized() {
    let request = Request::builder()
        .uri("/auth/profile")
        .header("x-user-id", "admin")
        .body(Body::empty())
        .unwrap();
    let response = offline_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_reports_every_field_error() {
    let payload = json!({
        "name": "",
        "surname": "Ivanova",
        "lastname": "",
        "login": "mivanova",
        "email": "not-an-email",
        "password": ""
    });
    let response = offline_router().oneshot(post_json("/auth/register", payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(body["error"], "validation_failed");
    let fields: Vec<&str> = body["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["name", "lastname", "password", "email"]);
}

#[tokio::test]
async fn test_register_refuses_admin_role() {
    let payload = json!({
        "name": "Oleg",
        "surname": "Sidorov",
        "lastname": "Petrovich",
        "login": "osidorov",
        "email": "osidorov@example.edu",
        "password": "Secret123",
        "role": "ROLE_ADMIN"
    });
    let response = offline_router().oneshot(post_json("/auth/register", payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let request = Request::builder()
        .uri("/institutes")
        .header("x-request-id", "req-42")
        .body(Body::empty())
        .unwrap();
    let response = offline_router().oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "req-42");

    let response = offline_router().oneshot(get("/institutes", None)).await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

macro_rules! context {
    () => {
        match TestContext::new().await {
            Some(ctx) => ctx,
            None => return,
        }
    };
}

#[tokio::test]
#[serial]
async fn test_roles_guard_admin_and_personal_routes() {
    let ctx = context!();
    let catalog = ctx.catalog().await;
    let student = ctx.student(&catalog).await;
    let other = ctx.student(&catalog).await;
    let router = build_router(AppState::new(ctx.database.pool.clone(), ctx.settings.clone()));

    let admin_list = router.clone().oneshot(get("/institutes", Some(catalog.admin.id))).await.unwrap();
    assert_eq!(admin_list.status(), StatusCode::OK);
    assert_eq!(body_json(admin_list).await.as_array().unwrap().len(), 1);

    let student_list = router.clone().oneshot(get("/institutes", Some(student.id))).await.unwrap();
    assert_eq!(student_list.status(), StatusCode::FORBIDDEN);

    let own = router.clone().oneshot(get("/auth/profile", Some(student.id))).await.unwrap();
    assert_eq!(own.status(), StatusCode::OK);
    let body = body_json(own).await;
    assert_eq!(body["id"], student.id);
    assert!(body.get("password").is_none());

    let foreign = router
        .clone()
        .oneshot(get(&format!("/auth/profile/{}", other.id), Some(student.id)))
        .await
        .unwrap();
    assert_eq!(foreign.status(), StatusCode::FORBIDDEN);

    let by_admin = router
        .clone()
        .oneshot(get(&format!("/auth/retakesInfo/{}", other.id), Some(catalog.admin.id)))
        .await
        .unwrap();
    assert_eq!(by_admin.status(), StatusCode::OK);
    assert_eq!(body_json(by_admin).await["untreated"], true);

    let unknown = router.clone().oneshot(get("/auth/profile", Some(9999))).await.unwrap();
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);

    let missing = router
        .oneshot(get("/institutes/9999", Some(catalog.admin.id)))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
async fn test_only_the_events_teacher_may_grade() {
    let ctx = context!();
    let catalog = ctx.catalog().await;
    let other_teacher = ctx
        .services
        .registration
        .register(&user_request(Role::Teacher))
        .await
        .unwrap();
    let event = ctx
        .services
        .events
        .create(&event_request(catalog.algebra.id, catalog.teacher.id, catalog.cabinet_id, 1, 10))
        .await
        .unwrap();
    let router = build_router(AppState::new(ctx.database.pool.clone(), ctx.settings.clone()));

    let uri = format!("/auth/checkRetake/{}", event.id);
    let own = router.clone().oneshot(get(&uri, Some(catalog.teacher.id))).await.unwrap();
    assert_eq!(own.status(), StatusCode::OK);

    let foreign = router.clone().oneshot(get(&uri, Some(other_teacher.id))).await.unwrap();
    assert_eq!(foreign.status(), StatusCode::FORBIDDEN);

    let mut request = post_json("/auth/checkRetakes", json!({ "event_id": event.id, "marks": [] }));
    request
        .headers_mut()
        .insert("x-user-id", catalog.teacher.id.to_string().parse().unwrap());
    let graded = router.oneshot(request).await.unwrap();
    assert_eq!(graded.status(), StatusCode::OK);
    assert_eq!(ctx.database.count_records("event").await.unwrap(), 0);
}
