//! Integration tests for the annotation endpoints, using the in-memory
//! repository and the mock translation backend.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use marginalia_api::{build_router, AppState};
use marginalia_db::MemoryAnnotationRepository;
use marginalia_translate::MockTranslationBackend;

fn test_app() -> (Router, Arc<MemoryAnnotationRepository>) {
    let repo = Arc::new(MemoryAnnotationRepository::new());
    let state = AppState::new(repo.clone(), Arc::new(MockTranslationBackend::new()));
    (build_router(state), repo)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let (app, _) = test_app();
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_create_then_list_round_trip() {
    let (app, _) = test_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/annotations",
            serde_json::json!({
                "quote": "the quick brown fox",
                "comment": "classic",
                "locator": "/essays/foxes"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    assert_eq!(created["success"], true);
    assert_eq!(created["id"], 1);

    let response = app
        .oneshot(
            Request::get("/api/annotations?locator=%2Fessays%2Ffoxes")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    let data = listed["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["quote"], "the quick brown fox");
    assert_eq!(data[0]["comment"], "classic");
    assert_eq!(data[0]["locator"], "/essays/foxes");
    assert!(data[0]["created_at"].is_string());
}

#[tokio::test]
async fn test_list_newest_first() {
    let (app, repo) = test_app();
    use marginalia_core::AnnotationRepository;
    repo.create("/page", "older", "c").await.unwrap();
    repo.create("/page", "newer", "c").await.unwrap();

    let response = app
        .oneshot(
            Request::get("/api/annotations?locator=%2Fpage")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let listed = body_json(response).await;
    let data = listed["data"].as_array().unwrap();
    assert_eq!(data[0]["quote"], "newer");
    assert_eq!(data[1]["quote"], "older");
}

#[tokio::test]
async fn test_list_requires_locator() {
    let (app, _) = test_app();
    let response = app
        .oneshot(
            Request::get("/api/annotations")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("locator"));
}

#[tokio::test]
async fn test_list_unknown_locator_returns_empty_data() {
    let (app, _) = test_app();
    let response = app
        .oneshot(
            Request::get("/api/annotations?locator=%2Fnothing")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"], serde_json::json!([]));
}

#[tokio::test]
async fn test_create_rejects_empty_fields() {
    let (app, repo) = test_app();

    for body in [
        serde_json::json!({"quote": "", "comment": "c", "locator": "/p"}),
        serde_json::json!({"quote": "q", "comment": "  ", "locator": "/p"}),
        serde_json::json!({"quote": "q", "comment": "c", "locator": ""}),
    ] {
        let response = app
            .clone()
            .oneshot(post_json("/api/annotations", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["error"].is_string());
    }
    assert!(repo.is_empty());
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let (app, repo) = test_app();
    use marginalia_core::AnnotationRepository;
    let id = repo.create("/page", "quote", "comment").await.unwrap();

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(
                Request::delete(format!("/api/annotations/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
    }
    assert!(repo.is_empty());
}

#[tokio::test]
async fn test_delete_unknown_id_is_success_equivalent() {
    let (app, _) = test_app();
    let response = app
        .oneshot(
            Request::delete("/api/annotations/9999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
}
