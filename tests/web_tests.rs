mod test_harness;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use ministry_scheduler::engine::Engine;
use ministry_scheduler::repo::Repository;
use ministry_scheduler::store::MemoryStore;
use ministry_scheduler::web::{router, WebState};
use test_harness::{elder, midweek_schedule};

/// App backed by a schedule whose chairman is pending confirmation.
async fn create_test_app() -> (Router, Uuid, Uuid) {
    let x = elder("X");
    let store = MemoryStore::new();

    let mut schedule = midweek_schedule("2025-03-06");
    schedule.chairman.assign(x.id);
    let schedule_id = schedule.id;
    store.save_schedule(&schedule).await.unwrap();

    let engine = Engine::new(Arc::new(store));
    (router(WebState { engine }), schedule_id, x.id)
}

fn view_uri(target: Uuid, member: Uuid, slot: &str) -> String {
    format!(
        "/api/confirmation?target={}&member={}&slot={}",
        target, member, slot
    )
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

async fn respond(app: Router, payload: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/confirmation/respond")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_view_pending_assignment() {
    let (app, schedule_id, member_id) = create_test_app().await;

    let (status, body) = get(app, &view_uri(schedule_id, member_id, "chairman")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["label"], "Chairman");
    assert_eq!(body["status"], "Pending");
    assert_eq!(body["date"], "2025-03-06");
}

#[tokio::test]
async fn test_malformed_slot_token_is_rejected() {
    let (app, schedule_id, member_id) = create_test_app().await;

    let (status, body) = get(app, &view_uri(schedule_id, member_id, "podium")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("podium"));
}

#[tokio::test]
async fn test_malformed_member_id_is_rejected() {
    let (app, schedule_id, _) = create_test_app().await;

    let uri = format!(
        "/api/confirmation?target={}&member=not-a-uuid&slot=chairman",
        schedule_id
    );
    let (status, body) = get(app, &uri).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid member id");
}

#[tokio::test]
async fn test_unknown_target_is_not_found() {
    let (app, _, member_id) = create_test_app().await;

    let (status, _) = get(app, &view_uri(Uuid::new_v4(), member_id, "chairman")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_accept_then_resubmit_is_rejected() {
    let (app, schedule_id, member_id) = create_test_app().await;

    let payload = json!({
        "target": schedule_id.to_string(),
        "member": member_id.to_string(),
        "slot": "chairman",
        "decision": "accept",
    });

    let (status, body) = respond(app.clone(), payload.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["status"], "accepted");

    // The decision is terminal; a second submission changes nothing
    let mut decline = payload;
    decline["decision"] = json!("decline");
    let (status, body) = respond(app.clone(), decline).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    // Re-visiting the link renders the recorded state
    let (status, body) = get(app, &view_uri(schedule_id, member_id, "chairman")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Accepted");
}

#[tokio::test]
async fn test_category_defaults_to_weekly_meeting() {
    let (app, schedule_id, member_id) = create_test_app().await;

    // No category in the link at all
    let (status, body) = get(app.clone(), &view_uri(schedule_id, member_id, "chairman")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["label"], "Chairman");

    let (status, _) = get(
        app,
        &format!(
            "/api/confirmation?target={}&member={}&slot=chairman&category=bogus",
            schedule_id, member_id
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_member_not_in_slot_is_rejected() {
    let (app, schedule_id, _) = create_test_app().await;

    let (status, _) = get(app, &view_uri(schedule_id, Uuid::new_v4(), "chairman")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_index_serves_confirmation_page() {
    let (app, _, _) = create_test_app().await;

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("Assignment confirmation"));
}
