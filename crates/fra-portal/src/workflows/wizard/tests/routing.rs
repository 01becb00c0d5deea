use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::workflows::wizard::identifier::FixedClock;
use crate::workflows::wizard::router::{next_handler, start_handler};
use crate::workflows::wizard::service::WizardSessionService;

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("serializable")))
        .expect("request builds")
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

async fn start_draft(router: &axum::Router) -> String {
    let response = router
        .clone()
        .oneshot(empty_request("POST", "/api/v1/drafts"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    payload["session_id"]
        .as_str()
        .expect("session id present")
        .to_string()
}

#[tokio::test]
async fn schemes_route_lists_catalog() {
    let (router, _) = router_with_store();
    let response = router
        .oneshot(empty_request("GET", "/api/v1/schemes"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.as_array().map(Vec::len), Some(5));
    assert_eq!(payload[0]["id"], "fra2006");
}

#[tokio::test]
async fn wizard_routes_walk_to_completion() {
    let (router, store) = router_with_store();
    let draft_id = start_draft(&router).await;
    let base = format!("/api/v1/drafts/{draft_id}");

    let response = router
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("{base}/fields/fullName"),
            json!({ "value": "Asha Devi" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["outcome"], "in_progress");
    assert_eq!(payload["wizard"]["draft"]["full_name"], "Asha Devi");

    for expected_step in [2, 3, 4] {
        let response = router
            .clone()
            .oneshot(empty_request("POST", &format!("{base}/next")))
            .await
            .expect("route executes");
        let payload = read_json_body(response).await;
        assert_eq!(payload["wizard"]["current_step"], expected_step);
    }

    let response = router
        .clone()
        .oneshot(empty_request(
            "POST",
            &format!("{base}/schemes/fra2006/toggle"),
        ))
        .await
        .expect("route executes");
    let payload = read_json_body(response).await;
    assert_eq!(payload["wizard"]["draft"]["selected_schemes"], json!(["fra2006"]));

    let response = router
        .clone()
        .oneshot(empty_request("POST", &format!("{base}/next")))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["outcome"], "completed");
    assert_eq!(payload["application_id"], "FRA345678");
    assert_eq!(payload["receipt"]["file_name"], "receipt_FRA345678.txt");

    assert!(store.is_empty());
    let response = router
        .oneshot(empty_request("GET", &base))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn previous_route_exits_from_first_step() {
    let (router, store) = router_with_store();
    let draft_id = start_draft(&router).await;

    let response = router
        .oneshot(empty_request(
            "POST",
            &format!("/api/v1/drafts/{draft_id}/previous"),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["outcome"], "exited");
    assert!(store.is_empty());
}

#[tokio::test]
async fn delete_route_abandons_draft() {
    let (router, store) = router_with_store();
    let draft_id = start_draft(&router).await;
    let uri = format!("/api/v1/drafts/{draft_id}");

    let response = router
        .clone()
        .oneshot(empty_request("DELETE", &uri))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(store.is_empty());

    let response = router
        .oneshot(empty_request("GET", &uri))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn document_route_maps_rejections() {
    let (router, _) = router_with_store();
    let draft_id = start_draft(&router).await;
    let uri = format!("/api/v1/drafts/{draft_id}/documents/aadhaarCard");

    let response = router
        .clone()
        .oneshot(json_request(
            "PUT",
            &uri,
            json!({ "file_name": "aadhaar.gif", "content_type": "image/gif" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let response = router
        .clone()
        .oneshot(json_request("PUT", &uri, json!({ "file_name": "aadhaar.pdf" })))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload["wizard"]["draft"]["documents"]["aadhaarCard"]["content_type"],
        "application/pdf"
    );

    let response = router
        .oneshot(empty_request("DELETE", &uri))
        .await
        .expect("route executes");
    let payload = read_json_body(response).await;
    assert_eq!(payload["wizard"]["draft"]["documents"], json!({}));
}

#[tokio::test]
async fn field_route_rejects_unknown_fields() {
    let (router, _) = router_with_store();
    let draft_id = start_draft(&router).await;

    let response = router
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/drafts/{draft_id}/fields/nickname"),
            json!({ "value": "Ash" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn handlers_report_store_outages() {
    let service = Arc::new(WizardSessionService::new(
        Arc::new(UnavailableStore),
        Arc::new(FixedClock(SUBMITTED_AT)),
    ));

    let response = start_handler::<UnavailableStore, FixedClock>(State(service.clone())).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = next_handler::<UnavailableStore, FixedClock>(
        State(service),
        Path("draft-000001".to_string()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
