use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use fra_portal::workflows::tracking::{tracking_router, TrackingRegistry};
use fra_portal::workflows::wizard::{
    wizard_router, Clock, DraftSessionStore, WizardSessionService,
};
use serde_json::json;
use std::sync::Arc;

/// Wizard, tracking and operational endpoints on one router.
pub(crate) fn portal_routes<S, C, T>(
    wizard: Arc<WizardSessionService<S, C>>,
    registry: Arc<T>,
) -> Router
where
    S: DraftSessionStore + 'static,
    C: Clock + 'static,
    T: TrackingRegistry + 'static,
{
    wizard_router(wizard)
        .merge(tracking_router(registry))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Acquire);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
