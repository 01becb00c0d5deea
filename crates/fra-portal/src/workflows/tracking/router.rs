use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;

use super::export::status_report_csv;
use super::registry::{find_application, TrackingError, TrackingRegistry};

/// Status lookup and reporting endpoints.
pub fn tracking_router<T>(registry: Arc<T>) -> Router
where
    T: TrackingRegistry + 'static,
{
    Router::new()
        .route(
            "/api/v1/reports/application-status",
            get(status_report_handler::<T>),
        )
        .route(
            "/api/v1/applications/:application_id/status",
            get(status_handler::<T>),
        )
        .with_state(registry)
}

pub(crate) async fn status_handler<T>(
    State(registry): State<Arc<T>>,
    Path(application_id): Path<String>,
) -> Response
where
    T: TrackingRegistry + 'static,
{
    match find_application(registry.as_ref(), &application_id) {
        Ok(application) => (StatusCode::OK, axum::Json(application.status_view())).into_response(),
        Err(err @ TrackingError::InvalidId(_)) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        Err(err @ TrackingError::NotFound(_)) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn status_report_handler<T>(State(registry): State<Arc<T>>) -> Response
where
    T: TrackingRegistry + 'static,
{
    let report = registry
        .all()
        .map_err(|err| err.to_string())
        .and_then(|applications| status_report_csv(&applications).map_err(|err| err.to_string()));

    match report {
        Ok(csv) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
            csv,
        )
            .into_response(),
        Err(message) => {
            let payload = json!({ "error": message });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
