use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::catalog::scheme_catalog;
use super::documents::UploadRejected;
use super::identifier::Clock;
use super::machine::WizardEvent;
use super::service::{DispatchOutcome, SessionServiceError, WizardSessionService};
use super::store::{DraftSessionId, DraftSessionStore, SessionStoreError};

type SharedService<S, C> = Arc<WizardSessionService<S, C>>;

#[derive(Debug, Deserialize)]
pub(crate) struct FieldValuePayload {
    #[serde(default)]
    pub(crate) value: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DocumentPayload {
    pub(crate) file_name: String,
    #[serde(default)]
    pub(crate) content_type: Option<String>,
}

/// Router exposing the application wizard to browser hosts.
pub fn wizard_router<S, C>(service: SharedService<S, C>) -> Router
where
    S: DraftSessionStore + 'static,
    C: Clock + 'static,
{
    Router::new()
        .route("/api/v1/schemes", get(schemes_handler))
        .route("/api/v1/drafts", post(start_handler::<S, C>))
        .route(
            "/api/v1/drafts/:draft_id",
            get(view_handler::<S, C>).delete(abandon_handler::<S, C>),
        )
        .route(
            "/api/v1/drafts/:draft_id/fields/:field",
            put(set_field_handler::<S, C>),
        )
        .route(
            "/api/v1/drafts/:draft_id/schemes/:scheme_id/toggle",
            post(toggle_scheme_handler::<S, C>),
        )
        .route(
            "/api/v1/drafts/:draft_id/documents/:kind",
            put(attach_document_handler::<S, C>).delete(detach_document_handler::<S, C>),
        )
        .route("/api/v1/drafts/:draft_id/next", post(next_handler::<S, C>))
        .route(
            "/api/v1/drafts/:draft_id/previous",
            post(previous_handler::<S, C>),
        )
        .with_state(service)
}

pub(crate) async fn schemes_handler() -> Response {
    (StatusCode::OK, axum::Json(scheme_catalog())).into_response()
}

pub(crate) async fn start_handler<S, C>(State(service): State<SharedService<S, C>>) -> Response
where
    S: DraftSessionStore + 'static,
    C: Clock + 'static,
{
    match service.start() {
        Ok(view) => (StatusCode::CREATED, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn view_handler<S, C>(
    State(service): State<SharedService<S, C>>,
    Path(draft_id): Path<String>,
) -> Response
where
    S: DraftSessionStore + 'static,
    C: Clock + 'static,
{
    match service.view(&DraftSessionId(draft_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn abandon_handler<S, C>(
    State(service): State<SharedService<S, C>>,
    Path(draft_id): Path<String>,
) -> Response
where
    S: DraftSessionStore + 'static,
    C: Clock + 'static,
{
    match service.abandon(&DraftSessionId(draft_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn set_field_handler<S, C>(
    State(service): State<SharedService<S, C>>,
    Path((draft_id, field)): Path<(String, String)>,
    axum::Json(payload): axum::Json<FieldValuePayload>,
) -> Response
where
    S: DraftSessionStore + 'static,
    C: Clock + 'static,
{
    outcome_response(service.set_field(&DraftSessionId(draft_id), &field, &payload.value))
}

pub(crate) async fn toggle_scheme_handler<S, C>(
    State(service): State<SharedService<S, C>>,
    Path((draft_id, scheme_id)): Path<(String, String)>,
) -> Response
where
    S: DraftSessionStore + 'static,
    C: Clock + 'static,
{
    outcome_response(service.toggle_scheme(&DraftSessionId(draft_id), &scheme_id))
}

pub(crate) async fn attach_document_handler<S, C>(
    State(service): State<SharedService<S, C>>,
    Path((draft_id, kind)): Path<(String, String)>,
    axum::Json(payload): axum::Json<DocumentPayload>,
) -> Response
where
    S: DraftSessionStore + 'static,
    C: Clock + 'static,
{
    outcome_response(service.attach_document(
        &DraftSessionId(draft_id),
        &kind,
        &payload.file_name,
        payload.content_type.as_deref(),
    ))
}

pub(crate) async fn detach_document_handler<S, C>(
    State(service): State<SharedService<S, C>>,
    Path((draft_id, kind)): Path<(String, String)>,
) -> Response
where
    S: DraftSessionStore + 'static,
    C: Clock + 'static,
{
    outcome_response(service.detach_document(&DraftSessionId(draft_id), &kind))
}

pub(crate) async fn next_handler<S, C>(
    State(service): State<SharedService<S, C>>,
    Path(draft_id): Path<String>,
) -> Response
where
    S: DraftSessionStore + 'static,
    C: Clock + 'static,
{
    outcome_response(service.dispatch(&DraftSessionId(draft_id), WizardEvent::Next))
}

pub(crate) async fn previous_handler<S, C>(
    State(service): State<SharedService<S, C>>,
    Path(draft_id): Path<String>,
) -> Response
where
    S: DraftSessionStore + 'static,
    C: Clock + 'static,
{
    outcome_response(service.dispatch(&DraftSessionId(draft_id), WizardEvent::Previous))
}

fn outcome_response(result: Result<DispatchOutcome, SessionServiceError>) -> Response {
    match result {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: SessionServiceError) -> Response {
    let status = match &err {
        SessionServiceError::Field(_)
        | SessionServiceError::UnknownScheme(_)
        | SessionServiceError::UnknownDocument(_)
        | SessionServiceError::Upload(UploadRejected::MissingFileName) => StatusCode::BAD_REQUEST,
        SessionServiceError::Upload(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        SessionServiceError::Store(SessionStoreError::NotFound) => StatusCode::NOT_FOUND,
        SessionServiceError::Store(SessionStoreError::Conflict) => StatusCode::CONFLICT,
        SessionServiceError::Store(SessionStoreError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
