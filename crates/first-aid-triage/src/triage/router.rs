use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::classification::RawClassification;
use super::service::TriageService;
use super::session::SessionStore;

const DEFAULT_SESSION_LIMIT: usize = 20;
const MAX_SESSION_LIMIT: usize = 200;
const UNKNOWN_CLIENT: &str = "unknown";

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SessionQuery {
    pub(crate) limit: Option<usize>,
}

/// Router builder exposing the triage endpoints.
pub fn triage_router<S>(service: Arc<TriageService<S>>) -> Router
where
    S: SessionStore + 'static,
{
    Router::new()
        .route("/api/v1/triage/assessments", post(assess_handler::<S>))
        .route("/api/v1/triage/sessions", get(sessions_handler::<S>))
        .with_state(service)
}

pub(crate) async fn assess_handler<S>(
    State(service): State<Arc<TriageService<S>>>,
    headers: HeaderMap,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response
where
    S: SessionStore + 'static,
{
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            let payload = json!({
                "error": rejection.body_text(),
            });
            return (rejection.status(), Json(payload)).into_response();
        }
    };

    let raw = match RawClassification::from_value(payload) {
        Ok(raw) => raw,
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
        }
    };

    let client_context = headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
        .unwrap_or(UNKNOWN_CLIENT);

    let report = service.assess(&raw, client_context);
    (StatusCode::OK, Json(report)).into_response()
}

pub(crate) async fn sessions_handler<S>(
    State(service): State<Arc<TriageService<S>>>,
    Query(query): Query<SessionQuery>,
) -> Response
where
    S: SessionStore + 'static,
{
    let limit = query
        .limit
        .unwrap_or(DEFAULT_SESSION_LIMIT)
        .min(MAX_SESSION_LIMIT);

    match service.recent_sessions(limit) {
        Ok(sessions) => (StatusCode::OK, Json(json!({ "sessions": sessions }))).into_response(),
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
