//! HTTP surface for the ticket service.
//!
//! Thin routing/validation layer over [`RequestManager`]: each route maps
//! one manager operation to a status code. The core carries no HTTP
//! awareness; this module owns the translation (`NotFound` becomes 404,
//! every other error 400, and the GET routes report any failure as 404 with
//! the error message as payload).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::domain::request::RequestState;
use crate::error::{Result, TicketdError};
use crate::manager::RequestManager;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub manager: RequestManager,
}

/// Build the service router.
pub fn router(manager: RequestManager) -> Router {
    // `/request/{param}` carries a state filter for GET and an id for
    // DELETE, so both verbs hang off one route.
    Router::new()
        .route("/health", get(health_check))
        .route("/request", post(create_request))
        .route("/request/action/:id", get(request_details))
        .route("/request/validate/:id", patch(validate_request))
        .route("/request/invalidate/:id", patch(invalidate_request))
        .route("/request/archive/:id", patch(archive_request))
        .route("/request/:param", get(list_requests).delete(remove_request))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState { manager })
}

async fn health_check() -> &'static str {
    "OK"
}

/// GET /request/{state}
///
/// The state parameter is restricted to the three enum values here, before
/// anything reaches the core.
async fn list_requests(State(state): State<AppState>, Path(param): Path<String>) -> Response {
    let filter = match param.parse::<RequestState>() {
        Ok(filter) => filter,
        Err(err) => return (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
    };

    match state.manager.list_by_state(filter) {
        Ok(records) => Json(records).into_response(),
        Err(err) => (StatusCode::NOT_FOUND, err.to_string()).into_response(),
    }
}

/// GET /request/action/{id}
async fn request_details(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.manager.get_by_id(&id) {
        Ok(details) => Json(details).into_response(),
        Err(err) => (StatusCode::NOT_FOUND, err.to_string()).into_response(),
    }
}

/// POST /request
async fn create_request(State(state): State<AppState>, Json(payload): Json<Value>) -> Response {
    match state.manager.add(&payload) {
        Ok(id) => Json(json!({ "id": id })).into_response(),
        Err(err) => (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
    }
}

/// PATCH /request/validate/{id}
async fn validate_request(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    mutation_response(state.manager.validate(&id))
}

/// PATCH /request/invalidate/{id}
async fn invalidate_request(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    mutation_response(state.manager.invalidate(&id))
}

/// PATCH /request/archive/{id}
async fn archive_request(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    mutation_response(state.manager.archive(&id))
}

/// DELETE /request/{id}
async fn remove_request(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    mutation_response(state.manager.delete(&id))
}

/// 200 `{"success": true}`, 404 for missing records, 400 otherwise.
fn mutation_response(result: Result<()>) -> Response {
    match result {
        Ok(()) => Json(json!({ "success": true })).into_response(),
        Err(err @ TicketdError::NotFound(_)) => {
            (StatusCode::NOT_FOUND, err.to_string()).into_response()
        }
        Err(err) => (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
    }
}
