use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tracing::error;

use super::domain::{ScoreRequest, WorkerRegistration};
use super::repository::{CreditProfileRepository, WorkerRepository};
use super::service::{WorkerScoringService, WorkerServiceError};

/// Router builder exposing registration, lookup and scoring endpoints.
///
/// The short paths (`/register`, `/user/:id`, `/calculate-score`) mirror the
/// prefixed ones for older clients.
pub fn worker_router<W, P>(service: Arc<WorkerScoringService<W, P>>) -> Router
where
    W: WorkerRepository + 'static,
    P: CreditProfileRepository + 'static,
{
    Router::new()
        .route("/register", post(register_handler::<W, P>))
        .route("/users/register", post(register_handler::<W, P>))
        .route("/users", get(list_handler::<W, P>))
        .route("/user/:user_id", get(detail_handler::<W, P>))
        .route("/users/:user_id", get(detail_handler::<W, P>))
        .route("/users/:user_id/history", get(history_handler::<W, P>))
        .route(
            "/users/:user_id/recommendations",
            get(recommendations_handler::<W, P>),
        )
        .route("/calculate-score", post(score_handler::<W, P>))
        .route("/credit/calculate-score", post(score_handler::<W, P>))
        .with_state(service)
}

pub(crate) async fn register_handler<W, P>(
    State(service): State<Arc<WorkerScoringService<W, P>>>,
    payload: Result<axum::Json<WorkerRegistration>, JsonRejection>,
) -> Response
where
    W: WorkerRepository + 'static,
    P: CreditProfileRepository + 'static,
{
    let axum::Json(registration) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };

    match service.register(registration) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_handler<W, P>(
    State(service): State<Arc<WorkerScoringService<W, P>>>,
) -> Response
where
    W: WorkerRepository + 'static,
    P: CreditProfileRepository + 'static,
{
    match service.list() {
        Ok(workers) => (StatusCode::OK, axum::Json(workers)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn detail_handler<W, P>(
    State(service): State<Arc<WorkerScoringService<W, P>>>,
    Path(user_id): Path<String>,
) -> Response
where
    W: WorkerRepository + 'static,
    P: CreditProfileRepository + 'static,
{
    match service.detail(&user_id) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn history_handler<W, P>(
    State(service): State<Arc<WorkerScoringService<W, P>>>,
    Path(user_id): Path<String>,
) -> Response
where
    W: WorkerRepository + 'static,
    P: CreditProfileRepository + 'static,
{
    match service.history(&user_id) {
        Ok(history) => (StatusCode::OK, axum::Json(history)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn recommendations_handler<W, P>(
    State(service): State<Arc<WorkerScoringService<W, P>>>,
    Path(user_id): Path<String>,
) -> Response
where
    W: WorkerRepository + 'static,
    P: CreditProfileRepository + 'static,
{
    match service.recommendations(&user_id) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn score_handler<W, P>(
    State(service): State<Arc<WorkerScoringService<W, P>>>,
    payload: Result<axum::Json<ScoreRequest>, JsonRejection>,
) -> Response
where
    W: WorkerRepository + 'static,
    P: CreditProfileRepository + 'static,
{
    let axum::Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };

    match service.calculate_score(request) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

/// Body extraction failures keep axum's status but use the `detail` envelope.
fn rejection_response(rejection: JsonRejection) -> Response {
    let payload = json!({ "detail": rejection.body_text() });
    (rejection.status(), axum::Json(payload)).into_response()
}

fn error_response(err: WorkerServiceError) -> Response {
    let status = match &err {
        WorkerServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        WorkerServiceError::InvalidWorkerId | WorkerServiceError::DuplicateEmail => {
            StatusCode::BAD_REQUEST
        }
        WorkerServiceError::WorkerNotFound | WorkerServiceError::NoCreditProfile => {
            StatusCode::NOT_FOUND
        }
        WorkerServiceError::Repository(source) => {
            error!(error = %source, "worker storage failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "detail": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
