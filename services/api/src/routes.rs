use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json};
use gig_trust::error::AppError;
use gig_trust::import::{BatchScore, FeatureBatchScorer};
use gig_trust::workers::{
    worker_router, CreditProfileRepository, WorkerRepository, WorkerScoringService,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::atomic::Ordering;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct BatchScoreRequest {
    /// CSV text with a header row, in the same layout the `batch` command reads.
    pub(crate) csv: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct BatchScoreResponse {
    pub(crate) scored: usize,
    pub(crate) rows: Vec<BatchScore>,
}

pub(crate) fn with_worker_routes<W, P>(service: Arc<WorkerScoringService<W, P>>) -> axum::Router
where
    W: WorkerRepository + 'static,
    P: CreditProfileRepository + 'static,
{
    worker_router(service)
        .route("/", get(index))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/credit/batch-score", post(batch_score_endpoint))
}

pub(crate) async fn index(Extension(state): Extension<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "name": "Gig Trust",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "started_at": state.started_at,
        "endpoints": {
            "register": "/users/register",
            "users": "/users",
            "user_detail": "/users/{user_id}",
            "calculate_score": "/credit/calculate-score",
            "batch_score": "/credit/batch-score",
            "history": "/users/{user_id}/history",
            "recommendations": "/users/{user_id}/recommendations",
            "health": "/health",
            "metrics": "/metrics"
        }
    }))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy", "database": "connected" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
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

pub(crate) async fn batch_score_endpoint(
    Json(payload): Json<BatchScoreRequest>,
) -> Result<Json<BatchScoreResponse>, AppError> {
    let reader = Cursor::new(payload.csv.into_bytes());
    let rows = FeatureBatchScorer::default().score_reader(reader)?;

    Ok(Json(BatchScoreResponse {
        scored: rows.len(),
        rows,
    }))
}
