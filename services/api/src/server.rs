use crate::cli::ServeArgs;
use crate::infra::{cors_layer, AppState, InMemoryStore};
use crate::routes::with_worker_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Utc;
use gig_trust::config::AppConfig;
use gig_trust::error::AppError;
use gig_trust::telemetry;
use gig_trust::workers::{TrustScoreEngine, WorkerScoringService};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        started_at: Utc::now(),
    };

    let store = Arc::new(InMemoryStore::default());
    let scoring_service = Arc::new(WorkerScoringService::new(
        store.clone(),
        store,
        TrustScoreEngine::standard(),
    ));

    let app = with_worker_routes(scoring_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer)
        .layer(cors_layer(config.server.allowed_origin()?));

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        cors_origin = %config.server.cors_origin,
        "gig trust scoring service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
