use axum::http::HeaderValue;
use chrono::{DateTime, Utc};
use gig_trust::workers::{
    CreditProfileId, CreditProfileRecord, CreditProfileRepository, NewCreditProfile, NewWorker,
    RepositoryError, WorkerId, WorkerRecord, WorkerRepository,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) started_at: DateTime<Utc>,
}

#[derive(Default)]
struct StoreState {
    workers: Vec<WorkerRecord>,
    profiles: Vec<CreditProfileRecord>,
    next_worker: u64,
    next_profile: u64,
}

/// Process-local registry and result sink. One mutex serializes every write.
#[derive(Default, Clone)]
pub(crate) struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryStore {
    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, RepositoryError> {
        self.state
            .lock()
            .map_err(|_| RepositoryError::Unavailable("store lock poisoned".to_string()))
    }
}

impl WorkerRepository for InMemoryStore {
    fn insert_worker(&self, worker: NewWorker) -> Result<WorkerRecord, RepositoryError> {
        let mut state = self.lock()?;
        if state
            .workers
            .iter()
            .any(|existing| existing.email == worker.email)
        {
            return Err(RepositoryError::Conflict);
        }

        state.next_worker += 1;
        let id = WorkerId::generate(worker.created_at, state.next_worker);
        let record = worker.into_record(id);
        state.workers.push(record.clone());
        Ok(record)
    }

    fn fetch_worker(&self, id: &WorkerId) -> Result<Option<WorkerRecord>, RepositoryError> {
        let state = self.lock()?;
        Ok(state.workers.iter().find(|worker| &worker.id == id).cloned())
    }

    fn list_workers(&self) -> Result<Vec<WorkerRecord>, RepositoryError> {
        Ok(self.lock()?.workers.clone())
    }
}

impl CreditProfileRepository for InMemoryStore {
    fn insert_profile(
        &self,
        profile: NewCreditProfile,
    ) -> Result<CreditProfileRecord, RepositoryError> {
        let mut state = self.lock()?;
        state.next_profile += 1;
        let id = CreditProfileId::generate(profile.created_at, state.next_profile);
        let record = profile.into_record(id);
        state.profiles.push(record.clone());
        Ok(record)
    }

    fn latest_for(
        &self,
        user_id: &WorkerId,
    ) -> Result<Option<CreditProfileRecord>, RepositoryError> {
        let state = self.lock()?;
        Ok(state
            .profiles
            .iter()
            .filter(|profile| &profile.user_id == user_id)
            .max_by_key(|profile| profile.created_at)
            .cloned())
    }

    fn history_for(
        &self,
        user_id: &WorkerId,
    ) -> Result<Vec<CreditProfileRecord>, RepositoryError> {
        let state = self.lock()?;
        let mut history: Vec<CreditProfileRecord> = state
            .profiles
            .iter()
            .rev()
            .filter(|profile| &profile.user_id == user_id)
            .cloned()
            .collect();
        history.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(history)
    }
}

pub(crate) fn cors_layer(allowed_origin: Option<HeaderValue>) -> CorsLayer {
    let origin = match allowed_origin {
        Some(origin) => AllowOrigin::exact(origin),
        None => AllowOrigin::from(Any),
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}
