use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::workers::domain::{
    CreditProfileId, CreditProfileRecord, FeatureVector, NewCreditProfile, NewWorker,
    ScoreRequest, WorkerId, WorkerRecord, WorkerRegistration,
};
use crate::workers::repository::{CreditProfileRepository, RepositoryError, WorkerRepository};
use crate::workers::scoring::TrustScoreEngine;
use crate::workers::{worker_router, WorkerScoringService};

pub(super) fn features(
    avg_income: f64,
    income_variance: f64,
    upi_txn_count: u32,
    bill_payment_score: u8,
    withdrawal_ratio: f64,
    months_active: u32,
) -> FeatureVector {
    FeatureVector {
        avg_income,
        income_variance,
        upi_txn_count,
        bill_payment_score,
        withdrawal_ratio,
        months_active,
    }
}

pub(super) fn scenario_a() -> FeatureVector {
    features(28000.0, 0.2, 45, 9, 0.4, 18)
}

pub(super) fn scenario_b() -> FeatureVector {
    features(18000.0, 0.4, 25, 6, 0.6, 8)
}

pub(super) fn scenario_c() -> FeatureVector {
    features(12000.0, 0.6, 10, 3, 0.8, 3)
}

pub(super) fn registration(email: &str, months_active: u32) -> WorkerRegistration {
    WorkerRegistration {
        name: "Rajesh Kumar".to_string(),
        email: email.to_string(),
        job_type: "Delivery Driver".to_string(),
        months_active,
    }
}

pub(super) fn score_request(user_id: &str) -> ScoreRequest {
    ScoreRequest {
        user_id: user_id.to_string(),
        avg_income: 28000.0,
        income_variance: 0.2,
        upi_txn_count: 45,
        bill_payment_score: 9,
        withdrawal_ratio: 0.4,
    }
}

pub(super) fn unknown_worker_id() -> String {
    WorkerId::generate(Utc.timestamp_opt(1_700_000_000, 0).unwrap(), 9_999).0
}

pub(super) type TestService = WorkerScoringService<MemoryStore, MemoryStore>;

pub(super) fn build_service() -> (TestService, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let service =
        WorkerScoringService::new(store.clone(), store.clone(), TrustScoreEngine::standard());
    (service, store)
}

pub(super) fn router_with_service(service: TestService) -> axum::Router {
    worker_router(Arc::new(service))
}

#[derive(Default)]
pub(super) struct MemoryStore {
    workers: Mutex<Vec<WorkerRecord>>,
    profiles: Mutex<Vec<CreditProfileRecord>>,
}

impl MemoryStore {
    pub(super) fn profile_count(&self) -> usize {
        self.profiles.lock().expect("profile mutex poisoned").len()
    }
}

impl WorkerRepository for MemoryStore {
    fn insert_worker(&self, worker: NewWorker) -> Result<WorkerRecord, RepositoryError> {
        let mut guard = self.workers.lock().expect("worker mutex poisoned");
        if guard.iter().any(|existing| existing.email == worker.email) {
            return Err(RepositoryError::Conflict);
        }
        let id = WorkerId::generate(worker.created_at, guard.len() as u64 + 1);
        let record = worker.into_record(id);
        guard.push(record.clone());
        Ok(record)
    }

    fn fetch_worker(&self, id: &WorkerId) -> Result<Option<WorkerRecord>, RepositoryError> {
        let guard = self.workers.lock().expect("worker mutex poisoned");
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn list_workers(&self) -> Result<Vec<WorkerRecord>, RepositoryError> {
        Ok(self.workers.lock().expect("worker mutex poisoned").clone())
    }
}

impl CreditProfileRepository for MemoryStore {
    fn insert_profile(
        &self,
        profile: NewCreditProfile,
    ) -> Result<CreditProfileRecord, RepositoryError> {
        let mut guard = self.profiles.lock().expect("profile mutex poisoned");
        let id = CreditProfileId::generate(profile.created_at, guard.len() as u64 + 1);
        let record = profile.into_record(id);
        guard.push(record.clone());
        Ok(record)
    }

    fn latest_for(
        &self,
        user_id: &WorkerId,
    ) -> Result<Option<CreditProfileRecord>, RepositoryError> {
        Ok(self.history_for(user_id)?.into_iter().next())
    }

    fn history_for(&self, user_id: &WorkerId) -> Result<Vec<CreditProfileRecord>, RepositoryError> {
        let guard = self.profiles.lock().expect("profile mutex poisoned");
        Ok(guard
            .iter()
            .rev()
            .filter(|record| &record.user_id == user_id)
            .cloned()
            .collect())
    }
}

/// Registry that already knows every email.
pub(super) struct ConflictStore;

impl WorkerRepository for ConflictStore {
    fn insert_worker(&self, _worker: NewWorker) -> Result<WorkerRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch_worker(&self, _id: &WorkerId) -> Result<Option<WorkerRecord>, RepositoryError> {
        Ok(None)
    }

    fn list_workers(&self) -> Result<Vec<WorkerRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableStore;

impl WorkerRepository for UnavailableStore {
    fn insert_worker(&self, _worker: NewWorker) -> Result<WorkerRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_worker(&self, _id: &WorkerId) -> Result<Option<WorkerRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_workers(&self) -> Result<Vec<WorkerRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

impl CreditProfileRepository for UnavailableStore {
    fn insert_profile(
        &self,
        _profile: NewCreditProfile,
    ) -> Result<CreditProfileRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn latest_for(
        &self,
        _user_id: &WorkerId,
    ) -> Result<Option<CreditProfileRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn history_for(
        &self,
        _user_id: &WorkerId,
    ) -> Result<Vec<CreditProfileRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
