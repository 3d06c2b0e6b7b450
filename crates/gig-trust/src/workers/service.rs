use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::domain::{
    CreditProfileRecord, FeatureVector, NewCreditProfile, RecommendationView, ScoreCalculationView,
    ScoreRequest, WorkerDetailView, WorkerId, WorkerRecord, WorkerRegistration,
};
use super::repository::{CreditProfileRepository, RepositoryError, WorkerRepository};
use super::scoring::{generate_recommendations, TrustScoreEngine};
use super::validation::{RequestValidator, ValidationError};

/// Service composing request validation, the worker registry, the score engine
/// and the credit profile store.
pub struct WorkerScoringService<W, P> {
    validator: RequestValidator,
    workers: Arc<W>,
    profiles: Arc<P>,
    engine: TrustScoreEngine,
}

impl<W, P> WorkerScoringService<W, P>
where
    W: WorkerRepository + 'static,
    P: CreditProfileRepository + 'static,
{
    pub fn new(workers: Arc<W>, profiles: Arc<P>, engine: TrustScoreEngine) -> Self {
        Self {
            validator: RequestValidator::default(),
            workers,
            profiles,
            engine,
        }
    }

    /// Register a worker after validating the payload.
    pub fn register(
        &self,
        registration: WorkerRegistration,
    ) -> Result<WorkerRecord, WorkerServiceError> {
        let worker = self.validator.registration(registration, Utc::now())?;

        let record = match self.workers.insert_worker(worker) {
            Ok(record) => record,
            Err(RepositoryError::Conflict) => {
                warn!("registration rejected for duplicate email");
                return Err(WorkerServiceError::DuplicateEmail);
            }
            Err(err) => return Err(err.into()),
        };

        info!(worker_id = %record.id, job_type = %record.job_type, "worker registered");
        Ok(record)
    }

    pub fn list(&self) -> Result<Vec<WorkerRecord>, WorkerServiceError> {
        Ok(self.workers.list_workers()?)
    }

    /// Worker details plus the latest credit profile, if one exists.
    pub fn detail(&self, raw_id: &str) -> Result<WorkerDetailView, WorkerServiceError> {
        let worker = self.find_worker(raw_id)?;
        let latest_credit_profile = self.profiles.latest_for(&worker.id)?;

        Ok(WorkerDetailView {
            user: worker,
            latest_credit_profile,
        })
    }

    /// Validate the request, score it against the stored tenure and persist the result.
    pub fn calculate_score(
        &self,
        request: ScoreRequest,
    ) -> Result<ScoreCalculationView, WorkerServiceError> {
        let signals = request.signals();
        self.validator.signals(&signals)?;

        let worker = self.find_worker(&request.user_id)?;
        let features = FeatureVector::from_signals(signals, worker.months_active);
        let result = self.engine.score(&features);

        debug!(worker_id = %worker.id, ?features, "scored feature vector");

        let record = self.profiles.insert_profile(NewCreditProfile {
            user_id: worker.id,
            signals,
            result,
            created_at: Utc::now(),
        })?;

        info!(
            worker_id = %record.user_id,
            credit_profile_id = %record.id,
            score = record.digital_trust_score,
            risk = %record.risk_category,
            "digital trust score calculated"
        );

        Ok(ScoreCalculationView::from(&record))
    }

    /// Every stored score for the worker, newest first.
    pub fn history(&self, raw_id: &str) -> Result<Vec<CreditProfileRecord>, WorkerServiceError> {
        let worker = self.find_worker(raw_id)?;
        Ok(self.profiles.history_for(&worker.id)?)
    }

    /// Recommendations derived from the worker's latest credit profile.
    pub fn recommendations(&self, raw_id: &str) -> Result<RecommendationView, WorkerServiceError> {
        let worker = self.find_worker(raw_id)?;
        let profile = self
            .profiles
            .latest_for(&worker.id)?
            .ok_or(WorkerServiceError::NoCreditProfile)?;

        let features = FeatureVector::from_signals(profile.signals(), worker.months_active);
        let recommendations = generate_recommendations(
            profile.digital_trust_score,
            profile.risk_category,
            &features,
        );

        Ok(RecommendationView {
            user_id: worker.id,
            credit_profile_id: profile.id,
            digital_trust_score: profile.digital_trust_score,
            risk_category: profile.risk_category,
            recommendations,
        })
    }

    fn find_worker(&self, raw_id: &str) -> Result<WorkerRecord, WorkerServiceError> {
        let id = WorkerId::parse(raw_id).ok_or(WorkerServiceError::InvalidWorkerId)?;
        self.workers
            .fetch_worker(&id)?
            .ok_or(WorkerServiceError::WorkerNotFound)
    }
}

/// Error raised by the worker scoring service.
#[derive(Debug, thiserror::Error)]
pub enum WorkerServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Invalid user ID format")]
    InvalidWorkerId,
    #[error("User not found")]
    WorkerNotFound,
    #[error("User with this email already exists")]
    DuplicateEmail,
    #[error("No credit profile found for user")]
    NoCreditProfile,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
