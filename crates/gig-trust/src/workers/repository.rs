use super::domain::{CreditProfileRecord, NewCreditProfile, NewWorker, WorkerId, WorkerRecord};

/// Worker registry. Implementations assign identifiers and keep emails unique.
pub trait WorkerRepository: Send + Sync {
    /// Stores a new worker, returning `Conflict` when the email is already taken.
    fn insert_worker(&self, worker: NewWorker) -> Result<WorkerRecord, RepositoryError>;
    fn fetch_worker(&self, id: &WorkerId) -> Result<Option<WorkerRecord>, RepositoryError>;
    /// All workers in registration order.
    fn list_workers(&self) -> Result<Vec<WorkerRecord>, RepositoryError>;
}

/// Result sink for score calculations.
pub trait CreditProfileRepository: Send + Sync {
    fn insert_profile(
        &self,
        profile: NewCreditProfile,
    ) -> Result<CreditProfileRecord, RepositoryError>;
    /// Most recent profile by `created_at`; later inserts win ties.
    fn latest_for(
        &self,
        user_id: &WorkerId,
    ) -> Result<Option<CreditProfileRecord>, RepositoryError>;
    /// Every profile for the worker, newest first.
    fn history_for(&self, user_id: &WorkerId) -> Result<Vec<CreditProfileRecord>, RepositoryError>;
}

/// Error enumeration for storage failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
