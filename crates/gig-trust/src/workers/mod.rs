//! Worker registration, Digital Trust Score calculation and score history.

pub mod domain;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    CreditProfileId, CreditProfileRecord, FeatureVector, FinancialSignals, NewCreditProfile,
    NewWorker, RecommendationView, ScoreCalculationView, ScoreRequest, WorkerDetailView, WorkerId,
    WorkerRecord, WorkerRegistration,
};
pub use repository::{CreditProfileRepository, RepositoryError, WorkerRepository};
pub use router::worker_router;
pub use scoring::{
    calculate_digital_trust_score, classify_risk, generate_recommendations, RiskCategory,
    ScoreComponent, ScoreFactor, ScoreResult, TrustScoreEngine,
};
pub use service::{WorkerScoringService, WorkerServiceError};
pub use validation::{RequestValidator, ValidationError};
