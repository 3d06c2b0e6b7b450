use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::scoring::{RiskCategory, ScoreResult};

const OBJECT_ID_LEN: usize = 24;

fn object_id(created_at: DateTime<Utc>, sequence: u64) -> String {
    let seconds = created_at.timestamp().clamp(0, u32::MAX as i64) as u32;
    format!("{seconds:08x}{sequence:016x}")
}

fn is_object_id(raw: &str) -> bool {
    raw.len() == OBJECT_ID_LEN && raw.bytes().all(|byte| byte.is_ascii_hexdigit())
}

/// Identifier assigned to a registered worker by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkerId(pub String);

impl WorkerId {
    /// Accepts the 24 hex character form handed out by the registry, in either case.
    pub fn parse(raw: &str) -> Option<Self> {
        is_object_id(raw).then(|| Self(raw.to_ascii_lowercase()))
    }

    pub fn generate(created_at: DateTime<Utc>, sequence: u64) -> Self {
        Self(object_id(created_at, sequence))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a persisted score calculation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreditProfileId(pub String);

impl CreditProfileId {
    pub fn generate(created_at: DateTime<Utc>, sequence: u64) -> Self {
        Self(object_id(created_at, sequence))
    }
}

impl fmt::Display for CreditProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Registration payload accepted from a worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerRegistration {
    pub name: String,
    pub email: String,
    pub job_type: String,
    pub months_active: u32,
}

/// Registration that passed validation and is ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorker {
    pub name: String,
    pub email: String,
    pub job_type: String,
    pub months_active: u32,
    pub created_at: DateTime<Utc>,
}

impl NewWorker {
    pub fn into_record(self, id: WorkerId) -> WorkerRecord {
        WorkerRecord {
            id,
            name: self.name,
            email: self.email,
            job_type: self.job_type,
            months_active: self.months_active,
            created_at: self.created_at,
        }
    }
}

/// Stored worker, also the public `UserResponse` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerRecord {
    pub id: WorkerId,
    pub name: String,
    pub email: String,
    pub job_type: String,
    pub months_active: u32,
    pub created_at: DateTime<Utc>,
}

/// Self-reported signals carried by a score request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialSignals {
    pub avg_income: f64,
    pub income_variance: f64,
    pub upi_txn_count: u32,
    pub bill_payment_score: u8,
    pub withdrawal_ratio: f64,
}

/// Complete input to the scoring engine.
///
/// `months_active` always comes from the stored worker record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub avg_income: f64,
    pub income_variance: f64,
    pub upi_txn_count: u32,
    pub bill_payment_score: u8,
    pub withdrawal_ratio: f64,
    pub months_active: u32,
}

impl FeatureVector {
    pub fn from_signals(signals: FinancialSignals, months_active: u32) -> Self {
        Self {
            avg_income: signals.avg_income,
            income_variance: signals.income_variance,
            upi_txn_count: signals.upi_txn_count,
            bill_payment_score: signals.bill_payment_score,
            withdrawal_ratio: signals.withdrawal_ratio,
            months_active,
        }
    }
}

/// Body of a score calculation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub user_id: String,
    pub avg_income: f64,
    pub income_variance: f64,
    pub upi_txn_count: u32,
    pub bill_payment_score: u8,
    pub withdrawal_ratio: f64,
}

impl ScoreRequest {
    pub fn signals(&self) -> FinancialSignals {
        FinancialSignals {
            avg_income: self.avg_income,
            income_variance: self.income_variance,
            upi_txn_count: self.upi_txn_count,
            bill_payment_score: self.bill_payment_score,
            withdrawal_ratio: self.withdrawal_ratio,
        }
    }
}

/// Score outcome handed to the credit profile store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCreditProfile {
    pub user_id: WorkerId,
    pub signals: FinancialSignals,
    pub result: ScoreResult,
    pub created_at: DateTime<Utc>,
}

impl NewCreditProfile {
    pub fn into_record(self, id: CreditProfileId) -> CreditProfileRecord {
        let ScoreResult {
            score,
            risk_category,
            explanations,
        } = self.result;

        CreditProfileRecord {
            id,
            user_id: self.user_id,
            avg_income: self.signals.avg_income,
            income_variance: self.signals.income_variance,
            upi_txn_count: self.signals.upi_txn_count,
            bill_payment_score: self.signals.bill_payment_score,
            withdrawal_ratio: self.signals.withdrawal_ratio,
            digital_trust_score: score,
            risk_category,
            explanation: explanations,
            created_at: self.created_at,
        }
    }
}

/// One persisted score calculation for a worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditProfileRecord {
    pub id: CreditProfileId,
    pub user_id: WorkerId,
    pub avg_income: f64,
    pub income_variance: f64,
    pub upi_txn_count: u32,
    pub bill_payment_score: u8,
    pub withdrawal_ratio: f64,
    pub digital_trust_score: u8,
    pub risk_category: RiskCategory,
    pub explanation: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl CreditProfileRecord {
    pub fn signals(&self) -> FinancialSignals {
        FinancialSignals {
            avg_income: self.avg_income,
            income_variance: self.income_variance,
            upi_txn_count: self.upi_txn_count,
            bill_payment_score: self.bill_payment_score,
            withdrawal_ratio: self.withdrawal_ratio,
        }
    }
}

/// Response returned after a score has been calculated and stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreCalculationView {
    pub user_id: WorkerId,
    pub digital_trust_score: u8,
    pub risk_category: RiskCategory,
    pub explanation: Vec<String>,
    pub credit_profile_id: CreditProfileId,
}

impl From<&CreditProfileRecord> for ScoreCalculationView {
    fn from(record: &CreditProfileRecord) -> Self {
        Self {
            user_id: record.user_id.clone(),
            digital_trust_score: record.digital_trust_score,
            risk_category: record.risk_category,
            explanation: record.explanation.clone(),
            credit_profile_id: record.id.clone(),
        }
    }
}

/// Worker details paired with their most recent score, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerDetailView {
    pub user: WorkerRecord,
    pub latest_credit_profile: Option<CreditProfileRecord>,
}

/// Advisory text derived from a worker's latest credit profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationView {
    pub user_id: WorkerId,
    pub credit_profile_id: CreditProfileId,
    pub digital_trust_score: u8,
    pub risk_category: RiskCategory,
    pub recommendations: Vec<String>,
}
