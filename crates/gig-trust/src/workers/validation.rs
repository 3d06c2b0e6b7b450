use chrono::{DateTime, Utc};

use super::domain::{FinancialSignals, NewWorker, WorkerRegistration};

/// Validation errors raised before a request reaches the registry or the engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be between {min} and {max} characters")]
    TextLength {
        field: &'static str,
        min: usize,
        max: usize,
    },
    #[error("value is not a valid email address")]
    InvalidEmail,
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("{field} must be greater than or equal to 0 (found {found})")]
    Negative { field: &'static str, found: f64 },
    #[error("{field} must be between {min} and {max} (found {found})")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        found: f64,
    },
}

/// Field limits enforced on inbound requests.
#[derive(Debug, Clone, PartialEq)]
struct ValidationLimits {
    name_max_chars: usize,
    job_type_max_chars: usize,
    bill_payment_score_max: u8,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            name_max_chars: 100,
            job_type_max_chars: 50,
            bill_payment_score_max: 10,
        }
    }
}

/// Turns raw payloads into values the registry and engine can trust.
#[derive(Debug, Clone, Default)]
pub struct RequestValidator {
    limits: ValidationLimits,
}

impl RequestValidator {
    pub fn registration(
        &self,
        registration: WorkerRegistration,
        created_at: DateTime<Utc>,
    ) -> Result<NewWorker, ValidationError> {
        let name = bounded_text("name", &registration.name, self.limits.name_max_chars)?;
        let job_type = bounded_text(
            "job_type",
            &registration.job_type,
            self.limits.job_type_max_chars,
        )?;

        let email = registration.email.trim();
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail);
        }

        Ok(NewWorker {
            name,
            email: email.to_string(),
            job_type,
            months_active: registration.months_active,
            created_at,
        })
    }

    pub fn signals(&self, signals: &FinancialSignals) -> Result<(), ValidationError> {
        non_negative("avg_income", signals.avg_income)?;
        unit_interval("income_variance", signals.income_variance)?;
        unit_interval("withdrawal_ratio", signals.withdrawal_ratio)?;

        let max = self.limits.bill_payment_score_max;
        if signals.bill_payment_score > max {
            return Err(ValidationError::OutOfRange {
                field: "bill_payment_score",
                min: 0.0,
                max: f64::from(max),
                found: f64::from(signals.bill_payment_score),
            });
        }

        Ok(())
    }
}

fn bounded_text(field: &'static str, raw: &str, max: usize) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    let length = trimmed.chars().count();
    if length == 0 || length > max {
        return Err(ValidationError::TextLength { field, min: 1, max });
    }
    Ok(trimmed.to_string())
}

fn finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NotFinite { field })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if finite(field, value)? < 0.0 {
        return Err(ValidationError::Negative {
            field,
            found: value,
        });
    }
    Ok(())
}

fn unit_interval(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !(0.0..=1.0).contains(&finite(field, value)?) {
        return Err(ValidationError::OutOfRange {
            field,
            min: 0.0,
            max: 1.0,
            found: value,
        });
    }
    Ok(())
}

fn is_valid_email(raw: &str) -> bool {
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') || raw.chars().any(char::is_whitespace) {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}
