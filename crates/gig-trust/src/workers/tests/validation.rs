use super::common::*;
use chrono::Utc;

use crate::workers::domain::{FinancialSignals, WorkerId};
use crate::workers::validation::{RequestValidator, ValidationError};

fn signals() -> FinancialSignals {
    score_request("ignored").signals()
}

#[test]
fn registration_trims_and_keeps_fields() {
    let validator = RequestValidator::default();
    let mut payload = registration("  rajesh.kumar@example.com ", 18);
    payload.name = "  Rajesh Kumar ".to_string();

    let worker = validator
        .registration(payload, Utc::now())
        .expect("valid registration");

    assert_eq!(worker.name, "Rajesh Kumar");
    assert_eq!(worker.email, "rajesh.kumar@example.com");
    assert_eq!(worker.job_type, "Delivery Driver");
    assert_eq!(worker.months_active, 18);
}

#[test]
fn registration_rejects_blank_and_oversized_text() {
    let validator = RequestValidator::default();

    let mut blank = registration("a@example.com", 1);
    blank.name = "   ".to_string();
    assert!(matches!(
        validator.registration(blank, Utc::now()),
        Err(ValidationError::TextLength { field: "name", .. })
    ));

    let mut long_job = registration("a@example.com", 1);
    long_job.job_type = "x".repeat(51);
    assert!(matches!(
        validator.registration(long_job, Utc::now()),
        Err(ValidationError::TextLength {
            field: "job_type",
            max: 50,
            ..
        })
    ));

    let mut exact = registration("a@example.com", 1);
    exact.name = "é".repeat(100);
    assert!(validator.registration(exact, Utc::now()).is_ok());
}

#[test]
fn registration_rejects_malformed_emails() {
    let validator = RequestValidator::default();

    for email in [
        "",
        "plainaddress",
        "@example.com",
        "user@",
        "user@localhost",
        "user@@example.com",
        "user@example..com",
        "us er@example.com",
    ] {
        assert_eq!(
            validator.registration(registration(email, 3), Utc::now()),
            Err(ValidationError::InvalidEmail),
            "{email} should be rejected"
        );
    }
}

#[test]
fn signals_accept_interval_edges() {
    let validator = RequestValidator::default();
    let mut edges = signals();
    edges.avg_income = 0.0;
    edges.income_variance = 1.0;
    edges.withdrawal_ratio = 0.0;
    edges.bill_payment_score = 10;

    assert_eq!(validator.signals(&edges), Ok(()));
}

#[test]
fn signals_reject_out_of_range_values() {
    let validator = RequestValidator::default();

    let mut negative_income = signals();
    negative_income.avg_income = -1.0;
    assert!(matches!(
        validator.signals(&negative_income),
        Err(ValidationError::Negative {
            field: "avg_income",
            ..
        })
    ));

    let mut variance = signals();
    variance.income_variance = 1.01;
    assert!(matches!(
        validator.signals(&variance),
        Err(ValidationError::OutOfRange {
            field: "income_variance",
            ..
        })
    ));

    let mut withdrawal = signals();
    withdrawal.withdrawal_ratio = -0.1;
    assert!(matches!(
        validator.signals(&withdrawal),
        Err(ValidationError::OutOfRange {
            field: "withdrawal_ratio",
            ..
        })
    ));

    let mut bills = signals();
    bills.bill_payment_score = 11;
    assert!(matches!(
        validator.signals(&bills),
        Err(ValidationError::OutOfRange {
            field: "bill_payment_score",
            ..
        })
    ));

    let mut nan = signals();
    nan.income_variance = f64::NAN;
    assert_eq!(
        validator.signals(&nan),
        Err(ValidationError::NotFinite {
            field: "income_variance"
        })
    );
}

#[test]
fn worker_ids_must_be_twenty_four_hex_characters() {
    assert!(WorkerId::parse("507f1f77bcf86cd799439011").is_some());
    assert_eq!(
        WorkerId::parse("507F1F77BCF86CD799439011"),
        Some(WorkerId("507f1f77bcf86cd799439011".to_string()))
    );
    assert!(WorkerId::parse("507f1f77bcf86cd79943901").is_none());
    assert!(WorkerId::parse("507f1f77bcf86cd79943901z").is_none());
    assert!(WorkerId::parse("not-an-id").is_none());

    let generated = unknown_worker_id();
    assert!(WorkerId::parse(&generated).is_some());
}
