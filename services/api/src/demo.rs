use crate::infra::InMemoryStore;
use clap::Args;
use gig_trust::error::AppError;
use gig_trust::import::{BatchScore, FeatureBatchScorer};
use gig_trust::workers::{
    generate_recommendations, FeatureVector, FinancialSignals, RequestValidator, ScoreComponent,
    ScoreRequest, ScoreResult, TrustScoreEngine, WorkerRegistration, WorkerScoringService,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Average monthly income in rupees
    #[arg(long)]
    pub(crate) avg_income: f64,
    /// Normalized month-to-month income variance (0.0 to 1.0)
    #[arg(long)]
    pub(crate) income_variance: f64,
    /// UPI transactions per month
    #[arg(long)]
    pub(crate) upi_txn_count: u32,
    /// Bill payment consistency (0 to 10)
    #[arg(long)]
    pub(crate) bill_payment_score: u8,
    /// Share of income withdrawn as cash (0.0 to 1.0)
    #[arg(long)]
    pub(crate) withdrawal_ratio: f64,
    /// Months on the platform
    #[arg(long)]
    pub(crate) months_active: u32,
    /// Print the result as JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV export with one feature vector per row
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Print the scored rows as JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
struct ScoreReport {
    features: FeatureVector,
    result: ScoreResult,
    components: Vec<ScoreComponent>,
    recommendations: Vec<String>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let signals = FinancialSignals {
        avg_income: args.avg_income,
        income_variance: args.income_variance,
        upi_txn_count: args.upi_txn_count,
        bill_payment_score: args.bill_payment_score,
        withdrawal_ratio: args.withdrawal_ratio,
    };
    RequestValidator::default().signals(&signals)?;

    let report = score_report(
        &TrustScoreEngine::standard(),
        FeatureVector::from_signals(signals, args.months_active),
    );

    if args.json {
        print_json(&report);
    } else {
        render_score_report(&report);
    }
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let scores = FeatureBatchScorer::default().score_path(&args.csv)?;

    if args.json {
        print_json(&scores);
        return Ok(());
    }

    println!("Scored {} rows from {}", scores.len(), args.csv.display());
    for score in &scores {
        render_batch_row(score);
    }
    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    println!("Digital trust score demo");

    let store = Arc::new(InMemoryStore::default());
    let service = WorkerScoringService::new(store.clone(), store, TrustScoreEngine::standard());

    for (registration, signals) in sample_workers() {
        let name = registration.name.clone();
        let worker = match service.register(registration) {
            Ok(worker) => worker,
            Err(err) => {
                println!("  Registration for {} rejected: {}", name, err);
                continue;
            }
        };
        println!(
            "\n{} ({}, {} months active) -> id {}",
            worker.name, worker.job_type, worker.months_active, worker.id
        );

        let request = ScoreRequest {
            user_id: worker.id.to_string(),
            avg_income: signals.avg_income,
            income_variance: signals.income_variance,
            upi_txn_count: signals.upi_txn_count,
            bill_payment_score: signals.bill_payment_score,
            withdrawal_ratio: signals.withdrawal_ratio,
        };
        let view = match service.calculate_score(request) {
            Ok(view) => view,
            Err(err) => {
                println!("  Scoring unavailable: {}", err);
                continue;
            }
        };
        println!(
            "  Digital trust score {} ({})",
            view.digital_trust_score, view.risk_category
        );
        for line in &view.explanation {
            println!("    - {}", line);
        }

        match service.recommendations(worker.id.as_str()) {
            Ok(advice) if advice.recommendations.is_empty() => {
                println!("  Recommendations: none, keep it up");
            }
            Ok(advice) => {
                println!("  Recommendations:");
                for line in &advice.recommendations {
                    println!("    - {}", line);
                }
            }
            Err(err) => println!("  Recommendations unavailable: {}", err),
        }
    }

    match service.list() {
        Ok(workers) => println!("\n{} workers registered", workers.len()),
        Err(err) => println!("\nRegistry unavailable: {}", err),
    }
    Ok(())
}

fn sample_workers() -> Vec<(WorkerRegistration, FinancialSignals)> {
    vec![
        (
            WorkerRegistration {
                name: "Rajesh Kumar".to_string(),
                email: "rajesh.kumar@example.com".to_string(),
                job_type: "Delivery Driver".to_string(),
                months_active: 18,
            },
            FinancialSignals {
                avg_income: 28000.0,
                income_variance: 0.2,
                upi_txn_count: 45,
                bill_payment_score: 9,
                withdrawal_ratio: 0.4,
            },
        ),
        (
            WorkerRegistration {
                name: "Priya Sharma".to_string(),
                email: "priya.sharma@example.com".to_string(),
                job_type: "Freelance Designer".to_string(),
                months_active: 8,
            },
            FinancialSignals {
                avg_income: 18000.0,
                income_variance: 0.4,
                upi_txn_count: 25,
                bill_payment_score: 6,
                withdrawal_ratio: 0.6,
            },
        ),
        (
            WorkerRegistration {
                name: "Amit Patel".to_string(),
                email: "amit.patel@example.com".to_string(),
                job_type: "Ride Share Driver".to_string(),
                months_active: 3,
            },
            FinancialSignals {
                avg_income: 12000.0,
                income_variance: 0.6,
                upi_txn_count: 10,
                bill_payment_score: 3,
                withdrawal_ratio: 0.8,
            },
        ),
    ]
}

fn score_report(engine: &TrustScoreEngine, features: FeatureVector) -> ScoreReport {
    let result = engine.score(&features);
    let components = engine.breakdown(&features);
    let recommendations = generate_recommendations(result.score, result.risk_category, &features);

    ScoreReport {
        features,
        result,
        components,
        recommendations,
    }
}

fn render_score_report(report: &ScoreReport) {
    println!(
        "Digital trust score {} ({})",
        report.result.score, report.result.risk_category
    );
    println!("Factor contributions:");
    for component in &report.components {
        println!(
            "  - {} {:+}: {}",
            component.factor.label(),
            component.delta,
            component.explanation
        );
    }

    if report.recommendations.is_empty() {
        println!("No recommendations.");
    } else {
        println!("Recommendations:");
        for line in &report.recommendations {
            println!("  - {}", line);
        }
    }
}

fn render_batch_row(score: &BatchScore) {
    let label = score.worker.as_deref().unwrap_or("(unnamed)");
    println!(
        "- line {} {}: {} ({}) | {} recommendations",
        score.line,
        label,
        score.result.score,
        score.result.risk_category,
        score.recommendations.len()
    );
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(err) => println!("JSON output unavailable: {}", err),
    }
}
