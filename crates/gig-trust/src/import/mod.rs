//! Offline scoring of feature vectors exported as CSV.
//!
//! Expected columns: `avg_income`, `income_variance`, `upi_txn_count`,
//! `bill_payment_score`, `withdrawal_ratio`, `months_active` and an optional
//! `worker` label.

mod parser;

use serde::Serialize;
use std::io::Read;
use std::path::Path;

use crate::workers::{
    generate_recommendations, FeatureVector, RequestValidator, ScoreResult, TrustScoreEngine,
    ValidationError,
};

#[derive(Debug)]
pub enum FeatureImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Invalid { line: u64, source: ValidationError },
}

impl std::fmt::Display for FeatureImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureImportError::Io(err) => write!(f, "failed to read feature export: {}", err),
            FeatureImportError::Csv(err) => write!(f, "invalid feature CSV data: {}", err),
            FeatureImportError::Invalid { line, source } => {
                write!(f, "row on line {} rejected: {}", line, source)
            }
        }
    }
}

impl std::error::Error for FeatureImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FeatureImportError::Io(err) => Some(err),
            FeatureImportError::Csv(err) => Some(err),
            FeatureImportError::Invalid { source, .. } => Some(source),
        }
    }
}

impl From<std::io::Error> for FeatureImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for FeatureImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Scored CSV row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchScore {
    pub line: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker: Option<String>,
    pub features: FeatureVector,
    pub result: ScoreResult,
    pub recommendations: Vec<String>,
}

pub struct FeatureBatchScorer {
    validator: RequestValidator,
    engine: TrustScoreEngine,
}

impl Default for FeatureBatchScorer {
    fn default() -> Self {
        Self::new(RequestValidator::default(), TrustScoreEngine::standard())
    }
}

impl FeatureBatchScorer {
    pub fn new(validator: RequestValidator, engine: TrustScoreEngine) -> Self {
        Self { validator, engine }
    }

    pub fn score_path<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<Vec<BatchScore>, FeatureImportError> {
        let file = std::fs::File::open(path)?;
        self.score_reader(file)
    }

    /// Rows are validated like API requests; the first invalid row aborts the batch.
    pub fn score_reader<R: Read>(&self, reader: R) -> Result<Vec<BatchScore>, FeatureImportError> {
        parser::parse_rows(reader)?
            .into_iter()
            .map(|row| {
                self.validator
                    .signals(&row.signals)
                    .map_err(|source| FeatureImportError::Invalid {
                        line: row.line,
                        source,
                    })?;

                let features = row.features();
                let result = self.engine.score(&features);
                let recommendations =
                    generate_recommendations(result.score, result.risk_category, &features);

                Ok(BatchScore {
                    line: row.line,
                    worker: row.label,
                    features,
                    result,
                    recommendations,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workers::RiskCategory;
    use std::io::Cursor;

    const HEADER: &str =
        "worker,avg_income,income_variance,upi_txn_count,bill_payment_score,withdrawal_ratio,months_active\n";

    #[test]
    fn scores_each_row_in_order() {
        let csv = format!(
            "{HEADER}Rajesh,28000,0.2,45,9,0.4,18\nPriya,18000,0.4,25,6,0.6,8\n,12000,0.6,10,3,0.8,3\n"
        );

        let scores = FeatureBatchScorer::default()
            .score_reader(Cursor::new(csv))
            .expect("batch scores");

        assert_eq!(scores.len(), 3);
        assert_eq!(scores[0].worker.as_deref(), Some("Rajesh"));
        assert_eq!(scores[0].result.score, 90);
        assert_eq!(scores[0].result.risk_category, RiskCategory::LowRisk);
        assert_eq!(scores[1].result.score, 35);
        assert_eq!(scores[1].result.risk_category, RiskCategory::HighRisk);
        assert_eq!(scores[2].worker, None);
        assert_eq!(scores[2].result.score, 0);
        assert_eq!(scores[2].recommendations.len(), 6);
        assert_eq!(scores[2].line, 4);
    }

    #[test]
    fn worker_column_is_optional() {
        let csv = "avg_income,income_variance,upi_txn_count,bill_payment_score,withdrawal_ratio,months_active\n31000, 0.1, 31, 8, 0.2, 12\n";

        let scores = FeatureBatchScorer::default()
            .score_reader(Cursor::new(csv))
            .expect("batch scores");

        assert_eq!(scores[0].result.score, 90);
        assert!(scores[0].recommendations.is_empty());
    }

    #[test]
    fn out_of_range_rows_report_their_line() {
        let csv = format!("{HEADER}ok,20000,0.2,20,5,0.3,7\nbad,20000,1.4,20,5,0.3,7\n");

        let err = FeatureBatchScorer::default()
            .score_reader(Cursor::new(csv))
            .expect_err("variance above 1 is rejected");

        match err {
            FeatureImportError::Invalid { line, source } => {
                assert_eq!(line, 3);
                assert!(matches!(
                    source,
                    ValidationError::OutOfRange {
                        field: "income_variance",
                        ..
                    }
                ));
            }
            other => panic!("expected invalid row, got {other:?}"),
        }
    }

    #[test]
    fn malformed_numbers_surface_csv_errors() {
        let csv = format!("{HEADER}x,lots,0.2,20,5,0.3,7\n");

        let err = FeatureBatchScorer::default()
            .score_reader(Cursor::new(csv))
            .expect_err("non numeric income fails");

        assert!(matches!(err, FeatureImportError::Csv(_)));
    }
}
