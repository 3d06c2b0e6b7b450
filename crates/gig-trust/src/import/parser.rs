use serde::{Deserialize, Deserializer};
use std::io::Read;

use crate::workers::{FeatureVector, FinancialSignals};

#[derive(Debug)]
pub(crate) struct FeatureRow {
    pub(crate) line: u64,
    pub(crate) label: Option<String>,
    pub(crate) signals: FinancialSignals,
    pub(crate) months_active: u32,
}

impl FeatureRow {
    pub(crate) fn features(&self) -> FeatureVector {
        FeatureVector::from_signals(self.signals, self.months_active)
    }
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<FeatureRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut record = csv::StringRecord::new();
    let mut rows = Vec::new();

    while csv_reader.read_record(&mut record)? {
        let raw: RawRow = record.deserialize(Some(&headers))?;
        let line = record
            .position()
            .map(|position| position.line())
            .unwrap_or_default();
        rows.push(FeatureRow {
            line,
            label: raw.worker,
            signals: FinancialSignals {
                avg_income: raw.avg_income,
                income_variance: raw.income_variance,
                upi_txn_count: raw.upi_txn_count,
                bill_payment_score: raw.bill_payment_score,
                withdrawal_ratio: raw.withdrawal_ratio,
            },
            months_active: raw.months_active,
        });
    }

    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    worker: Option<String>,
    avg_income: f64,
    income_variance: f64,
    upi_txn_count: u32,
    bill_payment_score: u8,
    withdrawal_ratio: f64,
    months_active: u32,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
