use super::super::domain::FeatureVector;
use super::risk::{RiskCategory, LOW_RISK_FLOOR};

struct Advice {
    applies: fn(u8, RiskCategory, &FeatureVector) -> bool,
    text: &'static str,
}

static ADVICE: &[Advice] = &[
    Advice {
        applies: |_, risk, _| risk == RiskCategory::HighRisk,
        text: "Priority: Focus on building financial stability and digital payment history",
    },
    Advice {
        applies: |_, _, f| f.income_variance >= 0.3,
        text: "Try to stabilize your income sources or maintain emergency savings",
    },
    Advice {
        applies: |_, _, f| f.upi_txn_count <= 30,
        text: "Increase digital payment usage through UPI for daily transactions",
    },
    Advice {
        applies: |_, _, f| f.bill_payment_score <= 7,
        text: "Set up automatic bill payments to improve payment consistency",
    },
    Advice {
        applies: |_, _, f| f.withdrawal_ratio > 0.7,
        text: "Reduce cash withdrawals and use digital payments more frequently",
    },
    Advice {
        applies: |score, _, _| score < LOW_RISK_FLOOR,
        text: "Continue working in your current role to build a stronger work history",
    },
];

/// Advisory text for improving a score. Each condition is checked on its own,
/// so anywhere from zero to six entries come back, always in the same order.
pub fn generate_recommendations(
    score: u8,
    risk_category: RiskCategory,
    features: &FeatureVector,
) -> Vec<String> {
    ADVICE
        .iter()
        .filter(|advice| (advice.applies)(score, risk_category, features))
        .map(|advice| advice.text.to_string())
        .collect()
}
