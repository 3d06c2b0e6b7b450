use std::fmt;

use serde::{Deserialize, Serialize};

use super::super::domain::FeatureVector;

/// Behavioral factor a rule group speaks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    IncomeStability,
    DigitalActivity,
    BillPayments,
    WorkTenure,
    CashWithdrawal,
    IncomeLevel,
}

impl ScoreFactor {
    pub const fn label(&self) -> &'static str {
        match self {
            ScoreFactor::IncomeStability => "Income stability",
            ScoreFactor::DigitalActivity => "Digital payment activity",
            ScoreFactor::BillPayments => "Bill payments",
            ScoreFactor::WorkTenure => "Work tenure",
            ScoreFactor::CashWithdrawal => "Cash withdrawals",
            ScoreFactor::IncomeLevel => "Income level",
        }
    }
}

/// Score change and explanation produced by a fired branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleEffect {
    pub delta: i32,
    pub message: &'static str,
}

/// Guarded branch inside a rule group.
#[derive(Clone, Copy)]
pub struct ScoringRule {
    pub when: fn(&FeatureVector) -> bool,
    pub effect: RuleEffect,
}

impl fmt::Debug for ScoringRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScoringRule")
            .field("effect", &self.effect)
            .finish_non_exhaustive()
    }
}

/// Ordered branches for one factor. `otherwise` fires when no guard matches,
/// so every group yields exactly one effect.
#[derive(Debug, Clone, Copy)]
pub struct RuleGroup {
    pub factor: ScoreFactor,
    pub rules: &'static [ScoringRule],
    pub otherwise: RuleEffect,
}

impl RuleGroup {
    pub fn select(&self, features: &FeatureVector) -> &RuleEffect {
        self.rules
            .iter()
            .find(|rule| (rule.when)(features))
            .map(|rule| &rule.effect)
            .unwrap_or(&self.otherwise)
    }
}

const fn rule(when: fn(&FeatureVector) -> bool, delta: i32, message: &'static str) -> ScoringRule {
    ScoringRule {
        when,
        effect: RuleEffect { delta, message },
    }
}

const fn otherwise(delta: i32, message: &'static str) -> RuleEffect {
    RuleEffect { delta, message }
}

pub(crate) static STANDARD_RULES: &[RuleGroup] = &[
    RuleGroup {
        factor: ScoreFactor::IncomeStability,
        rules: &[rule(
            |f| f.income_variance < 0.3,
            25,
            "Stable income pattern detected with low variance",
        )],
        otherwise: otherwise(
            0,
            "Income fluctuation detected - consider stabilizing earnings",
        ),
    },
    RuleGroup {
        factor: ScoreFactor::DigitalActivity,
        rules: &[
            rule(
                |f| f.upi_txn_count > 30,
                20,
                "High UPI transaction activity observed - strong digital footprint",
            ),
            rule(
                |f| f.upi_txn_count > 15,
                10,
                "Moderate UPI transaction activity detected",
            ),
        ],
        otherwise: otherwise(
            0,
            "Low digital payment activity - increase UPI usage for better score",
        ),
    },
    RuleGroup {
        factor: ScoreFactor::BillPayments,
        rules: &[
            rule(
                |f| f.bill_payment_score > 7,
                20,
                "Regular bill payments recorded - demonstrates financial discipline",
            ),
            rule(
                |f| f.bill_payment_score > 4,
                10,
                "Occasional bill payments detected",
            ),
        ],
        otherwise: otherwise(
            0,
            "Irregular bill payment history - maintain consistent payments",
        ),
    },
    RuleGroup {
        factor: ScoreFactor::WorkTenure,
        rules: &[
            rule(
                |f| f.months_active >= 12,
                25,
                "Long-term work activity improves trust and stability",
            ),
            rule(
                |f| f.months_active >= 6,
                15,
                "Moderate work duration demonstrates some commitment",
            ),
        ],
        otherwise: otherwise(
            0,
            "Short work history - longer tenure will improve creditworthiness",
        ),
    },
    RuleGroup {
        factor: ScoreFactor::CashWithdrawal,
        rules: &[
            rule(
                |f| f.withdrawal_ratio > 0.7,
                -10,
                "High cash withdrawal behavior increases risk - reduce dependency on cash",
            ),
            rule(
                |f| f.withdrawal_ratio > 0.5,
                0,
                "Moderate cash withdrawal ratio detected",
            ),
        ],
        otherwise: otherwise(
            0,
            "Low withdrawal ratio indicates good digital transaction habits",
        ),
    },
    // Commentary only: no branch moves the score.
    RuleGroup {
        factor: ScoreFactor::IncomeLevel,
        rules: &[
            rule(
                |f| f.avg_income > 30000.0,
                0,
                "Above-average income level supports creditworthiness",
            ),
            rule(
                |f| f.avg_income > 15000.0,
                0,
                "Moderate income level observed",
            ),
        ],
        otherwise: otherwise(
            0,
            "Lower income bracket - focus on building savings and reducing withdrawals",
        ),
    },
];
