use std::fmt;

use serde::{Deserialize, Serialize};

/// Lowest score classified as low risk.
pub const LOW_RISK_FLOOR: u8 = 70;
/// Lowest score classified as medium risk.
pub const MEDIUM_RISK_FLOOR: u8 = 40;

/// Discrete risk band derived from a Digital Trust Score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskCategory {
    #[serde(rename = "High Risk")]
    HighRisk,
    #[serde(rename = "Medium Risk")]
    MediumRisk,
    #[serde(rename = "Low Risk")]
    LowRisk,
}

impl RiskCategory {
    pub const fn label(&self) -> &'static str {
        match self {
            RiskCategory::HighRisk => "High Risk",
            RiskCategory::MediumRisk => "Medium Risk",
            RiskCategory::LowRisk => "Low Risk",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Maps a score onto its risk band, checking the bands from high to low.
pub fn classify_risk(score: u8) -> RiskCategory {
    if score >= LOW_RISK_FLOOR {
        RiskCategory::LowRisk
    } else if score >= MEDIUM_RISK_FLOOR {
        RiskCategory::MediumRisk
    } else {
        RiskCategory::HighRisk
    }
}
