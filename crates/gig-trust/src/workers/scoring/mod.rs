//! Rule-based Digital Trust Score engine.
//!
//! Scoring walks a fixed, ordered table of rule groups. Each group fires exactly one
//! branch, adds its delta to a running total and contributes one explanation. The
//! total is clamped to `0..=100` once, after the last group.

mod recommendations;
mod risk;
mod rules;

pub use recommendations::generate_recommendations;
pub use risk::{classify_risk, RiskCategory, LOW_RISK_FLOOR, MEDIUM_RISK_FLOOR};
pub use rules::{RuleEffect, RuleGroup, ScoreFactor, ScoringRule};

use super::domain::FeatureVector;
use serde::{Deserialize, Serialize};

pub const MIN_SCORE: u8 = 0;
pub const MAX_SCORE: u8 = 100;

/// Stateless evaluator over an ordered rule table.
#[derive(Debug, Clone, Copy)]
pub struct TrustScoreEngine {
    groups: &'static [RuleGroup],
}

impl Default for TrustScoreEngine {
    fn default() -> Self {
        Self::standard()
    }
}

impl TrustScoreEngine {
    pub fn standard() -> Self {
        Self::with_rules(rules::STANDARD_RULES)
    }

    pub fn with_rules(groups: &'static [RuleGroup]) -> Self {
        Self { groups }
    }

    pub fn rule_groups(&self) -> &'static [RuleGroup] {
        self.groups
    }

    pub fn score(&self, features: &FeatureVector) -> ScoreResult {
        let mut accumulator: i32 = 0;
        let mut explanations = Vec::with_capacity(self.groups.len());

        for effect in self.fired(features) {
            accumulator = accumulator.saturating_add(effect.delta);
            explanations.push(effect.message.to_string());
        }

        let score = accumulator.clamp(MIN_SCORE as i32, MAX_SCORE as i32) as u8;

        ScoreResult {
            score,
            risk_category: classify_risk(score),
            explanations,
        }
    }

    /// Per-factor view of the branches that fired, before clamping.
    pub fn breakdown(&self, features: &FeatureVector) -> Vec<ScoreComponent> {
        self.groups
            .iter()
            .zip(self.fired(features))
            .map(|(group, effect)| ScoreComponent {
                factor: group.factor,
                delta: effect.delta,
                explanation: effect.message.to_string(),
            })
            .collect()
    }

    fn fired<'a>(&'a self, features: &'a FeatureVector) -> impl Iterator<Item = &'a RuleEffect> {
        self.groups.iter().map(move |group| group.select(features))
    }
}

/// Scores a feature vector with the standard rule table.
pub fn calculate_digital_trust_score(features: &FeatureVector) -> ScoreResult {
    TrustScoreEngine::standard().score(features)
}

/// Output of a single scoring run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: u8,
    pub risk_category: RiskCategory,
    pub explanations: Vec<String>,
}

impl ScoreResult {
    pub fn into_parts(self) -> (u8, RiskCategory, Vec<String>) {
        (self.score, self.risk_category, self.explanations)
    }
}

/// Discrete contribution of one factor, kept for audits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub delta: i32,
    pub explanation: String,
}
