//! Scoring configuration for the composite index
//!
//! This module contains the index weight table, the ranges used when
//! qualitative scores are mocked, and the degenerate-normalization policy.

use crate::core::Factor;
use serde::{Deserialize, Serialize};

/// Weight table for the composite index.
///
/// `talent_availability_score` has no entry: it is produced alongside the
/// other qualitative scores but is not part of the weighted sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexWeights {
    #[serde(default = "default_internet_users_weight")]
    pub internet_users: f64,

    #[serde(default = "default_gdp_per_capita_weight")]
    pub gdp_per_capita: f64,

    #[serde(default = "default_ai_use_cases_weight")]
    pub ai_use_cases: f64,

    #[serde(default = "default_regulation_weight")]
    pub regulation: f64,

    #[serde(default = "default_governance_frameworks_weight")]
    pub governance_frameworks: f64,
}

impl Default for IndexWeights {
    fn default() -> Self {
        Self {
            internet_users: default_internet_users_weight(),
            gdp_per_capita: default_gdp_per_capita_weight(),
            ai_use_cases: default_ai_use_cases_weight(),
            regulation: default_regulation_weight(),
            governance_frameworks: default_governance_frameworks_weight(),
        }
    }
}

impl IndexWeights {
    pub fn weight(&self, factor: Factor) -> f64 {
        match factor {
            Factor::InternetUsers => self.internet_users,
            Factor::GdpPerCapita => self.gdp_per_capita,
            Factor::AiUseCases => self.ai_use_cases,
            Factor::Regulation => self.regulation,
            Factor::GovernanceFrameworks => self.governance_frameworks,
        }
    }

    pub fn sum(&self) -> f64 {
        Factor::ALL.iter().map(|f| self.weight(*f)).sum()
    }

    // Pure function: Check if a weight is in valid range
    pub fn is_valid_weight(weight: f64) -> bool {
        (0.0..=1.0).contains(&weight)
    }

    /// Validate each weight is in [0, 1] and the table sums to 1.0
    pub fn validate(&self) -> Result<(), String> {
        for factor in Factor::ALL {
            let weight = self.weight(factor);
            if !Self::is_valid_weight(weight) {
                return Err(format!(
                    "{} weight must be between 0.0 and 1.0, got {}",
                    factor.column(),
                    weight
                ));
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > 0.001 {
            return Err(format!("Index weights must sum to 1.0, but sum to {:.3}", sum));
        }
        Ok(())
    }

    /// Rescale so the weights sum to 1.0. No-op for an all-zero table.
    pub fn normalize(&mut self) {
        let sum = self.sum();
        if sum > 0.0 && (sum - 1.0).abs() > f64::EPSILON {
            self.internet_users /= sum;
            self.gdp_per_capita /= sum;
            self.ai_use_cases /= sum;
            self.regulation /= sum;
            self.governance_frameworks /= sum;
        }
    }
}

pub fn default_internet_users_weight() -> f64 {
    0.15
}
pub fn default_gdp_per_capita_weight() -> f64 {
    0.15
}
pub fn default_ai_use_cases_weight() -> f64 {
    0.25
}
pub fn default_regulation_weight() -> f64 {
    0.25
}
pub fn default_governance_frameworks_weight() -> f64 {
    0.20
}

/// Half-open uniform range `[low, high)` for a mocked score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRange {
    pub low: f64,
    pub high: f64,
}

impl ScoreRange {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn is_valid(&self) -> bool {
        self.low < self.high && (self.high - self.low).is_finite()
    }
}

/// Mocked qualitative score generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoresConfig {
    /// Seed for the generator created per index invocation
    #[serde(default = "default_seed")]
    pub seed: u64,

    #[serde(default = "default_ai_use_cases_range")]
    pub ai_use_cases: ScoreRange,

    #[serde(default = "default_regulation_range")]
    pub regulation: ScoreRange,

    #[serde(default = "default_governance_frameworks_range")]
    pub governance_frameworks: ScoreRange,

    #[serde(default = "default_talent_availability_range")]
    pub talent_availability: ScoreRange,
}

impl Default for ScoresConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            ai_use_cases: default_ai_use_cases_range(),
            regulation: default_regulation_range(),
            governance_frameworks: default_governance_frameworks_range(),
            talent_availability: default_talent_availability_range(),
        }
    }
}

impl ScoresConfig {
    pub fn validate(&self) -> Result<(), String> {
        let ranges = [
            ("ai_use_cases", self.ai_use_cases),
            ("regulation", self.regulation),
            ("governance_frameworks", self.governance_frameworks),
            ("talent_availability", self.talent_availability),
        ];
        match ranges.iter().find(|(_, range)| !range.is_valid()) {
            Some((name, range)) => Err(format!(
                "{} score range must satisfy low < high with a finite width, got [{}, {}]",
                name, range.low, range.high
            )),
            None => Ok(()),
        }
    }
}

fn default_seed() -> u64 {
    42
}
fn default_ai_use_cases_range() -> ScoreRange {
    ScoreRange::new(2.5, 5.0)
}
fn default_regulation_range() -> ScoreRange {
    ScoreRange::new(2.0, 5.0)
}
fn default_governance_frameworks_range() -> ScoreRange {
    ScoreRange::new(2.5, 5.0)
}
fn default_talent_availability_range() -> ScoreRange {
    ScoreRange::new(2.0, 5.0)
}

/// Policy for min-max normalization when every value is equal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizationConfig {
    /// Value emitted for every row when max == min (default: 0.5)
    #[serde(default = "default_degenerate_fallback")]
    pub degenerate_fallback: f64,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            degenerate_fallback: default_degenerate_fallback(),
        }
    }
}

fn default_degenerate_fallback() -> f64 {
    0.5
}
