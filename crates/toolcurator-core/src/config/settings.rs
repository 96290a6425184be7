//! Tunable curator and evaluator settings
//!
//! Serde defaults equal the built-in constants, so a config file only needs
//! to mention what it overrides.

use serde::{Deserialize, Serialize};

use crate::types::{CriterionWeights, ScoringWeights};
use super::traits::{ConfigError, ConfigResult};

/// Matching, scoring and recommendation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CuratorSettings {
    /// Minimum best-capability score for a requirement to count as matched
    pub semantic_similarity_threshold: f64,
    /// Match scores below this are never recommended
    pub min_recommendation_score: f64,
    /// Upper bound on recommendations per requirement
    pub max_recommendations: usize,
    /// Match scorer weights (must sum to 1.0)
    pub weights: ScoringWeights,
}

impl Default for CuratorSettings {
    fn default() -> Self {
        Self {
            semantic_similarity_threshold: 0.7,
            min_recommendation_score: 0.5,
            max_recommendations: 5,
            weights: ScoringWeights::default(),
        }
    }
}

impl CuratorSettings {
    pub fn validate(&self) -> ConfigResult<()> {
        check_unit("semantic_similarity_threshold", self.semantic_similarity_threshold)?;
        check_unit("min_recommendation_score", self.min_recommendation_score)?;
        if self.max_recommendations == 0 {
            return Err(ConfigError::InvalidSettings(
                "max_recommendations must be at least 1".to_string(),
            ));
        }
        if !self.weights.is_normalized() {
            return Err(ConfigError::InvalidSettings(format!(
                "scoring weights must be non-negative and sum to 1.0 (got {:.4})",
                self.weights.sum()
            )));
        }
        Ok(())
    }
}

/// Evaluation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationSettings {
    /// Relative weight of each criterion in the overall score
    pub weights: CriterionWeights,
    /// Memory budget a tool is measured against
    pub max_memory_mb: f64,
}

impl Default for EvaluationSettings {
    fn default() -> Self {
        Self {
            weights: CriterionWeights::default(),
            max_memory_mb: 512.0,
        }
    }
}

impl EvaluationSettings {
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.weights.is_valid() {
            return Err(ConfigError::InvalidSettings(
                "criterion weights must be non-negative with at least one positive".to_string(),
            ));
        }
        if !(self.max_memory_mb > 0.0) {
            return Err(ConfigError::InvalidSettings(
                "max_memory_mb must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn check_unit(name: &str, value: f64) -> ConfigResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidSettings(format!(
            "{} must be within [0, 1] (got {})",
            name, value
        )))
    }
}
