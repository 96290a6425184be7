//! Weighted match scoring

use std::sync::Arc;

use crate::config::{ConfigError, ConfigResult, CuratorSettings};
use crate::logging::{Logger, NoOpLogger};
use crate::types::{
    MatchDetails, ScoringWeights, ToolCapabilityMatch, ToolCompatibilityResult, ToolMatchScore,
    ToolUsageStatistics,
};

/// Compatibility assumed when no compatibility result is supplied
pub const DEFAULT_COMPATIBILITY_SCORE: f64 = 1.0;
/// Usage assumed when no track record is supplied
pub const DEFAULT_USAGE_SCORE: f64 = 0.0;

/// Combines capability, compatibility and usage into one match score
pub struct MatchScorer {
    weights: ScoringWeights,
    logger: Arc<dyn Logger>,
}

impl Default for MatchScorer {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            logger: Arc::new(NoOpLogger),
        }
    }
}

impl MatchScorer {
    /// Create a scorer; weights must be non-negative and sum to 1.0
    pub fn new(weights: ScoringWeights) -> ConfigResult<Self> {
        if !weights.is_normalized() {
            return Err(ConfigError::InvalidSettings(format!(
                "scoring weights must be non-negative and sum to 1.0 (got {:.4})",
                weights.sum()
            )));
        }
        Ok(Self {
            weights,
            logger: Arc::new(NoOpLogger),
        })
    }

    pub fn from_settings(settings: &CuratorSettings) -> ConfigResult<Self> {
        Self::new(settings.weights)
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn weights(&self) -> ScoringWeights {
        self.weights
    }

    /// Score one tool against one requirement
    ///
    /// Missing compatibility counts as fully compatible; missing or empty
    /// usage counts as no track record. With no capability matches the score
    /// is 0.0 and `match_details.note` says why.
    pub fn score(
        &self,
        capability_matches: &[ToolCapabilityMatch],
        compatibility: Option<&ToolCompatibilityResult>,
        usage: Option<&ToolUsageStatistics>,
        requirement_id: Option<&str>,
    ) -> ToolMatchScore {
        let tool_id = capability_matches
            .first()
            .map(|m| m.tool_id.clone())
            .or_else(|| compatibility.map(|c| c.tool_id.clone()))
            .or_else(|| usage.map(|u| u.tool_id.clone()))
            .unwrap_or_default();

        let compatibility_score = compatibility
            .map(|c| c.compatibility_score)
            .unwrap_or(DEFAULT_COMPATIBILITY_SCORE);
        let usage_score = usage.map(|u| u.success_rate()).unwrap_or(DEFAULT_USAGE_SCORE);

        if capability_matches.is_empty() {
            self.logger.warn(&format!(
                "[MatchScorer] No capability matches for tool '{}', scoring 0",
                tool_id
            ));
            return ToolMatchScore {
                tool_id,
                requirement_id: requirement_id.map(String::from),
                score: 0.0,
                match_details: MatchDetails {
                    capability_score: 0.0,
                    compatibility_score,
                    usage_score,
                    weights: self.weights,
                    capability_matches: Vec::new(),
                    note: Some("no capability matches; nothing to score".to_string()),
                },
            };
        }

        let capability_score = capability_matches.iter().map(|m| m.score).sum::<f64>()
            / capability_matches.len() as f64;

        let score = self.weights.capability * capability_score
            + self.weights.compatibility * compatibility_score
            + self.weights.usage * usage_score;

        self.logger.debug(&format!(
            "[MatchScorer] {}: capability={:.3} compatibility={:.3} usage={:.3} -> {:.3}",
            tool_id, capability_score, compatibility_score, usage_score, score
        ));

        ToolMatchScore {
            tool_id,
            requirement_id: requirement_id.map(String::from),
            score,
            match_details: MatchDetails {
                capability_score,
                compatibility_score,
                usage_score,
                weights: self.weights,
                capability_matches: capability_matches.to_vec(),
                note: None,
            },
        }
    }
}
