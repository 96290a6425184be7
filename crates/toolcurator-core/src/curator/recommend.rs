//! Recommendation ranking and reasoning text

use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::CuratorSettings;
use crate::logging::{Logger, NoOpLogger};
use crate::types::{MatchDetails, MatchType, ToolMatchScore, ToolRecommendation};

/// Confidence lost per rank position
pub const POSITION_PENALTY: f64 = 0.05;
/// How many following candidates are offered as alternatives
pub const ALTERNATIVES_WINDOW: usize = 3;

/// Caller-supplied context appended to reasoning text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_type: Option<String>,
}

impl RecommendationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project_type(mut self, project_type: impl Into<String>) -> Self {
        self.project_type = Some(project_type.into());
        self
    }

    pub fn with_agent_type(mut self, agent_type: impl Into<String>) -> Self {
        self.agent_type = Some(agent_type.into());
        self
    }
}

/// Ranks match scores into recommendations
pub struct RecommendationGenerator {
    min_score: f64,
    max_recommendations: usize,
    logger: Arc<dyn Logger>,
}

impl Default for RecommendationGenerator {
    fn default() -> Self {
        Self::from_settings(&CuratorSettings::default())
    }
}

impl RecommendationGenerator {
    pub fn new(min_score: f64, max_recommendations: usize) -> Self {
        Self {
            min_score,
            max_recommendations,
            logger: Arc::new(NoOpLogger),
        }
    }

    pub fn from_settings(settings: &CuratorSettings) -> Self {
        Self::new(settings.min_recommendation_score, settings.max_recommendations)
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    /// Filter, rank and explain match scores for one requirement
    ///
    /// Scores below the minimum are dropped, the rest are sorted by score
    /// (stable, descending) and truncated. Alternatives for position `i` are
    /// the tools at `i+1..=i+3` of the full qualified ranking, so truncated
    /// candidates can still appear as alternatives.
    pub fn generate(
        &self,
        match_scores: &[ToolMatchScore],
        requirement_id: &str,
        context: Option<&RecommendationContext>,
    ) -> Vec<ToolRecommendation> {
        let mut qualified: Vec<&ToolMatchScore> = match_scores
            .iter()
            .filter(|m| m.score >= self.min_score)
            .collect();

        if qualified.is_empty() {
            self.logger.info(&format!(
                "[RecommendationGenerator] No tool reached {:.2} for requirement '{}'",
                self.min_score, requirement_id
            ));
            return Vec::new();
        }

        qualified.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        let recommendations: Vec<ToolRecommendation> = qualified
            .iter()
            .take(self.max_recommendations)
            .enumerate()
            .map(|(i, m)| {
                let alternatives = qualified
                    .iter()
                    .skip(i + 1)
                    .take(ALTERNATIVES_WINDOW)
                    .map(|alt| alt.tool_id.clone())
                    .collect();

                ToolRecommendation {
                    tool_id: m.tool_id.clone(),
                    requirement_id: requirement_id.to_string(),
                    score: m.score,
                    confidence: m.score * (1.0 - POSITION_PENALTY * i as f64),
                    reasoning: reasoning(&m.match_details, context),
                    alternatives,
                }
            })
            .collect();

        self.logger.debug(&format!(
            "[RecommendationGenerator] {} of {} candidates recommended for '{}'",
            recommendations.len(),
            match_scores.len(),
            requirement_id
        ));

        recommendations
    }
}

fn band(score: f64) -> Option<&'static str> {
    if score >= 0.9 {
        Some("excellent")
    } else if score >= 0.7 {
        Some("good")
    } else if score >= 0.5 {
        Some("adequate")
    } else {
        None
    }
}

/// Human-facing explanation of a match score
pub fn reasoning(details: &MatchDetails, context: Option<&RecommendationContext>) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(label) = band(details.capability_score) {
        parts.push(format!("Tool has {} capability matches.", label));
    }
    if let Some(label) = band(details.compatibility_score) {
        parts.push(format!("Tool has {} compatibility.", label));
    }
    if let Some(label) = band(details.usage_score) {
        parts.push(format!("Tool has {} usage history.", label));
    }

    for (match_type, verb) in [
        (MatchType::Exact, "exactly"),
        (MatchType::Partial, "partially"),
        (MatchType::Semantic, "semantically"),
    ] {
        let count = details.count_of(match_type);
        if count > 0 {
            parts.push(format!("Tool {} matches {} requirement(s).", verb, count));
        }
    }

    if let Some(ctx) = context {
        if let Some(project_type) = &ctx.project_type {
            parts.push(format!("Suitable for {} projects.", project_type));
        }
        if let Some(agent_type) = &ctx.agent_type {
            parts.push(format!("Recommended for {} agents.", agent_type));
        }
    }

    parts.join(" ")
}
