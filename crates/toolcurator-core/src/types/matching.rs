//! Capability matching, scoring and recommendation value types

use serde::{Deserialize, Serialize};

/// How a capability satisfied a requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Case-insensitive equality
    Exact,
    /// One string contains the other
    Partial,
    /// Token overlap
    Semantic,
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchType::Exact => write!(f, "exact"),
            MatchType::Partial => write!(f, "partial"),
            MatchType::Semantic => write!(f, "semantic"),
        }
    }
}

/// Best capability found for one (tool, requirement) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCapabilityMatch {
    pub tool_id: String,
    pub capability: String,
    pub requirement: String,
    /// 0.0..=1.0
    pub score: f64,
    pub match_type: MatchType,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub details: String,
}

/// Weights applied by the match scorer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub capability: f64,
    pub compatibility: f64,
    pub usage: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            capability: 0.5,
            compatibility: 0.3,
            usage: 0.2,
        }
    }
}

impl ScoringWeights {
    pub fn new(capability: f64, compatibility: f64, usage: f64) -> Self {
        Self {
            capability,
            compatibility,
            usage,
        }
    }

    pub fn sum(&self) -> f64 {
        self.capability + self.compatibility + self.usage
    }

    /// True when all weights are non-negative and they sum to 1.0
    pub fn is_normalized(&self) -> bool {
        self.capability >= 0.0
            && self.compatibility >= 0.0
            && self.usage >= 0.0
            && (self.sum() - 1.0).abs() < 1e-6
    }
}

/// Audit trail of how a match score was computed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDetails {
    pub capability_score: f64,
    pub compatibility_score: f64,
    pub usage_score: f64,
    pub weights: ScoringWeights,
    pub capability_matches: Vec<ToolCapabilityMatch>,
    /// Explanation when the score could not be computed normally
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl MatchDetails {
    /// Count the contributing matches of a given type
    pub fn count_of(&self, match_type: MatchType) -> usize {
        self.capability_matches
            .iter()
            .filter(|m| m.match_type == match_type)
            .count()
    }
}

/// How well one tool satisfies one requirement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolMatchScore {
    pub tool_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirement_id: Option<String>,
    pub score: f64,
    pub match_details: MatchDetails,
}

/// Ranked recommendation for a requirement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolRecommendation {
    pub tool_id: String,
    pub requirement_id: String,
    pub score: f64,
    pub confidence: f64,
    pub reasoning: String,
    pub alternatives: Vec<String>,
}

/// Compatibility verdict computed by an external collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCompatibilityResult {
    pub tool_id: String,
    pub compatibility_score: f64,
    #[serde(default)]
    pub compatible_with: Vec<String>,
    #[serde(default)]
    pub issues: Vec<String>,
}

impl ToolCompatibilityResult {
    pub fn new(tool_id: impl Into<String>, compatibility_score: f64) -> Self {
        Self {
            tool_id: tool_id.into(),
            compatibility_score,
            compatible_with: Vec::new(),
            issues: Vec::new(),
        }
    }
}

/// Execution track record of a tool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolUsageStatistics {
    pub tool_id: String,
    pub total_executions: u64,
    pub successful_executions: u64,
    #[serde(default)]
    pub average_execution_time_ms: Option<f64>,
}

impl ToolUsageStatistics {
    pub fn new(tool_id: impl Into<String>, total_executions: u64, successful_executions: u64) -> Self {
        Self {
            tool_id: tool_id.into(),
            total_executions,
            successful_executions,
            average_execution_time_ms: None,
        }
    }

    /// successful / total, or 0.0 when the tool never ran
    pub fn success_rate(&self) -> f64 {
        if self.total_executions == 0 {
            return 0.0;
        }
        self.successful_executions as f64 / self.total_executions as f64
    }
}
