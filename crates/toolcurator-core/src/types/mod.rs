//! Core value types shared across the curator
//!
//! Everything here is a plain value object computed per request.

mod tool;
mod schema;
mod matching;
mod evaluation;
mod version;
mod model;
mod message;

pub use tool::{Tool, ToolSource};
pub use schema::{ToolSchema, PropertySchema, CompatibilityDeclaration};
pub use matching::{
    MatchType, ToolCapabilityMatch, ScoringWeights, MatchDetails, ToolMatchScore,
    ToolRecommendation, ToolCompatibilityResult, ToolUsageStatistics,
};
pub use evaluation::{
    EvaluationCriterion, CriterionWeights, EvaluationResult, RiskLevel, Vulnerability,
    SecurityEvaluationResult, PerformanceEvaluationResult, CompatibilityEvaluationResult,
    UsabilityEvaluationResult, ComprehensiveEvaluationResult,
};
pub use version::{VersionStatus, ToolVersion, VersionDiff, VersionCompatibility};
pub use model::{ModelConfig, ProviderConfig, ProviderMetadata};
pub use message::{ChatMessage, MessageRole, ModelRequest, ModelResponse};
