//! Evaluation result family

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One aspect of a tool that can be evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationCriterion {
    Security,
    Performance,
    Compatibility,
    Usability,
}

impl EvaluationCriterion {
    /// Every criterion, in reporting order
    pub const ALL: [EvaluationCriterion; 4] = [
        EvaluationCriterion::Security,
        EvaluationCriterion::Performance,
        EvaluationCriterion::Compatibility,
        EvaluationCriterion::Usability,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluationCriterion::Security => "security",
            EvaluationCriterion::Performance => "performance",
            EvaluationCriterion::Compatibility => "compatibility",
            EvaluationCriterion::Usability => "usability",
        }
    }

    /// Capitalized label used in recommendation text
    pub fn label(&self) -> &'static str {
        match self {
            EvaluationCriterion::Security => "Security",
            EvaluationCriterion::Performance => "Performance",
            EvaluationCriterion::Compatibility => "Compatibility",
            EvaluationCriterion::Usability => "Usability",
        }
    }
}

impl std::fmt::Display for EvaluationCriterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relative weight of each criterion in the overall score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriterionWeights {
    pub security: f64,
    pub performance: f64,
    pub compatibility: f64,
    pub usability: f64,
}

impl Default for CriterionWeights {
    fn default() -> Self {
        Self {
            security: 0.4,
            performance: 0.2,
            compatibility: 0.2,
            usability: 0.2,
        }
    }
}

impl CriterionWeights {
    pub fn weight(&self, criterion: EvaluationCriterion) -> f64 {
        match criterion {
            EvaluationCriterion::Security => self.security,
            EvaluationCriterion::Performance => self.performance,
            EvaluationCriterion::Compatibility => self.compatibility,
            EvaluationCriterion::Usability => self.usability,
        }
    }

    pub fn is_valid(&self) -> bool {
        EvaluationCriterion::ALL
            .iter()
            .all(|c| self.weight(*c) >= 0.0)
            && EvaluationCriterion::ALL.iter().any(|c| self.weight(*c) > 0.0)
    }
}

/// Fields shared by every evaluation result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// 0.0..=1.0
    pub score: f64,
    pub passed: bool,
    #[serde(default)]
    pub issues: Vec<String>,
    #[serde(default)]
    pub details: Map<String, Value>,
}

impl EvaluationResult {
    pub fn new(score: f64, passed: bool) -> Self {
        Self {
            score,
            passed,
            issues: Vec::new(),
            details: Map::new(),
        }
    }

    pub fn with_issues(mut self, issues: Vec<String>) -> Self {
        self.issues = issues;
        self
    }

    pub fn with_detail(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }
}

/// Coarse risk classification derived from the security score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// LOW at >= 0.7, MEDIUM at >= 0.4, HIGH below
    pub fn from_score(score: f64) -> Self {
        if score >= 0.7 {
            RiskLevel::Low
        } else if score >= 0.4 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}

/// Finding reported by a security scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vulnerability {
    #[serde(rename = "type")]
    pub vulnerability_type: String,
    pub description: String,
    pub severity: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityEvaluationResult {
    #[serde(flatten)]
    pub base: EvaluationResult,
    pub vulnerabilities: Vec<Vulnerability>,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceEvaluationResult {
    #[serde(flatten)]
    pub base: EvaluationResult,
    pub execution_time_ms: f64,
    pub memory_usage_mb: f64,
    pub cpu_usage_percent: f64,
    pub network_requests: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityEvaluationResult {
    #[serde(flatten)]
    pub base: EvaluationResult,
    pub compatible_environments: Vec<String>,
    pub incompatible_environments: Vec<String>,
    pub compatible_versions: Vec<String>,
    pub incompatible_versions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsabilityEvaluationResult {
    #[serde(flatten)]
    pub base: EvaluationResult,
    pub documentation_quality: f64,
    pub parameter_clarity: f64,
    pub error_handling: f64,
}

/// All criteria evaluated for one tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComprehensiveEvaluationResult {
    pub tool_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<SecurityEvaluationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance: Option<PerformanceEvaluationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compatibility: Option<CompatibilityEvaluationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usability: Option<UsabilityEvaluationResult>,
    pub overall_score: f64,
    pub recommendation: String,
}

impl ComprehensiveEvaluationResult {
    /// Score of one criterion, if it was evaluated
    pub fn score_of(&self, criterion: EvaluationCriterion) -> Option<f64> {
        match criterion {
            EvaluationCriterion::Security => self.security.as_ref().map(|r| r.base.score),
            EvaluationCriterion::Performance => self.performance.as_ref().map(|r| r.base.score),
            EvaluationCriterion::Compatibility => self.compatibility.as_ref().map(|r| r.base.score),
            EvaluationCriterion::Usability => self.usability.as_ref().map(|r| r.base.score),
        }
    }

    /// (criterion, score) for every criterion that ran, in reporting order
    pub fn evaluated_scores(&self) -> Vec<(EvaluationCriterion, f64)> {
        EvaluationCriterion::ALL
            .iter()
            .filter_map(|c| self.score_of(*c).map(|s| (*c, s)))
            .collect()
    }

    /// True when every evaluated criterion passed
    pub fn all_passed(&self) -> bool {
        self.security.as_ref().map_or(true, |r| r.base.passed)
            && self.performance.as_ref().map_or(true, |r| r.base.passed)
            && self.compatibility.as_ref().map_or(true, |r| r.base.passed)
            && self.usability.as_ref().map_or(true, |r| r.base.passed)
    }
}
