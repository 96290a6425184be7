//! Tool evaluation
//!
//! Four independent evaluators score one aspect each; `ToolEvaluator` runs
//! the selected ones and folds them into a weighted overall score and a
//! recommendation sentence.
//!
//! - Security: binary verdict from a [`SecurityScanner`]
//! - Performance: inverse-ratio scoring of [`MetricsSource`] measurements
//! - Compatibility: declared or source-inferred environments and versions
//! - Usability: documentation, parameter descriptions, declared errors

pub mod error;
pub mod scanner;
pub mod metrics;
mod security;
mod performance;
mod compatibility;
mod usability;

pub use error::{EvaluationError, EvaluatorResult, MetricsError, MetricsResult, ScanError, ScanResult};
pub use scanner::{HttpSecurityScanner, PatternSecurityScanner, ScanReport, SecurityScanner};
pub use metrics::{FixedMetricsSource, MetricsSource, PerformanceMetrics};
pub use security::SecurityEvaluator;
pub use performance::PerformanceEvaluator;
pub use compatibility::CompatibilityEvaluator;
pub use usability::UsabilityEvaluator;

use std::sync::Arc;

use futures::future::join_all;
use serde_json::json;

use crate::config::EvaluationSettings;
use crate::events::{topics, EventBus};
use crate::logging::Logger;
use crate::types::{ComprehensiveEvaluationResult, CriterionWeights, EvaluationCriterion, Tool};

/// Score at or above which a non-security criterion passes
pub const PASS_THRESHOLD: f64 = 0.6;
/// Criteria scoring below this get a warning in the recommendation text
pub const WARNING_THRESHOLD: f64 = 0.6;

/// Outcome of evaluating several tools
#[derive(Debug, Default)]
pub struct BatchEvaluation {
    /// Successful evaluations, in input order
    pub results: Vec<ComprehensiveEvaluationResult>,
    /// Tools that failed, in input order
    pub failures: Vec<EvaluationError>,
}

impl BatchEvaluation {
    pub fn result_for(&self, tool_id: &str) -> Option<&ComprehensiveEvaluationResult> {
        self.results.iter().find(|r| r.tool_id == tool_id)
    }
}

/// Runs the evaluators and aggregates their scores
pub struct ToolEvaluator {
    security: SecurityEvaluator,
    performance: PerformanceEvaluator,
    compatibility: CompatibilityEvaluator,
    usability: UsabilityEvaluator,
    weights: CriterionWeights,
    logger: Arc<dyn Logger>,
    events: Option<EventBus>,
}

impl ToolEvaluator {
    pub fn new(
        scanner: Arc<dyn SecurityScanner>,
        metrics: Arc<dyn MetricsSource>,
        settings: &EvaluationSettings,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            security: SecurityEvaluator::new(scanner, logger.clone()),
            performance: PerformanceEvaluator::new(metrics, settings.max_memory_mb, logger.clone()),
            compatibility: CompatibilityEvaluator::new(logger.clone()),
            usability: UsabilityEvaluator::new(logger.clone()),
            weights: settings.weights,
            logger,
            events: None,
        }
    }

    pub fn with_event_bus(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    /// Evaluate every criterion
    pub async fn evaluate_all(&self, tool: &Tool) -> EvaluatorResult<ComprehensiveEvaluationResult> {
        self.evaluate(tool, &EvaluationCriterion::ALL).await
    }

    /// Evaluate the selected criteria
    ///
    /// A failing criterion aborts this tool's evaluation.
    pub async fn evaluate(
        &self,
        tool: &Tool,
        criteria: &[EvaluationCriterion],
    ) -> EvaluatorResult<ComprehensiveEvaluationResult> {
        let wants = |c: EvaluationCriterion| criteria.contains(&c);

        let security = if wants(EvaluationCriterion::Security) {
            Some(self.security.evaluate(tool).await?)
        } else {
            None
        };
        let performance = if wants(EvaluationCriterion::Performance) {
            Some(self.performance.evaluate(tool).await?)
        } else {
            None
        };
        let compatibility = wants(EvaluationCriterion::Compatibility).then(|| self.compatibility.evaluate(tool));
        let usability = wants(EvaluationCriterion::Usability).then(|| self.usability.evaluate(tool));

        let mut result = ComprehensiveEvaluationResult {
            tool_id: tool.id.clone(),
            security,
            performance,
            compatibility,
            usability,
            overall_score: 0.0,
            recommendation: String::new(),
        };
        let scores = result.evaluated_scores();
        result.overall_score = overall_score(&scores, &self.weights);
        result.recommendation = recommendation_text(result.overall_score, &scores);

        self.logger.info(&format!(
            "[ToolEvaluator] {} scored {:.3} over {} criteria",
            tool.id,
            result.overall_score,
            scores.len()
        ));
        if let Some(events) = &self.events {
            events.emit(
                topics::sources::EVALUATOR,
                topics::TOOL_EVALUATED,
                json!({
                    "tool_id": result.tool_id,
                    "overall_score": result.overall_score,
                    "passed": result.all_passed(),
                }),
            );
        }

        Ok(result)
    }

    /// Evaluate several tools concurrently
    ///
    /// A failing tool is logged and reported in `failures`; the rest still
    /// complete.
    pub async fn evaluate_batch(&self, tools: &[Tool], criteria: &[EvaluationCriterion]) -> BatchEvaluation {
        let outcomes = join_all(tools.iter().map(|tool| self.evaluate(tool, criteria))).await;

        let mut batch = BatchEvaluation::default();
        for outcome in outcomes {
            match outcome {
                Ok(result) => batch.results.push(result),
                Err(e) => {
                    self.logger.error(&format!("[ToolEvaluator] Skipping {}: {}", e.tool_id(), e));
                    batch.failures.push(e);
                }
            }
        }
        batch
    }
}

/// Weighted mean over the criteria that were evaluated
///
/// Criteria that did not run are left out of both numerator and denominator.
pub fn overall_score(scores: &[(EvaluationCriterion, f64)], weights: &CriterionWeights) -> f64 {
    let (weighted, total) = scores.iter().fold((0.0, 0.0), |(sum, total), (criterion, score)| {
        let w = weights.weight(*criterion);
        (sum + w * score, total + w)
    });
    if total > 0.0 {
        weighted / total
    } else {
        0.0
    }
}

/// Banded verdict plus a warning per weak criterion
pub fn recommendation_text(overall: f64, scores: &[(EvaluationCriterion, f64)]) -> String {
    let mut text = if overall >= 0.8 {
        "APPROVED: Tool meets all quality criteria.".to_string()
    } else if overall >= 0.6 {
        "APPROVED WITH RESERVATIONS: Tool is acceptable but has weaknesses.".to_string()
    } else if overall >= 0.4 {
        "NEEDS IMPROVEMENT: Tool has significant issues to address.".to_string()
    } else {
        "NOT RECOMMENDED: Tool does not meet minimum quality criteria.".to_string()
    };

    for (criterion, score) in scores {
        if *score < WARNING_THRESHOLD {
            text.push_str(&format!(" Warning: {} score is low ({:.2}).", criterion.label(), score));
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use crate::types::ToolSource;
    use async_trait::async_trait;

    /// Approves everything except tools whose id starts with "broken"
    struct FlakyScanner;

    #[async_trait]
    impl SecurityScanner for FlakyScanner {
        fn name(&self) -> &str {
            "flaky"
        }

        async fn scan_tool(&self, tool: &Tool) -> ScanResult<ScanReport> {
            if tool.id.starts_with("broken") {
                Err(ScanError::Unavailable("connection reset".to_string()))
            } else {
                Ok(ScanReport::approved())
            }
        }
    }

    fn evaluator() -> ToolEvaluator {
        ToolEvaluator::new(
            Arc::new(FlakyScanner),
            Arc::new(FixedMetricsSource::default()),
            &EvaluationSettings::default(),
            Arc::new(NoOpLogger),
        )
    }

    #[test]
    fn test_overall_over_evaluated_criteria_only() {
        let scores = [
            (EvaluationCriterion::Security, 0.9),
            (EvaluationCriterion::Performance, 0.5),
        ];
        let overall = overall_score(&scores, &CriterionWeights::default());
        // (0.4 * 0.9 + 0.2 * 0.5) / 0.6
        assert!((overall - 0.76667).abs() < 1e-4);
        assert_eq!(overall_score(&[], &CriterionWeights::default()), 0.0);
    }

    #[test]
    fn test_recommendation_bands() {
        assert!(recommendation_text(0.85, &[]).starts_with("APPROVED:"));
        assert!(recommendation_text(0.6, &[]).starts_with("APPROVED WITH RESERVATIONS"));
        assert!(recommendation_text(0.45, &[]).starts_with("NEEDS IMPROVEMENT"));
        assert!(recommendation_text(0.1, &[]).starts_with("NOT RECOMMENDED"));

        let text = recommendation_text(
            0.7,
            &[(EvaluationCriterion::Security, 1.0), (EvaluationCriterion::Usability, 0.18)],
        );
        assert!(text.ends_with("Warning: Usability score is low (0.18)."));
        assert!(!text.contains("Security score"));
    }

    #[tokio::test]
    async fn test_comprehensive_evaluation() {
        let tool = Tool::new("mcp-fs", "Files").with_source(ToolSource::Mcp);
        let result = evaluator().evaluate_all(&tool).await.unwrap();

        assert!(result.security.is_some() && result.usability.is_some());
        // security 1.0, performance 1.0, compatibility 1.0, usability 0.18
        let expected = (0.4 + 0.2 + 0.2 + 0.2 * 0.18) / 1.0;
        assert!((result.overall_score - expected).abs() < 1e-9);
        assert!(result.recommendation.starts_with("APPROVED:"));
        assert!(result.recommendation.contains("Warning: Usability"));
    }

    #[tokio::test]
    async fn test_selected_criteria() {
        let tool = Tool::new("t", "T");
        let result = evaluator()
            .evaluate(&tool, &[EvaluationCriterion::Compatibility])
            .await
            .unwrap();
        assert!(result.security.is_none());
        assert!(result.performance.is_none());
        // only compatibility ran: unknown source scores 0.3
        assert!((result.overall_score - 0.3).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_batch_continues_past_failure() {
        let tools = vec![
            Tool::new("first", "First"),
            Tool::new("broken-second", "Second"),
            Tool::new("third", "Third"),
        ];
        let batch = evaluator().evaluate_batch(&tools, &EvaluationCriterion::ALL).await;

        let ids: Vec<_> = batch.results.iter().map(|r| r.tool_id.as_str()).collect();
        assert_eq!(ids, vec!["first", "third"]);
        assert_eq!(batch.failures.len(), 1);
        assert_eq!(batch.failures[0].tool_id(), "broken-second");
        assert_eq!(batch.failures[0].criterion(), EvaluationCriterion::Security);
        assert!(batch.result_for("third").is_some());
    }
}
