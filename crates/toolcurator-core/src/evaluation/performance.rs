//! Performance evaluation
//!
//! Each metric is scored as an inverse ratio against a reference value and
//! capped at 1.0:
//!
//! | metric            | reference       | weight |
//! |-------------------|-----------------|--------|
//! | execution time    | 5000 ms         | 0.4    |
//! | memory            | `max_memory_mb` | 0.3    |
//! | cpu               | 100 %           | 0.2    |
//! | network requests  | 20              | 0.1    |

use std::sync::Arc;

use super::error::{EvaluationError, EvaluatorResult};
use super::metrics::{MetricsSource, PerformanceMetrics};
use super::PASS_THRESHOLD;
use crate::logging::Logger;
use crate::types::{EvaluationResult, PerformanceEvaluationResult, Tool};

const REFERENCE_TIME_MS: f64 = 5000.0;
const REFERENCE_CPU_PERCENT: f64 = 100.0;
const REFERENCE_NETWORK_REQUESTS: f64 = 20.0;

const SLOW_EXECUTION_MS: f64 = 1000.0;
const HIGH_MEMORY_FRACTION: f64 = 0.8;
const HIGH_CPU_PERCENT: f64 = 80.0;
const MANY_NETWORK_REQUESTS: u32 = 10;

pub struct PerformanceEvaluator {
    source: Arc<dyn MetricsSource>,
    max_memory_mb: f64,
    logger: Arc<dyn Logger>,
}

impl PerformanceEvaluator {
    pub fn new(source: Arc<dyn MetricsSource>, max_memory_mb: f64, logger: Arc<dyn Logger>) -> Self {
        Self {
            source,
            max_memory_mb,
            logger,
        }
    }

    pub async fn evaluate(&self, tool: &Tool) -> EvaluatorResult<PerformanceEvaluationResult> {
        let metrics = self
            .source
            .measure(tool)
            .await
            .map_err(|e| EvaluationError::metrics(&tool.id, e))?;

        let result = self.score(&metrics);
        self.logger.debug(&format!(
            "[PerformanceEvaluator] {} measured by {}: score {:.3}",
            tool.id,
            self.source.name(),
            result.base.score
        ));
        Ok(result)
    }

    /// Score a set of measurements
    pub fn score(&self, metrics: &PerformanceMetrics) -> PerformanceEvaluationResult {
        let time_score = inverse_ratio(REFERENCE_TIME_MS, metrics.execution_time_ms);
        let memory_score = inverse_ratio(self.max_memory_mb, metrics.memory_usage_mb);
        let cpu_score = inverse_ratio(REFERENCE_CPU_PERCENT, metrics.cpu_usage_percent);
        let network_score = inverse_ratio(REFERENCE_NETWORK_REQUESTS, metrics.network_requests as f64);

        let score = 0.4 * time_score + 0.3 * memory_score + 0.2 * cpu_score + 0.1 * network_score;

        let mut issues = Vec::new();
        if metrics.execution_time_ms > SLOW_EXECUTION_MS {
            issues.push(format!("High execution time: {:.0} ms", metrics.execution_time_ms));
        }
        if metrics.memory_usage_mb > HIGH_MEMORY_FRACTION * self.max_memory_mb {
            issues.push(format!(
                "High memory usage: {:.1} MB of {:.0} MB",
                metrics.memory_usage_mb, self.max_memory_mb
            ));
        }
        if metrics.cpu_usage_percent > HIGH_CPU_PERCENT {
            issues.push(format!("High CPU usage: {:.1}%", metrics.cpu_usage_percent));
        }
        if metrics.network_requests > MANY_NETWORK_REQUESTS {
            issues.push(format!("Excessive network requests: {}", metrics.network_requests));
        }

        let base = EvaluationResult::new(score, score >= PASS_THRESHOLD)
            .with_issues(issues)
            .with_detail("time_score", time_score)
            .with_detail("memory_score", memory_score)
            .with_detail("cpu_score", cpu_score)
            .with_detail("network_score", network_score);

        PerformanceEvaluationResult {
            base,
            execution_time_ms: metrics.execution_time_ms,
            memory_usage_mb: metrics.memory_usage_mb,
            cpu_usage_percent: metrics.cpu_usage_percent,
            network_requests: metrics.network_requests,
        }
    }
}

/// `min(1, reference / measured)`; zero usage scores 1.0
fn inverse_ratio(reference: f64, measured: f64) -> f64 {
    if measured <= 0.0 {
        return 1.0;
    }
    (reference / measured).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::metrics::FixedMetricsSource;
    use crate::logging::NoOpLogger;

    fn evaluator() -> PerformanceEvaluator {
        PerformanceEvaluator::new(
            Arc::new(FixedMetricsSource::default()),
            512.0,
            Arc::new(NoOpLogger),
        )
    }

    #[test]
    fn test_light_tool_scores_full() {
        let result = evaluator().score(&PerformanceMetrics::default());
        assert!((result.base.score - 1.0).abs() < 1e-9);
        assert!(result.base.passed);
        assert!(result.base.issues.is_empty());
    }

    #[test]
    fn test_heavy_tool() {
        let metrics = PerformanceMetrics {
            execution_time_ms: 10_000.0,
            memory_usage_mb: 1024.0,
            cpu_usage_percent: 200.0,
            network_requests: 40,
        };
        let result = evaluator().score(&metrics);

        // every sub-score is 0.5
        assert!((result.base.score - 0.5).abs() < 1e-9);
        assert!(!result.base.passed);
        assert_eq!(result.base.issues.len(), 4);
        assert_eq!(result.network_requests, 40);
    }

    #[test]
    fn test_issue_thresholds_are_exclusive() {
        let metrics = PerformanceMetrics {
            execution_time_ms: 1000.0,
            memory_usage_mb: 0.8 * 512.0,
            cpu_usage_percent: 80.0,
            network_requests: 10,
        };
        assert!(evaluator().score(&metrics).base.issues.is_empty());
    }

    #[tokio::test]
    async fn test_uses_metrics_source() {
        let source = FixedMetricsSource::default().with_tool(
            "slow",
            PerformanceMetrics {
                execution_time_ms: 10_000.0,
                ..Default::default()
            },
        );
        let evaluator = PerformanceEvaluator::new(Arc::new(source), 512.0, Arc::new(NoOpLogger));

        let slow = evaluator.evaluate(&Tool::new("slow", "Slow")).await.unwrap();
        // 0.4 * 0.5 + 0.3 + 0.2 + 0.1
        assert!((slow.base.score - 0.8).abs() < 1e-9);
        assert_eq!(slow.base.issues.len(), 1);

        let other = evaluator.evaluate(&Tool::new("other", "Other")).await.unwrap();
        assert!((other.base.score - 1.0).abs() < 1e-9);
    }
}
