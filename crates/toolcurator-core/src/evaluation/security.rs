//! Security evaluation

use std::sync::Arc;

use super::error::{EvaluationError, EvaluatorResult};
use super::scanner::SecurityScanner;
use crate::logging::Logger;
use crate::types::{EvaluationResult, RiskLevel, SecurityEvaluationResult, Tool, Vulnerability};

pub const APPROVED_SCORE: f64 = 1.0;
pub const DENIED_SCORE: f64 = 0.2;

/// Binary security verdict from a scanner
pub struct SecurityEvaluator {
    scanner: Arc<dyn SecurityScanner>,
    logger: Arc<dyn Logger>,
}

impl SecurityEvaluator {
    pub fn new(scanner: Arc<dyn SecurityScanner>, logger: Arc<dyn Logger>) -> Self {
        Self { scanner, logger }
    }

    pub async fn evaluate(&self, tool: &Tool) -> EvaluatorResult<SecurityEvaluationResult> {
        let report = self
            .scanner
            .scan_tool(tool)
            .await
            .map_err(|e| EvaluationError::scanner(&tool.id, e))?;

        let score = if report.approved { APPROVED_SCORE } else { DENIED_SCORE };
        let mut issues = Vec::new();
        let mut vulnerabilities = Vec::new();

        if !report.approved {
            let description = report
                .reason
                .clone()
                .unwrap_or_else(|| "Rejected by security scanner".to_string());
            issues.push(description.clone());
            vulnerabilities.push(Vulnerability {
                vulnerability_type: report
                    .violation_type
                    .clone()
                    .unwrap_or_else(|| "security_violation".to_string()),
                description,
                severity: RiskLevel::High,
            });
            self.logger.warn(&format!(
                "[SecurityEvaluator] {} denied by {} scanner",
                tool.id,
                self.scanner.name()
            ));
        }

        let mut base = EvaluationResult::new(score, report.approved)
            .with_issues(issues)
            .with_detail("scanner", self.scanner.name());
        for (key, value) in report.details {
            base.details.insert(key, value);
        }

        Ok(SecurityEvaluationResult {
            base,
            vulnerabilities,
            risk_level: RiskLevel::from_score(score),
        })
    }
}
