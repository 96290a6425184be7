//! Usability evaluation

use std::sync::Arc;

use super::PASS_THRESHOLD;
use crate::logging::Logger;
use crate::types::{EvaluationResult, Tool, UsabilityEvaluationResult};

/// Description length at which the description contribution saturates
const DESCRIPTION_CHARS_FOR_FULL_CREDIT: f64 = 200.0;
const DESCRIPTION_CAP: f64 = 0.7;
const DOCUMENTATION_URL_BONUS: f64 = 0.3;

const CLARITY_NO_SCHEMA: f64 = 0.3;
const CLARITY_NO_PROPERTIES: f64 = 0.1;
const CLARITY_BASE: f64 = 0.3;

const ERROR_HANDLING_NO_SCHEMA: f64 = 0.3;
const ERROR_HANDLING_BASE: f64 = 0.5;
const ERROR_RESPONSES_BONUS: f64 = 0.3;
const REQUIRED_BONUS: f64 = 0.2;

pub struct UsabilityEvaluator {
    logger: Arc<dyn Logger>,
}

impl UsabilityEvaluator {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger }
    }

    pub fn evaluate(&self, tool: &Tool) -> UsabilityEvaluationResult {
        let documentation_quality = documentation_quality(tool);
        let parameter_clarity = parameter_clarity(tool);
        let error_handling = error_handling(tool);

        let score = 0.4 * documentation_quality + 0.4 * parameter_clarity + 0.2 * error_handling;

        let mut issues = Vec::new();
        if documentation_quality < 0.5 {
            issues.push("Documentation is insufficient".to_string());
        }
        if parameter_clarity < 0.5 {
            issues.push("Parameters lack descriptions".to_string());
        }
        if error_handling < 0.6 {
            issues.push("Error handling is not declared".to_string());
        }

        self.logger.debug(&format!(
            "[UsabilityEvaluator] {}: docs={:.2} params={:.2} errors={:.2}",
            tool.id, documentation_quality, parameter_clarity, error_handling
        ));

        UsabilityEvaluationResult {
            base: EvaluationResult::new(score, score >= PASS_THRESHOLD).with_issues(issues),
            documentation_quality,
            parameter_clarity,
            error_handling,
        }
    }
}

fn documentation_quality(tool: &Tool) -> f64 {
    let length = tool.description.trim().chars().count() as f64;
    let mut quality = (length / DESCRIPTION_CHARS_FOR_FULL_CREDIT).min(DESCRIPTION_CAP);
    if tool.has_documentation() {
        quality += DOCUMENTATION_URL_BONUS;
    }
    quality.min(1.0)
}

fn parameter_clarity(tool: &Tool) -> f64 {
    match &tool.schema {
        None => CLARITY_NO_SCHEMA,
        Some(schema) if schema.properties.is_empty() => CLARITY_NO_PROPERTIES,
        Some(schema) => {
            let fraction = schema.described_property_count() as f64 / schema.properties.len() as f64;
            CLARITY_BASE + (1.0 - CLARITY_BASE) * fraction
        }
    }
}

fn error_handling(tool: &Tool) -> f64 {
    let Some(schema) = &tool.schema else {
        return ERROR_HANDLING_NO_SCHEMA;
    };
    let mut score = ERROR_HANDLING_BASE;
    if schema.error_responses.is_some() {
        score += ERROR_RESPONSES_BONUS;
    }
    if schema.required.is_some() {
        score += REQUIRED_BONUS;
    }
    score.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use crate::types::{PropertySchema, ToolSchema};
    use serde_json::json;

    fn evaluate(tool: &Tool) -> UsabilityEvaluationResult {
        UsabilityEvaluator::new(Arc::new(NoOpLogger)).evaluate(tool)
    }

    #[test]
    fn test_bare_tool_fallbacks() {
        let result = evaluate(&Tool::new("bare", "Bare"));
        assert_eq!(result.documentation_quality, 0.0);
        assert_eq!(result.parameter_clarity, 0.3);
        assert_eq!(result.error_handling, 0.3);
        assert!(!result.base.passed);
        assert_eq!(result.base.issues.len(), 3);
    }

    #[test]
    fn test_well_documented_tool() {
        let schema = ToolSchema::new()
            .with_property("query", PropertySchema::described("string", "Search query"))
            .with_property("limit", PropertySchema::undescribed("integer"))
            .with_required(["query"])
            .with_error_responses(json!({"400": "bad query"}));
        let tool = Tool::new("search", "Search")
            .with_description("x".repeat(400))
            .with_documentation_url("https://docs.example.com/search")
            .with_schema(schema);
        let result = evaluate(&tool);

        assert!((result.documentation_quality - 1.0).abs() < 1e-9);
        // 0.3 + 0.7 * 1/2
        assert!((result.parameter_clarity - 0.65).abs() < 1e-9);
        assert!((result.error_handling - 1.0).abs() < 1e-9);
        assert!((result.base.score - (0.4 + 0.26 + 0.2)).abs() < 1e-9);
        assert!(result.base.passed);
    }

    #[test]
    fn test_schema_without_properties() {
        let tool = Tool::new("t", "T")
            .with_description("x".repeat(100))
            .with_schema(ToolSchema::new());
        let result = evaluate(&tool);
        assert!((result.documentation_quality - 0.5).abs() < 1e-9);
        assert_eq!(result.parameter_clarity, 0.1);
        assert_eq!(result.error_handling, 0.5);
    }
}
