//! Compatibility evaluation
//!
//! Environments and versions come from the tool's schema declarations. When
//! a tool declares no compatible environments, its source decides:
//! MCP servers and external APIs run everywhere, repositories and local
//! scripts only under python.

use std::sync::Arc;

use super::PASS_THRESHOLD;
use crate::logging::Logger;
use crate::types::{CompatibilityEvaluationResult, EvaluationResult, Tool, ToolSource};

pub const ENVIRONMENT_CATALOG: [&str; 3] = ["python", "node", "browser"];
pub const VERSION_CATALOG: [&str; 4] = ["3.9", "3.10", "3.11", "3.12"];

const ENVIRONMENT_WEIGHT: f64 = 0.7;
const VERSION_WEIGHT: f64 = 0.3;

pub struct CompatibilityEvaluator {
    logger: Arc<dyn Logger>,
}

impl CompatibilityEvaluator {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger }
    }

    pub fn evaluate(&self, tool: &Tool) -> CompatibilityEvaluationResult {
        let (env_declared, env_excluded, ver_declared, ver_excluded) = match &tool.schema {
            Some(schema) => (
                lowercase(&schema.environment.compatible),
                lowercase(&schema.environment.incompatible),
                schema.version.compatible.clone(),
                schema.version.incompatible.clone(),
            ),
            None => Default::default(),
        };

        let compatible_environments: Vec<String> = if env_declared.is_empty() {
            source_environments(tool.source)
                .iter()
                .map(|e| e.to_string())
                .filter(|e| !env_excluded.contains(e))
                .collect()
        } else {
            env_declared
        };
        let incompatible_environments: Vec<String> = ENVIRONMENT_CATALOG
            .iter()
            .map(|e| e.to_string())
            .filter(|e| !compatible_environments.contains(e))
            .chain(env_excluded.iter().filter(|e| !is_catalog_env(e)).cloned())
            .collect();

        let compatible_versions: Vec<String> = if ver_declared.is_empty() {
            VERSION_CATALOG
                .iter()
                .map(|v| v.to_string())
                .filter(|v| !ver_excluded.contains(v))
                .collect()
        } else {
            ver_declared
        };
        let incompatible_versions = ver_excluded;

        let env_fraction = ENVIRONMENT_CATALOG
            .iter()
            .filter(|e| compatible_environments.iter().any(|c| c == *e))
            .count() as f64
            / ENVIRONMENT_CATALOG.len() as f64;
        let version_fraction = VERSION_CATALOG
            .iter()
            .filter(|v| compatible_versions.iter().any(|c| c == *v) && !incompatible_versions.iter().any(|c| c == *v))
            .count() as f64
            / VERSION_CATALOG.len() as f64;

        let score = ENVIRONMENT_WEIGHT * env_fraction + VERSION_WEIGHT * version_fraction;

        let issues: Vec<String> = ENVIRONMENT_CATALOG
            .iter()
            .filter(|e| !compatible_environments.iter().any(|c| c == *e))
            .map(|e| format!("Not compatible with {} environment", e))
            .collect();

        self.logger.debug(&format!(
            "[CompatibilityEvaluator] {}: environments {:?}, score {:.3}",
            tool.id, compatible_environments, score
        ));

        CompatibilityEvaluationResult {
            base: EvaluationResult::new(score, score >= PASS_THRESHOLD)
                .with_issues(issues)
                .with_detail("environment_fraction", env_fraction)
                .with_detail("version_fraction", version_fraction),
            compatible_environments,
            incompatible_environments,
            compatible_versions,
            incompatible_versions,
        }
    }
}

fn source_environments(source: ToolSource) -> &'static [&'static str] {
    match source {
        ToolSource::Mcp | ToolSource::ExternalApi => &ENVIRONMENT_CATALOG,
        ToolSource::CodeRepository | ToolSource::LocalScript => &["python"],
        ToolSource::Unknown => &[],
    }
}

fn is_catalog_env(env: &str) -> bool {
    ENVIRONMENT_CATALOG.contains(&env)
}

fn lowercase(values: &[String]) -> Vec<String> {
    values.iter().map(|v| v.trim().to_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use crate::types::{CompatibilityDeclaration, ToolSchema};

    fn evaluate(tool: &Tool) -> CompatibilityEvaluationResult {
        CompatibilityEvaluator::new(Arc::new(NoOpLogger)).evaluate(tool)
    }

    #[test]
    fn test_source_fallback() {
        let mcp = evaluate(&Tool::new("m", "M").with_source(ToolSource::Mcp));
        assert!((mcp.base.score - 1.0).abs() < 1e-9);
        assert_eq!(mcp.compatible_environments, vec!["python", "node", "browser"]);

        let script = evaluate(&Tool::new("s", "S").with_source(ToolSource::LocalScript));
        // 0.7 * 1/3 + 0.3 * 1.0
        assert!((script.base.score - (0.7 / 3.0 + 0.3)).abs() < 1e-9);
        assert_eq!(script.incompatible_environments, vec!["node", "browser"]);
        assert!(!script.base.passed);

        let unknown = evaluate(&Tool::new("u", "U"));
        assert!((unknown.base.score - 0.3).abs() < 1e-9);
        assert_eq!(unknown.base.issues.len(), 3);
    }

    #[test]
    fn test_declared_schema_wins() {
        let schema = ToolSchema::new()
            .with_environment(CompatibilityDeclaration::new(["Node", "browser"]).with_incompatible(["python"]))
            .with_version(CompatibilityDeclaration::new(["3.11", "3.12"]));
        let tool = Tool::new("t", "T").with_source(ToolSource::LocalScript).with_schema(schema);
        let result = evaluate(&tool);

        assert_eq!(result.compatible_environments, vec!["node", "browser"]);
        assert_eq!(result.incompatible_environments, vec!["python"]);
        assert_eq!(result.compatible_versions, vec!["3.11", "3.12"]);
        // 0.7 * 2/3 + 0.3 * 2/4
        assert!((result.base.score - (0.7 * 2.0 / 3.0 + 0.15)).abs() < 1e-9);
    }

    #[test]
    fn test_declared_incompatible_versions_only() {
        let schema = ToolSchema::new().with_version(CompatibilityDeclaration::default().with_incompatible(["3.9"]));
        let tool = Tool::new("t", "T").with_source(ToolSource::Mcp).with_schema(schema);
        let result = evaluate(&tool);

        assert_eq!(result.compatible_versions, vec!["3.10", "3.11", "3.12"]);
        assert_eq!(result.incompatible_versions, vec!["3.9"]);
        assert!((result.base.score - (0.7 + 0.3 * 0.75)).abs() < 1e-9);
    }
}
