//! Tool curation
//!
//! Requirements flow through the pipeline:
//!
//! ```text
//! requirement ─► CapabilityMatcher ─► MatchScorer ─► RecommendationGenerator ─► ranked recommendations
//!                                        ▲
//!                        compatibility / usage signals
//! ```
//!
//! Versioning (`versioning`) is a standalone utility used alongside.
//!
//! ```rust,ignore
//! use toolcurator_core::curator::{ToolCurator, ToolRequirement, CurationSignals};
//!
//! let curator = ToolCurator::new(settings, logger)?;
//! let requirement = ToolRequirement::new("req-1", ["database access"]);
//! let recs = curator.recommend(&requirement, &tools, &CurationSignals::default(), None);
//! ```

pub mod capability;
pub mod scoring;
pub mod recommend;
pub mod versioning;

pub use capability::CapabilityMatcher;
pub use scoring::MatchScorer;
pub use recommend::{RecommendationContext, RecommendationGenerator};
pub use versioning::{
    check_version_compatibility, generate_next_version, is_breaking_change, is_compatible,
    NewVersion, SemanticVersion, VersionError, VersionManager, VersionResult,
};

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::{ConfigResult, CuratorSettings};
use crate::events::{topics, EventBus};
use crate::logging::Logger;
use crate::types::{Tool, ToolCompatibilityResult, ToolMatchScore, ToolRecommendation, ToolUsageStatistics};

/// A named set of capabilities an agent needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolRequirement {
    pub id: String,
    pub capabilities: Vec<String>,
}

impl ToolRequirement {
    pub fn new<I, S>(id: impl Into<String>, capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            capabilities: capabilities.into_iter().map(Into::into).collect(),
        }
    }
}

/// Compatibility and usage inputs computed elsewhere, keyed by tool id
#[derive(Debug, Clone, Default)]
pub struct CurationSignals {
    pub compatibility: HashMap<String, ToolCompatibilityResult>,
    pub usage: HashMap<String, ToolUsageStatistics>,
}

impl CurationSignals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_compatibility(mut self, result: ToolCompatibilityResult) -> Self {
        self.compatibility.insert(result.tool_id.clone(), result);
        self
    }

    pub fn with_usage(mut self, stats: ToolUsageStatistics) -> Self {
        self.usage.insert(stats.tool_id.clone(), stats);
        self
    }
}

/// Matches, scores and ranks tools for requirements
pub struct ToolCurator {
    matcher: CapabilityMatcher,
    scorer: MatchScorer,
    generator: RecommendationGenerator,
    logger: Arc<dyn Logger>,
    events: Option<EventBus>,
}

impl ToolCurator {
    pub fn new(settings: &CuratorSettings, logger: Arc<dyn Logger>) -> ConfigResult<Self> {
        settings.validate()?;
        Ok(Self {
            matcher: CapabilityMatcher::new(settings.semantic_similarity_threshold)
                .with_logger(logger.clone()),
            scorer: MatchScorer::from_settings(settings)?.with_logger(logger.clone()),
            generator: RecommendationGenerator::from_settings(settings).with_logger(logger.clone()),
            logger,
            events: None,
        })
    }

    pub fn with_event_bus(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    /// Match scores of every tool with at least one qualifying capability
    pub fn score_tools(
        &self,
        requirement: &ToolRequirement,
        tools: &[Tool],
        signals: &CurationSignals,
    ) -> Vec<ToolMatchScore> {
        tools
            .iter()
            .filter_map(|tool| {
                let matches = self.matcher.match_capabilities(
                    &tool.capability_labels(),
                    &requirement.capabilities,
                    &tool.id,
                );
                if matches.is_empty() {
                    return None;
                }
                Some(self.scorer.score(
                    &matches,
                    signals.compatibility.get(&tool.id),
                    signals.usage.get(&tool.id),
                    Some(&requirement.id),
                ))
            })
            .collect()
    }

    pub fn recommend(
        &self,
        requirement: &ToolRequirement,
        tools: &[Tool],
        signals: &CurationSignals,
        context: Option<&RecommendationContext>,
    ) -> Vec<ToolRecommendation> {
        let scores = self.score_tools(requirement, tools, signals);
        let recommendations = self.generator.generate(&scores, &requirement.id, context);

        self.logger.info(&format!(
            "[ToolCurator] Requirement '{}': {} matched, {} recommended",
            requirement.id,
            scores.len(),
            recommendations.len()
        ));
        if let Some(events) = &self.events {
            events.emit(
                topics::sources::CURATOR,
                topics::TOOL_RECOMMENDED,
                json!({
                    "requirement_id": requirement.id,
                    "tool_ids": recommendations.iter().map(|r| r.tool_id.as_str()).collect::<Vec<_>>(),
                }),
            );
        }

        recommendations
    }

    /// Recommendations for each requirement of an agent, keyed by requirement id
    pub fn curate_for_agent(
        &self,
        agent_type: &str,
        requirements: &[ToolRequirement],
        tools: &[Tool],
        signals: &CurationSignals,
    ) -> BTreeMap<String, Vec<ToolRecommendation>> {
        let context = RecommendationContext::new().with_agent_type(agent_type);
        requirements
            .iter()
            .map(|req| (req.id.clone(), self.recommend(req, tools, signals, Some(&context))))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use crate::types::ToolSource;

    fn curator() -> ToolCurator {
        ToolCurator::new(&CuratorSettings::default(), Arc::new(NoOpLogger)).unwrap()
    }

    #[test]
    fn test_end_to_end_exact_match() {
        let tools = vec![Tool::new("db", "Database").with_capability("Database Access")];
        let requirement = ToolRequirement::new("req-1", ["database access"]);

        let recs = curator().recommend(&requirement, &tools, &CurationSignals::default(), None);

        assert_eq!(recs.len(), 1);
        // 0.5 * 1.0 + 0.3 * 1.0 (assumed compatible) + 0.2 * 0.0 (no usage)
        assert!((recs[0].score - 0.8).abs() < 1e-9);
        assert!(recs[0].reasoning.contains("excellent capability matches"));
        assert!(recs[0].reasoning.contains("exactly matches 1"));
        assert_eq!(recs[0].requirement_id, "req-1");
    }

    #[test]
    fn test_signals_change_ranking() {
        let tools = vec![
            Tool::new("a", "A").with_capability("web search"),
            Tool::new("b", "B").with_capability("web search"),
        ];
        let signals = CurationSignals::new()
            .with_usage(ToolUsageStatistics::new("b", 10, 10))
            .with_compatibility(ToolCompatibilityResult::new("a", 0.5));
        let requirement = ToolRequirement::new("req", ["web search"]);

        let recs = curator().recommend(&requirement, &tools, &signals, None);
        assert_eq!(recs[0].tool_id, "b");
        assert!((recs[0].score - 1.0).abs() < 1e-9);
        assert_eq!(recs[0].alternatives, vec!["a"]);
    }

    #[test]
    fn test_unmatched_tools_excluded() {
        let tools = vec![
            Tool::new("img", "Images").with_capability("image resize"),
            Tool::new("mail", "Mail")
                .with_capability("send email")
                .with_source(ToolSource::ExternalApi),
        ];
        let requirement = ToolRequirement::new("req", ["send email"]);
        let scores = curator().score_tools(&requirement, &tools, &CurationSignals::default());
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].tool_id, "mail");
    }

    #[test]
    fn test_curate_for_agent() {
        let tools = vec![
            Tool::new("fs", "Files").with_capabilities(["read files", "write files"]),
            Tool::new("http", "HTTP").with_capability("http requests"),
        ];
        let requirements = vec![
            ToolRequirement::new("io", ["read files"]),
            ToolRequirement::new("net", ["http requests"]),
            ToolRequirement::new("gpu", ["cuda kernels"]),
        ];

        let curated = curator().curate_for_agent("coding", &requirements, &tools, &CurationSignals::default());

        assert_eq!(curated.len(), 3);
        assert_eq!(curated["io"][0].tool_id, "fs");
        assert!(curated["io"][0].reasoning.ends_with("Recommended for coding agents."));
        assert_eq!(curated["net"][0].tool_id, "http");
        assert!(curated["gpu"].is_empty());
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = CuratorSettings {
            max_recommendations: 0,
            ..Default::default()
        };
        assert!(ToolCurator::new(&settings, Arc::new(NoOpLogger)).is_err());
    }

    #[tokio::test]
    async fn test_recommend_publishes_event() {
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe();
        let curator = curator().with_event_bus(bus);

        let tools = vec![Tool::new("db", "Database").with_capability("sql")];
        curator.recommend(&ToolRequirement::new("req", ["sql"]), &tools, &CurationSignals::default(), None);

        let event = rx.recv().await.unwrap();
        assert_eq!(event.topic, topics::TOOL_RECOMMENDED);
        assert_eq!(event.payload["tool_ids"][0], "db");
    }
}
