//! Tool registry
//!
//! The ToolRegistry is the central component for:
//! - Discovering tools from every registered source
//! - Remembering which tools the user enabled or disabled
//! - Handing filtered tool lists to the curator and evaluator

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::source::{DiscoveryError, DiscoverySource};
use crate::events::{topics, EventBus};
use crate::logging::Logger;
use crate::types::{Tool, ToolSource};

/// A discovered tool with its registry state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub tool: Tool,
    /// Whether this tool is enabled
    pub enabled: bool,
    /// Name of the discovery source that reported it
    pub origin: String,
}

/// Filter for registry queries
#[derive(Debug, Clone)]
pub struct ToolFilter {
    /// If set, only include tools with these ids
    pub include: Option<HashSet<String>>,
    /// Exclude tools with these ids
    pub exclude: HashSet<String>,
    /// If set, only include tools from these sources
    pub sources: Option<HashSet<ToolSource>>,
    /// Only include enabled tools (default: true)
    pub only_enabled: bool,
}

impl Default for ToolFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolFilter {
    pub fn new() -> Self {
        Self {
            include: None,
            exclude: HashSet::new(),
            sources: None,
            only_enabled: true,
        }
    }

    /// Every tool, enabled or not
    pub fn all() -> Self {
        Self {
            only_enabled: false,
            ..Self::new()
        }
    }

    pub fn with_include(mut self, ids: impl IntoIterator<Item = String>) -> Self {
        self.include = Some(ids.into_iter().collect());
        self
    }

    pub fn with_exclude(mut self, ids: impl IntoIterator<Item = String>) -> Self {
        self.exclude = ids.into_iter().collect();
        self
    }

    pub fn with_sources(mut self, sources: impl IntoIterator<Item = ToolSource>) -> Self {
        self.sources = Some(sources.into_iter().collect());
        self
    }

    pub fn matches(&self, info: &ToolInfo) -> bool {
        if self.only_enabled && !info.enabled {
            return false;
        }
        if self.exclude.contains(&info.tool.id) {
            return false;
        }
        if let Some(ref include) = self.include {
            if !include.contains(&info.tool.id) {
                return false;
            }
        }
        if let Some(ref sources) = self.sources {
            if !sources.contains(&info.tool.source) {
                return false;
            }
        }
        true
    }
}

/// Result of a registry refresh
#[derive(Debug, Default)]
pub struct RefreshSummary {
    /// Distinct tools now cached
    pub discovered: usize,
    /// Sources that failed and were skipped
    pub failures: Vec<DiscoveryError>,
}

/// Registry of tools from all discovery sources
pub struct ToolRegistry {
    sources: RwLock<Vec<Arc<dyn DiscoverySource>>>,
    /// Cached tools from last refresh
    tools: RwLock<Vec<ToolInfo>>,
    /// User-configured enabled/disabled state, survives refreshes
    tool_states: RwLock<HashMap<String, bool>>,
    logger: Arc<dyn Logger>,
    events: Option<EventBus>,
}

impl ToolRegistry {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            sources: RwLock::new(Vec::new()),
            tools: RwLock::new(Vec::new()),
            tool_states: RwLock::new(HashMap::new()),
            logger,
            events: None,
        }
    }

    pub fn with_event_bus(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    pub fn add_source(&self, source: Arc<dyn DiscoverySource>) {
        self.logger.debug(&format!("[ToolRegistry] Added source: {}", source.name()));
        self.sources.write().push(source);
    }

    pub fn source_count(&self) -> usize {
        self.sources.read().len()
    }

    /// Re-discover tools from every source
    ///
    /// A failing source is logged and skipped. When two sources report the
    /// same tool id the first source wins.
    pub async fn refresh(&self) -> RefreshSummary {
        let sources = self.sources.read().clone();
        let mut summary = RefreshSummary::default();
        let mut seen = HashSet::new();
        let mut new_tools = Vec::new();

        for source in sources {
            match source.discover().await {
                Ok(tools) => {
                    self.logger.info(&format!(
                        "[ToolRegistry] Discovered {} tools from {}",
                        tools.len(),
                        source.name()
                    ));
                    let states = self.tool_states.read();
                    for tool in tools {
                        if !seen.insert(tool.id.clone()) {
                            self.logger.debug(&format!(
                                "[ToolRegistry] Ignoring duplicate tool '{}' from {}",
                                tool.id,
                                source.name()
                            ));
                            continue;
                        }
                        let enabled = states.get(&tool.id).copied().unwrap_or(true);
                        new_tools.push(ToolInfo {
                            tool,
                            enabled,
                            origin: source.name().to_string(),
                        });
                    }
                }
                Err(e) => {
                    self.logger.error(&format!(
                        "[ToolRegistry] Failed to fetch tools from {}: {}",
                        source.name(),
                        e
                    ));
                    summary.failures.push(e);
                }
            }
        }

        summary.discovered = new_tools.len();
        *self.tools.write() = new_tools;

        if let Some(events) = &self.events {
            events.emit(
                topics::sources::REGISTRY,
                topics::TOOL_DISCOVERED,
                json!({ "discovered": summary.discovered, "failed_sources": summary.failures.len() }),
            );
        }

        summary
    }

    pub fn get(&self, id: &str) -> Option<ToolInfo> {
        self.tools.read().iter().find(|t| t.tool.id == id).cloned()
    }

    pub fn get_tools(&self, filter: &ToolFilter) -> Vec<ToolInfo> {
        self.tools
            .read()
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect()
    }

    /// Enabled tools, ready to be matched or evaluated
    pub fn candidates(&self) -> Vec<Tool> {
        self.get_tools(&ToolFilter::new())
            .into_iter()
            .map(|info| info.tool)
            .collect()
    }

    /// Enable or disable a tool; the choice survives refreshes
    pub fn set_tool_enabled(&self, id: &str, enabled: bool) {
        self.tool_states.write().insert(id.to_string(), enabled);

        let mut tools = self.tools.write();
        if let Some(info) = tools.iter_mut().find(|t| t.tool.id == id) {
            info.enabled = enabled;
        }
    }

    pub fn tool_count(&self) -> usize {
        self.tools.read().len()
    }

    pub fn enabled_tool_count(&self) -> usize {
        self.get_tools(&ToolFilter::new()).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use crate::tools::source::{DiscoveryResult, StaticToolSource};
    use async_trait::async_trait;

    struct FailingSource;

    #[async_trait]
    impl DiscoverySource for FailingSource {
        fn name(&self) -> &str {
            "failing"
        }

        async fn discover(&self) -> DiscoveryResult<Vec<Tool>> {
            Err(DiscoveryError::Source {
                source_name: "failing".to_string(),
                message: "unreachable".to_string(),
            })
        }
    }

    fn info(id: &str, source: ToolSource, enabled: bool) -> ToolInfo {
        ToolInfo {
            tool: Tool::new(id, id).with_source(source),
            enabled,
            origin: "test".to_string(),
        }
    }

    #[test]
    fn test_tool_filter_default() {
        let filter = ToolFilter::new();
        assert!(filter.matches(&info("a", ToolSource::Mcp, true)));
        assert!(!filter.matches(&info("b", ToolSource::Mcp, false)));
        assert!(ToolFilter::all().matches(&info("b", ToolSource::Mcp, false)));
    }

    #[test]
    fn test_tool_filter_include_exclude_sources() {
        let filter = ToolFilter::new().with_exclude(["edit".to_string()]);
        assert!(filter.matches(&info("read", ToolSource::Mcp, true)));
        assert!(!filter.matches(&info("edit", ToolSource::Mcp, true)));

        let filter = ToolFilter::new().with_include(["read".to_string()]);
        assert!(!filter.matches(&info("write", ToolSource::Mcp, true)));

        let filter = ToolFilter::new().with_sources([ToolSource::LocalScript]);
        assert!(filter.matches(&info("s", ToolSource::LocalScript, true)));
        assert!(!filter.matches(&info("m", ToolSource::Mcp, true)));
    }

    #[tokio::test]
    async fn test_refresh_skips_failing_source() {
        let registry = ToolRegistry::new(Arc::new(NoOpLogger));
        registry.add_source(Arc::new(StaticToolSource::new(
            "builtin",
            vec![Tool::new("search", "Search"), Tool::new("fetch", "Fetch")],
        )));
        registry.add_source(Arc::new(FailingSource));
        registry.add_source(Arc::new(StaticToolSource::new(
            "extra",
            vec![Tool::new("search", "Other search"), Tool::new("mail", "Mail")],
        )));

        let summary = registry.refresh().await;
        assert_eq!(summary.discovered, 3);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(registry.get("search").unwrap().origin, "builtin");
        assert_eq!(registry.get("mail").unwrap().origin, "extra");
    }

    #[tokio::test]
    async fn test_enabled_state_survives_refresh() {
        let registry = ToolRegistry::new(Arc::new(NoOpLogger));
        registry.add_source(Arc::new(StaticToolSource::new(
            "builtin",
            vec![Tool::new("a", "A"), Tool::new("b", "B")],
        )));
        registry.refresh().await;

        registry.set_tool_enabled("b", false);
        assert_eq!(registry.enabled_tool_count(), 1);

        registry.refresh().await;
        assert_eq!(registry.tool_count(), 2);
        assert_eq!(registry.enabled_tool_count(), 1);
        let ids: Vec<_> = registry.candidates().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["a"]);
    }
}
