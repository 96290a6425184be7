//! Performance measurement sources

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::MetricsResult;
use crate::types::Tool;

/// Raw resource usage of one tool run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub execution_time_ms: f64,
    pub memory_usage_mb: f64,
    pub cpu_usage_percent: f64,
    pub network_requests: u32,
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self {
            execution_time_ms: 500.0,
            memory_usage_mb: 50.0,
            cpu_usage_percent: 20.0,
            network_requests: 2,
        }
    }
}

/// Where performance numbers come from
///
/// A sandboxed execution harness implements this in production; tests use
/// [`FixedMetricsSource`].
#[async_trait]
pub trait MetricsSource: Send + Sync {
    fn name(&self) -> &str;

    async fn measure(&self, tool: &Tool) -> MetricsResult<PerformanceMetrics>;
}

/// Returns configured values without running anything
#[derive(Debug, Clone, Default)]
pub struct FixedMetricsSource {
    fallback: PerformanceMetrics,
    per_tool: HashMap<String, PerformanceMetrics>,
}

impl FixedMetricsSource {
    pub fn new(fallback: PerformanceMetrics) -> Self {
        Self {
            fallback,
            per_tool: HashMap::new(),
        }
    }

    pub fn with_tool(mut self, tool_id: impl Into<String>, metrics: PerformanceMetrics) -> Self {
        self.per_tool.insert(tool_id.into(), metrics);
        self
    }
}

#[async_trait]
impl MetricsSource for FixedMetricsSource {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn measure(&self, tool: &Tool) -> MetricsResult<PerformanceMetrics> {
        Ok(self.per_tool.get(&tool.id).copied().unwrap_or(self.fallback))
    }
}
