//! Discovery sources

use async_trait::async_trait;
use thiserror::Error;

use crate::mcp::McpError;
use crate::types::Tool;

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Source '{source_name}' failed: {message}")]
    Source { source_name: String, message: String },

    #[error("MCP discovery failed: {0}")]
    Mcp(#[from] McpError),
}

pub type DiscoveryResult<T> = Result<T, DiscoveryError>;

/// Something that can list tools
#[async_trait]
pub trait DiscoverySource: Send + Sync {
    /// Name recorded as the origin of discovered tools
    fn name(&self) -> &str;

    async fn discover(&self) -> DiscoveryResult<Vec<Tool>>;
}

/// Fixed in-memory tool list
#[derive(Debug, Clone)]
pub struct StaticToolSource {
    name: String,
    tools: Vec<Tool>,
}

impl StaticToolSource {
    pub fn new(name: impl Into<String>, tools: Vec<Tool>) -> Self {
        Self {
            name: name.into(),
            tools,
        }
    }
}

#[async_trait]
impl DiscoverySource for StaticToolSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn discover(&self) -> DiscoveryResult<Vec<Tool>> {
        Ok(self.tools.clone())
    }
}
