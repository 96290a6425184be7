//! MCP server as a discovery source

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::client::{is_internal_tool, McpClient};
use crate::log_warn;
use crate::logging::Logger;
use crate::tools::{DiscoveryResult, DiscoverySource};
use crate::types::{Tool, ToolSchema, ToolSource};

/// Discovers the tools of one MCP server
pub struct McpToolSource {
    name: String,
    client: Arc<McpClient>,
    include_internal: bool,
    logger: Arc<dyn Logger>,
}

impl McpToolSource {
    pub fn new(name: impl Into<String>, client: Arc<McpClient>, logger: Arc<dyn Logger>) -> Self {
        Self {
            name: name.into(),
            client,
            include_internal: false,
            logger,
        }
    }

    /// Also report platform-internal tools
    pub fn with_internal(mut self) -> Self {
        self.include_internal = true;
        self
    }
}

#[async_trait]
impl DiscoverySource for McpToolSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn discover(&self) -> DiscoveryResult<Vec<Tool>> {
        let listed = self.client.list_tools().await?;

        let mut tools = Vec::with_capacity(listed.len());
        for tool in listed {
            let name = tool.name.to_string();
            if !self.include_internal && is_internal_tool(&name) {
                continue;
            }
            let description = tool.description.map(|s| s.to_string());
            let input_schema = serde_json::to_value(tool.input_schema.as_ref()).unwrap_or_default();
            tools.push(tool_from_mcp(&self.name, &name, description.as_deref(), &input_schema, &*self.logger));
        }
        Ok(tools)
    }
}

/// Build a curator tool from an MCP tool listing
///
/// The id is `server/name`; the capability label is the name with `_` and
/// `-` read as spaces. A schema that doesn't parse is dropped with a warning.
pub fn tool_from_mcp(
    server: &str,
    name: &str,
    description: Option<&str>,
    input_schema: &Value,
    logger: &dyn Logger,
) -> Tool {
    let mut tool = Tool::new(format!("{}/{}", server, name), name)
        .with_capability(name.replace(['_', '-'], " "))
        .with_source(ToolSource::Mcp);
    if let Some(description) = description {
        tool = tool.with_description(description);
    }
    match ToolSchema::from_json(input_schema) {
        Ok(schema) => tool = tool.with_schema(schema),
        Err(e) => log_warn!(
            logger,
            "[McpToolSource] Ignoring unreadable schema of {}: {}",
            tool.id,
            e
        ),
    }
    tool
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use serde_json::json;

    #[test]
    fn test_tool_from_mcp() {
        let schema = json!({
            "type": "object",
            "properties": {
                "path": {"type": "string", "description": "File to read"},
                "encoding": {"type": "string"}
            },
            "required": ["path"]
        });
        let tool = tool_from_mcp("fs", "read_text-file", Some("Reads a file"), &schema, &NoOpLogger);

        assert_eq!(tool.id, "fs/read_text-file");
        assert_eq!(tool.capability, "read text file");
        assert_eq!(tool.source, ToolSource::Mcp);
        assert_eq!(tool.description, "Reads a file");

        let schema = tool.schema.unwrap();
        assert_eq!(schema.properties.len(), 2);
        assert_eq!(schema.described_property_count(), 1);
        assert_eq!(schema.required, Some(vec!["path".to_string()]));
    }

    #[test]
    fn test_unreadable_schema_dropped() {
        let tool = tool_from_mcp("fs", "list", None, &json!({"properties": 3}), &NoOpLogger);
        assert!(tool.schema.is_none());
        assert!(tool.description.is_empty());
    }
}
