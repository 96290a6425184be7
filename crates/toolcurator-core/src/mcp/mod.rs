//! MCP (Model Context Protocol) discovery
//!
//! Uses the official rmcp SDK to list the tools of MCP servers.
//!
//! ```rust,ignore
//! use toolcurator_core::mcp::{McpClient, McpToolSource};
//! use std::sync::Arc;
//!
//! let client = Arc::new(McpClient::connect_http("http://localhost:8931/mcp", logger.clone()).await?);
//! registry.add_source(Arc::new(McpToolSource::new("playwright", client, logger)));
//! registry.refresh().await;
//! ```

mod client;
mod source;

pub use client::{is_internal_tool, McpClient, McpError, McpResult, INTERNAL_TOOL_PREFIX};
pub use source::{tool_from_mcp, McpToolSource};
