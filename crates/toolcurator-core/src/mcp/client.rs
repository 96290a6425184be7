//! MCP Client using the official rmcp SDK
//!
//! Connects to MCP servers over Unix socket or HTTP for tool discovery.

use std::path::Path;
use std::sync::Arc;

use rmcp::{
    ServiceExt,
    model::{ClientCapabilities, ClientInfo, Implementation, Tool},
    service::RunningService,
    RoleClient,
};
use thiserror::Error;

#[cfg(unix)]
use tokio::net::UnixStream;

use crate::logging::Logger;

/// MCP client errors
#[derive(Error, Debug)]
pub enum McpError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Initialization failed: {0}")]
    InitializationFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Protocol error: {0}")]
    Protocol(String),
}

pub type McpResult<T> = Result<T, McpError>;

/// Prefix of tools that belong to the platform itself and are never curated
pub const INTERNAL_TOOL_PREFIX: &str = "toolcurator_";

fn client_info() -> ClientInfo {
    ClientInfo {
        meta: None,
        protocol_version: Default::default(),
        capabilities: ClientCapabilities::default(),
        client_info: Implementation {
            name: "toolcurator-core".to_string(),
            title: Some("ToolCurator Core".to_string()),
            version: env!("CARGO_PKG_VERSION").to_string(),
            website_url: None,
            icons: None,
        },
    }
}

/// MCP client for discovering tools on an MCP server
pub struct McpClient {
    client: RunningService<RoleClient, ClientInfo>,
    logger: Arc<dyn Logger>,
}

impl McpClient {
    /// Connect to an MCP server over a Unix socket
    #[cfg(unix)]
    pub async fn connect_unix<P: AsRef<Path>>(
        socket_path: P,
        logger: Arc<dyn Logger>,
    ) -> McpResult<Self> {
        let path = socket_path.as_ref();
        logger.info(&format!("[McpClient] Connecting to Unix socket: {:?}", path));

        let stream = UnixStream::connect(path)
            .await
            .map_err(|e| McpError::ConnectionFailed(e.to_string()))?;

        let client = client_info()
            .serve(stream)
            .await
            .map_err(|e| McpError::InitializationFailed(e.to_string()))?;

        logger.info("[McpClient] Connected and initialized successfully");

        Ok(Self { client, logger })
    }

    /// Connect to an MCP server over HTTP (Streamable HTTP transport)
    pub async fn connect_http(url: &str, logger: Arc<dyn Logger>) -> McpResult<Self> {
        use rmcp::transport::StreamableHttpClientTransport;

        logger.info(&format!("[McpClient] Connecting to HTTP: {}", url));

        let transport = StreamableHttpClientTransport::from_uri(url);

        let client = client_info()
            .serve(transport)
            .await
            .map_err(|e| McpError::InitializationFailed(e.to_string()))?;

        logger.info("[McpClient] Connected and initialized successfully");

        Ok(Self { client, logger })
    }

    /// List all tools the server exposes
    pub async fn list_tools(&self) -> McpResult<Vec<Tool>> {
        let result = self
            .client
            .list_tools(Default::default())
            .await
            .map_err(|e| McpError::Protocol(e.to_string()))?;

        self.logger.info(&format!("[McpClient] Listed {} tools", result.tools.len()));

        Ok(result.tools)
    }

    /// Name the server reported during initialization
    pub fn server_name(&self) -> Option<String> {
        self.client.peer_info().map(|info| info.server_info.name.clone())
    }

    /// Close the connection
    pub async fn close(self) -> McpResult<()> {
        self.logger.info("[McpClient] Closing connection");
        self.client
            .cancel()
            .await
            .map_err(|e| McpError::Protocol(e.to_string()))?;
        Ok(())
    }
}

/// Check if a tool name is internal to the platform
pub fn is_internal_tool(name: &str) -> bool {
    name.starts_with(INTERNAL_TOOL_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_internal_tool() {
        assert!(is_internal_tool("toolcurator_config_get"));
        assert!(!is_internal_tool("read_file"));
        assert!(!is_internal_tool("curator"));
    }

    #[test]
    fn test_client_info_identifies_crate() {
        let info = client_info();
        assert_eq!(info.client_info.name, "toolcurator-core");
        assert_eq!(info.client_info.version, env!("CARGO_PKG_VERSION"));
    }
}
