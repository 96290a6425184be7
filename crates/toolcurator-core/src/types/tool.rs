//! Tool model as seen by the curator

use serde::{Deserialize, Serialize};

use super::schema::ToolSchema;

/// Where a tool was discovered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ToolSource {
    /// Exposed by an MCP server
    Mcp,
    /// Remote HTTP API
    ExternalApi,
    /// Cloned from a source repository
    CodeRepository,
    /// Script on the local filesystem
    LocalScript,
    /// Source not recorded
    Unknown,
}

impl Default for ToolSource {
    fn default() -> Self {
        ToolSource::Unknown
    }
}

impl ToolSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolSource::Mcp => "MCP",
            ToolSource::ExternalApi => "EXTERNAL_API",
            ToolSource::CodeRepository => "CODE_REPOSITORY",
            ToolSource::LocalScript => "LOCAL_SCRIPT",
            ToolSource::Unknown => "UNKNOWN",
        }
    }

    /// Parse a source label, case-insensitive. Unrecognized labels map to `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label.to_uppercase().replace('-', "_").as_str() {
            "MCP" => ToolSource::Mcp,
            "EXTERNAL_API" | "API" => ToolSource::ExternalApi,
            "CODE_REPOSITORY" | "REPOSITORY" => ToolSource::CodeRepository,
            "LOCAL_SCRIPT" | "SCRIPT" => ToolSource::LocalScript,
            _ => ToolSource::Unknown,
        }
    }
}

impl std::fmt::Display for ToolSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tool known to the platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    /// Stable tool identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// Primary capability label (e.g. "database access")
    #[serde(default)]
    pub capability: String,
    /// Additional capability labels
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capabilities: Vec<String>,
    /// Declared schema, if the tool publishes one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<ToolSchema>,
    /// Where the tool came from
    #[serde(default)]
    pub source: ToolSource,
    /// Link to external documentation
    #[serde(rename = "documentationUrl", default, skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,
}

impl Tool {
    /// Create a tool with an id and name; everything else empty
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            capability: String::new(),
            capabilities: Vec::new(),
            schema: None,
            source: ToolSource::Unknown,
            documentation_url: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_capability(mut self, capability: impl Into<String>) -> Self {
        self.capability = capability.into();
        self
    }

    pub fn with_capabilities<I, S>(mut self, capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.capabilities = capabilities.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_schema(mut self, schema: ToolSchema) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn with_source(mut self, source: ToolSource) -> Self {
        self.source = source;
        self
    }

    pub fn with_documentation_url(mut self, url: impl Into<String>) -> Self {
        self.documentation_url = Some(url.into());
        self
    }

    /// All declared capability labels, primary first, blanks and duplicates removed
    pub fn capability_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = Vec::new();
        let candidates = std::iter::once(&self.capability).chain(self.capabilities.iter());
        for label in candidates {
            let trimmed = label.trim();
            if trimmed.is_empty() {
                continue;
            }
            if !labels.iter().any(|l| l.eq_ignore_ascii_case(trimmed)) {
                labels.push(trimmed.to_string());
            }
        }
        labels
    }

    /// Whether a non-empty documentation URL is attached
    pub fn has_documentation(&self) -> bool {
        self.documentation_url
            .as_deref()
            .map(|u| !u.trim().is_empty())
            .unwrap_or(false)
    }
}
