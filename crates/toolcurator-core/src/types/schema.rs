//! Typed view of a tool's declared schema
//!
//! Tools publish a JSON-schema-like document. Only the parts the curator
//! reads are modelled; everything is optional and defaults to empty so an
//! absent section behaves exactly like an empty one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Compatible/incompatible lists for one dimension (environments or versions)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityDeclaration {
    #[serde(default)]
    pub compatible: Vec<String>,
    #[serde(default)]
    pub incompatible: Vec<String>,
}

impl CompatibilityDeclaration {
    pub fn new<I, S>(compatible: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            compatible: compatible.into_iter().map(Into::into).collect(),
            incompatible: Vec::new(),
        }
    }

    pub fn with_incompatible<I, S>(mut self, incompatible: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.incompatible = incompatible.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.compatible.is_empty() && self.incompatible.is_empty()
    }
}

/// One parameter of the tool's input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PropertySchema {
    pub fn described(kind: &str, description: impl Into<String>) -> Self {
        Self {
            kind: Some(Value::String(kind.to_string())),
            description: Some(description.into()),
        }
    }

    pub fn undescribed(kind: &str) -> Self {
        Self {
            kind: Some(Value::String(kind.to_string())),
            description: None,
        }
    }

    /// Whether the parameter carries a non-blank description
    pub fn has_description(&self) -> bool {
        self.description
            .as_deref()
            .map(|d| !d.trim().is_empty())
            .unwrap_or(false)
    }
}

/// Declared schema of a tool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolSchema {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, PropertySchema>,
    /// Present when the schema declares a `required` list, even an empty one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    #[serde(rename = "errorResponses", default, skip_serializing_if = "Option::is_none")]
    pub error_responses: Option<Value>,
    #[serde(default, skip_serializing_if = "CompatibilityDeclaration::is_empty")]
    pub environment: CompatibilityDeclaration,
    #[serde(default, skip_serializing_if = "CompatibilityDeclaration::is_empty")]
    pub version: CompatibilityDeclaration,
}

impl ToolSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a raw JSON document (e.g. an MCP `inputSchema`)
    pub fn from_json(value: &Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value.clone())
    }

    pub fn with_property(mut self, name: impl Into<String>, property: PropertySchema) -> Self {
        self.properties.insert(name.into(), property);
        self
    }

    pub fn with_required<I, S>(mut self, required: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required = Some(required.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_error_responses(mut self, responses: Value) -> Self {
        self.error_responses = Some(responses);
        self
    }

    pub fn with_environment(mut self, environment: CompatibilityDeclaration) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_version(mut self, version: CompatibilityDeclaration) -> Self {
        self.version = version;
        self
    }

    /// Number of properties carrying a description
    pub fn described_property_count(&self) -> usize {
        self.properties.values().filter(|p| p.has_description()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_json_schema() {
        let raw = json!({
            "type": "object",
            "properties": {
                "query": { "type": "string", "description": "SQL to run" },
                "limit": { "type": "integer" }
            },
            "required": ["query"],
            "errorResponses": { "400": "bad query" },
            "environment": { "compatible": ["python", "node"] }
        });

        let schema = ToolSchema::from_json(&raw).unwrap();
        assert_eq!(schema.kind.as_deref(), Some("object"));
        assert_eq!(schema.properties.len(), 2);
        assert_eq!(schema.described_property_count(), 1);
        assert_eq!(schema.required, Some(vec!["query".to_string()]));
        assert!(schema.error_responses.is_some());
        assert_eq!(schema.environment.compatible, vec!["python", "node"]);
        assert!(schema.version.is_empty());
    }

    #[test]
    fn test_missing_sections_default_empty() {
        let schema = ToolSchema::from_json(&json!({})).unwrap();
        assert!(schema.properties.is_empty());
        assert!(schema.required.is_none());
        assert!(schema.error_responses.is_none());
        assert!(schema.environment.is_empty());
    }

    #[test]
    fn test_union_type_property() {
        let raw = json!({
            "properties": { "value": { "type": ["string", "null"], "description": "  " } }
        });
        let schema = ToolSchema::from_json(&raw).unwrap();
        assert_eq!(schema.described_property_count(), 0);
    }
}
