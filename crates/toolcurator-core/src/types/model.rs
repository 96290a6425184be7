//! Model and provider configuration types

use serde::{Deserialize, Serialize};

/// A model the orchestration service can route requests to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Unique identifier used by callers (e.g. "default-chat")
    pub id: String,
    /// Provider name (openai, anthropic, ollama, mock)
    pub provider: String,
    /// Model identifier as used by the provider's API
    pub model: String,
    /// Custom API base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Maximum context length in tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_length: Option<u32>,
    /// Whether the model may be selected
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl ModelConfig {
    pub fn new(id: impl Into<String>, provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            provider: provider.into(),
            model: model.into(),
            api_base: None,
            context_length: None,
            enabled: true,
        }
    }

    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into());
        self
    }

    pub fn with_context_length(mut self, length: u32) -> Self {
        self.context_length = Some(length);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Provider configuration as stored in the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider name (e.g., 'openai', 'anthropic', 'ollama')
    pub name: String,
    /// Whether this provider is enabled (default: true)
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Custom API base URL (optional, uses provider default if not set)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Model names to expose
    #[serde(default)]
    pub models: Vec<String>,
}

impl ProviderConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            api_base: None,
            models: vec![],
        }
    }

    pub fn with_models(mut self, models: Vec<String>) -> Self {
        self.models = models;
        self
    }

    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Expand into one `ModelConfig` per listed model, ids `"<provider>/<model>"`
    pub fn model_configs(&self) -> Vec<ModelConfig> {
        self.models
            .iter()
            .map(|m| {
                let mut config = ModelConfig::new(format!("{}/{}", self.name, m), &self.name, m);
                config.api_base = self.api_base.clone();
                config.enabled = self.enabled;
                config
            })
            .collect()
    }
}

/// Static information about a provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderMetadata {
    pub id: String,
    pub display_name: String,
    pub default_api_base: String,
    pub requires_api_key: bool,
}
