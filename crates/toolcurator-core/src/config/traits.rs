//! Configuration provider trait

use async_trait::async_trait;

use crate::types::ProviderConfig;
use super::settings::{CuratorSettings, EvaluationSettings};

/// Configuration provider abstraction
///
/// Implementations:
/// - `MemoryConfigProvider`: In-memory for testing
/// - `FileConfigProvider`: YAML file (~/.config/toolcurator/config.yaml)
#[async_trait]
pub trait ConfigProvider: Send + Sync {
    /// Get all configured providers
    async fn get_providers(&self) -> Vec<ProviderConfig>;

    /// Update a provider's configuration
    async fn update_provider(&self, name: &str, config: ProviderConfig) -> ConfigResult<()>;

    /// Add a new provider
    async fn add_provider(&self, config: ProviderConfig) -> ConfigResult<()>;

    /// Remove a provider
    async fn remove_provider(&self, name: &str) -> ConfigResult<()>;

    /// Recommendation and matching settings (defaults if unset)
    async fn curator_settings(&self) -> CuratorSettings;

    /// Replace recommendation settings; rejected if they don't validate
    async fn set_curator_settings(&self, settings: CuratorSettings) -> ConfigResult<()>;

    /// Evaluation settings (defaults if unset)
    async fn evaluation_settings(&self) -> EvaluationSettings;

    /// Replace evaluation settings; rejected if they don't validate
    async fn set_evaluation_settings(&self, settings: EvaluationSettings) -> ConfigResult<()>;
}

/// Errors that can occur during configuration operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    #[error("Provider already exists: {0}")]
    ProviderExists(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
