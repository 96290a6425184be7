//! In-memory configuration provider

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::types::ProviderConfig;
use super::settings::{CuratorSettings, EvaluationSettings};
use super::traits::{ConfigError, ConfigProvider, ConfigResult};

/// In-memory configuration provider for testing and embedding
#[derive(Debug, Default)]
pub struct MemoryConfigProvider {
    providers: RwLock<Vec<ProviderConfig>>,
    curator: RwLock<CuratorSettings>,
    evaluation: RwLock<EvaluationSettings>,
}

impl MemoryConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a memory config provider with initial providers
    pub fn with_providers(providers: Vec<ProviderConfig>) -> Self {
        Self {
            providers: RwLock::new(providers),
            ..Default::default()
        }
    }

    /// Clear all providers
    pub fn clear(&self) {
        self.providers.write().clear();
    }
}

#[async_trait]
impl ConfigProvider for MemoryConfigProvider {
    async fn get_providers(&self) -> Vec<ProviderConfig> {
        self.providers.read().clone()
    }

    async fn update_provider(&self, name: &str, config: ProviderConfig) -> ConfigResult<()> {
        let mut guard = self.providers.write();
        let name_lower = name.to_lowercase();

        match guard.iter().position(|p| p.name.to_lowercase() == name_lower) {
            Some(pos) => {
                guard[pos] = config;
                Ok(())
            }
            None => Err(ConfigError::ProviderNotFound(name.to_string())),
        }
    }

    async fn add_provider(&self, config: ProviderConfig) -> ConfigResult<()> {
        let mut guard = self.providers.write();
        let name_lower = config.name.to_lowercase();

        if guard.iter().any(|p| p.name.to_lowercase() == name_lower) {
            return Err(ConfigError::ProviderExists(config.name.clone()));
        }

        guard.push(config);
        Ok(())
    }

    async fn remove_provider(&self, name: &str) -> ConfigResult<()> {
        let mut guard = self.providers.write();
        let name_lower = name.to_lowercase();

        let original_len = guard.len();
        guard.retain(|p| p.name.to_lowercase() != name_lower);

        if guard.len() == original_len {
            Err(ConfigError::ProviderNotFound(name.to_string()))
        } else {
            Ok(())
        }
    }

    async fn curator_settings(&self) -> CuratorSettings {
        self.curator.read().clone()
    }

    async fn set_curator_settings(&self, settings: CuratorSettings) -> ConfigResult<()> {
        settings.validate()?;
        *self.curator.write() = settings;
        Ok(())
    }

    async fn evaluation_settings(&self) -> EvaluationSettings {
        self.evaluation.read().clone()
    }

    async fn set_evaluation_settings(&self, settings: EvaluationSettings) -> ConfigResult<()> {
        settings.validate()?;
        *self.evaluation.write() = settings;
        Ok(())
    }
}
