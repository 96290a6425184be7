//! Model repository

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::types::{ModelConfig, ProviderConfig};

/// Storage for the models the service may route to
#[async_trait]
pub trait ModelRepository: Send + Sync {
    async fn list(&self) -> Vec<ModelConfig>;

    async fn get(&self, id: &str) -> Option<ModelConfig>;

    /// Insert or replace by id
    async fn save(&self, model: ModelConfig);

    /// Returns whether a model was removed
    async fn remove(&self, id: &str) -> bool;
}

/// In-memory repository, ordered by model id
#[derive(Debug, Default)]
pub struct MemoryModelRepository {
    models: RwLock<BTreeMap<String, ModelConfig>>,
}

impl MemoryModelRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_models(models: impl IntoIterator<Item = ModelConfig>) -> Self {
        Self {
            models: RwLock::new(models.into_iter().map(|m| (m.id.clone(), m)).collect()),
        }
    }

    /// Seed from configured providers (`<provider>/<model>` ids)
    pub fn from_providers(providers: &[ProviderConfig]) -> Self {
        Self::with_models(providers.iter().flat_map(|p| p.model_configs()))
    }
}

#[async_trait]
impl ModelRepository for MemoryModelRepository {
    async fn list(&self) -> Vec<ModelConfig> {
        self.models.read().values().cloned().collect()
    }

    async fn get(&self, id: &str) -> Option<ModelConfig> {
        self.models.read().get(id).cloned()
    }

    async fn save(&self, model: ModelConfig) {
        self.models.write().insert(model.id.clone(), model);
    }

    async fn remove(&self, id: &str) -> bool {
        self.models.write().remove(id).is_some()
    }
}
