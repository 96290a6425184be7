//! Provider registry
//!
//! Replaces a global provider factory: the registry is built once and
//! injected wherever providers are needed.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::error::{ProviderError, ProviderResult};
use super::genai_provider::GenaiProvider;
use super::kind::ProviderKind;
use super::mock::MockProvider;
use super::traits::Provider;
use crate::logging::Logger;
use crate::secrets::SecretStore;
use crate::types::ProviderMetadata;

/// Providers keyed by lowercase name
pub struct ProviderRegistry {
    providers: RwLock<HashMap<String, Arc<dyn Provider>>>,
    logger: Arc<dyn Logger>,
}

impl ProviderRegistry {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            providers: RwLock::new(HashMap::new()),
            logger,
        }
    }

    /// Registry with one provider per `ProviderKind`
    ///
    /// genai-backed providers resolve their keys through `secrets`; `mock`
    /// echoes the last user message.
    pub fn with_defaults(secrets: Arc<dyn SecretStore>, logger: Arc<dyn Logger>) -> Self {
        let registry = Self::new(Arc::clone(&logger));
        for kind in ProviderKind::ALL {
            let provider: Arc<dyn Provider> = match kind {
                ProviderKind::Mock => Arc::new(MockProvider::echo(Arc::clone(&logger))),
                _ => Arc::new(GenaiProvider::new(kind, Arc::clone(&secrets), Arc::clone(&logger))),
            };
            registry.register(provider);
        }
        registry
    }

    /// Register a provider under its name, replacing any previous one
    pub fn register(&self, provider: Arc<dyn Provider>) {
        let name = provider.name().to_lowercase();
        if self.providers.write().insert(name.clone(), provider).is_some() {
            self.logger.debug(&format!("[ProviderRegistry] Replaced provider: {}", name));
        } else {
            self.logger.debug(&format!("[ProviderRegistry] Registered provider: {}", name));
        }
    }

    pub fn get(&self, name: &str) -> ProviderResult<Arc<dyn Provider>> {
        self.providers
            .read()
            .get(&name.to_lowercase())
            .cloned()
            .ok_or_else(|| ProviderError::UnknownProvider(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.providers.read().contains_key(&name.to_lowercase())
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.providers.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn metadata(&self) -> Vec<ProviderMetadata> {
        let mut all: Vec<ProviderMetadata> =
            self.providers.read().values().map(|p| p.metadata()).collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }
}
