//! Platform context
//!
//! Holds the shared services (logger, config, secrets, event bus, providers)
//! and builds components from them. Nothing in the crate reads global state;
//! everything a component needs comes through here or its constructor.
//!
//! ```rust,ignore
//! let context = PlatformContext::builder()
//!     .with_config(Arc::new(FileConfigProvider::user()))
//!     .build();
//!
//! let curator = context.curator().await?;
//! let recommendations = curator.recommend(&requirement, &tools, &signals, None);
//! ```

use std::sync::Arc;

use crate::config::{ConfigProvider, ConfigResult, MemoryConfigProvider};
use crate::curator::{ToolCurator, VersionManager};
use crate::evaluation::{
    FixedMetricsSource, MetricsSource, PatternSecurityScanner, SecurityScanner, ToolEvaluator,
};
use crate::events::EventBus;
use crate::log_debug;
use crate::logging::{Logger, TracingLogger};
use crate::model_service::{MemoryModelRepository, ModelService, RequestLogger, RequestProcessor};
use crate::providers::ProviderRegistry;
use crate::secrets::{EnvSecretStore, SecretStore};
use crate::tools::ToolRegistry;

/// Shared services, built once per process or test
#[derive(Clone)]
pub struct PlatformContext {
    logger: Arc<dyn Logger>,
    config: Arc<dyn ConfigProvider>,
    secrets: Arc<dyn SecretStore>,
    events: EventBus,
    providers: Arc<ProviderRegistry>,
    scanner: Arc<dyn SecurityScanner>,
    metrics: Arc<dyn MetricsSource>,
}

impl PlatformContext {
    pub fn builder() -> PlatformContextBuilder {
        PlatformContextBuilder::default()
    }

    pub fn logger(&self) -> Arc<dyn Logger> {
        Arc::clone(&self.logger)
    }

    pub fn config(&self) -> Arc<dyn ConfigProvider> {
        Arc::clone(&self.config)
    }

    pub fn secrets(&self) -> Arc<dyn SecretStore> {
        Arc::clone(&self.secrets)
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn providers(&self) -> Arc<ProviderRegistry> {
        Arc::clone(&self.providers)
    }

    /// Curator configured from the current curator settings
    pub async fn curator(&self) -> ConfigResult<ToolCurator> {
        let settings = self.config.curator_settings().await;
        Ok(ToolCurator::new(&settings, self.logger())?.with_event_bus(self.events.clone()))
    }

    /// Evaluator using the context's scanner and metrics source
    pub async fn evaluator(&self) -> ConfigResult<ToolEvaluator> {
        self.evaluator_with(Arc::clone(&self.scanner), Arc::clone(&self.metrics))
            .await
    }

    /// Evaluator with a specific scanner and metrics source
    pub async fn evaluator_with(
        &self,
        scanner: Arc<dyn SecurityScanner>,
        metrics: Arc<dyn MetricsSource>,
    ) -> ConfigResult<ToolEvaluator> {
        let settings = self.config.evaluation_settings().await;
        settings.validate()?;
        Ok(ToolEvaluator::new(scanner, metrics, &settings, self.logger())
            .with_event_bus(self.events.clone()))
    }

    /// Model service seeded with every model of the configured providers
    pub async fn model_service(&self) -> ModelService {
        let providers = self.config.get_providers().await;
        let repository = MemoryModelRepository::from_providers(&providers);
        log_debug!(
            self.logger,
            "[PlatformContext] Model service seeded from {} providers",
            providers.len()
        );

        ModelService::new(
            Arc::new(repository),
            RequestProcessor::new(self.providers(), self.logger()),
            RequestLogger::new(self.logger()),
            self.logger(),
        )
        .with_event_bus(self.events.clone())
    }

    pub fn version_manager(&self) -> VersionManager {
        VersionManager::new(self.logger()).with_event_bus(self.events.clone())
    }

    pub fn tool_registry(&self) -> ToolRegistry {
        ToolRegistry::new(self.logger()).with_event_bus(self.events.clone())
    }
}

/// Builder for `PlatformContext`
///
/// Unset parts default to: `TracingLogger`, `MemoryConfigProvider`,
/// `EnvSecretStore`, a fresh `EventBus`, `ProviderRegistry::with_defaults`,
/// `PatternSecurityScanner` and `FixedMetricsSource`.
#[derive(Default)]
pub struct PlatformContextBuilder {
    logger: Option<Arc<dyn Logger>>,
    config: Option<Arc<dyn ConfigProvider>>,
    secrets: Option<Arc<dyn SecretStore>>,
    events: Option<EventBus>,
    providers: Option<Arc<ProviderRegistry>>,
    scanner: Option<Arc<dyn SecurityScanner>>,
    metrics: Option<Arc<dyn MetricsSource>>,
}

impl PlatformContextBuilder {
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_config(mut self, config: Arc<dyn ConfigProvider>) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_secrets(mut self, secrets: Arc<dyn SecretStore>) -> Self {
        self.secrets = Some(secrets);
        self
    }

    pub fn with_event_bus(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    /// Use this registry instead of the defaults built from the secret store
    pub fn with_providers(mut self, providers: Arc<ProviderRegistry>) -> Self {
        self.providers = Some(providers);
        self
    }

    pub fn with_scanner(mut self, scanner: Arc<dyn SecurityScanner>) -> Self {
        self.scanner = Some(scanner);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsSource>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn build(self) -> PlatformContext {
        let logger = self
            .logger
            .unwrap_or_else(|| Arc::new(TracingLogger::new("toolcurator")));
        let secrets = self
            .secrets
            .unwrap_or_else(|| Arc::new(EnvSecretStore::new()));
        let providers = self.providers.unwrap_or_else(|| {
            Arc::new(ProviderRegistry::with_defaults(
                Arc::clone(&secrets),
                Arc::clone(&logger),
            ))
        });

        PlatformContext {
            config: self
                .config
                .unwrap_or_else(|| Arc::new(MemoryConfigProvider::new())),
            events: self.events.unwrap_or_default(),
            scanner: self
                .scanner
                .unwrap_or_else(|| Arc::new(PatternSecurityScanner::new())),
            metrics: self
                .metrics
                .unwrap_or_else(|| Arc::new(FixedMetricsSource::default())),
            logger,
            secrets,
            providers,
        }
    }
}
