//! Mock provider for testing
//!
//! Deterministic responses without network access.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::error::{ProviderError, ProviderResult};
use super::kind::ProviderKind;
use super::traits::Provider;
use crate::logging::Logger;
use crate::types::{ModelConfig, ModelRequest, ModelResponse};

/// Mock response mode
#[derive(Debug, Clone, Default)]
pub enum MockMode {
    /// Echo back the last user message
    #[default]
    Echo,
    /// Return a fixed response
    Fixed(String),
    /// Return the concatenation of these pieces
    Chunks(Vec<String>),
    /// Fail with this message
    Error(String),
    /// Return an empty completion
    Empty,
}

/// Configuration for the mock provider
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    pub mode: MockMode,
    /// Simulated latency in milliseconds (0 = none)
    pub delay_ms: u64,
}

/// Mock provider; records the requests it receives
pub struct MockProvider {
    config: MockConfig,
    calls: AtomicUsize,
    last_request: Mutex<Option<ModelRequest>>,
    logger: Arc<dyn Logger>,
}

impl MockProvider {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self::with_config(MockConfig::default(), logger)
    }

    pub fn with_config(config: MockConfig, logger: Arc<dyn Logger>) -> Self {
        Self {
            config,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
            logger,
        }
    }

    pub fn echo(logger: Arc<dyn Logger>) -> Self {
        Self::new(logger)
    }

    pub fn fixed(response: impl Into<String>, logger: Arc<dyn Logger>) -> Self {
        Self::with_config(
            MockConfig {
                mode: MockMode::Fixed(response.into()),
                ..Default::default()
            },
            logger,
        )
    }

    pub fn chunked(chunks: Vec<String>, logger: Arc<dyn Logger>) -> Self {
        Self::with_config(
            MockConfig {
                mode: MockMode::Chunks(chunks),
                ..Default::default()
            },
            logger,
        )
    }

    pub fn error(message: impl Into<String>, logger: Arc<dyn Logger>) -> Self {
        Self::with_config(
            MockConfig {
                mode: MockMode::Error(message.into()),
                ..Default::default()
            },
            logger,
        )
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.config.delay_ms = delay_ms;
        self
    }

    /// Number of `complete` calls so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<ModelRequest> {
        self.last_request.lock().clone()
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Mock
    }

    async fn complete(&self, request: &ModelRequest, model: &ModelConfig) -> ProviderResult<ModelResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock() = Some(request.clone());

        if self.config.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.delay_ms)).await;
        }

        let content = match &self.config.mode {
            MockMode::Echo => {
                let user_msg = request.last_user_message().unwrap_or_default();
                self.logger.debug(&format!("[MockProvider] Echo mode, echoing: {}", user_msg));
                format!("Echo: {}", user_msg)
            }
            MockMode::Fixed(response) => response.clone(),
            MockMode::Chunks(chunks) => chunks.concat(),
            MockMode::Empty => String::new(),
            MockMode::Error(message) => {
                self.logger.debug("[MockProvider] Error mode");
                return Err(ProviderError::request_failed("mock", message.clone()));
            }
        };

        Ok(ModelResponse {
            provider: "mock".to_string(),
            model: model.model.clone(),
            content,
        })
    }
}
