//! Model orchestration service
//!
//! `ModelService` is composed of three parts instead of inheriting behavior:
//!
//! - `ModelRepository`: which models exist
//! - `RequestProcessor`: picks the provider and calls it
//! - `RequestLogger`: keeps a bounded history of requests
//!
//! ```rust,ignore
//! let service = context.model_service().await;
//! let response = service.generate("openai/gpt-4o", ModelRequest::prompt("hi")).await?;
//! ```

mod error;
mod processor;
mod repository;
mod request_log;

pub use error::{ModelServiceError, ModelServiceResult};
pub use processor::RequestProcessor;
pub use repository::{MemoryModelRepository, ModelRepository};
pub use request_log::{RequestLogger, RequestRecord, DEFAULT_REQUEST_LOG_CAPACITY};

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::events::{topics, EventBus};
use crate::logging::Logger;
use crate::types::{ModelConfig, ModelRequest, ModelResponse};

pub struct ModelService {
    repository: Arc<dyn ModelRepository>,
    processor: RequestProcessor,
    request_log: RequestLogger,
    logger: Arc<dyn Logger>,
    events: Option<EventBus>,
}

impl ModelService {
    pub fn new(
        repository: Arc<dyn ModelRepository>,
        processor: RequestProcessor,
        request_log: RequestLogger,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            repository,
            processor,
            request_log,
            logger,
            events: None,
        }
    }

    pub fn with_event_bus(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    /// Run a request on the model registered as `model_id`
    ///
    /// Every call that reaches the processor is recorded, successful or not.
    pub async fn generate(&self, model_id: &str, request: ModelRequest) -> ModelServiceResult<ModelResponse> {
        let model = self
            .repository
            .get(model_id)
            .await
            .ok_or_else(|| ModelServiceError::ModelNotFound(model_id.to_string()))?;

        let started_at = Utc::now();
        let timer = Instant::now();
        let result = self.processor.process(&model, &request).await;
        let duration_ms = timer.elapsed().as_millis() as u64;

        let record = RequestRecord {
            id: Uuid::new_v4(),
            model_id: model.id.clone(),
            provider: model.provider.clone(),
            started_at,
            duration_ms,
            response_chars: result.as_ref().map(|r| r.content.chars().count()).unwrap_or(0),
            error: result.as_ref().err().map(|e| e.to_string()),
        };

        if let Some(events) = &self.events {
            events.emit(
                topics::sources::MODEL_SERVICE,
                topics::MODEL_REQUEST_COMPLETED,
                json!({
                    "request_id": record.id.to_string(),
                    "model_id": record.model_id,
                    "provider": record.provider,
                    "duration_ms": record.duration_ms,
                    "success": record.succeeded(),
                }),
            );
        }
        self.request_log.record(record);

        result
    }

    pub async fn list_models(&self) -> Vec<ModelConfig> {
        self.repository.list().await
    }

    pub async fn get_model(&self, id: &str) -> Option<ModelConfig> {
        self.repository.get(id).await
    }

    pub async fn register_model(&self, model: ModelConfig) {
        self.logger.info(&format!(
            "[ModelService] Registered model {} ({}/{})",
            model.id, model.provider, model.model
        ));
        self.repository.save(model).await;
    }

    pub async fn remove_model(&self, id: &str) -> bool {
        self.repository.remove(id).await
    }

    /// Up to `limit` request records, newest first
    pub fn recent_requests(&self, limit: usize) -> Vec<RequestRecord> {
        self.request_log.recent(limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use crate::providers::{MockProvider, ProviderRegistry};

    fn service(provider: MockProvider) -> ModelService {
        let logger: Arc<dyn Logger> = Arc::new(NoOpLogger);
        let registry = ProviderRegistry::new(Arc::clone(&logger));
        registry.register(Arc::new(provider));
        ModelService::new(
            Arc::new(MemoryModelRepository::new()),
            RequestProcessor::new(Arc::new(registry), Arc::clone(&logger)),
            RequestLogger::with_capacity(10, Arc::clone(&logger)),
            logger,
        )
    }

    #[tokio::test]
    async fn test_generate_records_and_publishes() {
        let events = EventBus::new(16);
        let mut rx = events.subscribe();
        let service = service(MockProvider::echo(Arc::new(NoOpLogger))).with_event_bus(events);
        service.register_model(ModelConfig::new("chat", "mock", "mock-echo")).await;

        let response = service.generate("chat", ModelRequest::prompt("hello")).await.unwrap();
        assert_eq!(response.content, "Echo: hello");

        let records = service.recent_requests(5);
        assert_eq!(records.len(), 1);
        assert!(records[0].succeeded());
        assert_eq!(records[0].response_chars, "Echo: hello".len());

        let event = rx.recv().await.unwrap();
        assert_eq!(event.topic, topics::MODEL_REQUEST_COMPLETED);
        assert_eq!(event.payload["success"], true);
    }

    #[tokio::test]
    async fn test_failed_request_is_recorded() {
        let service = service(MockProvider::error("boom", Arc::new(NoOpLogger)));
        service.register_model(ModelConfig::new("chat", "mock", "m")).await;

        let err = service.generate("chat", ModelRequest::prompt("hello")).await.unwrap_err();
        assert!(matches!(err, ModelServiceError::Provider(_)));

        let records = service.recent_requests(5);
        assert_eq!(records.len(), 1);
        assert!(records[0].error.as_deref().unwrap_or_default().contains("boom"));
    }

    #[tokio::test]
    async fn test_unknown_model_is_not_recorded() {
        let service = service(MockProvider::echo(Arc::new(NoOpLogger)));
        let err = service.generate("missing", ModelRequest::prompt("x")).await.unwrap_err();
        assert!(matches!(err, ModelServiceError::ModelNotFound(id) if id == "missing"));
        assert!(service.recent_requests(5).is_empty());
    }

    #[tokio::test]
    async fn test_model_management() {
        let service = service(MockProvider::echo(Arc::new(NoOpLogger)));
        service.register_model(ModelConfig::new("b", "mock", "x")).await;
        service.register_model(ModelConfig::new("a", "mock", "y")).await;

        let ids: Vec<_> = service.list_models().await.into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert!(service.remove_model("a").await);
        assert!(service.get_model("a").await.is_none());
    }
}
