//! GenaiProvider - one provider type for every genai-backed family
//!
//! OpenAI, Anthropic and Ollama all go through the genai client; the
//! `api_base` of a model overrides the adapter's endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use genai::chat::{ChatRequest, ChatStreamEvent};

use super::error::{ProviderError, ProviderResult};
use super::genai_adapter::{create_client, to_genai_messages, to_genai_options, ClientSettings};
use super::kind::ProviderKind;
use super::traits::Provider;
use crate::logging::Logger;
use crate::secrets::SecretStore;
use crate::types::{ModelConfig, ModelRequest, ModelResponse};

/// Provider backed by the genai crate
pub struct GenaiProvider {
    kind: ProviderKind,
    secrets: Arc<dyn SecretStore>,
    logger: Arc<dyn Logger>,
}

impl GenaiProvider {
    pub fn new(kind: ProviderKind, secrets: Arc<dyn SecretStore>, logger: Arc<dyn Logger>) -> Self {
        Self { kind, secrets, logger }
    }

    /// Extract model name from a model string (e.g., "openai/gpt-4" -> "gpt-4")
    pub fn extract_model_name(model: &str) -> &str {
        model.split_once('/').map(|(_, name)| name).unwrap_or(model)
    }

    fn request_failed(&self, message: impl Into<String>) -> ProviderError {
        ProviderError::request_failed(self.kind.name(), message)
    }
}

#[async_trait]
impl Provider for GenaiProvider {
    fn name(&self) -> &str {
        self.kind.name()
    }

    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn complete(&self, request: &ModelRequest, model: &ModelConfig) -> ProviderResult<ModelResponse> {
        self.logger.info(&format!(
            "[GenaiProvider] complete called: provider={}, model={}",
            self.kind, model.model
        ));

        if self.kind.requires_api_key() {
            self.secrets
                .require(self.kind.secret_key())
                .map_err(|_| ProviderError::missing_api_key(self.kind.name()))?;
        }

        let client = create_client(ClientSettings {
            kind: self.kind,
            api_base: model.api_base.clone(),
            api_key: None,
            secrets: Arc::clone(&self.secrets),
        });

        let chat_req = ChatRequest::new(to_genai_messages(&request.messages));
        let genai_options = to_genai_options(request);
        let model_name = Self::extract_model_name(&model.model);

        let chat_stream = client
            .exec_chat_stream(model_name, chat_req, Some(&genai_options))
            .await
            .map_err(|e| self.request_failed(e.to_string()))?;

        let mut stream = Box::pin(chat_stream.stream);
        let mut content = String::new();
        let mut ended = false;

        while let Some(event) = stream.next().await {
            match event.map_err(|e| self.request_failed(e.to_string()))? {
                ChatStreamEvent::Chunk(chunk) => content.push_str(&chunk.content),
                ChatStreamEvent::End(_) => {
                    ended = true;
                    break;
                }
                _ => {}
            }
        }

        if !ended {
            self.logger.warn("[GenaiProvider] Stream closed without an end event");
        }
        if content.is_empty() {
            return Err(ProviderError::EmptyCompletion {
                provider: self.kind.name().to_string(),
            });
        }

        self.logger.debug(&format!("[GenaiProvider] Received {} chars", content.len()));

        Ok(ModelResponse {
            provider: self.kind.name().to_string(),
            model: model.model.clone(),
            content,
        })
    }
}
