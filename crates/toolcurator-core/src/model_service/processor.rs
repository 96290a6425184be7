//! Request processing: provider selection and the provider call

use std::sync::Arc;

use super::error::{ModelServiceError, ModelServiceResult};
use crate::logging::Logger;
use crate::providers::ProviderRegistry;
use crate::types::{ModelConfig, ModelRequest, ModelResponse};

pub struct RequestProcessor {
    providers: Arc<ProviderRegistry>,
    logger: Arc<dyn Logger>,
}

impl RequestProcessor {
    pub fn new(providers: Arc<ProviderRegistry>, logger: Arc<dyn Logger>) -> Self {
        Self { providers, logger }
    }

    /// Validate the request and run it on the model's provider
    pub async fn process(&self, model: &ModelConfig, request: &ModelRequest) -> ModelServiceResult<ModelResponse> {
        if !model.enabled {
            return Err(ModelServiceError::ModelDisabled(model.id.clone()));
        }
        if request.messages.is_empty() {
            return Err(ModelServiceError::InvalidRequest("request has no messages".to_string()));
        }
        if let Some(t) = request.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Err(ModelServiceError::InvalidRequest(format!(
                    "temperature {} outside 0.0..=2.0",
                    t
                )));
            }
        }

        let provider = self.providers.get(&model.provider)?;
        self.logger.debug(&format!(
            "[RequestProcessor] Routing {} to provider {}",
            model.id,
            provider.name()
        ));

        Ok(provider.complete(request, model).await?)
    }
}
