//! Provider trait definition

use async_trait::async_trait;

use super::error::ProviderResult;
use super::kind::ProviderKind;
use crate::types::{ModelConfig, ModelRequest, ModelResponse, ProviderMetadata};

/// A backend that can complete chat requests
///
/// Implementations receive the full `ModelConfig` so one provider instance
/// can serve every model configured for it.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Registry name (e.g. "openai")
    fn name(&self) -> &str;

    /// Which provider family this is
    fn kind(&self) -> ProviderKind;

    /// Static provider information
    fn metadata(&self) -> ProviderMetadata {
        self.kind().metadata()
    }

    /// Complete a request against the given model
    async fn complete(&self, request: &ModelRequest, model: &ModelConfig) -> ProviderResult<ModelResponse>;
}
