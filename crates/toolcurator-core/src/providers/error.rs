//! Provider error types

use thiserror::Error;

/// Why a completion could not be produced
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("{provider} needs an API key and none is stored")]
    MissingApiKey { provider: String },

    /// Transport or upstream failure, including a broken stream
    #[error("Request to {provider} failed: {message}")]
    RequestFailed { provider: String, message: String },

    #[error("{provider} returned an empty completion")]
    EmptyCompletion { provider: String },

    #[error("No provider registered as '{0}'")]
    UnknownProvider(String),
}

impl ProviderError {
    pub fn request_failed(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RequestFailed {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn missing_api_key(provider: impl Into<String>) -> Self {
        Self::MissingApiKey {
            provider: provider.into(),
        }
    }

    /// Provider name the error refers to
    pub fn provider(&self) -> &str {
        match self {
            Self::MissingApiKey { provider }
            | Self::RequestFailed { provider, .. }
            | Self::EmptyCompletion { provider } => provider,
            Self::UnknownProvider(name) => name,
        }
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;
