//! Model service errors

use thiserror::Error;

use crate::providers::ProviderError;

#[derive(Error, Debug)]
pub enum ModelServiceError {
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Model is disabled: {0}")]
    ModelDisabled(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

pub type ModelServiceResult<T> = Result<T, ModelServiceError>;
