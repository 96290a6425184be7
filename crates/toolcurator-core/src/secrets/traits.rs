//! Secret store trait

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SecretStoreError {
    #[error("Secret store '{0}' is read-only")]
    ReadOnly(String),

    #[error("No secret stored under '{0}'")]
    Missing(String),

    #[error("Invalid store configuration: {0}")]
    InvalidConfiguration(String),
}

pub type SecretStoreResult<T> = Result<T, SecretStoreError>;

/// Where provider API keys and the scanner token come from
///
/// Keys are provider names (`"openai"`), `"scanner"`, or a full variable
/// name (`"OPENAI_API_KEY"`); each store decides how a key maps to storage.
pub trait SecretStore: Send + Sync {
    fn name(&self) -> &str;

    /// False when the backing storage can't be reached at all
    fn is_available(&self) -> bool {
        true
    }

    fn get(&self, key: &str) -> Option<String>;

    fn store(&self, key: &str, value: &str) -> SecretStoreResult<()>;

    fn delete(&self, key: &str) -> SecretStoreResult<()>;

    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Like `get`, but a missing secret is an error
    fn require(&self, key: &str) -> SecretStoreResult<String> {
        self.get(key)
            .ok_or_else(|| SecretStoreError::Missing(key.to_string()))
    }
}
