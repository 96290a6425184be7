//! Environment variable secret store

use std::collections::HashMap;
use std::env;

use once_cell::sync::Lazy;

use super::traits::{SecretStore, SecretStoreError, SecretStoreResult};

/// Mapping from provider names to environment variable names
static ENV_VAR_MAP: Lazy<HashMap<&'static str, Vec<&'static str>>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("openai", vec!["OPENAI_API_KEY"]);
    m.insert("anthropic", vec!["ANTHROPIC_API_KEY", "CLAUDE_API_KEY"]);
    m.insert("ollama", vec!["OLLAMA_API_KEY"]);
    m.insert("scanner", vec!["TOOLCURATOR_SCANNER_TOKEN"]);
    m
});

/// Read-only secret store backed by environment variables
///
/// Lookup order for a key:
/// 1. the key itself as a variable name
/// 2. the provider mapping (`anthropic` → `ANTHROPIC_API_KEY`, `CLAUDE_API_KEY`)
/// 3. `<KEY>_API_KEY`
///
/// Empty values are treated as unset.
#[derive(Debug, Default)]
pub struct EnvSecretStore {
    _private: (),
}

impl EnvSecretStore {
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Get the environment variable names for a provider
    pub fn env_vars_for(provider: &str) -> Option<&'static [&'static str]> {
        ENV_VAR_MAP.get(provider.to_lowercase().as_str()).map(|v| v.as_slice())
    }

    fn read(name: &str) -> Option<String> {
        env::var(name).ok().filter(|v| !v.is_empty())
    }
}

impl SecretStore for EnvSecretStore {
    fn name(&self) -> &str {
        "env"
    }

    fn get(&self, key: &str) -> Option<String> {
        if let Some(value) = Self::read(key) {
            return Some(value);
        }

        if let Some(vars) = Self::env_vars_for(key) {
            if let Some(value) = vars.iter().find_map(|v| Self::read(v)) {
                return Some(value);
            }
        }

        Self::read(&format!("{}_API_KEY", key.to_uppercase()))
    }

    fn store(&self, _key: &str, _value: &str) -> SecretStoreResult<()> {
        Err(SecretStoreError::ReadOnly(self.name().to_string()))
    }

    fn delete(&self, _key: &str) -> SecretStoreResult<()> {
        Err(SecretStoreError::ReadOnly(self.name().to_string()))
    }
}
