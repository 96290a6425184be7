//! In-memory secret store

use std::collections::HashMap;

use parking_lot::RwLock;

use super::traits::{SecretStore, SecretStoreResult};

/// Process-local secrets, mostly for tests and embedded hosts
///
/// ```
/// use toolcurator_core::secrets::{SecretStore, MemorySecretStore};
///
/// let store = MemorySecretStore::from_pairs([("openai", "sk-test")]);
/// assert_eq!(store.require("openai").ok().as_deref(), Some("sk-test"));
/// ```
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    secrets: RwLock<HashMap<String, String>>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            secrets: RwLock::new(
                pairs
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Stored keys, sorted; values are never exposed in bulk
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.secrets.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.secrets.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.secrets.read().is_empty()
    }
}

impl SecretStore for MemorySecretStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, key: &str) -> Option<String> {
        self.secrets.read().get(key).cloned()
    }

    fn store(&self, key: &str, value: &str) -> SecretStoreResult<()> {
        self.secrets.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// Deleting an absent key is a no-op
    fn delete(&self, key: &str) -> SecretStoreResult<()> {
        self.secrets.write().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::SecretStoreError;

    #[test]
    fn test_store_and_delete() {
        let store = MemorySecretStore::new();
        assert!(store.is_empty());

        store.store("anthropic", "sk-ant").unwrap();
        store.store("scanner", "tok").unwrap();
        assert_eq!(store.keys(), vec!["anthropic", "scanner"]);

        store.delete("anthropic").unwrap();
        store.delete("anthropic").unwrap();
        assert!(!store.has("anthropic"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_require_reports_missing_key() {
        let store = MemorySecretStore::from_pairs([("openai", "sk-1")]);
        assert_eq!(store.require("openai").unwrap(), "sk-1");
        assert!(matches!(
            store.require("ollama"),
            Err(SecretStoreError::Missing(key)) if key == "ollama"
        ));
    }
}
