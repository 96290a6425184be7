//! Chained secret store with fallback behavior

use std::sync::Arc;

use super::traits::{SecretStore, SecretStoreError, SecretStoreResult};

/// Tries each store in order for reads; writes go to one designated store
///
/// # Example
///
/// ```
/// use toolcurator_core::secrets::{SecretStore, ChainSecretStore, EnvSecretStore, MemorySecretStore};
/// use std::sync::Arc;
///
/// let memory: Arc<dyn SecretStore> = Arc::new(MemorySecretStore::new());
/// let env: Arc<dyn SecretStore> = Arc::new(EnvSecretStore::new());
///
/// let chain = ChainSecretStore::new(vec![memory, env]).unwrap();
/// chain.store("openai", "sk-test").unwrap();
/// assert_eq!(chain.get("openai"), Some("sk-test".to_string()));
/// ```
pub struct ChainSecretStore {
    stores: Vec<Arc<dyn SecretStore>>,
    write_store_index: usize,
}

impl ChainSecretStore {
    /// Chain `stores`, writing to the first
    pub fn new(stores: Vec<Arc<dyn SecretStore>>) -> SecretStoreResult<Self> {
        Self::with_write_store(stores, 0)
    }

    /// Chain `stores`, writing to the store at `write_store_index`
    pub fn with_write_store(
        stores: Vec<Arc<dyn SecretStore>>,
        write_store_index: usize,
    ) -> SecretStoreResult<Self> {
        if stores.is_empty() {
            return Err(SecretStoreError::InvalidConfiguration(
                "chain requires at least one store".to_string(),
            ));
        }
        if write_store_index >= stores.len() {
            return Err(SecretStoreError::InvalidConfiguration(format!(
                "write store index {} out of bounds for {} stores",
                write_store_index,
                stores.len()
            )));
        }
        Ok(Self {
            stores,
            write_store_index,
        })
    }

    /// Name of the first available store holding `key`
    pub fn source_of(&self, key: &str) -> Option<&str> {
        self.stores
            .iter()
            .find(|s| s.is_available() && s.has(key))
            .map(|s| s.name())
    }
}

impl SecretStore for ChainSecretStore {
    fn name(&self) -> &str {
        "chain"
    }

    fn is_available(&self) -> bool {
        self.stores.iter().any(|s| s.is_available())
    }

    fn get(&self, key: &str) -> Option<String> {
        self.stores
            .iter()
            .filter(|s| s.is_available())
            .find_map(|s| s.get(key))
    }

    fn store(&self, key: &str, value: &str) -> SecretStoreResult<()> {
        self.stores[self.write_store_index].store(key, value)
    }

    fn delete(&self, key: &str) -> SecretStoreResult<()> {
        // Read-only stores keep their copy; that's not an error for the chain
        for store in &self.stores {
            if store.has(key) {
                let _ = store.delete(key);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::{EnvSecretStore, MemorySecretStore};

    #[test]
    fn test_empty_chain_rejected() {
        assert!(matches!(
            ChainSecretStore::new(vec![]),
            Err(SecretStoreError::InvalidConfiguration(_))
        ));
        let memory: Arc<dyn SecretStore> = Arc::new(MemorySecretStore::new());
        assert!(ChainSecretStore::with_write_store(vec![memory], 3).is_err());
    }

    #[test]
    fn test_fallback_order() {
        let first = Arc::new(MemorySecretStore::new());
        let second = Arc::new(MemorySecretStore::new());
        second.store("ollama", "from-second").unwrap();

        let stores: Vec<Arc<dyn SecretStore>> = vec![first.clone(), second.clone()];
        let chain = ChainSecretStore::new(stores).unwrap();
        assert_eq!(chain.get("ollama"), Some("from-second".to_string()));

        first.store("ollama", "from-first").unwrap();
        assert_eq!(chain.get("ollama"), Some("from-first".to_string()));
        assert_eq!(chain.source_of("ollama"), Some("memory"));
    }

    #[test]
    fn test_delete_skips_read_only() {
        let memory = Arc::new(MemorySecretStore::new());
        memory.store("k", "v").unwrap();
        let stores: Vec<Arc<dyn SecretStore>> = vec![memory.clone(), Arc::new(EnvSecretStore::new())];
        let chain = ChainSecretStore::new(stores).unwrap();

        chain.delete("k").unwrap();
        assert!(!memory.has("k"));
    }
}
