//! File-based configuration provider (YAML)
//!
//! Supports user-level (~/.config/toolcurator/config.yaml) and workspace-level
//! (.config/toolcurator/config.yaml) config.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::types::ProviderConfig;
use super::settings::{CuratorSettings, EvaluationSettings};
use super::traits::{ConfigError, ConfigProvider, ConfigResult};

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Configured LLM providers
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,

    /// Matching and recommendation settings
    #[serde(default)]
    pub curator: CuratorSettings,

    /// Evaluation settings
    #[serde(default)]
    pub evaluation: EvaluationSettings,
}

impl ConfigFile {
    pub fn validate(&self) -> ConfigResult<()> {
        self.curator.validate()?;
        self.evaluation.validate()
    }
}

/// Config level (user or workspace)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLevel {
    /// User-level config (~/.config/toolcurator/config.yaml)
    User,
    /// Workspace-level config (.config/toolcurator/config.yaml in workspace root)
    Workspace,
}

impl ConfigLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigLevel::User => "user",
            ConfigLevel::Workspace => "workspace",
        }
    }
}

/// File-based configuration provider
///
/// # Example
///
/// ```no_run
/// use toolcurator_core::config::FileConfigProvider;
///
/// let user_config = FileConfigProvider::user();
/// let workspace_config = FileConfigProvider::workspace("/path/to/workspace");
/// ```
pub struct FileConfigProvider {
    path: PathBuf,
    level: ConfigLevel,
    cache: RwLock<Option<ConfigFile>>,
}

impl FileConfigProvider {
    pub fn new(path: impl Into<PathBuf>, level: ConfigLevel) -> Self {
        Self {
            path: path.into(),
            level,
            cache: RwLock::new(None),
        }
    }

    /// Create a user-level config provider (~/.config/toolcurator/config.yaml)
    pub fn user() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        Self::new(config_dir.join("toolcurator").join("config.yaml"), ConfigLevel::User)
    }

    /// Create a workspace-level config provider (.config/toolcurator/config.yaml)
    pub fn workspace(workspace_root: impl AsRef<Path>) -> Self {
        let path = workspace_root.as_ref().join(".config").join("toolcurator").join("config.yaml");
        Self::new(path, ConfigLevel::Workspace)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn level(&self) -> ConfigLevel {
        self.level
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load and validate config from disk; a missing file yields defaults
    fn load(&self) -> ConfigResult<ConfigFile> {
        if !self.path.exists() {
            return Ok(ConfigFile::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(ConfigFile::default());
        }
        let config: ConfigFile = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn save(&self, config: &ConfigFile) -> ConfigResult<()> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(config)?;
        fs::write(&self.path, content)?;

        *self.cache.write() = Some(config.clone());
        Ok(())
    }

    /// Get cached or load config
    pub fn get_config(&self) -> ConfigResult<ConfigFile> {
        if let Some(config) = self.cache.read().as_ref() {
            return Ok(config.clone());
        }
        self.reload()
    }

    /// Reload config from disk (invalidate cache)
    pub fn reload(&self) -> ConfigResult<ConfigFile> {
        let config = self.load()?;
        *self.cache.write() = Some(config.clone());
        Ok(config)
    }

    /// Create a backup of the current config file
    pub fn backup(&self) -> ConfigResult<Option<PathBuf>> {
        if !self.exists() {
            return Ok(None);
        }

        let backup_path = self.path.with_extension("yaml.backup");
        fs::copy(&self.path, &backup_path)?;
        Ok(Some(backup_path))
    }

    pub fn export_json(&self) -> ConfigResult<String> {
        let config = self.get_config()?;
        Ok(serde_json::to_string_pretty(&config)?)
    }

    pub fn import_json(&self, json: &str) -> ConfigResult<()> {
        let config: ConfigFile = serde_json::from_str(json)?;
        self.save(&config)
    }
}

impl std::fmt::Debug for FileConfigProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileConfigProvider")
            .field("path", &self.path)
            .field("level", &self.level)
            .field("exists", &self.exists())
            .finish()
    }
}

#[async_trait]
impl ConfigProvider for FileConfigProvider {
    async fn get_providers(&self) -> Vec<ProviderConfig> {
        self.get_config().map(|c| c.providers).unwrap_or_default()
    }

    async fn update_provider(&self, name: &str, config: ProviderConfig) -> ConfigResult<()> {
        let mut file_config = self.get_config()?;
        let name_lower = name.to_lowercase();

        match file_config.providers.iter().position(|p| p.name.to_lowercase() == name_lower) {
            Some(pos) => {
                file_config.providers[pos] = config;
                self.save(&file_config)
            }
            None => Err(ConfigError::ProviderNotFound(name.to_string())),
        }
    }

    async fn add_provider(&self, config: ProviderConfig) -> ConfigResult<()> {
        let mut file_config = self.get_config()?;
        let name_lower = config.name.to_lowercase();

        if file_config.providers.iter().any(|p| p.name.to_lowercase() == name_lower) {
            return Err(ConfigError::ProviderExists(config.name.clone()));
        }

        file_config.providers.push(config);
        self.save(&file_config)
    }

    async fn remove_provider(&self, name: &str) -> ConfigResult<()> {
        let mut file_config = self.get_config()?;
        let name_lower = name.to_lowercase();

        let original_len = file_config.providers.len();
        file_config.providers.retain(|p| p.name.to_lowercase() != name_lower);

        if file_config.providers.len() == original_len {
            Err(ConfigError::ProviderNotFound(name.to_string()))
        } else {
            self.save(&file_config)
        }
    }

    async fn curator_settings(&self) -> CuratorSettings {
        self.get_config().map(|c| c.curator).unwrap_or_default()
    }

    async fn set_curator_settings(&self, settings: CuratorSettings) -> ConfigResult<()> {
        let mut file_config = self.get_config()?;
        file_config.curator = settings;
        self.save(&file_config)
    }

    async fn evaluation_settings(&self) -> EvaluationSettings {
        self.get_config().map(|c| c.evaluation).unwrap_or_default()
    }

    async fn set_evaluation_settings(&self, settings: EvaluationSettings) -> ConfigResult<()> {
        let mut file_config = self.get_config()?;
        file_config.evaluation = settings;
        self.save(&file_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_file_config_provider() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let provider = FileConfigProvider::new(&path, ConfigLevel::User);

        assert!(!provider.exists());
        assert!(provider.get_providers().await.is_empty());
        assert_eq!(provider.curator_settings().await, CuratorSettings::default());

        let anthropic = ProviderConfig::new("anthropic")
            .with_models(vec!["claude-3-5-sonnet-latest".to_string()]);
        provider.add_provider(anthropic).await.unwrap();

        assert!(provider.exists());
        provider.reload().unwrap();
        assert_eq!(provider.get_providers().await.len(), 1);
    }

    #[tokio::test]
    async fn test_yaml_overrides() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "curator:\n  max_recommendations: 3\n  semantic_similarity_threshold: 0.5\nevaluation:\n  max_memory_mb: 256\n",
        )
        .unwrap();

        let provider = FileConfigProvider::new(&path, ConfigLevel::Workspace);
        let curator = provider.curator_settings().await;
        assert_eq!(curator.max_recommendations, 3);
        assert_eq!(curator.semantic_similarity_threshold, 0.5);
        assert_eq!(curator.min_recommendation_score, 0.5);
        assert_eq!(provider.evaluation_settings().await.max_memory_mb, 256.0);
    }

    #[test]
    fn test_invalid_weights_rejected_on_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "curator:\n  weights:\n    capability: 0.9\n    compatibility: 0.3\n    usage: 0.2\n",
        )
        .unwrap();

        let provider = FileConfigProvider::new(&path, ConfigLevel::User);
        assert!(matches!(provider.reload(), Err(ConfigError::InvalidSettings(_))));
    }

    #[tokio::test]
    async fn test_settings_round_trip_through_file() {
        let dir = tempdir().unwrap();
        let provider = FileConfigProvider::workspace(dir.path());

        let settings = CuratorSettings {
            max_recommendations: 7,
            ..Default::default()
        };
        provider.set_curator_settings(settings).await.unwrap();

        let reopened = FileConfigProvider::workspace(dir.path());
        assert_eq!(reopened.curator_settings().await.max_recommendations, 7);
        assert!(reopened.path().ends_with(".config/toolcurator/config.yaml"));
    }

    #[test]
    fn test_backup() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let provider = FileConfigProvider::new(&path, ConfigLevel::User);

        assert!(provider.backup().unwrap().is_none());

        fs::write(&path, "providers: []").unwrap();
        let backup_path = provider.backup().unwrap().unwrap();
        assert!(backup_path.exists());
        assert!(backup_path.to_string_lossy().contains("backup"));
    }
}
