//! Supported provider families

use std::fmt;

use genai::adapter::AdapterKind;
use serde::{Deserialize, Serialize};

use crate::types::ProviderMetadata;

/// Provider family, resolved from a configured provider name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[serde(rename = "openai")]
    OpenAi,
    Anthropic,
    Ollama,
    Mock,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 4] = [Self::OpenAi, Self::Anthropic, Self::Ollama, Self::Mock];

    /// Parse a provider name; case-insensitive, `claude` is accepted for Anthropic
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "openai" => Some(Self::OpenAi),
            "anthropic" | "claude" => Some(Self::Anthropic),
            "ollama" => Some(Self::Ollama),
            "mock" => Some(Self::Mock),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Ollama => "ollama",
            Self::Mock => "mock",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::Anthropic => "Anthropic",
            Self::Ollama => "Ollama",
            Self::Mock => "Mock",
        }
    }

    pub fn default_api_base(&self) -> &'static str {
        match self {
            Self::OpenAi => "https://api.openai.com/v1/",
            Self::Anthropic => "https://api.anthropic.com/",
            Self::Ollama => "http://localhost:11434/",
            Self::Mock => "mock://",
        }
    }

    /// Key looked up in the secret store for this provider's API key
    pub fn secret_key(&self) -> &'static str {
        self.name()
    }

    pub fn requires_api_key(&self) -> bool {
        matches!(self, Self::OpenAi | Self::Anthropic)
    }

    /// genai adapter serving this family; `None` for the mock
    pub fn adapter_kind(&self) -> Option<AdapterKind> {
        match self {
            Self::OpenAi => Some(AdapterKind::OpenAI),
            Self::Anthropic => Some(AdapterKind::Anthropic),
            Self::Ollama => Some(AdapterKind::Ollama),
            Self::Mock => None,
        }
    }

    pub fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            id: self.name().to_string(),
            display_name: self.display_name().to_string(),
            default_api_base: self.default_api_base().to_string(),
            requires_api_key: self.requires_api_key(),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(ProviderKind::from_name("OpenAI"), Some(ProviderKind::OpenAi));
        assert_eq!(ProviderKind::from_name(" claude "), Some(ProviderKind::Anthropic));
        assert_eq!(ProviderKind::from_name("ollama"), Some(ProviderKind::Ollama));
        assert_eq!(ProviderKind::from_name("gemini"), None);
    }

    #[test]
    fn test_name_round_trips() {
        for kind in ProviderKind::ALL {
            assert_eq!(ProviderKind::from_name(kind.name()), Some(kind));
        }
    }

    #[test]
    fn test_api_key_requirements() {
        assert!(ProviderKind::OpenAi.requires_api_key());
        assert!(ProviderKind::Anthropic.requires_api_key());
        assert!(!ProviderKind::Ollama.requires_api_key());
        assert!(!ProviderKind::Mock.requires_api_key());
        assert!(ProviderKind::Mock.adapter_kind().is_none());
    }

    #[test]
    fn test_metadata() {
        let meta = ProviderKind::Ollama.metadata();
        assert_eq!(meta.id, "ollama");
        assert_eq!(meta.default_api_base, "http://localhost:11434/");
        assert!(!meta.requires_api_key);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&ProviderKind::OpenAi).unwrap(), "\"openai\"");
        assert_eq!(serde_json::to_string(&ProviderKind::Anthropic).unwrap(), "\"anthropic\"");
    }
}
