//! ToolCurator Core
//!
//! Discovers, matches, ranks, evaluates and versions tools for AI agents.
//! The crate is runtime-agnostic: every component takes its logger, config,
//! secrets and event bus through its constructor, usually via
//! [`PlatformContext`].
//!
//! ## Curation
//!
//! ```rust,ignore
//! use toolcurator_core::{PlatformContext, curator::{CurationSignals, ToolRequirement}};
//!
//! let context = PlatformContext::builder().build();
//! let registry = context.tool_registry();
//! registry.refresh().await;
//!
//! let curator = context.curator().await?;
//! let requirement = ToolRequirement::new("req-1", ["read file", "search web"]);
//! let recommendations = curator.recommend(&requirement, &registry.candidates(), &CurationSignals::new(), None);
//! ```
//!
//! ## Evaluation
//!
//! ```rust,ignore
//! let evaluator = context.evaluator().await?;
//! let report = evaluator.evaluate_all(&tool).await?;
//! println!("{:.2} {}", report.overall_score, report.recommendation);
//! ```

pub mod types;
pub mod secrets;
pub mod logging;
pub mod config;
pub mod events;
pub mod curator;
pub mod evaluation;
pub mod tools;
pub mod mcp;
pub mod providers;
pub mod model_service;
pub mod context;

// Re-export commonly used types
pub use types::{
    ChatMessage, MessageRole, ModelConfig, ModelRequest, ModelResponse, ProviderConfig,
    Tool, ToolSchema, ToolSource,
    ToolCapabilityMatch, ToolMatchScore, ToolRecommendation,
    EvaluationCriterion, ComprehensiveEvaluationResult,
    ToolVersion, VersionStatus,
};

pub use secrets::{
    SecretStore, SecretStoreError, SecretStoreResult,
    EnvSecretStore, MemorySecretStore, ChainSecretStore,
};

pub use logging::{Logger, NoOpLogger, ConsoleLogger, TracingLogger};

pub use config::{ConfigProvider, ConfigError, MemoryConfigProvider, FileConfigProvider};

pub use events::{CuratorEvent, EventBus};

pub use curator::{ToolCurator, ToolRequirement, CurationSignals, VersionManager};

pub use evaluation::{ToolEvaluator, EvaluationError};

pub use tools::{ToolRegistry, ToolFilter, ToolInfo};

pub use mcp::{McpClient, McpError, McpToolSource};

pub use providers::{Provider, ProviderError, ProviderKind, ProviderRegistry};

pub use model_service::{ModelService, ModelServiceError};

pub use context::{PlatformContext, PlatformContextBuilder};
