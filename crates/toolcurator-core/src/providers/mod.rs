//! LLM providers
//!
//! ## Architecture
//!
//! ```text
//! ProviderRegistry ──► Arc<dyn Provider>
//!                        ├── GenaiProvider (openai, anthropic, ollama)
//!                        └── MockProvider  (tests, offline use)
//! ```
//!
//! `ProviderKind` is the closed set of families. The genai crate handles the
//! wire protocols; auth goes through the injected `SecretStore`, not genai's
//! env var lookup.

mod error;
mod genai_adapter;
mod genai_provider;
mod kind;
mod mock;
mod registry;
mod traits;

pub use error::{ProviderError, ProviderResult};
pub use genai_adapter::{create_client, to_genai_messages, to_genai_options, ClientSettings};
pub use genai_provider::GenaiProvider;
pub use kind::ProviderKind;
pub use mock::{MockConfig, MockMode, MockProvider};
pub use registry::ProviderRegistry;
pub use traits::Provider;
