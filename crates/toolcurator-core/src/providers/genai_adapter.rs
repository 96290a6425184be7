//! Adapter between toolcurator types and genai types
//!
//! All auth flows through the injected `SecretStore`, not genai's default
//! env var lookup, so keys resolve the same way everywhere in the platform.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use genai::chat::{
    ChatMessage as GenaiMessage, ChatOptions as GenaiOptions, ChatRole as GenaiRole,
    MessageContent as GenaiContent,
};
use genai::resolver::{AuthData, AuthResolver, Endpoint, ServiceTargetResolver};
use genai::{Client, ModelIden, ServiceTarget};

use super::kind::ProviderKind;
use crate::secrets::SecretStore;
use crate::types::{ChatMessage, MessageRole, ModelRequest};

// ============================================================================
// Request Conversion: toolcurator -> genai
// ============================================================================

pub fn to_genai_role(role: MessageRole) -> GenaiRole {
    match role {
        MessageRole::System => GenaiRole::System,
        MessageRole::User => GenaiRole::User,
        MessageRole::Assistant => GenaiRole::Assistant,
    }
}

pub fn to_genai_message(msg: &ChatMessage) -> GenaiMessage {
    let content = GenaiContent::from(msg.content.clone());
    match msg.role {
        MessageRole::System => GenaiMessage::system(content),
        MessageRole::User => GenaiMessage::user(content),
        MessageRole::Assistant => GenaiMessage::assistant(content),
    }
}

pub fn to_genai_messages(messages: &[ChatMessage]) -> Vec<GenaiMessage> {
    messages.iter().map(to_genai_message).collect()
}

pub fn to_genai_options(request: &ModelRequest) -> GenaiOptions {
    let mut genai_opts = GenaiOptions::default();

    if let Some(temp) = request.temperature {
        genai_opts = genai_opts.with_temperature(temp as f64);
    }

    if let Some(max_tokens) = request.max_tokens {
        genai_opts = genai_opts.with_max_tokens(max_tokens);
    }

    genai_opts
}

// ============================================================================
// Client Creation with Custom Auth
// ============================================================================

/// Routing and auth inputs for one genai client
#[derive(Clone)]
pub struct ClientSettings {
    pub kind: ProviderKind,
    /// Overrides the adapter's default endpoint
    pub api_base: Option<String>,
    /// Used before anything in the secret store
    pub api_key: Option<String>,
    pub secrets: Arc<dyn SecretStore>,
}

/// Create a genai Client with custom auth and endpoint resolution
pub fn create_client(settings: ClientSettings) -> Client {
    let ClientSettings {
        kind,
        api_base,
        api_key,
        secrets,
    } = settings;

    let auth_resolver = AuthResolver::from_resolver_async_fn(
        move |_model_iden: ModelIden| -> Pin<Box<dyn Future<Output = genai::resolver::Result<Option<AuthData>>> + Send>> {
            let explicit_key = api_key.clone();
            let secrets = Arc::clone(&secrets);

            Box::pin(async move {
                if let Some(key) = explicit_key {
                    return Ok(Some(AuthData::from_single(key)));
                }

                // None lets genai handle the keyless case (Ollama)
                Ok(secrets.get(kind.secret_key()).map(AuthData::from_single))
            })
        },
    );

    let target_resolver = ServiceTargetResolver::from_resolver_fn(
        move |target: ServiceTarget| -> Result<ServiceTarget, genai::resolver::Error> {
            let (Some(base), Some(adapter_kind)) = (api_base.as_ref(), kind.adapter_kind()) else {
                return Ok(target);
            };

            let ServiceTarget { model, auth, .. } = target;
            Ok(ServiceTarget {
                endpoint: Endpoint::from_owned(base.clone()),
                auth,
                model: ModelIden::new(adapter_kind, model.model_name.clone()),
            })
        },
    );

    Client::builder()
        .with_auth_resolver(auth_resolver)
        .with_service_target_resolver(target_resolver)
        .build()
}
