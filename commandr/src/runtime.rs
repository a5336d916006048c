//! Runtime wiring from an [`AppConfig`] to a ready [`App`].

use std::sync::Arc;

use cchat::{ChatRuntimeHooks, ChatService};
use cobserve::{
    CombinedHooks, MetricsObservabilityHooks, SafeChatHooks, SafeProviderHooks,
    TracingObservabilityHooks,
};
use cprovider::adapters::cohere::{CohereHttpTransport, CohereProvider};
use cprovider::{ModelProvider, ProviderError, ProviderOperationHooks};
use reqwest::Client;

use crate::{App, AppConfig};

/// Tracing plus metrics, shielded from panics.
pub fn default_provider_hooks() -> Arc<dyn ProviderOperationHooks> {
    Arc::new(SafeProviderHooks::new(CombinedHooks::new(
        TracingObservabilityHooks,
        MetricsObservabilityHooks,
    )))
}

pub fn default_chat_hooks() -> Arc<dyn ChatRuntimeHooks> {
    Arc::new(SafeChatHooks::new(CombinedHooks::new(
        TracingObservabilityHooks,
        MetricsObservabilityHooks,
    )))
}

pub fn build_provider(
    config: &AppConfig,
    hooks: Arc<dyn ProviderOperationHooks>,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    if config.api_key.is_empty() {
        return Err(ProviderError::authentication(
            "provider API key must not be empty",
        ));
    }

    let http = Client::builder()
        .timeout(config.request_timeout)
        .build()
        .map_err(|err| ProviderError::transport(err.to_string()))?;

    let mut transport = CohereHttpTransport::new(http);
    if let Some(base_url) = &config.base_url {
        transport = transport.with_base_url(base_url.clone());
    }

    let mut provider = CohereProvider::new(config.api_key.clone(), Arc::new(transport))
        .with_history_policy(config.history_policy)
        .with_hooks(hooks);
    if let Some(model) = &config.model {
        provider = provider.with_model(model.clone());
    }

    Ok(Arc::new(provider))
}

/// Wires `provider` behind a fresh in-memory store with the config's defaults.
pub fn build_app_with_provider(
    config: &AppConfig,
    provider: Arc<dyn ModelProvider>,
    chat_hooks: Arc<dyn ChatRuntimeHooks>,
) -> App {
    let chat = ChatService::builder(provider).hooks(chat_hooks).build();

    App::new(chat)
        .with_request_timeout(config.request_timeout)
        .with_default_temperature(config.default_temperature)
}

pub fn build_app(config: &AppConfig) -> Result<App, ProviderError> {
    let provider = build_provider(config, default_provider_hooks())?;
    Ok(build_app_with_provider(
        config,
        provider,
        default_chat_hooks(),
    ))
}
