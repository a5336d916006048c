//! Cohere provider implementation over transport and shared models.

use std::sync::Arc;

use ccommon::RequestContext;

use crate::{
    ModelProvider, ModelRequest, ModelResponse, NoopOperationHooks, ProviderError, ProviderFuture,
    ProviderId, ProviderOperationHooks, SecretString, execute_with_context,
};

use super::transport::CohereTransport;
use super::types::{CohereHistoryEntry, CohereRequest};

/// How much of the supplied history reaches the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryPolicy {
    /// Transmit the last message only; earlier entries are dropped.
    #[default]
    LatestOnly,
    /// Forward earlier entries as `chat_history`.
    Full,
}

#[derive(Clone)]
pub struct CohereProvider {
    api_key: SecretString,
    transport: Arc<dyn CohereTransport>,
    model: Option<String>,
    history_policy: HistoryPolicy,
    hooks: Arc<dyn ProviderOperationHooks>,
}

impl CohereProvider {
    pub fn new(api_key: SecretString, transport: Arc<dyn CohereTransport>) -> Self {
        Self {
            api_key,
            transport,
            model: None,
            history_policy: HistoryPolicy::default(),
            hooks: Arc::new(NoopOperationHooks),
        }
    }

    /// Model used when a request leaves `model` empty.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        let model = model.into();
        self.model = (!model.trim().is_empty()).then_some(model);
        self
    }

    pub fn with_history_policy(mut self, history_policy: HistoryPolicy) -> Self {
        self.history_policy = history_policy;
        self
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ProviderOperationHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn history_policy(&self) -> HistoryPolicy {
        self.history_policy
    }

    pub(crate) fn build_cohere_request(&self, request: ModelRequest) -> CohereRequest {
        let model = if request.model.trim().is_empty() {
            self.model.clone()
        } else {
            Some(request.model)
        };

        let mut messages = request.messages;
        let message = messages
            .pop()
            .map(|latest| latest.content)
            .unwrap_or_default();

        let chat_history = match self.history_policy {
            HistoryPolicy::LatestOnly => Vec::new(),
            HistoryPolicy::Full => messages
                .into_iter()
                .map(CohereHistoryEntry::from)
                .collect(),
        };

        CohereRequest {
            model,
            message,
            chat_history,
            temperature: request.options.temperature,
        }
    }
}

impl std::fmt::Debug for CohereProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CohereProvider")
            .field("api_key", &self.api_key)
            .field("transport", &self.transport)
            .field("model", &self.model)
            .field("history_policy", &self.history_policy)
            .finish_non_exhaustive()
    }
}

impl ModelProvider for CohereProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Cohere
    }

    fn generate_response<'a>(
        &'a self,
        context: &'a RequestContext,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            if self.api_key.is_empty() {
                return Err(ProviderError::authentication("no Cohere API key configured"));
            }

            let cohere_request = self.build_cohere_request(request);
            let call = self.transport.chat(cohere_request, self.api_key.clone());
            let response =
                execute_with_context(self.id(), "chat", context, self.hooks.as_ref(), call)
                    .await?;

            Ok(response.into_model_response())
        })
    }
}
