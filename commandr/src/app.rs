//! The application surface the shell talks to.

use std::time::Duration;

use cchat::{ChatService, Conversation, ConversationSummary};
use ccommon::{CancellationToken, ConversationId, DEFAULT_TEMPERATURE, RequestContext};
use cprovider::ProviderError;
use serde::Serialize;

/// Reply handed back to the shell for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatResponse {
    pub content: String,
}

#[derive(Clone)]
pub struct App {
    chat: ChatService,
    shutdown: CancellationToken,
    request_timeout: Option<Duration>,
    default_temperature: f64,
}

impl App {
    pub fn new(chat: ChatService) -> Self {
        Self {
            chat,
            shutdown: CancellationToken::new(),
            request_timeout: None,
            default_temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Uses `token` as the shutdown signal instead of a private one.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn with_default_temperature(mut self, temperature: f64) -> Self {
        self.default_temperature = temperature;
        self
    }

    pub fn chat(&self) -> &ChatService {
        &self.chat
    }

    pub fn default_temperature(&self) -> f64 {
        self.default_temperature
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.shutdown
    }

    /// Forwards `text` to the provider and records the exchange once a reply arrives.
    ///
    /// Nothing is recorded when the provider fails, and its error is returned as is.
    pub async fn send_message(
        &self,
        text: &str,
        temperature: f64,
    ) -> Result<ChatResponse, ProviderError> {
        let context = self.request_context();
        let content = self
            .chat
            .generate_response(&context, text, temperature)
            .await?;

        self.chat.record_exchange(text, &content);
        Ok(ChatResponse { content })
    }

    pub async fn send_message_with_default_temperature(
        &self,
        text: &str,
    ) -> Result<ChatResponse, ProviderError> {
        self.send_message(text, self.default_temperature).await
    }

    pub fn clear_chat(&self) -> Conversation {
        self.chat.clear_chat()
    }

    pub fn current_conversation(&self) -> Option<Conversation> {
        self.chat.current_conversation()
    }

    pub fn conversations(&self) -> Vec<ConversationSummary> {
        self.chat.conversations()
    }

    pub fn switch_conversation(&self, id: &ConversationId) -> Option<Conversation> {
        self.chat.switch_conversation(id)
    }

    /// Cancels every in-flight and future send.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    fn request_context(&self) -> RequestContext {
        let context = RequestContext::new().with_cancellation(self.shutdown.clone());
        match self.request_timeout {
            Some(timeout) => context.with_timeout(timeout),
            None => context,
        }
    }
}
