//! Chat service: conversation bookkeeping plus single-turn generation.

use std::sync::Arc;

use ccommon::{ConversationId, RequestContext};
use cprovider::{ModelProvider, ModelRequest, PromptMessage, ProviderError, Role};

use crate::{
    ChatError, ChatRuntimeHooks, Conversation, ConversationStore, ConversationSummary,
    DEFAULT_CONVERSATION_TITLE, InMemoryConversationStore, Message, MessageDraft, NoopChatHooks,
    Transcript,
};

#[derive(Clone)]
pub struct ChatService {
    provider: Arc<dyn ModelProvider>,
    store: Arc<dyn ConversationStore>,
    hooks: Arc<dyn ChatRuntimeHooks>,
    model: Option<String>,
}

impl ChatService {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self::builder(provider).build()
    }

    pub fn builder(provider: Arc<dyn ModelProvider>) -> ChatServiceBuilder {
        ChatServiceBuilder::new(provider)
    }

    pub fn store(&self) -> &Arc<dyn ConversationStore> {
        &self.store
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn create_conversation(&self, title: &str) -> Conversation {
        let conversation = self.store.create_conversation(title);
        self.hooks
            .on_conversation_created(&conversation.id(), conversation.title());
        conversation
    }

    /// Starts a fresh "New Chat" conversation and makes it current.
    pub fn clear_chat(&self) -> Conversation {
        self.create_conversation(DEFAULT_CONVERSATION_TITLE)
    }

    pub fn current_conversation(&self) -> Option<Conversation> {
        self.store.current_conversation()
    }

    pub fn conversation(&self, id: &ConversationId) -> Option<Conversation> {
        self.store.conversation(id)
    }

    pub fn switch_conversation(&self, id: &ConversationId) -> Option<Conversation> {
        let conversation = self.store.switch_conversation(id)?;
        self.hooks.on_conversation_switched(id);
        Some(conversation)
    }

    pub fn conversations(&self) -> Vec<ConversationSummary> {
        self.store.conversations()
    }

    pub fn rename_conversation(&self, id: &ConversationId, title: &str) -> Result<(), ChatError> {
        self.store.rename_conversation(id, title)
    }

    pub fn append_message(
        &self,
        id: &ConversationId,
        role: Role,
        content: &str,
    ) -> Result<Message, ChatError> {
        let message = self.store.append_message(id, role, content)?;
        self.hooks.on_message_appended(id, message.role());
        Ok(message)
    }

    /// Stores a user turn and its reply together in the current conversation.
    pub fn record_exchange(&self, user_text: &str, reply_text: &str) -> Transcript {
        let transcript = self.store.append_to_current(
            vec![
                MessageDraft::new(Role::User, user_text),
                MessageDraft::new(Role::Assistant, reply_text),
            ],
            DEFAULT_CONVERSATION_TITLE,
        );

        if transcript.created {
            self.hooks
                .on_conversation_created(&transcript.conversation_id, DEFAULT_CONVERSATION_TITLE);
        }
        for message in &transcript.messages {
            self.hooks
                .on_message_appended(&transcript.conversation_id, message.role());
        }

        transcript
    }

    /// Sends `text` as a single user message and returns the reply text.
    ///
    /// The store is not consulted. `temperature` is forwarded as given and any
    /// provider error comes back untouched.
    pub async fn generate_response(
        &self,
        context: &RequestContext,
        text: &str,
        temperature: f64,
    ) -> Result<String, ProviderError> {
        let request = ModelRequest::builder(self.model.clone().unwrap_or_default())
            .message(PromptMessage::user(text))
            .temperature(temperature)
            .build()?;

        let response = self.provider.generate_response(context, request).await?;
        Ok(response.text)
    }
}

pub struct ChatServiceBuilder {
    provider: Arc<dyn ModelProvider>,
    store: Option<Arc<dyn ConversationStore>>,
    hooks: Arc<dyn ChatRuntimeHooks>,
    model: Option<String>,
}

impl ChatServiceBuilder {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self {
            provider,
            store: None,
            hooks: Arc::new(NoopChatHooks),
            model: None,
        }
    }

    pub fn store(mut self, store: Arc<dyn ConversationStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn hooks(mut self, hooks: Arc<dyn ChatRuntimeHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        let model = model.into();
        self.model = (!model.trim().is_empty()).then_some(model);
        self
    }

    pub fn build(self) -> ChatService {
        ChatService {
            provider: self.provider,
            store: self
                .store
                .unwrap_or_else(|| Arc::new(InMemoryConversationStore::new())),
            hooks: self.hooks,
            model: self.model,
        }
    }
}
