//! Conversation store and chat service for the commandr client.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use cchat::{ChatService, ConversationStore, InMemoryConversationStore};
//! # use cchat::{ModelProvider, ModelRequest, ModelResponse, ProviderError, ProviderFuture, ProviderId, RequestContext};
//! # struct Offline;
//! # impl ModelProvider for Offline {
//! #     fn id(&self) -> ProviderId { ProviderId::Cohere }
//! #     fn generate_response<'a>(&'a self, _c: &'a RequestContext, _r: ModelRequest)
//! #         -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
//! #         Box::pin(async { Err(ProviderError::unavailable("offline")) })
//! #     }
//! # }
//!
//! let store = Arc::new(InMemoryConversationStore::new());
//! let chat = ChatService::builder(Arc::new(Offline)).store(store.clone()).build();
//!
//! let conversation = chat.clear_chat();
//! chat.record_exchange("hi", "hello!");
//!
//! let current = store.current_conversation().expect("current conversation");
//! assert_eq!(current.id(), conversation.id());
//! assert_eq!(current.messages().len(), 2);
//! ```

mod error;
mod hooks;
mod service;
mod store;
mod types;

pub mod prelude {
    pub use crate::{
        ChatError, ChatErrorKind, ChatRuntimeHooks, ChatService, ChatServiceBuilder,
        Conversation, ConversationStore, ConversationSummary, InMemoryConversationStore, Message,
        NoopChatHooks,
    };
    pub use ccommon::{ConversationId, MessageId, RequestContext};
    pub use cprovider::Role;
}

pub use error::{ChatError, ChatErrorKind};
pub use hooks::{ChatRuntimeHooks, NoopChatHooks};
pub use service::{ChatService, ChatServiceBuilder};
pub use store::{ConversationStore, InMemoryConversationStore};
pub use types::{
    Conversation, ConversationSummary, DEFAULT_CONVERSATION_TITLE, Message, MessageDraft,
    Transcript,
};
pub use ccommon::{ConversationId, MessageId, RequestContext};
pub use cprovider::{
    ModelProvider, ModelRequest, ModelResponse, ProviderError, ProviderFuture, ProviderId, Role,
};
