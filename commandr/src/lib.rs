//! Unified facade over the commandr workspace crates.
//!
//! Most applications depend on this crate only. It re-exports the member
//! crates and adds the [`App`] surface, environment configuration and runtime
//! wiring used by the terminal binary.
//!
//! ```rust
//! use commandr::{AppConfig, runtime};
//!
//! let app = runtime::build_app(&AppConfig::new("co-key")).expect("app should build");
//! let conversation = app.clear_chat();
//! assert_eq!(conversation.title(), "New Chat");
//! ```

mod app;
mod config;

pub mod input;
pub mod prelude;
pub mod runtime;

pub use cchat;
pub use ccommon;
pub use cobserve;
pub use cprovider;

pub use app::{App, ChatResponse};
pub use cchat::{
    ChatError, ChatErrorKind, ChatRuntimeHooks, ChatService, ChatServiceBuilder, Conversation,
    ConversationStore, ConversationSummary, DEFAULT_CONVERSATION_TITLE,
    InMemoryConversationStore, Message, NoopChatHooks,
};
pub use ccommon::{
    CancellationToken, ConversationId, DEFAULT_TEMPERATURE, MessageId, RequestContext,
};
pub use cobserve::{LoggingConfig, LoggingGuard, ObserveError};
pub use config::{
    API_KEY_VAR, AppConfig, BASE_URL_VAR, CHAT_HISTORY_VAR, ConfigError, DEFAULT_REQUEST_TIMEOUT,
    LOG_VAR, MODEL_VAR, REQUEST_TIMEOUT_VAR, TEMPERATURE_VAR,
};
pub use cprovider::adapters::cohere::{CohereProvider, HistoryPolicy};
pub use cprovider::{
    ModelProvider, ModelRequest, ModelResponse, NoopOperationHooks, PromptMessage, ProviderError,
    ProviderErrorKind, ProviderFuture, ProviderId, ProviderOperationHooks, Role, SecretString,
    StopReason, TokenUsage,
};
pub use runtime::{build_app, build_app_with_provider, build_provider};
