//! Common imports for commandr applications.

pub use crate::{
    App, AppConfig, ChatResponse, ChatService, ConfigError, Conversation, ConversationId,
    ConversationSummary, HistoryPolicy, LoggingConfig, Message, ModelProvider, ProviderError,
    ProviderErrorKind, RequestContext, Role, build_app, build_app_with_provider, build_provider,
};
