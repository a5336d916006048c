//! Tracing-based observability hooks for provider calls and conversation events.
//!
//! ```rust
//! use cobserve::TracingObservabilityHooks;
//! use cchat::ChatRuntimeHooks;
//!
//! fn accepts_chat_hooks(_hooks: &dyn ChatRuntimeHooks) {}
//!
//! let hooks = TracingObservabilityHooks;
//! accepts_chat_hooks(&hooks);
//! ```

use std::time::Duration;

use cchat::ChatRuntimeHooks;
use ccommon::ConversationId;
use cprovider::{ProviderError, ProviderId, ProviderOperationHooks, Role};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObservabilityHooks;

impl ProviderOperationHooks for TracingObservabilityHooks {
    fn on_request_start(&self, provider: ProviderId, operation: &str) {
        tracing::info!(
            phase = "provider",
            event = "request_start",
            provider = %provider,
            operation
        );
    }

    fn on_success(&self, provider: ProviderId, operation: &str, elapsed: Duration) {
        tracing::info!(
            phase = "provider",
            event = "success",
            provider = %provider,
            operation,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_failure(
        &self,
        provider: ProviderId,
        operation: &str,
        elapsed: Duration,
        error: &ProviderError,
    ) {
        tracing::error!(
            phase = "provider",
            event = "failure",
            provider = %provider,
            operation,
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = ?error.kind,
            error = %error
        );
    }
}

impl ChatRuntimeHooks for TracingObservabilityHooks {
    fn on_conversation_created(&self, conversation_id: &ConversationId, title: &str) {
        tracing::info!(
            phase = "chat",
            event = "conversation_created",
            conversation_id = %conversation_id,
            title
        );
    }

    fn on_conversation_switched(&self, conversation_id: &ConversationId) {
        tracing::info!(
            phase = "chat",
            event = "conversation_switched",
            conversation_id = %conversation_id
        );
    }

    fn on_message_appended(&self, conversation_id: &ConversationId, role: Role) {
        tracing::debug!(
            phase = "chat",
            event = "message_appended",
            conversation_id = %conversation_id,
            role = %role
        );
    }
}
