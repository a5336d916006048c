//! Metrics-based observability hooks for provider calls and conversation events.
//!
//! ```rust
//! use cobserve::MetricsObservabilityHooks;
//! use cprovider::ProviderOperationHooks;
//!
//! fn accepts_provider_hooks(_hooks: &dyn ProviderOperationHooks) {}
//!
//! let hooks = MetricsObservabilityHooks;
//! accepts_provider_hooks(&hooks);
//! ```

use std::time::Duration;

use cchat::ChatRuntimeHooks;
use ccommon::ConversationId;
use cprovider::{ProviderError, ProviderId, ProviderOperationHooks, Role};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObservabilityHooks;

impl ProviderOperationHooks for MetricsObservabilityHooks {
    fn on_request_start(&self, provider: ProviderId, operation: &str) {
        metrics::counter!(
            "commandr_provider_request_start_total",
            "provider" => provider.to_string(),
            "operation" => operation.to_string()
        )
        .increment(1);
    }

    fn on_success(&self, provider: ProviderId, operation: &str, elapsed: Duration) {
        metrics::counter!(
            "commandr_provider_success_total",
            "provider" => provider.to_string(),
            "operation" => operation.to_string()
        )
        .increment(1);
        metrics::histogram!(
            "commandr_provider_request_duration_seconds",
            "provider" => provider.to_string(),
            "operation" => operation.to_string(),
            "status" => "success"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_failure(
        &self,
        provider: ProviderId,
        operation: &str,
        elapsed: Duration,
        error: &ProviderError,
    ) {
        metrics::counter!(
            "commandr_provider_failure_total",
            "provider" => provider.to_string(),
            "operation" => operation.to_string(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "commandr_provider_request_duration_seconds",
            "provider" => provider.to_string(),
            "operation" => operation.to_string(),
            "status" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }
}

impl ChatRuntimeHooks for MetricsObservabilityHooks {
    fn on_conversation_created(&self, _conversation_id: &ConversationId, _title: &str) {
        metrics::counter!("commandr_chat_conversation_created_total").increment(1);
    }

    fn on_conversation_switched(&self, _conversation_id: &ConversationId) {
        metrics::counter!("commandr_chat_conversation_switched_total").increment(1);
    }

    fn on_message_appended(&self, _conversation_id: &ConversationId, role: Role) {
        metrics::counter!(
            "commandr_chat_message_appended_total",
            "role" => role.to_string()
        )
        .increment(1);
    }
}
