use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use cchat::ChatRuntimeHooks;
use ccommon::ConversationId;
use cprovider::{ProviderError, ProviderId, ProviderOperationHooks, Role};

pub struct SafeProviderHooks<H> {
    inner: H,
}

impl<H> SafeProviderHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> ProviderOperationHooks for SafeProviderHooks<H>
where
    H: ProviderOperationHooks,
{
    fn on_request_start(&self, provider: ProviderId, operation: &str) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_request_start(provider, operation)
        }));
    }

    fn on_success(&self, provider: ProviderId, operation: &str, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_success(provider, operation, elapsed)
        }));
    }

    fn on_failure(
        &self,
        provider: ProviderId,
        operation: &str,
        elapsed: Duration,
        error: &ProviderError,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_failure(provider, operation, elapsed, error)
        }));
    }
}

pub struct SafeChatHooks<H> {
    inner: H,
}

impl<H> SafeChatHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> ChatRuntimeHooks for SafeChatHooks<H>
where
    H: ChatRuntimeHooks,
{
    fn on_conversation_created(&self, conversation_id: &ConversationId, title: &str) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_conversation_created(conversation_id, title)
        }));
    }

    fn on_conversation_switched(&self, conversation_id: &ConversationId) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_conversation_switched(conversation_id)
        }));
    }

    fn on_message_appended(&self, conversation_id: &ConversationId, role: Role) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_message_appended(conversation_id, role)
        }));
    }
}

/// Fans every callback out to both hook sets, in order.
pub struct CombinedHooks<A, B> {
    first: A,
    second: B,
}

impl<A, B> CombinedHooks<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A, B> ProviderOperationHooks for CombinedHooks<A, B>
where
    A: ProviderOperationHooks,
    B: ProviderOperationHooks,
{
    fn on_request_start(&self, provider: ProviderId, operation: &str) {
        self.first.on_request_start(provider, operation);
        self.second.on_request_start(provider, operation);
    }

    fn on_success(&self, provider: ProviderId, operation: &str, elapsed: Duration) {
        self.first.on_success(provider, operation, elapsed);
        self.second.on_success(provider, operation, elapsed);
    }

    fn on_failure(
        &self,
        provider: ProviderId,
        operation: &str,
        elapsed: Duration,
        error: &ProviderError,
    ) {
        self.first.on_failure(provider, operation, elapsed, error);
        self.second.on_failure(provider, operation, elapsed, error);
    }
}

impl<A, B> ChatRuntimeHooks for CombinedHooks<A, B>
where
    A: ChatRuntimeHooks,
    B: ChatRuntimeHooks,
{
    fn on_conversation_created(&self, conversation_id: &ConversationId, title: &str) {
        self.first.on_conversation_created(conversation_id, title);
        self.second.on_conversation_created(conversation_id, title);
    }

    fn on_conversation_switched(&self, conversation_id: &ConversationId) {
        self.first.on_conversation_switched(conversation_id);
        self.second.on_conversation_switched(conversation_id);
    }

    fn on_message_appended(&self, conversation_id: &ConversationId, role: Role) {
        self.first.on_message_appended(conversation_id, role);
        self.second.on_message_appended(conversation_id, role);
    }
}
