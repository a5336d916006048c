//! Single-attempt execution with cancellation and operational hook contracts.
//!
//! Calls are never retried: the first outcome, success or failure, is final.

use std::future::Future;
use std::time::{Duration, Instant};

use ccommon::RequestContext;

use crate::{ProviderError, ProviderId};

pub trait ProviderOperationHooks: Send + Sync {
    fn on_request_start(&self, _provider: ProviderId, _operation: &str) {}

    fn on_success(&self, _provider: ProviderId, _operation: &str, _elapsed: Duration) {}

    fn on_failure(
        &self,
        _provider: ProviderId,
        _operation: &str,
        _elapsed: Duration,
        _error: &ProviderError,
    ) {
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopOperationHooks;

impl ProviderOperationHooks for NoopOperationHooks {}

/// Runs `operation` once under `context`, reporting the outcome to `hooks`.
///
/// Cancellation maps to [`crate::ProviderErrorKind::Cancelled`] and an exceeded
/// deadline to [`crate::ProviderErrorKind::Timeout`].
pub async fn execute_with_context<T, Op>(
    provider: ProviderId,
    operation: &str,
    context: &RequestContext,
    hooks: &dyn ProviderOperationHooks,
    future: Op,
) -> Result<T, ProviderError>
where
    Op: Future<Output = Result<T, ProviderError>>,
{
    hooks.on_request_start(provider, operation);
    let started = Instant::now();

    let result = match context.run(future).await {
        Ok(result) => result,
        Err(interrupted) => Err(ProviderError::from(interrupted)),
    };

    let elapsed = started.elapsed();
    match &result {
        Ok(_) => hooks.on_success(provider, operation, elapsed),
        Err(error) => hooks.on_failure(provider, operation, elapsed, error),
    }

    result
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use ccommon::CancellationToken;

    use super::*;
    use crate::ProviderErrorKind;

    #[derive(Default)]
    struct RecordingHooks {
        events: Mutex<Vec<String>>,
    }

    impl ProviderOperationHooks for RecordingHooks {
        fn on_request_start(&self, provider: ProviderId, operation: &str) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("start:{provider}:{operation}"));
        }

        fn on_success(&self, _provider: ProviderId, operation: &str, _elapsed: Duration) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("success:{operation}"));
        }

        fn on_failure(
            &self,
            _provider: ProviderId,
            operation: &str,
            _elapsed: Duration,
            error: &ProviderError,
        ) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("failure:{operation}:{:?}", error.kind));
        }
    }

    #[tokio::test]
    async fn success_reports_start_and_success_once() {
        let hooks = RecordingHooks::default();
        let context = RequestContext::new();

        let value = execute_with_context(ProviderId::Cohere, "chat", &context, &hooks, async {
            Ok::<_, ProviderError>(7)
        })
        .await
        .expect("operation should succeed");

        assert_eq!(value, 7);
        let events = hooks.events.lock().expect("events lock");
        assert_eq!(*events, vec!["start:cohere:chat", "success:chat"]);
    }

    #[tokio::test]
    async fn failure_is_returned_unchanged_without_retry() {
        let hooks = RecordingHooks::default();
        let context = RequestContext::new();
        let attempts = Mutex::new(0_u32);

        let error = execute_with_context(ProviderId::Cohere, "chat", &context, &hooks, async {
            *attempts.lock().expect("attempts lock") += 1;
            Err::<(), _>(ProviderError::rate_limited("slow down"))
        })
        .await
        .expect_err("operation should fail");

        assert_eq!(error, ProviderError::rate_limited("slow down"));
        assert_eq!(*attempts.lock().expect("attempts lock"), 1);
        let events = hooks.events.lock().expect("events lock");
        assert_eq!(events.len(), 2);
        assert_eq!(events[1], "failure:chat:RateLimited");
    }

    #[tokio::test]
    async fn cancelled_context_maps_to_cancelled_error() {
        let token = CancellationToken::new();
        token.cancel();
        let context = RequestContext::new().with_cancellation(token);

        let error = execute_with_context(
            ProviderId::Cohere,
            "chat",
            &context,
            &NoopOperationHooks,
            std::future::pending::<Result<(), ProviderError>>(),
        )
        .await
        .expect_err("cancelled call should fail");

        assert_eq!(error.kind, ProviderErrorKind::Cancelled);
    }

    #[tokio::test]
    async fn exceeded_deadline_maps_to_timeout_error() {
        let context = RequestContext::new().with_timeout(Duration::from_millis(10));

        let error = execute_with_context(
            ProviderId::Cohere,
            "chat",
            &context,
            &NoopOperationHooks,
            std::future::pending::<Result<(), ProviderError>>(),
        )
        .await
        .expect_err("call past deadline should fail");

        assert_eq!(error.kind, ProviderErrorKind::Timeout);
    }
}
