//! Shared utilities and strongly-typed common values for workspace crates.
//!
//! ```rust
//! use ccommon::{ConversationId, GenerationOptions, MessageId, RequestContext};
//!
//! let conversation = ConversationId::new();
//! let message = MessageId::new();
//! let options = GenerationOptions::default().with_temperature(0.7);
//! let context = RequestContext::new();
//!
//! assert_ne!(conversation.to_string(), message.to_string());
//! assert_eq!(options.temperature, Some(0.7));
//! assert!(!context.is_cancelled());
//! ```

pub mod future {
    //! Shared async future aliases.
    //!
    //! ```rust
    //! use ccommon::BoxFuture;
    //!
    //! fn str_len<'a>(value: &'a str) -> BoxFuture<'a, usize> {
    //!     Box::pin(async move { value.len() })
    //! }
    //!
    //! let _future = str_len("hello");
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod ids {
    //! Process-unique identifier newtypes for conversations and messages.
    //!
    //! ```rust
    //! use ccommon::ConversationId;
    //!
    //! let id = ConversationId::new();
    //! let parsed = ConversationId::parse(&id.to_string()).expect("round trip");
    //! assert_eq!(id, parsed);
    //! ```

    use std::fmt::{Display, Formatter};

    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    macro_rules! uuid_id {
        ($name:ident) => {
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
            #[serde(transparent)]
            pub struct $name(Uuid);

            impl $name {
                /// Generates a fresh random (v4) identifier.
                pub fn new() -> Self {
                    Self(Uuid::new_v4())
                }

                pub fn parse(value: &str) -> Option<Self> {
                    Uuid::parse_str(value.trim()).ok().map(Self)
                }

                pub fn as_uuid(&self) -> &Uuid {
                    &self.0
                }
            }

            impl Default for $name {
                fn default() -> Self {
                    Self::new()
                }
            }

            impl Display for $name {
                fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                    Display::fmt(&self.0, f)
                }
            }

            impl From<Uuid> for $name {
                fn from(value: Uuid) -> Self {
                    Self(value)
                }
            }
        };
    }

    uuid_id!(ConversationId);
    uuid_id!(MessageId);
}

pub mod model {
    //! Shared generation settings used by request types.
    //!
    //! ```rust
    //! use ccommon::GenerationOptions;
    //!
    //! let options = GenerationOptions::default().with_temperature(1.5);
    //!
    //! // Out-of-range values are kept as-is; the provider decides.
    //! assert_eq!(options.temperature, Some(1.5));
    //! ```

    pub const DEFAULT_TEMPERATURE: f64 = 0.7;

    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct GenerationOptions {
        pub temperature: Option<f64>,
    }

    impl GenerationOptions {
        pub fn with_temperature(mut self, temperature: f64) -> Self {
            self.temperature = Some(temperature);
            self
        }
    }
}

pub mod context {
    //! Cancellation and deadline signals carried by outbound calls.
    //!
    //! ```rust
    //! use std::time::Duration;
    //!
    //! use ccommon::{CancellationToken, RequestContext};
    //!
    //! let token = CancellationToken::new();
    //! let context = RequestContext::new()
    //!     .with_cancellation(token.clone())
    //!     .with_timeout(Duration::from_secs(30));
    //!
    //! assert!(context.deadline().is_some());
    //! token.cancel();
    //! assert!(context.is_cancelled());
    //! ```

    use std::fmt::{Display, Formatter};
    use std::future::Future;
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::sync::watch;
    use tokio::time::Instant;

    /// Clonable cancellation flag; every clone observes the same state.
    #[derive(Debug, Clone)]
    pub struct CancellationToken {
        state: Arc<watch::Sender<bool>>,
    }

    impl CancellationToken {
        pub fn new() -> Self {
            Self {
                state: Arc::new(watch::Sender::new(false)),
            }
        }

        pub fn cancel(&self) {
            self.state.send_replace(true);
        }

        pub fn is_cancelled(&self) -> bool {
            *self.state.borrow()
        }

        /// Resolves once [`CancellationToken::cancel`] has been called on any clone.
        pub async fn cancelled(&self) {
            let mut receiver = self.state.subscribe();
            // The sender lives in `self`, so the channel cannot close while waiting.
            let _ = receiver.wait_for(|cancelled| *cancelled).await;
        }
    }

    impl Default for CancellationToken {
        fn default() -> Self {
            Self::new()
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Interrupted {
        Cancelled,
        DeadlineExceeded,
    }

    impl Display for Interrupted {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            match self {
                Self::Cancelled => f.write_str("request was cancelled"),
                Self::DeadlineExceeded => f.write_str("request deadline exceeded"),
            }
        }
    }

    impl std::error::Error for Interrupted {}

    #[derive(Debug, Clone, Default)]
    pub struct RequestContext {
        cancellation: CancellationToken,
        deadline: Option<Instant>,
    }

    impl RequestContext {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
            self.cancellation = cancellation;
            self
        }

        pub fn with_deadline(mut self, deadline: Instant) -> Self {
            self.deadline = Some(deadline);
            self
        }

        /// Sets the deadline relative to now, keeping an earlier existing deadline.
        pub fn with_timeout(self, timeout: Duration) -> Self {
            let candidate = Instant::now() + timeout;
            match self.deadline {
                Some(existing) if existing <= candidate => self,
                _ => self.with_deadline(candidate),
            }
        }

        pub fn cancellation(&self) -> &CancellationToken {
            &self.cancellation
        }

        pub fn deadline(&self) -> Option<Instant> {
            self.deadline
        }

        pub fn is_cancelled(&self) -> bool {
            self.cancellation.is_cancelled()
        }

        /// Drives `future` until it completes, the token fires, or the deadline passes.
        ///
        /// Cancellation wins over the deadline, and both win over a future that is
        /// ready on the same poll. The future is dropped when interrupted.
        pub async fn run<F>(&self, future: F) -> Result<F::Output, Interrupted>
        where
            F: Future,
        {
            let deadline = async {
                match self.deadline {
                    Some(deadline) => tokio::time::sleep_until(deadline).await,
                    None => std::future::pending::<()>().await,
                }
            };

            tokio::select! {
                biased;
                _ = self.cancellation.cancelled() => Err(Interrupted::Cancelled),
                _ = deadline => Err(Interrupted::DeadlineExceeded),
                output = future => Ok(output),
            }
        }
    }
}

pub use context::{CancellationToken, Interrupted, RequestContext};
pub use future::BoxFuture;
pub use ids::{ConversationId, MessageId};
pub use model::{DEFAULT_TEMPERATURE, GenerationOptions};

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::time::Duration;

    use super::{
        CancellationToken, ConversationId, GenerationOptions, Interrupted, MessageId,
        RequestContext,
    };

    #[test]
    fn id_newtypes_parse_their_display_form() {
        let conversation = ConversationId::new();
        let message = MessageId::new();

        assert_eq!(
            ConversationId::parse(&conversation.to_string()),
            Some(conversation)
        );
        assert_eq!(MessageId::parse(&message.to_string()), Some(message));
        assert_eq!(ConversationId::parse("not-a-uuid"), None);
    }

    #[test]
    fn ids_stay_unique_across_many_creations() {
        let ids = (0..10_000).map(|_| MessageId::new()).collect::<HashSet<_>>();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn generation_options_keep_temperature_unvalidated() {
        let options = GenerationOptions::default().with_temperature(3.5);
        assert_eq!(options.temperature, Some(3.5));
        assert_eq!(GenerationOptions::default().temperature, None);
    }

    #[test]
    fn cancellation_is_shared_between_clones() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());

        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn with_timeout_never_extends_an_earlier_deadline() {
        let context = RequestContext::new().with_timeout(Duration::from_millis(10));
        let first = context.deadline().expect("deadline set");

        let context = context.with_timeout(Duration::from_secs(60));
        assert_eq!(context.deadline(), Some(first));
    }

    #[tokio::test]
    async fn run_returns_output_when_not_interrupted() {
        let context = RequestContext::new().with_timeout(Duration::from_secs(5));
        let output = context.run(async { 42 }).await;
        assert_eq!(output, Ok(42));
    }

    #[tokio::test]
    async fn run_reports_cancellation_for_pending_future() {
        let token = CancellationToken::new();
        let context = RequestContext::new().with_cancellation(token.clone());

        let handle = tokio::spawn(async move {
            context
                .run(std::future::pending::<()>())
                .await
                .expect_err("pending future must be interrupted")
        });

        tokio::time::sleep(Duration::from_millis(10)).await;
        token.cancel();

        let interrupted = tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .expect("cancellation should be prompt")
            .expect("task should not panic");
        assert_eq!(interrupted, Interrupted::Cancelled);
    }

    #[tokio::test]
    async fn run_reports_exceeded_deadline() {
        let context = RequestContext::new().with_timeout(Duration::from_millis(20));
        let result = context.run(std::future::pending::<()>()).await;
        assert_eq!(result, Err(Interrupted::DeadlineExceeded));
    }

    #[tokio::test]
    async fn already_cancelled_context_wins_over_ready_future() {
        let token = CancellationToken::new();
        token.cancel();
        let context = RequestContext::new().with_cancellation(token);

        let result = context.run(async { "ready" }).await;
        assert_eq!(result, Err(Interrupted::Cancelled));
    }
}
