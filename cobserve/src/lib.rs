//! Observability hooks and logging setup for provider calls and conversations.
//!
//! ```rust
//! use cobserve::{
//!     CombinedHooks, MetricsObservabilityHooks, SafeChatHooks, SafeProviderHooks,
//!     TracingObservabilityHooks,
//! };
//!
//! let _provider_hooks = SafeProviderHooks::new(CombinedHooks::new(
//!     TracingObservabilityHooks,
//!     MetricsObservabilityHooks,
//! ));
//! let _chat_hooks = SafeChatHooks::new(TracingObservabilityHooks);
//! ```

mod logging;
mod metrics_hooks;
mod safe_hooks;
mod tracing_hooks;

pub use logging::{DEFAULT_LOG_FILTER, LoggingConfig, LoggingGuard, ObserveError, ObserveErrorKind};
pub use metrics_hooks::MetricsObservabilityHooks;
pub use safe_hooks::{CombinedHooks, SafeChatHooks, SafeProviderHooks};
pub use tracing_hooks::TracingObservabilityHooks;

pub mod prelude {
    pub use crate::{
        CombinedHooks, LoggingConfig, LoggingGuard, MetricsObservabilityHooks, ObserveError,
        SafeChatHooks, SafeProviderHooks, TracingObservabilityHooks,
    };
}
