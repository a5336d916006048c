//! Provider client: request/response models, the provider contract, and adapters.
//!
//! ```rust
//! use cprovider::{ModelRequest, PromptMessage, ProviderId};
//!
//! let request = ModelRequest::new("", vec![PromptMessage::user("hello")]).with_temperature(0.7);
//! assert_eq!(request.latest_message().map(|m| m.content.as_str()), Some("hello"));
//! assert_eq!(ProviderId::Cohere.to_string(), "cohere");
//! ```

pub mod adapters;
mod credentials;
mod error;
mod execution;
mod model;
mod provider;

pub mod prelude;

pub use credentials::SecretString;
pub use error::{ProviderError, ProviderErrorKind};
pub use execution::{NoopOperationHooks, ProviderOperationHooks, execute_with_context};
pub use model::{
    ModelRequest, ModelRequestBuilder, ModelResponse, PromptMessage, ProviderId, Role, StopReason,
    TokenUsage,
};
pub use provider::{ModelProvider, ProviderFuture};
pub use ccommon::{BoxFuture, CancellationToken, GenerationOptions, RequestContext};
