//! Common `cprovider` imports for downstream crates.

pub use crate::{
    ModelProvider, ModelRequest, ModelRequestBuilder, ModelResponse, NoopOperationHooks,
    PromptMessage, ProviderError, ProviderErrorKind, ProviderId, ProviderOperationHooks, Role,
    SecretString, StopReason, TokenUsage, execute_with_context,
};
pub use ccommon::{BoxFuture, CancellationToken, RequestContext};
