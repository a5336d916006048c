use ccommon::{BoxFuture, RequestContext};

use crate::{ModelRequest, ModelResponse, ProviderError, ProviderId};

pub type ProviderFuture<'a, T> = BoxFuture<'a, T>;

pub trait ModelProvider: Send + Sync {
    fn id(&self) -> ProviderId;

    /// Issues a single non-streaming chat call.
    ///
    /// Implementations must return promptly with a `Cancelled` or `Timeout` error
    /// once `context` is cancelled or its deadline passes.
    fn generate_response<'a>(
        &'a self,
        context: &'a RequestContext,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>>;
}
