use std::error::Error;

use crate::error::ErrorKind;
use crate::request::ModelRequest;
use crate::response::ModelResponse;

/// The error type for a model provider.
pub trait ModelProviderError: Error + Send + Sync + 'static {
    /// Returns the kind of this error.
    fn kind(&self) -> ErrorKind;
}

/// A type that represents a model provider, which performs one round-trip
/// with the hosted model per request.
///
/// Once the provider is created, it should behave like a stateless object.
/// Callers may share it between concurrent requests and should not rely on
/// any ordering between them.
pub trait ModelProvider: Send + Sync {
    /// The error type that may be returned by the provider.
    type Error: ModelProviderError;

    /// Checks that the provider is usable before any request is made.
    ///
    /// Providers that need a credential should return an error with
    /// [`ErrorKind::MissingCredential`] here, so that callers can skip the
    /// network entirely.
    fn validate(&self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Sends a request to the model and waits for the complete response.
    ///
    /// Implementations must not retry on their own.
    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelResponse, Self::Error>> + Send + 'static;
}
