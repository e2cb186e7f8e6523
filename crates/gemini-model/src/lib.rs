//! A model provider for the Google Gemini `generateContent` API.

#[macro_use]
extern crate tracing;

mod config;
mod proto;
mod response;
pub mod schema;

use std::sync::Arc;

use mime::Mime;
use reqwest::{Client, Response, header};
use shopchat_model::{
    ErrorKind, ModelProvider, ModelProviderError, ModelRequest, ModelResponse,
};

pub use config::{GeminiConfig, GeminiConfigBuilder};
use proto::GenerateContentRequest;

/// The message reported when no API key is configured.
pub const MISSING_API_KEY_MESSAGE: &str = "GEMINI_API_KEY is not set. \
    Set the GEMINI_API_KEY environment variable on the host.";

/// Error type for [`GeminiProvider`].
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl ModelProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// Gemini model provider.
#[derive(Clone, Debug)]
pub struct GeminiProvider {
    client: Client,
    config: Arc<GeminiConfig>,
}

impl GeminiProvider {
    /// Creates a new `GeminiProvider` with the given configuration.
    #[inline]
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }

    /// Posts an already built request body and returns the raw response
    /// body.
    ///
    /// Network failures, timeouts and non-successful statuses are errors
    /// of kind [`ErrorKind::Transport`]. Nothing is retried.
    pub(crate) fn send_raw(
        &self,
        body: &GenerateContentRequest,
    ) -> impl Future<Output = Result<String, Error>> + Send + 'static + use<> {
        trace!(
            "request body: {}",
            serde_json::to_string(body).unwrap_or_default()
        );
        let resp_fut = self
            .client
            .post(self.config.endpoint_url())
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .timeout(self.config.timeout)
            .json(body)
            .send();

        async move {
            let resp = match resp_fut.await.and_then(Response::error_for_status)
            {
                Ok(resp) => resp,
                Err(err) => {
                    // The URL carries the key, never print it.
                    let err = err.without_url();
                    error!("request failed: {err}");
                    return Err(Error::new(
                        format!("{err}"),
                        ErrorKind::Transport,
                    ));
                }
            };

            let content_type = resp
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(ToOwned::to_owned);
            if let Some(content_type) = content_type {
                let is_json = content_type
                    .parse()
                    .map(|m: Mime| m.subtype() == mime::JSON)
                    .unwrap_or(false);
                if !is_json {
                    return Err(Error::new(
                        format!("Unexpected content type: {content_type}"),
                        ErrorKind::MalformedResponse,
                    ));
                }
            }

            let body = resp.text().await.map_err(|err| {
                Error::new(format!("{}", err.without_url()), ErrorKind::Transport)
            })?;
            trace!("response body: {body}");
            Ok(body)
        }
    }
}

impl ModelProvider for GeminiProvider {
    type Error = Error;

    fn validate(&self) -> Result<(), Self::Error> {
        if !self.config.has_api_key() {
            return Err(Error::new(
                MISSING_API_KEY_MESSAGE,
                ErrorKind::MissingCredential,
            ));
        }
        Ok(())
    }

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelResponse, Self::Error>> + Send + 'static
    {
        let gemini_req = proto::create_request(req);
        let body_fut = self.send_raw(&gemini_req);
        async move {
            let body = body_fut.await?;
            response::parse_response(&body)
        }
    }
}
