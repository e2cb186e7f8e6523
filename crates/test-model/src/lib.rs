//! A local fake model for testing purpose.

mod preset;

use std::collections::VecDeque;
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use shopchat_model::{
    ErrorKind, ModelProvider, ModelProviderError, ModelRequest, ModelResponse,
};
use tokio::time::sleep;

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

impl ModelProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

#[derive(Default)]
struct Script {
    responses: VecDeque<PresetResponse>,
    requests: Vec<ModelRequest>,
}

/// A local fake model for testing purpose.
///
/// Before sending requests, you need to setup the script, which is how the
/// model should respond to each round-trip, in order. If the script runs
/// out of responses, a transport error is returned. Every request is
/// recorded, clones of the provider share the same script and records.
///
/// # Note
///
/// This type is not optimized for production use, there are heavy memory
/// copies involved. You should only use it for testing.
#[derive(Clone, Default)]
pub struct TestModelProvider {
    script: Arc<Mutex<Script>>,
    delay: Option<Duration>,
    missing_credential: Option<String>,
}

impl TestModelProvider {
    #[inline]
    pub fn add_response(&mut self, preset: PresetResponse) {
        self.script.lock().responses.push_back(preset);
    }

    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }

    /// Makes [`ModelProvider::validate`] fail as if no credential was set.
    #[inline]
    pub fn set_missing_credential<S: Into<String>>(&mut self, message: S) {
        self.missing_credential = Some(message.into());
    }

    /// Returns all requests received so far.
    #[inline]
    pub fn requests(&self) -> Vec<ModelRequest> {
        self.script.lock().requests.clone()
    }
}

impl Debug for TestModelProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let script = self.script.lock();
        f.debug_struct("TestModelProvider")
            .field("pending_responses", &script.responses.len())
            .field("received_requests", &script.requests.len())
            .finish_non_exhaustive()
    }
}

impl ModelProvider for TestModelProvider {
    type Error = crate::Error;

    fn validate(&self) -> Result<(), Self::Error> {
        match &self.missing_credential {
            Some(message) => Err(Error {
                message: message.clone(),
                kind: ErrorKind::MissingCredential,
            }),
            None => Ok(()),
        }
    }

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelResponse, Self::Error>> + Send + 'static
    {
        let preset = {
            let mut script = self.script.lock();
            script.requests.push(req.clone());
            script.responses.pop_front()
        };
        let delay = self.delay.unwrap_or(Duration::from_millis(1));

        async move {
            sleep(delay).await;
            let Some(preset) = preset else {
                return Err(Error {
                    message: "no enough responses".to_owned(),
                    kind: ErrorKind::Transport,
                });
            };
            if let Some(message) = preset.failure {
                return Err(Error {
                    message,
                    kind: ErrorKind::Transport,
                });
            }
            Ok(preset.to_model_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use shopchat_model::{ModelMessage, ModelTool, ToolCallRequest};

    use super::*;

    fn request(text: &str) -> ModelRequest {
        ModelRequest {
            system_instruction: "Be brief.".to_owned(),
            messages: vec![ModelMessage::User(text.to_owned())],
            tools: vec![ModelTool {
                name: "getClientById".to_owned(),
                description: "Looks up a client".to_owned(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "id": { "type": "integer" }
                    }
                }),
            }],
            temperature: Some(0.7),
        }
    }

    #[tokio::test]
    async fn test_send_request() {
        let mut provider = TestModelProvider::default();
        provider.add_response(PresetResponse::with_text("Hello, world!"));
        provider.add_response(PresetResponse::with_events([
            PresetEvent::ToolCall(ToolCallRequest::new(
                "getClientById",
                Some(json!({ "id": 1 })),
            )),
        ]));

        let resp = provider.send_request(&request("Hi")).await.unwrap();
        assert_eq!(resp.text.as_deref(), Some("Hello, world!"));
        assert!(resp.tool_call.is_none());

        let resp = provider
            .send_request(&request("Who is client 1?"))
            .await
            .unwrap();
        let tool_call = resp.tool_call.unwrap();
        assert_eq!(tool_call.name, "getClientById");
        assert_eq!(tool_call.arguments, json!({ "id": 1 }));

        let requests = provider.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1], request("Who is client 1?"));
    }

    #[tokio::test]
    async fn test_failures() {
        let mut provider = TestModelProvider::default();
        provider.add_response(PresetResponse::with_failure("connection reset"));

        let err = provider.send_request(&request("Hi")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.to_string(), "connection reset");

        // The script is exhausted now.
        let err = provider.send_request(&request("Hi")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);

        provider.set_missing_credential("no key");
        assert_eq!(
            provider.validate().unwrap_err().kind(),
            ErrorKind::MissingCredential
        );
    }
}
