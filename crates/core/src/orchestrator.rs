mod builder;
mod dispatch;
mod stage;

use std::sync::Arc;

use serde_json::Value;
use shopchat_model::{
    ModelMessage, ModelRequest, ModelResponse, ToolCallRequest,
    ToolCallResult,
};
use tracing::Instrument;

pub use builder::OrchestratorBuilder;
use stage::{Reply, Stage};

use crate::error::OrchestrationError;
use crate::model_client::ModelClient;
use crate::tool::Registry;

/// The answer used when the model replies with something we can't read.
pub const FALLBACK_ANSWER: &str = "Could not obtain a response.";

/// Prefix of the answer returned by [`Orchestrator::chat`] for failures
/// other than a configuration problem.
pub const ERROR_PREFIX: &str = "Error: ";

/// The final natural-language answer to one user message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatAnswer {
    /// The answer text.
    pub text: String,
}

/// What happened when a requested tool was run.
#[derive(Clone, Debug, PartialEq)]
pub struct ToolOutcome {
    /// Name of the tool the model asked for.
    pub tool_name: String,
    /// Arguments exactly as the model sent them.
    pub arguments: Value,
    /// The tool output, or the description of its failure.
    pub text_result: String,
}

/// Drives one user message through at most two model round-trips.
///
/// The orchestrator holds no per-conversation state. It is cheap to clone
/// and can serve any number of concurrent messages.
#[derive(Clone)]
pub struct Orchestrator {
    inner: Arc<Inner>,
}

struct Inner {
    model_client: ModelClient,
    registry: Registry,
    system_instruction: String,
    temperature: Option<f64>,
}

impl Orchestrator {
    /// Returns the registry of tools advertised to the model.
    #[inline]
    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }

    /// Answers a user message, turning every failure into display text.
    pub async fn chat(&self, message: &str) -> String {
        match self.run(message).await {
            Ok(answer) => answer.text,
            Err(OrchestrationError::Configuration(message)) => message,
            Err(err) => format!("{ERROR_PREFIX}{err}"),
        }
    }

    /// Answers a user message.
    ///
    /// Tool failures and unreadable model replies don't surface here, they
    /// are turned into result text and the fallback answer respectively.
    pub async fn run(
        &self,
        message: &str,
    ) -> Result<ChatAnswer, OrchestrationError> {
        self.run_stages(message)
            .instrument(debug_span!("orchestrator"))
            .await
    }

    async fn run_stages(
        &self,
        message: &str,
    ) -> Result<ChatAnswer, OrchestrationError> {
        let mut stage = Stage::Idle;
        loop {
            trace!("entering stage: {}", stage.name());
            stage = match stage {
                Stage::Idle => {
                    self.inner.model_client.validate().map_err(|err| {
                        warn!("refusing to call the model: {err}");
                        OrchestrationError::from_provider(&*err)
                    })?;
                    Stage::AwaitingFirstResponse
                }
                Stage::AwaitingFirstResponse => {
                    let req = self.first_request(message);
                    match Reply::interpret(self.round_trip(req).await)? {
                        Reply::ToolCall(call) => Stage::AwaitingToolResult(call),
                        Reply::Answer(text) => Stage::Done(ChatAnswer { text }),
                    }
                }
                Stage::AwaitingToolResult(call) => Stage::AwaitingFollowup(
                    dispatch::dispatch(&self.inner.registry, call).await,
                ),
                Stage::AwaitingFollowup(outcome) => {
                    let req = self.follow_up_request(message, outcome);
                    let text = Reply::final_text(self.round_trip(req).await)?;
                    Stage::Done(ChatAnswer { text })
                }
                Stage::Done(answer) => return Ok(answer),
            };
        }
    }

    fn first_request(&self, message: &str) -> ModelRequest {
        ModelRequest {
            system_instruction: self.inner.system_instruction.clone(),
            messages: vec![ModelMessage::User(message.to_owned())],
            tools: self.inner.registry.definitions(),
            temperature: self.inner.temperature,
        }
    }

    fn follow_up_request(
        &self,
        message: &str,
        outcome: ToolOutcome,
    ) -> ModelRequest {
        let ToolOutcome {
            tool_name,
            arguments,
            text_result,
        } = outcome;
        ModelRequest {
            system_instruction: self.inner.system_instruction.clone(),
            messages: vec![
                ModelMessage::User(message.to_owned()),
                ModelMessage::ToolCall(ToolCallRequest {
                    name: tool_name.clone(),
                    arguments,
                }),
                ModelMessage::ToolResult(ToolCallResult {
                    name: tool_name,
                    content: text_result,
                }),
            ],
            tools: vec![],
            temperature: None,
        }
    }

    async fn round_trip(
        &self,
        req: ModelRequest,
    ) -> Result<ModelResponse, OrchestrationError> {
        self.inner
            .model_client
            .send_request(req)
            .await
            .map_err(|err| OrchestrationError::from_provider(&*err))
    }
}
