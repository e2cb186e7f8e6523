use shopchat_model::{ModelResponse, ToolCallRequest};

use super::{ChatAnswer, FALLBACK_ANSWER, ToolOutcome};
use crate::error::OrchestrationError;

/// Where a single user message currently is.
#[derive(Debug)]
pub(super) enum Stage {
    Idle,
    AwaitingFirstResponse,
    AwaitingToolResult(ToolCallRequest),
    AwaitingFollowup(ToolOutcome),
    Done(ChatAnswer),
}

impl Stage {
    pub(super) fn name(&self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::AwaitingFirstResponse => "awaiting first response",
            Stage::AwaitingToolResult(_) => "awaiting tool result",
            Stage::AwaitingFollowup(_) => "awaiting follow-up",
            Stage::Done(_) => "done",
        }
    }
}

/// An interpreted model reply.
#[derive(Debug, PartialEq)]
pub(super) enum Reply {
    ToolCall(ToolCallRequest),
    Answer(String),
}

impl Reply {
    /// Interprets a first-round reply, where the model may request a tool.
    pub(super) fn interpret(
        result: Result<ModelResponse, OrchestrationError>,
    ) -> Result<Self, OrchestrationError> {
        match result {
            Ok(ModelResponse {
                tool_call: Some(call),
                ..
            }) => Ok(Reply::ToolCall(call)),
            other => Self::final_text(other).map(Reply::Answer),
        }
    }

    /// Interprets a reply that may only contain the final answer.
    ///
    /// A reply without text, including one that asks for yet another tool,
    /// yields [`FALLBACK_ANSWER`].
    pub(super) fn final_text(
        result: Result<ModelResponse, OrchestrationError>,
    ) -> Result<String, OrchestrationError> {
        let text = result.and_then(|resp| {
            resp.text.ok_or_else(|| {
                OrchestrationError::MalformedResponse(
                    "first part has no text".to_owned(),
                )
            })
        });
        match text {
            Err(OrchestrationError::MalformedResponse(reason)) => {
                warn!("unusable model reply ({reason}), using fallback answer");
                Ok(FALLBACK_ANSWER.to_owned())
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_interpret() {
        let call = ToolCallRequest::new("getClientCount", None);
        let reply =
            Reply::interpret(Ok(ModelResponse::with_tool_call(call.clone())));
        assert_eq!(reply, Ok(Reply::ToolCall(call)));

        let reply = Reply::interpret(Ok(ModelResponse::with_text("Hi")));
        assert_eq!(reply, Ok(Reply::Answer("Hi".to_owned())));

        let reply = Reply::interpret(Ok(ModelResponse::default()));
        assert_eq!(reply, Ok(Reply::Answer(FALLBACK_ANSWER.to_owned())));

        let reply = Reply::interpret(Err(
            OrchestrationError::MalformedResponse("not json".to_owned()),
        ));
        assert_eq!(reply, Ok(Reply::Answer(FALLBACK_ANSWER.to_owned())));

        let err = OrchestrationError::Transport("timed out".to_owned());
        assert_eq!(Reply::interpret(Err(err.clone())), Err(err));
    }

    #[test]
    fn test_final_text_ignores_tool_calls() {
        let call = ToolCallRequest::new("getClientCount", Some(json!({})));
        let text =
            Reply::final_text(Ok(ModelResponse::with_tool_call(call.clone())));
        assert_eq!(text, Ok(FALLBACK_ANSWER.to_owned()));

        let resp = ModelResponse {
            tool_call: Some(call),
            text: Some("Here you go".to_owned()),
        };
        assert_eq!(Reply::final_text(Ok(resp)), Ok("Here you go".to_owned()));
    }
}
