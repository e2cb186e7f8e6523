use serde::{Deserialize, Serialize};
use shopchat_model::{ModelResponse, ToolCallRequest};

/// The parts of a preset response, in the order the model emits them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PresetEvent {
    #[serde(rename = "text")]
    Text(String),
    #[serde(rename = "tool_call")]
    ToolCall(ToolCallRequest),
}

/// The preset response for one round-trip.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetResponse {
    /// Parts in this response.
    pub events: Vec<PresetEvent>,
    /// If set, the round-trip fails with a transport error instead.
    pub failure: Option<String>,
}

impl PresetResponse {
    /// Creates a `PresetResponse` with the specified events.
    #[inline]
    pub fn with_events(events: impl Into<Vec<PresetEvent>>) -> Self {
        Self {
            events: events.into(),
            failure: None,
        }
    }

    /// Creates a `PresetResponse` answering with a single text part.
    #[inline]
    pub fn with_text<S: Into<String>>(text: S) -> Self {
        Self::with_events([PresetEvent::Text(text.into())])
    }

    /// Creates a `PresetResponse` that fails with the given message.
    #[inline]
    pub fn with_failure<S: Into<String>>(message: S) -> Self {
        Self {
            events: vec![],
            failure: Some(message.into()),
        }
    }

    /// Converts the events the way a real provider reads its parts: the
    /// first tool call, and the text of the leading part.
    pub(crate) fn to_model_response(&self) -> ModelResponse {
        let text = match self.events.first() {
            Some(PresetEvent::Text(text)) => Some(text.clone()),
            _ => None,
        };
        let tool_call = self.events.iter().find_map(|event| match event {
            PresetEvent::ToolCall(req) => Some(req.clone()),
            PresetEvent::Text(_) => None,
        });
        ModelResponse { tool_call, text }
    }
}
