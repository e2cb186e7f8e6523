use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A complete response from the model provider.
///
/// Both fields are extracted independently from the provider payload, so a
/// response may carry a tool call, a text, both, or neither (when the
/// payload has no usable content at all).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModelResponse {
    /// The first tool call found in the response, if any.
    pub tool_call: Option<ToolCallRequest>,
    /// The text of the leading content part, if it carries one.
    pub text: Option<String>,
}

impl ModelResponse {
    /// Creates a response that only carries a text.
    #[inline]
    pub fn with_text<S: Into<String>>(text: S) -> Self {
        Self {
            tool_call: None,
            text: Some(text.into()),
        }
    }

    /// Creates a response that only carries a tool call.
    #[inline]
    pub fn with_tool_call(tool_call: ToolCallRequest) -> Self {
        Self {
            tool_call: Some(tool_call),
            text: None,
        }
    }
}

/// Describes a tool call request from the model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// The name of the tool to call.
    pub name: String,
    /// The arguments to pass to the tool, as a JSON object.
    pub arguments: Value,
}

impl ToolCallRequest {
    /// Creates a tool call request.
    ///
    /// Missing arguments (`null`) are normalized to an empty object, since
    /// that is what providers expect when the call is replayed.
    #[inline]
    pub fn new<S: Into<String>>(name: S, arguments: Option<Value>) -> Self {
        let arguments = match arguments {
            None | Some(Value::Null) => Value::Object(Map::new()),
            Some(arguments) => arguments,
        };
        Self {
            name: name.into(),
            arguments,
        }
    }
}
