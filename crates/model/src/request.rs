use serde_json::Value;

use crate::ToolCallRequest;

/// A request to be sent to the model provider.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelRequest {
    /// The system instructions, attached to every request.
    pub system_instruction: String,
    /// The input turns, in conversation order.
    pub messages: Vec<ModelMessage>,
    /// Tools that are available to the model. An empty list means the
    /// model is not offered any tool in this round-trip.
    pub tools: Vec<ModelTool>,
    /// Sampling temperature. `None` leaves it to the provider default.
    pub temperature: Option<f64>,
}

/// A complete turn in the request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModelMessage {
    /// A user input text.
    User(String),
    /// A tool call previously issued by the model, replayed as-is.
    ToolCall(ToolCallRequest),
    /// The result of a tool call, sent back on behalf of the user.
    ToolResult(ToolCallResult),
}

/// The result of calling a tool.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ToolCallResult {
    /// The name of the tool that produced this result.
    pub name: String,
    /// The result of the tool call.
    pub content: String,
}

/// Describes a tool that can be used by the model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelTool {
    /// Name of the tool.
    pub name: String,
    /// Description of the tool.
    pub description: String,
    /// Parameters definition of the tool.
    ///
    /// For most model providers, the parameters should typically be
    /// defined by a [JSON schema](https://json-schema.org/).
    pub parameters: Value,
}
