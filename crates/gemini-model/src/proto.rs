use serde::{Deserialize, Serialize};
use serde_json::Value;
use shopchat_model::{ModelMessage, ModelRequest, ModelTool, ToolCallRequest};

use crate::schema;

// ------------------------------
// Types received from the server
// ------------------------------

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GenerateContentResponse {
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CandidateContent {
    pub parts: Option<Vec<ResponsePart>>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
    #[serde(rename = "functionCall")]
    pub function_call: Option<ResponseFunctionCall>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ResponseFunctionCall {
    pub name: String,
    pub args: Option<Value>,
}

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Part {
    Text(String),
    FunctionCall(FunctionCall),
    FunctionResponse(FunctionResponse),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FunctionCall {
    name: String,
    args: Value,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FunctionResponse {
    name: String,
    response: FunctionResult,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
struct FunctionResult {
    result: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
struct FunctionDeclaration {
    name: String,
    description: String,
    parameters: Value,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
struct Tool {
    function_declarations: Vec<FunctionDeclaration>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
struct ToolConfig {
    function_calling_config: FunctionCallingConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
struct FunctionCallingConfig {
    mode: &'static str,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
struct GenerationConfig {
    temperature: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: SystemInstruction,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_config: Option<ToolConfig>,
    #[serde(
        rename = "generationConfig",
        skip_serializing_if = "Option::is_none"
    )]
    generation_config: Option<GenerationConfig>,
}

// -----------
// Conversions
// -----------

/// Builds the wire request.
///
/// Tools and the automatic calling mode are only attached when the request
/// advertises tools, which is how the follow-up round stays single-hop.
#[inline]
pub fn create_request(req: &ModelRequest) -> GenerateContentRequest {
    let (tools, tool_config) = if req.tools.is_empty() {
        (vec![], None)
    } else {
        let tool = Tool {
            function_declarations: req
                .tools
                .iter()
                .map(create_function_declaration)
                .collect(),
        };
        let tool_config = ToolConfig {
            function_calling_config: FunctionCallingConfig { mode: "AUTO" },
        };
        (vec![tool], Some(tool_config))
    };

    GenerateContentRequest {
        contents: req.messages.iter().map(create_content).collect(),
        system_instruction: SystemInstruction {
            parts: vec![Part::Text(req.system_instruction.clone())],
        },
        tools,
        tool_config,
        generation_config: req
            .temperature
            .map(|temperature| GenerationConfig { temperature }),
    }
}

#[inline]
fn create_content(msg: &ModelMessage) -> Content {
    match msg {
        ModelMessage::User(text) => Content {
            role: "user",
            parts: vec![Part::Text(text.clone())],
        },
        ModelMessage::ToolCall(ToolCallRequest { name, arguments }) => {
            Content {
                role: "model",
                parts: vec![Part::FunctionCall(FunctionCall {
                    name: name.clone(),
                    args: arguments.clone(),
                })],
            }
        }
        ModelMessage::ToolResult(result) => Content {
            role: "user",
            parts: vec![Part::FunctionResponse(FunctionResponse {
                name: result.name.clone(),
                response: FunctionResult {
                    result: result.content.clone(),
                },
            })],
        },
    }
}

#[inline]
fn create_function_declaration(tool: &ModelTool) -> FunctionDeclaration {
    FunctionDeclaration {
        name: tool.name.clone(),
        description: tool.description.clone(),
        parameters: schema::function_parameters(&tool.name, &tool.parameters),
    }
}
