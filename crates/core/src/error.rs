use shopchat_model::{ErrorKind, ModelProviderError};

use crate::tool;

/// Errors that end or degrade a chat exchange.
///
/// The `Display` form is the text the model or the user gets to see.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OrchestrationError {
    /// The provider can't be used at all, e.g. the API key is missing.
    #[error("{0}")]
    Configuration(String),
    /// The request never produced a usable HTTP response.
    #[error("model request failed: {0}")]
    Transport(String),
    /// The model responded, but not with something we can interpret.
    #[error("malformed model response: {0}")]
    MalformedResponse(String),
    /// The model requested a tool that is not registered.
    #[error("unknown tool: {0}")]
    ToolNotFound(String),
    /// The tool rejected its arguments or failed while running.
    #[error("Tool execution error: {0}")]
    ToolExecution(String),
}

impl OrchestrationError {
    pub(crate) fn from_provider(err: &dyn ModelProviderError) -> Self {
        let message = err.to_string();
        match err.kind() {
            ErrorKind::MissingCredential => Self::Configuration(message),
            ErrorKind::Transport => Self::Transport(message),
            ErrorKind::MalformedResponse => Self::MalformedResponse(message),
        }
    }

    pub(crate) fn from_tool(name: &str, err: &tool::Error) -> Self {
        match err.kind() {
            tool::ErrorKind::NotFound => Self::ToolNotFound(name.to_owned()),
            tool::ErrorKind::InvalidInput | tool::ErrorKind::ExecutionError => {
                Self::ToolExecution(err.to_string())
            }
        }
    }
}
