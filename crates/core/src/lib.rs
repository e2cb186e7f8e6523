//! Core logic: the tool registry and the tool-calling chat orchestrator.

#![deny(missing_docs)]
#![deny(clippy::missing_safety_doc)]

#[macro_use]
extern crate tracing;

mod error;
mod model_client;
mod orchestrator;
pub mod tool;

pub use error::OrchestrationError;
pub use orchestrator::{
    ChatAnswer, ERROR_PREFIX, FALLBACK_ANSWER, Orchestrator,
    OrchestratorBuilder, ToolOutcome,
};
