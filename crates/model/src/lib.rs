//! An abstraction layer between the chat orchestrator and a hosted LLM.
//!
//! This crate establishes the protocol the orchestrator speaks when it
//! asks a model for an answer: a request made of turns, tool declarations
//! and generation parameters, and a response that is either a final text
//! or a request to call one tool.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to. Wire formats of
//! concrete providers live in their own crates.

#![deny(missing_docs)]

mod error;
mod provider;
mod request;
mod response;

pub use error::*;
pub use provider::*;
pub use request::*;
pub use response::*;
