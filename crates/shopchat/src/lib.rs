//! A shop assistant that answers questions about clients and orders.
//!
//! The crate wires the database tools, the in-memory store and the Gemini
//! provider into a [`core::Orchestrator`], and exposes it over HTTP. You can
//! also use it as a library and build the assistant over your own store.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod assistant;
pub mod config;
pub mod generator;
pub mod server;
pub mod store;
pub mod tools;

pub use assistant::{AssistantBuilder, DEFAULT_SYSTEM_INSTRUCTION};

/// Re-exports of [`shopchat_core`] crate.
pub mod core {
    pub use shopchat_core::*;
}
