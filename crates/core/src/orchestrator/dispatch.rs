use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;
use shopchat_model::ToolCallRequest;
use tracing::Instrument;

use super::ToolOutcome;
use crate::error::OrchestrationError;
use crate::tool::{Error as ToolError, Registry, ToolResult};

/// Runs the requested tool. Failures become the result text.
pub(super) async fn dispatch(
    registry: &Registry,
    call: ToolCallRequest,
) -> ToolOutcome {
    let ToolCallRequest { name, arguments } = call;
    let span = debug_span!("tool dispatch", tool = %name);

    info!(parent: &span, "model requested tool `{name}` with args: {arguments}");
    // Deferred so that a panic while building the tool future is caught too.
    let fut = async { registry.dispatch(&name, arguments.clone()).await };
    let result = AssertUnwindSafe(fut.instrument(span.clone()))
        .catch_unwind()
        .await
        .unwrap_or_else(panic_to_result);

    let text_result = match result {
        Ok(output) => {
            trace!(parent: &span, "tool output: {output}");
            output
        }
        Err(err) => {
            let err = OrchestrationError::from_tool(&name, &err);
            warn!(parent: &span, "{err}");
            err.to_string()
        }
    };
    ToolOutcome {
        tool_name: name,
        arguments,
        text_result,
    }
}

fn panic_to_result(payload: Box<dyn Any + Send>) -> ToolResult {
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_owned());
    Err(ToolError::execution_error()
        .with_reason(format!("tool panicked: {message}")))
}
