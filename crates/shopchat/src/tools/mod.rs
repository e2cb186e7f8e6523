//! Read-only database tools the model can call.
//!
//! Every tool is a [`Query`] over the [`Store`], wrapped into a
//! [`DatabaseTool`] that carries the store and the parameter schema. Missing
//! rows are not errors, each query answers with a descriptive sentence
//! instead.

mod analytics;
mod clients;
#[cfg(test)]
mod fixture;
mod format;
mod orders;

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use schemars::{JsonSchema, schema_for};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use shopchat_core::OrchestratorBuilder;
use shopchat_core::tool::{Tool, ToolResult};

pub use analytics::*;
pub use clients::*;
pub use orders::*;

use crate::store::Store;

/// A read-only question the model can ask the database.
pub trait Query: Send + Sync + 'static {
    /// The tool name advertised to the model.
    const NAME: &'static str;

    /// What the tool does, for the model.
    const DESCRIPTION: &'static str;

    /// Arguments of the query.
    type Input: DeserializeOwned + JsonSchema + Send + 'static;

    /// Answers the query.
    fn run(store: &Store, input: Self::Input) -> String;
}

/// Exposes a [`Query`] as a [`Tool`].
pub struct DatabaseTool<Q> {
    store: Arc<Store>,
    parameter_schema: Value,
    _query: PhantomData<fn() -> Q>,
}

impl<Q: Query> DatabaseTool<Q> {
    /// Creates the tool over the given store.
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            store,
            parameter_schema: schema_for!(Q::Input).to_value(),
            _query: PhantomData,
        }
    }
}

impl<Q> fmt::Debug for DatabaseTool<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseTool")
            .field("query", &std::any::type_name::<Q>())
            .finish_non_exhaustive()
    }
}

impl<Q: Query> Tool for DatabaseTool<Q> {
    type Input = Q::Input;

    fn name(&self) -> &str {
        Q::NAME
    }

    fn description(&self) -> &str {
        Q::DESCRIPTION
    }

    fn parameter_schema(&self) -> &Value {
        &self.parameter_schema
    }

    #[allow(clippy::manual_async_fn)]
    fn execute(
        &self,
        input: Self::Input,
    ) -> impl Future<Output = ToolResult> + Send + 'static {
        let store = Arc::clone(&self.store);
        async move { Ok(Q::run(&store, input)) }
    }
}

/// Input of queries that take no arguments.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct NoArguments {}

/// Input of queries addressed by a row ID.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct IdArgument {
    #[serde(deserialize_with = "lenient_id")]
    #[schemars(with = "i64", description = "The ID to look up.")]
    id: i64,
}

/// Input of queries about one client.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientIdArgument {
    #[serde(deserialize_with = "lenient_id")]
    #[schemars(with = "i64", description = "The client ID.")]
    client_id: i64,
}

/// Registers all database tools, in the order they are advertised.
pub fn register_all(
    builder: OrchestratorBuilder,
    store: &Arc<Store>,
) -> OrchestratorBuilder {
    fn tool<Q: Query>(store: &Arc<Store>) -> DatabaseTool<Q> {
        DatabaseTool::new(Arc::clone(store))
    }

    builder
        .with_tool(tool::<ListAllClients>(store))
        .with_tool(tool::<GetClientById>(store))
        .with_tool(tool::<GetClientCount>(store))
        .with_tool(tool::<SearchClientByEmail>(store))
        .with_tool(tool::<SearchClientByName>(store))
        .with_tool(tool::<ListAllOrders>(store))
        .with_tool(tool::<GetOrderById>(store))
        .with_tool(tool::<GetOrdersForClient>(store))
        .with_tool(tool::<GetOrderCount>(store))
        .with_tool(tool::<GetOrdersByStatus>(store))
        .with_tool(tool::<GetTotalSpentByClient>(store))
        .with_tool(tool::<GetDatabaseSummary>(store))
        .with_tool(tool::<SearchOrdersByProduct>(store))
        .with_tool(tool::<GetClientsRankedByOrderCount>(store))
        .with_tool(tool::<GetClientsRankedBySpending>(store))
        .with_tool(tool::<GetMostPopularProducts>(store))
        .with_tool(tool::<GetTopClientByOrderCount>(store))
        .with_tool(tool::<GetTopClientBySpending>(store))
}

/// Models sometimes send whole numbers as `5.0`.
fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(id) = number.as_i64() {
        return Ok(id);
    }
    match number.as_f64() {
        Some(id) if id.fract() == 0.0 && id.abs() < i64::MAX as f64 => {
            Ok(id as i64)
        }
        _ => Err(serde::de::Error::custom(format!(
            "expected an integer ID, got {number}"
        ))),
    }
}

/// Maps a model-supplied ID onto the store's ID space.
#[inline]
fn row_id(id: i64) -> Option<u64> {
    u64::try_from(id).ok()
}
