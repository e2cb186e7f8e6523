use std::sync::Arc;

use shopchat_core::{Orchestrator, OrchestratorBuilder};
use shopchat_model::ModelProvider;

use crate::store::Store;
use crate::tools;

/// The system instruction used when none is configured.
pub const DEFAULT_SYSTEM_INSTRUCTION: &str =
    include_str!("./system_instruction.md");

/// An assistant builder.
///
/// The built [`Orchestrator`] has every database tool registered over the
/// given store.
pub struct AssistantBuilder {
    orchestrator_builder: OrchestratorBuilder,
    store: Arc<Store>,
}

impl AssistantBuilder {
    /// Creates an assistant builder with a specified model provider.
    pub fn with_model_provider<M: ModelProvider + 'static>(
        provider: M,
        store: Arc<Store>,
    ) -> Self {
        let orchestrator_builder =
            OrchestratorBuilder::with_model_provider(provider)
                .with_system_instruction(DEFAULT_SYSTEM_INSTRUCTION);
        Self {
            orchestrator_builder,
            store,
        }
    }

    /// Sets the system instruction.
    #[inline]
    pub fn with_system_instruction<S: Into<String>>(
        mut self,
        instruction: S,
    ) -> Self {
        self.orchestrator_builder = self
            .orchestrator_builder
            .with_system_instruction(instruction);
        self
    }

    /// Sets the sampling temperature.
    #[inline]
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.orchestrator_builder =
            self.orchestrator_builder.with_temperature(temperature);
        self
    }

    /// Builds the assistant.
    pub fn build(self) -> Orchestrator {
        tools::register_all(self.orchestrator_builder, &self.store).build()
    }
}
