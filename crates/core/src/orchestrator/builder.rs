use std::sync::Arc;

use shopchat_model::ModelProvider;

use super::{Inner, Orchestrator};
use crate::model_client::ModelClient;
use crate::tool::{RegistryBuilder, Tool};

/// [`Orchestrator`] builder.
pub struct OrchestratorBuilder {
    model_client: ModelClient,
    registry: RegistryBuilder,
    system_instruction: String,
    temperature: Option<f64>,
}

impl OrchestratorBuilder {
    /// Creates a new builder with the specified model provider.
    #[inline]
    pub fn with_model_provider<P: ModelProvider + 'static>(
        provider: P,
    ) -> Self {
        Self {
            model_client: ModelClient::new(provider),
            registry: RegistryBuilder::default(),
            system_instruction: String::new(),
            temperature: None,
        }
    }

    /// Sets the system instruction sent with every request.
    #[inline]
    pub fn with_system_instruction<S: Into<String>>(
        mut self,
        instruction: S,
    ) -> Self {
        self.system_instruction = instruction.into();
        self
    }

    /// Sets the sampling temperature of the first round-trip.
    #[inline]
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Registers a tool.
    #[inline]
    pub fn with_tool<T: Tool>(mut self, tool: T) -> Self {
        self.registry = self.registry.with_tool(tool);
        self
    }

    /// Builds the orchestrator.
    #[inline]
    pub fn build(self) -> Orchestrator {
        let Self {
            model_client,
            registry,
            system_instruction,
            temperature,
        } = self;
        let registry = registry.build();
        debug!("orchestrator built with {} tool(s)", registry.len());
        Orchestrator {
            inner: Arc::new(Inner {
                model_client,
                registry,
                system_instruction,
                temperature,
            }),
        }
    }
}
