use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;
use shopchat_model::ModelTool;

use crate::tool::object::{ToolObject, ToolObjectImpl};
use crate::tool::{Error, Tool, ToolResult};

/// A builder for [`Registry`].
#[derive(Default)]
pub struct RegistryBuilder {
    tools: Vec<Arc<dyn ToolObject>>,
}

impl RegistryBuilder {
    /// Registers a tool.
    ///
    /// Registering a name twice replaces the earlier handler, which keeps
    /// its original position in the declaration order.
    pub fn with_tool<T: Tool>(mut self, tool: T) -> Self {
        let tool: Arc<dyn ToolObject> = Arc::new(ToolObjectImpl(tool));
        match self.tools.iter().position(|t| t.name() == tool.name()) {
            Some(idx) => {
                warn!("tool `{}` is registered twice, replacing", tool.name());
                self.tools[idx] = tool;
            }
            None => self.tools.push(tool),
        }
        self
    }

    /// Freezes the registered tools.
    pub fn build(self) -> Registry {
        let index = self
            .tools
            .iter()
            .enumerate()
            .map(|(idx, tool)| (tool.name().to_owned(), idx))
            .collect();
        Registry {
            inner: Arc::new(RegistryInner {
                tools: self.tools,
                index,
            }),
        }
    }
}

/// An immutable set of tools, shared by all requests.
///
/// Cloning a registry is cheap.
#[derive(Clone, Default)]
pub struct Registry {
    inner: Arc<RegistryInner>,
}

#[derive(Default)]
struct RegistryInner {
    tools: Vec<Arc<dyn ToolObject>>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Returns the tool declarations in registration order.
    pub fn definitions(&self) -> Vec<ModelTool> {
        self.inner
            .tools
            .iter()
            .map(|tool| ModelTool {
                name: tool.name().to_owned(),
                description: tool.description().to_owned(),
                parameters: tool.parameter_schema().clone(),
            })
            .collect()
    }

    /// Returns the number of registered tools.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.tools.len()
    }

    /// Returns `true` if no tool is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.tools.is_empty()
    }

    /// Returns `true` if a tool with the given name is registered.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.inner.index.contains_key(name)
    }

    /// Invokes the tool registered under `name` with the raw arguments.
    ///
    /// The returned future doesn't borrow the registry.
    pub fn dispatch(
        &self,
        name: &str,
        arguments: Value,
    ) -> Pin<Box<dyn Future<Output = ToolResult> + Send>> {
        let Some(&idx) = self.inner.index.get(name) else {
            warn!("tool not found: {name}");
            return Box::pin(std::future::ready(Err(Error::not_found())));
        };
        trace!("dispatching tool `{name}` with args: {arguments}");
        self.inner.tools[idx].execute(arguments)
    }
}
