//! In-memory component registry.
//!
//! Stands in for the host runtime's lifecycle manager: keeps components in
//! registration order and runs their setup once.

use std::sync::Arc;

use crate::ports::{Component, ComponentRegistry};

/// Components in the order they were registered.
#[derive(Default)]
pub struct ComponentList {
    components: Vec<Arc<dyn Component>>,
}

impl ComponentList {
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Component names, in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.components
            .iter()
            .map(|component| component.component_name())
            .collect()
    }

    /// Run every component's setup, in registration order.
    pub fn setup_all(&self) {
        for component in &self.components {
            tracing::debug!(component = component.component_name(), "setup");
            component.setup();
        }
    }

    /// Log every component's configuration.
    pub fn dump_config(&self) {
        for component in &self.components {
            tracing::info!("{}", component.dump_config());
        }
    }
}

impl ComponentRegistry for ComponentList {
    fn register(&mut self, component: Arc<dyn Component>) {
        tracing::debug!(component = component.component_name(), "registered");
        self.components.push(component);
    }
}
