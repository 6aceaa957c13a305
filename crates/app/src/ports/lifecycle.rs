//! Lifecycle port: hand-off of bound objects to the host runtime.
//!
//! The host decides when components are set up and how often they run; the
//! binder only registers them.

use std::sync::Arc;

/// Something the host runtime drives through its component lifecycle.
pub trait Component: Send + Sync {
    /// Name used in logs and config dumps.
    fn component_name(&self) -> &str;

    /// Called once by the host before its main loop starts.
    fn setup(&self) {}

    /// One-line description of the component's configuration.
    fn dump_config(&self) -> String;
}

/// The host runtime's registry of components.
pub trait ComponentRegistry {
    /// Take part in the host's lifecycle from now on.
    fn register(&mut self, component: Arc<dyn Component>);
}

impl<T: ComponentRegistry + ?Sized> ComponentRegistry for &mut T {
    fn register(&mut self, component: Arc<dyn Component>) {
        (**self).register(component);
    }
}
