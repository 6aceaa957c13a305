//! Binder: turns a declaration set into switches bound to one device.
//!
//! Binding is all or nothing: every declaration is validated and every
//! target slot is checked before the first switch is created.

use std::sync::Arc;

use powerbind_domain::control::DeclarationSet;
use powerbind_domain::error::{BindingError, PowerBindError};

use crate::device::PowerDevice;
use crate::ports::ComponentRegistry;
use crate::switch::ControlSwitch;

/// Binds declared controls to a device and hands them to the host runtime.
pub struct ControlBinder<R> {
    registry: R,
}

impl<R: ComponentRegistry> ControlBinder<R> {
    /// Create a binder that registers switches with `registry`.
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    /// Validate `declarations` and bind one switch per declared kind to
    /// `device`, in catalog order.
    ///
    /// Returns the bound switches in catalog order.
    ///
    /// # Errors
    ///
    /// Returns [`PowerBindError::Configuration`] for the first malformed
    /// override, or [`PowerBindError::Binding`] if `device` already has a
    /// switch in one of the declared slots. Nothing is registered or attached
    /// in either case.
    #[tracing::instrument(skip_all, fields(device = %device.name(), controls = declarations.len()))]
    pub fn bind(
        &mut self,
        declarations: &DeclarationSet,
        device: &Arc<PowerDevice>,
    ) -> Result<Vec<Arc<ControlSwitch>>, PowerBindError> {
        declarations.validate()?;
        if let Some(kind) = declarations
            .kinds()
            .find(|kind| device.control(*kind).is_some())
        {
            return Err(BindingError::SlotOccupied(kind).into());
        }

        let mut bound = Vec::with_capacity(declarations.len());
        for declaration in declarations.iter() {
            let commands = declaration.resolved_commands();
            let switch = Arc::new(ControlSwitch::new(&declaration, commands, device));
            self.registry.register(switch.clone());
            device.attach(Arc::clone(&switch))?;
            tracing::debug!(
                kind = %switch.kind(),
                on = switch.activate_command(),
                off = ?switch.deactivate_command(),
                "bound control"
            );
            bound.push(switch);
        }

        tracing::info!(bound = bound.len(), "controls bound");
        Ok(bound)
    }

    /// Give back the registry.
    pub fn into_registry(self) -> R {
        self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ComponentList;
    use powerbind_domain::control::{ControlDeclaration, ControlKind};
    use powerbind_domain::error::ConfigurationError;

    fn declare(declarations: Vec<ControlDeclaration>) -> DeclarationSet {
        declarations.into_iter().collect()
    }

    #[test]
    fn should_bind_quick_test_and_overridden_shutdown() {
        let device = PowerDevice::new("ups");
        let declarations = declare(vec![
            ControlDeclaration::new(ControlKind::QuickTest),
            ControlDeclaration::new(ControlKind::Shutdown).with_activate("S10"),
        ]);

        ControlBinder::new(ComponentList::default())
            .bind(&declarations, &device)
            .unwrap();

        let quick = device.quick_test().unwrap();
        assert_eq!(quick.activate_command(), "T");
        assert_eq!(quick.deactivate_command(), Some("CT"));

        let shutdown = device.shutdown().unwrap();
        assert_eq!(shutdown.activate_command(), "S10");
        assert_eq!(shutdown.deactivate_command(), None);

        assert!(quick.is_bound_to(&device));
        assert!(shutdown.is_bound_to(&device));
    }

    #[test]
    fn should_bind_exactly_the_declared_kinds() {
        let device = PowerDevice::new("ups");
        let declarations = declare(vec![
            ControlDeclaration::new(ControlKind::CancelShutdown),
            ControlDeclaration::new(ControlKind::Beeper),
        ]);

        let bound = ControlBinder::new(ComponentList::default())
            .bind(&declarations, &device)
            .unwrap();

        let kinds: Vec<_> = bound.iter().map(|s| s.kind()).collect();
        assert_eq!(kinds, vec![ControlKind::Beeper, ControlKind::CancelShutdown]);
        assert_eq!(device.bound_kinds(), kinds);
    }

    #[test]
    fn should_keep_beeper_defaults_when_not_overridden() {
        let device = PowerDevice::new("ups");
        let declarations = declare(vec![ControlDeclaration::new(ControlKind::Beeper)]);

        ControlBinder::new(ComponentList::default())
            .bind(&declarations, &device)
            .unwrap();

        let beeper = device.beeper().unwrap();
        assert_eq!(beeper.activate_command(), "Q");
        assert_eq!(beeper.deactivate_command(), Some("Q"));
    }

    #[test]
    fn should_register_each_switch_with_the_host() {
        let device = PowerDevice::new("ups");
        let declarations = declare(vec![
            ControlDeclaration::new(ControlKind::DeepTest),
            ControlDeclaration::new(ControlKind::ShutdownRestore),
        ]);
        let mut binder = ControlBinder::new(ComponentList::default());

        binder.bind(&declarations, &device).unwrap();

        let registry = binder.into_registry();
        assert_eq!(registry.names(), vec!["Deep Test", "Shutdown Restore"]);
    }

    #[test]
    fn should_bind_nothing_when_any_override_is_malformed() {
        let device = PowerDevice::new("ups");
        let declarations = declare(vec![
            ControlDeclaration::new(ControlKind::Beeper),
            ControlDeclaration::new(ControlKind::ShutdownRestore).with_activate("X05R0030"),
        ]);
        let mut registry = ComponentList::default();

        let result = ControlBinder::new(&mut registry).bind(&declarations, &device);

        match result {
            Err(PowerBindError::Configuration(ConfigurationError { kind, command, .. })) => {
                assert_eq!(kind, ControlKind::ShutdownRestore);
                assert_eq!(command, "X05R0030");
            }
            other => panic!("expected configuration error, got {other:?}"),
        }
        assert!(device.bound_kinds().is_empty());
        assert!(registry.is_empty());
    }

    #[test]
    fn should_refuse_to_bind_an_occupied_slot() {
        let device = PowerDevice::new("ups");
        let mut registry = ComponentList::default();
        let first = declare(vec![ControlDeclaration::new(ControlKind::Shutdown)]);
        ControlBinder::new(&mut registry).bind(&first, &device).unwrap();

        let second = declare(vec![
            ControlDeclaration::new(ControlKind::Beeper),
            ControlDeclaration::new(ControlKind::Shutdown).with_activate("S10"),
        ]);
        let result = ControlBinder::new(&mut registry).bind(&second, &device);

        assert!(matches!(
            result,
            Err(PowerBindError::Binding(BindingError::SlotOccupied(
                ControlKind::Shutdown
            )))
        ));
        assert_eq!(device.bound_kinds(), vec![ControlKind::Shutdown]);
        assert_eq!(device.shutdown().unwrap().activate_command(), "S05");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn should_bind_independent_graphs_for_separate_devices() {
        let declarations = declare(vec![
            ControlDeclaration::new(ControlKind::QuickTest),
            ControlDeclaration::new(ControlKind::Shutdown).with_activate("S10"),
        ]);
        let first = PowerDevice::new("ups-a");
        let second = PowerDevice::new("ups-b");

        let a = ControlBinder::new(ComponentList::default())
            .bind(&declarations, &first)
            .unwrap();
        let b = ControlBinder::new(ComponentList::default())
            .bind(&declarations, &second)
            .unwrap();

        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.kind(), y.kind());
            assert_eq!(x.commands(), y.commands());
            assert!(x.is_bound_to(&first));
            assert!(y.is_bound_to(&second));
            assert!(!Arc::ptr_eq(x, y));
        }

        first.quick_test().unwrap().turn_on().unwrap();
        assert_eq!(first.pending_commands().len(), 1);
        assert!(second.pending_commands().is_empty());
    }
}
