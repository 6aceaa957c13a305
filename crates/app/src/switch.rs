//! Control switch: the on/off object the host runtime drives.
//!
//! Turning a switch on queues its activate command on the owning device;
//! turning it off queues the deactivate command, or nothing at all for a
//! momentary control.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use powerbind_domain::control::{
    CommandPair, ControlDeclaration, ControlKind, StateChange, SwitchState,
};
use powerbind_domain::error::PowerBindError;
use powerbind_domain::id::ControlId;
use powerbind_domain::time::now;

use crate::device::PowerDevice;
use crate::ports::Component;

/// A declared control bound to a device.
#[derive(Debug)]
pub struct ControlSwitch {
    id: ControlId,
    kind: ControlKind,
    name: String,
    commands: CommandPair,
    device: Weak<PowerDevice>,
    state: Mutex<SwitchState>,
}

impl ControlSwitch {
    pub(crate) fn new(
        declaration: &ControlDeclaration,
        commands: CommandPair,
        device: &Arc<PowerDevice>,
    ) -> Self {
        Self {
            id: ControlId::new(),
            kind: declaration.kind,
            name: declaration.display_name().to_string(),
            commands,
            device: Arc::downgrade(device),
            state: Mutex::new(SwitchState::Unknown),
        }
    }

    #[must_use]
    pub fn id(&self) -> ControlId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> ControlKind {
        self.kind
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn icon(&self) -> &'static str {
        self.kind.icon()
    }

    #[must_use]
    pub fn commands(&self) -> &CommandPair {
        &self.commands
    }

    #[must_use]
    pub fn activate_command(&self) -> &str {
        &self.commands.activate
    }

    #[must_use]
    pub fn deactivate_command(&self) -> Option<&str> {
        self.commands.deactivate.as_deref()
    }

    #[must_use]
    pub fn state(&self) -> SwitchState {
        *self.lock_state()
    }

    /// The owning device, while it is alive.
    #[must_use]
    pub fn device(&self) -> Option<Arc<PowerDevice>> {
        self.device.upgrade()
    }

    /// Whether this switch points back to `device`.
    #[must_use]
    pub fn is_bound_to(&self, device: &Arc<PowerDevice>) -> bool {
        std::ptr::eq(self.device.as_ptr(), Arc::as_ptr(device))
    }

    /// Request a new state from the device.
    ///
    /// # Errors
    ///
    /// Returns [`PowerBindError::DeviceGone`] if the device handle was dropped,
    /// or [`PowerBindError::QueueFull`] if the command was dropped; the state
    /// is left untouched in that case.
    pub fn write_state(&self, on: bool) -> Result<(), PowerBindError> {
        let device = self.device().ok_or(PowerBindError::DeviceGone)?;
        let command = if on {
            Some(self.commands.activate.as_str())
        } else {
            self.commands.deactivate.as_deref()
        };
        if let Some(command) = command
            && !device.switch_command(command)
        {
            return Err(PowerBindError::QueueFull(self.kind));
        }
        self.publish_to(&device, SwitchState::from(on));
        Ok(())
    }

    /// # Errors
    ///
    /// See [`write_state`](Self::write_state).
    pub fn turn_on(&self) -> Result<(), PowerBindError> {
        self.write_state(true)
    }

    /// # Errors
    ///
    /// See [`write_state`](Self::write_state).
    pub fn turn_off(&self) -> Result<(), PowerBindError> {
        self.write_state(false)
    }

    /// # Errors
    ///
    /// See [`write_state`](Self::write_state).
    pub fn toggle(&self) -> Result<(), PowerBindError> {
        self.write_state(!self.state().is_on())
    }

    /// Report `state` without sending anything to the device.
    pub fn publish_state(&self, state: SwitchState) {
        match self.device() {
            Some(device) => self.publish_to(&device, state),
            None => *self.lock_state() = state,
        }
    }

    fn publish_to(&self, device: &PowerDevice, state: SwitchState) {
        *self.lock_state() = state;
        device.bus().publish(StateChange {
            device_id: device.id(),
            kind: self.kind,
            state,
            at: now(),
        });
    }

    fn lock_state(&self) -> MutexGuard<'_, SwitchState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Component for ControlSwitch {
    fn component_name(&self) -> &str {
        &self.name
    }

    fn setup(&self) {
        if self.state() == SwitchState::Unknown {
            self.publish_state(SwitchState::Off);
        }
    }

    fn dump_config(&self) -> String {
        format!(
            "Switch '{}' ({}): on={:?} off={:?} icon={}",
            self.name,
            self.kind,
            self.commands.activate,
            self.commands.deactivate,
            self.icon()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bind(declaration: &ControlDeclaration, device: &Arc<PowerDevice>) -> ControlSwitch {
        ControlSwitch::new(declaration, declaration.resolved_commands(), device)
    }

    fn queued(device: &PowerDevice) -> Vec<String> {
        device
            .pending_commands()
            .into_iter()
            .map(|q| q.command)
            .collect()
    }

    #[test]
    fn should_start_in_unknown_state() {
        let device = PowerDevice::new("ups");
        let switch = bind(&ControlDeclaration::new(ControlKind::QuickTest), &device);
        assert_eq!(switch.state(), SwitchState::Unknown);
    }

    #[test]
    fn should_queue_activate_when_turned_on() {
        let device = PowerDevice::new("ups");
        let switch = bind(&ControlDeclaration::new(ControlKind::QuickTest), &device);
        switch.turn_on().unwrap();
        assert_eq!(queued(&device), vec!["T"]);
        assert_eq!(switch.state(), SwitchState::On);
    }

    #[test]
    fn should_queue_deactivate_when_turned_off() {
        let device = PowerDevice::new("ups");
        let switch = bind(&ControlDeclaration::new(ControlKind::TenMinuteTest), &device);
        switch.turn_on().unwrap();
        switch.turn_off().unwrap();
        assert_eq!(queued(&device), vec!["T10", "CT"]);
        assert_eq!(switch.state(), SwitchState::Off);
    }

    #[test]
    fn should_send_same_command_both_ways_for_beeper() {
        let device = PowerDevice::new("ups");
        let switch = bind(&ControlDeclaration::new(ControlKind::Beeper), &device);
        switch.toggle().unwrap();
        switch.toggle().unwrap();
        assert_eq!(queued(&device), vec!["Q", "Q"]);
    }

    #[test]
    fn should_send_nothing_when_momentary_control_is_turned_off() {
        let device = PowerDevice::new("ups");
        let switch = bind(
            &ControlDeclaration::new(ControlKind::Shutdown).with_activate("S10"),
            &device,
        );
        switch.turn_off().unwrap();
        assert!(queued(&device).is_empty());
        assert_eq!(switch.state(), SwitchState::Off);
    }

    #[test]
    fn should_fail_when_device_is_gone() {
        let device = PowerDevice::new("ups");
        let switch = bind(&ControlDeclaration::new(ControlKind::CancelShutdown), &device);
        drop(device);
        assert!(matches!(switch.turn_on(), Err(PowerBindError::DeviceGone)));
        assert!(switch.device().is_none());
    }

    #[test]
    fn should_keep_state_when_queue_drops_the_command() {
        let device = PowerDevice::new("ups");
        let switch = bind(&ControlDeclaration::new(ControlKind::Shutdown), &device);
        switch.setup();
        for _ in 0..crate::device::COMMAND_QUEUE_LENGTH {
            device.switch_command("Q");
        }

        let result = switch.turn_on();

        assert!(matches!(
            result,
            Err(PowerBindError::QueueFull(ControlKind::Shutdown))
        ));
        assert_eq!(switch.state(), SwitchState::Off);
        assert!(queued(&device).iter().all(|command| command == "Q"));
    }

    #[test]
    fn should_give_each_switch_its_own_id() {
        let device = PowerDevice::new("ups");
        let a = bind(&ControlDeclaration::new(ControlKind::QuickTest), &device);
        let b = bind(&ControlDeclaration::new(ControlKind::DeepTest), &device);
        assert_ne!(a.id(), b.id());
    }

    #[tokio::test]
    async fn should_publish_state_changes_on_device_bus() {
        let device = PowerDevice::new("ups");
        let mut rx = device.subscribe();
        let switch = bind(&ControlDeclaration::new(ControlKind::DeepTest), &device);

        switch.turn_on().unwrap();

        let change = rx.recv().await.unwrap();
        assert_eq!(change.device_id, device.id());
        assert_eq!(change.kind, ControlKind::DeepTest);
        assert_eq!(change.state, SwitchState::On);
    }

    #[test]
    fn should_publish_off_on_setup() {
        let device = PowerDevice::new("ups");
        let switch = bind(&ControlDeclaration::new(ControlKind::Beeper), &device);
        switch.setup();
        assert_eq!(switch.state(), SwitchState::Off);
    }

    #[test]
    fn should_describe_commands_in_dump_config() {
        let device = PowerDevice::new("ups");
        let switch = bind(&ControlDeclaration::new(ControlKind::Shutdown), &device);
        assert_eq!(
            switch.dump_config(),
            "Switch 'Shutdown' (shutdown): on=\"S05\" off=None icon=mdi:power-plug-off"
        );
    }
}
