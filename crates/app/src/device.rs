//! Device handle: one physical power device and the controls bound to it.
//!
//! The handle owns a fixed slot per [`ControlKind`]. Each slot is filled at
//! most once, by the binder. At runtime, controls push command strings onto
//! the handle's bounded queue and the host drains it through a
//! [`CommandTransport`].

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use tokio::sync::broadcast;

use powerbind_domain::control::{ControlKind, StateChange, SwitchState};
use powerbind_domain::error::{BindingError, PowerBindError};
use powerbind_domain::id::DeviceId;
use powerbind_domain::reply::{self, CommandReply};
use powerbind_domain::time::{Timestamp, now};

use crate::ports::{CommandTransport, Component};
use crate::state_bus::StateBus;
use crate::switch::ControlSwitch;

/// Maximum number of commands waiting to be sent.
pub const COMMAND_QUEUE_LENGTH: usize = 10;

const STATE_BUS_CAPACITY: usize = 64;

/// A command waiting in the device queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedCommand {
    pub command: String,
    pub queued_at: Timestamp,
}

/// Result of sending one queued command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub command: String,
    pub reply: CommandReply,
    pub success: bool,
}

/// Shared handle for one physical power device.
#[derive(Debug)]
pub struct PowerDevice {
    id: DeviceId,
    name: String,
    slots: [OnceLock<Arc<ControlSwitch>>; ControlKind::COUNT],
    queue: Mutex<VecDeque<QueuedCommand>>,
    bus: StateBus,
}

impl PowerDevice {
    /// Create a device handle with every slot empty.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            id: DeviceId::new(),
            name: name.into(),
            slots: std::array::from_fn(|_| OnceLock::new()),
            queue: Mutex::new(VecDeque::with_capacity(COMMAND_QUEUE_LENGTH)),
            bus: StateBus::new(STATE_BUS_CAPACITY),
        })
    }

    #[must_use]
    pub fn id(&self) -> DeviceId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Subscribe to state changes of every control on this device.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.bus.subscribe()
    }

    pub(crate) fn bus(&self) -> &StateBus {
        &self.bus
    }

    /// The control bound in `kind`'s slot, if any.
    #[must_use]
    pub fn control(&self, kind: ControlKind) -> Option<&Arc<ControlSwitch>> {
        self.slots[kind.index()].get()
    }

    #[must_use]
    pub fn beeper(&self) -> Option<&Arc<ControlSwitch>> {
        self.control(ControlKind::Beeper)
    }

    #[must_use]
    pub fn quick_test(&self) -> Option<&Arc<ControlSwitch>> {
        self.control(ControlKind::QuickTest)
    }

    #[must_use]
    pub fn deep_test(&self) -> Option<&Arc<ControlSwitch>> {
        self.control(ControlKind::DeepTest)
    }

    #[must_use]
    pub fn ten_minutes_test(&self) -> Option<&Arc<ControlSwitch>> {
        self.control(ControlKind::TenMinuteTest)
    }

    #[must_use]
    pub fn shutdown(&self) -> Option<&Arc<ControlSwitch>> {
        self.control(ControlKind::Shutdown)
    }

    #[must_use]
    pub fn shutdown_restore(&self) -> Option<&Arc<ControlSwitch>> {
        self.control(ControlKind::ShutdownRestore)
    }

    #[must_use]
    pub fn cancel_shutdown(&self) -> Option<&Arc<ControlSwitch>> {
        self.control(ControlKind::CancelShutdown)
    }

    /// Bound controls, in catalog order.
    pub fn controls(&self) -> impl Iterator<Item = &Arc<ControlSwitch>> {
        self.slots.iter().filter_map(OnceLock::get)
    }

    /// Kinds with a bound control, in catalog order.
    #[must_use]
    pub fn bound_kinds(&self) -> Vec<ControlKind> {
        self.controls().map(|switch| switch.kind()).collect()
    }

    pub(crate) fn attach(&self, switch: Arc<ControlSwitch>) -> Result<(), BindingError> {
        let kind = switch.kind();
        self.slots[kind.index()]
            .set(switch)
            .map_err(|_| BindingError::SlotOccupied(kind))
    }

    /// Queue `command` for sending. Returns `false` when the queue is full
    /// and the command was dropped.
    pub fn switch_command(&self, command: &str) -> bool {
        tracing::debug!(device = %self.name, command = %command, "got command");
        let mut queue = self.lock_queue();
        if queue.len() >= COMMAND_QUEUE_LENGTH {
            tracing::warn!(device = %self.name, command = %command, "command queue full, dropping command");
            return false;
        }
        queue.push_back(QueuedCommand {
            command: command.to_string(),
            queued_at: now(),
        });
        tracing::debug!(device = %self.name, command = %command, position = queue.len() - 1, "command queued");
        true
    }

    /// Commands waiting to be sent, oldest first.
    #[must_use]
    pub fn pending_commands(&self) -> Vec<QueuedCommand> {
        self.lock_queue().iter().cloned().collect()
    }

    /// Send the oldest queued command through `transport`.
    ///
    /// On success, momentary feedback is released: controls whose activate
    /// command was just carried out, or whose deactivate command was, fall
    /// back to [`SwitchState::Off`]. Returns `None` when the queue is empty.
    ///
    /// # Errors
    ///
    /// Propagates transport failures; the command is not re-queued.
    pub fn send_next_command(
        &self,
        transport: &mut impl CommandTransport,
    ) -> Result<Option<CommandOutcome>, PowerBindError> {
        let Some(queued) = self.lock_queue().pop_front() else {
            return Ok(None);
        };
        let command = queued.command;
        tracing::debug!(device = %self.name, command = %command, "sending command from queue");

        let reply = transport.send(&command).inspect_err(|err| {
            tracing::error!(device = %self.name, command = %command, error = %err, "command failed: transport error");
        })?;

        let success = reply::is_success(&command, reply);
        match (success, reply) {
            (true, CommandReply::Ack) => {
                tracing::info!(device = %self.name, command = %command, "command successful: ACK");
            }
            (true, _) => {
                tracing::info!(device = %self.name, command = %command, "command successful: no response expected");
            }
            (false, CommandReply::Nak) => {
                tracing::error!(device = %self.name, command = %command, "command failed: NAK");
            }
            (false, CommandReply::Silent) => {
                tracing::error!(device = %self.name, command = %command, "command failed: no response");
            }
            (false, CommandReply::Ack) => {
                tracing::error!(device = %self.name, command = %command, "command failed: unexpected response");
            }
        }

        if success {
            self.release_after(&command);
        }

        Ok(Some(CommandOutcome {
            command,
            reply,
            success,
        }))
    }

    fn release_after(&self, command: &str) {
        for switch in self.controls() {
            if !switch.kind().releases_on_ack() || switch.state() == SwitchState::Off {
                continue;
            }
            let commands = switch.commands();
            if commands.activate == command || commands.deactivate.as_deref() == Some(command) {
                switch.publish_state(SwitchState::Off);
            }
        }
    }

    fn lock_queue(&self) -> MutexGuard<'_, VecDeque<QueuedCommand>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Component for PowerDevice {
    fn component_name(&self) -> &str {
        &self.name
    }

    fn dump_config(&self) -> String {
        let kinds: Vec<&str> = self.controls().map(|switch| switch.kind().key()).collect();
        format!("PowerDevice '{}': controls [{}]", self.name, kinds.join(", "))
    }
}
