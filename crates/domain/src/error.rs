//! Common error types used across the workspace.
//!
//! Each failure has its own typed error; [`PowerBindError`] gathers them via
//! `#[from]` so callers can propagate with `?`.

use std::fmt;

use crate::control::ControlKind;

/// Top-level error for binding and driving controls.
#[derive(Debug, thiserror::Error)]
pub enum PowerBindError {
    /// A declared command override failed its grammar check.
    #[error("configuration error")]
    Configuration(#[from] ConfigurationError),

    /// A control could not be attached to its device handle.
    #[error("binding error")]
    Binding(#[from] BindingError),

    /// The serial transport failed to deliver a command.
    #[error("transport error")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The device command queue was full; the control's command was dropped.
    #[error("command queue full, {0} command dropped")]
    QueueFull(ControlKind),

    /// The device handle a control points back to no longer exists.
    #[error("device handle dropped")]
    DeviceGone,
}

/// The grammar rule a command string violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandRule {
    /// Every resolved activate command must be non-empty.
    NonEmpty,
    /// `S` followed by exactly two decimal digits.
    ShutdownDelay,
    /// `S<n>R<m>`, at least six characters.
    ShutdownRestore,
}

impl fmt::Display for CommandRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonEmpty => f.write_str("command must not be empty"),
            Self::ShutdownDelay => f.write_str("command must be S + 2 digits (e.g. S05)"),
            Self::ShutdownRestore => f.write_str("command must be S<n>R<m> (e.g. S05R0030)"),
        }
    }
}

/// A declared command override was rejected at configuration-resolution time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {rule}, received: {command:?}")]
pub struct ConfigurationError {
    /// Control whose override was rejected.
    pub kind: ControlKind,
    /// The literal command string that failed.
    pub command: String,
    /// Which rule it broke.
    pub rule: CommandRule,
}

/// Failure attaching a control to a device handle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindingError {
    /// The device already has a control bound in this slot.
    #[error("{0} is already bound on this device")]
    SlotOccupied(ControlKind),
}
