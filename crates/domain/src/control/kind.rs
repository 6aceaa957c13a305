//! Control kind: the closed set of controls a power device exposes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the fixed controls exposed by the device.
///
/// Variant order is catalog order: binding and iteration always follow it,
/// whatever order the user declared controls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    Beeper,
    QuickTest,
    DeepTest,
    #[serde(rename = "ten_minutes_test")]
    TenMinuteTest,
    Shutdown,
    ShutdownRestore,
    CancelShutdown,
}

impl ControlKind {
    /// Number of kinds, and so of slots on a device handle.
    pub const COUNT: usize = 7;

    /// Every kind, in catalog order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Beeper,
        Self::QuickTest,
        Self::DeepTest,
        Self::TenMinuteTest,
        Self::Shutdown,
        Self::ShutdownRestore,
        Self::CancelShutdown,
    ];

    /// Position of this kind in [`ALL`](Self::ALL).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Configuration key naming this control (`quick_test`, `shutdown`, …).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Beeper => "beeper",
            Self::QuickTest => "quick_test",
            Self::DeepTest => "deep_test",
            Self::TenMinuteTest => "ten_minutes_test",
            Self::Shutdown => "shutdown",
            Self::ShutdownRestore => "shutdown_restore",
            Self::CancelShutdown => "cancel_shutdown",
        }
    }

    /// Human-readable name used when the declaration does not set one.
    #[must_use]
    pub const fn friendly_name(self) -> &'static str {
        match self {
            Self::Beeper => "Beeper",
            Self::QuickTest => "Quick Test",
            Self::DeepTest => "Deep Test",
            Self::TenMinuteTest => "Ten Minutes Test",
            Self::Shutdown => "Shutdown",
            Self::ShutdownRestore => "Shutdown Restore",
            Self::CancelShutdown => "Cancel Shutdown",
        }
    }

    /// Material Design icon for the control. Not user-settable.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Beeper => "mdi:power",
            Self::QuickTest | Self::DeepTest | Self::TenMinuteTest => "mdi:timer-outline",
            Self::Shutdown => "mdi:power-plug-off",
            Self::ShutdownRestore => "mdi:restart",
            Self::CancelShutdown => "mdi:cancel",
        }
    }

    /// Whether the control falls back to `Off` once the device acknowledges
    /// one of its commands.
    ///
    /// The beeper is a real toggle whose state follows the device status, so
    /// it is the only kind that does not.
    #[must_use]
    pub const fn releases_on_ack(self) -> bool {
        !matches!(self, Self::Beeper)
    }
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Returned when a string names no known control.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown control {0:?}")]
pub struct ParseControlKindError(pub String);

impl FromStr for ControlKind {
    type Err = ParseControlKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| ParseControlKindError(s.to_string()))
    }
}
