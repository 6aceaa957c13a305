//! Command catalog: the single source of default command strings.

use super::{CommandPair, ControlKind};

/// Default `(activate, deactivate)` strings for `kind`.
pub(crate) const fn defaults(kind: ControlKind) -> (&'static str, Option<&'static str>) {
    match kind {
        // The beeper toggles: the same command switches it either way.
        ControlKind::Beeper => ("Q", Some("Q")),
        ControlKind::QuickTest => ("T", Some("CT")),
        ControlKind::DeepTest => ("TL", Some("CT")),
        ControlKind::TenMinuteTest => ("T10", Some("CT")),
        ControlKind::Shutdown => ("S05", None),
        ControlKind::ShutdownRestore => ("S05R0030", None),
        ControlKind::CancelShutdown => ("C", None),
    }
}

/// Look up the default command pair for `kind`.
#[must_use]
pub fn lookup(kind: ControlKind) -> CommandPair {
    let (activate, deactivate) = defaults(kind);
    CommandPair::new(activate, deactivate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_toggle_beeper_with_same_command() {
        let pair = lookup(ControlKind::Beeper);
        assert_eq!(pair.activate, "Q");
        assert_eq!(pair.deactivate.as_deref(), Some("Q"));
    }

    #[test]
    fn should_cancel_every_battery_test_with_ct() {
        for (kind, activate) in [
            (ControlKind::QuickTest, "T"),
            (ControlKind::DeepTest, "TL"),
            (ControlKind::TenMinuteTest, "T10"),
        ] {
            let pair = lookup(kind);
            assert_eq!(pair.activate, activate);
            assert_eq!(pair.deactivate.as_deref(), Some("CT"));
        }
    }

    #[test]
    fn should_make_shutdown_controls_momentary() {
        assert_eq!(lookup(ControlKind::Shutdown), CommandPair::new("S05", None));
        assert_eq!(
            lookup(ControlKind::ShutdownRestore),
            CommandPair::new("S05R0030", None)
        );
        assert_eq!(lookup(ControlKind::CancelShutdown), CommandPair::new("C", None));
    }

    #[test]
    fn should_have_non_empty_default_for_every_kind() {
        for kind in ControlKind::ALL {
            assert!(!lookup(kind).activate.is_empty(), "{kind}");
        }
    }
}
