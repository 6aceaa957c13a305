//! Command validator: structural checks on activate-command overrides.
//!
//! Only the shutdown commands have a grammar. Every other command is an
//! opaque protocol token and passes as long as it is non-empty.

use crate::error::{CommandRule, ConfigurationError};

use super::{ControlKind, ControlOverride, catalog};

/// Check the activate command `declaration` resolves to for `kind`.
///
/// # Errors
///
/// Returns [`ConfigurationError`] naming `kind` and the literal command when
/// the resolved command breaks its kind's grammar.
pub fn validate(
    kind: ControlKind,
    declaration: &ControlOverride,
) -> Result<(), ConfigurationError> {
    let command = declaration
        .on_command
        .as_deref()
        .unwrap_or(catalog::defaults(kind).0);

    match rule_broken_by(kind, command) {
        None => Ok(()),
        Some(rule) => Err(ConfigurationError {
            kind,
            command: command.to_string(),
            rule,
        }),
    }
}

fn rule_broken_by(kind: ControlKind, command: &str) -> Option<CommandRule> {
    match kind {
        ControlKind::Shutdown if !is_shutdown_delay(command) => Some(CommandRule::ShutdownDelay),
        ControlKind::ShutdownRestore if !is_shutdown_restore(command) => {
            Some(CommandRule::ShutdownRestore)
        }
        _ if command.is_empty() => Some(CommandRule::NonEmpty),
        _ => None,
    }
}

/// `S` + exactly two ASCII digits.
fn is_shutdown_delay(command: &str) -> bool {
    match command.as_bytes() {
        [b'S', tens, units] => tens.is_ascii_digit() && units.is_ascii_digit(),
        _ => false,
    }
}

/// Starts with `S`, contains `R`, at least six characters.
///
/// The restore field width is deliberately not checked: `S05R30` passes.
fn is_shutdown_restore(command: &str) -> bool {
    command.starts_with('S') && command.contains('R') && command.chars().count() >= 6
}
