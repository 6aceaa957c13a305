//! Command pair: the activate/deactivate strings bound to a control.

/// Commands sent when a control is switched on and off.
///
/// A missing `deactivate` marks a momentary control: it fires once and never
/// sends an "off" command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPair {
    pub activate: String,
    pub deactivate: Option<String>,
}

impl CommandPair {
    #[must_use]
    pub fn new(activate: impl Into<String>, deactivate: Option<&str>) -> Self {
        Self {
            activate: activate.into(),
            deactivate: deactivate.map(str::to_string),
        }
    }

    /// Whether the control has no "off" action.
    #[must_use]
    pub fn is_momentary(&self) -> bool {
        self.deactivate.is_none()
    }
}
