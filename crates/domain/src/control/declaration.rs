//! Declarations: the controls a user asked for, with optional overrides.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::ConfigurationError;

use super::{CommandPair, ControlKind, ParseControlKindError, catalog, validation};

/// Per-control options a user may set in configuration.
///
/// Only the activate command is overridable. The deactivate command always
/// comes from the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControlOverride {
    /// Display name; defaults to the kind's friendly name.
    pub name: Option<String>,
    /// Replacement activate command.
    pub on_command: Option<String>,
}

/// One declared control, ready to be validated and bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlDeclaration {
    pub kind: ControlKind,
    pub activate_override: Option<String>,
    pub name: Option<String>,
}

impl ControlDeclaration {
    /// Declare `kind` with catalog defaults.
    #[must_use]
    pub fn new(kind: ControlKind) -> Self {
        Self {
            kind,
            activate_override: None,
            name: None,
        }
    }

    /// Replace the activate command.
    #[must_use]
    pub fn with_activate(mut self, command: impl Into<String>) -> Self {
        self.activate_override = Some(command.into());
        self
    }

    /// Icon for the control; always derived from the kind.
    #[must_use]
    pub fn icon(&self) -> &'static str {
        self.kind.icon()
    }

    /// Name shown to the host runtime.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.kind.friendly_name())
    }

    /// Resolve the commands to bind: the override (if any) for activate, the
    /// catalog default for deactivate.
    #[must_use]
    pub fn resolved_commands(&self) -> CommandPair {
        let (default_on, default_off) = catalog::defaults(self.kind);
        CommandPair::new(
            self.activate_override.as_deref().unwrap_or(default_on),
            default_off,
        )
    }

    /// Check the resolved activate command against the kind's grammar.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] for a malformed override.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        validation::validate(self.kind, &self.as_override())
    }

    fn as_override(&self) -> ControlOverride {
        ControlOverride {
            name: self.name.clone(),
            on_command: self.activate_override.clone(),
        }
    }
}

/// The set of declared controls for one device, at most one per kind.
///
/// Iteration follows catalog order, not insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BTreeMap<String, ControlOverride>")]
pub struct DeclarationSet {
    controls: BTreeMap<ControlKind, ControlOverride>,
}

impl DeclarationSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a control, returning the options it replaced if `kind` was
    /// already declared.
    pub fn insert(&mut self, declaration: ControlDeclaration) -> Option<ControlOverride> {
        let options = declaration.as_override();
        self.controls.insert(declaration.kind, options)
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, declaration: ControlDeclaration) -> Self {
        self.insert(declaration);
        self
    }

    #[must_use]
    pub fn contains(&self, kind: ControlKind) -> bool {
        self.controls.contains_key(&kind)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Declared kinds, in catalog order.
    pub fn kinds(&self) -> impl Iterator<Item = ControlKind> + '_ {
        self.controls.keys().copied()
    }

    /// Declarations, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = ControlDeclaration> + '_ {
        self.controls.iter().map(|(kind, options)| ControlDeclaration {
            kind: *kind,
            activate_override: options.on_command.clone(),
            name: options.name.clone(),
        })
    }

    /// Validate every declaration, stopping at the first failure in catalog
    /// order.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigurationError`] found.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.controls
            .iter()
            .try_for_each(|(kind, options)| validation::validate(*kind, options))
    }
}

impl FromIterator<ControlDeclaration> for DeclarationSet {
    fn from_iter<I: IntoIterator<Item = ControlDeclaration>>(iter: I) -> Self {
        let mut set = Self::new();
        for declaration in iter {
            set.insert(declaration);
        }
        set
    }
}

impl TryFrom<BTreeMap<String, ControlOverride>> for DeclarationSet {
    type Error = ParseControlKindError;

    fn try_from(raw: BTreeMap<String, ControlOverride>) -> Result<Self, Self::Error> {
        let controls = raw
            .into_iter()
            .map(|(key, options)| Ok((key.parse::<ControlKind>()?, options)))
            .collect::<Result<_, Self::Error>>()?;
        Ok(Self { controls })
    }
}
