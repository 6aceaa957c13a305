//! Controls: named on/off (or momentary) actions backed by device commands.
//!
//! A control is declared in configuration, its command override is checked
//! against the device grammar, and only then is it bound to a device handle.

mod catalog;
mod command;
mod declaration;
mod kind;
mod state;
mod validation;

pub use catalog::lookup;
pub use command::CommandPair;
pub use declaration::{ControlDeclaration, ControlOverride, DeclarationSet};
pub use kind::{ControlKind, ParseControlKindError};
pub use state::{StateChange, SwitchState};
pub use validation::validate;
