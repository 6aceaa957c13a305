//! # powerbind-app
//!
//! Application layer: binding and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** the host runtime and transports implement:
//!   - `ComponentRegistry`: hand-off to the host's component lifecycle
//!   - `CommandTransport`: delivery of command strings to the serial device
//! - Provide the **device handle** (`PowerDevice`) with one slot per control
//!   kind and a bounded command queue
//! - Provide the **control object** (`ControlSwitch`) that turns on/off
//!   requests into queued commands
//! - Provide the **binder** that validates a declaration set and binds it to
//!   a device exactly once per kind, all or nothing
//! - Provide **in-process infrastructure** (state bus, component list) that
//!   doesn't need IO
//!
//! ## Dependency rule
//! Depends on `powerbind-domain` only (plus `tokio::sync` for channels).
//! Never imports transport crates. Transports depend on *this* crate, not the
//! reverse.

pub mod binder;
pub mod device;
pub mod ports;
pub mod registry;
pub mod state_bus;
pub mod switch;
