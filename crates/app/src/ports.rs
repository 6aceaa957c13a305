//! Port definitions: traits that the host runtime and transports implement.
//!
//! Ports are the boundaries between the binding core and the outside world.

pub mod lifecycle;
pub mod transport;

pub use lifecycle::{Component, ComponentRegistry};
pub use transport::CommandTransport;
