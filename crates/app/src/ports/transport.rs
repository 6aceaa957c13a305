//! Transport port: delivery of command strings to the device.
//!
//! Framing, checksums and timeouts belong to the implementation. The core
//! hands over the bare command string and gets back the classified reply.

use powerbind_domain::error::PowerBindError;
use powerbind_domain::reply::CommandReply;

/// Sends one command and waits for the device's answer.
pub trait CommandTransport {
    /// Write `command` to the device and classify what came back.
    ///
    /// # Errors
    ///
    /// Returns [`PowerBindError::Transport`] when the command could not be
    /// written.
    fn send(&mut self, command: &str) -> Result<CommandReply, PowerBindError>;
}

impl<T: CommandTransport + ?Sized> CommandTransport for &mut T {
    fn send(&mut self, command: &str) -> Result<CommandReply, PowerBindError> {
        (**self).send(command)
    }
}
