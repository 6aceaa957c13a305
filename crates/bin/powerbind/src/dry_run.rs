//! Dry-run transport: answers like the device without touching a port.

use powerbind_app::ports::CommandTransport;
use powerbind_domain::error::PowerBindError;
use powerbind_domain::reply::{self, CommandReply};

/// Logs each command and replies the way a healthy device would: `ACK` for
/// control commands, silence for everything else.
#[derive(Debug, Default)]
pub struct DryRunTransport {
    sent: usize,
}

impl DryRunTransport {
    /// Number of commands written so far.
    #[must_use]
    pub fn sent(&self) -> usize {
        self.sent
    }
}

impl CommandTransport for DryRunTransport {
    fn send(&mut self, command: &str) -> Result<CommandReply, PowerBindError> {
        self.sent += 1;
        tracing::info!(command, "dry run: would write command");
        if reply::expects_ack(command) {
            Ok(CommandReply::Ack)
        } else {
            Ok(CommandReply::Silent)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_ack_control_commands() {
        let mut transport = DryRunTransport::default();
        assert_eq!(transport.send("S05").unwrap(), CommandReply::Ack);
        assert_eq!(transport.send("CT").unwrap(), CommandReply::Ack);
        assert_eq!(transport.sent(), 2);
    }

    #[test]
    fn should_stay_silent_for_other_commands() {
        let mut transport = DryRunTransport::default();
        assert_eq!(transport.send("PEQ").unwrap(), CommandReply::Silent);
    }
}
