//! Reply classification: how the device answers a command.
//!
//! Most control commands are answered with `ACK` or `NAK`. Anything else is
//! expected to get no answer at all.

/// What the device sent back after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandReply {
    Ack,
    Nak,
    /// Nothing arrived before the command timed out.
    Silent,
}

impl CommandReply {
    /// Classify a raw reply frame (terminator included or not).
    ///
    /// Any byte at all counts as an answer, a lone `\r` included. Only a
    /// frame starting with `NAK` is a refusal.
    #[must_use]
    pub fn parse(raw: &[u8]) -> Self {
        if raw.is_empty() {
            return Self::Silent;
        }
        let body = raw.strip_suffix(b"\r").unwrap_or(raw);
        if body.starts_with(b"NAK") {
            Self::Nak
        } else {
            Self::Ack
        }
    }
}

/// Whether the device answers `command` with `ACK`/`NAK`.
#[must_use]
pub fn expects_ack(command: &str) -> bool {
    matches!(command, "T" | "TL" | "T10" | "CT" | "Q" | "C" | "CL") || command.starts_with('S')
}

/// Whether `reply` means `command` was carried out.
#[must_use]
pub fn is_success(command: &str, reply: CommandReply) -> bool {
    if expects_ack(command) {
        reply == CommandReply::Ack
    } else {
        reply == CommandReply::Silent
    }
}
