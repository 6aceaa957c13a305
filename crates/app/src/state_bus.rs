//! In-process state bus backed by a tokio broadcast channel.

use tokio::sync::broadcast;

use powerbind_domain::control::StateChange;

/// Fans out control state changes to any number of subscribers.
///
/// Publishing succeeds even when there are no active subscribers
/// (the change is simply dropped).
#[derive(Debug)]
pub struct StateBus {
    sender: broadcast::Sender<StateChange>,
}

impl StateBus {
    /// Create a new bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to state changes published *after* this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.sender.subscribe()
    }

    pub fn publish(&self, change: StateChange) {
        // send fails only when there are zero receivers
        let _ = self.sender.send(change);
    }
}
