//! In-process audit log backed by a tokio broadcast channel.

use std::future::Future;

use tokio::sync::broadcast;

use deviceapi_domain::error::DeviceApiError;

use crate::ports::AuditPublisher;

/// In-process audit sink using a tokio [`broadcast`] channel.
///
/// Every message is also written to the `audit` tracing target. Publishing
/// succeeds even when there are no active subscribers.
pub struct InProcessAuditLog {
    sender: broadcast::Sender<String>,
}

impl InProcessAuditLog {
    /// Create a new audit log with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to messages published *after* this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.sender.subscribe()
    }
}

impl AuditPublisher for InProcessAuditLog {
    fn publish(&self, message: String) -> impl Future<Output = Result<(), DeviceApiError>> + Send {
        tracing::info!(target: "audit", "{message}");
        // Only fails with zero receivers.
        let _ = self.sender.send(message);
        async { Ok(()) }
    }
}
