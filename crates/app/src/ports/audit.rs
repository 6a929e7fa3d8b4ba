//! Audit port: fire-and-forget notification of mutations and logins.

use std::future::Future;
use std::sync::Arc;

use deviceapi_domain::error::DeviceApiError;

/// Sends a free-text audit message to a single fixed destination.
pub trait AuditPublisher: Send + Sync {
    /// Publish one message.
    fn publish(&self, message: String) -> impl Future<Output = Result<(), DeviceApiError>> + Send;
}

impl<T: AuditPublisher> AuditPublisher for Arc<T> {
    fn publish(&self, message: String) -> impl Future<Output = Result<(), DeviceApiError>> + Send {
        (**self).publish(message)
    }
}
