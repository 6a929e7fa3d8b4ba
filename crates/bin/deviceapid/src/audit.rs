//! Audit sink selection.

use std::future::Future;

use deviceapi_adapter_mqtt::MqttAuditPublisher;
use deviceapi_app::audit_log::InProcessAuditLog;
use deviceapi_app::ports::AuditPublisher;
use deviceapi_domain::error::DeviceApiError;

/// The audit sink picked at startup.
pub enum Audit {
    /// Messages go to the MQTT broker.
    Broker(MqttAuditPublisher),
    /// Messages stay in-process and are only logged.
    Local(InProcessAuditLog),
}

impl AuditPublisher for Audit {
    fn publish(&self, message: String) -> impl Future<Output = Result<(), DeviceApiError>> + Send {
        async move {
            match self {
                Self::Broker(broker) => broker.publish(message).await,
                Self::Local(log) => log.publish(message).await,
            }
        }
    }
}
