//! MQTT adapter error types.

use deviceapi_domain::error::DeviceApiError;

/// Errors specific to the MQTT adapter.
#[derive(Debug, thiserror::Error)]
pub enum MqttError {
    /// The rumqttc client refused the request.
    #[error("MQTT client error: {0}")]
    Client(#[source] rumqttc::ClientError),
}

impl From<MqttError> for DeviceApiError {
    fn from(err: MqttError) -> Self {
        Self::Publish(Box::new(err))
    }
}
