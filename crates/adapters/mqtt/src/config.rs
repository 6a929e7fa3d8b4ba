//! MQTT broker configuration.

use serde::Deserialize;

/// Configuration for the audit broker connection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MqttConfig {
    /// Publish to the broker; when off, audit messages stay in-process.
    pub enabled: bool,
    /// MQTT broker hostname or IP address.
    pub broker_host: String,
    /// MQTT broker port.
    pub broker_port: u16,
    /// MQTT client identifier.
    pub client_id: String,
    /// First topic segment.
    pub exchange: String,
    /// Second topic segment.
    pub routing_key: String,
    /// Keep-alive interval in seconds.
    pub keep_alive_secs: u16,
    /// Messages buffered while the connection is down.
    pub capacity: usize,
}

impl MqttConfig {
    /// Topic every audit message is published to.
    #[must_use]
    pub fn topic(&self) -> String {
        format!("{}/{}", self.exchange, self.routing_key)
    }
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            broker_host: "localhost".to_string(),
            broker_port: 1883,
            client_id: "deviceapi".to_string(),
            exchange: "device-exchange".to_string(),
            routing_key: "device-routing-queue".to_string(),
            keep_alive_secs: 30,
            capacity: 64,
        }
    }
}
