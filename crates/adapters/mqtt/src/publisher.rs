//! Broker-backed implementation of [`AuditPublisher`].

use std::future::Future;
use std::time::Duration;

use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Packet, QoS};
use tokio::task::JoinHandle;

use deviceapi_app::ports::AuditPublisher;
use deviceapi_domain::error::DeviceApiError;

use crate::config::MqttConfig;
use crate::error::MqttError;

const RECONNECT_DELAY: Duration = Duration::from_secs(1);

/// Publishes audit messages at QoS 1 to a single topic.
///
/// Publishing only enqueues the message; the background task spawned by
/// [`MqttAuditPublisher::connect`] delivers it.
pub struct MqttAuditPublisher {
    client: AsyncClient,
    topic: String,
}

impl MqttAuditPublisher {
    /// Wrap an existing client.
    pub fn new(client: AsyncClient, topic: impl Into<String>) -> Self {
        Self {
            client,
            topic: topic.into(),
        }
    }

    /// Create a client for `config` and spawn the task driving its
    /// connection.
    #[must_use]
    pub fn connect(config: &MqttConfig) -> (Self, JoinHandle<()>) {
        let mut options = MqttOptions::new(
            config.client_id.clone(),
            config.broker_host.clone(),
            config.broker_port,
        );
        options.set_keep_alive(Duration::from_secs(u64::from(config.keep_alive_secs)));
        options.set_clean_session(true);

        let (client, eventloop) = AsyncClient::new(options, config.capacity);
        let handle = tokio::spawn(drive(eventloop));

        tracing::info!(
            host = %config.broker_host,
            port = config.broker_port,
            topic = %config.topic(),
            "audit messages go to MQTT broker"
        );
        (Self::new(client, config.topic()), handle)
    }

    /// Topic messages are published to.
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }
}

async fn drive(mut eventloop: EventLoop) {
    loop {
        match eventloop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(_))) => {
                tracing::info!("connected to MQTT broker");
            }
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(error = %err, "MQTT connection error");
                tokio::time::sleep(RECONNECT_DELAY).await;
            }
        }
    }
}

impl AuditPublisher for MqttAuditPublisher {
    fn publish(&self, message: String) -> impl Future<Output = Result<(), DeviceApiError>> + Send {
        let result = self
            .client
            .try_publish(self.topic.clone(), QoS::AtLeastOnce, false, message.into_bytes())
            .map_err(|err| MqttError::Client(err).into());
        async { result }
    }
}
