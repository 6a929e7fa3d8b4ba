//! # deviceapi-adapter-mqtt
//!
//! MQTT adapter — forwards audit messages to a broker.
//!
//! ## Responsibilities
//! - Connect to an MQTT broker and keep the connection alive in a background task
//! - Implement the `AuditPublisher` port by publishing each message, as
//!   plain UTF-8, to one fixed topic
//!
//! ## Dependency rule
//! Same as other adapters: depends on `deviceapi-app` and `deviceapi-domain`.

pub mod config;
pub mod error;
pub mod publisher;

pub use config::MqttConfig;
pub use publisher::MqttAuditPublisher;
