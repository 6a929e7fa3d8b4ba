//! # deviceapid — deviceapi daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (env vars, config file)
//! - Initialize the `SQLite` connection pool and run migrations
//! - Pick the audit sink (MQTT broker or in-process log)
//! - Construct application services over the store, audit sink and signer
//! - Build the axum router with the CORS policy
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod audit;
mod config;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use deviceapi_adapter_http_axum::state::AppState;
use deviceapi_adapter_mqtt::MqttAuditPublisher;
use deviceapi_adapter_storage_sqlite_sqlx::{Config as DbConfig, SqliteStore};
use deviceapi_adapter_token_hmac::HmacTokenSigner;
use deviceapi_app::audit_log::InProcessAuditLog;

use crate::audit::Audit;
use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Database
    let db = DbConfig {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await
    .context("initialising database")?;
    let store = SqliteStore::new(db.pool().clone());

    // Audit
    let (audit, broker_task) = if config.broker.enabled {
        let (publisher, task) = MqttAuditPublisher::connect(&config.broker);
        tracing::info!(topic = publisher.topic(), "publishing audit messages to broker");
        (Audit::Broker(publisher), Some(task))
    } else {
        tracing::info!("broker disabled, audit messages stay in-process");
        (Audit::Local(InProcessAuditLog::new(256)), None)
    };

    // HTTP
    let signer = HmacTokenSigner::new(config.auth.jwt_secret.as_bytes());
    let state = AppState::new(
        store,
        Arc::new(audit),
        signer,
        config.auth.verify_password,
    );
    let app = deviceapi_adapter_http_axum::router::build(state, config.cors.layer());

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;
    tracing::info!(%bind_addr, "deviceapid listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    if let Some(task) = broker_task {
        task.abort();
    }
    tracing::info!("deviceapid stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
