//! Shared application state for axum handlers.

use std::sync::Arc;

use deviceapi_app::ports::{AuditPublisher, Store, TokenSigner};
use deviceapi_app::services::{AuthService, RecordService};
use deviceapi_domain::actuator::Actuator;
use deviceapi_domain::device::Device;
use deviceapi_domain::gateway::Gateway;
use deviceapi_domain::measurement::Measurement;
use deviceapi_domain::person::Person;
use deviceapi_domain::sensor::Sensor;

/// Application state shared across all axum handlers.
///
/// Every service shares one store and one audit sink. `Clone` only clones
/// the `Arc` handles, so the store and signer need not be `Clone` here.
pub struct AppState<S, A, K> {
    pub people: Arc<RecordService<Person, S, A>>,
    pub gateways: Arc<RecordService<Gateway, S, A>>,
    pub devices: Arc<RecordService<Device, S, A>>,
    pub actuators: Arc<RecordService<Actuator, S, A>>,
    pub sensors: Arc<RecordService<Sensor, S, A>>,
    pub measurements: Arc<RecordService<Measurement, S, A>>,
    pub auth: Arc<AuthService<S, A, K>>,
}

impl<S, A, K> Clone for AppState<S, A, K> {
    fn clone(&self) -> Self {
        Self {
            people: Arc::clone(&self.people),
            gateways: Arc::clone(&self.gateways),
            devices: Arc::clone(&self.devices),
            actuators: Arc::clone(&self.actuators),
            sensors: Arc::clone(&self.sensors),
            measurements: Arc::clone(&self.measurements),
            auth: Arc::clone(&self.auth),
        }
    }
}

impl<S, A, K> AppState<S, A, K>
where
    S: Store,
    A: AuditPublisher + Clone + 'static,
    K: TokenSigner + 'static,
{
    /// Build every service over one store and one audit sink.
    pub fn new(store: S, audit: A, signer: K, verify_password: bool) -> Self {
        Self {
            people: Arc::new(RecordService::new(store.clone(), audit.clone())),
            gateways: Arc::new(RecordService::new(store.clone(), audit.clone())),
            devices: Arc::new(RecordService::new(store.clone(), audit.clone())),
            actuators: Arc::new(RecordService::new(store.clone(), audit.clone())),
            sensors: Arc::new(RecordService::new(store.clone(), audit.clone())),
            measurements: Arc::new(RecordService::new(store.clone(), audit.clone())),
            auth: Arc::new(
                AuthService::new(store, audit, signer).verify_password(verify_password),
            ),
        }
    }
}
