//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod auth;
#[allow(clippy::missing_errors_doc)]
pub mod records;

use axum::Router;
use axum::routing::{get, post};

use deviceapi_app::ports::{AuditPublisher, Repository, Store, TokenSigner};
use deviceapi_domain::actuator::Actuator;
use deviceapi_domain::device::Device;
use deviceapi_domain::gateway::Gateway;
use deviceapi_domain::measurement::Measurement;
use deviceapi_domain::person::Person;
use deviceapi_domain::sensor::Sensor;

use self::records::Resource;
use crate::state::AppState;

/// Build the API router: one resource per record, the child listings and
/// the login endpoint.
pub fn routes<S, A, K>() -> Router<AppState<S, A, K>>
where
    S: Store,
    A: AuditPublisher + 'static,
    K: TokenSigner + 'static,
{
    Router::new()
        .merge(resource::<Person, S, A, K>())
        .merge(resource::<Gateway, S, A, K>())
        .merge(resource::<Device, S, A, K>())
        .merge(resource::<Actuator, S, A, K>())
        .merge(resource::<Sensor, S, A, K>())
        .merge(resource::<Measurement, S, A, K>())
        // Children
        .route(
            "/pessoa/{id}/gateways",
            get(records::children::<Person, Gateway, S, A, K>),
        )
        .route(
            "/gateway/{id}/dispositivos",
            get(records::children::<Gateway, Device, S, A, K>),
        )
        .route(
            "/dispositivo/{id}/atuadores",
            get(records::children::<Device, Actuator, S, A, K>),
        )
        .route(
            "/dispositivo/{id}/sensores",
            get(records::children::<Device, Sensor, S, A, K>),
        )
        .route(
            "/sensor/{id}/medicoes",
            get(records::children::<Sensor, Measurement, S, A, K>),
        )
        // Authentication
        .route("/auth", post(auth::login::<S, A, K>))
}

/// The five CRUD routes of one record under `/<resource>`.
fn resource<T, S, A, K>() -> Router<AppState<S, A, K>>
where
    T: Resource,
    S: Repository<T> + Clone + 'static,
    A: AuditPublisher + 'static,
    K: TokenSigner + 'static,
{
    let collection = format!("/{}", T::KIND.resource());
    let item = format!("{collection}/{{id}}");

    Router::new()
        .route(
            &collection,
            get(records::list::<T, S, A, K>).post(records::create::<T, S, A, K>),
        )
        .route(
            &item,
            get(records::get::<T, S, A, K>)
                .put(records::update::<T, S, A, K>)
                .delete(records::delete::<T, S, A, K>),
        )
}
