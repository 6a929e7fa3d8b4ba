//! Storage port: repository traits for persistence.

use std::future::Future;

use deviceapi_domain::actuator::Actuator;
use deviceapi_domain::device::Device;
use deviceapi_domain::error::DeviceApiError;
use deviceapi_domain::gateway::Gateway;
use deviceapi_domain::measurement::Measurement;
use deviceapi_domain::person::Person;
use deviceapi_domain::record::{Owned, Record};
use deviceapi_domain::sensor::Sensor;

/// CRUD access to one record type.
///
/// Implementations report a missing row from [`Repository::get_by_id`] as
/// `Ok(None)`; every other failure is a [`DeviceApiError::Storage`].
pub trait Repository<T: Record>: Send + Sync {
    /// Insert a new record and return it with its store-assigned identifier.
    fn create(&self, record: T) -> impl Future<Output = Result<T, DeviceApiError>> + Send;

    fn get_by_id(
        &self,
        id: T::Id,
    ) -> impl Future<Output = Result<Option<T>, DeviceApiError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<T>, DeviceApiError>> + Send;

    /// Overwrite the stored row carrying the record's identifier.
    fn update(&self, record: T) -> impl Future<Output = Result<T, DeviceApiError>> + Send;

    /// Remove a row together with every record it transitively owns.
    fn delete(&self, id: T::Id) -> impl Future<Output = Result<(), DeviceApiError>> + Send;
}

/// Lookup of records by their parent.
pub trait OwnedRepository<T: Owned>: Repository<T> {
    fn find_by_owner(
        &self,
        owner: <T::Owner as Record>::Id,
    ) -> impl Future<Output = Result<Vec<T>, DeviceApiError>> + Send;
}

/// Person lookup used by authentication.
pub trait PersonDirectory: Send + Sync {
    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<Person>, DeviceApiError>> + Send;
}

/// Everything the HTTP surface needs from a single backing store.
pub trait Store:
    Repository<Person>
    + OwnedRepository<Gateway>
    + OwnedRepository<Device>
    + OwnedRepository<Actuator>
    + OwnedRepository<Sensor>
    + OwnedRepository<Measurement>
    + PersonDirectory
    + Clone
    + 'static
{
}

impl<S> Store for S where
    S: Repository<Person>
        + OwnedRepository<Gateway>
        + OwnedRepository<Device>
        + OwnedRepository<Actuator>
        + OwnedRepository<Sensor>
        + OwnedRepository<Measurement>
        + PersonDirectory
        + Clone
        + 'static
{
}
