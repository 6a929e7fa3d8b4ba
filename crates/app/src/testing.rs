//! In-memory port implementations shared by the service tests.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use deviceapi_domain::error::DeviceApiError;
use deviceapi_domain::gateway::Gateway;
use deviceapi_domain::id::{PersonId, RecordId};
use deviceapi_domain::person::Person;
use deviceapi_domain::record::{Owned, Record};

use crate::ports::{AuditPublisher, OwnedRepository, PersonDirectory, Repository};

/// People and gateways kept in ordered maps.
#[derive(Default)]
pub struct MemoryStore {
    people: Mutex<BTreeMap<i64, Person>>,
    gateways: Mutex<BTreeMap<i64, Gateway>>,
    next_id: AtomicI64,
    /// When set, every write fails with a storage error.
    pub fail_writes: AtomicBool,
}

impl MemoryStore {
    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn check_writable(&self) -> Result<(), DeviceApiError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DeviceApiError::Storage("UNIQUE constraint failed".into()));
        }
        Ok(())
    }

    pub fn gateway_count(&self) -> usize {
        self.gateways.lock().unwrap().len()
    }
}

macro_rules! memory_repository {
    ($record:ty, $field:ident) => {
        impl Repository<$record> for MemoryStore {
            fn create(
                &self,
                mut record: $record,
            ) -> impl Future<Output = Result<$record, DeviceApiError>> + Send {
                let result = self.check_writable().map(|()| {
                    record.assign_id(RecordId::from_raw(self.next_id()));
                    self.$field
                        .lock()
                        .unwrap()
                        .insert(record.id().raw(), record.clone());
                    record
                });
                async { result }
            }

            fn get_by_id(
                &self,
                id: <$record as Record>::Id,
            ) -> impl Future<Output = Result<Option<$record>, DeviceApiError>> + Send {
                let found = self.$field.lock().unwrap().get(&id.raw()).cloned();
                async { Ok(found) }
            }

            fn get_all(
                &self,
            ) -> impl Future<Output = Result<Vec<$record>, DeviceApiError>> + Send {
                let all: Vec<$record> = self.$field.lock().unwrap().values().cloned().collect();
                async { Ok(all) }
            }

            fn update(
                &self,
                record: $record,
            ) -> impl Future<Output = Result<$record, DeviceApiError>> + Send {
                let result = self.check_writable().map(|()| {
                    self.$field
                        .lock()
                        .unwrap()
                        .insert(record.id().raw(), record.clone());
                    record
                });
                async { result }
            }

            fn delete(
                &self,
                id: <$record as Record>::Id,
            ) -> impl Future<Output = Result<(), DeviceApiError>> + Send {
                let result = self.check_writable().map(|()| {
                    self.$field.lock().unwrap().remove(&id.raw());
                });
                async { result }
            }
        }
    };
}

memory_repository!(Person, people);
memory_repository!(Gateway, gateways);

impl OwnedRepository<Gateway> for MemoryStore {
    fn find_by_owner(
        &self,
        owner: PersonId,
    ) -> impl Future<Output = Result<Vec<Gateway>, DeviceApiError>> + Send {
        let found: Vec<Gateway> = self
            .gateways
            .lock()
            .unwrap()
            .values()
            .filter(|g| g.owner_id() == Some(owner))
            .cloned()
            .collect();
        async { Ok(found) }
    }
}

impl PersonDirectory for MemoryStore {
    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<Person>, DeviceApiError>> + Send {
        let found = self
            .people
            .lock()
            .unwrap()
            .values()
            .find(|p| p.email == email)
            .cloned();
        async { Ok(found) }
    }
}

/// Audit sink that always fails.
pub struct BrokenAudit;

impl AuditPublisher for BrokenAudit {
    fn publish(&self, _message: String) -> impl Future<Output = Result<(), DeviceApiError>> + Send {
        async { Err(DeviceApiError::Publish("broker unreachable".into())) }
    }
}

impl<T: Record> Repository<T> for Arc<MemoryStore>
where
    MemoryStore: Repository<T>,
{
    fn create(&self, record: T) -> impl Future<Output = Result<T, DeviceApiError>> + Send {
        Repository::<T>::create(&**self, record)
    }

    fn get_by_id(&self, id: T::Id) -> impl Future<Output = Result<Option<T>, DeviceApiError>> + Send {
        Repository::<T>::get_by_id(&**self, id)
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<T>, DeviceApiError>> + Send {
        Repository::<T>::get_all(&**self)
    }

    fn update(&self, record: T) -> impl Future<Output = Result<T, DeviceApiError>> + Send {
        Repository::<T>::update(&**self, record)
    }

    fn delete(&self, id: T::Id) -> impl Future<Output = Result<(), DeviceApiError>> + Send {
        Repository::<T>::delete(&**self, id)
    }
}

impl OwnedRepository<Gateway> for Arc<MemoryStore> {
    fn find_by_owner(
        &self,
        owner: PersonId,
    ) -> impl Future<Output = Result<Vec<Gateway>, DeviceApiError>> + Send {
        OwnedRepository::<Gateway>::find_by_owner(&**self, owner)
    }
}

impl PersonDirectory for Arc<MemoryStore> {
    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<Person>, DeviceApiError>> + Send {
        (**self).find_by_email(email)
    }
}
