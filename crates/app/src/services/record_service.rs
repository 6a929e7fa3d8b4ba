//! Record service: the CRUD use-cases, written once for every record type.

use std::marker::PhantomData;

use deviceapi_domain::error::{DeviceApiError, NotFoundError};
use deviceapi_domain::record::{Owned, Record};
use deviceapi_domain::time::now;
use deviceapi_domain::validation::Validate;

use crate::ports::{AuditPublisher, OwnedRepository, Repository};

/// Application service for one record type.
///
/// Every create, update or delete attempt that gets past input validation
/// publishes exactly one audit message, whether it succeeds or not.
pub struct RecordService<T, S, A> {
    store: S,
    audit: A,
    _record: PhantomData<fn() -> T>,
}

impl<T, S, A> RecordService<T, S, A>
where
    T: Record,
    S: Repository<T>,
    A: AuditPublisher,
{
    /// Create a new service backed by the given store and audit sink.
    pub fn new(store: S, audit: A) -> Self {
        Self {
            store,
            audit,
            _record: PhantomData,
        }
    }

    /// Validate `input`, stamp it and persist it.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceApiError::Validation`] if the input is invalid, or a
    /// storage error propagated from the repository.
    pub async fn create(&self, input: T::Input) -> Result<T, DeviceApiError> {
        input.validate()?;
        let label = T::label(&input);

        match self.store.create(T::from_input(input, now())).await {
            Ok(created) => {
                tracing::info!(kind = T::KIND.noun(), id = %created.id(), "record created");
                self.notify(format!("{} created: {label}", T::KIND)).await;
                Ok(created)
            }
            Err(err) => {
                self.notify(format!("Failed to create {}: {err}", T::KIND.noun()))
                    .await;
                Err(err)
            }
        }
    }

    /// List every record of this type.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn get_all(&self) -> Result<Vec<T>, DeviceApiError> {
        self.store.get_all().await
    }

    /// Look up a record by id. A missing row is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn get_by_id(&self, id: T::Id) -> Result<Option<T>, DeviceApiError> {
        self.store.get_by_id(id).await
    }

    /// Overwrite the mutable fields of an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceApiError::NotFound`] when no record with `id` exists,
    /// [`DeviceApiError::Validation`] if the input is invalid, or a storage
    /// error from the repository.
    pub async fn update(&self, id: T::Id, input: T::Input) -> Result<T, DeviceApiError> {
        let result = self.try_update(id, input).await;
        match &result {
            Ok(updated) => {
                tracing::info!(kind = T::KIND.noun(), %id, "record updated");
                self.notify(format!(
                    "{} with ID {id} updated: {}",
                    T::KIND,
                    updated.label
                ))
                .await;
            }
            Err(DeviceApiError::Validation(_)) => {}
            Err(err) => {
                self.notify(format!("Failed to update {}: {err}", T::KIND.noun()))
                    .await;
            }
        }
        result.map(|updated| updated.record)
    }

    /// Delete a record and everything it owns.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceApiError::NotFound`] when no record with `id` exists,
    /// or a storage error from the repository.
    pub async fn delete(&self, id: T::Id) -> Result<(), DeviceApiError> {
        let result = match self.require(id).await {
            Ok(_) => self.store.delete(id).await,
            Err(err) => Err(err),
        };
        match &result {
            Ok(()) => {
                tracing::info!(kind = T::KIND.noun(), %id, "record removed");
                self.notify(format!("{} with ID {id} removed.", T::KIND))
                    .await;
            }
            Err(_) => {
                self.notify(format!("Failed to remove {} with ID {id}.", T::KIND.noun()))
                    .await;
            }
        }
        result
    }

    /// List the records of kind `C` owned by the record `id`.
    ///
    /// Returns `Ok(None)` when the parent itself does not exist.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_children<C>(&self, id: T::Id) -> Result<Option<Vec<C>>, DeviceApiError>
    where
        C: Owned<Owner = T>,
        S: OwnedRepository<C>,
    {
        if Repository::<T>::get_by_id(&self.store, id).await?.is_none() {
            return Ok(None);
        }
        let children = OwnedRepository::<C>::find_by_owner(&self.store, id).await?;
        Ok(Some(children))
    }

    async fn try_update(&self, id: T::Id, input: T::Input) -> Result<Updated<T>, DeviceApiError> {
        let mut record = self.require(id).await?;
        input.validate_update()?;
        let label = T::label(&input);
        record.apply(input, now());
        let record = self.store.update(record).await?;
        Ok(Updated { record, label })
    }

    async fn require(&self, id: T::Id) -> Result<T, DeviceApiError> {
        self.store.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: T::KIND.name(),
                id: id.to_string(),
            }
            .into()
        })
    }

    async fn notify(&self, message: String) {
        if let Err(err) = self.audit.publish(message).await {
            tracing::warn!(error = %err, "failed to publish audit message");
        }
    }
}

struct Updated<T> {
    record: T,
    label: String,
}
