//! `SQLite` implementation of the storage ports, shared by every record type.

use std::future::Future;

use sqlx::SqlitePool;

use deviceapi_app::ports::{OwnedRepository, PersonDirectory, Repository};
use deviceapi_domain::error::DeviceApiError;
use deviceapi_domain::id::RecordId;
use deviceapi_domain::person::Person;
use deviceapi_domain::record::Record;

use crate::error::StorageError;
use crate::tables::{OwnedTable, Table, Wrapper};

/// `SQLite`-backed store for every record of the ownership tree.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Create a new store using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl<T: Table> Repository<T> for SqliteStore {
    fn create(&self, record: T) -> impl Future<Output = Result<T, DeviceApiError>> + Send {
        let pool = self.pool.clone();
        async move {
            let done = record
                .bind_columns(sqlx::query(T::INSERT))
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            let mut record = record;
            record.assign_id(T::Id::from_raw(done.last_insert_rowid()));
            Ok(record)
        }
    }

    fn get_by_id(&self, id: T::Id) -> impl Future<Output = Result<Option<T>, DeviceApiError>> + Send {
        let pool = self.pool.clone();
        async move {
            let sql = format!("SELECT * FROM {} WHERE id = ?", T::TABLE);
            let row: Option<Wrapper<T>> = sqlx::query_as(&sql)
                .bind(id.raw())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|w| w.0))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<T>, DeviceApiError>> + Send {
        let pool = self.pool.clone();
        async move {
            let sql = format!("SELECT * FROM {} ORDER BY id", T::TABLE);
            let rows: Vec<Wrapper<T>> = sqlx::query_as(&sql)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(&self, record: T) -> impl Future<Output = Result<T, DeviceApiError>> + Send {
        let pool = self.pool.clone();
        async move {
            record
                .bind_columns(sqlx::query(T::UPDATE))
                .bind(record.id().raw())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(record)
        }
    }

    fn delete(&self, id: T::Id) -> impl Future<Output = Result<(), DeviceApiError>> + Send {
        let pool = self.pool.clone();
        async move {
            let mut tx = pool.begin().await.map_err(StorageError::from)?;

            for statement in T::CASCADE.iter().copied() {
                sqlx::query(statement)
                    .bind(id.raw())
                    .execute(&mut *tx)
                    .await
                    .map_err(StorageError::from)?;
            }

            let sql = format!("DELETE FROM {} WHERE id = ?", T::TABLE);
            sqlx::query(&sql)
                .bind(id.raw())
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;

            tx.commit().await.map_err(StorageError::from)?;
            tracing::debug!(table = T::TABLE, %id, "row and descendants removed");
            Ok(())
        }
    }
}

impl<T: OwnedTable> OwnedRepository<T> for SqliteStore {
    fn find_by_owner(
        &self,
        owner: <T::Owner as Record>::Id,
    ) -> impl Future<Output = Result<Vec<T>, DeviceApiError>> + Send {
        let pool = self.pool.clone();
        async move {
            let sql = format!(
                "SELECT * FROM {} WHERE {} = ? ORDER BY id",
                T::TABLE,
                T::OWNER_COLUMN
            );
            let rows: Vec<Wrapper<T>> = sqlx::query_as(&sql)
                .bind(owner.raw())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }
}

impl PersonDirectory for SqliteStore {
    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<Person>, DeviceApiError>> + Send {
        let pool = self.pool.clone();
        let email = email.to_string();
        async move {
            let row: Option<Wrapper<Person>> = sqlx::query_as("SELECT * FROM people WHERE email = ?")
                .bind(email)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|w| w.0))
        }
    }
}
