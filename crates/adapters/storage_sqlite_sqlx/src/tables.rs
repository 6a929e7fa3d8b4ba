//! Row mapping for every record type.
//!
//! Each record describes its table, its insert/update statements and the
//! statements that clear its descendants; [`crate::store::SqliteStore`] does
//! the rest generically.

use chrono::Utc;
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{FromRow, Row, Sqlite};

use deviceapi_domain::actuator::Actuator;
use deviceapi_domain::device::Device;
use deviceapi_domain::gateway::Gateway;
use deviceapi_domain::id::RecordId;
use deviceapi_domain::measurement::Measurement;
use deviceapi_domain::person::Person;
use deviceapi_domain::record::{Owned, Record};
use deviceapi_domain::sensor::Sensor;
use deviceapi_domain::time::{Stamps, Timestamp};

/// A query whose arguments are all owned.
pub type SqliteQuery = Query<'static, Sqlite, SqliteArguments<'static>>;

/// How a record maps onto its table.
pub trait Table: Record + Unpin {
    /// Table name; the primary key column is always `id`.
    const TABLE: &'static str;

    /// Insert statement taking the columns bound by [`Table::bind_columns`].
    const INSERT: &'static str;

    /// Update statement taking the same columns followed by the `id`.
    const UPDATE: &'static str;

    /// Statements removing every descendant, leaf first. Each takes the
    /// record's `id` as its single parameter.
    const CASCADE: &'static [&'static str];

    /// Bind every non-key column, in statement order.
    fn bind_columns(&self, query: SqliteQuery) -> SqliteQuery;

    /// Build a record from a full row.
    ///
    /// # Errors
    ///
    /// Returns a decode error when a column is missing or malformed.
    fn decode(row: &SqliteRow) -> Result<Self, sqlx::Error>;
}

/// A table holding a reference to its owner.
pub trait OwnedTable: Table + Owned {
    /// Column holding the owner's `id`.
    const OWNER_COLUMN: &'static str;
}

/// Wrapper for converting database rows into domain records.
pub(crate) struct Wrapper<T>(pub T);

impl<'r, T: Table> FromRow<'r, SqliteRow> for Wrapper<T> {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        T::decode(row).map(Self)
    }
}

fn bind_stamps(query: SqliteQuery, stamps: Stamps) -> SqliteQuery {
    query
        .bind(stamps.created_at.to_rfc3339())
        .bind(stamps.updated_at.to_rfc3339())
}

fn timestamp(row: &SqliteRow, column: &str) -> Result<Timestamp, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    chrono::DateTime::parse_from_rfc3339(&raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

fn stamps(row: &SqliteRow) -> Result<Stamps, sqlx::Error> {
    Ok(Stamps {
        created_at: timestamp(row, "created_at")?,
        updated_at: timestamp(row, "updated_at")?,
    })
}

fn id<I: RecordId>(row: &SqliteRow) -> Result<I, sqlx::Error> {
    row.try_get("id").map(I::from_raw)
}

fn owner<I: RecordId>(row: &SqliteRow, column: &str) -> Result<Option<I>, sqlx::Error> {
    let raw: Option<i64> = row.try_get(column)?;
    Ok(raw.map(I::from_raw))
}

fn raw<I: RecordId>(id: Option<I>) -> Option<i64> {
    id.map(RecordId::raw)
}

impl Table for Person {
    const TABLE: &'static str = "people";
    const INSERT: &'static str = "INSERT INTO people (name, email, password, created_at, updated_at) VALUES (?, ?, ?, ?, ?)";
    const UPDATE: &'static str = "UPDATE people SET name = ?, email = ?, password = ?, created_at = ?, updated_at = ? WHERE id = ?";
    const CASCADE: &'static [&'static str] = &[
        "DELETE FROM measurements WHERE sensor_id IN (
            SELECT s.id FROM sensors s
            JOIN devices d ON s.device_id = d.id
            JOIN gateways g ON d.gateway_id = g.id
            WHERE g.person_id = ?)",
        "DELETE FROM actuators WHERE device_id IN (
            SELECT d.id FROM devices d
            JOIN gateways g ON d.gateway_id = g.id
            WHERE g.person_id = ?)",
        "DELETE FROM sensors WHERE device_id IN (
            SELECT d.id FROM devices d
            JOIN gateways g ON d.gateway_id = g.id
            WHERE g.person_id = ?)",
        "DELETE FROM devices WHERE gateway_id IN (SELECT id FROM gateways WHERE person_id = ?)",
        "DELETE FROM gateways WHERE person_id = ?",
    ];

    fn bind_columns(&self, query: SqliteQuery) -> SqliteQuery {
        let query = query
            .bind(self.name.clone())
            .bind(self.email.clone())
            .bind(self.password.clone());
        bind_stamps(query, self.stamps)
    }

    fn decode(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: id(row)?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            password: row.try_get("password")?,
            stamps: stamps(row)?,
        })
    }
}

impl Table for Gateway {
    const TABLE: &'static str = "gateways";
    const INSERT: &'static str = "INSERT INTO gateways (name, description, address, person_id, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)";
    const UPDATE: &'static str = "UPDATE gateways SET name = ?, description = ?, address = ?, person_id = ?, created_at = ?, updated_at = ? WHERE id = ?";
    const CASCADE: &'static [&'static str] = &[
        "DELETE FROM measurements WHERE sensor_id IN (
            SELECT s.id FROM sensors s
            JOIN devices d ON s.device_id = d.id
            WHERE d.gateway_id = ?)",
        "DELETE FROM actuators WHERE device_id IN (SELECT id FROM devices WHERE gateway_id = ?)",
        "DELETE FROM sensors WHERE device_id IN (SELECT id FROM devices WHERE gateway_id = ?)",
        "DELETE FROM devices WHERE gateway_id = ?",
    ];

    fn bind_columns(&self, query: SqliteQuery) -> SqliteQuery {
        let query = query
            .bind(self.name.clone())
            .bind(self.description.clone())
            .bind(self.address.clone())
            .bind(raw(self.person_id));
        bind_stamps(query, self.stamps)
    }

    fn decode(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: id(row)?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            address: row.try_get("address")?,
            person_id: owner(row, "person_id")?,
            stamps: stamps(row)?,
        })
    }
}

impl OwnedTable for Gateway {
    const OWNER_COLUMN: &'static str = "person_id";
}

impl Table for Device {
    const TABLE: &'static str = "devices";
    const INSERT: &'static str = "INSERT INTO devices (name, description, location, address, gateway_id, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?)";
    const UPDATE: &'static str = "UPDATE devices SET name = ?, description = ?, location = ?, address = ?, gateway_id = ?, created_at = ?, updated_at = ? WHERE id = ?";
    const CASCADE: &'static [&'static str] = &[
        "DELETE FROM measurements WHERE sensor_id IN (SELECT id FROM sensors WHERE device_id = ?)",
        "DELETE FROM actuators WHERE device_id = ?",
        "DELETE FROM sensors WHERE device_id = ?",
    ];

    fn bind_columns(&self, query: SqliteQuery) -> SqliteQuery {
        let query = query
            .bind(self.name.clone())
            .bind(self.description.clone())
            .bind(self.location.clone())
            .bind(self.address.clone())
            .bind(raw(self.gateway_id));
        bind_stamps(query, self.stamps)
    }

    fn decode(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: id(row)?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            location: row.try_get("location")?,
            address: row.try_get("address")?,
            gateway_id: owner(row, "gateway_id")?,
            stamps: stamps(row)?,
        })
    }
}

impl OwnedTable for Device {
    const OWNER_COLUMN: &'static str = "gateway_id";
}

impl Table for Actuator {
    const TABLE: &'static str = "actuators";
    const INSERT: &'static str =
        "INSERT INTO actuators (name, device_id, created_at, updated_at) VALUES (?, ?, ?, ?)";
    const UPDATE: &'static str = "UPDATE actuators SET name = ?, device_id = ?, created_at = ?, updated_at = ? WHERE id = ?";
    const CASCADE: &'static [&'static str] = &[];

    fn bind_columns(&self, query: SqliteQuery) -> SqliteQuery {
        let query = query.bind(self.name.clone()).bind(raw(self.device_id));
        bind_stamps(query, self.stamps)
    }

    fn decode(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: id(row)?,
            name: row.try_get("name")?,
            device_id: owner(row, "device_id")?,
            stamps: stamps(row)?,
        })
    }
}

impl OwnedTable for Actuator {
    const OWNER_COLUMN: &'static str = "device_id";
}

impl Table for Sensor {
    const TABLE: &'static str = "sensors";
    const INSERT: &'static str = "INSERT INTO sensors (name, kind, device_id, created_at, updated_at) VALUES (?, ?, ?, ?, ?)";
    const UPDATE: &'static str = "UPDATE sensors SET name = ?, kind = ?, device_id = ?, created_at = ?, updated_at = ? WHERE id = ?";
    const CASCADE: &'static [&'static str] = &["DELETE FROM measurements WHERE sensor_id = ?"];

    fn bind_columns(&self, query: SqliteQuery) -> SqliteQuery {
        let query = query
            .bind(self.name.clone())
            .bind(self.kind.clone())
            .bind(raw(self.device_id));
        bind_stamps(query, self.stamps)
    }

    fn decode(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: id(row)?,
            name: row.try_get("name")?,
            kind: row.try_get("kind")?,
            device_id: owner(row, "device_id")?,
            stamps: stamps(row)?,
        })
    }
}

impl OwnedTable for Sensor {
    const OWNER_COLUMN: &'static str = "device_id";
}

impl Table for Measurement {
    const TABLE: &'static str = "measurements";
    const INSERT: &'static str = "INSERT INTO measurements (value, taken_at, sensor_id, created_at, updated_at) VALUES (?, ?, ?, ?, ?)";
    const UPDATE: &'static str = "UPDATE measurements SET value = ?, taken_at = ?, sensor_id = ?, created_at = ?, updated_at = ? WHERE id = ?";
    const CASCADE: &'static [&'static str] = &[];

    fn bind_columns(&self, query: SqliteQuery) -> SqliteQuery {
        let query = query
            .bind(self.value)
            .bind(self.taken_at.to_rfc3339())
            .bind(raw(self.sensor_id));
        bind_stamps(query, self.stamps)
    }

    fn decode(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: id(row)?,
            value: row.try_get("value")?,
            taken_at: timestamp(row, "taken_at")?,
            sensor_id: owner(row, "sensor_id")?,
            stamps: stamps(row)?,
        })
    }
}

impl OwnedTable for Measurement {
    const OWNER_COLUMN: &'static str = "sensor_id";
}
