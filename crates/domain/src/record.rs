//! Behaviour shared by the six persisted record types.
//!
//! Services, repositories and HTTP handlers are written once against
//! [`Record`] and [`Owned`] instead of once per record type.

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::id::RecordId;
use crate::time::{Stamps, Timestamp};
use crate::validation::Validate;

/// The record kinds of the ownership tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Person,
    Gateway,
    Device,
    Actuator,
    Sensor,
    Measurement,
}

impl RecordKind {
    /// Capitalised name used in messages (`Person`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Person => "Person",
            Self::Gateway => "Gateway",
            Self::Device => "Device",
            Self::Actuator => "Actuator",
            Self::Sensor => "Sensor",
            Self::Measurement => "Measurement",
        }
    }

    /// Lower-case name used inside sentences (`person`).
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Gateway => "gateway",
            Self::Device => "device",
            Self::Actuator => "actuator",
            Self::Sensor => "sensor",
            Self::Measurement => "measurement",
        }
    }

    /// Path segment of the HTTP resource.
    #[must_use]
    pub const fn resource(self) -> &'static str {
        match self {
            Self::Person => "pessoa",
            Self::Gateway => "gateway",
            Self::Device => "dispositivo",
            Self::Actuator => "atuador",
            Self::Sensor => "sensor",
            Self::Measurement => "medicao",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A persisted record with a store-assigned identifier and service-managed
/// timestamps.
pub trait Record: Clone + fmt::Debug + Serialize + Send + Sync + 'static {
    /// Typed identifier.
    type Id: RecordId;

    /// Transfer object accepted on create and update.
    type Input: Validate + DeserializeOwned + fmt::Debug + Send + Sync + 'static;

    /// Which node of the ownership tree this is.
    const KIND: RecordKind;

    /// Build an unsaved record from validated input, stamped at `now`.
    fn from_input(input: Self::Input, now: Timestamp) -> Self;

    /// Overwrite the mutable fields from `input` and restamp `updated_at`.
    /// Identifier and `created_at` are never touched.
    fn apply(&mut self, input: Self::Input, now: Timestamp);

    fn id(&self) -> Self::Id;

    /// Set the identifier handed out by the store.
    fn assign_id(&mut self, id: Self::Id);

    fn stamps(&self) -> Stamps;

    /// Short identifying description of an input, used in audit messages.
    fn label(input: &Self::Input) -> String;
}

/// A record that belongs to a parent record.
pub trait Owned: Record {
    /// The parent record type.
    type Owner: Record;

    /// Identifier of the parent, when one is set.
    fn owner_id(&self) -> Option<<Self::Owner as Record>::Id>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_kinds_to_resource_paths() {
        assert_eq!(RecordKind::Person.resource(), "pessoa");
        assert_eq!(RecordKind::Device.resource(), "dispositivo");
        assert_eq!(RecordKind::Actuator.resource(), "atuador");
        assert_eq!(RecordKind::Measurement.resource(), "medicao");
    }

    #[test]
    fn should_display_capitalised_name() {
        assert_eq!(RecordKind::Sensor.to_string(), "Sensor");
        assert_eq!(RecordKind::Sensor.noun(), "sensor");
    }
}
