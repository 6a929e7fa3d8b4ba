//! Measurement: a single sensor reading.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::{MeasurementId, SensorId};
use crate::record::{Owned, Record, RecordKind};
use crate::sensor::Sensor;
use crate::time::{Stamps, Timestamp};
use crate::validation::{Checks, Validate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    #[serde(rename = "medicao_id")]
    pub id: MeasurementId,
    #[serde(rename = "valor")]
    pub value: f64,
    /// When the reading was taken, as reported by the client.
    #[serde(rename = "data")]
    pub taken_at: Timestamp,
    pub sensor_id: Option<SensorId>,
    #[serde(flatten)]
    pub stamps: Stamps,
}

/// Input for creating or updating a [`Measurement`].
///
/// A missing `valor` reads as `0.0`; a missing `data` is a validation error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasurementInput {
    #[serde(rename = "valor")]
    pub value: f64,
    #[serde(rename = "data")]
    pub taken_at: Option<Timestamp>,
    pub sensor_id: Option<SensorId>,
}

impl MeasurementInput {
    #[must_use]
    pub fn new(value: f64, taken_at: Timestamp, sensor_id: Option<SensorId>) -> Self {
        Self {
            value,
            taken_at: Some(taken_at),
            sensor_id,
        }
    }
}

impl Validate for MeasurementInput {
    fn validate(&self) -> Result<(), ValidationError> {
        Checks::new()
            .present("data", self.taken_at.as_ref(), "reading date must not be null")
            .finish()
    }
}

impl Record for Measurement {
    type Id = MeasurementId;
    type Input = MeasurementInput;
    const KIND: RecordKind = RecordKind::Measurement;

    // `taken_at` is guaranteed by validation; `now` only covers unchecked callers.
    fn from_input(input: MeasurementInput, now: Timestamp) -> Self {
        Self {
            id: MeasurementId::default(),
            value: input.value,
            taken_at: input.taken_at.unwrap_or(now),
            sensor_id: input.sensor_id,
            stamps: Stamps::at(now),
        }
    }

    fn apply(&mut self, input: MeasurementInput, now: Timestamp) {
        self.value = input.value;
        if let Some(taken_at) = input.taken_at {
            self.taken_at = taken_at;
        }
        self.sensor_id = input.sensor_id;
        self.stamps.touch(now);
    }

    fn id(&self) -> MeasurementId {
        self.id
    }

    fn assign_id(&mut self, id: MeasurementId) {
        self.id = id;
    }

    fn stamps(&self) -> Stamps {
        self.stamps
    }

    fn label(input: &MeasurementInput) -> String {
        match input.taken_at {
            Some(taken_at) => format!("{} at {}", input.value, taken_at.to_rfc3339()),
            None => input.value.to_string(),
        }
    }
}

impl Owned for Measurement {
    type Owner = Sensor;

    fn owner_id(&self) -> Option<SensorId> {
        self.sensor_id
    }
}
