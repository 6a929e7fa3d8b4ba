//! Sensor: a measuring input of a device, parent of measurements.

use serde::{Deserialize, Serialize};

use crate::device::Device;
use crate::error::ValidationError;
use crate::id::{DeviceId, SensorId};
use crate::record::{Owned, Record, RecordKind};
use crate::time::{Stamps, Timestamp};
use crate::validation::{Checks, Validate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    #[serde(rename = "sensor_id")]
    pub id: SensorId,
    #[serde(rename = "nome")]
    pub name: String,
    /// Free-form sensor type (`temperature`, `humidity`, …).
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "dispositivo_id")]
    pub device_id: Option<DeviceId>,
    #[serde(flatten)]
    pub stamps: Stamps,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorInput {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "dispositivo_id")]
    pub device_id: Option<DeviceId>,
}

impl SensorInput {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<String>,
        device_id: Option<DeviceId>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            device_id,
        }
    }
}

impl Validate for SensorInput {
    fn validate(&self) -> Result<(), ValidationError> {
        Checks::new()
            .not_blank("nome", &self.name, "sensor name must not be blank")
            .length(
                "nome",
                &self.name,
                (3, 50),
                "sensor name must be between 3 and 50 characters",
            )
            .not_blank("tipo", &self.kind, "sensor type must not be blank")
            .length(
                "tipo",
                &self.kind,
                (3, 30),
                "sensor type must be between 3 and 30 characters",
            )
            .finish()
    }
}

impl Record for Sensor {
    type Id = SensorId;
    type Input = SensorInput;
    const KIND: RecordKind = RecordKind::Sensor;

    fn from_input(input: SensorInput, now: Timestamp) -> Self {
        Self {
            id: SensorId::default(),
            name: input.name,
            kind: input.kind,
            device_id: input.device_id,
            stamps: Stamps::at(now),
        }
    }

    fn apply(&mut self, input: SensorInput, now: Timestamp) {
        self.name = input.name;
        self.kind = input.kind;
        self.device_id = input.device_id;
        self.stamps.touch(now);
    }

    fn id(&self) -> SensorId {
        self.id
    }

    fn assign_id(&mut self, id: SensorId) {
        self.id = id;
    }

    fn stamps(&self) -> Stamps {
        self.stamps
    }

    fn label(input: &SensorInput) -> String {
        input.name.clone()
    }
}

impl Owned for Sensor {
    type Owner = Device;

    fn owner_id(&self) -> Option<DeviceId> {
        self.device_id
    }
}
