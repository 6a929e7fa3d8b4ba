//! Actuator: a controllable output of a device.

use serde::{Deserialize, Serialize};

use crate::device::Device;
use crate::error::ValidationError;
use crate::id::{ActuatorId, DeviceId};
use crate::record::{Owned, Record, RecordKind};
use crate::time::{Stamps, Timestamp};
use crate::validation::{Checks, Validate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actuator {
    #[serde(rename = "atuador_id")]
    pub id: ActuatorId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "dispositivo_id")]
    pub device_id: Option<DeviceId>,
    #[serde(flatten)]
    pub stamps: Stamps,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActuatorInput {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "dispositivo_id")]
    pub device_id: Option<DeviceId>,
}

impl ActuatorInput {
    #[must_use]
    pub fn new(name: impl Into<String>, device_id: Option<DeviceId>) -> Self {
        Self {
            name: name.into(),
            device_id,
        }
    }
}

impl Validate for ActuatorInput {
    fn validate(&self) -> Result<(), ValidationError> {
        Checks::new()
            .not_blank("nome", &self.name, "actuator name must not be blank")
            .finish()
    }
}

impl Record for Actuator {
    type Id = ActuatorId;
    type Input = ActuatorInput;
    const KIND: RecordKind = RecordKind::Actuator;

    fn from_input(input: ActuatorInput, now: Timestamp) -> Self {
        Self {
            id: ActuatorId::default(),
            name: input.name,
            device_id: input.device_id,
            stamps: Stamps::at(now),
        }
    }

    fn apply(&mut self, input: ActuatorInput, now: Timestamp) {
        self.name = input.name;
        self.device_id = input.device_id;
        self.stamps.touch(now);
    }

    fn id(&self) -> ActuatorId {
        self.id
    }

    fn assign_id(&mut self, id: ActuatorId) {
        self.id = id;
    }

    fn stamps(&self) -> Stamps {
        self.stamps
    }

    fn label(input: &ActuatorInput) -> String {
        input.name.clone()
    }
}

impl Owned for Actuator {
    type Owner = Device;

    fn owner_id(&self) -> Option<DeviceId> {
        self.device_id
    }
}
