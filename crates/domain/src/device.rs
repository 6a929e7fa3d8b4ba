//! Device: a physical node attached to a gateway, exposing actuators and
//! sensors.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::gateway::Gateway;
use crate::id::{DeviceId, GatewayId};
use crate::record::{Owned, Record, RecordKind};
use crate::time::{Stamps, Timestamp};
use crate::validation::{Checks, Validate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    #[serde(rename = "dispositivo_id")]
    pub id: DeviceId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "localizacao")]
    pub location: String,
    #[serde(rename = "endereco")]
    pub address: String,
    pub gateway_id: Option<GatewayId>,
    #[serde(flatten)]
    pub stamps: Stamps,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceInput {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "localizacao")]
    pub location: String,
    #[serde(rename = "endereco")]
    pub address: String,
    pub gateway_id: Option<GatewayId>,
}

impl DeviceInput {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            address: address.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn owner(mut self, gateway_id: GatewayId) -> Self {
        self.gateway_id = Some(gateway_id);
        self
    }
}

impl Validate for DeviceInput {
    fn validate(&self) -> Result<(), ValidationError> {
        Checks::new()
            .not_blank("nome", &self.name, "device name must not be blank")
            .length(
                "nome",
                &self.name,
                (3, 100),
                "device name must be between 3 and 100 characters",
            )
            .not_blank(
                "localizacao",
                &self.location,
                "device location must not be blank",
            )
            .length(
                "localizacao",
                &self.location,
                (3, 200),
                "device location must be between 3 and 200 characters",
            )
            .not_blank("endereco", &self.address, "device address must not be blank")
            .length(
                "endereco",
                &self.address,
                (7, 15),
                "device address must be between 7 and 15 characters",
            )
            .finish()
    }
}

impl Record for Device {
    type Id = DeviceId;
    type Input = DeviceInput;
    const KIND: RecordKind = RecordKind::Device;

    fn from_input(input: DeviceInput, now: Timestamp) -> Self {
        Self {
            id: DeviceId::default(),
            name: input.name,
            description: input.description,
            location: input.location,
            address: input.address,
            gateway_id: input.gateway_id,
            stamps: Stamps::at(now),
        }
    }

    fn apply(&mut self, input: DeviceInput, now: Timestamp) {
        self.name = input.name;
        self.description = input.description;
        self.location = input.location;
        self.address = input.address;
        self.gateway_id = input.gateway_id;
        self.stamps.touch(now);
    }

    fn id(&self) -> DeviceId {
        self.id
    }

    fn assign_id(&mut self, id: DeviceId) {
        self.id = id;
    }

    fn stamps(&self) -> Stamps {
        self.stamps
    }

    fn label(input: &DeviceInput) -> String {
        format!("{} ({})", input.name, input.address)
    }
}

impl Owned for Device {
    type Owner = Gateway;

    fn owner_id(&self) -> Option<GatewayId> {
        self.gateway_id
    }
}
