//! Gateway: network bridge owned by a person, parent of devices.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::{GatewayId, PersonId};
use crate::person::Person;
use crate::record::{Owned, Record, RecordKind};
use crate::time::{Stamps, Timestamp};
use crate::validation::{Checks, Validate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gateway {
    #[serde(rename = "gateway_id")]
    pub id: GatewayId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: String,
    /// Network address, unique across gateways.
    #[serde(rename = "endereco")]
    pub address: String,
    #[serde(rename = "pessoa_id")]
    pub person_id: Option<PersonId>,
    #[serde(flatten)]
    pub stamps: Stamps,
}

/// Input for creating or updating a [`Gateway`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayInput {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "endereco")]
    pub address: String,
    #[serde(rename = "pessoa_id")]
    pub person_id: Option<PersonId>,
}

impl GatewayInput {
    #[must_use]
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
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
    pub fn owner(mut self, person_id: PersonId) -> Self {
        self.person_id = Some(person_id);
        self
    }
}

impl Validate for GatewayInput {
    fn validate(&self) -> Result<(), ValidationError> {
        Checks::new()
            .not_blank("nome", &self.name, "gateway name must not be blank")
            .length(
                "nome",
                &self.name,
                (3, 200),
                "gateway name must be between 3 and 200 characters",
            )
            .not_blank("endereco", &self.address, "gateway address must not be blank")
            .length(
                "endereco",
                &self.address,
                (7, 15),
                "gateway address must be between 7 and 15 characters",
            )
            .finish()
    }
}

impl Record for Gateway {
    type Id = GatewayId;
    type Input = GatewayInput;
    const KIND: RecordKind = RecordKind::Gateway;

    fn from_input(input: GatewayInput, now: Timestamp) -> Self {
        Self {
            id: GatewayId::default(),
            name: input.name,
            description: input.description,
            address: input.address,
            person_id: input.person_id,
            stamps: Stamps::at(now),
        }
    }

    /// The owning person is fixed at creation.
    fn apply(&mut self, input: GatewayInput, now: Timestamp) {
        self.name = input.name;
        self.description = input.description;
        self.address = input.address;
        self.stamps.touch(now);
    }

    fn id(&self) -> GatewayId {
        self.id
    }

    fn assign_id(&mut self, id: GatewayId) {
        self.id = id;
    }

    fn stamps(&self) -> Stamps {
        self.stamps
    }

    fn label(input: &GatewayInput) -> String {
        format!("{} ({})", input.name, input.address)
    }
}

impl Owned for Gateway {
    type Owner = Person;

    fn owner_id(&self) -> Option<PersonId> {
        self.person_id
    }
}
