//! Person: root of the ownership tree and the authentication principal.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::PersonId;
use crate::record::{Record, RecordKind};
use crate::time::{Stamps, Timestamp};
use crate::validation::{Checks, Validate};

/// A registered user owning gateways.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    #[serde(rename = "pessoa_id")]
    pub id: PersonId,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    /// Stored credential. Never serialised in responses.
    #[serde(skip)]
    pub password: String,
    #[serde(flatten)]
    pub stamps: Stamps,
}

/// Input for creating or updating a [`Person`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonInput {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "senha")]
    pub password: String,
}

impl PersonInput {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

impl PersonInput {
    fn identity_checks(&self) -> Checks {
        Checks::new()
            .not_blank("nome", &self.name, "name must not be blank")
            .length(
                "nome",
                &self.name,
                (1, 100),
                "name must be at most 100 characters",
            )
            .not_blank("email", &self.email, "email must not be blank")
            .email("email", &self.email, "email is not a valid address")
    }
}

impl Validate for PersonInput {
    fn validate(&self) -> Result<(), ValidationError> {
        self.identity_checks()
            .not_blank("senha", &self.password, "password must not be blank")
            .length(
                "senha",
                &self.password,
                (8, 30),
                "password must be between 8 and 30 characters",
            )
            .finish()
    }

    /// Updates never change the password, so `senha` is not checked.
    fn validate_update(&self) -> Result<(), ValidationError> {
        self.identity_checks().finish()
    }
}

impl Record for Person {
    type Id = PersonId;
    type Input = PersonInput;
    const KIND: RecordKind = RecordKind::Person;

    fn from_input(input: PersonInput, now: Timestamp) -> Self {
        Self {
            id: PersonId::default(),
            name: input.name,
            email: input.email,
            password: input.password,
            stamps: Stamps::at(now),
        }
    }

    /// The password is deliberately left unchanged by updates.
    fn apply(&mut self, input: PersonInput, now: Timestamp) {
        self.name = input.name;
        self.email = input.email;
        self.stamps.touch(now);
    }

    fn id(&self) -> PersonId {
        self.id
    }

    fn assign_id(&mut self, id: PersonId) {
        self.id = id;
    }

    fn stamps(&self) -> Stamps {
        self.stamps
    }

    fn label(input: &PersonInput) -> String {
        format!("{} ({})", input.name, input.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::RecordId;
    use crate::time::now;
    use chrono::TimeDelta;

    fn valid_input() -> PersonInput {
        PersonInput::new("Alice", "alice@example.com", "12345678")
    }

    #[test]
    fn should_accept_valid_input() {
        assert!(valid_input().validate().is_ok());
    }

    #[test]
    fn should_reject_short_password_and_bad_email() {
        let input = PersonInput::new("Alice", "not-an-email", "123");
        let err = input.validate().unwrap_err();
        assert!(err.has_field("email"));
        assert!(err.has_field("senha"));
        assert!(!err.has_field("nome"));
    }

    #[test]
    fn should_reject_missing_fields_when_deserialized_from_empty_object() {
        let input: PersonInput = serde_json::from_str("{}").unwrap();
        let err = input.validate().unwrap_err();
        assert!(err.has_field("nome"));
        assert!(err.has_field("email"));
        assert!(err.has_field("senha"));
    }

    #[test]
    fn should_ignore_password_when_validating_update() {
        let input: PersonInput =
            serde_json::from_str(r#"{"nome":"Ana Maria","email":"ana@example.com"}"#).unwrap();
        assert!(input.validate_update().is_ok());
        assert!(input.validate().unwrap_err().has_field("senha"));
    }

    #[test]
    fn should_still_check_identity_fields_on_update() {
        let input = PersonInput::new("", "nope", "");
        let err = input.validate_update().unwrap_err();
        assert!(err.has_field("nome"));
        assert!(err.has_field("email"));
        assert!(!err.has_field("senha"));
    }

    #[test]
    fn should_build_unsaved_record_with_equal_stamps() {
        let ts = now();
        let person = Person::from_input(valid_input(), ts);
        assert!(!person.id.is_assigned());
        assert_eq!(person.stamps.created_at, ts);
        assert_eq!(person.stamps.updated_at, ts);
    }

    #[test]
    fn should_keep_password_and_created_at_on_apply() {
        let created = now();
        let mut person = Person::from_input(valid_input(), created);
        let later = created + TimeDelta::seconds(1);

        person.apply(PersonInput::new("Bob", "bob@example.com", "other-pass"), later);

        assert_eq!(person.name, "Bob");
        assert_eq!(person.email, "bob@example.com");
        assert_eq!(person.password, "12345678");
        assert_eq!(person.stamps.created_at, created);
        assert_eq!(person.stamps.updated_at, later);
    }

    #[test]
    fn should_not_serialize_password() {
        let mut person = Person::from_input(valid_input(), now());
        person.id = PersonId::new(3);
        let json = serde_json::to_value(&person).unwrap();
        assert_eq!(json["pessoa_id"], 3);
        assert_eq!(json["nome"], "Alice");
        assert!(json.get("senha").is_none());
        assert!(json.get("password").is_none());
        assert!(json.get("created_at").is_some());
    }

    #[test]
    fn should_ignore_client_supplied_timestamps() {
        let input: PersonInput = serde_json::from_str(
            r#"{"nome":"A","email":"a@b.com","senha":"12345678","created_at":"2000-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(input, PersonInput::new("A", "a@b.com", "12345678"));
    }

    #[test]
    fn should_label_with_name_and_email() {
        assert_eq!(Person::label(&valid_input()), "Alice (alice@example.com)");
    }
}
