//! Authentication value objects.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::time::Timestamp;
use crate::validation::{Checks, Validate};

/// Login request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// The person's e-mail address.
    pub username: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Validate for Credentials {
    fn validate(&self) -> Result<(), ValidationError> {
        Checks::new()
            .not_blank("username", &self.username, "username must not be blank")
            .finish()
    }
}

/// What gets embedded in a signed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    pub username: String,
    pub issued_at: Timestamp,
    pub expires_at: Timestamp,
}

/// A signed token together with its validity window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub token: String,
    #[serde(rename = "issuedIn")]
    pub issued_in: Timestamp,
    #[serde(rename = "expiresIn")]
    pub expires_in: Timestamp,
}
