//! Common error types used across the workspace.
//!
//! Each adapter defines its own typed error and converts into
//! [`DeviceApiError`] through `From`, so the application layer only ever
//! deals with this enum.

use std::fmt;

use serde::Serialize;

/// Boxed error used to carry adapter failures across port boundaries.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error shared by every layer.
#[derive(Debug, thiserror::Error)]
pub enum DeviceApiError {
    /// The input did not satisfy its field constraints.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No row exists for the requested identifier.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The store rejected or failed the operation (constraint violation,
    /// dangling reference, connection problem).
    #[error("{0}")]
    Storage(#[source] BoxError),

    /// The audit message could not be handed to the broker.
    #[error("{0}")]
    Publish(#[source] BoxError),

    /// The session token could not be signed.
    #[error("{0}")]
    Token(#[source] BoxError),
}

/// Distinguished "no such row" failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Human name of the record kind (`Person`, `Sensor`, …).
    pub entity: &'static str,
    /// The identifier that was looked up.
    pub id: String,
}

/// A single failed field constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Wire name of the offending field.
    pub field: &'static str,
    /// What is wrong with it.
    pub message: String,
}

/// Every constraint violation found in one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// Wrap a non-empty list of violations.
    #[must_use]
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    /// All violations, in the order they were detected.
    #[must_use]
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Whether `field` has at least one violation.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid input")?;
        for (index, violation) in self.violations.iter().enumerate() {
            let sep = if index == 0 { ": " } else { "; " };
            write!(f, "{sep}{}", violation.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}
