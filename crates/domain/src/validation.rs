//! Field-level constraint checks for transfer objects.
//!
//! Inputs describe their rules with a [`Checks`] chain; every failing rule
//! is collected so the caller sees all problems of a request at once.

use crate::error::{FieldViolation, ValidationError};

/// Implemented by every input that must be checked before a record is built.
pub trait Validate {
    /// Check all field constraints.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing every violated constraint.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Check the constraints that apply when overwriting an existing record.
    /// Defaults to [`Validate::validate`].
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing every violated constraint.
    fn validate_update(&self) -> Result<(), ValidationError> {
        self.validate()
    }
}

/// Accumulator for constraint violations.
#[derive(Debug, Default)]
#[must_use]
pub struct Checks {
    violations: Vec<FieldViolation>,
}

impl Checks {
    pub fn new() -> Self {
        Self::default()
    }

    /// The value must contain at least one non-whitespace character.
    pub fn not_blank(self, field: &'static str, value: &str, message: &str) -> Self {
        self.check(!value.trim().is_empty(), field, message)
    }

    /// The value must be between `min` and `max` characters long (inclusive).
    pub fn length(
        self,
        field: &'static str,
        value: &str,
        (min, max): (usize, usize),
        message: &str,
    ) -> Self {
        let len = value.chars().count();
        self.check((min..=max).contains(&len), field, message)
    }

    /// The value must look like an e-mail address. Blank values pass; pair
    /// with [`Checks::not_blank`] to require one.
    pub fn email(self, field: &'static str, value: &str, message: &str) -> Self {
        self.check(value.is_empty() || is_email(value), field, message)
    }

    /// The value must be present.
    pub fn present<T>(self, field: &'static str, value: Option<&T>, message: &str) -> Self {
        self.check(value.is_some(), field, message)
    }

    /// Turn the collected violations into a result.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when at least one rule failed.
    pub fn finish(self) -> Result<(), ValidationError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.violations))
        }
    }

    fn check(mut self, ok: bool, field: &'static str, message: &str) -> Self {
        if !ok {
            self.violations.push(FieldViolation {
                field,
                message: message.to_string(),
            });
        }
        self
    }
}

/// `local@domain` with no whitespace, a single `@`, and non-empty
/// dot-separated domain labels.
fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.split('.').all(|label| !label.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_pass_when_no_rule_fails() {
        let result = Checks::new()
            .not_blank("nome", "Alice", "blank")
            .length("nome", "Alice", (2, 100), "length")
            .finish();
        assert!(result.is_ok());
    }

    #[test]
    fn should_collect_every_failing_rule() {
        let err = Checks::new()
            .not_blank("nome", " ", "name must not be blank")
            .length("nome", "", (2, 100), "name too short")
            .not_blank("email", "a@b.com", "unused")
            .finish()
            .unwrap_err();

        let fields: Vec<&str> = err.violations().iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["nome", "nome"]);
    }

    #[test]
    fn should_count_characters_not_bytes() {
        let result = Checks::new()
            .length("nome", "Zé", (2, 2), "length")
            .finish();
        assert!(result.is_ok());
    }

    #[test]
    fn should_accept_plain_addresses() {
        assert!(is_email("a@b.com"));
        assert!(is_email("first.last@sub.example.org"));
        assert!(is_email("user@localhost"));
    }

    #[test]
    fn should_reject_malformed_addresses() {
        assert!(!is_email("no-at-sign"));
        assert!(!is_email("@example.com"));
        assert!(!is_email("user@"));
        assert!(!is_email("a@@b.com"));
        assert!(!is_email("a b@c.com"));
        assert!(!is_email("a@b..com"));
    }

    #[test]
    fn should_let_blank_email_through_the_format_check() {
        assert!(Checks::new().email("email", "", "bad").finish().is_ok());
    }

    #[test]
    fn should_flag_missing_value() {
        let err = Checks::new()
            .present::<i32>("data", None, "date is required")
            .finish()
            .unwrap_err();
        assert!(err.has_field("data"));
    }
}
