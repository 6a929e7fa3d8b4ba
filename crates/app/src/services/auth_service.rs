//! Auth service: exchanges credentials for a signed session token.

use chrono::TimeDelta;

use deviceapi_domain::auth::{Claims, Credentials, Session};
use deviceapi_domain::error::{DeviceApiError, NotFoundError};
use deviceapi_domain::time::now;
use deviceapi_domain::validation::Validate;

use crate::ports::{AuditPublisher, PersonDirectory, TokenSigner};

/// How long an issued token stays valid.
pub const TOKEN_VALIDITY_SECS: i64 = 36_000;

/// Application service for logging in.
pub struct AuthService<D, A, K> {
    directory: D,
    audit: A,
    signer: K,
    verify_password: bool,
}

impl<D, A, K> AuthService<D, A, K>
where
    D: PersonDirectory,
    A: AuditPublisher,
    K: TokenSigner,
{
    /// Create a service that trusts any known username.
    pub fn new(directory: D, audit: A, signer: K) -> Self {
        Self {
            directory,
            audit,
            signer,
            verify_password: false,
        }
    }

    /// Also require the password to match the stored one.
    #[must_use]
    pub fn verify_password(mut self, enabled: bool) -> Self {
        self.verify_password = enabled;
        self
    }

    /// Issue a session for `credentials`.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceApiError::NotFound`] when no person has that e-mail
    /// (or the password does not match while verification is enabled), or
    /// [`DeviceApiError::Token`] when signing fails.
    pub async fn authenticate(&self, credentials: Credentials) -> Result<Session, DeviceApiError> {
        let result = self.issue(&credentials).await;
        let message = match &result {
            Ok(_) => {
                tracing::info!(username = %credentials.username, "user authenticated");
                format!("User connected: {}", credentials.username)
            }
            Err(err) => {
                tracing::warn!(username = %credentials.username, error = %err, "authentication failed");
                format!("Authentication error: {err}")
            }
        };
        if let Err(err) = self.audit.publish(message).await {
            tracing::warn!(error = %err, "failed to publish audit message");
        }
        result
    }

    async fn issue(&self, credentials: &Credentials) -> Result<Session, DeviceApiError> {
        credentials.validate()?;

        self.directory
            .find_by_email(&credentials.username)
            .await?
            .filter(|person| !self.verify_password || person.password == credentials.password)
            .ok_or_else(|| NotFoundError {
                entity: "User",
                id: credentials.username.clone(),
            })?;

        let issued_at = now();
        let claims = Claims {
            username: credentials.username.clone(),
            issued_at,
            expires_at: issued_at + TimeDelta::seconds(TOKEN_VALIDITY_SECS),
        };
        let token = self.signer.sign(&claims).inspect_err(|err| {
            tracing::error!(error = %err, "failed to sign session token");
        })?;

        Ok(Session {
            token,
            issued_in: claims.issued_at,
            expires_in: claims.expires_at,
        })
    }
}
