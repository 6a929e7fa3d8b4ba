//! Token port.

use std::sync::Arc;

use deviceapi_domain::auth::Claims;
use deviceapi_domain::error::DeviceApiError;

/// Turns session claims into an opaque signed token.
pub trait TokenSigner: Send + Sync {
    /// # Errors
    ///
    /// Returns [`DeviceApiError::Token`] when the token cannot be produced.
    fn sign(&self, claims: &Claims) -> Result<String, DeviceApiError>;
}

impl<T: TokenSigner> TokenSigner for Arc<T> {
    fn sign(&self, claims: &Claims) -> Result<String, DeviceApiError> {
        (**self).sign(claims)
    }
}
