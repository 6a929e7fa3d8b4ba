//! Token adapter error types.

use deviceapi_domain::error::DeviceApiError;

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("cannot encode token claims: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid signing key: {0}")]
    Key(#[from] hmac::digest::InvalidLength),

    #[error("malformed token")]
    Malformed,

    #[error("token signature mismatch")]
    BadSignature,
}

impl From<TokenError> for DeviceApiError {
    fn from(err: TokenError) -> Self {
        Self::Token(Box::new(err))
    }
}
