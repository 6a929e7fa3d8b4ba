//! HS256 token signing and verification.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use deviceapi_app::ports::TokenSigner;
use deviceapi_domain::auth::Claims;
use deviceapi_domain::error::DeviceApiError;

use crate::error::TokenError;

type HmacSha256 = Hmac<Sha256>;

const HEADER: &str = r#"{"alg":"HS256","typ":"JWT"}"#;

/// Registered claims carried in the token body. Times are seconds since the
/// Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

impl From<&Claims> for TokenClaims {
    fn from(claims: &Claims) -> Self {
        Self {
            username: claims.username.clone(),
            iat: claims.issued_at.timestamp(),
            exp: claims.expires_at.timestamp(),
        }
    }
}

/// Signs tokens with a shared secret.
pub struct HmacTokenSigner {
    secret: Vec<u8>,
}

impl HmacTokenSigner {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Produce a compact token for `claims`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError`] if the claims cannot be serialised.
    pub fn encode(&self, claims: &TokenClaims) -> Result<String, TokenError> {
        let header = URL_SAFE_NO_PAD.encode(HEADER);
        let body = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims)?);
        let signing_input = format!("{header}.{body}");

        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(format!("{signing_input}.{signature}"))
    }

    /// Check the signature of `token` and return its claims. Expiry is not
    /// checked.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Malformed`] for anything that is not three
    /// base64url segments, and [`TokenError::BadSignature`] when the
    /// signature does not match this secret.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let (signing_input, signature) = token.rsplit_once('.').ok_or(TokenError::Malformed)?;
        let (_, body) = signing_input
            .split_once('.')
            .ok_or(TokenError::Malformed)?;
        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| TokenError::Malformed)?;

        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::BadSignature)?;

        let body = URL_SAFE_NO_PAD
            .decode(body)
            .map_err(|_| TokenError::Malformed)?;
        Ok(serde_json::from_slice(&body)?)
    }

    fn mac(&self) -> Result<HmacSha256, TokenError> {
        Ok(HmacSha256::new_from_slice(&self.secret)?)
    }
}

impl TokenSigner for HmacTokenSigner {
    fn sign(&self, claims: &Claims) -> Result<String, DeviceApiError> {
        Ok(self.encode(&TokenClaims::from(claims))?)
    }
}
