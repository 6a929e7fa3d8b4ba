//! # deviceapi-adapter-token-hmac
//!
//! Implements the `TokenSigner` port with compact HS256 JSON Web Tokens:
//! `base64url(header).base64url(claims).base64url(hmac_sha256(secret, ..))`.
//!
//! [`HmacTokenSigner::verify`] decodes a token back into [`TokenClaims`]. The
//! server never reads tokens; this is for clients holding the same secret
//! and for the end-to-end tests.
//!
//! ## Dependency rule
//! Same as other adapters: depends on `deviceapi-app` and `deviceapi-domain`.

pub mod error;
pub mod signer;

pub use signer::{HmacTokenSigner, TokenClaims};
