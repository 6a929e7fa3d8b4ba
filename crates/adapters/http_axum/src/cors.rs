//! CORS policy.

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method};
use serde::Deserialize;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Cross-origin settings for browser clients.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// The single origin allowed to call the API.
    pub allowed_origin: String,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub allow_credentials: bool,
    /// How long browsers may cache a preflight answer, in seconds.
    pub max_age_secs: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origin: "http://localhost:3000".to_string(),
            allowed_methods: ["GET", "POST", "PUT", "DELETE", "OPTIONS"]
                .map(String::from)
                .to_vec(),
            allowed_headers: [
                "X-CSRF-Token",
                "X-Requested-With",
                "Accept",
                "Accept-Version",
                "Content-Length",
                "Content-MD5",
                "Content-Type",
                "Date",
                "X-Api-Version",
                "Authorization",
            ]
            .map(String::from)
            .to_vec(),
            allow_credentials: true,
            max_age_secs: 3600,
        }
    }
}

impl CorsConfig {
    /// Build the tower-http layer. Entries that do not parse are skipped
    /// with a warning.
    #[must_use]
    pub fn layer(&self) -> CorsLayer {
        let origin = match self.allowed_origin.parse::<HeaderValue>() {
            Ok(origin) => AllowOrigin::exact(origin),
            Err(_) => {
                tracing::warn!(origin = %self.allowed_origin, "invalid CORS origin, cross-origin requests disabled");
                AllowOrigin::list([])
            }
        };

        let methods: Vec<Method> = self
            .allowed_methods
            .iter()
            .filter_map(|m| parse_or_warn(m, "method"))
            .collect();

        let headers: Vec<HeaderName> = self
            .allowed_headers
            .iter()
            .filter_map(|h| parse_or_warn(h, "header"))
            .collect();

        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(methods)
            .allow_headers(headers)
            .allow_credentials(self.allow_credentials)
            .max_age(Duration::from_secs(self.max_age_secs))
    }
}

fn parse_or_warn<T: std::str::FromStr>(value: &str, what: &str) -> Option<T> {
    let parsed = value.parse().ok();
    if parsed.is_none() {
        tracing::warn!(value, what, "ignoring invalid CORS entry");
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_local_frontend() {
        let config = CorsConfig::default();
        assert_eq!(config.allowed_origin, "http://localhost:3000");
        assert_eq!(config.allowed_methods.len(), 5);
        assert!(config.allowed_headers.iter().any(|h| h == "Authorization"));
        assert!(config.allow_credentials);
    }

    #[test]
    fn should_skip_unparseable_entries() {
        let parsed: Vec<HeaderName> = ["Content-Type", "bad header"]
            .iter()
            .filter_map(|h| parse_or_warn(h, "header"))
            .collect();
        assert_eq!(parsed, vec![HeaderName::from_static("content-type")]);
    }
}
