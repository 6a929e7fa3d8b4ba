//! # deviceapi-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **JSON REST API** for every record of the ownership tree
//!   (`/pessoa`, `/gateway`, `/dispositivo`, `/atuador`, `/sensor`, `/medicao`)
//!   plus child listings and `POST /auth`
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and domain errors into HTTP responses
//! - Apply the CORS policy and request tracing
//!
//! ## Dependency rule
//! Depends on `deviceapi-app` (for port traits and services) and `deviceapi-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod cors;
pub mod error;
pub mod extract;
pub mod router;
pub mod state;
