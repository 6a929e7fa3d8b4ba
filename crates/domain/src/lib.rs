//! # deviceapi-domain
//!
//! Pure domain model for the deviceapi IoT inventory.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define the six **records** and their ownership tree:
//!   Person → Gateway → Device → (Actuator, Sensor) → Measurement
//! - Define one **input** (transfer object) per record with field-level
//!   validation rules
//! - Define the explicit mapping from input to record (no reflection)
//! - Define the authentication value objects (credentials, session, claims)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod record;
pub mod time;
pub mod validation;

pub mod actuator;
pub mod auth;
pub mod device;
pub mod gateway;
pub mod measurement;
pub mod person;
pub mod sensor;
