//! # deviceapi-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `Repository<T>` / `OwnedRepository<T>` — CRUD and owner lookups for records
//!   - `PersonDirectory` — look a person up by e-mail
//!   - `AuditPublisher` — hand a free-text audit message to a sink
//!   - `TokenSigner` — turn session claims into a signed token
//! - Define **driving/inbound ports** as use-case structs:
//!   - `RecordService<T, ..>` — create, list, get, update, delete, list children
//!   - `AuthService` — exchange credentials for a session token
//! - Provide **in-process infrastructure** (audit log) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `deviceapi-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod audit_log;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;
