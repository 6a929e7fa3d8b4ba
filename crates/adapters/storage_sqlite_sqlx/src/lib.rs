//! # deviceapi-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `deviceapi-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain records and database rows
//! - Remove owned children before their parent, in one transaction
//!
//! ## Dependency rule
//! Depends on `deviceapi-app` (for port traits) and `deviceapi-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod pool;
pub mod store;
pub mod tables;

pub use pool::{Config, Database};
pub use store::SqliteStore;
