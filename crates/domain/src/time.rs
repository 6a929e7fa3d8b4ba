//! Time and timestamp helpers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// UTC timestamp used for `created_at`, `updated_at` and reading times.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Creation and last-modification times of a record.
///
/// Always assigned by the service layer, never taken from client input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stamps {
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Stamps {
    /// Stamps for a record created at `ts`.
    #[must_use]
    pub fn at(ts: Timestamp) -> Self {
        Self {
            created_at: ts,
            updated_at: ts,
        }
    }

    /// Record a modification at `ts`; `created_at` is left alone.
    pub fn touch(&mut self, ts: Timestamp) {
        self.updated_at = ts;
    }
}
