//! Shared primitive aliases.

/// Roster tables use BIGSERIAL primary keys.
pub type DbId = i64;

/// `created_at` / `updated_at` are stored as TIMESTAMPTZ and handled in UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
