//! Staff member model shared by the `aparaturs` and `konselors` tables.

use sqlx::FromRow;
use roster_core::types::{DbId, Timestamp};

/// A row from either roster table.
///
/// `image` is the stored filename only; the public URL is derived when the
/// record is rendered.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct StaffMember {
    pub id: DbId,
    pub image: String,
    pub name: String,
    pub role: String,
    pub phone: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a record.
#[derive(Debug, Clone)]
pub struct CreateStaffMember {
    pub image: String,
    pub name: String,
    pub role: String,
    pub phone: String,
}

/// DTO for updating a record.
///
/// Text fields are always replaced; `image` is only replaced when `Some`.
#[derive(Debug, Clone)]
pub struct UpdateStaffMember {
    pub image: Option<String>,
    pub name: String,
    pub role: String,
    pub phone: String,
}
