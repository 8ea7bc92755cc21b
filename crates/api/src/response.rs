//! Shared response envelope types for API handlers.
//!
//! Every non-validation response uses the `{ success, message, data }`
//! envelope. Business failures (missing record, mutation not applied) are
//! reported with `success: false` and HTTP 200; only form validation uses a
//! different body and status (see [`crate::error::AppError::Validation`]).

use roster_core::roster::RosterKind;
use roster_core::types::{DbId, Timestamp};
use roster_db::models::staff_member::StaffMember;
use serde::Serialize;

/// Standard `{ "success", "message", "data" }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(ApiResource::ok(kind.messages().detail, record)))
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResource<T: Serialize> {
    pub success: bool,
    pub message: &'static str,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResource<T> {
    pub fn ok(message: &'static str, data: T) -> Self {
        Self {
            success: true,
            message,
            data: Some(data),
        }
    }

    /// Successful outcome with `data: null` (e.g. a delete).
    pub fn done(message: &'static str) -> Self {
        Self {
            success: true,
            message,
            data: None,
        }
    }

    pub fn failed(message: &'static str) -> Self {
        Self {
            success: false,
            message,
            data: None,
        }
    }
}

/// A roster record as returned to clients.
///
/// `image` is the public URL of the stored photo, derived from the stored
/// filename at render time.
#[derive(Debug, Clone, Serialize)]
pub struct StaffMemberResource {
    pub id: DbId,
    pub image: String,
    pub name: String,
    pub role: String,
    pub phone: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl StaffMemberResource {
    pub fn new(kind: RosterKind, app_url: &str, row: StaffMember) -> Self {
        Self {
            id: row.id,
            image: kind.image_url(app_url, &row.image),
            name: row.name,
            role: row.role,
            phone: row.phone,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
