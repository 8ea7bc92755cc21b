//! Shared query parameter types for API handlers.
//!
//! Values are kept as raw strings and normalized in `roster_core`
//! (`search::normalize_term`, `pagination::resolve_page`) so malformed
//! input degrades to defaults instead of a 400.

use serde::Deserialize;

/// `?search=` on the public listings.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

/// `?search=&page=` on the admin listings.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub page: Option<String>,
}
