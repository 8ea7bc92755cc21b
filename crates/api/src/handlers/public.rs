//! Read-only public handlers.

use axum::extract::{Query, State};
use axum::{Extension, Json};
use roster_core::roles::{self, OrgUnit};
use roster_core::roster::RosterKind;
use roster_core::search::normalize_term;
use roster_db::repositories::StaffMemberRepo;

use crate::error::AppResult;
use crate::query::SearchParams;
use crate::response::{ApiResource, StaffMemberResource};
use crate::state::AppState;

pub const ROLES_MESSAGE: &str = "List Data Jabatan";

/// GET /api/public/{roster}?search=
///
/// Every matching record, oldest first, unpaginated.
pub async fn list(
    State(state): State<AppState>,
    Extension(kind): Extension<RosterKind>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<ApiResource<Vec<StaffMemberResource>>>> {
    let search = normalize_term(params.search.as_deref());
    let rows = StaffMemberRepo::list_oldest_first(&state.pool, kind, search).await?;

    let app_url = &state.config.app_url;
    let data = rows
        .into_iter()
        .map(|row| StaffMemberResource::new(kind, app_url, row))
        .collect();

    Ok(Json(ApiResource::ok(kind.messages().public_list, data)))
}

/// GET /api/public/roles
///
/// The role catalog grouped by unit, for building role pickers.
pub async fn roles() -> Json<ApiResource<&'static [OrgUnit]>> {
    Json(ApiResource::ok(ROLES_MESSAGE, roles::units()))
}
