//! Route definitions for the unauthenticated read-only endpoints.

use axum::routing::get;
use axum::{Extension, Router};
use roster_core::roster::RosterKind;

use crate::handlers::public;
use crate::state::AppState;

/// Routes mounted at `/public`.
///
/// ```text
/// GET /aparaturs    -> list (oldest first, ?search=)
/// GET /konselors    -> list (oldest first, ?search=)
/// GET /roles        -> role catalog grouped by unit
/// ```
pub fn router() -> Router<AppState> {
    let router = Router::new().route("/roles", get(public::roles));

    RosterKind::ALL.into_iter().fold(router, |router, kind| {
        router.route(
            &format!("/{}", kind.route_segment()),
            get(public::list).layer(Extension(kind)),
        )
    })
}
