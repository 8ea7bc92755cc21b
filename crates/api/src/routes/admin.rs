//! Route definitions for the admin roster endpoints.

use axum::routing::get;
use axum::{Extension, Router};
use roster_core::roster::RosterKind;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`, one sub-tree per roster.
///
/// ```text
/// GET    /{roster}            -> list (paginated, ?search=&page=)
/// POST   /{roster}            -> create (multipart)
/// GET    /{roster}/{id}       -> show
/// PUT    /{roster}/{id}       -> update (multipart)
/// PATCH  /{roster}/{id}       -> update (multipart)
/// POST   /{roster}/{id}       -> update (multipart, method-spoofing clients)
/// DELETE /{roster}/{id}       -> delete
/// ```
///
/// `{roster}` is `aparaturs` or `konselors`.
pub fn router() -> Router<AppState> {
    RosterKind::ALL
        .into_iter()
        .fold(Router::new(), |router, kind| {
            router.nest(&format!("/{}", kind.route_segment()), roster_routes(kind))
        })
}

fn roster_routes(kind: RosterKind) -> Router<AppState> {
    Router::new()
        .route("/", get(admin::list).post(admin::create))
        .route(
            "/{id}",
            get(admin::show)
                .put(admin::update)
                .patch(admin::update)
                .post(admin::update)
                .delete(admin::delete),
        )
        .layer(Extension(kind))
}
