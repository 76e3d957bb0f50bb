//! Route definitions for the `/parties` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::party;
use crate::state::AppState;

/// Routes mounted at `/parties`.
///
/// ```text
/// GET    /        -> list (?status=&search=)
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// PATCH  /{id}    -> patch
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(party::list).post(party::create))
        .route(
            "/{id}",
            get(party::get_by_id)
                .put(party::update)
                .patch(party::patch)
                .delete(party::delete),
        )
}
