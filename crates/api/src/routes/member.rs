//! Route definitions for `/member`.

use axum::routing::get;
use axum::Router;

use crate::handlers::member;
use crate::state::AppState;

/// ```text
/// GET    /                      -> list (?family_id=&search=)
/// POST   /                      -> create
/// GET    /family/{family_id}    -> list_by_family
/// GET    /{id}                  -> get_by_id
/// PUT    /{id}                  -> update
/// DELETE /{id}                  -> delete
/// GET    /{id}/relationships    -> relationships
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(member::list).post(member::create))
        .route("/family/{family_id}", get(member::list_by_family))
        .route(
            "/{id}",
            get(member::get_by_id)
                .put(member::update)
                .delete(member::delete),
        )
        .route("/{id}/relationships", get(member::relationships))
}
