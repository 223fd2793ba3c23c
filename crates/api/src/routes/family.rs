//! Route definitions for `/family`.

use axum::routing::get;
use axum::Router;

use crate::handlers::family;
use crate::state::AppState;

/// ```text
/// GET    /           -> list (?search=&limit=&offset=)
/// POST   /           -> create
/// GET    /{id}       -> get_by_id
/// PUT    /{id}       -> update
/// DELETE /{id}       -> delete
/// GET    /{id}/tree  -> tree
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(family::list).post(family::create))
        .route(
            "/{id}",
            get(family::get_by_id)
                .put(family::update)
                .delete(family::delete),
        )
        .route("/{id}/tree", get(family::tree))
}
