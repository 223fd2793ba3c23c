//! Route definitions for `/relationship`.

use axum::routing::get;
use axum::Router;

use crate::handlers::relationship;
use crate::state::AppState;

/// ```text
/// GET    /      -> list (?family_id=)
/// POST   /      -> create
/// GET    /{id}  -> get_by_id
/// PUT    /{id}  -> update
/// DELETE /{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(relationship::list).post(relationship::create))
        .route(
            "/{id}",
            get(relationship::get_by_id)
                .put(relationship::update)
                .delete(relationship::delete),
        )
}
