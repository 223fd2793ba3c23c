//! Route definitions for `/photo`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::photo;
use crate::state::AppState;

/// ```text
/// GET    /                    -> list (?family_id=)
/// POST   /                    -> create (JSON, external image_url)
/// POST   /upload              -> upload (multipart)
/// GET    /family/{family_id}  -> list_by_family
/// GET    /{id}                -> get_by_id
/// PUT    /{id}                -> update
/// DELETE /{id}                -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(photo::list).post(photo::create))
        .route("/upload", post(photo::upload))
        .route("/family/{family_id}", get(photo::list_by_family))
        .route(
            "/{id}",
            get(photo::get_by_id)
                .put(photo::update)
                .delete(photo::delete),
        )
}
