//! Route definitions for `/story`.

use axum::routing::get;
use axum::Router;

use crate::handlers::story;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(story::list).post(story::create))
        .route("/family/{family_id}", get(story::list_by_family))
        .route("/member/{member_id}", get(story::list_by_member))
        .route(
            "/{id}",
            get(story::get_by_id)
                .put(story::update)
                .delete(story::delete),
        )
}
