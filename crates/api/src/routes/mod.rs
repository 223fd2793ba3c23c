pub mod admin;
pub mod auth;
pub mod family;
pub mod health;
pub mod member;
pub mod photo;
pub mod relationship;
pub mod story;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /auth/register, /auth/login, /auth/refresh     public
/// /auth/logout, /auth/me, /auth/change-password  bearer
///
/// /family                   list (public), create (bearer)
/// /family/{id}              get (public), update/delete (owner or admin)
/// /family/{id}/tree         couple-unit layout (public)
///
/// /member                   list (?family_id=&search=), create
/// /member/family/{id}       members of one family
/// /member/{id}              get, update, delete
/// /member/{id}/relationships labelled from the member's side
///
/// /relationship             list (?family_id=), create
/// /relationship/{id}        get, update, delete
///
/// /photo                    list (?family_id=), create from URL
/// /photo/upload             multipart upload
/// /photo/family/{id}        photos of one family
/// /photo/{id}               get, update, delete
///
/// /story                    list (?family_id=), create
/// /story/family/{id}        stories of one family
/// /story/member/{id}        stories about one member
/// /story/{id}               get, update, delete
///
/// /admin/stats              dashboard counts (admin)
/// /admin/users              list (admin)
/// /admin/users/{id}         get, update, deactivate (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/family", family::router())
        .nest("/member", member::router())
        .nest("/relationship", relationship::router())
        .nest("/photo", photo::router())
        .nest("/story", story::router())
        .nest("/admin", admin::router())
}
