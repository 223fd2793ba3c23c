//! Registration, login, refresh rotation, logout, lockout, and profile.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_user, get, get_auth, post_json, post_json_auth, TEST_PASSWORD};
use serde_json::json;
use sqlx::PgPool;

use myfamily_db::repositories::UserRepo;

async fn login(app: axum::Router, email: &str, password: &str) -> axum::response::Response {
    post_json(app, "/api/auth/login", json!({ "email": email, "password": password })).await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_creates_user_role_and_signs_in(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/auth/register",
        json!({
            "email": "Ada@Example.com",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "password": "analytical1"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert_eq!(json["expires_in"], 900);
    assert_eq!(json["user"]["email"], "ada@example.com");
    assert_eq!(json["user"]["role"], "User");
    assert!(json["user"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_duplicate_email_conflicts(pool: PgPool) {
    create_user(&pool, "taken@test.com", 2).await;
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/auth/register",
        json!({
            "email": "TAKEN@test.com",
            "first_name": "Second",
            "last_name": "Person",
            "password": "password1"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_rejects_invalid_fields(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app.clone(),
        "/api/auth/register",
        json!({ "email": "not-an-email", "first_name": "", "last_name": "X", "password": "password1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["details"]["email"].is_array());
    assert!(json["details"]["first_name"].is_array());

    let weak = post_json(
        app,
        "/api/auth/register",
        json!({ "email": "ok@test.com", "first_name": "A", "last_name": "B", "password": "short" }),
    )
    .await;
    assert_eq!(weak.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_success_returns_tokens(pool: PgPool) {
    let user = create_user(&pool, "login@test.com", 1).await;
    let response = login(common::build_test_app(pool), "LOGIN@test.com", TEST_PASSWORD).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["role"], "Administrator");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_wrong_password_and_unknown_email_are_401(pool: PgPool) {
    create_user(&pool, "someone@test.com", 2).await;
    let app = common::build_test_app(pool);

    let wrong = login(app.clone(), "someone@test.com", "nope-nope-1").await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let ghost = login(app, "ghost@test.com", TEST_PASSWORD).await;
    assert_eq!(ghost.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deactivated_account_cannot_log_in(pool: PgPool) {
    let user = create_user(&pool, "gone@test.com", 2).await;
    UserRepo::deactivate(&pool, user.id).await.unwrap();

    let response = login(common::build_test_app(pool), "gone@test.com", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn five_failures_lock_the_account(pool: PgPool) {
    create_user(&pool, "locked@test.com", 2).await;
    let app = common::build_test_app(pool);

    for _ in 0..5 {
        let response = login(app.clone(), "locked@test.com", "wrong-pass-1").await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // Even the right password is refused while locked.
    let response = login(app, "locked@test.com", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_rotates_the_token(pool: PgPool) {
    create_user(&pool, "rotate@test.com", 2).await;
    let app = common::build_test_app(pool);

    let first = body_json(login(app.clone(), "rotate@test.com", TEST_PASSWORD).await).await;
    let old_refresh = first["refresh_token"].as_str().unwrap().to_string();

    let response = post_json(
        app.clone(),
        "/api/auth/refresh",
        json!({ "refresh_token": old_refresh }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let second = body_json(response).await;
    assert_ne!(second["refresh_token"], first["refresh_token"]);

    // The old token was revoked on use.
    let replay = post_json(app, "/api/auth/refresh", json!({ "refresh_token": old_refresh })).await;
    assert_eq!(replay.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_refreshes_with_one_token_issue_one_pair(pool: PgPool) {
    create_user(&pool, "race@test.com", 2).await;
    let app = common::build_test_app(pool);

    for _ in 0..10 {
        let session = body_json(login(app.clone(), "race@test.com", TEST_PASSWORD).await).await;
        let body = json!({ "refresh_token": session["refresh_token"] });

        let (a, b) = tokio::join!(
            post_json(app.clone(), "/api/auth/refresh", body.clone()),
            post_json(app.clone(), "/api/auth/refresh", body),
        );
        let mut statuses = [a.status().as_u16(), b.status().as_u16()];
        statuses.sort_unstable();
        assert_eq!(statuses, [200, 401]);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn logout_revokes_refresh_tokens(pool: PgPool) {
    create_user(&pool, "bye@test.com", 2).await;
    let app = common::build_test_app(pool);

    let session = body_json(login(app.clone(), "bye@test.com", TEST_PASSWORD).await).await;
    let access = session["access_token"].as_str().unwrap();
    let refresh = session["refresh_token"].as_str().unwrap();

    let response = post_json_auth(app.clone(), "/api/auth/logout", json!({}), access).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_json(app, "/api/auth/refresh", json!({ "refresh_token": refresh })).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_requires_a_valid_token(pool: PgPool) {
    let user = create_user(&pool, "me@test.com", 2).await;
    let app = common::build_test_app(pool);

    let anonymous = get(app.clone(), "/api/auth/me").await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let garbage = get_auth(app.clone(), "/api/auth/me", "not.a.jwt").await;
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);

    let token = common::token_for(user.id, "User");
    let response = get_auth(app, "/api/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["email"], "me@test.com");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn change_password_requires_current_password(pool: PgPool) {
    let user = create_user(&pool, "pw@test.com", 2).await;
    let token = common::token_for(user.id, "User");
    let app = common::build_test_app(pool);

    let wrong = post_json_auth(
        app.clone(),
        "/api/auth/change-password",
        json!({ "current_password": "guess12345", "new_password": "newpass123" }),
        &token,
    )
    .await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let ok = post_json_auth(
        app.clone(),
        "/api/auth/change-password",
        json!({ "current_password": TEST_PASSWORD, "new_password": "newpass123" }),
        &token,
    )
    .await;
    assert_eq!(ok.status(), StatusCode::NO_CONTENT);

    assert_eq!(
        login(app.clone(), "pw@test.com", TEST_PASSWORD).await.status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        login(app, "pw@test.com", "newpass123").await.status(),
        StatusCode::OK
    );
}
