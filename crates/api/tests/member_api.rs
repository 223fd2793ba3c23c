//! `/api/member` validation, family scoping, and relationship views.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_family, create_member, get, post_json_auth, put_json_auth, user_with_token,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_returns_derived_fields(pool: PgPool) {
    let (_, token) = user_with_token(&pool, "owner@test.com").await;
    let app = common::build_test_app(pool);
    let family = create_family(app.clone(), &token, "Lovelace").await;

    let response = post_json_auth(
        app,
        "/api/member",
        json!({
            "family_id": family,
            "first_name": "Ada",
            "middle_name": "Augusta",
            "last_name": "Lovelace",
            "gender": "Female",
            "date_of_birth": "1815-12-10",
            "date_of_death": "1852-11-27"
        }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["full_name"], "Ada Augusta Lovelace");
    assert_eq!(json["is_living"], false);
    assert_eq!(json["age"], 36);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_rejects_bad_gender_and_dates(pool: PgPool) {
    let (_, token) = user_with_token(&pool, "owner@test.com").await;
    let app = common::build_test_app(pool);
    let family = create_family(app.clone(), &token, "Checks").await;

    let cases = [
        json!({ "family_id": family, "first_name": "A", "last_name": "B", "gender": "robot" }),
        json!({ "family_id": family, "first_name": "A", "last_name": "B", "date_of_birth": "2999-01-01" }),
        json!({
            "family_id": family, "first_name": "A", "last_name": "B",
            "date_of_birth": "1950-01-01", "date_of_death": "1940-01-01"
        }),
        json!({ "family_id": family, "first_name": "", "last_name": "B" }),
    ];
    for body in cases {
        let response = post_json_auth(app.clone(), "/api/member", body.clone(), &token).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_in_unknown_family_is_400(pool: PgPool) {
    let (_, token) = user_with_token(&pool, "owner@test.com").await;
    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/member",
        json!({ "family_id": 987654, "first_name": "No", "last_name": "Home" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_by_family_is_scoped(pool: PgPool) {
    let (_, token) = user_with_token(&pool, "owner@test.com").await;
    let app = common::build_test_app(pool);
    let first = create_family(app.clone(), &token, "First").await;
    let second = create_family(app.clone(), &token, "Second").await;
    create_member(app.clone(), &token, first, "Ann", "First").await;
    create_member(app.clone(), &token, first, "Ben", "First").await;
    create_member(app.clone(), &token, second, "Cat", "Second").await;

    let json = body_json(get(app.clone(), &format!("/api/member/family/{first}")).await).await;
    let members = json.as_array().unwrap();
    assert_eq!(members.len(), 2);
    assert!(members.iter().all(|m| m["family_id"] == first));

    let json = body_json(get(app.clone(), "/api/member?search=cat").await).await;
    assert_eq!(json.as_array().unwrap().len(), 1);

    let response = get(app, "/api/member/family/555555").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn relationships_are_labelled_from_the_members_side(pool: PgPool) {
    let (_, token) = user_with_token(&pool, "owner@test.com").await;
    let app = common::build_test_app(pool);
    let family = create_family(app.clone(), &token, "Labels").await;
    let parent = create_member(app.clone(), &token, family, "Mary", "Labels").await;
    let child = create_member(app.clone(), &token, family, "Tom", "Labels").await;

    // Mary is Tom's parent.
    let response = post_json_auth(
        app.clone(),
        "/api/relationship",
        json!({
            "family_id": family,
            "primary_member_id": child,
            "related_member_id": parent,
            "relationship_type": 1
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let from_child = body_json(get(app.clone(), &format!("/api/member/{child}/relationships")).await).await;
    assert_eq!(from_child[0]["other_member_id"], parent);
    assert_eq!(from_child[0]["other_member_name"], "Mary Labels");
    assert_eq!(from_child[0]["label"], "Parent");

    let from_parent = body_json(get(app, &format!("/api/member/{parent}/relationships")).await).await;
    assert_eq!(from_parent[0]["other_member_id"], child);
    assert_eq!(from_parent[0]["label"], "Child");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_checks_dates_against_stored_values(pool: PgPool) {
    let (_, token) = user_with_token(&pool, "owner@test.com").await;
    let app = common::build_test_app(pool);
    let family = create_family(app.clone(), &token, "Dates").await;

    let response = post_json_auth(
        app.clone(),
        "/api/member",
        json!({
            "family_id": family, "first_name": "Old", "last_name": "Timer",
            "date_of_birth": "1900-05-01"
        }),
        &token,
    )
    .await;
    let id = body_json(response).await["id"].as_i64().unwrap();
    let uri = format!("/api/member/{id}");

    // Death before the stored birth date.
    let response = put_json_auth(app.clone(), &uri, json!({ "date_of_death": "1899-01-01" }), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(app, &uri, json!({ "date_of_death": "1980-05-01" }), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["first_name"], "Old");
    assert_eq!(json["age"], 80);
    assert_eq!(json["is_living"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_owner_cannot_update_member(pool: PgPool) {
    let (_, owner) = user_with_token(&pool, "owner@test.com").await;
    let (_, other) = user_with_token(&pool, "other@test.com").await;
    let app = common::build_test_app(pool);
    let family = create_family(app.clone(), &owner, "Private").await;
    let id = create_member(app.clone(), &owner, family, "Kept", "Safe").await;

    let response = put_json_auth(app, &format!("/api/member/{id}"), json!({ "first_name": "X" }), &other).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
