//! `/api/photo` (JSON and multipart upload) and `/api/story`.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_family, create_member, delete_auth, get, post_json_auth,
    post_multipart_auth, put_json_auth, user_with_token,
};
use myfamily_db::models::photo::CreatePhoto;
use myfamily_db::repositories::PhotoRepo;
use serde_json::json;
use sqlx::PgPool;

/// Smallest valid PNG: 1x1, 8-bit greyscale.
const PNG_1X1: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x00, 0x00, 0x00, 0x00, 0x3A,
    0x7E, 0x9B, 0x55, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x60,
    0x00, 0x00, 0x00, 0x02, 0x00, 0x01, 0xE5, 0x27, 0xDE, 0xFC, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

// ---------------------------------------------------------------------------
// Photos
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn photo_from_url(pool: PgPool) {
    let (_, token) = user_with_token(&pool, "owner@test.com").await;
    let app = common::build_test_app(pool);
    let family = create_family(app.clone(), &token, "Album").await;

    let response = post_json_auth(
        app.clone(),
        "/api/photo",
        json!({
            "family_id": family,
            "title": "Wedding",
            "image_url": "https://img.example.com/wedding.jpg",
            "date_taken": "1962-06-09"
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["width"].is_null());

    let listed = body_json(get(app, &format!("/api/photo/family/{family}")).await).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["title"], "Wedding");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn upload_stores_file_and_dimensions(pool: PgPool) {
    let (_, token) = user_with_token(&pool, "owner@test.com").await;
    let config = common::test_config();
    let upload_dir = config.upload_dir.clone();
    let app = common::build_test_app_with(pool, config);
    let family = create_family(app.clone(), &token, "Uploads").await;
    let family_field = family.to_string();

    let response = post_multipart_auth(
        app.clone(),
        "/api/photo/upload",
        &[("familyId", &family_field), ("title", "Tiny")],
        Some(("tiny.PNG", PNG_1X1)),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["width"], 1);
    assert_eq!(json["height"], 1);

    let url = json["image_url"].as_str().unwrap().to_string();
    let prefix = format!("/uploads/family_{family}/");
    assert!(url.starts_with(&prefix), "unexpected url {url}");
    assert!(url.ends_with(".png"));

    let on_disk = upload_dir.join(url.trim_start_matches("/uploads/"));
    assert!(on_disk.exists());

    // Served back from the static mount.
    let served = get(app.clone(), &url).await;
    assert_eq!(served.status(), StatusCode::OK);

    let id = json["id"].as_i64().unwrap();
    let response = delete_auth(app, &format!("/api/photo/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(!on_disk.exists());

    let _ = std::fs::remove_dir_all(upload_dir);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn upload_rejects_bad_input(pool: PgPool) {
    let (_, token) = user_with_token(&pool, "owner@test.com").await;
    let app = common::build_test_app(pool);
    let family = create_family(app.clone(), &token, "Rejects").await;
    let family_field = family.to_string();
    let fields = [("family_id", family_field.as_str()), ("title", "Bad")];

    let wrong_ext = post_multipart_auth(
        app.clone(),
        "/api/photo/upload",
        &fields,
        Some(("notes.txt", b"hello")),
        &token,
    )
    .await;
    assert_eq!(wrong_ext.status(), StatusCode::BAD_REQUEST);

    let not_an_image = post_multipart_auth(
        app.clone(),
        "/api/photo/upload",
        &fields,
        Some(("fake.png", b"plain text pretending")),
        &token,
    )
    .await;
    assert_eq!(not_an_image.status(), StatusCode::BAD_REQUEST);

    let missing_file =
        post_multipart_auth(app.clone(), "/api/photo/upload", &fields, None, &token).await;
    assert_eq!(missing_file.status(), StatusCode::BAD_REQUEST);

    let unknown_family = post_multipart_auth(
        app,
        "/api/photo/upload",
        &[("family_id", "999999"), ("title", "Lost")],
        Some(("tiny.png", PNG_1X1)),
        &token,
    )
    .await;
    assert_eq!(unknown_family.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn client_urls_cannot_point_at_local_files(pool: PgPool) {
    let (_, owner) = user_with_token(&pool, "owner@test.com").await;
    let (_, other) = user_with_token(&pool, "other@test.com").await;
    let app = common::build_test_app(pool);
    let family = create_family(app.clone(), &owner, "Uploads").await;
    let family_field = family.to_string();

    let uploaded = body_json(
        post_multipart_auth(
            app.clone(),
            "/api/photo/upload",
            &[("family_id", &family_field), ("title", "Original")],
            Some(("tiny.png", PNG_1X1)),
            &owner,
        )
        .await,
    )
    .await;
    let owners_url = uploaded["image_url"].as_str().unwrap().to_string();

    let theirs = create_family(app.clone(), &other, "Copycat").await;
    for url in [owners_url.as_str(), "/uploads//tmp/victim.png", "/etc/passwd"] {
        let response = post_json_auth(
            app.clone(),
            "/api/photo",
            json!({ "family_id": theirs, "title": "Copy", "image_url": url }),
            &other,
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{url}");
    }

    let created = body_json(
        post_json_auth(
            app.clone(),
            "/api/photo",
            json!({ "family_id": theirs, "title": "Linked", "image_url": "https://x.test/l.jpg" }),
            &other,
        )
        .await,
    )
    .await;
    let response = put_json_auth(
        app,
        &format!("/api/photo/{}", created["id"]),
        json!({ "image_url": owners_url }),
        &other,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_ignores_image_url_when_removing_files(pool: PgPool) {
    let (owner, token) = user_with_token(&pool, "owner@test.com").await;
    let config = common::test_config();
    let upload_dir = config.upload_dir.clone();
    let app = common::build_test_app_with(pool.clone(), config);
    let family = create_family(app.clone(), &token, "Linked").await;

    // A file outside the upload directory, named by an absolute path.
    let outside = std::env::temp_dir().join(format!("myfamily-keep-{}", uuid::Uuid::new_v4()));
    std::fs::write(&outside, b"keep me").unwrap();

    let photo = PhotoRepo::create(
        &pool,
        owner.id,
        &CreatePhoto {
            family_id: family,
            title: "Legacy row".to_string(),
            description: None,
            image_url: format!("/uploads/{}", outside.display()),
            date_taken: None,
            location: None,
        },
        None,
    )
    .await
    .unwrap();

    let response = delete_auth(app, &format!("/api/photo/{}", photo.id), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(outside.exists());

    let _ = std::fs::remove_file(outside);
    let _ = std::fs::remove_dir_all(upload_dir);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn photo_update_is_owner_only(pool: PgPool) {
    let (_, owner) = user_with_token(&pool, "owner@test.com").await;
    let (_, other) = user_with_token(&pool, "other@test.com").await;
    let app = common::build_test_app(pool);
    let family = create_family(app.clone(), &owner, "Mine").await;

    let created = body_json(
        post_json_auth(
            app.clone(),
            "/api/photo",
            json!({ "family_id": family, "title": "Beach", "image_url": "https://x.test/b.jpg" }),
            &owner,
        )
        .await,
    )
    .await;
    let uri = format!("/api/photo/{}", created["id"]);

    let response = put_json_auth(app.clone(), &uri, json!({ "title": "Stolen" }), &other).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = put_json_auth(app, &uri, json!({ "location": "Brighton" }), &owner).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Beach");
    assert_eq!(json["location"], "Brighton");
}

// ---------------------------------------------------------------------------
// Stories
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn stories_by_family_and_member(pool: PgPool) {
    let (_, token) = user_with_token(&pool, "owner@test.com").await;
    let app = common::build_test_app(pool);
    let family = create_family(app.clone(), &token, "Tales").await;
    let member = create_member(app.clone(), &token, family, "Nana", "Tales").await;

    for (title, member_id) in [("About Nana", Some(member)), ("The old farm", None)] {
        let response = post_json_auth(
            app.clone(),
            "/api/story",
            json!({
                "family_id": family,
                "member_id": member_id,
                "title": title,
                "content": "Once upon a time."
            }),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let by_family = body_json(get(app.clone(), &format!("/api/story/family/{family}")).await).await;
    assert_eq!(by_family.as_array().unwrap().len(), 2);

    let by_member = body_json(get(app.clone(), &format!("/api/story/member/{member}")).await).await;
    assert_eq!(by_member.as_array().unwrap().len(), 1);
    assert_eq!(by_member[0]["title"], "About Nana");

    let response = get(app, "/api/story/member/313131").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn story_subject_must_belong_to_family(pool: PgPool) {
    let (_, token) = user_with_token(&pool, "owner@test.com").await;
    let app = common::build_test_app(pool);
    let family = create_family(app.clone(), &token, "Ours").await;
    let other = create_family(app.clone(), &token, "Theirs").await;
    let outsider = create_member(app.clone(), &token, other, "Out", "Sider").await;

    let response = post_json_auth(
        app.clone(),
        "/api/story",
        json!({ "family_id": family, "member_id": outsider, "title": "Wrong", "content": "x" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        app,
        "/api/story",
        json!({ "family_id": family, "title": "", "content": "x" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_member_keeps_story(pool: PgPool) {
    let (_, token) = user_with_token(&pool, "owner@test.com").await;
    let app = common::build_test_app(pool);
    let family = create_family(app.clone(), &token, "Keep").await;
    let member = create_member(app.clone(), &token, family, "Gone", "Keep").await;

    let story = body_json(
        post_json_auth(
            app.clone(),
            "/api/story",
            json!({ "family_id": family, "member_id": member, "title": "Memory", "content": "..." }),
            &token,
        )
        .await,
    )
    .await;

    delete_auth(app.clone(), &format!("/api/member/{member}"), &token).await;

    let response = get(app, &format!("/api/story/{}", story["id"])).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["member_id"].is_null());
}
