//! Handlers for the `/story` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use myfamily_core::error::CoreError;
use myfamily_core::types::DbId;
use myfamily_db::models::story::{CreateStory, Story, UpdateStory};
use myfamily_db::repositories::{MemberRepo, StoryRepo};
use validator::Validate;

use crate::error::AppResult;
use crate::handlers::family::{ensure_family_exists, find_family};
use crate::handlers::member::find_member;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{ensure_owner_or_admin, RequireAuth};
use crate::query::FamilyScopeParams;
use crate::state::AppState;

/// POST /api/story
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(input): Json<CreateStory>,
) -> AppResult<(StatusCode, Json<Story>)> {
    input.validate()?;
    ensure_family_exists(&state, input.family_id).await?;
    if let Some(member_id) = input.member_id {
        ensure_subject_in_family(&state, member_id, input.family_id).await?;
    }

    let story = StoryRepo::create(&state.pool, user.user_id, &input).await?;
    tracing::info!(story_id = story.id, family_id = story.family_id, "Story created");
    Ok((StatusCode::CREATED, Json(story)))
}

/// GET /api/story?family_id=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<FamilyScopeParams>,
) -> AppResult<Json<Vec<Story>>> {
    Ok(Json(StoryRepo::list(&state.pool, params.family_id).await?))
}

/// GET /api/story/family/{family_id}
pub async fn list_by_family(
    State(state): State<AppState>,
    Path(family_id): Path<DbId>,
) -> AppResult<Json<Vec<Story>>> {
    find_family(&state, family_id).await?;
    Ok(Json(StoryRepo::list(&state.pool, Some(family_id)).await?))
}

/// GET /api/story/member/{member_id}
pub async fn list_by_member(
    State(state): State<AppState>,
    Path(member_id): Path<DbId>,
) -> AppResult<Json<Vec<Story>>> {
    find_member(&state, member_id).await?;
    Ok(Json(StoryRepo::list_by_member(&state.pool, member_id).await?))
}

/// GET /api/story/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Story>> {
    Ok(Json(find_story(&state, id).await?))
}

/// PUT /api/story/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStory>,
) -> AppResult<Json<Story>> {
    input.validate()?;
    let existing = find_story(&state, id).await?;
    ensure_owner_or_admin(&user, existing.created_by_user_id, "Story")?;
    if let Some(member_id) = input.member_id {
        ensure_subject_in_family(&state, member_id, existing.family_id).await?;
    }

    let story = StoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::not_found("Story", id))?;
    Ok(Json(story))
}

/// DELETE /api/story/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = find_story(&state, id).await?;
    ensure_owner_or_admin(&user, existing.created_by_user_id, "Story")?;

    if StoryRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CoreError::not_found("Story", id).into())
    }
}

async fn find_story(state: &AppState, id: DbId) -> AppResult<Story> {
    StoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Story", id).into())
}

/// A story's subject must be a member of the story's family.
async fn ensure_subject_in_family(state: &AppState, member_id: DbId, family_id: DbId) -> AppResult<()> {
    match MemberRepo::find_by_id(&state.pool, member_id).await? {
        Some(m) if m.family_id == family_id => Ok(()),
        Some(_) => Err(CoreError::Validation(format!(
            "Member {member_id} does not belong to family {family_id}"
        ))
        .into()),
        None => Err(CoreError::Validation(format!("Member with id {member_id} does not exist")).into()),
    }
}
