//! Handlers for the `/family` resource, including the tree view.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use myfamily_core::error::CoreError;
use myfamily_core::family_tree::{group_into_units, TreeLayout};
use myfamily_core::pagination::Page;
use myfamily_core::types::DbId;
use myfamily_db::models::family::{CreateFamily, Family, FamilyOverview, UpdateFamily};
use myfamily_db::models::member::FamilyMemberResponse;
use myfamily_db::models::relationship::Relationship;
use myfamily_db::repositories::{FamilyFilter, FamilyRepo, MemberRepo, RelationshipRepo};
use serde::Serialize;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{ensure_owner_or_admin, RequireAuth};
use crate::query::SearchParams;
use crate::state::AppState;

/// Everything the SPA needs to draw one family's tree.
#[derive(Debug, Serialize)]
pub struct FamilyTreeResponse {
    pub family: Family,
    pub members: Vec<FamilyMemberResponse>,
    pub relationships: Vec<Relationship>,
    pub layout: TreeLayout,
}

/// POST /api/family
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(input): Json<CreateFamily>,
) -> AppResult<(StatusCode, Json<Family>)> {
    input.validate()?;
    let family = FamilyRepo::create(&state.pool, user.user_id, &input).await?;
    tracing::info!(family_id = family.id, user_id = user.user_id, "Family created");
    Ok((StatusCode::CREATED, Json(family)))
}

/// GET /api/family?search=&limit=&offset=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Page<FamilyOverview>>> {
    let (limit, offset) = params.page();
    let filter = FamilyFilter {
        search: params.search,
        created_by_user_id: None,
        limit,
        offset,
    };
    let (items, total_count) = FamilyRepo::list(&state.pool, &filter).await?;
    Ok(Json(Page {
        items,
        total_count,
        limit,
        offset,
    }))
}

/// GET /api/family/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<FamilyOverview>> {
    let family = FamilyRepo::find_overview(&state.pool, id)
        .await?
        .ok_or(CoreError::not_found("Family", id))?;
    Ok(Json(family))
}

/// PUT /api/family/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateFamily>,
) -> AppResult<Json<Family>> {
    input.validate()?;
    let existing = find_family(&state, id).await?;
    ensure_owner_or_admin(&user, existing.created_by_user_id, "Family")?;

    let family = FamilyRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::not_found("Family", id))?;
    Ok(Json(family))
}

/// DELETE /api/family/{id}
///
/// Members, relationships, photos, and stories go with it.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = find_family(&state, id).await?;
    ensure_owner_or_admin(&user, existing.created_by_user_id, "Family")?;

    if FamilyRepo::delete(&state.pool, id).await? {
        tracing::info!(family_id = id, user_id = user.user_id, "Family deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CoreError::not_found("Family", id).into())
    }
}

/// GET /api/family/{id}/tree
///
/// Members and relationships plus their grouping into couple units.
pub async fn tree(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<FamilyTreeResponse>> {
    let family = find_family(&state, id).await?;
    let members = MemberRepo::list_by_family(&state.pool, id).await?;
    let relationships = RelationshipRepo::list(&state.pool, Some(id)).await?;

    let member_ids: Vec<DbId> = members.iter().map(|m| m.id).collect();
    let edges: Vec<_> = relationships.iter().map(Relationship::edge).collect();
    let layout = group_into_units(&member_ids, &edges);

    let today = Utc::now().date_naive();
    Ok(Json(FamilyTreeResponse {
        family,
        members: members
            .into_iter()
            .map(|m| FamilyMemberResponse::new(m, today))
            .collect(),
        relationships,
        layout,
    }))
}

pub(crate) async fn find_family(state: &AppState, id: DbId) -> AppResult<Family> {
    FamilyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Family", id).into())
}

/// Like [`find_family`], for ids that arrive in a request body: a missing
/// family is a 400, not a 404.
pub(crate) async fn ensure_family_exists(state: &AppState, id: DbId) -> AppResult<()> {
    match FamilyRepo::find_by_id(&state.pool, id).await? {
        Some(_) => Ok(()),
        None => Err(CoreError::Validation(format!("Family with id {id} does not exist")).into()),
    }
}
