//! Handlers for the `/member` resource.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use myfamily_core::error::CoreError;
use myfamily_core::member::{validate_gender, validate_life_dates};
use myfamily_core::types::DbId;
use myfamily_db::models::member::{
    CreateFamilyMember, FamilyMember, FamilyMemberResponse, UpdateFamilyMember,
};
use myfamily_db::models::relationship::MemberRelationship;
use myfamily_db::repositories::{MemberRepo, RelationshipRepo};
use validator::Validate;

use crate::error::AppResult;
use crate::handlers::family::{ensure_family_exists, find_family};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{ensure_owner_or_admin, RequireAuth};
use crate::query::MemberListParams;
use crate::state::AppState;

/// POST /api/member
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(input): Json<CreateFamilyMember>,
) -> AppResult<(StatusCode, Json<FamilyMemberResponse>)> {
    input.validate()?;
    validate_gender(input.gender.as_deref())?;
    let today = Utc::now().date_naive();
    validate_life_dates(input.date_of_birth, input.date_of_death, today)?;
    ensure_family_exists(&state, input.family_id).await?;

    let member = MemberRepo::create(&state.pool, user.user_id, &input).await?;
    tracing::info!(
        member_id = member.id,
        family_id = member.family_id,
        "Family member created"
    );
    Ok((
        StatusCode::CREATED,
        Json(FamilyMemberResponse::new(member, today)),
    ))
}

/// GET /api/member?family_id=&search=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<MemberListParams>,
) -> AppResult<Json<Vec<FamilyMemberResponse>>> {
    let members =
        MemberRepo::list(&state.pool, params.family_id, params.search.as_deref()).await?;
    Ok(Json(to_responses(members)))
}

/// GET /api/member/family/{family_id}
pub async fn list_by_family(
    State(state): State<AppState>,
    Path(family_id): Path<DbId>,
) -> AppResult<Json<Vec<FamilyMemberResponse>>> {
    find_family(&state, family_id).await?;
    let members = MemberRepo::list_by_family(&state.pool, family_id).await?;
    Ok(Json(to_responses(members)))
}

/// GET /api/member/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<FamilyMemberResponse>> {
    let member = find_member(&state, id).await?;
    Ok(Json(FamilyMemberResponse::new(member, Utc::now().date_naive())))
}

/// PUT /api/member/{id}
///
/// Dates are checked against the stored values they would be combined with.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateFamilyMember>,
) -> AppResult<Json<FamilyMemberResponse>> {
    input.validate()?;
    validate_gender(input.gender.as_deref())?;

    let existing = find_member(&state, id).await?;
    ensure_owner_or_admin(&user, existing.created_by_user_id, "Member")?;

    let today = Utc::now().date_naive();
    validate_life_dates(
        input.date_of_birth.or(existing.date_of_birth),
        input.date_of_death.or(existing.date_of_death),
        today,
    )?;

    let member = MemberRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::not_found("Member", id))?;
    Ok(Json(FamilyMemberResponse::new(member, today)))
}

/// DELETE /api/member/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = find_member(&state, id).await?;
    ensure_owner_or_admin(&user, existing.created_by_user_id, "Member")?;

    if MemberRepo::delete(&state.pool, id).await? {
        tracing::info!(member_id = id, user_id = user.user_id, "Family member deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CoreError::not_found("Member", id).into())
    }
}

/// GET /api/member/{id}/relationships
///
/// Every relationship touching the member, labelled from its point of view.
pub async fn relationships(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<MemberRelationship>>> {
    let member = find_member(&state, id).await?;
    let relationships = RelationshipRepo::list_by_member(&state.pool, id).await?;

    let names: HashMap<DbId, String> = MemberRepo::list_by_family(&state.pool, member.family_id)
        .await?
        .iter()
        .map(|m| (m.id, m.full_name()))
        .collect();

    let labelled = relationships
        .into_iter()
        .map(|r| {
            let edge = r.edge();
            let other = edge.other_member(id);
            MemberRelationship {
                relationship_id: r.id,
                other_member_id: other,
                other_member_name: names.get(&other).cloned().unwrap_or_default(),
                relationship_type: r.relationship_type,
                label: edge.label_for(id).to_string(),
                notes: r.notes,
            }
        })
        .collect();
    Ok(Json(labelled))
}

pub(crate) async fn find_member(state: &AppState, id: DbId) -> AppResult<FamilyMember> {
    MemberRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Member", id).into())
}

fn to_responses(members: Vec<FamilyMember>) -> Vec<FamilyMemberResponse> {
    let today = Utc::now().date_naive();
    members
        .into_iter()
        .map(|m| FamilyMemberResponse::new(m, today))
        .collect()
}
