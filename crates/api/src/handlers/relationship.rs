//! Handlers for the `/relationship` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use myfamily_core::error::CoreError;
use myfamily_core::relationship::{forward_label, reverse_label, RelationshipType};
use myfamily_core::types::DbId;
use myfamily_db::models::relationship::{CreateRelationship, Relationship, UpdateRelationship};
use myfamily_db::repositories::{MemberRepo, RelationshipRepo};
use serde::Serialize;
use validator::Validate;

use crate::error::AppResult;
use crate::handlers::family::ensure_family_exists;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{ensure_owner_or_admin, RequireAuth};
use crate::query::FamilyScopeParams;
use crate::state::AppState;

/// A relationship with both readings spelled out: `label` is what the
/// related member is to the primary, `reverse_label` the other way round.
#[derive(Debug, Serialize)]
pub struct RelationshipResponse {
    #[serde(flatten)]
    pub relationship: Relationship,
    pub label: &'static str,
    pub reverse_label: &'static str,
}

impl From<Relationship> for RelationshipResponse {
    fn from(relationship: Relationship) -> Self {
        let code = relationship.relationship_type;
        Self {
            relationship,
            label: forward_label(code),
            reverse_label: reverse_label(code),
        }
    }
}

/// POST /api/relationship
///
/// Both members must exist, differ, and belong to `family_id`.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(input): Json<CreateRelationship>,
) -> AppResult<(StatusCode, Json<RelationshipResponse>)> {
    input.validate()?;
    check_type(input.relationship_type)?;
    if input.primary_member_id == input.related_member_id {
        return Err(CoreError::Validation("A member cannot be related to itself".into()).into());
    }
    ensure_family_exists(&state, input.family_id).await?;
    for member_id in [input.primary_member_id, input.related_member_id] {
        ensure_member_in_family(&state, member_id, input.family_id).await?;
    }

    let relationship = RelationshipRepo::create(&state.pool, user.user_id, &input).await?;
    tracing::info!(
        relationship_id = relationship.id,
        family_id = relationship.family_id,
        relationship_type = relationship.relationship_type,
        "Relationship created"
    );
    Ok((StatusCode::CREATED, Json(relationship.into())))
}

/// GET /api/relationship?family_id=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<FamilyScopeParams>,
) -> AppResult<Json<Vec<RelationshipResponse>>> {
    let rows = RelationshipRepo::list(&state.pool, params.family_id).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// GET /api/relationship/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<RelationshipResponse>> {
    Ok(Json(find_relationship(&state, id).await?.into()))
}

/// PUT /api/relationship/{id}
///
/// Only the type and notes are editable; the two ends are fixed.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRelationship>,
) -> AppResult<Json<RelationshipResponse>> {
    input.validate()?;
    if let Some(code) = input.relationship_type {
        check_type(code)?;
    }
    let existing = find_relationship(&state, id).await?;
    ensure_owner_or_admin(&user, existing.created_by_user_id, "Relationship")?;

    let relationship = RelationshipRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::not_found("Relationship", id))?;
    Ok(Json(relationship.into()))
}

/// DELETE /api/relationship/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = find_relationship(&state, id).await?;
    ensure_owner_or_admin(&user, existing.created_by_user_id, "Relationship")?;

    if RelationshipRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CoreError::not_found("Relationship", id).into())
    }
}

async fn find_relationship(state: &AppState, id: DbId) -> AppResult<Relationship> {
    RelationshipRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Relationship", id).into())
}

fn check_type(code: i16) -> Result<RelationshipType, CoreError> {
    RelationshipType::from_code(code).ok_or_else(|| {
        CoreError::Validation(format!(
            "Unknown relationship type {code}; expected 1..={}",
            RelationshipType::ALL.len()
        ))
    })
}

async fn ensure_member_in_family(state: &AppState, member_id: DbId, family_id: DbId) -> AppResult<()> {
    let member = MemberRepo::find_by_id(&state.pool, member_id)
        .await?
        .ok_or_else(|| CoreError::Validation(format!("Member with id {member_id} does not exist")))?;
    if member.family_id != family_id {
        return Err(CoreError::Validation(format!(
            "Member {member_id} does not belong to family {family_id}"
        ))
        .into());
    }
    Ok(())
}
