//! Relationship entity model and DTOs.

use myfamily_core::relationship::RelationshipEdge;
use myfamily_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use validator::Validate;

/// A relationship row from the `relationships` table.
///
/// Reads "the related member is the primary member's `relationship_type`".
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct Relationship {
    pub id: DbId,
    pub family_id: DbId,
    pub primary_member_id: DbId,
    pub related_member_id: DbId,
    pub relationship_type: i16,
    pub notes: Option<String>,
    pub created_by_user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Relationship {
    pub fn edge(&self) -> RelationshipEdge {
        RelationshipEdge {
            primary_member_id: self.primary_member_id,
            related_member_id: self.related_member_id,
            relationship_type: self.relationship_type,
        }
    }
}

/// A relationship seen from one member, labelled for that member.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct MemberRelationship {
    pub relationship_id: DbId,
    pub other_member_id: DbId,
    pub other_member_name: String,
    pub relationship_type: i16,
    /// What the other member is to the viewing member, e.g. `"Child"`.
    pub label: String,
    pub notes: Option<String>,
}

/// DTO for creating a new relationship. The creator comes from the auth token.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRelationship {
    pub family_id: DbId,
    pub primary_member_id: DbId,
    pub related_member_id: DbId,
    pub relationship_type: i16,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

/// DTO for updating an existing relationship. The endpoints are fixed.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateRelationship {
    pub relationship_type: Option<i16>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}
