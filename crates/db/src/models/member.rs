//! Family member entity model and DTOs.

use myfamily_core::member::{age_in_years, full_name};
use myfamily_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use validator::Validate;

/// A member row from the `family_members` table.
#[derive(Debug, Clone, FromRow)]
pub struct FamilyMember {
    pub id: DbId,
    pub family_id: DbId,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub gender: Option<String>,
    pub date_of_birth: Option<Date>,
    pub place_of_birth: Option<String>,
    pub date_of_death: Option<Date>,
    pub place_of_death: Option<String>,
    pub biography: Option<String>,
    pub profile_picture_url: Option<String>,
    pub created_by_user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl FamilyMember {
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, self.middle_name.as_deref(), &self.last_name)
    }
}

/// API shape of a member, with display name and age filled in.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct FamilyMemberResponse {
    pub id: DbId,
    pub family_id: DbId,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub full_name: String,
    pub gender: Option<String>,
    pub date_of_birth: Option<Date>,
    pub place_of_birth: Option<String>,
    pub date_of_death: Option<Date>,
    pub place_of_death: Option<String>,
    pub is_living: bool,
    /// Whole years, at death for deceased members.
    pub age: Option<i32>,
    pub biography: Option<String>,
    pub profile_picture_url: Option<String>,
    pub created_by_user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl FamilyMemberResponse {
    pub fn new(member: FamilyMember, today: Date) -> Self {
        let full_name = member.full_name();
        let age = age_in_years(member.date_of_birth, member.date_of_death, today);
        Self {
            id: member.id,
            family_id: member.family_id,
            full_name,
            is_living: member.date_of_death.is_none(),
            age,
            first_name: member.first_name,
            middle_name: member.middle_name,
            last_name: member.last_name,
            gender: member.gender,
            date_of_birth: member.date_of_birth,
            place_of_birth: member.place_of_birth,
            date_of_death: member.date_of_death,
            place_of_death: member.place_of_death,
            biography: member.biography,
            profile_picture_url: member.profile_picture_url,
            created_by_user_id: member.created_by_user_id,
            created_at: member.created_at,
            updated_at: member.updated_at,
        }
    }
}

/// DTO for creating a new member. The creator comes from the auth token.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFamilyMember {
    pub family_id: DbId,
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(max = 100))]
    pub middle_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    pub gender: Option<String>,
    pub date_of_birth: Option<Date>,
    #[validate(length(max = 200))]
    pub place_of_birth: Option<String>,
    pub date_of_death: Option<Date>,
    #[validate(length(max = 200))]
    pub place_of_death: Option<String>,
    #[validate(length(max = 10000))]
    pub biography: Option<String>,
    #[validate(length(max = 2048))]
    pub profile_picture_url: Option<String>,
}

/// DTO for updating an existing member. All fields are optional; the
/// owning family cannot change.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateFamilyMember {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub middle_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<Date>,
    #[validate(length(max = 200))]
    pub place_of_birth: Option<String>,
    pub date_of_death: Option<Date>,
    #[validate(length(max = 200))]
    pub place_of_death: Option<String>,
    #[validate(length(max = 10000))]
    pub biography: Option<String>,
    #[validate(length(max = 2048))]
    pub profile_picture_url: Option<String>,
}
