//! Relationship types and viewpoint-dependent labels.
//!
//! A stored relationship `{primary, related, type}` reads "the related member
//! is the primary member's `type`". Seen from the primary member the label is
//! the forward label of `type`; seen from the related member it is the reverse
//! label (a Parent record reads as Child from the other side).
//!
//! Type codes are persisted as SMALLINT. Codes outside the table still render,
//! using [`UNKNOWN_RELATIONSHIP_LABEL`].

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Label returned for any code not present in the lookup tables.
pub const UNKNOWN_RELATIONSHIP_LABEL: &str = "Unknown relationship";

/// Relationship kinds, discriminants match the persisted codes. Serialized
/// as the bare code.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i16", try_from = "i16")]
pub enum RelationshipType {
    Parent = 1,
    Child = 2,
    Spouse = 3,
    Sibling = 4,
    Grandparent = 5,
    Grandchild = 6,
    Uncle = 7,
    Aunt = 8,
    Nephew = 9,
    Niece = 10,
    Cousin = 11,
    GreatGrandparent = 12,
    GreatGrandchild = 13,
    StepParent = 14,
    StepChild = 15,
    StepSibling = 16,
    HalfSibling = 17,
    Other = 18,
}

/// Forward labels keyed by type code.
const FORWARD_LABELS: &[(i16, &str)] = &[
    (1, "Parent"),
    (2, "Child"),
    (3, "Spouse"),
    (4, "Sibling"),
    (5, "Grandparent"),
    (6, "Grandchild"),
    (7, "Uncle"),
    (8, "Aunt"),
    (9, "Nephew"),
    (10, "Niece"),
    (11, "Cousin"),
    (12, "Great-grandparent"),
    (13, "Great-grandchild"),
    (14, "Step-parent"),
    (15, "Step-child"),
    (16, "Step-sibling"),
    (17, "Half-sibling"),
    (18, "Other"),
];

/// Reverse labels keyed by type code. Symmetric types map to themselves.
const REVERSE_LABELS: &[(i16, &str)] = &[
    (1, "Child"),
    (2, "Parent"),
    (3, "Spouse"),
    (4, "Sibling"),
    (5, "Grandchild"),
    (6, "Grandparent"),
    (7, "Nephew/Niece"),
    (8, "Nephew/Niece"),
    (9, "Uncle/Aunt"),
    (10, "Uncle/Aunt"),
    (11, "Cousin"),
    (12, "Great-grandchild"),
    (13, "Great-grandparent"),
    (14, "Step-child"),
    (15, "Step-parent"),
    (16, "Step-sibling"),
    (17, "Half-sibling"),
    (18, "Other"),
];

impl RelationshipType {
    pub const ALL: [RelationshipType; 18] = [
        RelationshipType::Parent,
        RelationshipType::Child,
        RelationshipType::Spouse,
        RelationshipType::Sibling,
        RelationshipType::Grandparent,
        RelationshipType::Grandchild,
        RelationshipType::Uncle,
        RelationshipType::Aunt,
        RelationshipType::Nephew,
        RelationshipType::Niece,
        RelationshipType::Cousin,
        RelationshipType::GreatGrandparent,
        RelationshipType::GreatGrandchild,
        RelationshipType::StepParent,
        RelationshipType::StepChild,
        RelationshipType::StepSibling,
        RelationshipType::HalfSibling,
        RelationshipType::Other,
    ];

    /// Persisted SMALLINT code.
    pub fn code(self) -> i16 {
        self as i16
    }

    pub fn from_code(code: i16) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.code() == code)
    }

    pub fn label(self) -> &'static str {
        forward_label(self.code())
    }

    /// True when the relationship reads the same from both ends.
    pub fn is_symmetric(self) -> bool {
        matches!(
            self,
            RelationshipType::Spouse
                | RelationshipType::Sibling
                | RelationshipType::Cousin
                | RelationshipType::StepSibling
                | RelationshipType::HalfSibling
                | RelationshipType::Other
        )
    }

    /// The type as recorded from the other member's side.
    ///
    /// `None` for uncle/aunt/nephew/niece, whose inverse depends on the
    /// gender of the other member.
    pub fn inverse(self) -> Option<Self> {
        use RelationshipType::*;
        match self {
            Parent => Some(Child),
            Child => Some(Parent),
            Grandparent => Some(Grandchild),
            Grandchild => Some(Grandparent),
            GreatGrandparent => Some(GreatGrandchild),
            GreatGrandchild => Some(GreatGrandparent),
            StepParent => Some(StepChild),
            StepChild => Some(StepParent),
            Uncle | Aunt | Nephew | Niece => None,
            symmetric => Some(symmetric),
        }
    }
}

impl From<RelationshipType> for i16 {
    fn from(kind: RelationshipType) -> i16 {
        kind.code()
    }
}

impl TryFrom<i16> for RelationshipType {
    type Error = String;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| format!("unknown relationship type {code}"))
    }
}

fn lookup(table: &[(i16, &'static str)], code: i16) -> &'static str {
    table
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
        .unwrap_or(UNKNOWN_RELATIONSHIP_LABEL)
}

/// Label of `code` as seen from the primary member.
pub fn forward_label(code: i16) -> &'static str {
    lookup(FORWARD_LABELS, code)
}

/// Label of `code` as seen from the related member.
pub fn reverse_label(code: i16) -> &'static str {
    lookup(REVERSE_LABELS, code)
}

/// The parts of a stored relationship that matter for labelling and grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationshipEdge {
    pub primary_member_id: DbId,
    pub related_member_id: DbId,
    pub relationship_type: i16,
}

impl RelationshipEdge {
    /// Human-readable label of this relationship from `viewpoint_member_id`.
    ///
    /// The forward label applies only when the viewpoint is the primary
    /// member; every other viewpoint gets the reverse label.
    pub fn label_for(&self, viewpoint_member_id: DbId) -> &'static str {
        if viewpoint_member_id == self.primary_member_id {
            forward_label(self.relationship_type)
        } else {
            reverse_label(self.relationship_type)
        }
    }

    /// The member at the opposite end from `viewpoint_member_id`.
    pub fn other_member(&self, viewpoint_member_id: DbId) -> DbId {
        if viewpoint_member_id == self.primary_member_id {
            self.related_member_id
        } else {
            self.primary_member_id
        }
    }

    pub fn involves(&self, member_id: DbId) -> bool {
        self.primary_member_id == member_id || self.related_member_id == member_id
    }

    pub fn kind(&self) -> Option<RelationshipType> {
        RelationshipType::from_code(self.relationship_type)
    }
}
