//! Couple-unit grouping for the family tree view.
//!
//! Members are partitioned into units of two spouses plus their shared
//! children, or a single parent plus children when no spouse is recorded.
//! There is no depth computation: every unit sits in generation 0.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::Serialize;

use crate::relationship::{RelationshipEdge, RelationshipType};
use crate::types::DbId;

/// Generation assigned to every unit.
pub const ROOT_GENERATION: u32 = 0;

/// Spouses (or a lone parent) rendered together with their children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoupleUnit {
    pub generation: u32,
    /// One or two member ids.
    pub partners: Vec<DbId>,
    /// Children shared by all partners, ascending by id.
    pub children: Vec<DbId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TreeLayout {
    pub units: Vec<CoupleUnit>,
    /// Members that are neither a partner nor a child in any unit, in input order.
    pub unassigned: Vec<DbId>,
}

/// Group `member_ids` into couple units using `edges`.
///
/// Edges that reference ids outside `member_ids`, or a member with itself,
/// are ignored.
pub fn group_into_units(member_ids: &[DbId], edges: &[RelationshipEdge]) -> TreeLayout {
    let known: HashSet<DbId> = member_ids.iter().copied().collect();
    let mut children_of: HashMap<DbId, BTreeSet<DbId>> = HashMap::new();
    let mut spouse_pairs: Vec<(DbId, DbId)> = Vec::new();
    let mut seen_pairs: HashSet<(DbId, DbId)> = HashSet::new();

    for edge in edges {
        let (a, b) = (edge.primary_member_id, edge.related_member_id);
        if a == b || !known.contains(&a) || !known.contains(&b) {
            continue;
        }
        match edge.kind() {
            // related is primary's parent
            Some(RelationshipType::Parent) => {
                children_of.entry(b).or_default().insert(a);
            }
            // related is primary's child
            Some(RelationshipType::Child) => {
                children_of.entry(a).or_default().insert(b);
            }
            Some(RelationshipType::Spouse) => {
                if seen_pairs.insert((a.min(b), a.max(b))) {
                    spouse_pairs.push((a, b));
                }
            }
            _ => {}
        }
    }

    let empty = BTreeSet::new();
    let mut units = Vec::new();
    let mut partnered: HashSet<DbId> = HashSet::new();

    for (a, b) in spouse_pairs {
        let of_a = children_of.get(&a).unwrap_or(&empty);
        let of_b = children_of.get(&b).unwrap_or(&empty);
        units.push(CoupleUnit {
            generation: ROOT_GENERATION,
            partners: vec![a, b],
            children: of_a.intersection(of_b).copied().collect(),
        });
        partnered.insert(a);
        partnered.insert(b);
    }

    for &id in member_ids {
        if partnered.contains(&id) {
            continue;
        }
        if let Some(children) = children_of.get(&id).filter(|c| !c.is_empty()) {
            units.push(CoupleUnit {
                generation: ROOT_GENERATION,
                partners: vec![id],
                children: children.iter().copied().collect(),
            });
            partnered.insert(id);
        }
    }

    let placed: HashSet<DbId> = units
        .iter()
        .flat_map(|u| u.partners.iter().chain(u.children.iter()).copied())
        .collect();

    let mut unassigned = Vec::new();
    let mut emitted = HashSet::new();
    for &id in member_ids {
        if !placed.contains(&id) && emitted.insert(id) {
            unassigned.push(id);
        }
    }

    TreeLayout { units, unassigned }
}
