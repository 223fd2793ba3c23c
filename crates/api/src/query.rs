//! Query-string types shared by list handlers.

use myfamily_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use myfamily_core::types::DbId;
use serde::Deserialize;

/// `?search=&limit=&offset=` on the family catalog.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl SearchParams {
    /// `(limit, offset)` clamped to the catalog bounds.
    pub fn page(&self) -> (i64, i64) {
        (
            clamp_limit(self.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT),
            clamp_offset(self.offset),
        )
    }
}

/// `?family_id=&search=` on the member list.
#[derive(Debug, Default, Deserialize)]
pub struct MemberListParams {
    pub family_id: Option<DbId>,
    pub search: Option<String>,
}

/// `?family_id=` on relationship, photo, and story lists.
#[derive(Debug, Default, Deserialize)]
pub struct FamilyScopeParams {
    pub family_id: Option<DbId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_defaults_and_clamps() {
        assert_eq!(SearchParams::default().page(), (DEFAULT_PAGE_LIMIT, 0));

        let wild = SearchParams {
            search: None,
            limit: Some(10_000),
            offset: Some(-3),
        };
        assert_eq!(wild.page(), (MAX_PAGE_LIMIT, 0));
    }
}
