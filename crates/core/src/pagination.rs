//! Pagination and substring-search helpers for list endpoints.

use serde::Serialize;

/// Default number of rows per page.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;

/// Maximum number of rows per page.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Build an `ILIKE` pattern matching `search` anywhere in a column.
///
/// `%`, `_` and `\` in the input are escaped so they match literally.
/// Blank input returns `None` (no filter).
///
/// ```
/// use myfamily_core::pagination::substring_pattern;
/// assert_eq!(substring_pattern("smith"), Some("%smith%".to_string()));
/// assert_eq!(substring_pattern(" 100% "), Some("%100\\%%".to_string()));
/// assert_eq!(substring_pattern("   "), None);
/// ```
pub fn substring_pattern(search: &str) -> Option<String> {
    let trimmed = search.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut pattern = String::with_capacity(trimmed.len() + 2);
    pattern.push('%');
    for c in trimmed.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    Some(pattern)
}

/// One page of a list result.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T: Serialize> {
    pub items: Vec<T>,
    pub total_count: i64,
    pub limit: i64,
    pub offset: i64,
}

impl<T: Serialize> Page<T> {
    pub fn has_more(&self) -> bool {
        self.offset + (self.items.len() as i64) < self.total_count
    }

    /// Convert every item, keeping the paging metadata.
    pub fn map<U: Serialize>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            limit: self.limit,
            offset: self.offset,
        }
    }
}
