//! Family member helpers: display names, ages, and date sanity checks.

use chrono::Datelike;

use crate::error::CoreError;
use crate::types::Date;

/// Accepted values for the optional `gender` column.
pub const VALID_GENDERS: &[&str] = &["Male", "Female", "Other"];

/// Join the non-empty name parts with single spaces.
pub fn full_name(first: &str, middle: Option<&str>, last: &str) -> String {
    [Some(first), middle, Some(last)]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Age in whole years on `death` if set, otherwise on `today`.
///
/// Returns `None` without a birth date or when the end date precedes it.
pub fn age_in_years(birth: Option<Date>, death: Option<Date>, today: Date) -> Option<i32> {
    let birth = birth?;
    let end = death.unwrap_or(today);
    if end < birth {
        return None;
    }
    let mut years = end.year() - birth.year();
    if (end.month(), end.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    Some(years)
}

/// Reject birth dates in the future and deaths before birth.
pub fn validate_life_dates(
    birth: Option<Date>,
    death: Option<Date>,
    today: Date,
) -> Result<(), CoreError> {
    if let Some(b) = birth {
        if b > today {
            return Err(CoreError::Validation(
                "Date of birth cannot be in the future".into(),
            ));
        }
    }
    if let Some(d) = death {
        if d > today {
            return Err(CoreError::Validation(
                "Date of death cannot be in the future".into(),
            ));
        }
    }
    if let (Some(b), Some(d)) = (birth, death) {
        if d < b {
            return Err(CoreError::Validation(
                "Date of death cannot be before date of birth".into(),
            ));
        }
    }
    Ok(())
}

pub fn validate_gender(gender: Option<&str>) -> Result<(), CoreError> {
    match gender {
        Some(g) if !VALID_GENDERS.contains(&g) => Err(CoreError::Validation(format!(
            "Invalid gender '{g}'. Must be one of: {VALID_GENDERS:?}"
        ))),
        _ => Ok(()),
    }
}
