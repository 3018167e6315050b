//! Input validation run before any request goes out.

use chrono::NaiveDate;
use validator::ValidateEmail;

use crate::error::AppError;
use crate::result::AppResult;

const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 2100;

/// Trimmed, non-empty resource name.
pub fn require_name(name: &str) -> AppResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Name cannot be empty"));
    }
    if trimmed.contains('/') {
        return Err(AppError::validation(format!(
            "Name '{trimmed}' cannot contain '/'"
        )));
    }
    Ok(trimmed)
}

/// Syntactically valid email address.
pub fn validate_email(email: &str) -> AppResult<()> {
    if email.validate_email() {
        Ok(())
    } else {
        Err(AppError::validation(format!("'{email}' is not a valid email address")))
    }
}

/// Password and its confirmation must match and not be empty.
pub fn validate_password_match(password: &str, confirm: &str) -> AppResult<()> {
    if password.is_empty() {
        return Err(AppError::validation("Please enter a password"));
    }
    if password != confirm {
        return Err(AppError::validation("The passwords do not match"));
    }
    Ok(())
}

/// Parse a `dd/mm/yyyy` date. Leading zeros are optional for day and month;
/// the year must have four digits and lie in 1900..=2100.
pub fn parse_date(value: &str) -> AppResult<NaiveDate> {
    let invalid = || AppError::validation(format!("'{value}' should be a date as dd/mm/yyyy"));

    let mut parts = value.trim().split('/');
    let (Some(day), Some(month), Some(year), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };
    let numeric = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
    if year.len() != 4 || !numeric(day) || !numeric(month) || !numeric(year) {
        return Err(invalid());
    }

    let day: u32 = day.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(AppError::validation(format!(
            "Please enter a year between {MIN_YEAR} and {MAX_YEAR}"
        )));
    }
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}
