// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{Candidate, University};
use chrono::NaiveDate;

/// Minimum plausible candidate height in centimeters.
pub const MIN_HEIGHT_CM: i32 = 50;
/// Maximum plausible candidate height in centimeters.
pub const MAX_HEIGHT_CM: i32 = 300;

/// Validates that a university's basic field constraints are met.
///
/// This function checks field shape only. It does NOT check slug
/// uniqueness (that requires context).
///
/// # Arguments
///
/// * `university` - The university to validate
///
/// # Returns
///
/// * `Ok(())` if the university's fields are valid
/// * `Err(DomainError)` for the first field that fails
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty
/// - The slug is empty or contains characters outside `a-z`, `0-9`, `-`
pub fn validate_university_fields(university: &University) -> Result<(), DomainError> {
    // Rule: display name must not be blank
    if university.name().trim().is_empty() {
        return Err(DomainError::InvalidUniversityName(String::from(
            "University name cannot be empty",
        )));
    }

    // Rule: slug must not be empty
    if university.slug().is_empty() {
        return Err(DomainError::InvalidSlug(String::from(
            "Slug cannot be empty",
        )));
    }

    // Rule: slug is URL-safe (lowercase alphanumeric and hyphens)
    if !university
        .slug()
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(DomainError::InvalidSlug(format!(
            "Slug '{}' may only contain lowercase letters, digits, and hyphens",
            university.slug()
        )));
    }

    Ok(())
}

/// Validates that a candidate's basic field constraints are met.
///
/// This function checks field shape only. It does NOT check waist number
/// uniqueness (that requires context and is enforced by storage).
///
/// # Arguments
///
/// * `candidate` - The candidate to validate
///
/// # Returns
///
/// * `Ok(())` if the candidate's fields are valid
/// * `Err(DomainError)` for the first field that fails
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty
/// - The waist number is not positive
/// - The height, when present, is outside the plausible range
/// - The birthday, when present, is not a valid `YYYY-MM-DD` date
pub fn validate_candidate_fields(candidate: &Candidate) -> Result<(), DomainError> {
    // Rule: name must not be blank
    if candidate.name.trim().is_empty() {
        return Err(DomainError::InvalidCandidateName(String::from(
            "Candidate name cannot be empty",
        )));
    }

    // Rule: waist number is a positive contest number
    if candidate.waist_number <= 0 {
        return Err(DomainError::InvalidWaistNumber {
            value: candidate.waist_number,
        });
    }

    // Rule: height, when given, must be plausible
    if let Some(height) = candidate.height_cm
        && !(MIN_HEIGHT_CM..=MAX_HEIGHT_CM).contains(&height)
    {
        return Err(DomainError::InvalidHeight { value: height });
    }

    // Rule: birthday, when given, must be a real calendar date
    if let Some(birthday) = &candidate.birthday
        && NaiveDate::parse_from_str(birthday, "%Y-%m-%d").is_err()
    {
        return Err(DomainError::InvalidBirthday {
            date_string: birthday.clone(),
        });
    }

    Ok(())
}
