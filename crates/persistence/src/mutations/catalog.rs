// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Category and candidate mutations.
//!
//! This module contains backend-agnostic mutations for managing the voting
//! catalog. Most mutations use Diesel DSL, with minimal backend-specific
//! helpers abstracted via the `PersistenceBackend` trait. Deletions check
//! for referencing votes first so the vote trail is never orphaned.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{candidates, categories};
use crate::error::PersistenceError;
use crate::queries::catalog::{
    is_candidate_referenced_mysql, is_candidate_referenced_sqlite, is_category_referenced_mysql,
    is_category_referenced_sqlite,
};

backend_fn! {
/// Creates a new voting category.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `university_id` - The university the category belongs to
/// * `gender` - The gender bucket (`male` or `female`)
/// * `contest_type` - The contest type (`king`, `style`, `popular`, or `innocent`)
///
/// # Errors
///
/// Returns an error if the category cannot be created or if the
/// university does not exist.
pub fn create_category(
    conn: &mut _,
    university_id: i64,
    gender: &str,
    contest_type: &str,
) -> Result<i64, PersistenceError> {
    info!(
        "Creating {} {} category for university {}",
        gender, contest_type, university_id
    );

    diesel::insert_into(categories::table)
        .values((
            categories::university_id.eq(university_id),
            categories::gender.eq(gender),
            categories::contest_type.eq(contest_type),
        ))
        .execute(conn)?;

    let category_id: i64 = conn.get_last_insert_rowid()?;

    info!(category_id, "Category created successfully");

    Ok(category_id)
}
}

backend_fn! {
/// Updates the editable fields of a category.
///
/// Deactivated categories disappear from public listings but keep their
/// votes.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `category_id` - The category ID
/// * `gender` - The gender bucket (`male` or `female`)
/// * `contest_type` - The contest type (`king`, `style`, `popular`, or `innocent`)
/// * `is_active` - The new activation state
///
/// # Errors
///
/// Returns an error if the database update fails or the category does
/// not exist.
pub fn update_category(
    conn: &mut _,
    category_id: i64,
    gender: &str,
    contest_type: &str,
    is_active: bool,
) -> Result<(), PersistenceError> {
    info!("Updating category ID: {}", category_id);

    let rows_affected: usize = diesel::update(categories::table)
        .filter(categories::category_id.eq(category_id))
        .set((
            categories::gender.eq(gender),
            categories::contest_type.eq(contest_type),
            categories::is_active.eq(i32::from(is_active)),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::CategoryNotFound(category_id));
    }

    Ok(())
}
}

/// Deletes a category if no votes reference it (`SQLite` version).
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `category_id` - The category ID
///
/// # Errors
///
/// Returns an error if:
/// - Votes reference the category
/// - The category does not exist
/// - The database operation fails
pub fn delete_category_sqlite(
    conn: &mut SqliteConnection,
    category_id: i64,
) -> Result<(), PersistenceError> {
    info!("Attempting to delete category ID: {}", category_id);

    // Check if votes reference the category
    if is_category_referenced_sqlite(conn, category_id)? {
        return Err(PersistenceError::CategoryReferenced { category_id });
    }

    // Attempt deletion
    let rows_affected: usize = diesel::delete(categories::table)
        .filter(categories::category_id.eq(category_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::CategoryNotFound(category_id));
    }

    info!("Deleted category ID: {}", category_id);
    Ok(())
}

/// Deletes a category if no votes reference it (`MySQL` version).
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `category_id` - The category ID
///
/// # Errors
///
/// Returns an error if:
/// - Votes reference the category
/// - The category does not exist
/// - The database operation fails
pub fn delete_category_mysql(
    conn: &mut MysqlConnection,
    category_id: i64,
) -> Result<(), PersistenceError> {
    info!("Attempting to delete category ID: {}", category_id);

    // Check if votes reference the category
    if is_category_referenced_mysql(conn, category_id)? {
        return Err(PersistenceError::CategoryReferenced { category_id });
    }

    // Attempt deletion
    let rows_affected: usize = diesel::delete(categories::table)
        .filter(categories::category_id.eq(category_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::CategoryNotFound(category_id));
    }

    info!("Deleted category ID: {}", category_id);
    Ok(())
}

backend_fn! {
/// Creates a new candidate.
///
/// The waist number must be unique within the university and gender.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `university_id` - The university the candidate stands at
/// * `gender` - The gender roster (`male` or `female`)
/// * `waist_number` - The contest number worn by the candidate
/// * `name` - The candidate's name
/// * `birthday` - Optional birthday (`YYYY-MM-DD`)
/// * `height_cm` - Optional height in centimeters
/// * `hobby` - Optional hobby text
/// * `image_url` - Optional profile image URL
///
/// # Errors
///
/// Returns an error if the candidate cannot be created or if the waist
/// number is already taken in this roster.
#[allow(clippy::too_many_arguments)]
pub fn create_candidate(
    conn: &mut _,
    university_id: i64,
    gender: &str,
    waist_number: i32,
    name: &str,
    birthday: Option<&str>,
    height_cm: Option<i32>,
    hobby: Option<&str>,
    image_url: Option<&str>,
) -> Result<i64, PersistenceError> {
    info!(
        "Creating candidate {} (waist number {}, {}) for university {}",
        name, waist_number, gender, university_id
    );

    diesel::insert_into(candidates::table)
        .values((
            candidates::university_id.eq(university_id),
            candidates::gender.eq(gender),
            candidates::waist_number.eq(waist_number),
            candidates::name.eq(name),
            candidates::birthday.eq(birthday),
            candidates::height_cm.eq(height_cm),
            candidates::hobby.eq(hobby),
            candidates::image_url.eq(image_url),
        ))
        .execute(conn)?;

    let candidate_id: i64 = conn.get_last_insert_rowid()?;

    info!(candidate_id, "Candidate created successfully");

    Ok(candidate_id)
}
}

backend_fn! {
/// Updates the editable fields of a candidate.
///
/// Deactivated candidates disappear from public rosters but keep their
/// votes.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `candidate_id` - The candidate ID
/// * `gender` - The gender roster (`male` or `female`)
/// * `waist_number` - The contest number worn by the candidate
/// * `name` - The candidate's name
/// * `birthday` - Optional birthday (`YYYY-MM-DD`)
/// * `height_cm` - Optional height in centimeters
/// * `hobby` - Optional hobby text
/// * `image_url` - Optional profile image URL
/// * `is_active` - The new activation state
///
/// # Errors
///
/// Returns an error if the database update fails, the candidate does
/// not exist, or the new waist number is already taken in this roster.
#[allow(clippy::too_many_arguments)]
pub fn update_candidate(
    conn: &mut _,
    candidate_id: i64,
    gender: &str,
    waist_number: i32,
    name: &str,
    birthday: Option<&str>,
    height_cm: Option<i32>,
    hobby: Option<&str>,
    image_url: Option<&str>,
    is_active: bool,
) -> Result<(), PersistenceError> {
    debug!("Updating candidate ID: {}", candidate_id);

    let rows_affected: usize = diesel::update(candidates::table)
        .filter(candidates::candidate_id.eq(candidate_id))
        .set((
            candidates::gender.eq(gender),
            candidates::waist_number.eq(waist_number),
            candidates::name.eq(name),
            candidates::birthday.eq(birthday),
            candidates::height_cm.eq(height_cm),
            candidates::hobby.eq(hobby),
            candidates::image_url.eq(image_url),
            candidates::is_active.eq(i32::from(is_active)),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::CandidateNotFound(candidate_id));
    }

    Ok(())
}
}

/// Deletes a candidate if no votes reference them (`SQLite` version).
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `candidate_id` - The candidate ID
///
/// # Errors
///
/// Returns an error if:
/// - Votes reference the candidate
/// - The candidate does not exist
/// - The database operation fails
pub fn delete_candidate_sqlite(
    conn: &mut SqliteConnection,
    candidate_id: i64,
) -> Result<(), PersistenceError> {
    info!("Attempting to delete candidate ID: {}", candidate_id);

    // Check if votes reference the candidate
    if is_candidate_referenced_sqlite(conn, candidate_id)? {
        return Err(PersistenceError::CandidateReferenced { candidate_id });
    }

    // Attempt deletion
    let rows_affected: usize = diesel::delete(candidates::table)
        .filter(candidates::candidate_id.eq(candidate_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::CandidateNotFound(candidate_id));
    }

    info!("Deleted candidate ID: {}", candidate_id);
    Ok(())
}

/// Deletes a candidate if no votes reference them (`MySQL` version).
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `candidate_id` - The candidate ID
///
/// # Errors
///
/// Returns an error if:
/// - Votes reference the candidate
/// - The candidate does not exist
/// - The database operation fails
pub fn delete_candidate_mysql(
    conn: &mut MysqlConnection,
    candidate_id: i64,
) -> Result<(), PersistenceError> {
    info!("Attempting to delete candidate ID: {}", candidate_id);

    // Check if votes reference the candidate
    if is_candidate_referenced_mysql(conn, candidate_id)? {
        return Err(PersistenceError::CandidateReferenced { candidate_id });
    }

    // Attempt deletion
    let rows_affected: usize = diesel::delete(candidates::table)
        .filter(candidates::candidate_id.eq(candidate_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::CandidateNotFound(candidate_id));
    }

    info!("Deleted candidate ID: {}", candidate_id);
    Ok(())
}
