// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! University, category, and candidate queries.
//!
//! This module contains backend-agnostic queries for the voting catalog:
//! the universities that run contests, the categories they vote in, and
//! the candidates standing in them. All queries use Diesel DSL and work
//! across all supported database backends.

use diesel::dsl::count;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use crate::data_models::{CandidateData, CategoryData, UniversityData};
use crate::diesel_schema::{candidates, categories, universities, votes};
use crate::error::PersistenceError;
use uni_vote_domain::Direction;

/// Diesel Queryable struct for university rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = universities)]
struct UniversityRow {
    university_id: i64,
    name: String,
    slug: String,
    admin_password_hash: String,
    is_active: i32,
    voting_start_at: Option<String>,
    voting_end_at: Option<String>,
    created_at: String,
}

/// Diesel Queryable struct for category rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = categories)]
struct CategoryRow {
    category_id: i64,
    university_id: i64,
    gender: String,
    contest_type: String,
    is_active: i32,
    created_at: String,
}

/// Diesel Queryable struct for candidate rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = candidates)]
struct CandidateRow {
    candidate_id: i64,
    university_id: i64,
    gender: String,
    waist_number: i32,
    name: String,
    birthday: Option<String>,
    height_cm: Option<i32>,
    hobby: Option<String>,
    image_url: Option<String>,
    is_active: i32,
    created_at: String,
}

impl From<UniversityRow> for UniversityData {
    fn from(row: UniversityRow) -> Self {
        Self {
            university_id: row.university_id,
            name: row.name,
            slug: row.slug,
            admin_password_hash: row.admin_password_hash,
            is_active: row.is_active != 0,
            voting_start_at: row.voting_start_at,
            voting_end_at: row.voting_end_at,
            created_at: row.created_at,
        }
    }
}

impl From<CategoryRow> for CategoryData {
    fn from(row: CategoryRow) -> Self {
        Self {
            category_id: row.category_id,
            university_id: row.university_id,
            gender: row.gender,
            contest_type: row.contest_type,
            is_active: row.is_active != 0,
            created_at: row.created_at,
        }
    }
}

impl From<CandidateRow> for CandidateData {
    fn from(row: CandidateRow) -> Self {
        Self {
            candidate_id: row.candidate_id,
            university_id: row.university_id,
            gender: row.gender,
            waist_number: row.waist_number,
            name: row.name,
            birthday: row.birthday,
            height_cm: row.height_cm,
            hobby: row.hobby,
            image_url: row.image_url,
            is_active: row.is_active != 0,
            created_at: row.created_at,
        }
    }
}

backend_fn! {
/// Lists all active universities, ordered by name.
///
/// This feeds the public landing page, so deactivated universities are
/// excluded.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_active_universities(
    conn: &mut _,
) -> Result<Vec<UniversityData>, PersistenceError> {
    debug!("Listing active universities");

    let rows: Vec<UniversityRow> = universities::table
        .filter(universities::is_active.eq(1))
        .order(universities::name.asc())
        .select(UniversityRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(UniversityData::from).collect())
}
}

backend_fn! {
/// Retrieves a university by ID, active or not.
///
/// Callers that serve public traffic must check `is_active` themselves;
/// admin flows need to see deactivated universities too.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `university_id` - The university ID
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the university is not found.
pub fn get_university(
    conn: &mut _,
    university_id: i64,
) -> Result<Option<UniversityData>, PersistenceError> {
    debug!("Looking up university by ID: {}", university_id);

    let result: Result<UniversityRow, diesel::result::Error> = universities::table
        .filter(universities::university_id.eq(university_id))
        .select(UniversityRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(UniversityData::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Lists the active voting categories of a university.
///
/// Rows are ordered by gender, then by contest type, both ascending.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `university_id` - The university whose categories to list
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_active_categories(
    conn: &mut _,
    university_id: i64,
) -> Result<Vec<CategoryData>, PersistenceError> {
    debug!("Listing active categories for university {}", university_id);

    let rows: Vec<CategoryRow> = categories::table
        .filter(categories::university_id.eq(university_id))
        .filter(categories::is_active.eq(1))
        .order((categories::gender.asc(), categories::contest_type.asc()))
        .select(CategoryRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(CategoryData::from).collect())
}
}

backend_fn! {
/// Lists every category of a university, including deactivated ones.
///
/// This feeds the admin dashboard and exports, which must show the full
/// catalog.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `university_id` - The university whose categories to list
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_all_categories(
    conn: &mut _,
    university_id: i64,
) -> Result<Vec<CategoryData>, PersistenceError> {
    debug!("Listing all categories for university {}", university_id);

    let rows: Vec<CategoryRow> = categories::table
        .filter(categories::university_id.eq(university_id))
        .order((categories::gender.asc(), categories::contest_type.asc()))
        .select(CategoryRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(CategoryData::from).collect())
}
}

backend_fn! {
/// Retrieves a category by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `category_id` - The category ID
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the category is not found.
pub fn get_category(
    conn: &mut _,
    category_id: i64,
) -> Result<Option<CategoryData>, PersistenceError> {
    debug!("Looking up category by ID: {}", category_id);

    let result: Result<CategoryRow, diesel::result::Error> = categories::table
        .filter(categories::category_id.eq(category_id))
        .select(CategoryRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(CategoryData::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Lists the active candidates of one gender at a university.
///
/// Rows are ordered by waist number ascending, which is the order voters
/// browse them in.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `university_id` - The university whose candidates to list
/// * `gender` - The gender to filter by (`male` or `female`)
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_active_candidates(
    conn: &mut _,
    university_id: i64,
    gender: &str,
) -> Result<Vec<CandidateData>, PersistenceError> {
    debug!(
        "Listing active {} candidates for university {}",
        gender, university_id
    );

    let rows: Vec<CandidateRow> = candidates::table
        .filter(candidates::university_id.eq(university_id))
        .filter(candidates::gender.eq(gender))
        .filter(candidates::is_active.eq(1))
        .order(candidates::waist_number.asc())
        .select(CandidateRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(CandidateData::from).collect())
}
}

backend_fn! {
/// Lists every candidate of a university, including deactivated ones.
///
/// Rows are ordered by gender, then waist number, so the admin dashboard
/// and CSV export show both rosters in a stable order.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `university_id` - The university whose candidates to list
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_all_candidates(
    conn: &mut _,
    university_id: i64,
) -> Result<Vec<CandidateData>, PersistenceError> {
    debug!("Listing all candidates for university {}", university_id);

    let rows: Vec<CandidateRow> = candidates::table
        .filter(candidates::university_id.eq(university_id))
        .order((candidates::gender.asc(), candidates::waist_number.asc()))
        .select(CandidateRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(CandidateData::from).collect())
}
}

backend_fn! {
/// Retrieves a candidate by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `candidate_id` - The candidate ID
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the candidate is not found.
pub fn get_candidate(
    conn: &mut _,
    candidate_id: i64,
) -> Result<Option<CandidateData>, PersistenceError> {
    debug!("Looking up candidate by ID: {}", candidate_id);

    let result: Result<CandidateRow, diesel::result::Error> = candidates::table
        .filter(candidates::candidate_id.eq(candidate_id))
        .select(CandidateRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(CandidateData::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Checks whether any votes reference a category.
///
/// Used before deletion to preserve the vote trail.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `category_id` - The category ID to check
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn is_category_referenced(
    conn: &mut _,
    category_id: i64,
) -> Result<bool, PersistenceError> {
    debug!("Checking vote references for category ID: {}", category_id);

    let vote_count: i64 = votes::table
        .filter(votes::category_id.eq(category_id))
        .select(count(votes::vote_id))
        .first(conn)?;

    Ok(vote_count > 0)
}
}

backend_fn! {
/// Checks whether any votes reference a candidate.
///
/// Used before deletion to preserve the vote trail.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `candidate_id` - The candidate ID to check
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn is_candidate_referenced(
    conn: &mut _,
    candidate_id: i64,
) -> Result<bool, PersistenceError> {
    debug!("Checking vote references for candidate ID: {}", candidate_id);

    let vote_count: i64 = votes::table
        .filter(votes::candidate_id.eq(candidate_id))
        .select(count(votes::vote_id))
        .first(conn)?;

    Ok(vote_count > 0)
}
}

backend_fn! {
/// Retrieves the active candidate adjacent to a waist number.
///
/// `Direction::Next` returns the active candidate with the smallest waist
/// number strictly greater than `waist_number`; `Direction::Prev` returns
/// the one with the largest waist number strictly smaller. The profile
/// page uses this to step through the roster.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `university_id` - The university the roster belongs to
/// * `gender` - The gender roster to step through
/// * `waist_number` - The waist number of the current candidate
/// * `direction` - Which neighbor to fetch
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if there is no neighbor in that direction.
pub fn get_neighbor_candidate(
    conn: &mut _,
    university_id: i64,
    gender: &str,
    waist_number: i32,
    direction: Direction,
) -> Result<Option<CandidateData>, PersistenceError> {
    debug!(
        "Looking up {} neighbor of waist number {} ({}, university {})",
        direction, waist_number, gender, university_id
    );

    let base = candidates::table
        .filter(candidates::university_id.eq(university_id))
        .filter(candidates::gender.eq(gender))
        .filter(candidates::is_active.eq(1));

    let result: Result<CandidateRow, diesel::result::Error> = match direction {
        Direction::Next => base
            .filter(candidates::waist_number.gt(waist_number))
            .order(candidates::waist_number.asc())
            .select(CandidateRow::as_select())
            .first(conn),
        Direction::Prev => base
            .filter(candidates::waist_number.lt(waist_number))
            .order(candidates::waist_number.desc())
            .select(CandidateRow::as_select())
            .first(conn),
    };

    match result {
        Ok(row) => Ok(Some(CandidateData::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}
