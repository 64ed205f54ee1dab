// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-device ticket usage queries.
//!
//! A device starts with a fixed ticket allowance per gender at each
//! university and spends one ticket per category it votes in. The unique
//! constraint on `(device_id, category_id)` means each vote row is a
//! distinct voted category, so counting vote rows counts spent tickets.

use diesel::dsl::count;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use crate::diesel_schema::{categories, votes};
use crate::error::PersistenceError;

backend_fn! {
/// Counts the categories of one gender a device has voted in at a
/// university.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `device_id` - The voting device identifier
/// * `university_id` - The university scope
/// * `gender` - The category gender to count (`male` or `female`)
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_voted_categories(
    conn: &mut _,
    device_id: &str,
    university_id: i64,
    gender: &str,
) -> Result<i64, PersistenceError> {
    debug!(
        "Counting {} categories voted by device {} at university {}",
        gender, device_id, university_id
    );

    let voted: i64 = votes::table
        .inner_join(categories::table)
        .filter(votes::device_id.eq(device_id))
        .filter(votes::university_id.eq(university_id))
        .filter(categories::gender.eq(gender))
        .select(count(votes::vote_id))
        .first(conn)?;

    Ok(voted)
}
}

backend_fn! {
/// Reports whether a device has already voted in a category.
///
/// The unique constraint on `(device_id, category_id)` is the authority;
/// this query exists so callers can reject duplicates before attempting
/// an insert.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `device_id` - The voting device identifier
/// * `category_id` - The category to check
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn has_voted_in_category(
    conn: &mut _,
    device_id: &str,
    category_id: i64,
) -> Result<bool, PersistenceError> {
    debug!(
        "Checking whether device {} voted in category {}",
        device_id, category_id
    );

    let existing: i64 = votes::table
        .filter(votes::device_id.eq(device_id))
        .filter(votes::category_id.eq(category_id))
        .select(count(votes::vote_id))
        .first(conn)?;

    Ok(existing > 0)
}
}
