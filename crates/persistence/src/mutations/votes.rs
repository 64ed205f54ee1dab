// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Vote insertion.
//!
//! A vote is an append-only row; there is no update or delete path. The
//! unique constraint on `(device_id, category_id)` is the final arbiter
//! of one-vote-per-category, regardless of what the caller checked
//! beforehand.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::votes;
use crate::error::PersistenceError;

backend_fn! {
/// Records a vote by a device for a candidate in a category.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `device_id` - The voting device identifier
/// * `university_id` - The university the vote belongs to
/// * `category_id` - The category voted in
/// * `candidate_id` - The candidate voted for
///
/// # Errors
///
/// Returns [`PersistenceError::UniqueViolation`] if the device already
/// voted in this category, [`PersistenceError::ForeignKeyViolation`] if
/// any referenced row does not exist, and other errors if the insert
/// fails.
pub fn insert_vote(
    conn: &mut _,
    device_id: &str,
    university_id: i64,
    category_id: i64,
    candidate_id: i64,
) -> Result<i64, PersistenceError> {
    debug!(
        "Recording vote by device {} for candidate {} in category {}",
        device_id, candidate_id, category_id
    );

    diesel::insert_into(votes::table)
        .values((
            votes::device_id.eq(device_id),
            votes::university_id.eq(university_id),
            votes::category_id.eq(category_id),
            votes::candidate_id.eq(candidate_id),
        ))
        .execute(conn)?;

    let vote_id: i64 = conn.get_last_insert_rowid()?;

    debug!(vote_id, "Vote recorded");

    Ok(vote_id)
}
}
