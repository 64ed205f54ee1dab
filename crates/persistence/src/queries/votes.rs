// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Device vote history and export queries.
//!
//! Both queries join `votes` with `categories` and `candidates` so the
//! caller gets labeled rows without issuing follow-up lookups. Rows come
//! back in vote ID order, which is insertion order.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use crate::data_models::{DeviceVoteData, VoteExportData};
use crate::diesel_schema::{candidates, categories, votes};
use crate::error::PersistenceError;

backend_fn! {
/// Lists the votes a device has cast at a university.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `device_id` - The voting device identifier
/// * `university_id` - The university scope
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_device_votes(
    conn: &mut _,
    device_id: &str,
    university_id: i64,
) -> Result<Vec<DeviceVoteData>, PersistenceError> {
    debug!(
        "Listing votes of device {} at university {}",
        device_id, university_id
    );

    type DeviceVoteRow = (i64, String, String, i64, String, String, i32, Option<String>, String);

    let rows: Vec<DeviceVoteRow> = votes::table
        .inner_join(categories::table)
        .inner_join(candidates::table)
        .filter(votes::device_id.eq(device_id))
        .filter(votes::university_id.eq(university_id))
        .order(votes::vote_id.asc())
        .select((
            votes::category_id,
            categories::gender,
            categories::contest_type,
            votes::candidate_id,
            candidates::name,
            candidates::gender,
            candidates::waist_number,
            candidates::image_url,
            votes::created_at,
        ))
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(
            |(
                category_id,
                category_gender,
                category_type,
                candidate_id,
                candidate_name,
                candidate_gender,
                candidate_waist_number,
                candidate_image_url,
                voted_at,
            )| DeviceVoteData {
                category_id,
                category_gender,
                category_type,
                candidate_id,
                candidate_name,
                candidate_gender,
                candidate_waist_number,
                candidate_image_url,
                voted_at,
            },
        )
        .collect())
}
}

backend_fn! {
/// Lists every vote cast at a university, labeled for the CSV export.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `university_id` - The university whose votes to export
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_votes_for_export(
    conn: &mut _,
    university_id: i64,
) -> Result<Vec<VoteExportData>, PersistenceError> {
    debug!("Listing votes for export, university {}", university_id);

    type VoteExportRow = (i64, String, i64, String, String, i64, String, String, i32);

    let rows: Vec<VoteExportRow> = votes::table
        .inner_join(categories::table)
        .inner_join(candidates::table)
        .filter(votes::university_id.eq(university_id))
        .order(votes::vote_id.asc())
        .select((
            votes::vote_id,
            votes::device_id,
            votes::category_id,
            categories::gender,
            categories::contest_type,
            votes::candidate_id,
            candidates::name,
            candidates::gender,
            candidates::waist_number,
        ))
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(
            |(
                vote_id,
                device_id,
                category_id,
                category_gender,
                category_type,
                candidate_id,
                candidate_name,
                candidate_gender,
                waist_number,
            )| VoteExportData {
                vote_id,
                device_id,
                category_id,
                category_gender,
                category_type,
                candidate_id,
                candidate_name,
                candidate_gender,
                waist_number,
            },
        )
        .collect())
}
}
