// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Vote aggregation queries.
//!
//! Results are computed from the `votes` table at query time; no tallies
//! are stored. A candidate only appears in the output once at least one
//! vote names them, so zero-vote candidates produce no rows.

use std::cmp::Ordering;
use std::collections::HashMap;

use diesel::dsl::count;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use crate::data_models::{FullResultData, TopResultData};
use crate::diesel_schema::{candidates, categories, votes};
use crate::error::PersistenceError;
use uni_vote_domain::compare_ranked;

/// Category columns needed to label a result row.
#[derive(Queryable, Selectable)]
#[diesel(table_name = categories)]
struct CategoryMetaRow {
    category_id: i64,
    gender: String,
    contest_type: String,
}

/// Candidate columns needed to label a result row.
#[derive(Queryable, Selectable)]
#[diesel(table_name = candidates)]
struct CandidateMetaRow {
    candidate_id: i64,
    waist_number: i32,
    name: String,
}

backend_fn! {
/// Aggregates per-candidate vote counts for every category of a
/// university.
///
/// Each returned row is one `(category, candidate)` pair with its vote
/// count, labeled with the category's gender and contest type and the
/// candidate's waist number and name. Rows are ordered by category ID,
/// then candidate ID; ranking within a category is the caller's job.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `university_id` - The university whose votes to aggregate
///
/// # Errors
///
/// Returns an error if any of the database queries fail.
pub fn aggregate_results(
    conn: &mut _,
    university_id: i64,
) -> Result<Vec<FullResultData>, PersistenceError> {
    debug!("Aggregating results for university {}", university_id);

    let counts: Vec<(i64, i64, i64)> = votes::table
        .filter(votes::university_id.eq(university_id))
        .group_by((votes::category_id, votes::candidate_id))
        .select((votes::category_id, votes::candidate_id, count(votes::vote_id)))
        .load(conn)?;

    let category_meta: HashMap<i64, (String, String)> = categories::table
        .filter(categories::university_id.eq(university_id))
        .select(CategoryMetaRow::as_select())
        .load(conn)?
        .into_iter()
        .map(|row: CategoryMetaRow| (row.category_id, (row.gender, row.contest_type)))
        .collect();

    let candidate_meta: HashMap<i64, (i32, String)> = candidates::table
        .filter(candidates::university_id.eq(university_id))
        .select(CandidateMetaRow::as_select())
        .load(conn)?
        .into_iter()
        .map(|row: CandidateMetaRow| (row.candidate_id, (row.waist_number, row.name)))
        .collect();

    let mut results: Vec<FullResultData> = Vec::with_capacity(counts.len());
    for (category_id, candidate_id, vote_count) in counts {
        // Foreign keys guarantee the metadata exists; a miss would mean
        // the vote belongs to another university's category.
        let Some((gender, contest_type)) = category_meta.get(&category_id) else {
            continue;
        };
        let Some((waist_number, name)) = candidate_meta.get(&candidate_id) else {
            continue;
        };
        results.push(FullResultData {
            university_id,
            category_id,
            gender: gender.clone(),
            contest_type: contest_type.clone(),
            candidate_id,
            waist_number: *waist_number,
            name: name.clone(),
            votes: vote_count,
        });
    }

    results.sort_by(|a, b| {
        a.category_id
            .cmp(&b.category_id)
            .then(a.candidate_id.cmp(&b.candidate_id))
    });

    Ok(results)
}
}

backend_fn! {
/// Returns the leading candidate of each requested category.
///
/// The leader is the candidate with the most votes; ties break toward
/// the lower candidate ID. Categories without any votes produce no row.
/// Rows are ordered by category ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `category_ids` - The categories whose leaders to compute
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn top_results(
    conn: &mut _,
    category_ids: &[i64],
) -> Result<Vec<TopResultData>, PersistenceError> {
    debug!("Computing leaders for {} categories", category_ids.len());

    let counts: Vec<(i64, i64, i64)> = votes::table
        .filter(votes::category_id.eq_any(category_ids))
        .group_by((votes::category_id, votes::candidate_id))
        .select((votes::category_id, votes::candidate_id, count(votes::vote_id)))
        .load(conn)?;

    let mut leaders: HashMap<i64, TopResultData> = HashMap::new();
    for (category_id, candidate_id, vote_count) in counts {
        let contender: TopResultData = TopResultData {
            category_id,
            candidate_id,
            votes: vote_count,
        };
        match leaders.get(&category_id) {
            Some(current)
                if compare_ranked(
                    contender.votes,
                    contender.candidate_id,
                    current.votes,
                    current.candidate_id,
                ) != Ordering::Less => {}
            _ => {
                leaders.insert(category_id, contender);
            }
        }
    }

    let mut results: Vec<TopResultData> = leaders.into_values().collect();
    results.sort_by_key(|leader| leader.category_id);

    Ok(results)
}
}
