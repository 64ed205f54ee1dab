// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{ContestType, Gender};
use std::cmp::Ordering;

/// Canonical display order for result sections.
///
/// Results pages render the headline contests first, then the remaining
/// contests, alternating male and female within each contest type. Keys
/// not in this list (from retired contest types still present in stored
/// votes) sort after all canonical keys.
pub const SECTION_DISPLAY_ORDER: [&str; 8] = [
    "male-king",
    "female-king",
    "male-style",
    "female-style",
    "male-popular",
    "female-popular",
    "male-innocent",
    "female-innocent",
];

/// Builds the section key for a (gender, contest type) pair.
///
/// Keys are lowercase `"<gender>-<type>"` strings, e.g. `"male-king"`.
#[must_use]
pub fn section_key(gender: Gender, contest_type: ContestType) -> String {
    format!("{}-{}", gender.as_str(), contest_type.as_str())
}

/// Orders observed section keys for display.
///
/// Canonical keys come first in [`SECTION_DISPLAY_ORDER`] order; any other
/// observed keys follow in their first-seen order. Duplicates are dropped.
#[must_use]
pub fn order_section_keys(observed: &[String]) -> Vec<String> {
    let mut ordered: Vec<String> = SECTION_DISPLAY_ORDER
        .iter()
        .filter(|canonical| observed.iter().any(|key| key == *canonical))
        .map(ToString::to_string)
        .collect();

    for key in observed {
        if !SECTION_DISPLAY_ORDER.contains(&key.as_str()) && !ordered.contains(key) {
            ordered.push(key.clone());
        }
    }

    ordered
}

/// Compares two result rows for ranking within a category or section.
///
/// Higher vote counts rank first; ties break on the smaller candidate ID
/// so repeated aggregations of the same data always produce the same
/// order.
#[must_use]
pub const fn compare_ranked(
    votes_a: i64,
    candidate_a: i64,
    votes_b: i64,
    candidate_b: i64,
) -> Ordering {
    if votes_a != votes_b {
        // Descending by votes.
        if votes_b < votes_a {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    } else if candidate_a < candidate_b {
        Ordering::Less
    } else if candidate_a > candidate_b {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}
