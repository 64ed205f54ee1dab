// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod catalog_tests;
mod initialization_tests;
mod result_tests;
mod session_tests;
mod ticket_tests;
mod vote_tests;

use crate::Persistence;

/// Creates a test university with no voting window and returns its ID.
pub fn create_test_university(persistence: &mut Persistence) -> i64 {
    persistence
        .create_university(
            "Test University",
            "test-university",
            "password123",
            None,
            None,
        )
        .unwrap()
}

/// Creates a test category and returns its ID.
pub fn create_test_category(
    persistence: &mut Persistence,
    university_id: i64,
    gender: &str,
    contest_type: &str,
) -> i64 {
    persistence
        .create_category(university_id, gender, contest_type)
        .unwrap()
}

/// Creates a test candidate with no profile extras and returns their ID.
pub fn create_test_candidate(
    persistence: &mut Persistence,
    university_id: i64,
    gender: &str,
    waist_number: i32,
    name: &str,
) -> i64 {
    persistence
        .create_candidate(
            university_id,
            gender,
            waist_number,
            name,
            None,
            None,
            None,
            None,
        )
        .unwrap()
}
