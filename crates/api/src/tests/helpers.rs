// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared fixtures for the api tests.

use uni_vote_persistence::SqlitePersistence;

use crate::auth::{AdminAuthService, AdminSession};

/// The admin password every test university is created with.
pub const TEST_PASSWORD: &str = "password123";

pub fn create_test_persistence() -> SqlitePersistence {
    SqlitePersistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn create_test_university(
    persistence: &mut SqlitePersistence,
    name: &str,
    slug: &str,
) -> i64 {
    persistence
        .create_university(name, slug, TEST_PASSWORD, None, None)
        .expect("Failed to create university")
}

pub fn create_test_category(
    persistence: &mut SqlitePersistence,
    university_id: i64,
    gender: &str,
    contest_type: &str,
) -> i64 {
    persistence
        .create_category(university_id, gender, contest_type)
        .expect("Failed to create category")
}

pub fn create_test_candidate(
    persistence: &mut SqlitePersistence,
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
        .expect("Failed to create candidate")
}

pub fn login_test_admin(
    persistence: &mut SqlitePersistence,
    university_id: i64,
) -> (String, AdminSession) {
    AdminAuthService::login(persistence, university_id, TEST_PASSWORD)
        .expect("Failed to log in test admin")
}
