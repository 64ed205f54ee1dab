// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for per-device ticket usage counting.

use crate::SqlitePersistence;
use crate::tests::{create_test_candidate, create_test_category, create_test_university};

#[test]
fn test_count_voted_categories_starts_at_zero() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let university_id = create_test_university(&mut persistence);

    let voted = persistence
        .count_voted_categories("device-1", university_id, "male")
        .unwrap();
    assert_eq!(voted, 0);
}

#[test]
fn test_count_voted_categories_counts_per_gender() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let university_id = create_test_university(&mut persistence);
    let male_king = create_test_category(&mut persistence, university_id, "male", "king");
    let male_style = create_test_category(&mut persistence, university_id, "male", "style");
    let female_king = create_test_category(&mut persistence, university_id, "female", "king");

    let kim = create_test_candidate(&mut persistence, university_id, "male", 1, "Kim");
    let choi = create_test_candidate(&mut persistence, university_id, "female", 1, "Choi");

    persistence
        .insert_vote("device-1", university_id, male_king, kim)
        .unwrap();
    persistence
        .insert_vote("device-1", university_id, male_style, kim)
        .unwrap();
    persistence
        .insert_vote("device-1", university_id, female_king, choi)
        .unwrap();

    // Two male categories voted, one female
    let male_voted = persistence
        .count_voted_categories("device-1", university_id, "male")
        .unwrap();
    assert_eq!(male_voted, 2);

    let female_voted = persistence
        .count_voted_categories("device-1", university_id, "female")
        .unwrap();
    assert_eq!(female_voted, 1);

    // A different device has spent nothing
    let fresh_device = persistence
        .count_voted_categories("device-2", university_id, "male")
        .unwrap();
    assert_eq!(fresh_device, 0);
}

#[test]
fn test_count_voted_categories_scoped_to_university() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let first = create_test_university(&mut persistence);
    let second = persistence
        .create_university("Other University", "other", "password123", None, None)
        .unwrap();

    let first_category = create_test_category(&mut persistence, first, "male", "king");
    let first_candidate = create_test_candidate(&mut persistence, first, "male", 1, "Kim");
    persistence
        .insert_vote("device-1", first, first_category, first_candidate)
        .unwrap();

    // Spending a ticket at one university leaves the other untouched
    let spent_at_first = persistence
        .count_voted_categories("device-1", first, "male")
        .unwrap();
    assert_eq!(spent_at_first, 1);

    let spent_at_second = persistence
        .count_voted_categories("device-1", second, "male")
        .unwrap();
    assert_eq!(spent_at_second, 0);
}
