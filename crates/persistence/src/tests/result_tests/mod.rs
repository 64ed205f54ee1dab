// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for vote aggregation queries.

use crate::SqlitePersistence;
use crate::tests::{create_test_candidate, create_test_category, create_test_university};

#[test]
fn test_aggregate_results_counts_votes_per_candidate() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let university_id = create_test_university(&mut persistence);
    let category_id = create_test_category(&mut persistence, university_id, "male", "king");
    let kim = create_test_candidate(&mut persistence, university_id, "male", 1, "Kim");
    let park = create_test_candidate(&mut persistence, university_id, "male", 2, "Park");

    // Kim gets two votes, Park one
    persistence
        .insert_vote("device-1", university_id, category_id, kim)
        .unwrap();
    persistence
        .insert_vote("device-2", university_id, category_id, kim)
        .unwrap();
    persistence
        .insert_vote("device-3", university_id, category_id, park)
        .unwrap();

    let results = persistence.aggregate_results(university_id).unwrap();
    assert_eq!(results.len(), 2);

    let kim_row = results.iter().find(|r| r.candidate_id == kim).unwrap();
    assert_eq!(kim_row.votes, 2);
    assert_eq!(kim_row.university_id, university_id);
    assert_eq!(kim_row.category_id, category_id);
    assert_eq!(kim_row.gender, "male");
    assert_eq!(kim_row.contest_type, "king");
    assert_eq!(kim_row.waist_number, 1);
    assert_eq!(kim_row.name, "Kim");

    let park_row = results.iter().find(|r| r.candidate_id == park).unwrap();
    assert_eq!(park_row.votes, 1);
}

#[test]
fn test_aggregate_results_omits_zero_vote_candidates() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let university_id = create_test_university(&mut persistence);
    let category_id = create_test_category(&mut persistence, university_id, "male", "king");
    let kim = create_test_candidate(&mut persistence, university_id, "male", 1, "Kim");
    create_test_candidate(&mut persistence, university_id, "male", 2, "Unvoted");

    persistence
        .insert_vote("device-1", university_id, category_id, kim)
        .unwrap();

    let results = persistence.aggregate_results(university_id).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].candidate_id, kim);
}

#[test]
fn test_aggregate_results_empty_without_votes() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let university_id = create_test_university(&mut persistence);
    create_test_category(&mut persistence, university_id, "male", "king");
    create_test_candidate(&mut persistence, university_id, "male", 1, "Kim");

    let results = persistence.aggregate_results(university_id).unwrap();
    assert!(results.is_empty());
}

#[test]
fn test_aggregate_results_scoped_to_university() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let first = create_test_university(&mut persistence);
    let second = persistence
        .create_university("Other University", "other", "password123", None, None)
        .unwrap();

    let first_category = create_test_category(&mut persistence, first, "male", "king");
    let first_candidate = create_test_candidate(&mut persistence, first, "male", 1, "Kim");
    let second_category = create_test_category(&mut persistence, second, "male", "king");
    let second_candidate = create_test_candidate(&mut persistence, second, "male", 1, "Park");

    persistence
        .insert_vote("device-1", first, first_category, first_candidate)
        .unwrap();
    persistence
        .insert_vote("device-1", second, second_category, second_candidate)
        .unwrap();

    let results = persistence.aggregate_results(first).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "Kim");
}

#[test]
fn test_top_results_picks_leader_per_category() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let university_id = create_test_university(&mut persistence);
    let king = create_test_category(&mut persistence, university_id, "male", "king");
    let style = create_test_category(&mut persistence, university_id, "male", "style");
    let kim = create_test_candidate(&mut persistence, university_id, "male", 1, "Kim");
    let park = create_test_candidate(&mut persistence, university_id, "male", 2, "Park");

    // King: Kim 2, Park 1. Style: Park 1.
    persistence
        .insert_vote("device-1", university_id, king, kim)
        .unwrap();
    persistence
        .insert_vote("device-2", university_id, king, kim)
        .unwrap();
    persistence
        .insert_vote("device-3", university_id, king, park)
        .unwrap();
    persistence
        .insert_vote("device-1", university_id, style, park)
        .unwrap();

    let leaders = persistence.top_results(&[king, style]).unwrap();
    assert_eq!(leaders.len(), 2);

    let king_leader = leaders.iter().find(|l| l.category_id == king).unwrap();
    assert_eq!(king_leader.candidate_id, kim);
    assert_eq!(king_leader.votes, 2);

    let style_leader = leaders.iter().find(|l| l.category_id == style).unwrap();
    assert_eq!(style_leader.candidate_id, park);
    assert_eq!(style_leader.votes, 1);
}

#[test]
fn test_top_results_breaks_ties_by_lower_candidate_id() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let university_id = create_test_university(&mut persistence);
    let category_id = create_test_category(&mut persistence, university_id, "male", "king");
    let kim = create_test_candidate(&mut persistence, university_id, "male", 1, "Kim");
    let park = create_test_candidate(&mut persistence, university_id, "male", 2, "Park");

    // One vote each
    persistence
        .insert_vote("device-1", university_id, category_id, kim)
        .unwrap();
    persistence
        .insert_vote("device-2", university_id, category_id, park)
        .unwrap();

    let leaders = persistence.top_results(&[category_id]).unwrap();
    assert_eq!(leaders.len(), 1);
    assert_eq!(leaders[0].candidate_id, kim.min(park));
    assert_eq!(leaders[0].votes, 1);
}

#[test]
fn test_top_results_omits_categories_without_votes() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let university_id = create_test_university(&mut persistence);
    let voted = create_test_category(&mut persistence, university_id, "male", "king");
    let unvoted = create_test_category(&mut persistence, university_id, "male", "style");
    let kim = create_test_candidate(&mut persistence, university_id, "male", 1, "Kim");

    persistence
        .insert_vote("device-1", university_id, voted, kim)
        .unwrap();

    let leaders = persistence.top_results(&[voted, unvoted]).unwrap();
    assert_eq!(leaders.len(), 1);
    assert_eq!(leaders[0].category_id, voted);
}
