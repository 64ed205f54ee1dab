// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for vote insertion and vote history queries.

use crate::tests::{create_test_candidate, create_test_category, create_test_university};
use crate::{PersistenceError, SqlitePersistence};

#[test]
fn test_insert_vote_succeeds() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let university_id = create_test_university(&mut persistence);
    let category_id = create_test_category(&mut persistence, university_id, "male", "king");
    let candidate_id = create_test_candidate(&mut persistence, university_id, "male", 1, "Kim");

    let vote_id = persistence
        .insert_vote("device-1", university_id, category_id, candidate_id)
        .unwrap();
    assert!(vote_id > 0);
}

#[test]
fn test_insert_vote_rejects_second_vote_in_same_category() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let university_id = create_test_university(&mut persistence);
    let category_id = create_test_category(&mut persistence, university_id, "male", "king");
    let first = create_test_candidate(&mut persistence, university_id, "male", 1, "Kim");
    let second = create_test_candidate(&mut persistence, university_id, "male", 2, "Park");

    persistence
        .insert_vote("device-1", university_id, category_id, first)
        .unwrap();

    // Same device, same category, different candidate
    let result = persistence.insert_vote("device-1", university_id, category_id, second);

    match result {
        Err(PersistenceError::UniqueViolation(_)) => {}
        other => panic!("Expected UniqueViolation error, got: {other:?}"),
    }
}

#[test]
fn test_insert_vote_allows_same_device_in_other_category() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let university_id = create_test_university(&mut persistence);
    let king = create_test_category(&mut persistence, university_id, "male", "king");
    let style = create_test_category(&mut persistence, university_id, "male", "style");
    let candidate_id = create_test_candidate(&mut persistence, university_id, "male", 1, "Kim");

    persistence
        .insert_vote("device-1", university_id, king, candidate_id)
        .unwrap();
    persistence
        .insert_vote("device-1", university_id, style, candidate_id)
        .unwrap();
}

#[test]
fn test_insert_vote_allows_two_devices_in_same_category() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let university_id = create_test_university(&mut persistence);
    let category_id = create_test_category(&mut persistence, university_id, "male", "king");
    let candidate_id = create_test_candidate(&mut persistence, university_id, "male", 1, "Kim");

    persistence
        .insert_vote("device-1", university_id, category_id, candidate_id)
        .unwrap();
    persistence
        .insert_vote("device-2", university_id, category_id, candidate_id)
        .unwrap();
}

#[test]
fn test_insert_vote_rejects_unknown_candidate() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let university_id = create_test_university(&mut persistence);
    let category_id = create_test_category(&mut persistence, university_id, "male", "king");

    let result = persistence.insert_vote("device-1", university_id, category_id, 9999);

    match result {
        Err(PersistenceError::ForeignKeyViolation(_)) => {}
        other => panic!("Expected ForeignKeyViolation error, got: {other:?}"),
    }
}

#[test]
fn test_has_voted_in_category_tracks_device() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let university_id = create_test_university(&mut persistence);
    let category_id = create_test_category(&mut persistence, university_id, "male", "king");
    let candidate_id = create_test_candidate(&mut persistence, university_id, "male", 1, "Kim");

    assert!(
        !persistence
            .has_voted_in_category("device-1", category_id)
            .unwrap()
    );

    persistence
        .insert_vote("device-1", university_id, category_id, candidate_id)
        .unwrap();

    assert!(
        persistence
            .has_voted_in_category("device-1", category_id)
            .unwrap()
    );
    assert!(
        !persistence
            .has_voted_in_category("device-2", category_id)
            .unwrap()
    );
}

#[test]
fn test_get_device_votes_returns_labeled_rows_in_insertion_order() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let university_id = create_test_university(&mut persistence);
    let king = create_test_category(&mut persistence, university_id, "male", "king");
    let style = create_test_category(&mut persistence, university_id, "female", "style");
    let kim = create_test_candidate(&mut persistence, university_id, "male", 1, "Kim");
    let choi = persistence
        .create_candidate(
            university_id,
            "female",
            2,
            "Choi",
            None,
            None,
            None,
            Some("https://img.example.com/choi.jpg"),
        )
        .unwrap();

    persistence
        .insert_vote("device-1", university_id, king, kim)
        .unwrap();
    persistence
        .insert_vote("device-1", university_id, style, choi)
        .unwrap();

    // Another device's vote must not appear
    persistence
        .insert_vote("device-2", university_id, king, kim)
        .unwrap();

    let votes = persistence
        .get_device_votes("device-1", university_id)
        .unwrap();
    assert_eq!(votes.len(), 2);

    assert_eq!(votes[0].category_id, king);
    assert_eq!(votes[0].category_gender, "male");
    assert_eq!(votes[0].category_type, "king");
    assert_eq!(votes[0].candidate_id, kim);
    assert_eq!(votes[0].candidate_name, "Kim");
    assert_eq!(votes[0].candidate_waist_number, 1);
    assert!(votes[0].candidate_image_url.is_none());
    assert!(!votes[0].voted_at.is_empty());

    assert_eq!(votes[1].category_id, style);
    assert_eq!(votes[1].candidate_name, "Choi");
    assert_eq!(
        votes[1].candidate_image_url.as_deref(),
        Some("https://img.example.com/choi.jpg")
    );
}

#[test]
fn test_get_device_votes_scoped_to_university() {
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

    let votes = persistence.get_device_votes("device-1", first).unwrap();
    assert_eq!(votes.len(), 1);
    assert_eq!(votes[0].candidate_name, "Kim");
}

#[test]
fn test_list_votes_for_export_labels_every_row() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let university_id = create_test_university(&mut persistence);
    let category_id = create_test_category(&mut persistence, university_id, "female", "popular");
    let candidate_id = create_test_candidate(&mut persistence, university_id, "female", 4, "Choi");

    persistence
        .insert_vote("device-1", university_id, category_id, candidate_id)
        .unwrap();
    persistence
        .insert_vote("device-2", university_id, category_id, candidate_id)
        .unwrap();

    let rows = persistence.list_votes_for_export(university_id).unwrap();
    assert_eq!(rows.len(), 2);

    // Oldest vote first
    assert!(rows[0].vote_id < rows[1].vote_id);
    assert_eq!(rows[0].device_id, "device-1");
    assert_eq!(rows[0].category_id, category_id);
    assert_eq!(rows[0].category_gender, "female");
    assert_eq!(rows[0].category_type, "popular");
    assert_eq!(rows[0].candidate_id, candidate_id);
    assert_eq!(rows[0].candidate_name, "Choi");
    assert_eq!(rows[0].candidate_gender, "female");
    assert_eq!(rows[0].waist_number, 4);
    assert_eq!(rows[1].device_id, "device-2");
}
