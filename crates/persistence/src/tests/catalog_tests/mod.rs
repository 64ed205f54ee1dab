// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for university, category, and candidate persistence operations.

use crate::tests::{create_test_candidate, create_test_category, create_test_university};
use crate::{PersistenceError, SqlitePersistence};
use uni_vote_domain::Direction;

#[test]
fn test_create_university_succeeds() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let university_id = create_test_university(&mut persistence);
    assert!(university_id > 0);

    let university = persistence.get_university(university_id).unwrap().unwrap();
    assert_eq!(university.name, "Test University");
    assert_eq!(university.slug, "test-university");
    assert!(university.is_active);
    assert!(university.voting_start_at.is_none());
    assert!(university.voting_end_at.is_none());
    assert!(!university.created_at.is_empty());
}

#[test]
fn test_create_university_hashes_admin_password() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let university_id = create_test_university(&mut persistence);
    let university = persistence.get_university(university_id).unwrap().unwrap();

    // The stored value is a bcrypt hash, not the plain text
    assert_ne!(university.admin_password_hash, "password123");
    assert!(
        persistence
            .verify_password("password123", &university.admin_password_hash)
            .unwrap()
    );
    assert!(
        !persistence
            .verify_password("wrong-password", &university.admin_password_hash)
            .unwrap()
    );
}

#[test]
fn test_create_university_rejects_duplicate_slug() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    create_test_university(&mut persistence);

    let result = persistence.create_university(
        "Another University",
        "test-university",
        "other-password",
        None,
        None,
    );

    match result {
        Err(PersistenceError::UniqueViolation(_)) => {}
        other => panic!("Expected UniqueViolation error, got: {other:?}"),
    }
}

#[test]
fn test_create_university_stores_voting_window() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let university_id = persistence
        .create_university(
            "Windowed University",
            "windowed",
            "password123",
            Some("2026-05-01T00:00:00Z"),
            Some("2026-05-08T00:00:00Z"),
        )
        .unwrap();

    let university = persistence.get_university(university_id).unwrap().unwrap();
    assert_eq!(
        university.voting_start_at.as_deref(),
        Some("2026-05-01T00:00:00Z")
    );
    assert_eq!(
        university.voting_end_at.as_deref(),
        Some("2026-05-08T00:00:00Z")
    );
}

#[test]
fn test_set_voting_window_updates_bounds() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let university_id = create_test_university(&mut persistence);

    persistence
        .set_voting_window(
            university_id,
            Some("2026-06-01T00:00:00Z"),
            Some("2026-06-02T00:00:00Z"),
        )
        .unwrap();

    let university = persistence.get_university(university_id).unwrap().unwrap();
    assert_eq!(
        university.voting_start_at.as_deref(),
        Some("2026-06-01T00:00:00Z")
    );
    assert_eq!(
        university.voting_end_at.as_deref(),
        Some("2026-06-02T00:00:00Z")
    );

    // Clearing both bounds leaves the window open
    persistence
        .set_voting_window(university_id, None, None)
        .unwrap();
    let university = persistence.get_university(university_id).unwrap().unwrap();
    assert!(university.voting_start_at.is_none());
    assert!(university.voting_end_at.is_none());
}

#[test]
fn test_set_voting_window_fails_for_unknown_university() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let result = persistence.set_voting_window(9999, None, None);

    match result {
        Err(PersistenceError::UniversityNotFound(9999)) => {}
        other => panic!("Expected UniversityNotFound error, got: {other:?}"),
    }
}

#[test]
fn test_list_active_universities_ordered_by_name() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    persistence
        .create_university("Zeta University", "zeta", "password123", None, None)
        .unwrap();
    persistence
        .create_university("Alpha University", "alpha", "password123", None, None)
        .unwrap();

    let universities = persistence.list_active_universities().unwrap();
    assert_eq!(universities.len(), 2);
    assert_eq!(universities[0].name, "Alpha University");
    assert_eq!(universities[1].name, "Zeta University");
}

#[test]
fn test_get_university_returns_none_for_unknown_id() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    assert!(persistence.get_university(12345).unwrap().is_none());
}

#[test]
fn test_create_category_succeeds() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let university_id = create_test_university(&mut persistence);
    let category_id = create_test_category(&mut persistence, university_id, "male", "king");
    assert!(category_id > 0);

    let category = persistence.get_category(category_id).unwrap().unwrap();
    assert_eq!(category.university_id, university_id);
    assert_eq!(category.gender, "male");
    assert_eq!(category.contest_type, "king");
    assert!(category.is_active);
}

#[test]
fn test_create_category_fails_for_unknown_university() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let result = persistence.create_category(9999, "male", "king");

    match result {
        Err(PersistenceError::ForeignKeyViolation(_)) => {}
        other => panic!("Expected ForeignKeyViolation error, got: {other:?}"),
    }
}

#[test]
fn test_list_active_categories_ordered_by_gender_then_type() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let university_id = create_test_university(&mut persistence);

    // Created out of order on purpose
    create_test_category(&mut persistence, university_id, "male", "king");
    create_test_category(&mut persistence, university_id, "female", "style");
    create_test_category(&mut persistence, university_id, "female", "king");
    create_test_category(&mut persistence, university_id, "male", "innocent");

    let categories = persistence.list_active_categories(university_id).unwrap();
    let ordering: Vec<(String, String)> = categories
        .into_iter()
        .map(|c| (c.gender, c.contest_type))
        .collect();

    assert_eq!(
        ordering,
        vec![
            (String::from("female"), String::from("king")),
            (String::from("female"), String::from("style")),
            (String::from("male"), String::from("innocent")),
            (String::from("male"), String::from("king")),
        ]
    );
}

#[test]
fn test_list_active_categories_excludes_deactivated() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let university_id = create_test_university(&mut persistence);
    let kept = create_test_category(&mut persistence, university_id, "male", "king");
    let dropped = create_test_category(&mut persistence, university_id, "male", "style");

    persistence
        .update_category(dropped, "male", "style", false)
        .unwrap();

    let categories = persistence.list_active_categories(university_id).unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].category_id, kept);

    // The admin listing still shows both
    let all_categories = persistence.list_all_categories(university_id).unwrap();
    assert_eq!(all_categories.len(), 2);
}

#[test]
fn test_update_category_changes_fields() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let university_id = create_test_university(&mut persistence);
    let category_id = create_test_category(&mut persistence, university_id, "male", "king");

    persistence
        .update_category(category_id, "female", "style", true)
        .unwrap();

    let category = persistence.get_category(category_id).unwrap().unwrap();
    assert_eq!(category.gender, "female");
    assert_eq!(category.contest_type, "style");
    assert!(category.is_active);
}

#[test]
fn test_update_category_fails_for_unknown_category() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let result = persistence.update_category(9999, "male", "king", false);

    match result {
        Err(PersistenceError::CategoryNotFound(9999)) => {}
        other => panic!("Expected CategoryNotFound error, got: {other:?}"),
    }
}

#[test]
fn test_delete_category_succeeds_when_not_referenced() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let university_id = create_test_university(&mut persistence);
    let category_id = create_test_category(&mut persistence, university_id, "male", "king");

    persistence.delete_category(category_id).unwrap();

    assert!(persistence.get_category(category_id).unwrap().is_none());
}

#[test]
fn test_delete_category_fails_when_votes_reference_it() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let university_id = create_test_university(&mut persistence);
    let category_id = create_test_category(&mut persistence, university_id, "male", "king");
    let candidate_id = create_test_candidate(&mut persistence, university_id, "male", 1, "Kim");

    persistence
        .insert_vote("device-1", university_id, category_id, candidate_id)
        .unwrap();

    let result = persistence.delete_category(category_id);

    match result {
        Err(PersistenceError::CategoryReferenced { category_id: id }) => {
            assert_eq!(id, category_id);
        }
        other => panic!("Expected CategoryReferenced error, got: {other:?}"),
    }

    // The category survives the failed delete
    assert!(persistence.get_category(category_id).unwrap().is_some());
}

#[test]
fn test_create_candidate_succeeds_with_full_profile() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let university_id = create_test_university(&mut persistence);
    let candidate_id = persistence
        .create_candidate(
            university_id,
            "female",
            7,
            "Lee Ji-eun",
            Some("2004-03-14"),
            Some(165),
            Some("Photography"),
            Some("https://img.example.com/7.jpg"),
        )
        .unwrap();

    let candidate = persistence.get_candidate(candidate_id).unwrap().unwrap();
    assert_eq!(candidate.university_id, university_id);
    assert_eq!(candidate.gender, "female");
    assert_eq!(candidate.waist_number, 7);
    assert_eq!(candidate.name, "Lee Ji-eun");
    assert_eq!(candidate.birthday.as_deref(), Some("2004-03-14"));
    assert_eq!(candidate.height_cm, Some(165));
    assert_eq!(candidate.hobby.as_deref(), Some("Photography"));
    assert_eq!(
        candidate.image_url.as_deref(),
        Some("https://img.example.com/7.jpg")
    );
    assert!(candidate.is_active);
}

#[test]
fn test_create_candidate_rejects_duplicate_waist_number_in_roster() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let university_id = create_test_university(&mut persistence);
    create_test_candidate(&mut persistence, university_id, "male", 1, "Kim");

    // Same university, same gender, same waist number
    let result = persistence.create_candidate(
        university_id,
        "male",
        1,
        "Park",
        None,
        None,
        None,
        None,
    );

    match result {
        Err(PersistenceError::UniqueViolation(_)) => {}
        other => panic!("Expected UniqueViolation error, got: {other:?}"),
    }

    // The same waist number is free in the other gender roster
    let other_gender =
        create_test_candidate(&mut persistence, university_id, "female", 1, "Choi");
    assert!(other_gender > 0);
}

#[test]
fn test_list_active_candidates_ordered_by_waist_number() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let university_id = create_test_university(&mut persistence);
    create_test_candidate(&mut persistence, university_id, "male", 3, "Third");
    create_test_candidate(&mut persistence, university_id, "male", 1, "First");
    create_test_candidate(&mut persistence, university_id, "male", 2, "Second");

    // A different-gender candidate must not leak into the listing
    create_test_candidate(&mut persistence, university_id, "female", 1, "Other");

    let candidates = persistence
        .list_active_candidates(university_id, "male")
        .unwrap();
    let waist_numbers: Vec<i32> = candidates.iter().map(|c| c.waist_number).collect();
    assert_eq!(waist_numbers, vec![1, 2, 3]);
}

#[test]
fn test_list_active_candidates_excludes_deactivated() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let university_id = create_test_university(&mut persistence);
    create_test_candidate(&mut persistence, university_id, "male", 1, "Kept");
    let dropped = create_test_candidate(&mut persistence, university_id, "male", 2, "Dropped");

    persistence
        .update_candidate(dropped, "male", 2, "Dropped", None, None, None, None, false)
        .unwrap();

    let candidates = persistence
        .list_active_candidates(university_id, "male")
        .unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].name, "Kept");

    // The admin listing still shows both
    let all_candidates = persistence.list_all_candidates(university_id).unwrap();
    assert_eq!(all_candidates.len(), 2);
}

#[test]
fn test_update_candidate_changes_fields() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let university_id = create_test_university(&mut persistence);
    let candidate_id = create_test_candidate(&mut persistence, university_id, "male", 1, "Kim");

    persistence
        .update_candidate(
            candidate_id,
            "male",
            7,
            "Kim Min-jun",
            Some("2003-11-02"),
            Some(181),
            Some("Basketball"),
            None,
            true,
        )
        .unwrap();

    let candidate = persistence.get_candidate(candidate_id).unwrap().unwrap();
    assert_eq!(candidate.name, "Kim Min-jun");
    assert_eq!(candidate.waist_number, 7);
    assert_eq!(candidate.birthday.as_deref(), Some("2003-11-02"));
    assert_eq!(candidate.height_cm, Some(181));
    assert_eq!(candidate.hobby.as_deref(), Some("Basketball"));
    assert!(candidate.image_url.is_none());
    assert_eq!(candidate.gender, "male");
}

#[test]
fn test_update_candidate_fails_for_unknown_candidate() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let result =
        persistence.update_candidate(9999, "male", 1, "Nobody", None, None, None, None, true);

    match result {
        Err(PersistenceError::CandidateNotFound(9999)) => {}
        other => panic!("Expected CandidateNotFound error, got: {other:?}"),
    }
}

#[test]
fn test_update_candidate_rejects_taken_waist_number() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let university_id = create_test_university(&mut persistence);
    create_test_candidate(&mut persistence, university_id, "male", 1, "Kim");
    let park = create_test_candidate(&mut persistence, university_id, "male", 2, "Park");

    let result = persistence.update_candidate(park, "male", 1, "Park", None, None, None, None, true);

    match result {
        Err(PersistenceError::UniqueViolation(_)) => {}
        other => panic!("Expected UniqueViolation error, got: {other:?}"),
    }
}

#[test]
fn test_delete_candidate_fails_when_votes_reference_them() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let university_id = create_test_university(&mut persistence);
    let category_id = create_test_category(&mut persistence, university_id, "male", "king");
    let candidate_id = create_test_candidate(&mut persistence, university_id, "male", 1, "Kim");

    persistence
        .insert_vote("device-1", university_id, category_id, candidate_id)
        .unwrap();

    let result = persistence.delete_candidate(candidate_id);

    match result {
        Err(PersistenceError::CandidateReferenced { candidate_id: id }) => {
            assert_eq!(id, candidate_id);
        }
        other => panic!("Expected CandidateReferenced error, got: {other:?}"),
    }
}

#[test]
fn test_delete_candidate_succeeds_when_not_referenced() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let university_id = create_test_university(&mut persistence);
    let candidate_id = create_test_candidate(&mut persistence, university_id, "male", 1, "Kim");

    persistence.delete_candidate(candidate_id).unwrap();

    assert!(persistence.get_candidate(candidate_id).unwrap().is_none());
}

#[test]
fn test_get_neighbor_candidate_steps_both_directions() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let university_id = create_test_university(&mut persistence);
    let first = create_test_candidate(&mut persistence, university_id, "male", 1, "First");
    let second = create_test_candidate(&mut persistence, university_id, "male", 5, "Second");
    let third = create_test_candidate(&mut persistence, university_id, "male", 9, "Third");

    // From the middle, both neighbors exist
    let next = persistence
        .get_neighbor_candidate(university_id, "male", 5, Direction::Next)
        .unwrap()
        .unwrap();
    assert_eq!(next.candidate_id, third);

    let prev = persistence
        .get_neighbor_candidate(university_id, "male", 5, Direction::Prev)
        .unwrap()
        .unwrap();
    assert_eq!(prev.candidate_id, first);

    // At the ends, the outward neighbor is absent
    assert!(
        persistence
            .get_neighbor_candidate(university_id, "male", 1, Direction::Prev)
            .unwrap()
            .is_none()
    );
    assert!(
        persistence
            .get_neighbor_candidate(university_id, "male", 9, Direction::Next)
            .unwrap()
            .is_none()
    );

    // Waist numbers need not be contiguous
    let from_first = persistence
        .get_neighbor_candidate(university_id, "male", 1, Direction::Next)
        .unwrap()
        .unwrap();
    assert_eq!(from_first.candidate_id, second);
}

#[test]
fn test_get_neighbor_candidate_skips_deactivated() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let university_id = create_test_university(&mut persistence);
    create_test_candidate(&mut persistence, university_id, "male", 1, "First");
    let middle = create_test_candidate(&mut persistence, university_id, "male", 2, "Middle");
    let last = create_test_candidate(&mut persistence, university_id, "male", 3, "Last");

    persistence
        .update_candidate(middle, "male", 2, "Middle", None, None, None, None, false)
        .unwrap();

    let next = persistence
        .get_neighbor_candidate(university_id, "male", 1, Direction::Next)
        .unwrap()
        .unwrap();
    assert_eq!(next.candidate_id, last);
}
