// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for admin session persistence operations.

use crate::tests::create_test_university;
use crate::{PersistenceError, SqlitePersistence};

#[test]
fn test_create_session_and_get_by_token() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let university_id = create_test_university(&mut persistence);
    let session_id = persistence
        .create_session("session_token_1", university_id, "2099-12-31 23:59:59")
        .unwrap();
    assert!(session_id > 0);

    let session = persistence
        .get_session_by_token("session_token_1")
        .unwrap()
        .unwrap();
    assert_eq!(session.session_id, session_id);
    assert_eq!(session.university_id, university_id);
    assert_eq!(session.expires_at, "2099-12-31 23:59:59");
    assert!(!session.created_at.is_empty());
    assert!(!session.last_activity_at.is_empty());
}

#[test]
fn test_get_session_returns_none_for_unknown_token() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    assert!(
        persistence
            .get_session_by_token("missing-token")
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_create_session_rejects_duplicate_token() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let university_id = create_test_university(&mut persistence);
    persistence
        .create_session("session_token_1", university_id, "2099-12-31 23:59:59")
        .unwrap();

    let result = persistence.create_session("session_token_1", university_id, "2099-12-31 23:59:59");

    match result {
        Err(PersistenceError::UniqueViolation(_)) => {}
        other => panic!("Expected UniqueViolation error, got: {other:?}"),
    }
}

#[test]
fn test_create_session_rejects_unknown_university() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let result = persistence.create_session("session_token_1", 9999, "2099-12-31 23:59:59");

    match result {
        Err(PersistenceError::ForeignKeyViolation(_)) => {}
        other => panic!("Expected ForeignKeyViolation error, got: {other:?}"),
    }
}

#[test]
fn test_delete_session_removes_row() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let university_id = create_test_university(&mut persistence);
    persistence
        .create_session("session_token_1", university_id, "2099-12-31 23:59:59")
        .unwrap();

    persistence.delete_session("session_token_1").unwrap();

    assert!(
        persistence
            .get_session_by_token("session_token_1")
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_delete_session_with_unknown_token_is_a_no_op() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    persistence.delete_session("missing-token").unwrap();
}

#[test]
fn test_delete_expired_sessions_removes_only_expired() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let university_id = create_test_university(&mut persistence);
    persistence
        .create_session("expired-token", university_id, "2000-01-01 00:00:00")
        .unwrap();
    persistence
        .create_session("live-token", university_id, "2099-12-31 23:59:59")
        .unwrap();

    let deleted = persistence
        .delete_expired_sessions("2050-06-01 00:00:00")
        .unwrap();
    assert_eq!(deleted, 1);

    assert!(
        persistence
            .get_session_by_token("expired-token")
            .unwrap()
            .is_none()
    );
    assert!(
        persistence
            .get_session_by_token("live-token")
            .unwrap()
            .is_some()
    );
}

#[test]
fn test_update_session_activity_touches_row() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let university_id = create_test_university(&mut persistence);
    let session_id = persistence
        .create_session("session_token_1", university_id, "2099-12-31 23:59:59")
        .unwrap();

    persistence.update_session_activity(session_id).unwrap();

    // The session is intact after the touch
    let session = persistence
        .get_session_by_token("session_token_1")
        .unwrap()
        .unwrap();
    assert_eq!(session.session_id, session_id);
    assert!(!session.last_activity_at.is_empty());
}
