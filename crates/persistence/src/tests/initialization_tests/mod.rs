// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for database initialization and backend setup.

use crate::SqlitePersistence;
use crate::tests::create_test_university;

#[test]
fn test_new_in_memory_initializes_database() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    // A freshly migrated database has no universities
    let universities = persistence.list_active_universities().unwrap();
    assert!(universities.is_empty());
}

#[test]
fn test_foreign_key_enforcement_is_active() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    persistence.verify_foreign_key_enforcement().unwrap();
}

#[test]
fn test_in_memory_instances_are_isolated() {
    let mut first = SqlitePersistence::new_in_memory().unwrap();
    let mut second = SqlitePersistence::new_in_memory().unwrap();

    let university_id = create_test_university(&mut first);

    // The row exists in the instance that created it
    assert!(first.get_university(university_id).unwrap().is_some());

    // The other instance has its own empty database
    assert!(second.get_university(university_id).unwrap().is_none());
}

#[test]
fn test_migrations_are_idempotent_per_instance() {
    // Each constructor call runs the full migration set against a fresh
    // database; two sequential constructions must both succeed.
    let first = SqlitePersistence::new_in_memory().unwrap();
    drop(first);
    let second = SqlitePersistence::new_in_memory().unwrap();
    drop(second);
}
