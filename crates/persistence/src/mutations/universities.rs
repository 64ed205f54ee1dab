// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! University provisioning mutations.
//!
//! Universities are seeded from the command line rather than over HTTP,
//! so this module stays small: one insert that also hashes the admin
//! credential.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::universities;
use crate::error::PersistenceError;

backend_fn! {
/// Creates a new university.
///
/// The slug must be unique across all universities. The admin password is
/// hashed with bcrypt before storage; the plain text is never persisted.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `name` - The display name
/// * `slug` - The URL-safe identifier (unique)
/// * `admin_password` - The plain-text admin password (will be hashed)
/// * `voting_start_at` - Optional ISO 8601 opening bound of the voting window
/// * `voting_end_at` - Optional ISO 8601 closing bound of the voting window
///
/// # Errors
///
/// Returns an error if the university cannot be created or if the slug
/// already exists.
pub fn create_university(
    conn: &mut _,
    name: &str,
    slug: &str,
    admin_password: &str,
    voting_start_at: Option<&str>,
    voting_end_at: Option<&str>,
) -> Result<i64, PersistenceError> {
    info!("Creating university with name: {}, slug: {}", name, slug);

    // Hash the password using bcrypt
    let password_hash: String = bcrypt::hash(admin_password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))?;

    diesel::insert_into(universities::table)
        .values((
            universities::name.eq(name),
            universities::slug.eq(slug),
            universities::admin_password_hash.eq(&password_hash),
            universities::voting_start_at.eq(voting_start_at),
            universities::voting_end_at.eq(voting_end_at),
        ))
        .execute(conn)?;

    let university_id: i64 = conn.get_last_insert_rowid()?;

    info!(university_id, "University created successfully");
    info!("Created university with ID: {}", university_id);

    Ok(university_id)
}
}

backend_fn! {
/// Sets the voting window bounds of a university.
///
/// Passing `None` for a bound leaves that side of the window open.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `university_id` - The university ID
/// * `voting_start_at` - Optional ISO 8601 opening bound
/// * `voting_end_at` - Optional ISO 8601 closing bound
///
/// # Errors
///
/// Returns an error if the database update fails or the university does
/// not exist.
pub fn set_voting_window(
    conn: &mut _,
    university_id: i64,
    voting_start_at: Option<&str>,
    voting_end_at: Option<&str>,
) -> Result<(), PersistenceError> {
    info!(
        "Setting voting window for university ID: {} ({:?} to {:?})",
        university_id, voting_start_at, voting_end_at
    );

    let rows_affected: usize = diesel::update(universities::table)
        .filter(universities::university_id.eq(university_id))
        .set((
            universities::voting_start_at.eq(voting_start_at),
            universities::voting_end_at.eq(voting_end_at),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::UniversityNotFound(university_id));
    }

    Ok(())
}
}
