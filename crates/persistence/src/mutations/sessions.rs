// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Admin session mutations.
//!
//! Sessions are created at login, touched on each authenticated request,
//! and deleted at logout or after expiry.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::admin_sessions;
use crate::error::PersistenceError;

backend_fn! {
/// Creates a new admin session for a university.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_token` - The bearer token identifying the session
/// * `university_id` - The university the session administers
/// * `expires_at` - When the session stops being valid (ISO 8601 text)
///
/// # Errors
///
/// Returns an error if the insert fails, including a token collision.
pub fn create_session(
    conn: &mut _,
    session_token: &str,
    university_id: i64,
    expires_at: &str,
) -> Result<i64, PersistenceError> {
    debug!(
        "Creating admin session for university ID: {} with expiration: {}",
        university_id, expires_at
    );

    diesel::insert_into(admin_sessions::table)
        .values((
            admin_sessions::session_token.eq(session_token),
            admin_sessions::university_id.eq(university_id),
            admin_sessions::expires_at.eq(expires_at),
        ))
        .execute(conn)?;

    let session_id: i64 = conn.get_last_insert_rowid()?;

    debug!(session_id, university_id, "Admin session created");

    Ok(session_id)
}
}

backend_fn! {
/// Stamps a session's `last_activity_at` with the database clock.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_id` - Row id of the session to touch
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_session_activity(conn: &mut _, session_id: i64) -> Result<(), PersistenceError> {
    debug!("Touching last_activity_at for session ID: {}", session_id);

    diesel::update(admin_sessions::table)
        .filter(admin_sessions::session_id.eq(session_id))
        .set(
            admin_sessions::last_activity_at.eq(diesel::dsl::sql::<diesel::sql_types::Text>(
                "CURRENT_TIMESTAMP",
            )),
        )
        .execute(conn)?;

    Ok(())
}
}

backend_fn! {
/// Removes the session row holding the given token.
///
/// Logout goes through here; deleting an absent token is a no-op.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_token` - Token of the session being ended
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_session(conn: &mut _, session_token: &str) -> Result<(), PersistenceError> {
    debug!("Deleting admin session by token");

    diesel::delete(admin_sessions::table)
        .filter(admin_sessions::session_token.eq(session_token))
        .execute(conn)?;

    Ok(())
}
}

backend_fn! {
/// Deletes all sessions that expired before `now`.
///
/// Expiration timestamps are compared as text, so `now` must use the
/// same format the sessions were created with.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `now` - The current timestamp (ISO 8601 format)
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_expired_sessions(conn: &mut _, now: &str) -> Result<usize, PersistenceError> {
    debug!("Deleting admin sessions expired before: {}", now);

    let rows_affected: usize = diesel::delete(admin_sessions::table)
        .filter(admin_sessions::expires_at.lt(now))
        .execute(conn)?;

    info!("Deleted {} expired admin sessions", rows_affected);
    Ok(rows_affected)
}
}
