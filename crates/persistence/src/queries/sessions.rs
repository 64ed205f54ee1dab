// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Admin session queries.
//!
//! Sessions carry a bearer token scoped to one university. Expiry is
//! enforced by the API layer; this module only retrieves rows.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use crate::data_models::AdminSessionData;
use crate::diesel_schema::admin_sessions;
use crate::error::PersistenceError;

/// Diesel Queryable struct for admin session rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = admin_sessions)]
struct AdminSessionRow {
    session_id: i64,
    session_token: String,
    university_id: i64,
    created_at: String,
    last_activity_at: String,
    expires_at: String,
}

/// Checks a candidate password against a stored bcrypt hash.
///
/// # Arguments
///
/// * `password` - The plaintext being tested
/// * `password_hash` - The bcrypt hash on record
///
/// # Errors
///
/// Returns an error if the stored hash cannot be parsed.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PersistenceError> {
    bcrypt::verify(password, password_hash)
        .map_err(|e| PersistenceError::Other(format!("Failed to verify password: {e}")))
}

backend_fn! {
/// Retrieves an admin session by its token.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_token` - The bearer token presented by the client
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no session has this token.
pub fn get_session_by_token(
    conn: &mut _,
    session_token: &str,
) -> Result<Option<AdminSessionData>, PersistenceError> {
    debug!("Looking up admin session by token");

    let result: Result<AdminSessionRow, diesel::result::Error> = admin_sessions::table
        .filter(admin_sessions::session_token.eq(session_token))
        .select(AdminSessionRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(AdminSessionData {
            session_id: row.session_id,
            session_token: row.session_token,
            university_id: row.university_id,
            created_at: row.created_at,
            last_activity_at: row.last_activity_at,
            expires_at: row.expires_at,
        })),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}
