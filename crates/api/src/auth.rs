// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Admin sessions: the password check, token lifecycle, and the
//! university scoping every admin operation is gated on.

use time::{Duration, OffsetDateTime};
use uni_vote_persistence::{AdminSessionData, PersistenceError, SqlitePersistence, UniversityData};

use crate::error::AuthError;

/// A validated admin session.
///
/// Sessions are scoped to exactly one university; holding a valid token
/// grants no authority over any other university's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminSession {
    /// The database row ID of the session.
    pub session_id: i64,
    /// The university this session administers.
    pub university_id: i64,
}

impl AdminSession {
    /// Creates a new validated session handle.
    ///
    /// # Arguments
    ///
    /// * `session_id` - The database row ID of the session
    /// * `university_id` - The university this session administers
    #[must_use]
    pub const fn new(session_id: i64, university_id: i64) -> Self {
        Self {
            session_id,
            university_id,
        }
    }

    /// Checks that this session may act on the given university.
    ///
    /// # Arguments
    ///
    /// * `university_id` - The university the action targets
    /// * `action` - The action name, used in the error
    ///
    /// # Errors
    ///
    /// Returns an error if the session belongs to a different university.
    pub fn authorize_university(
        &self,
        university_id: i64,
        action: &str,
    ) -> Result<(), AuthError> {
        if self.university_id == university_id {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: action.to_string(),
                university_id,
            })
        }
    }
}

/// Authentication service for session-based admin access.
///
/// Admins authenticate with their university's password; a successful login
/// mints a bearer token backed by a database row. Every admin operation
/// revalidates the token, so deleting the row (logout, expiry cleanup)
/// revokes access immediately.
pub struct AdminAuthService;

impl AdminAuthService {
    /// Admin sessions expire two hours after login.
    const SESSION_EXPIRATION: Duration = Duration::hours(2);

    /// Verifies a plaintext password against a university's stored hash.
    ///
    /// Unknown universities verify as `false` rather than erroring, so the
    /// boolean contract holds for any input.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `university_id` - The university whose credential to check
    /// * `password` - The plaintext password to verify
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup or the hash comparison fails.
    pub fn verify_password(
        persistence: &mut SqlitePersistence,
        university_id: i64,
        password: &str,
    ) -> Result<bool, AuthError> {
        let Some(university) = persistence
            .get_university(university_id)
            .map_err(Self::map_persistence_error)?
        else {
            return Ok(false);
        };

        persistence
            .verify_password(password, &university.admin_password_hash)
            .map_err(Self::map_persistence_error)
    }

    /// Authenticates against a university's password and creates a session.
    ///
    /// Each successful login also deletes any expired session rows.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `university_id` - The university to administer
    /// * `password` - The plaintext admin password
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `admin_session`).
    ///
    /// # Errors
    ///
    /// Returns an error if the university is unknown, the password is
    /// wrong, or the session cannot be stored. No session row is created
    /// on any failure.
    pub fn login(
        persistence: &mut SqlitePersistence,
        university_id: i64,
        password: &str,
    ) -> Result<(String, AdminSession), AuthError> {
        // Unknown university and wrong password share one reason so the
        // response does not reveal which universities exist.
        let university: UniversityData = persistence
            .get_university(university_id)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Unknown university or wrong password"),
            })?;

        let verified: bool = persistence
            .verify_password(password, &university.admin_password_hash)
            .map_err(Self::map_persistence_error)?;
        if !verified {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Unknown university or wrong password"),
            });
        }

        let session_token: String = Self::generate_session_token();

        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let now_str: String = now
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to format current time: {e}"),
            })?;
        let expires_at_str: String = (now + Self::SESSION_EXPIRATION)
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to format expiration time: {e}"),
            })?;

        // Expired rows are swept at login; there is no background job.
        persistence
            .delete_expired_sessions(&now_str)
            .map_err(Self::map_persistence_error)?;

        let session_id: i64 = persistence
            .create_session(&session_token, university_id, &expires_at_str)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to create session: {e}"),
            })?;

        Ok((
            session_token,
            AdminSession::new(session_id, university_id),
        ))
    }

    /// Validates a session token and returns the session it names.
    ///
    /// A successful validation touches the session's last-activity
    /// timestamp.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `session_token` - The bearer token to validate
    ///
    /// # Errors
    ///
    /// Returns an error if the token is unknown or the session is expired.
    pub fn validate_session(
        persistence: &mut SqlitePersistence,
        session_token: &str,
    ) -> Result<AdminSession, AuthError> {
        let session: AdminSessionData = persistence
            .get_session_by_token(session_token)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        // Expiry is judged here rather than in SQL so both backends
        // agree on the clock.
        let expires_at: OffsetDateTime = OffsetDateTime::parse(
            &session.expires_at,
            &time::format_description::well_known::Iso8601::DEFAULT,
        )
        .map_err(|e| AuthError::AuthenticationFailed {
            reason: format!("Failed to parse session expiration: {e}"),
        })?;

        if OffsetDateTime::now_utc() > expires_at {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        persistence
            .update_session_activity(session.session_id)
            .map_err(Self::map_persistence_error)?;

        Ok(AdminSession::new(session.session_id, session.university_id))
    }

    /// Ends a session by deleting its row.
    ///
    /// Idempotent: logging out an already-deleted token succeeds.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `session_token` - The token being surrendered
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn logout(
        persistence: &mut SqlitePersistence,
        session_token: &str,
    ) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete session: {e}"),
            })?;

        Ok(())
    }

    /// Generates a session token from the current time plus a random
    /// component, so two logins in the same instant cannot collide.
    fn generate_session_token() -> String {
        use std::time::{SystemTime, UNIX_EPOCH};
        let timestamp: u128 = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos())
            .unwrap_or_default();
        format!("session_{timestamp}_{}", rand::random::<u64>())
    }

    /// Folds storage failures into authentication failures so callers
    /// only ever see one error family from this service.
    fn map_persistence_error(err: PersistenceError) -> AuthError {
        match err {
            PersistenceError::SessionNotFound(msg) => AuthError::AuthenticationFailed {
                reason: msg,
            },
            _ => AuthError::AuthenticationFailed {
                reason: format!("Database error: {err}"),
            },
        }
    }
}
