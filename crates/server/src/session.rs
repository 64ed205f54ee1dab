// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bearer-token authentication for the admin routes.
//!
//! Admin handlers take a [`SessionAdmin`] argument, which makes axum
//! run the token check before the handler body ever executes. Public
//! voting routes simply do not take one.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};
use uni_vote_api::{AdminAuthService, AdminSession};

use crate::AppState;

/// Extractor that resolves `Authorization: Bearer <token>` into a
/// validated admin session.
///
/// The first field is the session, scoped to one university. The second
/// is the raw token it was validated from; the logout handler needs it
/// to delete the session row.
///
/// Any failure along the way (no header, malformed header, unknown or
/// expired token) rejects the request with 401 before the handler runs.
pub struct SessionAdmin(pub AdminSession, pub String);

/// Pulls the bearer token out of the request headers.
fn bearer_token(parts: &Parts) -> Result<&str, SessionRejection> {
    let header_value = parts.headers.get(header::AUTHORIZATION).ok_or_else(|| {
        debug!("Admin request without Authorization header");
        SessionRejection::MissingToken
    })?;

    let header_text = header_value.to_str().map_err(|_| {
        warn!("Authorization header is not valid UTF-8");
        SessionRejection::MalformedHeader
    })?;

    header_text.strip_prefix("Bearer ").ok_or_else(|| {
        warn!("Authorization header is not a bearer token");
        SessionRejection::MalformedHeader
    })
}

impl FromRequestParts<AppState> for SessionAdmin {
    type Rejection = SessionRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let mut persistence = state.persistence.lock().await;
        let session: AdminSession = AdminAuthService::validate_session(&mut persistence, token)
            .map_err(|e| {
                warn!(error = %e, "Session validation failed");
                SessionRejection::Rejected(e.to_string())
            })?;
        drop(persistence);

        debug!(
            university_id = session.university_id,
            "Session validated successfully"
        );

        Ok(Self(session, token.to_string()))
    }
}

/// Why a request never reached its admin handler.
///
/// Every variant maps to 401; the body says which stage failed.
#[derive(Debug)]
pub enum SessionRejection {
    /// No Authorization header on the request.
    MissingToken,
    /// Header present but not a well-formed bearer token.
    MalformedHeader,
    /// Token did not validate, with the reason.
    Rejected(String),
}

impl IntoResponse for SessionRejection {
    fn into_response(self) -> Response {
        let message: String = match self {
            Self::MissingToken => String::from("Missing Authorization header"),
            Self::MalformedHeader => {
                String::from("Expected an 'Authorization: Bearer <token>' header")
            }
            Self::Rejected(reason) => format!("Session validation failed: {reason}"),
        };

        (StatusCode::UNAUTHORIZED, message).into_response()
    }
}
