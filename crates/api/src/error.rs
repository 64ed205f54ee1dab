// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The error contract between operations and the HTTP layer.

use uni_vote_domain::DomainError;
use uni_vote_persistence::PersistenceError;

/// Failures from the password and session paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The caller could not be identified.
    AuthenticationFailed {
        /// What the check tripped on.
        reason: String,
    },
    /// The caller is known but may not act on this university.
    Unauthorized {
        /// Name of the attempted operation.
        action: String,
        /// The university the action was scoped to.
        university_id: i64,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                university_id,
            } => {
                write!(
                    f,
                    "Unauthorized: '{action}' requires a session for university {university_id}"
                )
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// Every way an operation can fail, as the HTTP layer sees it.
///
/// Domain and persistence errors are translated into these variants at
/// the operation boundary; the server maps each variant to one status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The caller could not be identified.
    AuthenticationFailed {
        /// What the check tripped on.
        reason: String,
    },
    /// The session is valid but does not cover this university.
    Unauthorized {
        /// Name of the attempted operation.
        action: String,
        /// The university the action was scoped to.
        university_id: i64,
    },
    /// A voting rule rejected the request.
    DomainRuleViolation {
        /// Short name of the rule.
        rule: String,
        /// What the rule rejected.
        message: String,
    },
    /// A request field failed validation before any rule ran.
    InvalidInput {
        /// Which field was rejected.
        field: String,
        /// Why it was rejected.
        message: String,
    },
    /// A write collided with an existing row.
    Conflict {
        /// Short name of the uniqueness rule.
        rule: String,
        /// What the write collided with.
        message: String,
    },
    /// A delete would orphan rows that reference the target.
    ReferentialConflict {
        /// The type of resource that is still referenced.
        resource: String,
        /// Which rows keep the target alive.
        message: String,
    },
    /// Nothing matches the id the caller named.
    ResourceNotFound {
        /// What kind of row was missing.
        resource_type: String,
        /// Details, including the id.
        message: String,
    },
    /// The storage backend could not serve the request.
    Unavailable {
        /// A description of the failure.
        message: String,
    },
    /// A bug or unclassified failure inside the service.
    Internal {
        /// Details for the log, not for clients.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                university_id,
            } => {
                write!(
                    f,
                    "Unauthorized: '{action}' requires a session for university {university_id}"
                )
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::Conflict { rule, message } => {
                write!(f, "Conflict ({rule}): {message}")
            }
            Self::ReferentialConflict { resource, message } => {
                write!(f, "Referential conflict on {resource}: {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Unavailable { message } => {
                write!(f, "Service unavailable: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                university_id,
            } => Self::Unauthorized {
                action,
                university_id,
            },
        }
    }
}

/// Lifts a domain validation failure into the API contract.
///
/// Domain errors never cross the boundary as-is; every variant is
/// mapped by hand so the field names clients see stay stable.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidGender(value) => ApiError::InvalidInput {
            field: String::from("gender"),
            message: format!("Invalid gender '{value}': must be 'male' or 'female'"),
        },
        DomainError::InvalidContestType(value) => ApiError::InvalidInput {
            field: String::from("contest_type"),
            message: format!(
                "Invalid contest type '{value}': must be one of 'king', 'style', 'popular', 'innocent'"
            ),
        },
        DomainError::InvalidDeviceId(msg) => ApiError::InvalidInput {
            field: String::from("device_id"),
            message: msg,
        },
        DomainError::InvalidUniversityName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::InvalidSlug(msg) => ApiError::InvalidInput {
            field: String::from("slug"),
            message: msg,
        },
        DomainError::InvalidCandidateName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::InvalidWaistNumber { value } => ApiError::InvalidInput {
            field: String::from("waist_number"),
            message: format!("Invalid waist number {value}: must be greater than 0"),
        },
        DomainError::InvalidHeight { value } => ApiError::InvalidInput {
            field: String::from("height_cm"),
            message: format!("Invalid height {value} cm: must be between 50 and 300"),
        },
        DomainError::InvalidBirthday { date_string } => ApiError::InvalidInput {
            field: String::from("birthday"),
            message: format!("Invalid birthday '{date_string}': expected YYYY-MM-DD"),
        },
        DomainError::InvalidDirection(value) => ApiError::InvalidInput {
            field: String::from("direction"),
            message: format!("Invalid direction '{value}': must be 'prev' or 'next'"),
        },
        // A stored window bound that fails to parse is server data damage,
        // not a caller mistake.
        DomainError::InvalidWindowBound { timestamp } => ApiError::Internal {
            message: format!(
                "Stored voting window bound '{timestamp}' is not a valid ISO 8601 timestamp"
            ),
        },
        DomainError::VotingClosed { reason } => ApiError::DomainRuleViolation {
            rule: String::from("voting_window"),
            message: reason,
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Constraint violations become `Conflict`/`ReferentialConflict`, lookups
/// that missed become `ResourceNotFound`, and everything else is reported
/// as the backend being unavailable. Handlers that know the colliding rule
/// catch `UniqueViolation` themselves before falling back to this mapping.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::UniqueViolation(message) => ApiError::Conflict {
            rule: String::from("unique_constraint"),
            message,
        },
        PersistenceError::ForeignKeyViolation(message) => ApiError::ReferentialConflict {
            resource: String::from("reference"),
            message,
        },
        PersistenceError::CategoryReferenced { category_id } => ApiError::ReferentialConflict {
            resource: String::from("Category"),
            message: format!("Category {category_id} cannot be deleted: votes reference it"),
        },
        PersistenceError::CandidateReferenced { candidate_id } => ApiError::ReferentialConflict {
            resource: String::from("Candidate"),
            message: format!("Candidate {candidate_id} cannot be deleted: votes reference it"),
        },
        PersistenceError::UniversityNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("University"),
            message: format!("University {id} does not exist"),
        },
        PersistenceError::CategoryNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Category"),
            message: format!("Category {id} does not exist"),
        },
        PersistenceError::CandidateNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Candidate"),
            message: format!("Candidate {id} does not exist"),
        },
        PersistenceError::SessionNotFound(message) => {
            ApiError::AuthenticationFailed { reason: message }
        }
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message,
        },
        PersistenceError::DatabaseError(_)
        | PersistenceError::DatabaseConnectionFailed(_)
        | PersistenceError::MigrationFailed(_)
        | PersistenceError::QueryFailed(_)
        | PersistenceError::InitializationError(_)
        | PersistenceError::ForeignKeyEnforcementNotEnabled => ApiError::Unavailable {
            message: err.to_string(),
        },
        PersistenceError::Other(message) => ApiError::Internal { message },
    }
}
