// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Everything the persistence layer can fail with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// Diesel reported an error with no more specific mapping here.
    DatabaseError(String),
    /// The backend could not be reached or opened.
    DatabaseConnectionFailed(String),
    /// A migration failed to apply.
    MigrationFailed(String),
    /// A statement failed outside Diesel's typed error paths.
    QueryFailed(String),
    /// A uniqueness constraint rejected the write.
    ///
    /// Raised for duplicate `(device_id, category_id)` votes, duplicate
    /// waist numbers within a `(university, gender)` bucket, and duplicate
    /// university slugs.
    UniqueViolation(String),
    /// A foreign key constraint rejected the write.
    ///
    /// Raised when deleting catalog rows that votes still reference, or
    /// when inserting rows that point at missing parents.
    ForeignKeyViolation(String),
    /// Adapter construction failed before a connection existed.
    InitializationError(String),
    /// The connection came up without foreign key enforcement.
    ForeignKeyEnforcementNotEnabled,
    /// The requested university was not found.
    UniversityNotFound(i64),
    /// The requested category was not found.
    CategoryNotFound(i64),
    /// The requested candidate was not found.
    CandidateNotFound(i64),
    /// Category cannot be deleted because votes reference it.
    CategoryReferenced { category_id: i64 },
    /// Candidate cannot be deleted because votes reference it.
    CandidateReferenced { candidate_id: i64 },
    /// No session row for the given token.
    SessionNotFound(String),
    /// A lookup found nothing and no table-specific variant fits.
    NotFound(String),
    /// Anything without a better home.
    Other(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::UniqueViolation(msg) => write!(f, "Unique constraint violation: {msg}"),
            Self::ForeignKeyViolation(msg) => {
                write!(f, "Foreign key constraint violation: {msg}")
            }
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::UniversityNotFound(id) => write!(f, "University not found: {id}"),
            Self::CategoryNotFound(id) => write!(f, "Category not found: {id}"),
            Self::CandidateNotFound(id) => write!(f, "Candidate not found: {id}"),
            Self::CategoryReferenced { category_id } => {
                write!(
                    f,
                    "Category {category_id} cannot be deleted: votes reference it"
                )
            }
            Self::CandidateReferenced { candidate_id } => {
                write!(
                    f,
                    "Candidate {candidate_id} cannot be deleted: votes reference it"
                )
            }
            Self::SessionNotFound(msg) => write!(f, "Session not found: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::DatabaseErrorKind;

        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::UniqueViolation(info.message().to_string())
            }
            diesel::result::Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                Self::ForeignKeyViolation(info.message().to_string())
            }
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}
