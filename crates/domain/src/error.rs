// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// A field or rule the domain model rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Gender string is not one of the recognized values.
    InvalidGender(String),
    /// Contest type string is not one of the recognized values.
    InvalidContestType(String),
    /// Device identifier is empty or malformed.
    InvalidDeviceId(String),
    /// University name is empty or invalid.
    InvalidUniversityName(String),
    /// University slug is empty or invalid.
    InvalidSlug(String),
    /// Candidate name is empty or invalid.
    InvalidCandidateName(String),
    /// Waist number is out of range.
    InvalidWaistNumber {
        /// The rejected value.
        value: i32,
    },
    /// Candidate height is out of range.
    InvalidHeight {
        /// The rejected value in centimeters.
        value: i32,
    },
    /// Birthday string could not be parsed as a calendar date.
    InvalidBirthday {
        /// The rejected date string.
        date_string: String,
    },
    /// Neighbor direction string is not `prev` or `next`.
    InvalidDirection(String),
    /// A voting-window bound could not be parsed as an ISO 8601 timestamp.
    InvalidWindowBound {
        /// The rejected timestamp string.
        timestamp: String,
    },
    /// Voting is not open at the evaluated instant.
    VotingClosed {
        /// Human-readable reason (before opening, after closing, inactive).
        reason: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidGender(value) => {
                write!(f, "Invalid gender '{value}': must be 'male' or 'female'")
            }
            Self::InvalidContestType(value) => {
                write!(
                    f,
                    "Invalid contest type '{value}': must be one of 'king', 'style', 'popular', 'innocent'"
                )
            }
            Self::InvalidDeviceId(msg) => write!(f, "Invalid device id: {msg}"),
            Self::InvalidUniversityName(msg) => write!(f, "Invalid university name: {msg}"),
            Self::InvalidSlug(msg) => write!(f, "Invalid university slug: {msg}"),
            Self::InvalidCandidateName(msg) => write!(f, "Invalid candidate name: {msg}"),
            Self::InvalidWaistNumber { value } => {
                write!(f, "Invalid waist number {value}: must be greater than 0")
            }
            Self::InvalidHeight { value } => {
                write!(f, "Invalid height {value} cm: must be between 50 and 300")
            }
            Self::InvalidBirthday { date_string } => {
                write!(f, "Invalid birthday '{date_string}': expected YYYY-MM-DD")
            }
            Self::InvalidDirection(value) => {
                write!(f, "Invalid direction '{value}': must be 'prev' or 'next'")
            }
            Self::InvalidWindowBound { timestamp } => {
                write!(
                    f,
                    "Invalid voting window bound '{timestamp}': expected ISO 8601 timestamp"
                )
            }
            Self::VotingClosed { reason } => write!(f, "Voting is closed: {reason}"),
        }
    }
}

impl std::error::Error for DomainError {}
