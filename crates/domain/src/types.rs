// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Represents the gender bucket of a category or candidate.
///
/// Genders are fixed domain constants; every category and candidate belongs
/// to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male contest bucket.
    Male,
    /// Female contest bucket.
    Female,
}

impl FromStr for Gender {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Stored values are lowercase but lookups are case-insensitive.
        match s.to_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            _ => Err(DomainError::InvalidGender(s.to_string())),
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Gender {
    /// Converts this gender to its canonical lowercase string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

/// Represents a contest type within a gender bucket.
///
/// Each university runs up to four contests per gender; the pairing of
/// gender and contest type identifies a voting category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContestType {
    /// The headline contest. Displays as "Queen" for the female bucket.
    King,
    /// Best style contest.
    Style,
    /// Most popular contest.
    Popular,
    /// Most innocent contest.
    Innocent,
}

impl FromStr for ContestType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "king" => Ok(Self::King),
            "style" => Ok(Self::Style),
            "popular" => Ok(Self::Popular),
            "innocent" => Ok(Self::Innocent),
            _ => Err(DomainError::InvalidContestType(s.to_string())),
        }
    }
}

impl std::fmt::Display for ContestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ContestType {
    /// Converts this contest type to its canonical lowercase string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::King => "king",
            Self::Style => "style",
            Self::Popular => "popular",
            Self::Innocent => "innocent",
        }
    }

    /// Returns the human-facing label for this contest in the given gender.
    ///
    /// The headline contest is titled "King" for the male bucket and
    /// "Queen" for the female bucket; the other contests are
    /// gender-independent.
    #[must_use]
    pub const fn display_label(&self, gender: Gender) -> &'static str {
        match (self, gender) {
            (Self::King, Gender::Male) => "King",
            (Self::King, Gender::Female) => "Queen",
            (Self::Style, _) => "Style",
            (Self::Popular, _) => "Popular",
            (Self::Innocent, _) => "Innocent",
        }
    }
}

/// Represents a university tenant.
///
/// A university scopes every category, candidate, and vote. The admin
/// credential hash is persistence-layer data and does not appear here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct University {
    /// Database-assigned id.
    /// `None` indicates the university has not been persisted yet.
    university_id: Option<i64>,
    /// Display name.
    name: String,
    /// URL-safe unique short name.
    slug: String,
    /// Whether the university is visible and accepting votes.
    is_active: bool,
    /// Voting window opening bound (UTC, ISO 8601). `None` = unbounded.
    voting_start_at: Option<String>,
    /// Voting window closing bound (UTC, ISO 8601). `None` = unbounded.
    voting_end_at: Option<String>,
}

// Two universities are equal if they have the same slug, regardless of IDs.
impl PartialEq for University {
    fn eq(&self, other: &Self) -> bool {
        self.slug == other.slug
    }
}

impl Eq for University {}

impl std::hash::Hash for University {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.slug.hash(state);
    }
}

impl University {
    /// Creates a new `University` without a persisted ID.
    ///
    /// Slugs are normalized to lowercase to ensure case-insensitive
    /// uniqueness.
    ///
    /// # Arguments
    ///
    /// * `name` - Display name
    /// * `slug` - URL-safe short name (will be normalized to lowercase)
    #[must_use]
    pub fn new(name: &str, slug: &str) -> Self {
        Self {
            university_id: None,
            name: name.to_string(),
            slug: slug.to_lowercase(),
            is_active: true,
            voting_start_at: None,
            voting_end_at: None,
        }
    }

    /// Creates a `University` with an existing persisted ID.
    ///
    /// # Arguments
    ///
    /// * `university_id` - Database-assigned id
    /// * `name` - Display name
    /// * `slug` - URL-safe short name
    /// * `is_active` - Whether the university is active
    /// * `voting_start_at` - Optional window opening bound (UTC, ISO 8601)
    /// * `voting_end_at` - Optional window closing bound (UTC, ISO 8601)
    #[must_use]
    pub fn with_id(
        university_id: i64,
        name: &str,
        slug: &str,
        is_active: bool,
        voting_start_at: Option<String>,
        voting_end_at: Option<String>,
    ) -> Self {
        Self {
            university_id: Some(university_id),
            name: name.to_string(),
            slug: slug.to_lowercase(),
            is_active,
            voting_start_at,
            voting_end_at,
        }
    }

    /// Returns the database-assigned id, if this value has one yet.
    #[must_use]
    pub const fn university_id(&self) -> Option<i64> {
        self.university_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the slug.
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Returns whether the university is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the voting window opening bound if set.
    #[must_use]
    pub fn voting_start_at(&self) -> Option<&str> {
        self.voting_start_at.as_deref()
    }

    /// Returns the voting window closing bound if set.
    #[must_use]
    pub fn voting_end_at(&self) -> Option<&str> {
        self.voting_end_at.as_deref()
    }
}

/// Represents a voting category: one (gender, contest type) bucket within a
/// university.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Database-assigned id.
    /// `None` indicates the category has not been persisted yet.
    category_id: Option<i64>,
    /// The university this category belongs to.
    university_id: i64,
    /// The gender bucket.
    gender: Gender,
    /// The contest type.
    contest_type: ContestType,
    /// Whether the category is open for voting and listing.
    is_active: bool,
}

// Two categories are equal if they cover the same (university, gender, type)
// combination, regardless of their IDs.
impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.university_id == other.university_id
            && self.gender == other.gender
            && self.contest_type == other.contest_type
    }
}

impl Eq for Category {}

impl std::hash::Hash for Category {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.university_id.hash(state);
        self.gender.hash(state);
        self.contest_type.hash(state);
    }
}

impl Category {
    /// Creates a new `Category` without a persisted ID.
    #[must_use]
    pub const fn new(university_id: i64, gender: Gender, contest_type: ContestType) -> Self {
        Self {
            category_id: None,
            university_id,
            gender,
            contest_type,
            is_active: true,
        }
    }

    /// Creates a `Category` with an existing persisted ID.
    #[must_use]
    pub const fn with_id(
        category_id: i64,
        university_id: i64,
        gender: Gender,
        contest_type: ContestType,
        is_active: bool,
    ) -> Self {
        Self {
            category_id: Some(category_id),
            university_id,
            gender,
            contest_type,
            is_active,
        }
    }

    /// Returns the database-assigned id, if this value has one yet.
    #[must_use]
    pub const fn category_id(&self) -> Option<i64> {
        self.category_id
    }

    /// Returns the owning university's identifier.
    #[must_use]
    pub const fn university_id(&self) -> i64 {
        self.university_id
    }

    /// Returns the gender bucket.
    #[must_use]
    pub const fn gender(&self) -> Gender {
        self.gender
    }

    /// Returns the contest type.
    #[must_use]
    pub const fn contest_type(&self) -> ContestType {
        self.contest_type
    }

    /// Returns whether the category is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the human-facing label for this category (King, Queen,
    /// Style, Popular, Innocent).
    #[must_use]
    pub const fn display_label(&self) -> &'static str {
        self.contest_type.display_label(self.gender)
    }
}

/// Represents a contest candidate.
///
/// Candidates are scoped to a university and a gender bucket and carry a
/// human-facing waist number used for display and neighbor navigation.
/// The waist number is unique per (university, gender).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    /// Database-assigned id.
    /// `None` indicates the candidate has not been persisted yet.
    pub candidate_id: Option<i64>,
    /// The university this candidate belongs to.
    pub university_id: i64,
    /// The gender bucket.
    pub gender: Gender,
    /// Human-facing contest number, unique per (university, gender).
    pub waist_number: i32,
    /// Display name (informational, not unique).
    pub name: String,
    /// Optional birthday (ISO 8601 date string).
    pub birthday: Option<String>,
    /// Optional height in centimeters.
    pub height_cm: Option<i32>,
    /// Optional hobby text.
    pub hobby: Option<String>,
    /// Optional profile image URL.
    pub image_url: Option<String>,
    /// Whether the candidate appears in listings and accepts votes.
    /// Candidates referenced by votes are soft-disabled, never hard-deleted.
    pub is_active: bool,
}

// Two candidates are equal if they share (university, gender, waist number),
// regardless of their IDs.
impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.university_id == other.university_id
            && self.gender == other.gender
            && self.waist_number == other.waist_number
    }
}

impl Eq for Candidate {}

impl std::hash::Hash for Candidate {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.university_id.hash(state);
        self.gender.hash(state);
        self.waist_number.hash(state);
    }
}

impl Candidate {
    /// Creates a new `Candidate` without a persisted ID.
    ///
    /// # Arguments
    ///
    /// * `university_id` - The owning university
    /// * `gender` - The gender bucket
    /// * `waist_number` - Human-facing contest number
    /// * `name` - Display name
    #[must_use]
    pub const fn new(university_id: i64, gender: Gender, waist_number: i32, name: String) -> Self {
        Self {
            candidate_id: None,
            university_id,
            gender,
            waist_number,
            name,
            birthday: None,
            height_cm: None,
            hobby: None,
            image_url: None,
            is_active: true,
        }
    }

    /// Creates a `Candidate` with an existing persisted ID.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn with_id(
        candidate_id: i64,
        university_id: i64,
        gender: Gender,
        waist_number: i32,
        name: String,
        birthday: Option<String>,
        height_cm: Option<i32>,
        hobby: Option<String>,
        image_url: Option<String>,
        is_active: bool,
    ) -> Self {
        Self {
            candidate_id: Some(candidate_id),
            university_id,
            gender,
            waist_number,
            name,
            birthday,
            height_cm,
            hobby,
            image_url,
            is_active,
        }
    }
}

/// Direction for neighbor-candidate navigation, ordered by waist number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// The candidate with the largest waist number smaller than the current.
    Prev,
    /// The candidate with the smallest waist number greater than the current.
    Next,
}

impl FromStr for Direction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "prev" => Ok(Self::Prev),
            "next" => Ok(Self::Next),
            _ => Err(DomainError::InvalidDirection(s.to_string())),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Direction {
    /// Converts this direction to its canonical lowercase string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Prev => "prev",
            Self::Next => "next",
        }
    }
}
