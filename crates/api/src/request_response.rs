// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The payloads operations accept and return.

/// A university as exposed to callers.
///
/// The admin credential hash is stripped; it never leaves the persistence
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UniversityInfo {
    /// Database-assigned id.
    pub university_id: i64,
    /// The display name.
    pub name: String,
    /// The URL-safe slug.
    pub slug: String,
    /// Whether the university is active.
    pub is_active: bool,
    /// Start of the voting window, if configured.
    pub voting_start_at: Option<String>,
    /// End of the voting window, if configured.
    pub voting_end_at: Option<String>,
}

/// API response for listing universities.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListUniversitiesResponse {
    /// The list of universities.
    pub universities: Vec<UniversityInfo>,
}

/// A voting category as exposed to callers.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CategoryInfo {
    /// Database-assigned id.
    pub category_id: i64,
    /// The university this category belongs to.
    pub university_id: i64,
    /// The gender bucket ("male" or "female").
    pub gender: String,
    /// The contest type ("king", "style", "popular", or "innocent").
    pub contest_type: String,
    /// Whether the category accepts votes.
    pub is_active: bool,
}

/// API response for listing categories.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListCategoriesResponse {
    /// The university the categories belong to.
    pub university_id: i64,
    /// The list of categories.
    pub categories: Vec<CategoryInfo>,
}

/// A candidate as exposed to callers.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CandidateInfo {
    /// Database-assigned id.
    pub candidate_id: i64,
    /// The university this candidate belongs to.
    pub university_id: i64,
    /// The gender bucket ("male" or "female").
    pub gender: String,
    /// The waist number worn during the contest.
    pub waist_number: i32,
    /// The candidate's display name.
    pub name: String,
    /// The candidate's birthday, if provided.
    pub birthday: Option<String>,
    /// The candidate's height in centimeters, if provided.
    pub height_cm: Option<i32>,
    /// The candidate's hobby, if provided.
    pub hobby: Option<String>,
    /// The candidate's profile image URL, if provided.
    pub image_url: Option<String>,
    /// Whether the candidate can receive votes.
    pub is_active: bool,
}

/// API response for listing candidates.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListCandidatesResponse {
    /// The university the candidates belong to.
    pub university_id: i64,
    /// The list of candidates, ordered by waist number.
    pub candidates: Vec<CandidateInfo>,
}

/// API response for fetching a single candidate.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GetCandidateResponse {
    /// The candidate.
    pub candidate: CandidateInfo,
}

/// API response for a neighbor-candidate lookup.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GetNeighborCandidateResponse {
    /// The neighbor's identifier, or `None` when the edge of the roster
    /// is reached.
    pub candidate_id: Option<i64>,
}

/// Remaining tickets for one gender bucket.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TicketUsageInfo {
    /// The gender bucket ("male" or "female").
    pub gender: String,
    /// Tickets still available for this bucket.
    pub remaining_tickets: u32,
}

/// API response for a device's remaining tickets.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GetTicketUsageResponse {
    /// The university the tickets apply to.
    pub university_id: i64,
    /// The device the tickets apply to.
    pub device_id: String,
    /// One entry per gender bucket.
    pub tickets: Vec<TicketUsageInfo>,
}

/// API request to cast a vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastVoteRequest {
    /// The university the vote belongs to.
    pub university_id: i64,
    /// The category being voted in.
    pub category_id: i64,
    /// The candidate being voted for.
    pub candidate_id: i64,
    /// The anonymous device identifier casting the vote.
    pub device_id: String,
}

/// API response for a successful vote.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CastVoteResponse {
    /// The canonical identifier of the recorded vote.
    pub vote_id: i64,
    /// Confirmation text for the client.
    pub message: String,
}

/// One vote a device has cast, joined with catalog metadata.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeviceVoteInfo {
    /// The category voted in.
    pub category_id: i64,
    /// The category's gender bucket.
    pub category_gender: String,
    /// The category's contest type.
    pub category_type: String,
    /// The gender-aware display label for the category (for example
    /// "King" or "Queen").
    pub category_label: String,
    /// The candidate voted for.
    pub candidate_id: i64,
    /// The candidate's display name.
    pub candidate_name: String,
    /// The candidate's gender bucket.
    pub candidate_gender: String,
    /// The candidate's waist number.
    pub candidate_waist_number: i32,
    /// The candidate's profile image URL, if provided.
    pub candidate_image_url: Option<String>,
    /// When the vote was recorded.
    pub voted_at: String,
}

/// API response for a device's vote history.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GetDeviceVotesResponse {
    /// The university the votes belong to.
    pub university_id: i64,
    /// The device that cast the votes.
    pub device_id: String,
    /// The votes the device has cast.
    pub votes: Vec<DeviceVoteInfo>,
}

/// The leading candidate of one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TopResultInfo {
    /// The category.
    pub category_id: i64,
    /// The leading candidate.
    pub candidate_id: i64,
    /// The leader's vote count.
    pub votes: i64,
}

/// API response for the per-category leaders.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GetTopResultsResponse {
    /// One leader per requested category that has votes.
    pub results: Vec<TopResultInfo>,
}

/// API request to verify an admin password without creating a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyPasswordRequest {
    /// The university whose credential to check.
    pub university_id: i64,
    /// The plaintext password to verify.
    pub password: String,
}

/// API response for a password verification.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VerifyPasswordResponse {
    /// Whether the password matched.
    pub valid: bool,
}

/// API request to log in as a university admin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    /// The university to administer.
    pub university_id: i64,
    /// The plaintext admin password.
    pub password: String,
}

/// API response for a successful login.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoginResponse {
    /// The bearer token for subsequent admin requests.
    pub session_token: String,
    /// The university the session administers.
    pub university_id: i64,
    /// Confirmation text for the client.
    pub message: String,
}

/// API response for a successful logout.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LogoutResponse {
    /// Confirmation text for the client.
    pub message: String,
}

/// API request to create or update a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertCategoryRequest {
    /// The university the category belongs to.
    pub university_id: i64,
    /// The category to update, or `None` to create a new one.
    pub category_id: Option<i64>,
    /// The gender bucket ("male" or "female").
    pub gender: String,
    /// The contest type ("king", "style", "popular", or "innocent").
    pub contest_type: String,
    /// Whether the category accepts votes.
    pub is_active: bool,
}

/// API response for a category create or update.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UpsertCategoryResponse {
    /// The canonical identifier of the created or updated category.
    pub category_id: i64,
    /// Confirmation text for the client.
    pub message: String,
}

/// API request to delete a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteCategoryRequest {
    /// The university the category belongs to.
    pub university_id: i64,
    /// The category to delete.
    pub category_id: i64,
}

/// API response for a category deletion.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeleteCategoryResponse {
    /// The identifier of the deleted category.
    pub category_id: i64,
    /// Confirmation text for the client.
    pub message: String,
}

/// API request to create or update a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertCandidateRequest {
    /// The university the candidate belongs to.
    pub university_id: i64,
    /// The candidate to update, or `None` to create a new one.
    pub candidate_id: Option<i64>,
    /// The gender bucket ("male" or "female").
    pub gender: String,
    /// The waist number worn during the contest.
    pub waist_number: i32,
    /// The candidate's display name.
    pub name: String,
    /// The candidate's birthday, if provided.
    pub birthday: Option<String>,
    /// The candidate's height in centimeters, if provided.
    pub height_cm: Option<i32>,
    /// The candidate's hobby, if provided.
    pub hobby: Option<String>,
    /// The candidate's profile image URL, if provided.
    pub image_url: Option<String>,
    /// Whether the candidate can receive votes.
    pub is_active: bool,
}

/// API response for a candidate create or update.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UpsertCandidateResponse {
    /// The canonical identifier of the created or updated candidate.
    pub candidate_id: i64,
    /// Confirmation text for the client.
    pub message: String,
}

/// API request to delete a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteCandidateRequest {
    /// The university the candidate belongs to.
    pub university_id: i64,
    /// The candidate to delete.
    pub candidate_id: i64,
}

/// API response for a candidate deletion.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeleteCandidateResponse {
    /// The identifier of the deleted candidate.
    pub candidate_id: i64,
    /// Confirmation text for the client.
    pub message: String,
}

/// One aggregated result row for the admin results view.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FullResultInfo {
    /// The category the votes were cast in.
    pub category_id: i64,
    /// The category's gender bucket.
    pub gender: String,
    /// The category's contest type.
    pub contest_type: String,
    /// The candidate the votes were cast for.
    pub candidate_id: i64,
    /// The candidate's waist number.
    pub waist_number: i32,
    /// The candidate's display name.
    pub name: String,
    /// The candidate's vote count within the category.
    pub votes: i64,
}

/// API response for the full admin results.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GetFullResultsResponse {
    /// The university the results belong to.
    pub university_id: i64,
    /// The ranked result rows. Candidates with zero votes are omitted.
    pub results: Vec<FullResultInfo>,
}

/// One raw vote row for the admin export.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VoteExportInfo {
    /// The canonical vote identifier.
    pub vote_id: i64,
    /// The device that cast the vote.
    pub device_id: String,
    /// The category the vote was cast in.
    pub category_id: i64,
    /// The category's gender bucket.
    pub category_gender: String,
    /// The category's contest type.
    pub category_type: String,
    /// The candidate the vote was cast for.
    pub candidate_id: i64,
    /// The candidate's display name.
    pub candidate_name: String,
    /// The candidate's gender bucket.
    pub candidate_gender: String,
    /// The candidate's waist number.
    pub waist_number: i32,
}

/// API response for the raw vote export.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ExportVotesResponse {
    /// The university the votes belong to.
    pub university_id: i64,
    /// Every vote recorded for the university.
    pub votes: Vec<VoteExportInfo>,
}
