// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// A stored university row, including the admin credential hash.
///
/// The hash never leaves the persistence/API boundary; response types in
/// the server strip it before serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniversityData {
    pub university_id: i64,
    pub name: String,
    pub slug: String,
    pub admin_password_hash: String,
    pub is_active: bool,
    pub voting_start_at: Option<String>,
    pub voting_end_at: Option<String>,
    pub created_at: String,
}

/// A stored category row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryData {
    pub category_id: i64,
    pub university_id: i64,
    pub gender: String,
    pub contest_type: String,
    pub is_active: bool,
    pub created_at: String,
}

/// A stored candidate row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateData {
    pub candidate_id: i64,
    pub university_id: i64,
    pub gender: String,
    pub waist_number: i32,
    pub name: String,
    pub birthday: Option<String>,
    pub height_cm: Option<i32>,
    pub hobby: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: String,
}

/// One vote a device has cast, joined with its category and candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceVoteData {
    pub category_id: i64,
    pub category_gender: String,
    pub category_type: String,
    pub candidate_id: i64,
    pub candidate_name: String,
    pub candidate_gender: String,
    pub candidate_waist_number: i32,
    pub candidate_image_url: Option<String>,
    pub voted_at: String,
}

/// One aggregated result row: a candidate's vote count within a category.
///
/// Candidates with zero votes produce no row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullResultData {
    pub university_id: i64,
    pub category_id: i64,
    pub gender: String,
    pub contest_type: String,
    pub candidate_id: i64,
    pub waist_number: i32,
    pub name: String,
    pub votes: i64,
}

/// The leading candidate of one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopResultData {
    pub category_id: i64,
    pub candidate_id: i64,
    pub votes: i64,
}

/// One vote row joined with catalog metadata, for the admin export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteExportData {
    pub vote_id: i64,
    pub device_id: String,
    pub category_id: i64,
    pub category_gender: String,
    pub category_type: String,
    pub candidate_id: i64,
    pub candidate_name: String,
    pub candidate_gender: String,
    pub waist_number: i32,
}

/// A stored admin session row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminSessionData {
    pub session_id: i64,
    pub session_token: String,
    pub university_id: i64,
    pub created_at: String,
    pub last_activity_at: String,
    pub expires_at: String,
}
