// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

pub mod auth;
pub mod csv_export;
pub mod error;
pub mod handlers;
pub mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AdminAuthService, AdminSession};
pub use csv_export::{results_csv, votes_csv};
pub use error::{ApiError, AuthError, translate_domain_error, translate_persistence_error};
pub use handlers::{
    admin_delete_candidate, admin_delete_category, admin_list_candidates, admin_list_categories,
    admin_upsert_candidate, admin_upsert_category, cast_vote, export_raw_votes, export_results_csv,
    export_votes_csv, get_candidate, get_device_votes, get_full_results, get_neighbor_candidate,
    get_ticket_usage, get_top_results, list_candidates, list_categories, list_universities, login,
    logout, verify_password,
};
pub use request_response::{
    CandidateInfo, CastVoteRequest, CastVoteResponse, CategoryInfo, DeleteCandidateRequest,
    DeleteCandidateResponse, DeleteCategoryRequest, DeleteCategoryResponse, DeviceVoteInfo,
    ExportVotesResponse, FullResultInfo, GetCandidateResponse, GetDeviceVotesResponse,
    GetFullResultsResponse, GetNeighborCandidateResponse, GetTicketUsageResponse,
    GetTopResultsResponse, ListCandidatesResponse, ListCategoriesResponse,
    ListUniversitiesResponse, LoginRequest, LoginResponse, LogoutResponse, TicketUsageInfo,
    TopResultInfo, UniversityInfo, UpsertCandidateRequest, UpsertCandidateResponse,
    UpsertCategoryRequest, UpsertCategoryResponse, VerifyPasswordRequest, VerifyPasswordResponse,
    VoteExportInfo,
};
