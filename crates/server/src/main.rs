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
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};
use uni_vote_api::{
    ApiError, CastVoteRequest, CastVoteResponse, DeleteCandidateRequest, DeleteCandidateResponse,
    DeleteCategoryRequest, DeleteCategoryResponse, ExportVotesResponse, GetCandidateResponse,
    GetDeviceVotesResponse, GetFullResultsResponse, GetNeighborCandidateResponse,
    GetTicketUsageResponse, GetTopResultsResponse, ListCandidatesResponse, ListCategoriesResponse,
    ListUniversitiesResponse, LoginRequest, LoginResponse, LogoutResponse, UpsertCandidateRequest,
    UpsertCandidateResponse, UpsertCategoryRequest, UpsertCategoryResponse, VerifyPasswordRequest,
    VerifyPasswordResponse, admin_delete_candidate, admin_delete_category, admin_list_candidates,
    admin_list_categories, admin_upsert_candidate, admin_upsert_category, cast_vote,
    export_raw_votes, export_results_csv, export_votes_csv, get_candidate, get_device_votes,
    get_full_results, get_neighbor_candidate, get_ticket_usage, get_top_results, list_candidates,
    list_categories, list_universities, login, logout, verify_password,
};
use uni_vote_persistence::{PersistenceError, SqlitePersistence};

mod session;

use session::SessionAdmin;

/// University Vote Server - HTTP server for the university voting platform
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// `SQLite` database file. Without this or --mysql-url the server
    /// runs on an in-memory database that vanishes at shutdown.
    #[arg(short, long)]
    database: Option<String>,

    /// MySQL connection URL. Takes precedence over --database.
    #[arg(long)]
    mysql_url: Option<String>,

    /// Port to listen on
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Optional maintenance command to run instead of serving.
    #[command(subcommand)]
    command: Option<Command>,
}

/// Maintenance commands that run against the database and exit.
#[derive(Subcommand, Debug)]
enum Command {
    /// Create a university with its admin credential.
    CreateUniversity {
        /// Display name of the university.
        #[arg(long)]
        name: String,
        /// URL-safe unique identifier.
        #[arg(long)]
        slug: String,
        /// Plain-text admin password. Stored as a bcrypt hash.
        #[arg(long)]
        password: String,
        /// ISO 8601 instant the voting window opens. Unbounded if omitted.
        #[arg(long)]
        voting_start: Option<String>,
        /// ISO 8601 instant the voting window closes. Unbounded if omitted.
        #[arg(long)]
        voting_end: Option<String>,
    },
    /// Replace the voting window of an existing university.
    SetVotingWindow {
        /// The university to update.
        #[arg(long)]
        university_id: i64,
        /// ISO 8601 instant the voting window opens. Unbounded if omitted.
        #[arg(long)]
        voting_start: Option<String>,
        /// ISO 8601 instant the voting window closes. Unbounded if omitted.
        #[arg(long)]
        voting_end: Option<String>,
    },
}

/// State handed to every handler.
///
/// One persistence adapter behind a mutex; each handler holds the lock
/// for the duration of a single operation.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for the catalog, votes, and admin sessions.
    persistence: Arc<Mutex<SqlitePersistence>>,
}

/// API request for casting a vote.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CastVoteApiRequest {
    /// The university the vote is scoped to.
    university_id: i64,
    /// The category being voted in.
    category_id: i64,
    /// The candidate receiving the vote.
    candidate_id: i64,
    /// The device identifier of the voter.
    device_id: String,
}

/// API request for verifying an admin password without opening a session.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct VerifyPasswordApiRequest {
    /// The university whose password is being checked.
    university_id: i64,
    /// The plain-text password to check.
    password: String,
}

/// API request for logging in as a university admin.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct LoginApiRequest {
    /// The university to administer.
    university_id: i64,
    /// The plain-text admin password.
    password: String,
}

/// API request for creating or updating a category.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct UpsertCategoryApiRequest {
    /// The university the category belongs to.
    university_id: i64,
    /// The category to update. A new category is created when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    category_id: Option<i64>,
    /// The gender bucket ("male" or "female").
    gender: String,
    /// The contest type ("king", "style", "popular", or "innocent").
    contest_type: String,
    /// Whether the category is visible to voters.
    is_active: bool,
}

/// API request for creating or updating a candidate.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct UpsertCandidateApiRequest {
    /// The university the candidate belongs to.
    university_id: i64,
    /// The candidate to update. A new candidate is created when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    candidate_id: Option<i64>,
    /// The gender bucket ("male" or "female").
    gender: String,
    /// The number worn by the candidate, unique per gender.
    waist_number: i32,
    /// The candidate's display name.
    name: String,
    /// Optional birthday in `YYYY-MM-DD` form.
    birthday: Option<String>,
    /// Optional height in centimeters.
    height_cm: Option<i32>,
    /// Optional hobby text.
    hobby: Option<String>,
    /// Optional profile image URL.
    image_url: Option<String>,
    /// Whether the candidate is visible to voters.
    is_active: bool,
}

/// Query parameters for listing candidates.
#[derive(Debug, Deserialize)]
struct CandidateListQuery {
    /// The gender bucket to list.
    gender: String,
}

/// Query parameters for walking to a neighboring candidate.
#[derive(Debug, Deserialize)]
struct NeighborQuery {
    /// The walk direction, "prev" or "next".
    direction: String,
}

/// Query parameters for reading ticket usage.
#[derive(Debug, Deserialize)]
struct TicketUsageQuery {
    /// The device identifier of the voter.
    device_id: String,
}

/// Query parameters for reading a device's vote history.
#[derive(Debug, Deserialize)]
struct DeviceVotesQuery {
    /// The device identifier of the voter.
    device_id: String,
}

/// Query parameters for the public top results endpoint.
#[derive(Debug, Deserialize)]
struct TopResultsQuery {
    /// Comma-separated category IDs, e.g. `1,2,3`.
    category_ids: String,
}

/// Query parameters scoping an admin request to one university.
#[derive(Debug, Deserialize)]
struct AdminScopeQuery {
    /// The university the session must be scoped to.
    university_id: i64,
}

/// JSON body every failed request carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Always true; lets clients branch without checking the status.
    error: bool,
    /// Human-readable description of what went wrong.
    message: String,
}

/// A status code paired with the message to ship as [`ErrorResponse`].
#[derive(Debug)]
struct HttpError {
    /// Status for the response line.
    status: StatusCode,
    /// Message for the body.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::Conflict { .. } | ApiError::ReferentialConflict { .. } => {
                StatusCode::CONFLICT
            }
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Parses a comma-separated list of category IDs.
fn parse_category_ids(raw: &str) -> Result<Vec<i64>, HttpError> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>().map_err(|_| HttpError {
                status: StatusCode::BAD_REQUEST,
                message: format!("Invalid category id: '{part}'"),
            })
        })
        .collect()
}

/// Wraps a CSV document in a download response.
fn csv_download(filename: &str, document: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, String::from("text/csv")),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        document,
    )
        .into_response()
}

/// Handler for GET `/universities` endpoint.
///
/// Lists the active universities.
async fn handle_list_universities(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListUniversitiesResponse>, HttpError> {
    info!("Handling list_universities request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ListUniversitiesResponse = list_universities(&mut persistence)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/universities/{university_id}/categories` endpoint.
///
/// Lists the active voting categories of a university.
async fn handle_list_categories(
    AxumState(app_state): AxumState<AppState>,
    Path(university_id): Path<i64>,
) -> Result<Json<ListCategoriesResponse>, HttpError> {
    info!(
        university_id = university_id,
        "Handling list_categories request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: ListCategoriesResponse = list_categories(&mut persistence, university_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/universities/{university_id}/candidates` endpoint.
///
/// Lists the active candidates of one gender, ordered by waist number.
async fn handle_list_candidates(
    AxumState(app_state): AxumState<AppState>,
    Path(university_id): Path<i64>,
    Query(query): Query<CandidateListQuery>,
) -> Result<Json<ListCandidatesResponse>, HttpError> {
    info!(
        university_id = university_id,
        gender = %query.gender,
        "Handling list_candidates request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: ListCandidatesResponse =
        list_candidates(&mut persistence, university_id, &query.gender)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/candidates/{candidate_id}` endpoint.
///
/// Returns the full profile of one candidate.
async fn handle_get_candidate(
    AxumState(app_state): AxumState<AppState>,
    Path(candidate_id): Path<i64>,
) -> Result<Json<GetCandidateResponse>, HttpError> {
    info!(candidate_id = candidate_id, "Handling get_candidate request");

    let mut persistence = app_state.persistence.lock().await;
    let response: GetCandidateResponse = get_candidate(&mut persistence, candidate_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/candidates/{candidate_id}/neighbor` endpoint.
///
/// Returns the adjacent candidate in waist-number order within the same
/// university and gender, or `null` at the edge of the roster.
async fn handle_get_neighbor_candidate(
    AxumState(app_state): AxumState<AppState>,
    Path(candidate_id): Path<i64>,
    Query(query): Query<NeighborQuery>,
) -> Result<Json<GetNeighborCandidateResponse>, HttpError> {
    info!(
        candidate_id = candidate_id,
        direction = %query.direction,
        "Handling get_neighbor_candidate request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: GetNeighborCandidateResponse =
        get_neighbor_candidate(&mut persistence, candidate_id, &query.direction)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/universities/{university_id}/tickets` endpoint.
///
/// Reports the remaining vote tickets per gender for one device.
async fn handle_get_ticket_usage(
    AxumState(app_state): AxumState<AppState>,
    Path(university_id): Path<i64>,
    Query(query): Query<TicketUsageQuery>,
) -> Result<Json<GetTicketUsageResponse>, HttpError> {
    // Device ids stay out of the logs
    info!(
        university_id = university_id,
        "Handling get_ticket_usage request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: GetTicketUsageResponse =
        get_ticket_usage(&mut persistence, university_id, &query.device_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/votes` endpoint.
///
/// Casts a vote for a candidate in a category.
async fn handle_cast_vote(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CastVoteApiRequest>,
) -> Result<Json<CastVoteResponse>, HttpError> {
    // Device ids stay out of the logs
    info!(
        university_id = req.university_id,
        category_id = req.category_id,
        candidate_id = req.candidate_id,
        "Handling cast_vote request"
    );

    let request: CastVoteRequest = CastVoteRequest {
        university_id: req.university_id,
        category_id: req.category_id,
        candidate_id: req.candidate_id,
        device_id: req.device_id,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: CastVoteResponse = cast_vote(&mut persistence, &request)?;
    drop(persistence);

    info!(
        vote_id = response.vote_id,
        category_id = request.category_id,
        "Successfully recorded vote"
    );

    Ok(Json(response))
}

/// Handler for GET `/universities/{university_id}/device_votes` endpoint.
///
/// Lists the votes one device has cast at a university.
async fn handle_get_device_votes(
    AxumState(app_state): AxumState<AppState>,
    Path(university_id): Path<i64>,
    Query(query): Query<DeviceVotesQuery>,
) -> Result<Json<GetDeviceVotesResponse>, HttpError> {
    // Device ids stay out of the logs
    info!(
        university_id = university_id,
        "Handling get_device_votes request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: GetDeviceVotesResponse =
        get_device_votes(&mut persistence, university_id, &query.device_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/results/top` endpoint.
///
/// Returns the leading candidate of each requested category.
async fn handle_get_top_results(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<TopResultsQuery>,
) -> Result<Json<GetTopResultsResponse>, HttpError> {
    info!(
        category_ids = %query.category_ids,
        "Handling get_top_results request"
    );

    let category_ids: Vec<i64> = parse_category_ids(&query.category_ids)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: GetTopResultsResponse = get_top_results(&mut persistence, &category_ids)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/admin/verify_password` endpoint.
///
/// Checks an admin password without opening a session.
async fn handle_verify_password(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<VerifyPasswordApiRequest>,
) -> Result<Json<VerifyPasswordResponse>, HttpError> {
    info!(
        university_id = req.university_id,
        "Handling verify_password request"
    );

    let request: VerifyPasswordRequest = VerifyPasswordRequest {
        university_id: req.university_id,
        password: req.password,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: VerifyPasswordResponse = verify_password(&mut persistence, &request)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/admin/login` endpoint.
///
/// Opens an admin session scoped to one university.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginApiRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    info!(university_id = req.university_id, "Handling login request");

    let request: LoginRequest = LoginRequest {
        university_id: req.university_id,
        password: req.password,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: LoginResponse = login(&mut persistence, &request)?;
    drop(persistence);

    info!(
        university_id = response.university_id,
        "Admin session opened"
    );

    Ok(Json(response))
}

/// Handler for POST `/admin/logout` endpoint.
///
/// Closes the admin session carried by the bearer token.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    SessionAdmin(admin_session, token): SessionAdmin,
) -> Result<Json<LogoutResponse>, HttpError> {
    info!(
        university_id = admin_session.university_id,
        "Handling logout request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: LogoutResponse = logout(&mut persistence, &token)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/admin/categories` endpoint.
///
/// Lists all categories of the session's university, inactive ones included.
async fn handle_admin_list_categories(
    AxumState(app_state): AxumState<AppState>,
    SessionAdmin(admin_session, _): SessionAdmin,
    Query(query): Query<AdminScopeQuery>,
) -> Result<Json<ListCategoriesResponse>, HttpError> {
    info!(
        university_id = query.university_id,
        "Handling admin_list_categories request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: ListCategoriesResponse =
        admin_list_categories(&mut persistence, query.university_id, &admin_session)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/admin/categories` endpoint.
///
/// Creates or updates a category.
async fn handle_admin_upsert_category(
    AxumState(app_state): AxumState<AppState>,
    SessionAdmin(admin_session, _): SessionAdmin,
    Json(req): Json<UpsertCategoryApiRequest>,
) -> Result<Json<UpsertCategoryResponse>, HttpError> {
    info!(
        university_id = req.university_id,
        category_id = req.category_id,
        gender = %req.gender,
        contest_type = %req.contest_type,
        "Handling admin_upsert_category request"
    );

    let request: UpsertCategoryRequest = UpsertCategoryRequest {
        university_id: req.university_id,
        category_id: req.category_id,
        gender: req.gender,
        contest_type: req.contest_type,
        is_active: req.is_active,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: UpsertCategoryResponse =
        admin_upsert_category(&mut persistence, &request, &admin_session)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for DELETE `/admin/categories/{category_id}` endpoint.
///
/// Deletes a category that has no votes.
async fn handle_admin_delete_category(
    AxumState(app_state): AxumState<AppState>,
    SessionAdmin(admin_session, _): SessionAdmin,
    Path(category_id): Path<i64>,
    Query(query): Query<AdminScopeQuery>,
) -> Result<Json<DeleteCategoryResponse>, HttpError> {
    info!(
        university_id = query.university_id,
        category_id = category_id,
        "Handling admin_delete_category request"
    );

    let request: DeleteCategoryRequest = DeleteCategoryRequest {
        university_id: query.university_id,
        category_id,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteCategoryResponse =
        admin_delete_category(&mut persistence, &request, &admin_session)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/admin/candidates` endpoint.
///
/// Lists all candidates of the session's university, inactive ones included.
async fn handle_admin_list_candidates(
    AxumState(app_state): AxumState<AppState>,
    SessionAdmin(admin_session, _): SessionAdmin,
    Query(query): Query<AdminScopeQuery>,
) -> Result<Json<ListCandidatesResponse>, HttpError> {
    info!(
        university_id = query.university_id,
        "Handling admin_list_candidates request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: ListCandidatesResponse =
        admin_list_candidates(&mut persistence, query.university_id, &admin_session)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/admin/candidates` endpoint.
///
/// Creates or updates a candidate.
async fn handle_admin_upsert_candidate(
    AxumState(app_state): AxumState<AppState>,
    SessionAdmin(admin_session, _): SessionAdmin,
    Json(req): Json<UpsertCandidateApiRequest>,
) -> Result<Json<UpsertCandidateResponse>, HttpError> {
    info!(
        university_id = req.university_id,
        candidate_id = req.candidate_id,
        gender = %req.gender,
        waist_number = req.waist_number,
        "Handling admin_upsert_candidate request"
    );

    let request: UpsertCandidateRequest = UpsertCandidateRequest {
        university_id: req.university_id,
        candidate_id: req.candidate_id,
        gender: req.gender,
        waist_number: req.waist_number,
        name: req.name,
        birthday: req.birthday,
        height_cm: req.height_cm,
        hobby: req.hobby,
        image_url: req.image_url,
        is_active: req.is_active,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: UpsertCandidateResponse =
        admin_upsert_candidate(&mut persistence, &request, &admin_session)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for DELETE `/admin/candidates/{candidate_id}` endpoint.
///
/// Deletes a candidate that has no votes.
async fn handle_admin_delete_candidate(
    AxumState(app_state): AxumState<AppState>,
    SessionAdmin(admin_session, _): SessionAdmin,
    Path(candidate_id): Path<i64>,
    Query(query): Query<AdminScopeQuery>,
) -> Result<Json<DeleteCandidateResponse>, HttpError> {
    info!(
        university_id = query.university_id,
        candidate_id = candidate_id,
        "Handling admin_delete_candidate request"
    );

    let request: DeleteCandidateRequest = DeleteCandidateRequest {
        university_id: query.university_id,
        candidate_id,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteCandidateResponse =
        admin_delete_candidate(&mut persistence, &request, &admin_session)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/admin/results` endpoint.
///
/// Returns the full vote tally of the session's university, ranked for
/// display.
async fn handle_get_full_results(
    AxumState(app_state): AxumState<AppState>,
    SessionAdmin(admin_session, _): SessionAdmin,
    Query(query): Query<AdminScopeQuery>,
) -> Result<Json<GetFullResultsResponse>, HttpError> {
    info!(
        university_id = query.university_id,
        "Handling get_full_results request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: GetFullResultsResponse =
        get_full_results(&mut persistence, query.university_id, &admin_session)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/admin/votes/export` endpoint.
///
/// Returns every vote of the session's university with device identifiers.
async fn handle_export_votes(
    AxumState(app_state): AxumState<AppState>,
    SessionAdmin(admin_session, _): SessionAdmin,
    Query(query): Query<AdminScopeQuery>,
) -> Result<Json<ExportVotesResponse>, HttpError> {
    info!(
        university_id = query.university_id,
        "Handling export_votes request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: ExportVotesResponse =
        export_raw_votes(&mut persistence, query.university_id, &admin_session)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/admin/results.csv` endpoint.
///
/// Returns the full tally as a CSV download.
async fn handle_results_csv_download(
    AxumState(app_state): AxumState<AppState>,
    SessionAdmin(admin_session, _): SessionAdmin,
    Query(query): Query<AdminScopeQuery>,
) -> Result<Response, HttpError> {
    info!(
        university_id = query.university_id,
        "Handling results CSV download request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let document: String =
        export_results_csv(&mut persistence, query.university_id, &admin_session)?;
    drop(persistence);

    Ok(csv_download("results.csv", document))
}

/// Handler for GET `/admin/votes.csv` endpoint.
///
/// Returns the raw vote export as a CSV download.
async fn handle_votes_csv_download(
    AxumState(app_state): AxumState<AppState>,
    SessionAdmin(admin_session, _): SessionAdmin,
    Query(query): Query<AdminScopeQuery>,
) -> Result<Response, HttpError> {
    info!(
        university_id = query.university_id,
        "Handling votes CSV download request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let document: String = export_votes_csv(&mut persistence, query.university_id, &admin_session)?;
    drop(persistence);

    Ok(csv_download("votes.csv", document))
}

/// Wires every route to its handler.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/universities", get(handle_list_universities))
        .route(
            "/universities/{university_id}/categories",
            get(handle_list_categories),
        )
        .route(
            "/universities/{university_id}/candidates",
            get(handle_list_candidates),
        )
        .route(
            "/universities/{university_id}/tickets",
            get(handle_get_ticket_usage),
        )
        .route(
            "/universities/{university_id}/device_votes",
            get(handle_get_device_votes),
        )
        .route("/candidates/{candidate_id}", get(handle_get_candidate))
        .route(
            "/candidates/{candidate_id}/neighbor",
            get(handle_get_neighbor_candidate),
        )
        .route("/votes", post(handle_cast_vote))
        .route("/results/top", get(handle_get_top_results))
        .route("/admin/verify_password", post(handle_verify_password))
        .route("/admin/login", post(handle_login))
        .route("/admin/logout", post(handle_logout))
        .route("/admin/categories", get(handle_admin_list_categories))
        .route("/admin/categories", post(handle_admin_upsert_category))
        .route(
            "/admin/categories/{category_id}",
            delete(handle_admin_delete_category),
        )
        .route("/admin/candidates", get(handle_admin_list_candidates))
        .route("/admin/candidates", post(handle_admin_upsert_candidate))
        .route(
            "/admin/candidates/{candidate_id}",
            delete(handle_admin_delete_candidate),
        )
        .route("/admin/results", get(handle_get_full_results))
        .route("/admin/votes/export", get(handle_export_votes))
        .route("/admin/results.csv", get(handle_results_csv_download))
        .route("/admin/votes.csv", get(handle_votes_csv_download))
        .with_state(app_state)
}

/// Opens the persistence backend selected by the CLI arguments.
fn open_persistence(args: &Args) -> Result<SqlitePersistence, PersistenceError> {
    if let Some(database_url) = &args.mysql_url {
        info!("Using MySQL database");
        return SqlitePersistence::new_with_mysql(database_url);
    }
    if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        return SqlitePersistence::new_with_file(db_path);
    }
    info!("Using in-memory database");
    SqlitePersistence::new_in_memory()
}

/// Runs a maintenance command against the database.
fn run_command(
    command: Command,
    persistence: &mut SqlitePersistence,
) -> Result<(), PersistenceError> {
    match command {
        Command::CreateUniversity {
            name,
            slug,
            password,
            voting_start,
            voting_end,
        } => {
            let university_id: i64 = persistence.create_university(
                &name,
                &slug,
                &password,
                voting_start.as_deref(),
                voting_end.as_deref(),
            )?;
            info!(
                university_id = university_id,
                name = %name,
                slug = %slug,
                "Created university"
            );
        }
        Command::SetVotingWindow {
            university_id,
            voting_start,
            voting_end,
        } => {
            persistence.set_voting_window(
                university_id,
                voting_start.as_deref(),
                voting_end.as_deref(),
            )?;
            info!(university_id = university_id, "Updated voting window");
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing University Vote Server");

    let mut persistence: SqlitePersistence = open_persistence(&args)?;

    // Maintenance commands run against the database and exit
    if let Some(command) = args.command {
        run_command(command, &mut persistence)?;
        return Ok(());
    }

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };
    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
