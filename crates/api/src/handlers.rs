// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The operations the server exposes, one function per route.
//!
//! Each takes the persistence adapter plus a request or path values,
//! and returns a response struct or an [`ApiError`](crate::ApiError).
//! Admin operations additionally take a validated session and check it
//! against the university they are asked to touch.

use std::str::FromStr;
use time::OffsetDateTime;
use uni_vote_domain::{
    Candidate, ContestType, DeviceId, Direction, Gender, TicketUsage, University, compare_ranked,
    ensure_voting_open, order_section_keys, validate_candidate_fields,
};
use uni_vote_persistence::{
    CandidateData, CategoryData, DeviceVoteData, FullResultData, PersistenceError,
    SqlitePersistence, TopResultData, UniversityData, VoteExportData,
};

use crate::auth::{AdminAuthService, AdminSession};
use crate::csv_export::{results_csv, votes_csv};
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{
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

/// Resolves a university by ID or reports it missing.
///
/// # Arguments
///
/// * `persistence` - The persistence layer to query
/// * `university_id` - The university to resolve
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the university does not exist,
/// or a translated persistence error if the lookup fails.
fn require_university(
    persistence: &mut SqlitePersistence,
    university_id: i64,
) -> Result<UniversityData, ApiError> {
    persistence
        .get_university(university_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("University"),
            message: format!("University {university_id} does not exist"),
        })
}

/// Converts a stored university row into its public projection.
///
/// The admin credential hash is dropped here; it never reaches a response.
fn university_to_info(data: UniversityData) -> UniversityInfo {
    UniversityInfo {
        university_id: data.university_id,
        name: data.name,
        slug: data.slug,
        is_active: data.is_active,
        voting_start_at: data.voting_start_at,
        voting_end_at: data.voting_end_at,
    }
}

/// Converts a stored category row into its public projection.
fn category_to_info(data: CategoryData) -> CategoryInfo {
    CategoryInfo {
        category_id: data.category_id,
        university_id: data.university_id,
        gender: data.gender,
        contest_type: data.contest_type,
        is_active: data.is_active,
    }
}

/// Converts a stored candidate row into its public projection.
fn candidate_to_info(data: CandidateData) -> CandidateInfo {
    CandidateInfo {
        candidate_id: data.candidate_id,
        university_id: data.university_id,
        gender: data.gender,
        waist_number: data.waist_number,
        name: data.name,
        birthday: data.birthday,
        height_cm: data.height_cm,
        hobby: data.hobby,
        image_url: data.image_url,
        is_active: data.is_active,
    }
}

/// Maps a waist-number collision to a conflict, passing other errors
/// through the standard translation.
fn duplicate_waist_conflict(err: PersistenceError, gender: Gender, waist_number: i32) -> ApiError {
    match err {
        PersistenceError::UniqueViolation(_) => ApiError::Conflict {
            rule: String::from("unique_waist_number"),
            message: format!(
                "Waist number {waist_number} is already taken for {gender} candidates"
            ),
        },
        other => translate_persistence_error(other),
    }
}

// ========================================================================
// Catalog Handlers
// ========================================================================

/// Lists all active universities.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_universities(
    persistence: &mut SqlitePersistence,
) -> Result<ListUniversitiesResponse, ApiError> {
    let universities: Vec<UniversityData> = persistence
        .list_active_universities()
        .map_err(translate_persistence_error)?;

    Ok(ListUniversitiesResponse {
        universities: universities.into_iter().map(university_to_info).collect(),
    })
}

/// Lists a university's active voting categories.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `university_id` - The university to list categories for
///
/// # Errors
///
/// Returns an error if the university does not exist or the query fails.
pub fn list_categories(
    persistence: &mut SqlitePersistence,
    university_id: i64,
) -> Result<ListCategoriesResponse, ApiError> {
    require_university(persistence, university_id)?;

    let categories: Vec<CategoryData> = persistence
        .list_active_categories(university_id)
        .map_err(translate_persistence_error)?;

    Ok(ListCategoriesResponse {
        university_id,
        categories: categories.into_iter().map(category_to_info).collect(),
    })
}

/// Lists a university's active candidates in one gender bucket, ordered by
/// waist number.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `university_id` - The university to list candidates for
/// * `gender` - The gender bucket ("male" or "female", case-insensitive)
///
/// # Errors
///
/// Returns an error if:
/// - The gender is not a known bucket
/// - The university does not exist
/// - Database operations fail
pub fn list_candidates(
    persistence: &mut SqlitePersistence,
    university_id: i64,
    gender: &str,
) -> Result<ListCandidatesResponse, ApiError> {
    let gender: Gender = Gender::from_str(gender).map_err(translate_domain_error)?;

    require_university(persistence, university_id)?;

    let candidates: Vec<CandidateData> = persistence
        .list_active_candidates(university_id, gender.as_str())
        .map_err(translate_persistence_error)?;

    Ok(ListCandidatesResponse {
        university_id,
        candidates: candidates.into_iter().map(candidate_to_info).collect(),
    })
}

/// Fetches a single candidate by ID.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `candidate_id` - The candidate to fetch
///
/// # Errors
///
/// Returns an error if the candidate does not exist or the query fails.
pub fn get_candidate(
    persistence: &mut SqlitePersistence,
    candidate_id: i64,
) -> Result<GetCandidateResponse, ApiError> {
    let candidate: CandidateData = persistence
        .get_candidate(candidate_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Candidate"),
            message: format!("Candidate {candidate_id} does not exist"),
        })?;

    Ok(GetCandidateResponse {
        candidate: candidate_to_info(candidate),
    })
}

/// Finds the neighboring candidate in waist-number order.
///
/// Navigation stays within the candidate's university and gender bucket
/// and skips deactivated candidates. The response carries `None` when the
/// edge of the roster is reached.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `candidate_id` - The candidate to navigate from
/// * `direction` - "prev" or "next" (case-insensitive)
///
/// # Errors
///
/// Returns an error if:
/// - The direction is not "prev" or "next"
/// - The candidate does not exist
/// - Database operations fail
pub fn get_neighbor_candidate(
    persistence: &mut SqlitePersistence,
    candidate_id: i64,
    direction: &str,
) -> Result<GetNeighborCandidateResponse, ApiError> {
    let direction: Direction = Direction::from_str(direction).map_err(translate_domain_error)?;

    let candidate: CandidateData = persistence
        .get_candidate(candidate_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Candidate"),
            message: format!("Candidate {candidate_id} does not exist"),
        })?;

    let neighbor: Option<CandidateData> = persistence
        .get_neighbor_candidate(
            candidate.university_id,
            &candidate.gender,
            candidate.waist_number,
            direction,
        )
        .map_err(translate_persistence_error)?;

    Ok(GetNeighborCandidateResponse {
        candidate_id: neighbor.map(|c| c.candidate_id),
    })
}

// ========================================================================
// Ticket and Vote Handlers
// ========================================================================

/// Reports a device's remaining tickets per gender bucket.
///
/// One entry is returned per gender that appears in the university's
/// active categories. The counts are advisory; the vote insert is the
/// authoritative gate.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `university_id` - The university the tickets apply to
/// * `device_id` - The device identifier to report on
///
/// # Errors
///
/// Returns an error if:
/// - The device identifier is empty or oversized
/// - The university does not exist
/// - Database operations fail
pub fn get_ticket_usage(
    persistence: &mut SqlitePersistence,
    university_id: i64,
    device_id: &str,
) -> Result<GetTicketUsageResponse, ApiError> {
    let device: DeviceId = DeviceId::from_str(device_id).map_err(translate_domain_error)?;

    require_university(persistence, university_id)?;

    let categories: Vec<CategoryData> = persistence
        .list_active_categories(university_id)
        .map_err(translate_persistence_error)?;

    let mut tickets: Vec<TicketUsageInfo> = Vec::new();
    for gender in [Gender::Male, Gender::Female] {
        if !categories.iter().any(|c| c.gender == gender.as_str()) {
            continue;
        }

        let count: i64 = persistence
            .count_voted_categories(device.as_str(), university_id, gender.as_str())
            .map_err(translate_persistence_error)?;
        let voted: u32 = u32::try_from(count).unwrap_or_else(|_| {
            tracing::warn!("Voted category count out of range: {}", count);
            u32::MAX
        });

        let usage: TicketUsage = TicketUsage::from_voted_categories(gender, voted);
        tickets.push(TicketUsageInfo {
            gender: gender.as_str().to_string(),
            remaining_tickets: usage.remaining_tickets,
        });
    }

    Ok(GetTicketUsageResponse {
        university_id,
        device_id: device.as_str().to_string(),
        tickets,
    })
}

/// Casts a vote for a candidate in a category.
///
/// In order:
/// - Validates the request fields
/// - Enforces the university's voting window
/// - Checks that the category and candidate are live and consistent
/// - Inserts the vote, turning a duplicate cast into a conflict
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The vote to cast
///
/// # Returns
///
/// * `Ok(CastVoteResponse)` with the recorded vote's ID
/// * `Err(ApiError)` if any precondition fails
///
/// # Errors
///
/// Returns an error if:
/// - Any identifier is non-positive or the device identifier is invalid
/// - The university is inactive or outside its voting window
/// - The category or candidate is missing, inactive, or inconsistent
/// - The device has already voted in the category
pub fn cast_vote(
    persistence: &mut SqlitePersistence,
    request: &CastVoteRequest,
) -> Result<CastVoteResponse, ApiError> {
    // Validate inputs before touching storage
    let device: DeviceId = DeviceId::from_str(&request.device_id).map_err(translate_domain_error)?;

    if request.university_id <= 0 {
        return Err(ApiError::InvalidInput {
            field: String::from("university_id"),
            message: String::from("University ID must be positive"),
        });
    }
    if request.category_id <= 0 {
        return Err(ApiError::InvalidInput {
            field: String::from("category_id"),
            message: String::from("Category ID must be positive"),
        });
    }
    if request.candidate_id <= 0 {
        return Err(ApiError::InvalidInput {
            field: String::from("candidate_id"),
            message: String::from("Candidate ID must be positive"),
        });
    }

    // Enforce the voting window before any referential checks
    let university_data: UniversityData = require_university(persistence, request.university_id)?;
    let university: University = University::with_id(
        university_data.university_id,
        &university_data.name,
        &university_data.slug,
        university_data.is_active,
        university_data.voting_start_at.clone(),
        university_data.voting_end_at.clone(),
    );
    ensure_voting_open(&university, OffsetDateTime::now_utc()).map_err(translate_domain_error)?;

    // The category must be live in this university
    let category: CategoryData = persistence
        .get_category(request.category_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Category"),
            message: format!("Category {} does not exist", request.category_id),
        })?;
    if category.university_id != request.university_id {
        return Err(ApiError::InvalidInput {
            field: String::from("category_id"),
            message: format!(
                "Category {} does not belong to university {}",
                request.category_id, request.university_id
            ),
        });
    }
    if !category.is_active {
        return Err(ApiError::InvalidInput {
            field: String::from("category_id"),
            message: format!("Category {} is not accepting votes", request.category_id),
        });
    }

    // The candidate must be live and match the category's gender bucket
    let candidate: CandidateData = persistence
        .get_candidate(request.candidate_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Candidate"),
            message: format!("Candidate {} does not exist", request.candidate_id),
        })?;
    if candidate.university_id != request.university_id {
        return Err(ApiError::InvalidInput {
            field: String::from("candidate_id"),
            message: format!(
                "Candidate {} does not belong to university {}",
                request.candidate_id, request.university_id
            ),
        });
    }
    if !candidate.is_active {
        return Err(ApiError::InvalidInput {
            field: String::from("candidate_id"),
            message: format!("Candidate {} is not accepting votes", request.candidate_id),
        });
    }
    if candidate.gender != category.gender {
        return Err(ApiError::InvalidInput {
            field: String::from("candidate_id"),
            message: format!(
                "Candidate {} does not match the gender of category {}",
                request.candidate_id, request.category_id
            ),
        });
    }

    // Insert the vote; the unique index resolves the duplicate-cast race
    let vote_id: i64 = persistence
        .insert_vote(
            device.as_str(),
            request.university_id,
            request.category_id,
            request.candidate_id,
        )
        .map_err(|e| match e {
            PersistenceError::UniqueViolation(_) => ApiError::Conflict {
                rule: String::from("one_vote_per_category"),
                message: String::from("This device has already voted in this category"),
            },
            other => translate_persistence_error(other),
        })?;

    Ok(CastVoteResponse {
        vote_id,
        message: String::from("Vote recorded"),
    })
}

/// Returns a device's own votes within a university, denormalized for the
/// "my votes" view.
///
/// Requires the caller to present the device identifier, so it exposes no
/// other device's data. Not admin-gated.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `university_id` - The university the votes belong to
/// * `device_id` - The device whose votes to list
///
/// # Errors
///
/// Returns an error if:
/// - The device identifier is empty or oversized
/// - The university does not exist
/// - A stored gender or contest type fails to parse
/// - Database operations fail
pub fn get_device_votes(
    persistence: &mut SqlitePersistence,
    university_id: i64,
    device_id: &str,
) -> Result<GetDeviceVotesResponse, ApiError> {
    let device: DeviceId = DeviceId::from_str(device_id).map_err(translate_domain_error)?;

    require_university(persistence, university_id)?;

    let rows: Vec<DeviceVoteData> = persistence
        .get_device_votes(device.as_str(), university_id)
        .map_err(translate_persistence_error)?;

    let votes: Vec<DeviceVoteInfo> = rows
        .into_iter()
        .map(|row| {
            let gender: Gender =
                Gender::from_str(&row.category_gender).map_err(translate_domain_error)?;
            let contest_type: ContestType =
                ContestType::from_str(&row.category_type).map_err(translate_domain_error)?;

            Ok(DeviceVoteInfo {
                category_id: row.category_id,
                category_gender: row.category_gender,
                category_type: row.category_type,
                category_label: contest_type.display_label(gender).to_string(),
                candidate_id: row.candidate_id,
                candidate_name: row.candidate_name,
                candidate_gender: row.candidate_gender,
                candidate_waist_number: row.candidate_waist_number,
                candidate_image_url: row.candidate_image_url,
                voted_at: row.voted_at,
            })
        })
        .collect::<Result<Vec<_>, ApiError>>()?;

    Ok(GetDeviceVotesResponse {
        university_id,
        device_id: device.as_str().to_string(),
        votes,
    })
}

// ========================================================================
// Result Handlers
// ========================================================================

/// Returns the leading candidate of each requested category.
///
/// Categories with no votes produce no entry. Ties resolve to the lowest
/// candidate ID.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `category_ids` - The categories to report leaders for
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_top_results(
    persistence: &mut SqlitePersistence,
    category_ids: &[i64],
) -> Result<GetTopResultsResponse, ApiError> {
    let rows: Vec<TopResultData> = persistence
        .top_results(category_ids)
        .map_err(translate_persistence_error)?;

    let results: Vec<TopResultInfo> = rows
        .into_iter()
        .map(|row| TopResultInfo {
            category_id: row.category_id,
            candidate_id: row.candidate_id,
            votes: row.votes,
        })
        .collect();

    Ok(GetTopResultsResponse { results })
}

// ========================================================================
// Authentication Handlers
// ========================================================================

/// Verifies an admin password without creating a session.
///
/// A wrong password or an unknown university both verify as `false`; this
/// operation never reveals which universities exist.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The verification request
///
/// # Errors
///
/// Returns an error if the lookup or the hash comparison fails.
pub fn verify_password(
    persistence: &mut SqlitePersistence,
    request: &VerifyPasswordRequest,
) -> Result<VerifyPasswordResponse, ApiError> {
    let valid: bool =
        AdminAuthService::verify_password(persistence, request.university_id, &request.password)?;

    Ok(VerifyPasswordResponse { valid })
}

/// Authenticates a university admin and creates a session.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - University id plus the plaintext admin password
///
/// # Returns
///
/// The bearer token for subsequent admin calls, with the university it
/// is scoped to.
///
/// # Errors
///
/// Returns an error if:
/// - The university does not exist or the password is wrong
/// - Database operations fail
pub fn login(
    persistence: &mut SqlitePersistence,
    request: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let (session_token, session): (String, AdminSession) =
        AdminAuthService::login(persistence, request.university_id, &request.password)?;

    Ok(LoginResponse {
        session_token,
        university_id: session.university_id,
        message: String::from("Login successful"),
    })
}

/// Surrenders an admin session.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `session_token` - The token to retire
///
/// # Errors
///
/// Returns an error if the session row cannot be deleted.
pub fn logout(
    persistence: &mut SqlitePersistence,
    session_token: &str,
) -> Result<LogoutResponse, ApiError> {
    AdminAuthService::logout(persistence, session_token)?;

    Ok(LogoutResponse {
        message: String::from("Logged out"),
    })
}

// ========================================================================
// Admin Catalog Handlers
// ========================================================================

/// Lists all of a university's categories, active or not.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `university_id` - The university to list categories for
/// * `session` - The validated admin session
///
/// # Errors
///
/// Returns an error if the session is scoped to another university or the
/// query fails.
pub fn admin_list_categories(
    persistence: &mut SqlitePersistence,
    university_id: i64,
    session: &AdminSession,
) -> Result<ListCategoriesResponse, ApiError> {
    session.authorize_university(university_id, "list_categories")?;

    let categories: Vec<CategoryData> = persistence
        .list_all_categories(university_id)
        .map_err(translate_persistence_error)?;

    Ok(ListCategoriesResponse {
        university_id,
        categories: categories.into_iter().map(category_to_info).collect(),
    })
}

/// Creates or updates a category.
///
/// A request without a `category_id` creates; one with a `category_id`
/// updates. Updating a category that belongs to another university is
/// indistinguishable from updating a missing one.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The upsert request
/// * `session` - The validated admin session
///
/// # Returns
///
/// * `Ok(UpsertCategoryResponse)` with the created or updated category's ID
/// * `Err(ApiError)` if unauthorized or the write fails
///
/// # Errors
///
/// Returns an error if:
/// - The session is scoped to another university
/// - The gender or contest type is invalid
/// - The category to update does not exist in the university
/// - Database operations fail
pub fn admin_upsert_category(
    persistence: &mut SqlitePersistence,
    request: &UpsertCategoryRequest,
    session: &AdminSession,
) -> Result<UpsertCategoryResponse, ApiError> {
    session.authorize_university(request.university_id, "upsert_category")?;

    let gender: Gender = Gender::from_str(&request.gender).map_err(translate_domain_error)?;
    let contest_type: ContestType =
        ContestType::from_str(&request.contest_type).map_err(translate_domain_error)?;

    match request.category_id {
        Some(category_id) => {
            let existing: CategoryData = persistence
                .get_category(category_id)
                .map_err(translate_persistence_error)?
                .ok_or_else(|| ApiError::ResourceNotFound {
                    resource_type: String::from("Category"),
                    message: format!("Category {category_id} does not exist"),
                })?;
            if existing.university_id != request.university_id {
                return Err(ApiError::ResourceNotFound {
                    resource_type: String::from("Category"),
                    message: format!("Category {category_id} does not exist"),
                });
            }

            persistence
                .update_category(
                    category_id,
                    gender.as_str(),
                    contest_type.as_str(),
                    request.is_active,
                )
                .map_err(translate_persistence_error)?;

            Ok(UpsertCategoryResponse {
                category_id,
                message: String::from("Category updated"),
            })
        }
        None => {
            let category_id: i64 = persistence
                .create_category(request.university_id, gender.as_str(), contest_type.as_str())
                .map_err(translate_persistence_error)?;

            // New categories start active; apply a requested inactive flag
            if !request.is_active {
                persistence
                    .update_category(category_id, gender.as_str(), contest_type.as_str(), false)
                    .map_err(translate_persistence_error)?;
            }

            Ok(UpsertCategoryResponse {
                category_id,
                message: String::from("Category created"),
            })
        }
    }
}

/// Deletes a category.
///
/// Categories referenced by votes cannot be deleted; the foreign key
/// restriction surfaces as a referential conflict and the votes are
/// untouched.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The delete request
/// * `session` - The validated admin session
///
/// # Errors
///
/// Returns an error if:
/// - The session is scoped to another university
/// - The category does not exist in the university
/// - Votes reference the category
/// - Database operations fail
pub fn admin_delete_category(
    persistence: &mut SqlitePersistence,
    request: &DeleteCategoryRequest,
    session: &AdminSession,
) -> Result<DeleteCategoryResponse, ApiError> {
    session.authorize_university(request.university_id, "delete_category")?;

    let existing: CategoryData = persistence
        .get_category(request.category_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Category"),
            message: format!("Category {} does not exist", request.category_id),
        })?;
    if existing.university_id != request.university_id {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Category"),
            message: format!("Category {} does not exist", request.category_id),
        });
    }

    persistence
        .delete_category(request.category_id)
        .map_err(translate_persistence_error)?;

    Ok(DeleteCategoryResponse {
        category_id: request.category_id,
        message: String::from("Category deleted"),
    })
}

/// Lists all of a university's candidates, active or not.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `university_id` - The university to list candidates for
/// * `session` - The validated admin session
///
/// # Errors
///
/// Returns an error if the session is scoped to another university or the
/// query fails.
pub fn admin_list_candidates(
    persistence: &mut SqlitePersistence,
    university_id: i64,
    session: &AdminSession,
) -> Result<ListCandidatesResponse, ApiError> {
    session.authorize_university(university_id, "list_candidates")?;

    let candidates: Vec<CandidateData> = persistence
        .list_all_candidates(university_id)
        .map_err(translate_persistence_error)?;

    Ok(ListCandidatesResponse {
        university_id,
        candidates: candidates.into_iter().map(candidate_to_info).collect(),
    })
}

/// Creates or updates a candidate.
///
/// A request without a `candidate_id` creates; one with a `candidate_id`
/// updates. Field shape is validated with the domain rules before any
/// write. A duplicate waist number within the university and gender
/// bucket is a conflict.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The upsert request
/// * `session` - The validated admin session
///
/// # Returns
///
/// * `Ok(UpsertCandidateResponse)` with the created or updated candidate's ID
/// * `Err(ApiError)` if unauthorized, invalid, or the write fails
///
/// # Errors
///
/// Returns an error if:
/// - The session is scoped to another university
/// - The gender, name, waist number, height, or birthday is invalid
/// - The candidate to update does not exist in the university
/// - The waist number is already taken in the gender bucket
/// - Database operations fail
pub fn admin_upsert_candidate(
    persistence: &mut SqlitePersistence,
    request: &UpsertCandidateRequest,
    session: &AdminSession,
) -> Result<UpsertCandidateResponse, ApiError> {
    session.authorize_university(request.university_id, "upsert_candidate")?;

    let gender: Gender = Gender::from_str(&request.gender).map_err(translate_domain_error)?;

    // Validate field shape with the domain rules before touching storage
    let candidate: Candidate = Candidate {
        candidate_id: request.candidate_id,
        university_id: request.university_id,
        gender,
        waist_number: request.waist_number,
        name: request.name.clone(),
        birthday: request.birthday.clone(),
        height_cm: request.height_cm,
        hobby: request.hobby.clone(),
        image_url: request.image_url.clone(),
        is_active: request.is_active,
    };
    validate_candidate_fields(&candidate).map_err(translate_domain_error)?;

    match request.candidate_id {
        Some(candidate_id) => {
            let existing: CandidateData = persistence
                .get_candidate(candidate_id)
                .map_err(translate_persistence_error)?
                .ok_or_else(|| ApiError::ResourceNotFound {
                    resource_type: String::from("Candidate"),
                    message: format!("Candidate {candidate_id} does not exist"),
                })?;
            if existing.university_id != request.university_id {
                return Err(ApiError::ResourceNotFound {
                    resource_type: String::from("Candidate"),
                    message: format!("Candidate {candidate_id} does not exist"),
                });
            }

            persistence
                .update_candidate(
                    candidate_id,
                    gender.as_str(),
                    request.waist_number,
                    &request.name,
                    request.birthday.as_deref(),
                    request.height_cm,
                    request.hobby.as_deref(),
                    request.image_url.as_deref(),
                    request.is_active,
                )
                .map_err(|e| duplicate_waist_conflict(e, gender, request.waist_number))?;

            Ok(UpsertCandidateResponse {
                candidate_id,
                message: String::from("Candidate updated"),
            })
        }
        None => {
            let candidate_id: i64 = persistence
                .create_candidate(
                    request.university_id,
                    gender.as_str(),
                    request.waist_number,
                    &request.name,
                    request.birthday.as_deref(),
                    request.height_cm,
                    request.hobby.as_deref(),
                    request.image_url.as_deref(),
                )
                .map_err(|e| duplicate_waist_conflict(e, gender, request.waist_number))?;

            // New candidates start active; apply a requested inactive flag
            if !request.is_active {
                persistence
                    .update_candidate(
                        candidate_id,
                        gender.as_str(),
                        request.waist_number,
                        &request.name,
                        request.birthday.as_deref(),
                        request.height_cm,
                        request.hobby.as_deref(),
                        request.image_url.as_deref(),
                        false,
                    )
                    .map_err(translate_persistence_error)?;
            }

            Ok(UpsertCandidateResponse {
                candidate_id,
                message: String::from("Candidate created"),
            })
        }
    }
}

/// Deletes a candidate.
///
/// Candidates referenced by votes cannot be deleted; the foreign key
/// restriction surfaces as a referential conflict and the votes are
/// untouched. Deactivate such candidates instead.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The delete request
/// * `session` - The validated admin session
///
/// # Errors
///
/// Returns an error if:
/// - The session is scoped to another university
/// - The candidate does not exist in the university
/// - Votes reference the candidate
/// - Database operations fail
pub fn admin_delete_candidate(
    persistence: &mut SqlitePersistence,
    request: &DeleteCandidateRequest,
    session: &AdminSession,
) -> Result<DeleteCandidateResponse, ApiError> {
    session.authorize_university(request.university_id, "delete_candidate")?;

    let existing: CandidateData = persistence
        .get_candidate(request.candidate_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Candidate"),
            message: format!("Candidate {} does not exist", request.candidate_id),
        })?;
    if existing.university_id != request.university_id {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Candidate"),
            message: format!("Candidate {} does not exist", request.candidate_id),
        });
    }

    persistence
        .delete_candidate(request.candidate_id)
        .map_err(translate_persistence_error)?;

    Ok(DeleteCandidateResponse {
        candidate_id: request.candidate_id,
        message: String::from("Candidate deleted"),
    })
}

// ========================================================================
// Admin Result Handlers
// ========================================================================

/// Orders aggregated rows for the rankings display.
///
/// Rows are bucketed by their `"<gender>-<contest_type>"` section key.
/// Sections follow the fixed display order with unknown keys appended
/// after, and rows within a section are ranked by votes descending with
/// ties broken toward the lower candidate ID.
fn rank_for_display(mut rows: Vec<FullResultData>) -> Vec<FullResultInfo> {
    let observed: Vec<String> = rows
        .iter()
        .map(|row| format!("{}-{}", row.gender, row.contest_type))
        .collect();
    let section_order: Vec<String> = order_section_keys(&observed);
    let section_rank = |row: &FullResultData| -> usize {
        let key: String = format!("{}-{}", row.gender, row.contest_type);
        section_order
            .iter()
            .position(|section| *section == key)
            .unwrap_or(section_order.len())
    };

    rows.sort_by(|a, b| {
        section_rank(a)
            .cmp(&section_rank(b))
            .then_with(|| compare_ranked(a.votes, a.candidate_id, b.votes, b.candidate_id))
    });

    rows.into_iter()
        .map(|row| FullResultInfo {
            category_id: row.category_id,
            gender: row.gender,
            contest_type: row.contest_type,
            candidate_id: row.candidate_id,
            waist_number: row.waist_number,
            name: row.name,
            votes: row.votes,
        })
        .collect()
}

/// Returns every (category, candidate) vote count for a university.
///
/// Rows arrive in the fixed section display order, ranked within each
/// section by votes descending then candidate ID ascending. Candidates
/// with zero votes are omitted.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `university_id` - The university to aggregate
/// * `session` - The validated admin session
///
/// # Errors
///
/// Returns an error if the session is scoped to another university or the
/// query fails.
pub fn get_full_results(
    persistence: &mut SqlitePersistence,
    university_id: i64,
    session: &AdminSession,
) -> Result<GetFullResultsResponse, ApiError> {
    session.authorize_university(university_id, "view_results")?;

    let rows: Vec<FullResultData> = persistence
        .aggregate_results(university_id)
        .map_err(translate_persistence_error)?;

    Ok(GetFullResultsResponse {
        university_id,
        results: rank_for_display(rows),
    })
}

/// Returns every vote recorded for a university, denormalized for export.
///
/// This is the only read that exposes device identifiers; it is
/// admin-gated for that reason.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `university_id` - The university to export
/// * `session` - The validated admin session
///
/// # Errors
///
/// Returns an error if the session is scoped to another university or the
/// query fails.
pub fn export_raw_votes(
    persistence: &mut SqlitePersistence,
    university_id: i64,
    session: &AdminSession,
) -> Result<ExportVotesResponse, ApiError> {
    session.authorize_university(university_id, "export_votes")?;

    let rows: Vec<VoteExportData> = persistence
        .list_votes_for_export(university_id)
        .map_err(translate_persistence_error)?;

    let votes: Vec<VoteExportInfo> = rows
        .into_iter()
        .map(|row| VoteExportInfo {
            vote_id: row.vote_id,
            device_id: row.device_id,
            category_id: row.category_id,
            category_gender: row.category_gender,
            category_type: row.category_type,
            candidate_id: row.candidate_id,
            candidate_name: row.candidate_name,
            candidate_gender: row.candidate_gender,
            waist_number: row.waist_number,
        })
        .collect();

    Ok(ExportVotesResponse {
        university_id,
        votes,
    })
}

/// Renders the aggregated results of a university as a CSV document.
///
/// Rows follow the same section display order as [`get_full_results`].
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `university_id` - The university to aggregate
/// * `session` - The validated admin session
///
/// # Errors
///
/// Returns an error if the session is scoped to another university, the
/// query fails, or the CSV cannot be rendered.
pub fn export_results_csv(
    persistence: &mut SqlitePersistence,
    university_id: i64,
    session: &AdminSession,
) -> Result<String, ApiError> {
    let response: GetFullResultsResponse = get_full_results(persistence, university_id, session)?;
    results_csv(&response.results)
}

/// Renders every recorded vote of a university as a CSV document.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `university_id` - The university to export
/// * `session` - The validated admin session
///
/// # Errors
///
/// Returns an error if the session is scoped to another university, the
/// query fails, or the CSV cannot be rendered.
pub fn export_votes_csv(
    persistence: &mut SqlitePersistence,
    university_id: i64,
    session: &AdminSession,
) -> Result<String, ApiError> {
    let response: ExportVotesResponse = export_raw_votes(persistence, university_id, session)?;
    votes_csv(&response.votes)
}
