// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV rendering for the admin export downloads.
//!
//! Documents are rendered in memory and returned as strings; the server
//! layer attaches the download headers.

use csv::Writer;

use crate::error::ApiError;
use crate::request_response::{FullResultInfo, VoteExportInfo};

/// Column headers of the aggregated results document.
const RESULTS_HEADERS: [&str; 7] = [
    "Category Gender",
    "Category Type",
    "Waist Number",
    "Candidate Name",
    "Candidate ID",
    "Category ID",
    "Votes",
];

/// Column headers of the raw votes document.
const VOTES_HEADERS: [&str; 9] = [
    "Vote ID",
    "Device ID",
    "Category ID",
    "Category Gender",
    "Category Type",
    "Candidate ID",
    "Candidate Name",
    "Candidate Gender",
    "Waist Number",
];

/// Wraps a CSV serialization failure.
fn csv_error(err: &csv::Error) -> ApiError {
    ApiError::Internal {
        message: format!("Failed to render CSV: {err}"),
    }
}

/// Flushes the writer and returns the rendered document.
fn into_document(writer: Writer<Vec<u8>>) -> Result<String, ApiError> {
    let buffer: Vec<u8> = writer.into_inner().map_err(|e| ApiError::Internal {
        message: format!("Failed to flush CSV: {e}"),
    })?;
    String::from_utf8(buffer).map_err(|e| ApiError::Internal {
        message: format!("CSV output was not valid UTF-8: {e}"),
    })
}

/// Renders aggregated result rows as a CSV document.
///
/// Rows are written in the order given; callers pass display-ordered
/// rows so the document matches the rankings view.
///
/// # Errors
///
/// Returns `ApiError::Internal` if the document cannot be rendered.
pub fn results_csv(rows: &[FullResultInfo]) -> Result<String, ApiError> {
    let mut writer: Writer<Vec<u8>> = Writer::from_writer(Vec::new());
    writer
        .write_record(RESULTS_HEADERS)
        .map_err(|e| csv_error(&e))?;

    for row in rows {
        writer
            .write_record([
                row.gender.clone(),
                row.contest_type.clone(),
                row.waist_number.to_string(),
                row.name.clone(),
                row.candidate_id.to_string(),
                row.category_id.to_string(),
                row.votes.to_string(),
            ])
            .map_err(|e| csv_error(&e))?;
    }

    into_document(writer)
}

/// Renders raw vote rows as a CSV document.
///
/// # Errors
///
/// Returns `ApiError::Internal` if the document cannot be rendered.
pub fn votes_csv(rows: &[VoteExportInfo]) -> Result<String, ApiError> {
    let mut writer: Writer<Vec<u8>> = Writer::from_writer(Vec::new());
    writer
        .write_record(VOTES_HEADERS)
        .map_err(|e| csv_error(&e))?;

    for row in rows {
        writer
            .write_record([
                row.vote_id.to_string(),
                row.device_id.clone(),
                row.category_id.to_string(),
                row.category_gender.clone(),
                row.category_type.clone(),
                row.candidate_id.to_string(),
                row.candidate_name.clone(),
                row.candidate_gender.clone(),
                row.waist_number.to_string(),
            ])
            .map_err(|e| csv_error(&e))?;
    }

    into_document(writer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_row(category_id: i64, candidate_id: i64, votes: i64) -> FullResultInfo {
        FullResultInfo {
            category_id,
            gender: String::from("male"),
            contest_type: String::from("king"),
            candidate_id,
            waist_number: 7,
            name: String::from("Lee Min-ho"),
            votes,
        }
    }

    fn vote_row(vote_id: i64) -> VoteExportInfo {
        VoteExportInfo {
            vote_id,
            device_id: String::from("1755700000000-a1b2c3d4-e5f6g7h8"),
            category_id: 3,
            category_gender: String::from("female"),
            category_type: String::from("style"),
            candidate_id: 9,
            candidate_name: String::from("Kim Ji-won"),
            candidate_gender: String::from("female"),
            waist_number: 4,
        }
    }

    #[test]
    fn test_results_csv_header_row() {
        let document: String = results_csv(&[]).expect("empty document should render");
        assert_eq!(
            document,
            "Category Gender,Category Type,Waist Number,Candidate Name,Candidate ID,Category ID,Votes\n"
        );
    }

    #[test]
    fn test_results_csv_renders_rows_in_order() {
        let rows: Vec<FullResultInfo> = vec![result_row(2, 5, 12), result_row(2, 6, 3)];

        let document: String = results_csv(&rows).expect("document should render");

        let lines: Vec<&str> = document.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "male,king,7,Lee Min-ho,5,2,12");
        assert_eq!(lines[2], "male,king,7,Lee Min-ho,6,2,3");
    }

    #[test]
    fn test_results_csv_quotes_names_with_commas() {
        let mut row: FullResultInfo = result_row(1, 1, 1);
        row.name = String::from("Park, Joon");

        let document: String = results_csv(&[row]).expect("document should render");

        assert!(document.contains("\"Park, Joon\""));
    }

    #[test]
    fn test_votes_csv_header_row() {
        let document: String = votes_csv(&[]).expect("empty document should render");
        assert_eq!(
            document,
            "Vote ID,Device ID,Category ID,Category Gender,Category Type,Candidate ID,Candidate Name,Candidate Gender,Waist Number\n"
        );
    }

    #[test]
    fn test_votes_csv_renders_device_ids() {
        let document: String = votes_csv(&[vote_row(41)]).expect("document should render");

        let lines: Vec<&str> = document.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "41,1755700000000-a1b2c3d4-e5f6g7h8,3,female,style,9,Kim Ji-won,female,4"
        );
    }
}
