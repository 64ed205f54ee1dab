// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::University;
use time::OffsetDateTime;
use time::format_description::well_known::Iso8601;

/// A university's voting window.
///
/// Both bounds are optional; a missing bound means unbounded on that side.
/// Bounds are stored as ISO 8601 strings and parsed on evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VotingWindow {
    start: Option<OffsetDateTime>,
    end: Option<OffsetDateTime>,
}

impl VotingWindow {
    /// Parses a window from optional ISO 8601 bound strings.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidWindowBound` if either bound is present
    /// but not a valid ISO 8601 timestamp.
    pub fn from_bounds(start: Option<&str>, end: Option<&str>) -> Result<Self, DomainError> {
        let start = start
            .map(|value| {
                OffsetDateTime::parse(value, &Iso8601::DEFAULT).map_err(|_| {
                    DomainError::InvalidWindowBound {
                        timestamp: value.to_string(),
                    }
                })
            })
            .transpose()?;

        let end = end
            .map(|value| {
                OffsetDateTime::parse(value, &Iso8601::DEFAULT).map_err(|_| {
                    DomainError::InvalidWindowBound {
                        timestamp: value.to_string(),
                    }
                })
            })
            .transpose()?;

        Ok(Self { start, end })
    }

    /// Returns whether the window is open at `now`.
    ///
    /// A missing bound never closes the window on its side; both bounds
    /// are inclusive.
    #[must_use]
    pub fn is_open(&self, now: OffsetDateTime) -> bool {
        self.start.is_none_or(|start| now >= start) && self.end.is_none_or(|end| now <= end)
    }

    /// Returns whether `now` is before the window opens.
    #[must_use]
    pub fn is_before_start(&self, now: OffsetDateTime) -> bool {
        self.start.is_some_and(|start| now < start)
    }
}

/// Checks that a university is accepting votes at `now`.
///
/// Votes require an active university and a current time inside its voting
/// window. The returned error carries a human-facing reason suitable for
/// direct display.
///
/// # Errors
///
/// Returns `DomainError::VotingClosed` when the university is inactive or
/// the window is closed, and `DomainError::InvalidWindowBound` if a stored
/// bound fails to parse.
pub fn ensure_voting_open(university: &University, now: OffsetDateTime) -> Result<(), DomainError> {
    if !university.is_active() {
        return Err(DomainError::VotingClosed {
            reason: "this university is not currently accepting votes".to_string(),
        });
    }

    let window = VotingWindow::from_bounds(university.voting_start_at(), university.voting_end_at())?;

    if window.is_open(now) {
        return Ok(());
    }

    let reason = if window.is_before_start(now) {
        "voting has not started yet".to_string()
    } else {
        "voting has ended".to_string()
    };

    Err(DomainError::VotingClosed { reason })
}
