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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod device;
mod error;
mod ranking;
mod tickets;
mod types;
mod validation;
mod window;

#[cfg(test)]
mod tests;

pub use device::{DeviceId, MAX_DEVICE_ID_LEN};
pub use ranking::{SECTION_DISPLAY_ORDER, compare_ranked, order_section_keys, section_key};
pub use tickets::{TICKETS_PER_GENDER, TicketUsage, derive_usage};
pub use window::{VotingWindow, ensure_voting_open};

// Public surface
pub use error::DomainError;
pub use types::{Candidate, Category, ContestType, Direction, Gender, University};
pub use validation::{
    MAX_HEIGHT_CM, MIN_HEIGHT_CM, validate_candidate_fields, validate_university_fields,
};
