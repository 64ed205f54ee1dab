// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::Gender;
use serde::{Deserialize, Serialize};

/// Number of voting tickets granted per device per gender bucket within a
/// university.
pub const TICKETS_PER_GENDER: u32 = 4;

/// Remaining ticket count for one device in one gender bucket.
///
/// Tickets are never stored; they are derived from the device's vote rows
/// at read time. One distinct voted category consumes one ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketUsage {
    /// The gender bucket this count applies to.
    pub gender: Gender,
    /// Tickets still available, always within `0..=TICKETS_PER_GENDER`.
    pub remaining_tickets: u32,
}

impl TicketUsage {
    /// Derives the remaining tickets from a distinct voted-category count.
    ///
    /// The result saturates at zero so a vote count above the grant (for
    /// example after the grant constant is lowered between seasons) never
    /// underflows into a huge remainder.
    #[must_use]
    pub const fn from_voted_categories(gender: Gender, voted_categories: u32) -> Self {
        Self {
            gender,
            remaining_tickets: TICKETS_PER_GENDER.saturating_sub(voted_categories),
        }
    }

    /// Returns whether the device can still vote in this gender bucket.
    #[must_use]
    pub const fn has_tickets(&self) -> bool {
        self.remaining_tickets > 0
    }
}

/// Derives ticket usage for both gender buckets at once.
///
/// # Arguments
///
/// * `male_voted` - Distinct categories voted in the male bucket
/// * `female_voted` - Distinct categories voted in the female bucket
#[must_use]
pub const fn derive_usage(male_voted: u32, female_voted: u32) -> [TicketUsage; 2] {
    [
        TicketUsage::from_voted_categories(Gender::Male, male_voted),
        TicketUsage::from_voted_categories(Gender::Female, female_voted),
    ]
}
