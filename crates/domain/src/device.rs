// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// Maximum accepted length of a device identifier in bytes.
///
/// Identifiers are client-supplied opaque strings; the bound keeps
/// hostile inputs from ballooning storage.
pub const MAX_DEVICE_ID_LEN: usize = 128;

const BASE36_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const RANDOM_PART_LEN: usize = 8;

/// An opaque per-device voting identity.
///
/// Device identities are minted client-side and stored verbatim; the
/// platform treats them as opaque strings and never attempts to interpret
/// their structure. [`DeviceId::generate`] produces the canonical format
/// (millisecond timestamp plus two random base36 segments) for clients
/// that have no identity yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceId(String);

impl FromStr for DeviceId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(DomainError::InvalidDeviceId(s.to_string()));
        }

        if s.len() > MAX_DEVICE_ID_LEN {
            let prefix: String = s.chars().take(32).collect();
            return Err(DomainError::InvalidDeviceId(format!(
                "{prefix}... ({} bytes)",
                s.len()
            )));
        }

        Ok(Self(s.to_string()))
    }
}

impl std::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl DeviceId {
    /// Mints a fresh device identity.
    ///
    /// The format is `<unix-millis>-<part>-<part>` where each part is
    /// eight random base36 characters. Collisions would require two
    /// devices to mint in the same millisecond with identical random
    /// parts, which is negligible for this platform's scale.
    #[must_use]
    pub fn generate() -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();

        Self(format!(
            "{timestamp}-{}-{}",
            Self::random_part(),
            Self::random_part()
        ))
    }

    /// Returns the identity as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn random_part() -> String {
        let mut value = rand::random::<u64>();
        let mut part = String::with_capacity(RANDOM_PART_LEN);

        for _ in 0..RANDOM_PART_LEN {
            let digit = usize::try_from(value % 36).unwrap_or(0);
            part.push(char::from(BASE36_ALPHABET[digit]));
            value /= 36;
        }

        part
    }
}
