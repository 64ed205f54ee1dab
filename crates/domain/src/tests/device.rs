// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DeviceId, DomainError, MAX_DEVICE_ID_LEN};
use std::str::FromStr;

#[test]
fn test_generate_produces_three_dash_separated_segments() {
    let device_id: DeviceId = DeviceId::generate();
    let segments: Vec<&str> = device_id.as_str().split('-').collect();

    assert_eq!(segments.len(), 3);
    assert!(segments[0].chars().all(|c| c.is_ascii_digit()));
    assert_eq!(segments[1].len(), 8);
    assert_eq!(segments[2].len(), 8);
}

#[test]
fn test_generate_random_parts_are_base36() {
    let device_id: DeviceId = DeviceId::generate();
    let segments: Vec<&str> = device_id.as_str().split('-').collect();

    for segment in &segments[1..] {
        assert!(
            segment
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
        );
    }
}

#[test]
fn test_generate_produces_distinct_identities() {
    let first: DeviceId = DeviceId::generate();
    let second: DeviceId = DeviceId::generate();

    assert_ne!(first, second);
}

#[test]
fn test_parse_accepts_generated_identity() {
    let generated: DeviceId = DeviceId::generate();
    let parsed: DeviceId = DeviceId::from_str(generated.as_str()).unwrap();

    assert_eq!(parsed, generated);
}

#[test]
fn test_parse_accepts_arbitrary_opaque_strings() {
    // Identities are opaque; clients that mint their own formats are fine.
    let parsed: DeviceId = DeviceId::from_str("my-custom-device-identity").unwrap();
    assert_eq!(parsed.as_str(), "my-custom-device-identity");
}

#[test]
fn test_parse_rejects_empty_string() {
    let result: Result<DeviceId, DomainError> = DeviceId::from_str("");
    assert!(matches!(result, Err(DomainError::InvalidDeviceId(_))));
}

#[test]
fn test_parse_rejects_oversized_identity() {
    let oversized: String = "x".repeat(MAX_DEVICE_ID_LEN + 1);
    let result: Result<DeviceId, DomainError> = DeviceId::from_str(&oversized);
    assert!(matches!(result, Err(DomainError::InvalidDeviceId(_))));
}

#[test]
fn test_parse_accepts_identity_at_length_bound() {
    let at_bound: String = "x".repeat(MAX_DEVICE_ID_LEN);
    let result: Result<DeviceId, DomainError> = DeviceId::from_str(&at_bound);
    assert!(result.is_ok());
}
