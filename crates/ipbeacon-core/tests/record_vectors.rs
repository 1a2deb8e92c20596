//! Stored record vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use ipbeacon_core::{report::render_report, BeaconError, IpRecord};

fn load(name: &str) -> Vec<u8> {
    fs::read(format!("tests/vectors/{name}")).unwrap()
}

#[test]
fn parse_worker_written_record() {
    let rec = IpRecord::decode(&load("record_worker.json")).unwrap();
    assert_eq!(rec.ip, "203.0.113.9");
    assert_eq!(
        render_report(&rec),
        "IP: 203.0.113.9\nUpdated: January 1, 2024 17:30:00"
    );
}

#[test]
fn parse_record_without_fraction() {
    let rec = IpRecord::decode(&load("record_seconds_only.json")).unwrap();
    assert_eq!(rec.ip, "2001:db8::1");
    assert_eq!(
        render_report(&rec),
        "IP: 2001:db8::1\nUpdated: March 11, 2024 05:29:59"
    );
}

#[test]
fn extra_fields_are_ignored() {
    let rec = IpRecord::decode(&load("record_extra_fields.json")).unwrap();
    assert_eq!(rec.ip, "198.51.100.7");
    assert!(render_report(&rec).ends_with("August 15, 2024 12:00:00"));
}

#[test]
fn missing_ts_is_corrupt() {
    let err = IpRecord::decode(&load("record_missing_ts.json")).expect_err("must fail");
    assert!(matches!(err, BeaconError::Corrupt(_)));
    assert_eq!(err.client_code().as_str(), "INTERNAL");
}
