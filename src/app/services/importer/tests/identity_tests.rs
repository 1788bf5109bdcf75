//! Tests for fingerprints and intra-day offsets

use super::*;
use crate::app::services::importer::{
    Fingerprint, FingerprintInput, day_offset_from_uid, recorded_at,
};
use chrono::{NaiveDate, TimeDelta};

fn acme_input() -> FingerprintInput<'static> {
    FingerprintInput {
        account_id: "giro-1",
        booking_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        amount_cents: -123456,
        currency: "EUR",
        payee: "ACME GmbH",
        memo: "Rechnung 42",
        reference: "",
    }
}

#[test]
fn test_canonical_text() {
    assert_eq!(
        acme_input().canonical(),
        "giro-1|2024-02-01|-123456|EUR|ACME GmbH|Rechnung 42|"
    );
}

#[test]
fn test_fingerprint_is_pinned_sha256_hex() {
    let fingerprint = Fingerprint::of(&acme_input());

    assert_eq!(
        fingerprint.hex(),
        "4b51f741e50f5fcc44f939fcb3595253d25bc2a8043b3e04dd59db6251574d60"
    );
    assert_eq!(fingerprint.day_offset(), TimeDelta::nanoseconds(2_088_346_083_276));
}

#[test]
fn test_every_identifying_field_changes_the_uid() {
    let base = Fingerprint::of(&acme_input());
    let variants = [
        FingerprintInput { account_id: "giro-2", ..acme_input() },
        FingerprintInput { amount_cents: -123455, ..acme_input() },
        FingerprintInput { currency: "USD", ..acme_input() },
        FingerprintInput { payee: "ACME AG", ..acme_input() },
        FingerprintInput { memo: "Rechnung 43", ..acme_input() },
        FingerprintInput { reference: "R-42", ..acme_input() },
        FingerprintInput {
            booking_date: NaiveDate::from_ymd_opt(2024, 2, 2).unwrap(),
            ..acme_input()
        },
    ];

    for variant in &variants {
        assert_ne!(Fingerprint::of(variant), base, "{:?}", variant);
    }
}

#[test]
fn test_offset_rederived_from_uid() {
    let fingerprint = Fingerprint::of(&acme_input());
    let offset = day_offset_from_uid(&fingerprint.hex()).unwrap();

    assert_eq!(offset, fingerprint.day_offset());
    assert!(offset >= TimeDelta::zero());
    assert!(offset < TimeDelta::days(1));
}

#[test]
fn test_offset_from_malformed_uid() {
    assert!(day_offset_from_uid("4b51f741").is_err());
    assert!(day_offset_from_uid("zzzzzzzzzzzzzzzz").is_err());
    assert!(day_offset_from_uid("").is_err());
}

#[test]
fn test_recorded_at_stays_on_booking_day() {
    let midnight = cet_importer()
        .calendar()
        .midnight(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap())
        .unwrap();
    let fingerprint = Fingerprint::of(&acme_input());

    let stamped = recorded_at(midnight, fingerprint.day_offset()).unwrap();

    assert_eq!(stamped.to_rfc3339(), "2024-02-01T00:34:48.346083276+01:00");
    assert_eq!(stamped.date_naive(), midnight.date_naive());
}
