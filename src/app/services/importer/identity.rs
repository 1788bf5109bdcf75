//! Transaction identity derivation
//!
//! A transaction's uid is the lowercase hex SHA-256 of its identifying
//! fields. The first 8 digest bytes also place the transaction at a
//! deterministic instant within its booking day, so same-day points written
//! to a time-series store do not overwrite each other while re-imports still
//! land on exactly the same instant.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta};
use sha2::{Digest, Sha256};

use crate::constants::{
    FINGERPRINT_DATE_FORMAT, FINGERPRINT_SEPARATOR, NANOS_PER_DAY, OFFSET_HEX_CHARS,
};
use crate::{Error, Result};

/// Fields that identify a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FingerprintInput<'a> {
    pub account_id: &'a str,
    pub booking_date: NaiveDate,
    pub amount_cents: i64,
    pub currency: &'a str,
    pub payee: &'a str,
    pub memo: &'a str,
    pub reference: &'a str,
}

impl FingerprintInput<'_> {
    /// Separator-joined text that is hashed
    pub fn canonical(&self) -> String {
        let booking_date = self.booking_date.format(FINGERPRINT_DATE_FORMAT).to_string();
        let amount = self.amount_cents.to_string();

        [
            self.account_id,
            booking_date.as_str(),
            amount.as_str(),
            self.currency,
            self.payee,
            self.memo,
            self.reference,
        ]
        .join(FINGERPRINT_SEPARATOR)
    }
}

/// SHA-256 content fingerprint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    digest: [u8; 32],
}

impl Fingerprint {
    /// Fingerprint the identifying fields
    pub fn of(input: &FingerprintInput<'_>) -> Self {
        let digest: [u8; 32] = Sha256::digest(input.canonical().as_bytes()).into();
        Self { digest }
    }

    /// Lowercase hex encoding (64 characters)
    pub fn hex(&self) -> String {
        hex::encode(self.digest)
    }

    /// Offset from midnight derived from the leading digest bytes
    pub fn day_offset(&self) -> TimeDelta {
        let mut head = [0u8; 8];
        head.copy_from_slice(&self.digest[..8]);
        offset_from_head(head)
    }
}

/// Re-derive the intra-day offset from a stored uid
pub fn day_offset_from_uid(uid: &str) -> Result<TimeDelta> {
    let prefix = uid
        .get(..OFFSET_HEX_CHARS)
        .ok_or_else(|| Error::configuration(format!("uid too short: {:?}", uid)))?;

    let bytes = hex::decode(prefix)
        .map_err(|e| Error::configuration(format!("uid is not hex: {:?} ({})", uid, e)))?;

    let mut head = [0u8; 8];
    head.copy_from_slice(&bytes);
    Ok(offset_from_head(head))
}

fn offset_from_head(head: [u8; 8]) -> TimeDelta {
    let nanos = u64::from_be_bytes(head) % NANOS_PER_DAY;
    // Below one day in nanoseconds, so the cast cannot truncate
    TimeDelta::nanoseconds(nanos as i64)
}

/// Midnight of the booking day shifted by the fingerprint offset
pub fn recorded_at(
    midnight: DateTime<FixedOffset>,
    offset: TimeDelta,
) -> Result<DateTime<FixedOffset>> {
    midnight.checked_add_signed(offset).ok_or_else(|| {
        Error::configuration(format!("timestamp out of range: {} + {}", midnight, offset))
    })
}
