//! Test utilities for transaction sink testing

use chrono::{DateTime, NaiveDate};

use crate::app::models::{Direction, Transaction};
use crate::app::services::transaction_sink::{SinkPoint, TransactionSink};
use crate::{Error, Result};

// Test modules
mod line_protocol_tests;

/// Transaction as produced by the importer for the ACME sample row
pub fn acme_transaction() -> Transaction {
    Transaction {
        tenant_id: "default".to_string(),
        account_id: "giro-1".to_string(),
        bank_id: "ing".to_string(),
        booking_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        value_date: NaiveDate::from_ymd_opt(2024, 2, 2),
        amount_cents: -123456,
        currency: "EUR".to_string(),
        direction: Direction::Out,
        payee: "ACME GmbH".to_string(),
        memo: "Rechnung 42".to_string(),
        reference: String::new(),
        iban: String::new(),
        category_id: "uncategorized".to_string(),
        tx_uid: "4b51f741e50f5fcc44f939fcb3595253d25bc2a8043b3e04dd59db6251574d60".to_string(),
        recorded_at: DateTime::parse_from_rfc3339("2024-02-01T00:34:48.346083276+01:00").unwrap(),
    }
}

/// Sink that keeps every point in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub points: Vec<SinkPoint>,
    pub flushed: bool,
}

impl TransactionSink for RecordingSink {
    fn write_point(&mut self, point: &SinkPoint) -> Result<()> {
        self.points.push(point.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.flushed = true;
        Ok(())
    }
}

/// Sink that accepts a fixed number of points and then fails
#[derive(Debug)]
pub struct FailingSink {
    pub accept: usize,
    pub attempts: usize,
}

impl TransactionSink for FailingSink {
    fn write_point(&mut self, _point: &SinkPoint) -> Result<()> {
        self.attempts += 1;
        if self.attempts > self.accept {
            return Err(Error::sink("connection refused"));
        }
        Ok(())
    }
}
