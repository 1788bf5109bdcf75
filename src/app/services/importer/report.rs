//! Results of a collecting import
//!
//! A collecting import converts every row it can and records an indexed
//! error for each row it cannot, instead of aborting at the first failure.

use serde::Serialize;

use crate::app::models::Transaction;

/// Conversion failure for one data row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowError {
    /// 0-based position among the data rows
    pub index: usize,
    /// Physical line the row started on
    pub line: u64,
    pub message: String,
}

/// Transactions and row errors of one collecting import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    /// Converted transactions, in source order
    pub transactions: Vec<Transaction>,
    /// Failed rows, in source order
    pub errors: Vec<RowError>,
    /// Number of data rows read (blank rows excluded)
    pub total_rows: usize,
}

impl ImportReport {
    /// Create an empty report for a document with `total_rows` data rows
    pub fn new(total_rows: usize) -> Self {
        Self {
            transactions: Vec::with_capacity(total_rows),
            errors: Vec::new(),
            total_rows,
        }
    }

    /// Report for an import in which every row converted
    pub fn complete(transactions: Vec<Transaction>) -> Self {
        Self {
            total_rows: transactions.len(),
            transactions,
            errors: Vec::new(),
        }
    }

    /// Record a failed row
    pub fn add_error(&mut self, index: usize, line: u64, message: impl Into<String>) {
        self.errors.push(RowError {
            index,
            line,
            message: message.into(),
        });
    }

    /// Percentage of data rows converted
    pub fn success_rate(&self) -> f64 {
        if self.total_rows == 0 {
            100.0
        } else {
            (self.transactions.len() as f64 / self.total_rows as f64) * 100.0
        }
    }

    /// True when every row converted
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get summary string for logging
    pub fn summary(&self) -> String {
        format!(
            "Import Summary: {} rows -> {} transactions ({:.1}% success) | Errors: {}",
            self.total_rows,
            self.transactions.len(),
            self.success_rate(),
            self.errors.len()
        )
    }
}
