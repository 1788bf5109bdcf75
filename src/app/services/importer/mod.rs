//! Statement import pipeline
//!
//! This module turns one statement document into normalized transactions
//! using a template and caller-supplied context. The pipeline is sequential
//! and synchronous; the only long-lived state is the immutable calendar
//! context held by the [`Importer`].
//!
//! # Architecture
//!
//! - [`importer`] - Entry points (fail-fast and collecting) and orchestration
//! - [`row_mapper`] - Resolved row to typed field values
//! - [`assembler`] - Typed field values plus context to a [`Transaction`]
//! - [`identity`] - Content fingerprints and deterministic intra-day offsets
//! - [`report`] - Per-row error collection results
//!
//! # Example Usage
//!
//! ```rust
//! use statement_importer::{ImportContext, Importer, Template};
//! use statement_importer::app::services::field_normalizers::CalendarContext;
//!
//! # fn example(template: &Template) -> statement_importer::Result<()> {
//! let importer = Importer::new("+01:00".parse::<CalendarContext>()?);
//! let context = ImportContext::new("default", "giro-1", Some("ing".to_string()))?;
//!
//! let document = std::fs::File::open("statement.csv")?;
//! let transactions = importer.import(document, template, &context)?;
//! println!("Imported {} transactions", transactions.len());
//! # Ok(())
//! # }
//! ```
//!
//! [`Transaction`]: crate::app::models::Transaction

pub mod assembler;
pub mod identity;
#[allow(clippy::module_inception)]
pub mod importer;
pub mod report;
pub mod row_mapper;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use assembler::assemble_transaction;
pub use identity::{Fingerprint, FingerprintInput, day_offset_from_uid, recorded_at};
pub use importer::Importer;
pub use report::{ImportReport, RowError};
pub use row_mapper::{MappedRow, RowMapper};
