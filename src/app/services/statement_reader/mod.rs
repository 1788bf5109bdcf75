//! Delimited-text reader for bank statement exports
//!
//! This module turns raw statement text into resolved rows: ordered
//! column-name to cell associations ready for field mapping. All behaviour is
//! driven by the template's delimited-text configuration.
//!
//! ## Architecture
//!
//! The reader is organized into logical components:
//! - [`reader`] - Tokenization, delimiter resolution, row skipping and row emission
//! - [`header`] - Header location (first row or search), cell cleaning and name deduplication
//! - [`resolved_row`] - The per-row ordered name/value association
//!
//! ## Usage
//!
//! ```rust
//! use statement_importer::app::models::DelimitedConfig;
//! use statement_importer::app::services::statement_reader::StatementReader;
//!
//! # fn example(config: &DelimitedConfig) -> statement_importer::Result<()> {
//! let reader = StatementReader::from_config(config)?;
//! let rows = reader.read_str("Datum;Betrag\n01.02.2024;12,50\n")?;
//!
//! println!("Read {} rows", rows.len());
//! # Ok(())
//! # }
//! ```

pub mod header;
pub mod reader;
pub mod resolved_row;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use header::HeaderStrategy;
pub use reader::{StatementReader, resolve_delimiter};
pub use resolved_row::ResolvedRow;
