//! Statement Importer Library
//!
//! A Rust library for converting delimited bank-statement exports into
//! normalized transaction records, driven entirely by declarative
//! per-institution templates.
//!
//! This library provides tools for:
//! - Reading delimited text with configurable delimiter, row skipping and header search
//! - Resolving and deduplicating header names, or synthesizing positional names
//! - Locale-aware amount normalization to integer minor units
//! - Multi-format date parsing against a fixed calendar context
//! - Deterministic transaction fingerprints and intra-day timestamps for idempotent re-import
//! - Template persistence and time-series sink adapters

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod field_normalizers;
        pub mod importer;
        pub mod statement_reader;
        pub mod template_store;
        pub mod transaction_sink;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{
    ColumnMap, DecimalConvention, DelimitedConfig, Direction, ImportContext, Template,
    Transaction,
};
pub use app::services::importer::{ImportReport, Importer};
pub use config::Config;

/// Result type alias for the statement importer
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for statement import operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Underlying delimited-text tokenization failed
    #[error("CSV parsing error at line {line}: {message}")]
    CsvParsing {
        line: u64,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Configured delimiter is not a single byte
    #[error("invalid delimiter: {delimiter:?}")]
    InvalidDelimiter { delimiter: String },

    /// Template declares a type the importer cannot read
    #[error("unsupported template type: {template_type}")]
    UnsupportedTemplateType { template_type: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Header search exhausted the input
    #[error("header not found (required: {required:?})")]
    HeaderNotFound { required: Vec<String> },

    /// Input ended before the configured leading rows were skipped
    #[error("input ended after {skipped} of {requested} skipped rows")]
    UnexpectedEndOfInput { skipped: usize, requested: usize },

    /// Amount text is empty or malformed
    #[error("invalid amount {input:?}: {reason}")]
    InvalidAmount { input: String, reason: String },

    /// Date text matched none of the candidate formats
    #[error("unsupported date format {input:?} (tried {formats:?})")]
    InvalidDate { input: String, formats: Vec<String> },

    /// A required conversion failed for one row
    #[error("line {line}: {field} parse: {source}")]
    RowConversion {
        line: u64,
        field: &'static str,
        #[source]
        source: Box<Error>,
    },

    /// Template lookup by id failed
    #[error("template not found: {id}")]
    TemplateNotFound { id: String },

    /// Template persistence failed
    #[error("Template store error: {message}")]
    TemplateStore { message: String },

    /// JSON (de)serialization failed
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Writing to the time-series sink failed
    #[error("Sink write failed: {message}")]
    Sink { message: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with the physical line it occurred on
    pub fn csv_parsing(line: u64, message: impl Into<String>, source: Option<csv::Error>) -> Self {
        Self::CsvParsing {
            line,
            message: message.into(),
            source,
        }
    }

    /// Create an invalid delimiter error
    pub fn invalid_delimiter(delimiter: impl Into<String>) -> Self {
        Self::InvalidDelimiter {
            delimiter: delimiter.into(),
        }
    }

    /// Create an unsupported template type error
    pub fn unsupported_template_type(template_type: impl Into<String>) -> Self {
        Self::UnsupportedTemplateType {
            template_type: template_type.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a header not found error naming the required columns
    pub fn header_not_found(required: Vec<String>) -> Self {
        Self::HeaderNotFound { required }
    }

    /// Create an unexpected end of input error
    pub fn unexpected_end_of_input(skipped: usize, requested: usize) -> Self {
        Self::UnexpectedEndOfInput { skipped, requested }
    }

    /// Create an invalid amount error
    pub fn invalid_amount(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAmount {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid date error
    pub fn invalid_date(input: impl Into<String>, formats: &[String]) -> Self {
        Self::InvalidDate {
            input: input.into(),
            formats: formats.to_vec(),
        }
    }

    /// Wrap a conversion failure with the row line and field it belongs to
    pub fn row_conversion(line: u64, field: &'static str, source: Error) -> Self {
        Self::RowConversion {
            line,
            field,
            source: Box::new(source),
        }
    }

    /// Create a template not found error
    pub fn template_not_found(id: impl Into<String>) -> Self {
        Self::TemplateNotFound { id: id.into() }
    }

    /// Create a template store error
    pub fn template_store(message: impl Into<String>) -> Self {
        Self::TemplateStore {
            message: message.into(),
        }
    }

    /// Create a serialization error with context
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Create a sink error
    pub fn sink(message: impl Into<String>) -> Self {
        Self::Sink {
            message: message.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// True for errors raised while converting a single row
    pub fn is_row_error(&self) -> bool {
        matches!(self, Self::RowConversion { .. })
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|p| p.line()).unwrap_or(0);
        Self::CsvParsing {
            line,
            message: error.to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON processing failed".to_string(),
            source: error,
        }
    }
}
