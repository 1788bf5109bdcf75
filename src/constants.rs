//! Application constants for the statement importer
//!
//! This module contains the fixed tokens, default values and separators
//! used throughout the import pipeline.

// =============================================================================
// Template Defaults
// =============================================================================

/// The only supported template discriminator (delimited text)
pub const TEMPLATE_TYPE_CSV: &str = "csv";

/// Delimiter used when a template leaves the delimiter empty
pub const DEFAULT_DELIMITER: u8 = b';';

/// Literal two-character escape that templates use for a tab delimiter
pub const TAB_ESCAPE: &str = "\\t";

/// Decimal convention token selecting a comma decimal point
pub const DECIMAL_COMMA_TOKEN: &str = "de";

/// Decimal convention token selecting a period decimal point
pub const DECIMAL_PERIOD_TOKEN: &str = "en";

// =============================================================================
// Header Resolution
// =============================================================================

/// Name given to header cells that are empty after cleaning
pub const EMPTY_HEADER_PLACEHOLDER: &str = "EMPTY";

/// Separator between a repeated header name and its occurrence counter
pub const DUPLICATE_HEADER_SEPARATOR: &str = "__";

/// Prefix for synthesized column names when a template has no header
pub const POSITIONAL_COLUMN_PREFIX: &str = "col_";

/// Byte-order-mark artifact stripped from the front of cells
pub const BYTE_ORDER_MARK: char = '\u{feff}';

// =============================================================================
// Transaction Defaults
// =============================================================================

/// Currency used when the template has no currency column or the cell is empty
pub const FALLBACK_CURRENCY: &str = "EUR";

/// Category assigned to every imported transaction
pub const PLACEHOLDER_CATEGORY: &str = "uncategorized";

/// Bank identifier used when the caller does not supply one
pub const UNKNOWN_BANK_ID: &str = "unknown";

/// Separator placed between composed memo parts
pub const MEMO_SEPARATOR: &str = " | ";

// =============================================================================
// Identity Derivation
// =============================================================================

/// Separator between the fields hashed into a transaction fingerprint
pub const FINGERPRINT_SEPARATOR: &str = "|";

/// Date layout used for the booking date inside the fingerprint
pub const FINGERPRINT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Number of nanoseconds in 24 hours
pub const NANOS_PER_DAY: u64 = 86_400_000_000_000;

/// Hex characters of the fingerprint read as the intra-day offset (8 bytes)
pub const OFFSET_HEX_CHARS: usize = 16;

// =============================================================================
// Time-Series Sink
// =============================================================================

/// Measurement name for imported transaction points
pub const SINK_MEASUREMENT: &str = "bank_tx";

// =============================================================================
// Runtime Defaults
// =============================================================================

/// Tenant used when configuration does not name one
pub const DEFAULT_TENANT_ID: &str = "default";

/// Time zone in which booking days start
pub const DEFAULT_TIME_ZONE: &str = "Europe/Berlin";

/// Application directory name under the platform config/data directories
pub const APP_DIR_NAME: &str = "statement-importer";

/// Default template store file name
pub const TEMPLATE_STORE_FILE: &str = "templates.json";

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Extension of template authoring documents
pub const TEMPLATE_FILE_EXTENSION: &str = "json";

/// Default logging level when no verbosity flag is given
pub const DEFAULT_LOG_LEVEL: &str = "warn";

// =============================================================================
// Environment Overrides
// =============================================================================

/// Template store file path
pub const ENV_STORE_PATH: &str = "STATEMENT_IMPORTER_STORE";

/// Directory seeded into the store at startup
pub const ENV_TEMPLATE_DIR: &str = "STATEMENT_IMPORTER_TEMPLATE_DIR";

/// Default tenant id
pub const ENV_TENANT: &str = "STATEMENT_IMPORTER_TENANT";

/// Calendar context time zone (IANA name or UTC offset)
pub const ENV_TIME_ZONE: &str = "STATEMENT_IMPORTER_TIME_ZONE";

/// Build the positional column name for a zero-based index
pub fn positional_column_name(index: usize) -> String {
    format!("{}{}", POSITIONAL_COLUMN_PREFIX, index)
}
