//! Data models for statement import
//!
//! This module contains the template schema describing how to read one
//! institution's export, the caller-supplied import context, and the
//! normalized transaction record produced for every data row.

use crate::constants::{
    DECIMAL_COMMA_TOKEN, DECIMAL_PERIOD_TOKEN, PLACEHOLDER_CATEGORY, TEMPLATE_TYPE_CSV,
    UNKNOWN_BANK_ID,
};
use crate::{Error, Result};
use chrono::{DateTime, FixedOffset, NaiveDate};
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Template Schema
// =============================================================================

/// Declarative description of one institution's export format
///
/// Templates are authored as JSON documents and owned by the template store;
/// the importer only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Unique template identifier (store key)
    pub id: String,

    /// Human-readable template name
    #[serde(default)]
    pub name: String,

    /// Format discriminator; only `"csv"` is readable
    #[serde(rename = "type", default = "default_template_type")]
    pub template_type: String,

    /// Delimited-text configuration
    #[serde(default)]
    pub csv: DelimitedConfig,
}

fn default_template_type() -> String {
    TEMPLATE_TYPE_CSV.to_string()
}

/// Template formats the importer knows how to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// Delimited text (CSV-like) exports
    Csv,
}

impl Template {
    /// Resolve the declared type, rejecting anything but delimited text
    pub fn kind(&self) -> Result<TemplateKind> {
        match self.template_type.trim() {
            TEMPLATE_TYPE_CSV => Ok(TemplateKind::Csv),
            other => Err(Error::unsupported_template_type(other)),
        }
    }

    /// Fill in defaults applied when a template is stored
    pub fn normalized(mut self) -> Self {
        self.id = self.id.trim().to_string();
        if self.template_type.trim().is_empty() {
            self.template_type = default_template_type();
        }
        self
    }

    /// Check the invariants a usable template must satisfy
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::configuration("template id is required"));
        }

        self.kind()?;
        self.csv.validate()
    }
}

/// Delimited-text sub-configuration of a template
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DelimitedConfig {
    /// Single delimiter character, `"\t"` escape for tab, empty for `;`
    pub delimiter: String,

    /// Whether the export carries a header row
    pub has_header: bool,

    /// Scan forward for the header instead of taking the first row
    pub header_search: bool,

    /// Leading non-blank rows discarded before header handling
    pub skip_rows: usize,

    /// Source text encoding (`utf-8` when empty)
    pub encoding_hint: String,

    /// Candidate date layouts, tried in order
    pub date_formats: Vec<String>,

    /// Numeral convention for amounts
    pub decimal: DecimalConvention,

    /// Grouping separator removed from amounts (may be empty)
    pub thousands_sep: String,

    /// Semantic field to source column mapping
    pub columns: ColumnMap,
}

impl DelimitedConfig {
    /// Check configuration invariants
    pub fn validate(&self) -> Result<()> {
        if self.columns.booking_date.trim().is_empty() {
            return Err(Error::configuration(
                "column mapping for bookingDate is required",
            ));
        }

        if self.columns.amount.trim().is_empty() {
            return Err(Error::configuration("column mapping for amount is required"));
        }

        if self.date_formats.iter().all(|f| f.trim().is_empty()) {
            return Err(Error::configuration("at least one date format is required"));
        }

        if self.header_search && !self.has_header {
            return Err(Error::configuration("headerSearch requires hasHeader"));
        }

        Ok(())
    }

    /// Resolve the declared encoding hint
    pub fn encoding(&self) -> TextEncoding {
        TextEncoding::from_hint(&self.encoding_hint)
    }
}

/// Text encodings accepted through the template encoding hint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// UTF-8 (invalid sequences replaced)
    Utf8,
    /// Any other encoding with a WHATWG label (`windows-1252`, `iso-8859-15`, ...)
    Legacy(&'static Encoding),
    /// Hint not recognised; decoded as UTF-8
    Unknown,
}

impl TextEncoding {
    /// Map an encoding hint to a decoder choice
    ///
    /// Labels follow the WHATWG Encoding Standard, so `latin1` and
    /// `iso-8859-1` decode as windows-1252.
    pub fn from_hint(hint: &str) -> Self {
        let label = hint.trim();
        if label.is_empty() {
            return TextEncoding::Utf8;
        }

        let encoding = if label.eq_ignore_ascii_case("latin-1") {
            Some(WINDOWS_1252)
        } else {
            Encoding::for_label(label.as_bytes())
        };

        match encoding {
            Some(encoding) if encoding == UTF_8 => TextEncoding::Utf8,
            Some(encoding) => TextEncoding::Legacy(encoding),
            None => TextEncoding::Unknown,
        }
    }

    /// Decode raw bytes into text
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            TextEncoding::Legacy(encoding) => {
                encoding.decode_without_bom_handling(bytes).0.into_owned()
            }
            TextEncoding::Utf8 | TextEncoding::Unknown => String::from_utf8_lossy(bytes).into_owned(),
        }
    }
}

/// Decimal numeral convention of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DecimalConvention {
    /// `1.234,56` style: comma is the decimal point
    Comma,
    /// `1,234.56` style: period is the decimal point
    #[default]
    Period,
}

impl From<String> for DecimalConvention {
    fn from(token: String) -> Self {
        if token.trim().eq_ignore_ascii_case(DECIMAL_COMMA_TOKEN) {
            DecimalConvention::Comma
        } else {
            DecimalConvention::Period
        }
    }
}

impl From<DecimalConvention> for String {
    fn from(convention: DecimalConvention) -> Self {
        match convention {
            DecimalConvention::Comma => DECIMAL_COMMA_TOKEN.to_string(),
            DecimalConvention::Period => DECIMAL_PERIOD_TOKEN.to_string(),
        }
    }
}

/// Mapping from semantic transaction fields to source column names
///
/// An empty string means the field is not mapped.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnMap {
    pub booking_date: String,
    pub value_date: String,
    pub amount: String,
    pub currency: String,
    pub payee: String,
    pub memo: String,
    pub memo_fields: Vec<String>,
    pub reference: String,
    pub iban: String,
}

impl ColumnMap {
    /// Every source column referenced by the mapping, first-seen order, deduplicated
    pub fn required_headers(&self) -> Vec<String> {
        let mut candidates: Vec<&str> = vec![
            self.booking_date.as_str(),
            self.amount.as_str(),
            self.payee.as_str(),
            self.value_date.as_str(),
            self.currency.as_str(),
            self.reference.as_str(),
            self.iban.as_str(),
        ];

        if self.memo_fields.is_empty() {
            candidates.push(&self.memo);
        } else {
            candidates.extend(self.memo_fields.iter().map(String::as_str));
        }

        let mut required: Vec<String> = Vec::with_capacity(candidates.len());
        for name in candidates.into_iter().map(str::trim).filter(|n| !n.is_empty()) {
            if !required.iter().any(|r| r == name) {
                required.push(name.to_string());
            }
        }
        required
    }
}

/// Return the mapped column name, or `None` when the field is not mapped
pub fn declared(column: &str) -> Option<&str> {
    let trimmed = column.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

// =============================================================================
// Import Context
// =============================================================================

/// Caller-supplied identifiers stamped onto every transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportContext {
    pub tenant_id: String,
    pub account_id: String,
    pub bank_id: String,
}

impl ImportContext {
    /// Create a context, defaulting a missing or empty bank to `"unknown"`
    pub fn new(
        tenant_id: impl Into<String>,
        account_id: impl Into<String>,
        bank_id: Option<String>,
    ) -> Result<Self> {
        let account_id = account_id.into();
        if account_id.trim().is_empty() {
            return Err(Error::configuration("account id is required"));
        }

        let bank_id = bank_id
            .filter(|b| !b.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_BANK_ID.to_string());

        Ok(Self {
            tenant_id: tenant_id.into(),
            account_id,
            bank_id,
        })
    }
}

// =============================================================================
// Transaction Record
// =============================================================================

/// Money flow direction derived from the amount sign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    In,
    Out,
}

impl Direction {
    /// Non-negative amounts are inbound, negative amounts outbound
    pub fn from_amount(amount_cents: i64) -> Self {
        if amount_cents >= 0 {
            Direction::In
        } else {
            Direction::Out
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::In => "in",
            Direction::Out => "out",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized financial transaction built from one source row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub tenant_id: String,
    pub account_id: String,
    pub bank_id: String,

    /// Calendar day the bank booked the transaction
    pub booking_date: NaiveDate,

    /// Calendar day the amount became effective (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_date: Option<NaiveDate>,

    /// Signed amount in minor units; outbound amounts stay negative
    pub amount_cents: i64,

    pub currency: String,
    pub direction: Direction,
    pub payee: String,
    pub memo: String,
    pub reference: String,
    pub iban: String,
    pub category_id: String,

    /// Deterministic content fingerprint (64 lowercase hex chars)
    pub tx_uid: String,

    /// Booking-day midnight plus the fingerprint-derived offset
    pub recorded_at: DateTime<FixedOffset>,
}

impl Transaction {
    /// Absolute amount in minor units
    pub fn amount_cents_abs(&self) -> i64 {
        self.amount_cents.saturating_abs()
    }

    /// True when the category is still the import placeholder
    pub fn is_uncategorized(&self) -> bool {
        self.category_id == PLACEHOLDER_CATEGORY
    }
}
