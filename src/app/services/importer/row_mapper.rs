//! Resolved row to typed field values
//!
//! Conversion failures are wrapped with the row's physical line and the
//! name of the field that failed.

use chrono::NaiveDate;

use crate::app::models::{ColumnMap, DecimalConvention, DelimitedConfig, declared};
use crate::app::services::field_normalizers::{DateFormats, DateNormalizer, parse_amount_cents};
use crate::app::services::statement_reader::ResolvedRow;
use crate::constants::{FALLBACK_CURRENCY, MEMO_SEPARATOR};
use crate::{Error, Result};

/// Field values extracted from one row, before context is applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedRow {
    pub line: u64,
    pub booking_date: NaiveDate,
    pub value_date: Option<NaiveDate>,
    pub amount_cents: i64,
    pub currency: String,
    pub payee: String,
    pub memo: String,
    pub reference: String,
    pub iban: String,
}

/// Maps resolved rows through one template's column mapping
#[derive(Debug, Clone)]
pub struct RowMapper<'t> {
    columns: &'t ColumnMap,
    decimal: DecimalConvention,
    thousands_sep: &'t str,
    formats: DateFormats,
    normalizer: DateNormalizer,
}

impl<'t> RowMapper<'t> {
    /// Create a mapper, translating the template's date layouts once
    pub fn new(config: &'t DelimitedConfig, normalizer: DateNormalizer) -> Self {
        Self {
            columns: &config.columns,
            decimal: config.decimal,
            thousands_sep: &config.thousands_sep,
            formats: DateFormats::compile(&config.date_formats),
            normalizer,
        }
    }

    pub fn formats(&self) -> &DateFormats {
        &self.formats
    }

    /// Convert one row, failing on the first required field that does not parse
    pub fn map(&self, row: &ResolvedRow) -> Result<MappedRow> {
        let line = row.line();
        let columns = self.columns;

        let booking_date = self
            .normalizer
            .parse_day(cell(row, &columns.booking_date), &self.formats)
            .map_err(|e| Error::row_conversion(line, "bookingDate", e))?;

        let value_date = match declared(&columns.value_date).map(|c| row.value(c)) {
            Some(text) if !text.trim().is_empty() => Some(
                self.normalizer
                    .parse_day(text, &self.formats)
                    .map_err(|e| Error::row_conversion(line, "valueDate", e))?,
            ),
            _ => None,
        };

        let amount_cents = parse_amount_cents(
            cell(row, &columns.amount),
            self.decimal,
            self.thousands_sep,
        )
        .map_err(|e| Error::row_conversion(line, "amount", e))?;

        Ok(MappedRow {
            line,
            booking_date,
            value_date,
            amount_cents,
            currency: currency(cell(row, &columns.currency)),
            payee: cell(row, &columns.payee).to_string(),
            memo: self.memo(row),
            reference: cell(row, &columns.reference).to_string(),
            iban: cell(row, &columns.iban).to_string(),
        })
    }

    /// Join non-empty memo fields in declared order, or take the single memo column
    fn memo(&self, row: &ResolvedRow) -> String {
        if self.columns.memo_fields.is_empty() {
            return cell(row, &self.columns.memo).to_string();
        }

        self.columns
            .memo_fields
            .iter()
            .map(|column| cell(row, column).trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(MEMO_SEPARATOR)
    }
}

/// Cell for a mapped column; empty when unmapped or absent from the row
fn cell<'r>(row: &'r ResolvedRow, column: &str) -> &'r str {
    declared(column).map(|c| row.value(c)).unwrap_or("")
}

fn currency(text: &str) -> String {
    let code = text.trim();
    if code.is_empty() {
        FALLBACK_CURRENCY.to_string()
    } else {
        code.to_uppercase()
    }
}
