//! Import entry points and pipeline orchestration
//!
//! The importer validates the template, reads the document into resolved
//! rows and converts every row into a transaction. [`Importer::import`] is
//! all-or-nothing: the first failing row aborts the call and no transactions
//! are returned. [`Importer::import_collecting`] converts what it can and
//! reports failed rows with their index and line.

use std::io::Read;
use tracing::{debug, info};

use super::assembler::assemble_transaction;
use super::report::ImportReport;
use super::row_mapper::RowMapper;
use crate::Result;
use crate::app::models::{ImportContext, Template, TemplateKind, Transaction};
use crate::app::services::field_normalizers::{CalendarContext, DateNormalizer};
use crate::app::services::statement_reader::{ResolvedRow, StatementReader};

/// Template-driven statement importer
///
/// Holds only the calendar context, which is immutable, so one importer can
/// serve concurrent imports.
#[derive(Debug, Clone, Copy, Default)]
pub struct Importer {
    normalizer: DateNormalizer,
}

impl Importer {
    /// Create an importer whose calendar days start in `calendar`
    pub fn new(calendar: CalendarContext) -> Self {
        Self {
            normalizer: DateNormalizer::new(calendar),
        }
    }

    /// Calendar context used for booking-day midnights
    pub fn calendar(&self) -> CalendarContext {
        self.normalizer.context()
    }

    /// Import a document, failing on the first row that does not convert
    ///
    /// # Errors
    ///
    /// Configuration errors (invalid template, unsupported type, bad
    /// delimiter), structural errors (header not found, tokenization) and
    /// the first row conversion error, which names the line and field.
    pub fn import<R: Read>(
        &self,
        input: R,
        template: &Template,
        context: &ImportContext,
    ) -> Result<Vec<Transaction>> {
        let rows = self.read_rows(input, template)?;
        let mapper = RowMapper::new(&template.csv, self.normalizer);

        let transactions = rows
            .iter()
            .map(|row| self.convert_row(&mapper, row, context))
            .collect::<Result<Vec<_>>>()?;

        info!(
            "Imported {} transactions for account '{}' using template '{}'",
            transactions.len(),
            context.account_id,
            template.id
        );

        Ok(transactions)
    }

    /// Import a document, collecting row errors instead of aborting
    ///
    /// Configuration and structural errors still fail the whole call.
    pub fn import_collecting<R: Read>(
        &self,
        input: R,
        template: &Template,
        context: &ImportContext,
    ) -> Result<ImportReport> {
        let rows = self.read_rows(input, template)?;
        let mapper = RowMapper::new(&template.csv, self.normalizer);
        let mut report = ImportReport::new(rows.len());

        for (index, row) in rows.iter().enumerate() {
            match self.convert_row(&mapper, row, context) {
                Ok(transaction) => report.transactions.push(transaction),
                Err(e) => {
                    debug!("Row {} (line {}) failed: {}", index, row.line(), e);
                    report.add_error(index, row.line(), e.to_string());
                }
            }
        }

        info!("{}", report.summary());

        Ok(report)
    }

    /// Convert one resolved row into a transaction
    pub fn convert_row(
        &self,
        mapper: &RowMapper<'_>,
        row: &ResolvedRow,
        context: &ImportContext,
    ) -> Result<Transaction> {
        let mapped = mapper.map(row)?;
        assemble_transaction(mapped, context, &self.normalizer.context())
    }

    /// Validate the template and read the document into resolved rows
    fn read_rows<R: Read>(&self, input: R, template: &Template) -> Result<Vec<ResolvedRow>> {
        template.validate()?;
        match template.kind()? {
            TemplateKind::Csv => {
                let reader = StatementReader::from_config(&template.csv)?;
                let rows = reader.read(input)?;
                debug!(
                    "Template '{}' resolved {} data rows",
                    template.id,
                    rows.len()
                );
                Ok(rows)
            }
        }
    }
}
