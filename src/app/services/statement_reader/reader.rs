//! Core statement reader implementation
//!
//! This module tokenizes delimited text, discards blank rows and leading
//! rows, hands header candidates to the header resolver and emits one
//! resolved row per remaining data record.

use csv::{StringRecord, StringRecordsIter};
use std::io::Read;
use tracing::{debug, warn};

use super::header::{
    HeaderStrategy, contains_all, is_blank_record, make_unique_headers, normalize_headers,
};
use super::resolved_row::ResolvedRow;
use crate::app::models::{DelimitedConfig, TextEncoding};
use crate::constants::{DEFAULT_DELIMITER, TAB_ESCAPE};
use crate::{Error, Result};

/// Resolve a template delimiter to the byte handed to the tokenizer
///
/// Empty means `;`, the two-character escape `\t` means tab, anything else
/// must be exactly one single-byte character.
pub fn resolve_delimiter(configured: &str) -> Result<u8> {
    match configured {
        "" => Ok(DEFAULT_DELIMITER),
        TAB_ESCAPE => Ok(b'\t'),
        other if other.len() == 1 => Ok(other.as_bytes()[0]),
        other => Err(Error::invalid_delimiter(other)),
    }
}

/// Reader for delimited statement text, configured from one template
#[derive(Debug, Clone)]
pub struct StatementReader {
    delimiter: u8,
    skip_rows: usize,
    strategy: HeaderStrategy,
    required_headers: Vec<String>,
    encoding: TextEncoding,
}

impl StatementReader {
    /// Create a reader from a template's delimited-text configuration
    pub fn from_config(config: &DelimitedConfig) -> Result<Self> {
        let delimiter = resolve_delimiter(&config.delimiter)?;

        let encoding = config.encoding();
        if encoding == TextEncoding::Unknown {
            warn!(
                "Unknown encoding hint '{}', decoding as UTF-8",
                config.encoding_hint
            );
        }

        debug!(
            "Statement reader: delimiter={:?}, skip_rows={}, has_header={}, header_search={}",
            delimiter as char, config.skip_rows, config.has_header, config.header_search
        );

        Ok(Self {
            delimiter,
            skip_rows: config.skip_rows,
            strategy: HeaderStrategy::from_flags(config.has_header, config.header_search),
            required_headers: config.columns.required_headers(),
            encoding,
        })
    }

    /// Header strategy in effect
    pub fn strategy(&self) -> &HeaderStrategy {
        &self.strategy
    }

    /// Column names a searched header must contain
    pub fn required_headers(&self) -> &[String] {
        &self.required_headers
    }

    /// Read and decode a whole document, then resolve its rows
    pub fn read<R: Read>(&self, mut input: R) -> Result<Vec<ResolvedRow>> {
        let mut bytes = Vec::new();
        input
            .read_to_end(&mut bytes)
            .map_err(|e| Error::io("Failed to read statement input", e))?;

        let text = self.encoding.decode(&bytes);
        self.read_str(&text)
    }

    /// Resolve rows from already decoded text
    pub fn read_str(&self, text: &str) -> Result<Vec<ResolvedRow>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(text.as_bytes());

        let mut records = RecordStream::new(csv_reader.records());

        for skipped in 0..self.skip_rows {
            if records.next_non_blank()?.is_none() {
                return Err(Error::unexpected_end_of_input(skipped, self.skip_rows));
            }
        }

        let headers = self.resolve_headers(&mut records)?;
        if let Some(names) = &headers {
            debug!("Resolved {} header columns: {:?}", names.len(), names);
        }

        let mut rows = Vec::new();
        while let Some(record) = records.next_non_blank()? {
            let line = record_line(&record);
            let row = match &headers {
                Some(names) => ResolvedRow::from_headers(names, &record, line),
                None => ResolvedRow::positional(&record, line),
            };
            rows.push(row);
        }

        debug!(
            "Read {} data rows ({} blank rows discarded)",
            rows.len(),
            records.blank_rows
        );

        Ok(rows)
    }

    /// Locate the header row according to the strategy
    fn resolve_headers<R: Read>(
        &self,
        records: &mut RecordStream<'_, R>,
    ) -> Result<Option<Vec<String>>> {
        match self.strategy {
            HeaderStrategy::Positional => Ok(None),
            HeaderStrategy::FirstRow => match records.next_non_blank()? {
                Some(record) => Ok(Some(make_unique_headers(&normalize_headers(&record)))),
                None => Err(Error::header_not_found(self.required_headers.clone())),
            },
            HeaderStrategy::Search => {
                while let Some(record) = records.next_non_blank()? {
                    let candidate = make_unique_headers(&normalize_headers(&record));
                    if contains_all(&candidate, &self.required_headers) {
                        debug!("Header found at line {}", record_line(&record));
                        return Ok(Some(candidate));
                    }
                }
                Err(Error::header_not_found(self.required_headers.clone()))
            }
        }
    }
}

/// Record iterator that skips blank rows and surfaces tokenizer errors
struct RecordStream<'r, R: Read> {
    inner: StringRecordsIter<'r, R>,
    blank_rows: usize,
}

impl<'r, R: Read> RecordStream<'r, R> {
    fn new(inner: StringRecordsIter<'r, R>) -> Self {
        Self {
            inner,
            blank_rows: 0,
        }
    }

    /// Next record with at least one non-empty cell, `None` at end of input
    fn next_non_blank(&mut self) -> Result<Option<StringRecord>> {
        for result in self.inner.by_ref() {
            let record = result?;
            if is_blank_record(&record) {
                self.blank_rows += 1;
                continue;
            }
            return Ok(Some(record));
        }
        Ok(None)
    }
}

fn record_line(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}
