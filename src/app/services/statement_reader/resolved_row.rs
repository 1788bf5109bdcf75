//! Resolved rows: ordered column-name to cell associations

use csv::StringRecord;
use serde::Serialize;

use super::header::clean_cell;
use crate::constants::positional_column_name;

/// One physical data row with its cells keyed by unique column name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRow {
    /// 1-based physical line the row started on (0 when unknown)
    line: u64,

    /// Column name and cleaned cell text, in source order
    cells: Vec<(String, String)>,
}

impl ResolvedRow {
    /// Build a row from explicit name/value pairs
    pub fn new(line: u64, cells: Vec<(String, String)>) -> Self {
        Self { line, cells }
    }

    /// Pair a record with header names, stopping at the shorter of the two
    pub fn from_headers(headers: &[String], record: &StringRecord, line: u64) -> Self {
        let cells = headers
            .iter()
            .zip(record.iter())
            .map(|(name, value)| (name.clone(), clean_cell(value).to_string()))
            .collect();

        Self { line, cells }
    }

    /// Name every cell by its position (`col_0`, `col_1`, ...)
    pub fn positional(record: &StringRecord, line: u64) -> Self {
        let cells = record
            .iter()
            .enumerate()
            .map(|(index, value)| (positional_column_name(index), clean_cell(value).to_string()))
            .collect();

        Self { line, cells }
    }

    /// Cell text for a column, if the row has that column
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Cell text for a column, empty when the column is absent
    pub fn value(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    /// Physical line number of the row
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Column names in source order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    /// Name/value pairs in source order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
