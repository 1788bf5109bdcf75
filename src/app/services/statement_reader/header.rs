//! Header resolution and cell cleaning
//!
//! This module decides which row supplies the column names, cleans raw cells
//! and makes header names unique so that every resolved row is a proper
//! name to value association.

use csv::StringRecord;
use std::collections::{HashMap, HashSet};

use crate::constants::{BYTE_ORDER_MARK, DUPLICATE_HEADER_SEPARATOR, EMPTY_HEADER_PLACEHOLDER};

/// How column names are obtained for data rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderStrategy {
    /// No header row; columns are named `col_0`, `col_1`, ...
    Positional,

    /// The first non-blank row after skipping is the header
    FirstRow,

    /// Scan forward until a row contains every required name
    Search,
}

impl HeaderStrategy {
    /// Pick the strategy from the template flags
    pub fn from_flags(has_header: bool, header_search: bool) -> Self {
        match (has_header, header_search) {
            (false, _) => HeaderStrategy::Positional,
            (true, false) => HeaderStrategy::FirstRow,
            (true, true) => HeaderStrategy::Search,
        }
    }
}

/// Trim whitespace, then strip a leading byte-order-mark artifact
///
/// Whitespace following the mark is kept.
pub fn clean_cell(value: &str) -> &str {
    let trimmed = value.trim();
    trimmed.strip_prefix(BYTE_ORDER_MARK).unwrap_or(trimmed)
}

/// A record is blank when every cell is empty after cleaning
pub fn is_blank_record(record: &StringRecord) -> bool {
    record.iter().all(|cell| clean_cell(cell).is_empty())
}

/// Clean every cell of a candidate header record
pub fn normalize_headers(record: &StringRecord) -> Vec<String> {
    record.iter().map(|cell| clean_cell(cell).to_string()).collect()
}

/// Make header names unique
///
/// Empty names become `EMPTY`; the second and later occurrences of a name
/// get `__2`, `__3`, ... appended in order of appearance.
pub fn make_unique_headers(headers: &[String]) -> Vec<String> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut unique = Vec::with_capacity(headers.len());

    for header in headers {
        let name = match header.trim() {
            "" => EMPTY_HEADER_PLACEHOLDER,
            name => name,
        };

        let count = seen.entry(name).or_insert(0);
        *count += 1;

        if *count == 1 {
            unique.push(name.to_string());
        } else {
            unique.push(format!("{}{}{}", name, DUPLICATE_HEADER_SEPARATOR, count));
        }
    }

    unique
}

/// Check whether the header names cover every required name
pub fn contains_all(headers: &[String], required: &[String]) -> bool {
    let present: HashSet<&str> = headers.iter().map(String::as_str).collect();
    required.iter().all(|name| present.contains(name.as_str()))
}
