//! Test utilities for field normalizer testing

use chrono::NaiveDate;

use crate::app::services::field_normalizers::DateFormats;


/// Compile a list of template layouts
pub fn formats(layouts: &[&str]) -> DateFormats {
    let layouts: Vec<String> = layouts.iter().map(|l| l.to_string()).collect();
    DateFormats::compile(&layouts)
}

/// Shorthand for a calendar day
pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}
