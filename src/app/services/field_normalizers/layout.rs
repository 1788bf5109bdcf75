//! Reference-date layout translation
//!
//! Templates describe dates by writing the reference moment
//! `Mon Jan 2 15:04:05 MST 2006` in the desired shape, e.g. `02.01.2006`
//! or `2006-01-02`. This module rewrites such layouts into strftime
//! patterns understood by `chrono`.

use regex::Regex;
use std::sync::OnceLock;

/// Layout tokens, longest and most specific first
const LAYOUT_TOKENS: &str = r"2006|January|Jan|Monday|Mon|MST|002|__2|_2|15|01|02|03|04|05|06|-07:00:00|-070000|-07:00|-0700|-07|Z07:00:00|Z070000|Z07:00|Z0700|Z07|PM|pm|1|2|3|4|5";

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(LAYOUT_TOKENS).expect("layout token pattern is valid"))
}

/// strftime equivalent of one layout token
fn strftime_for(token: &str) -> Option<&'static str> {
    let specifier = match token {
        "2006" => "%Y",
        "06" => "%y",
        "January" => "%B",
        "Jan" => "%b",
        "01" | "1" => "%m",
        "Monday" => "%A",
        "Mon" => "%a",
        "02" | "2" => "%d",
        "_2" | "__2" => "%e",
        "002" => "%j",
        "15" => "%H",
        "03" | "3" => "%I",
        "04" | "4" => "%M",
        "05" | "5" => "%S",
        "PM" | "pm" => "%p",
        "MST" => "%Z",
        "-0700" | "-070000" | "Z0700" | "Z070000" => "%z",
        "-07:00" | "-07:00:00" | "Z07:00" | "Z07:00:00" => "%:z",
        "-07" | "Z07" => "%#z",
        _ => return None,
    };
    Some(specifier)
}

/// Translate a template date layout into a strftime pattern
///
/// Layouts that already contain `%` are taken as strftime patterns verbatim.
pub fn translate_layout(layout: &str) -> String {
    if layout.contains('%') {
        return layout.to_string();
    }

    let mut pattern = String::with_capacity(layout.len() * 2);
    let mut last = 0;

    for token in token_pattern().find_iter(layout) {
        pattern.push_str(&layout[last..token.start()]);
        pattern.push_str(strftime_for(token.as_str()).unwrap_or(token.as_str()));
        last = token.end();
    }
    pattern.push_str(&layout[last..]);

    pattern
}
