//! Date normalization against ordered candidate layouts
//!
//! Dates are reduced to calendar days. The calendar context is an explicit,
//! immutable value handed to the normalizer rather than process-global
//! state, so concurrent imports can share it freely.

use chrono::format::{Parsed, StrftimeItems, parse};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Offset, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use std::fmt;
use std::str::FromStr;

use super::layout::translate_layout;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Zone {
    Named(Tz),
    Fixed(FixedOffset),
}

/// Time zone in which calendar days start
///
/// Either an IANA zone, whose offset follows daylight saving time, or a
/// fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarContext {
    zone: Zone,
}

impl CalendarContext {
    /// Context with a fixed offset
    pub fn new(offset: FixedOffset) -> Self {
        Self {
            zone: Zone::Fixed(offset),
        }
    }

    /// Context following an IANA time zone
    pub fn named(tz: Tz) -> Self {
        Self {
            zone: Zone::Named(tz),
        }
    }

    /// UTC context
    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }

    /// IANA zone, when the context is not a fixed offset
    pub fn time_zone(&self) -> Option<Tz> {
        match self.zone {
            Zone::Named(tz) => Some(tz),
            Zone::Fixed(_) => None,
        }
    }

    /// Midnight at the start of `date` in this context
    ///
    /// When a DST transition skips local midnight, the day starts at the
    /// first local instant after the gap.
    pub fn midnight(&self, date: NaiveDate) -> Result<DateTime<FixedOffset>> {
        let local = date.and_time(NaiveTime::MIN);

        let resolved = match self.zone {
            Zone::Fixed(offset) => offset.from_local_datetime(&local).earliest(),
            Zone::Named(tz) => tz
                .from_local_datetime(&local)
                .earliest()
                .or_else(|| {
                    local
                        .checked_add_signed(TimeDelta::hours(1))
                        .and_then(|shifted| tz.from_local_datetime(&shifted).earliest())
                })
                .map(|midnight| midnight.fixed_offset()),
        };

        resolved
            .ok_or_else(|| Error::configuration(format!("no midnight for {} in {}", date, self)))
    }
}

impl Default for CalendarContext {
    fn default() -> Self {
        Self::named(chrono_tz::Europe::Berlin)
    }
}

impl fmt::Display for CalendarContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.zone {
            Zone::Named(tz) => f.write_str(tz.name()),
            Zone::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}

impl FromStr for CalendarContext {
    type Err = Error;

    /// Accepts IANA names (`Europe/Berlin`), `Z`, `UTC`, and offsets written
    /// `+HH`, `+HH:MM` or `+HHMM` (or `-`)
    fn from_str(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("z") || text.eq_ignore_ascii_case("utc") {
            return Ok(Self::utc());
        }

        let invalid = || Error::configuration(format!("invalid time zone: {:?}", text));

        let (sign, rest) = match text.as_bytes().first() {
            Some(b'+') => (1, &text[1..]),
            Some(b'-') => (-1, &text[1..]),
            Some(_) => return text.parse::<Tz>().map(Self::named).map_err(|_| invalid()),
            None => return Err(invalid()),
        };

        let digits: String = rest.chars().filter(|c| *c != ':').collect();
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let (hours, minutes) = match digits.len() {
            2 => (&digits[..2], "00"),
            4 => (&digits[..2], &digits[2..]),
            _ => return Err(invalid()),
        };

        let hours: i32 = hours.parse().map_err(|_| invalid())?;
        let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
        if minutes >= 60 {
            return Err(invalid());
        }

        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
            .map(Self::new)
            .ok_or_else(invalid)
    }
}

/// Candidate date layouts in priority order, translated once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormats {
    layouts: Vec<String>,
    patterns: Vec<String>,
}

impl DateFormats {
    /// Translate template layouts, dropping empty entries
    pub fn compile(layouts: &[String]) -> Self {
        let layouts: Vec<String> = layouts
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        let patterns = layouts.iter().map(|l| translate_layout(l)).collect();

        Self { layouts, patterns }
    }

    /// Layouts as written in the template
    pub fn layouts(&self) -> &[String] {
        &self.layouts
    }

    /// Parse with the first layout that matches
    pub fn parse(&self, text: &str) -> Result<NaiveDate> {
        let input = text.trim();
        if input.is_empty() {
            return Err(Error::invalid_date(text, &self.layouts));
        }

        self.patterns
            .iter()
            .find_map(|pattern| parse_with_pattern(input, pattern))
            .ok_or_else(|| Error::invalid_date(input, &self.layouts))
    }
}

/// Parse a calendar day, ignoring any time-of-day fields the pattern carries
fn parse_with_pattern(input: &str, pattern: &str) -> Option<NaiveDate> {
    let mut parsed = Parsed::new();
    parse(&mut parsed, input, StrftimeItems::new(pattern)).ok()?;
    parsed.to_naive_date().ok()
}

/// Date normalizer bound to one calendar context
#[derive(Debug, Clone, Copy, Default)]
pub struct DateNormalizer {
    context: CalendarContext,
}

impl DateNormalizer {
    pub fn new(context: CalendarContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> CalendarContext {
        self.context
    }

    /// Calendar day of `text`
    pub fn parse_day(&self, text: &str, formats: &DateFormats) -> Result<NaiveDate> {
        formats.parse(text)
    }

    /// Midnight of the calendar day of `text` in the bound context
    pub fn parse_midnight(&self, text: &str, formats: &DateFormats) -> Result<DateTime<FixedOffset>> {
        let day = formats.parse(text)?;
        self.context.midnight(day)
    }
}
