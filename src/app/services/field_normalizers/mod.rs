//! Stateless field conversions for statement cells
//!
//! - [`amount`] - locale-formatted amount text to signed minor units
//! - [`date`] - date text to a calendar day, tried against ordered layouts
//! - [`layout`] - reference-date layout to strftime translation

pub mod amount;
pub mod date;
pub mod layout;

#[cfg(test)]
pub mod tests;

pub use amount::parse_amount_cents;
pub use date::{CalendarContext, DateFormats, DateNormalizer};
pub use layout::translate_layout;
