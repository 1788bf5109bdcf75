//! Time-series sink for imported transactions
//!
//! Each transaction becomes one point: tagged by tenant, account, bank,
//! currency, direction and category, carrying the signed and absolute amount,
//! the descriptive fields and the uid, stamped at the transaction's
//! deterministic intra-day instant.
//!
//! - [`point`] - [`SinkPoint`] construction from a transaction
//! - [`sink`] - The [`TransactionSink`] trait and [`write_all`]
//! - [`line_protocol`] - InfluxDB line protocol rendering to any writer

pub mod line_protocol;
pub mod point;
pub mod sink;

#[cfg(test)]
pub mod tests;

pub use line_protocol::{LineProtocolSink, render_line};
pub use point::{FieldValue, SinkPoint};
pub use sink::{TransactionSink, write_all};
