//! InfluxDB line protocol output
//!
//! `measurement,tag=value field=value timestamp` with nanosecond timestamps.
//! Integer fields carry an `i` suffix, string fields are double-quoted.
//! Tags with empty values are omitted.

use std::io::Write;

use super::point::{FieldValue, SinkPoint};
use super::sink::TransactionSink;
use crate::{Error, Result};

/// Render one point as a line (without the trailing newline)
pub fn render_line(point: &SinkPoint) -> Result<String> {
    let mut line = escape(&point.measurement, &[',', ' ']);

    for (key, value) in point.tags.iter().filter(|(_, v)| !v.is_empty()) {
        line.push(',');
        line.push_str(&escape(key, &[',', '=', ' ']));
        line.push('=');
        line.push_str(&escape(value, &[',', '=', ' ']));
    }

    let fields: Vec<String> = point
        .fields
        .iter()
        .map(|(key, value)| {
            let value = match value {
                FieldValue::Integer(n) => format!("{}i", n),
                FieldValue::Text(s) => format!("\"{}\"", escape(s, &['"'])),
            };
            format!("{}={}", escape(key, &[',', '=', ' ']), value)
        })
        .collect();

    if fields.is_empty() {
        return Err(Error::sink(format!(
            "point for {} has no fields",
            point.measurement
        )));
    }

    let nanos = point.timestamp.timestamp_nanos_opt().ok_or_else(|| {
        Error::sink(format!(
            "timestamp out of range for nanoseconds: {}",
            point.timestamp
        ))
    })?;

    line.push(' ');
    line.push_str(&fields.join(","));
    line.push(' ');
    line.push_str(&nanos.to_string());

    Ok(line)
}

/// Backslash-escape `special` characters; backslashes are always escaped
fn escape(text: &str, special: &[char]) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            c if special.contains(&c) => {
                escaped.push('\\');
                escaped.push(c);
            }
            c => escaped.push(c),
        }
    }
    escaped
}

/// Sink writing line protocol to any writer
#[derive(Debug)]
pub struct LineProtocolSink<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> LineProtocolSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Points written so far
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TransactionSink for LineProtocolSink<W> {
    fn write_point(&mut self, point: &SinkPoint) -> Result<()> {
        let line = render_line(point)?;
        writeln!(self.writer, "{}", line)
            .map_err(|e| Error::sink(format!("failed to write point: {}", e)))?;
        self.written += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| Error::sink(format!("failed to flush sink: {}", e)))
    }
}
