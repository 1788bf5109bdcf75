//! Sink points built from transactions

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::app::models::Transaction;
use crate::constants::SINK_MEASUREMENT;

/// Field value of a sink point
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Text(String),
}

/// One time-series point
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SinkPoint {
    pub measurement: String,
    /// Tag key/value pairs, ordered by key
    pub tags: Vec<(String, String)>,
    pub fields: Vec<(String, FieldValue)>,
    pub timestamp: DateTime<FixedOffset>,
}

impl SinkPoint {
    /// Point for one transaction, stamped at its recorded instant
    pub fn from_transaction(transaction: &Transaction) -> Self {
        let tags = [
            ("account_id", transaction.account_id.as_str()),
            ("bank_id", transaction.bank_id.as_str()),
            ("category_id", transaction.category_id.as_str()),
            ("currency", transaction.currency.as_str()),
            ("direction", transaction.direction.as_str()),
            ("tenant_id", transaction.tenant_id.as_str()),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

        let fields = vec![
            field_int("amount_cents", transaction.amount_cents),
            field_int("amount_cents_abs", transaction.amount_cents_abs()),
            field_text("payee", &transaction.payee),
            field_text("memo", &transaction.memo),
            field_text("reference", &transaction.reference),
            field_text("iban", &transaction.iban),
            field_text("tx_uid", &transaction.tx_uid),
        ];

        Self {
            measurement: SINK_MEASUREMENT.to_string(),
            tags,
            fields,
            timestamp: transaction.recorded_at,
        }
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

fn field_int(key: &str, value: i64) -> (String, FieldValue) {
    (key.to_string(), FieldValue::Integer(value))
}

fn field_text(key: &str, value: &str) -> (String, FieldValue) {
    (key.to_string(), FieldValue::Text(value.to_string()))
}
