//! Tests for line protocol rendering

use super::*;
use crate::app::services::transaction_sink::{
    FieldValue, LineProtocolSink, render_line, write_all,
};

#[test]
fn test_render_transaction_line() {
    let line = render_line(&SinkPoint::from_transaction(&acme_transaction())).unwrap();

    assert_eq!(
        line,
        "bank_tx,account_id=giro-1,bank_id=ing,category_id=uncategorized,currency=EUR,\
         direction=out,tenant_id=default \
         amount_cents=-123456i,amount_cents_abs=123456i,payee=\"ACME GmbH\",\
         memo=\"Rechnung 42\",reference=\"\",iban=\"\",\
         tx_uid=\"4b51f741e50f5fcc44f939fcb3595253d25bc2a8043b3e04dd59db6251574d60\" \
         1706744088346083276"
    );
}

#[test]
fn test_special_characters_are_escaped() {
    let mut transaction = acme_transaction();
    transaction.bank_id = "Bank, Berlin=Mitte".to_string();
    transaction.payee = "Say \"hi\" \\ bye".to_string();

    let line = render_line(&SinkPoint::from_transaction(&transaction)).unwrap();

    assert!(line.contains(r"bank_id=Bank\,\ Berlin\=Mitte,"));
    assert!(line.contains(r#"payee="Say \"hi\" \\ bye""#));
}

#[test]
fn test_empty_tag_values_are_omitted() {
    let mut transaction = acme_transaction();
    transaction.tenant_id = String::new();

    let line = render_line(&SinkPoint::from_transaction(&transaction)).unwrap();
    assert!(!line.contains("tenant_id"));
}

#[test]
fn test_point_without_fields_rejected() {
    let mut point = SinkPoint::from_transaction(&acme_transaction());
    point.fields.clear();

    assert!(render_line(&point).is_err());

    point.fields.push(("n".to_string(), FieldValue::Integer(1)));
    assert!(render_line(&point).unwrap().contains(" n=1i "));
}

#[test]
fn test_sink_writes_one_line_per_transaction() {
    let mut salary = acme_transaction();
    salary.amount_cents = 250000;

    let mut sink = LineProtocolSink::new(Vec::new());
    let written = write_all(&mut sink, &[acme_transaction(), salary]).unwrap();

    assert_eq!(written, 2);
    assert_eq!(sink.written(), 2);

    let output = String::from_utf8(sink.into_inner()).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].contains("amount_cents=250000i"));
}
