//! Test utilities for statement reader testing
//!
//! This module provides configuration builders and sample statement
//! documents shared by the reader test modules.

use crate::app::models::{ColumnMap, DecimalConvention, DelimitedConfig};

mod reader_tests;

/// Column mapping used by the German sample statements
pub fn german_columns() -> ColumnMap {
    ColumnMap {
        booking_date: "Buchung".to_string(),
        value_date: "Valuta".to_string(),
        amount: "Betrag".to_string(),
        currency: "Währung".to_string(),
        payee: "Auftraggeber/Empfänger".to_string(),
        memo: "Verwendungszweck".to_string(),
        ..Default::default()
    }
}

/// Header-search configuration for statements with a metadata preamble
pub fn search_config() -> DelimitedConfig {
    DelimitedConfig {
        delimiter: ";".to_string(),
        has_header: true,
        header_search: true,
        date_formats: vec!["02.01.2006".to_string()],
        decimal: DecimalConvention::Comma,
        thousands_sep: ".".to_string(),
        columns: german_columns(),
        ..Default::default()
    }
}

/// Plain header configuration (first non-blank row is the header)
pub fn first_row_config() -> DelimitedConfig {
    DelimitedConfig {
        header_search: false,
        ..search_config()
    }
}

/// Headerless configuration addressing columns by position
pub fn positional_config() -> DelimitedConfig {
    DelimitedConfig {
        delimiter: ",".to_string(),
        has_header: false,
        header_search: false,
        date_formats: vec!["2006-01-02".to_string()],
        columns: ColumnMap {
            booking_date: "col_0".to_string(),
            amount: "col_1".to_string(),
            payee: "col_2".to_string(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Statement with a two-line preamble and a blank line before the header
pub fn preamble_statement() -> String {
    "Umsatzanzeige;Datei erstellt am: 05.03.2024\n\
     IBAN;DE12 3456 7890 1234 5678 90\n\
     ;;\n\
     Buchung;Valuta;Auftraggeber/Empfänger;Verwendungszweck;Betrag;Währung;Betrag;Währung\n\
     01.02.2024;02.02.2024;ACME GmbH;Rechnung 42;-1.234,56;EUR;-1.234,56;EUR\n\
     \n\
     03.02.2024;03.02.2024;Arbeitgeber AG;Gehalt;2.500,00;EUR;2.500,00;EUR\n"
        .to_string()
}
