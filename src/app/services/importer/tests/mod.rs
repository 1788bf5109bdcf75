//! Test utilities for importer testing
//!
//! Provides templates, contexts and statement documents shared by the
//! importer test modules.

use crate::app::models::{ColumnMap, DecimalConvention, DelimitedConfig, ImportContext, Template};
use crate::app::services::field_normalizers::CalendarContext;
use crate::app::services::importer::Importer;

// Test modules
mod identity_tests;

/// Template for a German export with a metadata preamble
pub fn german_template() -> Template {
    Template {
        id: "ing-de".to_string(),
        name: "ING Girokonto".to_string(),
        template_type: "csv".to_string(),
        csv: DelimitedConfig {
            delimiter: ";".to_string(),
            has_header: true,
            header_search: true,
            date_formats: vec!["02.01.2006".to_string(), "2006-01-02".to_string()],
            decimal: DecimalConvention::Comma,
            thousands_sep: ".".to_string(),
            columns: ColumnMap {
                booking_date: "Buchung".to_string(),
                value_date: "Valuta".to_string(),
                amount: "Betrag".to_string(),
                currency: "Währung".to_string(),
                payee: "Auftraggeber/Empfänger".to_string(),
                memo: "Verwendungszweck".to_string(),
                ..Default::default()
            },
            ..Default::default()
        },
    }
}

/// Context used throughout the importer tests
pub fn giro_context() -> ImportContext {
    ImportContext::new("default", "giro-1", Some("ing".to_string())).unwrap()
}

/// Importer whose days start at UTC+1
pub fn cet_importer() -> Importer {
    Importer::new("+01:00".parse::<CalendarContext>().unwrap())
}

/// Statement with a preamble, duplicate columns and a blank line between rows
pub fn german_statement() -> String {
    "Umsatzanzeige;Datei erstellt am: 05.03.2024\n\
     IBAN;DE12 3456 7890 1234 5678 90\n\
     ;;\n\
     Buchung;Valuta;Auftraggeber/Empfänger;Verwendungszweck;Betrag;Währung;Betrag;Währung\n\
     01.02.2024;02.02.2024;ACME GmbH;Rechnung 42;-1.234,56;EUR;-1.234,56;EUR\n\
     \n\
     03.02.2024;03.02.2024;Arbeitgeber AG;Gehalt;2.500,00;EUR;2.500,00;EUR\n"
        .to_string()
}

/// Header plus two rows, the last with a malformed amount
pub fn statement_with_bad_last_row() -> String {
    "Buchung;Valuta;Auftraggeber/Empfänger;Verwendungszweck;Betrag;Währung\n\
     01.02.2024;01.02.2024;ACME GmbH;Rechnung 42;-10,00;EUR\n\
     02.02.2024;02.02.2024;Bäckerei;Brötchen;zwölf;EUR\n"
        .to_string()
}
