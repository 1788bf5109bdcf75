//! Tests for the statement reader

use super::*;
use crate::Error;
use crate::app::models::TextEncoding;
use crate::app::services::statement_reader::{StatementReader, resolve_delimiter};

#[test]
fn test_resolve_delimiter() {
    assert_eq!(resolve_delimiter("").unwrap(), b';');
    assert_eq!(resolve_delimiter("\\t").unwrap(), b'\t');
    assert_eq!(resolve_delimiter(",").unwrap(), b',');
    assert_eq!(resolve_delimiter("|").unwrap(), b'|');

    assert!(matches!(
        resolve_delimiter(";;"),
        Err(Error::InvalidDelimiter { .. })
    ));
    assert!(matches!(
        resolve_delimiter("§"),
        Err(Error::InvalidDelimiter { .. })
    ));
}

#[test]
fn test_invalid_delimiter_rejected_at_construction() {
    let config = DelimitedConfig {
        delimiter: "ab".to_string(),
        ..search_config()
    };

    let err = StatementReader::from_config(&config).unwrap_err();
    assert!(err.to_string().contains("invalid delimiter"));
}

#[test]
fn test_header_search_skips_preamble_and_blank_rows() {
    let reader = StatementReader::from_config(&search_config()).unwrap();
    let rows = reader.read_str(&preamble_statement()).unwrap();

    assert_eq!(rows.len(), 2);

    let first = &rows[0];
    assert_eq!(first.value("Buchung"), "01.02.2024");
    assert_eq!(first.value("Betrag"), "-1.234,56");
    assert_eq!(first.value("Betrag__2"), "-1.234,56");
    assert_eq!(first.value("Währung__2"), "EUR");
    assert_eq!(first.value("Auftraggeber/Empfänger"), "ACME GmbH");

    assert_eq!(rows[1].value("Verwendungszweck"), "Gehalt");
    assert!(rows[1].line() > first.line());
}

#[test]
fn test_header_search_fails_naming_required_columns() {
    let reader = StatementReader::from_config(&search_config()).unwrap();
    let content = "Kontoauszug;2024\nDatum;Wert\n01.02.2024;5,00\n";

    match reader.read_str(content) {
        Err(Error::HeaderNotFound { required }) => {
            assert_eq!(required[0], "Buchung");
            assert!(required.contains(&"Betrag".to_string()));
        }
        other => panic!("expected header not found, got {:?}", other),
    }

    let message = reader.read_str(content).unwrap_err().to_string();
    assert!(message.starts_with("header not found"));
    assert!(message.contains("Buchung"));
}

#[test]
fn test_first_row_header_after_skip_rows() {
    let config = DelimitedConfig {
        skip_rows: 2,
        ..first_row_config()
    };
    let reader = StatementReader::from_config(&config).unwrap();
    let content = "Kontoauszug\n\
                   ;;;\n\
                   Stand: 01.03.2024\n\
                   Buchung;Valuta;Betrag\n\
                   01.02.2024;01.02.2024;10,00\n";

    let rows = reader.read_str(content).unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].value("Betrag"), "10,00");
    assert_eq!(
        rows[0].column_names().collect::<Vec<_>>(),
        vec!["Buchung", "Valuta", "Betrag"]
    );
}

#[test]
fn test_skip_rows_past_end_of_input() {
    let config = DelimitedConfig {
        skip_rows: 5,
        ..first_row_config()
    };
    let reader = StatementReader::from_config(&config).unwrap();

    match reader.read_str("eins\nzwei\n") {
        Err(Error::UnexpectedEndOfInput { skipped, requested }) => {
            assert_eq!(skipped, 2);
            assert_eq!(requested, 5);
        }
        other => panic!("expected end of input, got {:?}", other),
    }
}

#[test]
fn test_missing_header_row_is_an_error() {
    let reader = StatementReader::from_config(&first_row_config()).unwrap();

    assert!(matches!(
        reader.read_str("\n;;\n"),
        Err(Error::HeaderNotFound { .. })
    ));
}

#[test]
fn test_positional_names_without_header() {
    let reader = StatementReader::from_config(&positional_config()).unwrap();
    let rows = reader
        .read_str("2024-02-01, 12.50 ,Coffee\n,,\n2024-02-02,-3.00,Bakery,extra\n")
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].value("col_0"), "2024-02-01");
    assert_eq!(rows[0].value("col_1"), "12.50");
    assert_eq!(rows[1].value("col_3"), "extra");
    assert_eq!(rows[0].get("col_3"), None);
}

#[test]
fn test_short_and_long_rows_are_tolerated() {
    let reader = StatementReader::from_config(&first_row_config()).unwrap();
    let content = "Buchung;Betrag;Verwendungszweck\n\
                   01.02.2024;1,00\n\
                   02.02.2024;2,00;Miete;überzählig\n";

    let rows = reader.read_str(content).unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].len(), 2);
    assert_eq!(rows[0].value("Verwendungszweck"), "");
    assert_eq!(rows[1].len(), 3);
    assert_eq!(rows[1].value("Verwendungszweck"), "Miete");
}

#[test]
fn test_quoted_cells_with_embedded_delimiter() {
    let reader = StatementReader::from_config(&first_row_config()).unwrap();
    let content = "Buchung;Betrag;Verwendungszweck\n\
                   01.02.2024;1,00;\"Miete; Februar\"\n";

    let rows = reader.read_str(content).unwrap();
    assert_eq!(rows[0].value("Verwendungszweck"), "Miete; Februar");
}

#[test]
fn test_tab_delimited_with_bom() {
    let config = DelimitedConfig {
        delimiter: "\\t".to_string(),
        ..first_row_config()
    };
    let reader = StatementReader::from_config(&config).unwrap();
    let content = "\u{feff}Buchung\tBetrag\n01.02.2024\t7,00\n";

    let rows = reader.read_str(content).unwrap();
    assert_eq!(rows[0].value("Buchung"), "01.02.2024");
    assert_eq!(rows[0].value("Betrag"), "7,00");
}

#[test]
fn test_latin1_encoding_hint() {
    let config = DelimitedConfig {
        encoding_hint: "ISO-8859-1".to_string(),
        ..first_row_config()
    };
    let reader = StatementReader::from_config(&config).unwrap();
    // "Währung" with 0xE4 for the umlaut
    let bytes: Vec<u8> = b"Buchung;W\xe4hrung\n01.02.2024;EUR\n".to_vec();

    let rows = reader.read(bytes.as_slice()).unwrap();
    assert_eq!(rows[0].value("Währung"), "EUR");
}

#[test]
fn test_windows_1252_punctuation_is_decoded() {
    for hint in ["windows-1252", "cp1252", "latin1", "ISO-8859-1"] {
        let config = DelimitedConfig {
            encoding_hint: hint.to_string(),
            ..first_row_config()
        };
        let reader = StatementReader::from_config(&config).unwrap();
        let bytes: &[u8] = b"Buchung;Verwendungszweck;Betrag\n\
                             01.02.2024;Geb\x9fhr \x80 \x84Test\x93;\x80 5,00\n";

        let rows = reader.read(bytes).unwrap();
        assert_eq!(
            rows[0].value("Verwendungszweck"),
            "Geb\u{178}hr \u{20ac} \u{201e}Test\u{201c}",
            "{}",
            hint
        );
        assert_eq!(rows[0].value("Betrag"), "€ 5,00", "{}", hint);
    }
}

#[test]
fn test_encoding_hint_resolution() {
    assert_eq!(TextEncoding::from_hint(""), TextEncoding::Utf8);
    assert_eq!(TextEncoding::from_hint(" UTF8 "), TextEncoding::Utf8);
    assert_eq!(
        TextEncoding::from_hint("latin-1"),
        TextEncoding::Legacy(encoding_rs::WINDOWS_1252)
    );
    assert_eq!(
        TextEncoding::from_hint("iso-8859-15"),
        TextEncoding::Legacy(encoding_rs::ISO_8859_15)
    );
    assert_eq!(TextEncoding::from_hint("klingon"), TextEncoding::Unknown);

    assert_eq!(TextEncoding::from_hint("cp1252").decode(b"\x80 5,00"), "€ 5,00");
    assert_eq!(TextEncoding::from_hint("iso-8859-15").decode(b"\xa4"), "€");
    assert_eq!(TextEncoding::Unknown.decode("Grüße".as_bytes()), "Grüße");
}

#[test]
fn test_empty_document_without_header_yields_no_rows() {
    let reader = StatementReader::from_config(&positional_config()).unwrap();
    assert!(reader.read_str("").unwrap().is_empty());
    assert!(reader.read_str("\n,,\n , \n").unwrap().is_empty());
}
