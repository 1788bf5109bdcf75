//! Test utilities for template store testing

use crate::app::models::{ColumnMap, DelimitedConfig, Template};
use std::fs;
use std::path::Path;


/// Minimal valid template with the given id
pub fn sample_template(id: &str) -> Template {
    Template {
        id: id.to_string(),
        name: format!("Template {}", id),
        template_type: "csv".to_string(),
        csv: DelimitedConfig {
            delimiter: ";".to_string(),
            has_header: true,
            date_formats: vec!["02.01.2006".to_string()],
            columns: ColumnMap {
                booking_date: "Buchung".to_string(),
                amount: "Betrag".to_string(),
                ..Default::default()
            },
            ..Default::default()
        },
    }
}

/// Write a template document into `dir`
pub fn write_template_file(dir: &Path, file_name: &str, content: &str) {
    fs::write(dir.join(file_name), content).unwrap();
}

/// Authoring-format document for a template
pub fn template_json(id: &str, name: &str) -> String {
    format!(
        r#"{{
  "id": "{id}",
  "name": "{name}",
  "type": "csv",
  "csv": {{
    "delimiter": ";",
    "hasHeader": true,
    "headerSearch": true,
    "dateFormats": ["02.01.2006"],
    "decimal": "de",
    "thousandsSep": ".",
    "columns": {{ "bookingDate": "Buchung", "amount": "Betrag" }}
  }}
}}"#
    )
}
