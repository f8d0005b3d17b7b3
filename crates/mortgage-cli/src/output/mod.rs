pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
///
/// Bare text (the loan narrative) has no tabular shape, so every format but
/// JSON prints it verbatim.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match (format, value) {
        (OutputFormat::Json, _) => json::print_json(value),
        (_, Value::String(text)) => println!("{}", text),
        (OutputFormat::Table, _) => table::print_table(value),
        (OutputFormat::Csv, _) => csv_out::print_csv(value),
        (OutputFormat::Minimal, _) => minimal::print_minimal(value),
    }
}
