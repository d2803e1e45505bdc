//! Identifier extraction from free-text cells
//!
//! The insured-person column holds text like `Jan Kowalski 44051401458`.
//! The first run of 9 to 13 ASCII digits is taken as the identifier. It is
//! used only for matching and is not checksum-validated.

use crate::types::{Cell, Sheet};
use regex::Regex;

lazy_static::lazy_static! {
    static ref IDENTIFIER_RUN: Regex = Regex::new(r"[0-9]{9,13}").unwrap();
}

/// First (leftmost) run of 9-13 digits. Longer runs yield their first 13 digits.
pub fn extract_identifier(text: &str) -> Option<&str> {
    IDENTIFIER_RUN.find(text).map(|m| m.as_str())
}

/// Copy of `sheet` with `target_column` holding the extracted identifier per row.
///
/// The column is appended, or overwritten in place when it already exists.
/// Rows without a digit run get an empty cell. Returns `None` when
/// `source_column` is missing.
pub fn with_extracted_column(sheet: &Sheet, source_column: &str, target_column: &str) -> Option<Sheet> {
    let source = sheet.column_index(source_column)?;

    let extracted: Vec<Cell> = sheet
        .rows
        .iter()
        .map(|row| {
            let text = row.get(source).map(Cell::as_text).unwrap_or_default();
            match extract_identifier(&text) {
                Some(id) => Cell::text(id),
                None => Cell::Empty,
            }
        })
        .collect();

    let mut out = sheet.clone();
    match out.column_index(target_column) {
        Some(target) => {
            for (row, value) in out.rows.iter_mut().zip(extracted) {
                row[target] = value;
            }
        }
        None => {
            out.columns.push(target_column.to_string());
            for (row, value) in out.rows.iter_mut().zip(extracted) {
                row.push(value);
            }
        }
    }

    Some(out)
}
