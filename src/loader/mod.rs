//! Workbook loading
//!
//! Every sheet is read with no header inference and anchored at A1, so the
//! literal first row of each sheet is promoted to column names even when it
//! is blank.

pub mod cache;

pub use cache::{fingerprint, WorkbookCache};

use crate::error::{Result, SearchError};
use calamine::{Data, Range, Reader, Xlsx};
use chrono::{NaiveDateTime, Timelike};
use pszl_common::{Cell, Sheet, Workbook};
use std::io::Cursor;
use tracing::debug;

/// Parse an uploaded xlsx file. A workbook without sheets is not an error.
pub fn load_workbook(bytes: &[u8]) -> Result<Workbook> {
    let mut xlsx: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| SearchError::Parse(e.to_string()))?;

    let names: Vec<String> = xlsx.sheet_names().to_vec();
    let mut sheets = Vec::with_capacity(names.len());

    for name in names {
        let range = xlsx
            .worksheet_range(&name)
            .map_err(|e| SearchError::Parse(format!("arkusz {}: {}", name, e)))?;

        let raw = anchored_rows(&range);

        let sheet = Sheet::from_raw_rows(name, raw);
        debug!(sheet = %sheet.name, rows = sheet.len(), columns = sheet.columns.len(), "sheet loaded");
        sheets.push(sheet);
    }

    Ok(Workbook::new(sheets))
}

/// Cell grid starting at A1. calamine trims leading blank rows and columns
/// from the used range; they come back as empty cells.
fn anchored_rows(range: &Range<Data>) -> Vec<Vec<Cell>> {
    let (first_row, first_col) = match range.start() {
        Some(start) => start,
        None => return Vec::new(),
    };
    let first_col = first_col as usize;
    let width = first_col + range.width();

    let mut raw: Vec<Vec<Cell>> = vec![vec![Cell::Empty; width]; first_row as usize];
    raw.extend(range.rows().map(|row| {
        let mut cells = Vec::with_capacity(width);
        cells.resize(first_col, Cell::Empty);
        cells.extend(row.iter().map(to_cell));
        cells
    }));
    raw
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Int(*i),
        Data::Float(f) => Cell::Float(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) => Cell::DateTime(format_datetime(&value)),
            None => Cell::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::DateTime(s.clone()),
        Data::Error(e) => Cell::Error(format!("{:?}", e)),
    }
}

/// `YYYY-MM-DD` for dates at midnight, `YYYY-MM-DD HH:MM:SS` otherwise
fn format_datetime(value: &NaiveDateTime) -> String {
    if value.num_seconds_from_midnight() == 0 {
        value.format("%Y-%m-%d").to_string()
    } else {
        value.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
