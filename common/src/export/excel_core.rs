//! Excel export (shared core)
//!
//! Writes a result set as one flat sheet: a header row followed by every row.

use crate::error::{Error, Result};
use crate::types::{Cell, ResultSet};
use rust_xlsxwriter::*;

pub const DEFAULT_SHEET_NAME: &str = "Wyniki";

/// Worksheet limits of the xlsx format
const MAX_ROWS: usize = 1_048_576;
const MAX_COLUMNS: usize = 16_384;

/// Write `results` to an in-memory xlsx workbook
pub fn generate_results_buffer(results: &ResultSet, sheet_name: &str) -> Result<Vec<u8>> {
    let rows = results.len() + 1;
    let columns = results.columns.len();
    if rows > MAX_ROWS || columns > MAX_COLUMNS {
        return Err(Error::TooLarge { rows, columns });
    }

    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet_name)
        .map_err(|e| Error::Export(format!("sheet name: {}", e)))?;

    for (col, name) in results.columns.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, name, &header_format)
            .map_err(|e| Error::Export(format!("header: {}", e)))?;
    }

    for (r, row) in results.rows.iter().enumerate() {
        let excel_row = (r + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            write_cell(worksheet, excel_row, col as u16, cell)
                .map_err(|e| Error::Export(format!("row {}: {}", r + 1, e)))?;
        }
    }

    worksheet.autofit();

    workbook
        .save_to_buffer()
        .map_err(|e| Error::Export(format!("save: {}", e)))
}

fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, cell: &Cell) -> std::result::Result<(), XlsxError> {
    match cell {
        Cell::Empty => {}
        Cell::Text(s) | Cell::DateTime(s) | Cell::Error(s) => {
            worksheet.write_string(row, col, s)?;
        }
        Cell::Int(i) => {
            worksheet.write_number(row, col, *i as f64)?;
        }
        Cell::Float(f) => {
            worksheet.write_number(row, col, *f)?;
        }
        Cell::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResultSet {
        ResultSet {
            columns: vec!["Arkusz".into(), "Ubezpieczony".into(), "Dni".into()],
            rows: vec![
                vec![Cell::text("Sheet1"), Cell::text("Jan 44051401458"), Cell::Int(5)],
                vec![Cell::text("Sheet2"), Cell::Empty, Cell::Bool(true)],
            ],
        }
    }

    #[test]
    fn test_generate_buffer_is_zip() {
        let buffer = generate_results_buffer(&sample(), DEFAULT_SHEET_NAME).unwrap();
        assert!(buffer.len() > 100);
        assert_eq!(&buffer[..2], b"PK");
    }

    #[test]
    fn test_generate_buffer_empty_result() {
        let empty = ResultSet::empty(vec!["Arkusz".into()]);
        assert!(generate_results_buffer(&empty, DEFAULT_SHEET_NAME).is_ok());
    }

    #[test]
    fn test_invalid_sheet_name() {
        let result = generate_results_buffer(&sample(), "bad/name");
        assert!(matches!(result, Err(Error::Export(_))));
    }
}
