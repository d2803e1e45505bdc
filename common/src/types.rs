//! Shared data types
//!
//! - Cell: a typed spreadsheet cell with a canonical text rendering
//! - Sheet: one named tab, header row already promoted to column names
//! - Workbook: sheets in source order
//! - ResultSet: aggregated search output

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Prefix for columns whose header cell was empty (1-based position follows)
pub const UNNAMED_COLUMN_PREFIX: &str = "Kolumna";

/// A single cell value
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Already rendered as `YYYY-MM-DD HH:MM:SS` (or `YYYY-MM-DD` at midnight)
    DateTime(String),
    /// Spreadsheet error literal such as `#N/A`
    Error(String),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Canonical text rendering, used for extraction, display and matching.
    ///
    /// Integral floats render without a fractional part, so a number-typed
    /// `44051401458.0` reads as `44051401458`.
    pub fn as_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) | Cell::DateTime(s) | Cell::Error(s) => s.clone(),
            Cell::Int(i) => i.to_string(),
            Cell::Float(f) => format_float(*f),
            Cell::Bool(b) => b.to_string(),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

fn format_float(value: f64) -> String {
    // 2^53: beyond this an f64 no longer holds every integer exactly
    const EXACT_INT_LIMIT: f64 = 9_007_199_254_740_992.0;
    if value.is_finite() && value.fract() == 0.0 && value.abs() < EXACT_INT_LIMIT {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// One named sheet. `rows[i].len() == columns.len()` for every row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    /// Build a sheet from already-named columns; rows are padded or cut to fit.
    pub fn new(name: impl Into<String>, columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Empty);
                row
            })
            .collect();

        Self {
            name: name.into(),
            columns,
            rows,
        }
    }

    /// Build a sheet from raw rows, promoting the first row to column names.
    ///
    /// The header row is consumed. Empty header cells get positional names
    /// (`Kolumna 3`), and data wider than the header gets the same treatment.
    pub fn from_raw_rows(name: impl Into<String>, raw: Vec<Vec<Cell>>) -> Self {
        let mut raw = raw.into_iter();
        let header = match raw.next() {
            Some(header) => header,
            None => return Self::new(name, Vec::new(), Vec::new()),
        };
        let data: Vec<Vec<Cell>> = raw.collect();

        let width = data
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(header.len()))
            .max()
            .unwrap_or(0);

        let labels: Vec<String> = (0..width)
            .map(|i| {
                let label = header.get(i).map(|c| c.as_text()).unwrap_or_default();
                let label = label.trim();
                if label.is_empty() {
                    format!("{} {}", UNNAMED_COLUMN_PREFIX, i + 1)
                } else {
                    label.to_string()
                }
            })
            .collect();

        Self::new(name, unique_column_names(labels), data)
    }

    /// Index of the column with this name. Promoted headers are unique.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let col = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(col))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Repeated header labels get a positional suffix: `Data`, `Data (2)`.
///
/// A generated name never takes a label that appears verbatim in the header.
fn unique_column_names(labels: Vec<String>) -> Vec<String> {
    let reserved: HashSet<String> = labels.iter().cloned().collect();
    let mut taken: HashSet<String> = HashSet::with_capacity(labels.len());

    labels
        .into_iter()
        .map(|label| {
            if taken.insert(label.clone()) {
                return label;
            }
            let mut n = 2;
            loop {
                let candidate = format!("{} ({})", label, n);
                if !reserved.contains(&candidate) && taken.insert(candidate.clone()) {
                    return candidate;
                }
                n += 1;
            }
        })
        .collect()
}

/// Parsed workbook: sheets in the order they appear in the source file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

/// Aggregated search output. Row indices are dense and 0-based.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl ResultSet {
    /// An empty result carrying only the given columns
    pub fn empty(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows as column-name -> text pairs, in column order
    pub fn text_rows(&self) -> Vec<Vec<(&str, String)>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .zip(row)
                    .map(|(c, v)| (c.as_str(), v.as_text()))
                    .collect()
            })
            .collect()
    }

    /// View the result as a sheet, e.g. for export
    pub fn to_sheet(&self, name: impl Into<String>) -> Sheet {
        Sheet::new(name, self.columns.clone(), self.rows.clone())
    }
}
