//! Cross-sheet matching
//!
//! Each sheet with an insured-person column gets an extracted identifier
//! column; rows whose identifier is in the requested set are kept, tagged
//! with the sheet name and concatenated in sheet order.

use crate::extract::with_extracted_column;
use crate::types::{Cell, ResultSet, Sheet};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const DEFAULT_INSURED_COLUMN: &str = "Ubezpieczony";
pub const DEFAULT_EXTRACTED_COLUMN: &str = "PESEL";
pub const DEFAULT_SOURCE_COLUMN: &str = "Arkusz";

/// Column names used by the matcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    /// Free-text column holding the insured person (name + PESEL)
    pub insured_column: String,
    /// Column added with the extracted identifier
    pub extracted_column: String,
    /// Column prepended with the source sheet name
    pub source_column: String,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            insured_column: DEFAULT_INSURED_COLUMN.to_string(),
            extracted_column: DEFAULT_EXTRACTED_COLUMN.to_string(),
            source_column: DEFAULT_SOURCE_COLUMN.to_string(),
        }
    }
}

/// Rows of one sheet whose extracted identifier is in `valid`.
///
/// The returned sheet carries the extracted column. `None` when the sheet has
/// no insured-person column.
pub fn match_sheet(sheet: &Sheet, valid: &HashSet<String>, options: &MatchOptions) -> Option<Sheet> {
    let mut extracted = with_extracted_column(sheet, &options.insured_column, &options.extracted_column)?;
    let target = extracted.column_index(&options.extracted_column)?;

    extracted.rows.retain(|row| match &row[target] {
        Cell::Text(id) => valid.contains(id),
        _ => false,
    });

    Some(extracted)
}

/// Match every sheet and aggregate the hits.
///
/// Output columns: the source column, then the union of the contributing
/// sheets' columns in first-appearance order. A sheet contributes only when
/// it has at least one hit. With no hits the schema is just the source column.
/// Sheet columns named like the source column are dropped from the output.
pub fn match_sheets<'a, I>(sheets: I, valid: &HashSet<String>, options: &MatchOptions) -> ResultSet
where
    I: IntoIterator<Item = &'a Sheet>,
{
    let hits: Vec<Sheet> = sheets
        .into_iter()
        .filter_map(|sheet| match_sheet(sheet, valid, options))
        .filter(|hit| !hit.is_empty())
        .collect();

    let mut columns = vec![options.source_column.clone()];
    let mut seen: HashSet<&str> = HashSet::from([options.source_column.as_str()]);
    for hit in &hits {
        for column in &hit.columns {
            if seen.insert(column.as_str()) {
                columns.push(column.clone());
            }
        }
    }

    let mut rows = Vec::with_capacity(hits.iter().map(Sheet::len).sum());
    for hit in &hits {
        let mapping: Vec<Option<usize>> = columns[1..]
            .iter()
            .map(|c| hit.column_index(c))
            .collect();

        for row in &hit.rows {
            let mut out = Vec::with_capacity(columns.len());
            out.push(Cell::text(hit.name.as_str()));
            out.extend(
                mapping
                    .iter()
                    .map(|idx| idx.map(|i| row[i].clone()).unwrap_or_default()),
            );
            rows.push(out);
        }
    }

    ResultSet { columns, rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(name: &str, columns: &[&str], rows: &[&[&str]]) -> Sheet {
        Sheet::new(
            name,
            columns.iter().map(|c| c.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| Cell::text(*s)).collect())
                .collect(),
        )
    }

    fn ids(values: &[&str]) -> HashSet<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_match_single_sheet() {
        let s = sheet(
            "Sheet1",
            &["Ubezpieczony", "Data"],
            &[
                &["Jan Kowalski 44051401458", "2024-01-01"],
                &["Anna Nowak 02070803628", "2024-01-02"],
            ],
        );
        let result = match_sheets([&s], &ids(&["44051401458"]), &MatchOptions::default());

        assert_eq!(result.columns, vec!["Arkusz", "Ubezpieczony", "Data", "PESEL"]);
        assert_eq!(result.len(), 1);
        assert_eq!(result.rows[0][0], Cell::text("Sheet1"));
        assert_eq!(result.rows[0][3], Cell::text("44051401458"));
    }

    #[test]
    fn test_match_keeps_sheet_then_row_order() {
        let a = sheet(
            "A",
            &["Ubezpieczony"],
            &[&["x 02070803628"], &["y 44051401458"], &["z 02070803628"]],
        );
        let b = sheet("B", &["Ubezpieczony"], &[&["w 44051401458"]]);
        let result = match_sheets(
            [&a, &b],
            &ids(&["44051401458", "02070803628"]),
            &MatchOptions::default(),
        );

        let tags: Vec<String> = result.rows.iter().map(|r| r[0].as_text()).collect();
        let people: Vec<String> = result.rows.iter().map(|r| r[1].as_text()).collect();
        assert_eq!(tags, vec!["A", "A", "A", "B"]);
        assert_eq!(people, vec!["x 02070803628", "y 44051401458", "z 02070803628", "w 44051401458"]);
    }

    #[test]
    fn test_sheet_without_insured_column_contributes_nothing() {
        let a = sheet("Inne", &["Nazwisko"], &[&["Jan 44051401458"]]);
        let b = sheet("Pusty", &[], &[]);
        let result = match_sheets([&a, &b], &ids(&["44051401458"]), &MatchOptions::default());

        assert!(result.is_empty());
        assert_eq!(result.columns, vec!["Arkusz"]);
    }

    #[test]
    fn test_union_schema_fills_missing_columns() {
        let a = sheet("A", &["Ubezpieczony", "Od"], &[&["x 44051401458", "2024-01-01"]]);
        let b = sheet("B", &["Do", "Ubezpieczony"], &[&["2024-02-01", "y 44051401458"]]);
        let result = match_sheets([&a, &b], &ids(&["44051401458"]), &MatchOptions::default());

        assert_eq!(result.columns, vec!["Arkusz", "Ubezpieczony", "Od", "PESEL", "Do"]);
        assert_eq!(result.rows[0][4], Cell::Empty);
        assert_eq!(result.rows[1][2], Cell::Empty);
        assert_eq!(result.rows[1][4], Cell::text("2024-02-01"));
    }

    #[test]
    fn test_sheet_without_hits_does_not_widen_schema() {
        let a = sheet("A", &["Ubezpieczony", "Od"], &[&["x 44051401458", "2024-01-01"]]);
        let b = sheet("B", &["Ubezpieczony", "Uwagi"], &[&["y 02070803628", "-"]]);
        let result = match_sheets([&a, &b], &ids(&["44051401458"]), &MatchOptions::default());

        assert!(!result.columns.contains(&"Uwagi".to_string()));
    }

    #[test]
    fn test_extracted_value_is_not_checksum_validated() {
        let a = sheet("A", &["Ubezpieczony"], &[&["x 123456789"]]);
        let result = match_sheets([&a], &ids(&["123456789"]), &MatchOptions::default());
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_source_column_collision_is_dropped() {
        let a = sheet("A", &["Arkusz", "Ubezpieczony"], &[&["stary", "x 44051401458"]]);
        let result = match_sheets([&a], &ids(&["44051401458"]), &MatchOptions::default());

        assert_eq!(result.columns, vec!["Arkusz", "Ubezpieczony", "PESEL"]);
        assert_eq!(result.rows[0][0], Cell::text("A"));
    }

    #[test]
    fn test_duplicate_headers_are_all_matched() {
        let raw: Vec<Vec<Cell>> = [
            ["Ubezpieczony", "Data", "Data"],
            ["Jan 44051401458", "2024-01-01", "2024-01-14"],
        ]
        .iter()
        .map(|r| r.iter().map(|s| Cell::text(*s)).collect())
        .collect();
        let a = Sheet::from_raw_rows("Sheet1", raw);
        let result = match_sheets([&a], &ids(&["44051401458"]), &MatchOptions::default());

        assert_eq!(result.columns, vec!["Arkusz", "Ubezpieczony", "Data", "Data (2)", "PESEL"]);
        assert_eq!(result.rows[0][3], Cell::text("2024-01-14"));
    }

    #[test]
    fn test_custom_column_names() {
        let options = MatchOptions {
            insured_column: "Insured".into(),
            extracted_column: "Id".into(),
            source_column: "Sheet".into(),
        };
        let a = sheet("S", &["Insured"], &[&["x 44051401458"]]);
        let result = match_sheets([&a], &ids(&["44051401458"]), &options);
        assert_eq!(result.columns, vec!["Sheet", "Insured", "Id"]);
    }

    #[test]
    fn test_matching_is_idempotent() {
        let a = sheet(
            "A",
            &["Ubezpieczony", "Data"],
            &[&["x 44051401458", "1"], &["y 02070803628", "2"]],
        );
        let valid = ids(&["44051401458", "02070803628"]);
        let first = match_sheets([&a], &valid, &MatchOptions::default());
        let second = match_sheets([&a], &valid, &MatchOptions::default());
        assert_eq!(first, second);
    }
}
