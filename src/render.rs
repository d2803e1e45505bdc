//! Terminal rendering of result pages

use crate::error::Result;
use pszl_common::{Cell, Pager, ResultSet};
use serde::Serialize;

/// Longer cell text is cut and marked with `…`
pub const MAX_CELL_WIDTH: usize = 40;

fn clip(text: &str) -> String {
    let text = text.replace(['\n', '\r'], " ");
    if text.chars().count() <= MAX_CELL_WIDTH {
        text
    } else {
        let mut clipped: String = text.chars().take(MAX_CELL_WIDTH - 1).collect();
        clipped.push('…');
        clipped
    }
}

/// Plain-text table with a header line and a separator
pub fn render_table(columns: &[String], rows: &[Vec<Cell>]) -> String {
    let header: Vec<String> = columns.iter().map(|c| clip(c)).collect();
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|c| clip(&c.as_text())).collect())
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|i| {
            body.iter()
                .filter_map(|r| r.get(i))
                .chain(std::iter::once(&header[i]))
                .map(|s| s.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", c, width = *w))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&line(&header[..]));
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    out.push('\n');
    for row in &body {
        out.push_str(&line(&row[..]));
        out.push('\n');
    }
    out
}

/// Current page with its labels, ready to print
pub fn render_page(results: &ResultSet, pager: &Pager) -> String {
    let rows = pager.current_slice(&results.rows);
    format!(
        "{}\n{}\n\n{}",
        pager.page_label(),
        pager.range_label(),
        render_table(&results.columns, rows)
    )
}

#[derive(Serialize)]
struct JsonPage<'a> {
    page: usize,
    page_size: usize,
    total_pages: usize,
    total: usize,
    columns: &'a [String],
    rows: Vec<Vec<String>>,
}

/// Current page as JSON (cells as text)
pub fn render_page_json(results: &ResultSet, pager: &Pager) -> Result<String> {
    let page = JsonPage {
        page: pager.page(),
        page_size: pager.page_size(),
        total_pages: pager.total_pages(),
        total: pager.total(),
        columns: &results.columns,
        rows: pager
            .current_slice(&results.rows)
            .iter()
            .map(|r| r.iter().map(Cell::as_text).collect())
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&page)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(n: usize) -> ResultSet {
        ResultSet {
            columns: vec!["Arkusz".into(), "Ubezpieczony".into()],
            rows: (0..n)
                .map(|i| vec![Cell::text("Sheet1"), Cell::text(format!("Osoba {}", i))])
                .collect(),
        }
    }

    #[test]
    fn test_render_table_aligns_columns() {
        let table = render_table(
            &["A".to_string(), "Długa".to_string()],
            &[vec![Cell::text("xyz"), Cell::Int(1)]],
        );
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "A   | Długa");
        assert_eq!(lines[1], "----+------");
        assert_eq!(lines[2], "xyz | 1");
    }

    #[test]
    fn test_clip_long_text() {
        let clipped = clip(&"x".repeat(100));
        assert_eq!(clipped.chars().count(), MAX_CELL_WIDTH);
        assert!(clipped.ends_with('…'));
        assert_eq!(clip("a\nb"), "a b");
    }

    #[test]
    fn test_render_page_shows_only_current_rows() {
        let results = sample(12);
        let mut pager = Pager::new(results.len());
        pager.next();
        let text = render_page(&results, &pager);
        assert!(text.starts_with("Strona 2 z 2"));
        assert!(text.contains("Wyświetlane rekordy 11-12 z 12"));
        assert!(text.contains("Osoba 11"));
        assert!(!text.contains("Osoba 9\n"));
    }

    #[test]
    fn test_render_page_json() {
        let results = sample(3);
        let pager = Pager::new(results.len());
        let json = render_page_json(&results, &pager).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total"], 3);
        assert_eq!(value["rows"][2][1], "Osoba 2");
        assert_eq!(value["columns"][0], "Arkusz");
    }
}
