//! PSZL search core
//!
//! PESEL validation, identifier extraction, cross-sheet matching and paging,
//! shared by the CLI and its tests.

pub mod types;
pub mod error;
pub mod pesel;
pub mod extract;
pub mod matcher;
pub mod pager;
pub mod export;

pub use types::{Cell, ResultSet, Sheet, Workbook};
pub use error::{Error, Result};
pub use pesel::{validate, IdentifierBatch, Pesel};
pub use extract::{extract_identifier, with_extracted_column};
pub use matcher::{match_sheet, match_sheets, MatchOptions};
pub use pager::{total_pages, Pager};
