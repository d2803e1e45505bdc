//! Error types for the core library

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Export error: {0}")]
    Export(String),

    #[error("Result too large for one sheet: {rows} rows x {columns} columns")]
    TooLarge { rows: usize, columns: usize },
}

/// Result alias
pub type Result<T> = std::result::Result<T, Error>;
