//! PSZL sick-leave search
//!
//! Loads a PSZL workbook, matches its rows against validated PESEL numbers,
//! pages through the hits and exports them, logging each search.

pub mod audit;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod interactive;
pub mod loader;
pub mod render;
pub mod session;

pub use error::{Result, SearchError};
pub use session::{SearchOutcome, SearchSummary, Session};
