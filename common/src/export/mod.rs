//! Export core shared by the CLI and tests.

#[cfg(feature = "excel")]
pub mod excel_core;
