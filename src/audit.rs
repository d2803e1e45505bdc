//! Search audit log
//!
//! One line per search: `YYYY-MM-DD HH:MM:SS;id1,id2;count`. The file is
//! opened in append mode and each line goes out in a single write, so lines
//! from concurrent writers do not interleave. Nothing here truncates or
//! rewrites the file.

use crate::error::Result;
use chrono::{Local, NaiveDateTime};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const FIELD_SEPARATOR: char = ';';
const ID_SEPARATOR: char = ',';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    pub timestamp: NaiveDateTime,
    /// Validated identifiers, in query order
    pub identifiers: Vec<String>,
    pub match_count: usize,
}

impl AuditEntry {
    pub fn new(timestamp: NaiveDateTime, identifiers: Vec<String>, match_count: usize) -> Self {
        Self {
            timestamp,
            identifiers,
            match_count,
        }
    }

    /// Entry stamped with the local wall clock
    pub fn now(identifiers: Vec<String>, match_count: usize) -> Self {
        Self::new(Local::now().naive_local(), identifiers, match_count)
    }

    /// Log line including the trailing newline
    pub fn to_line(&self) -> String {
        format!(
            "{}{sep}{}{sep}{}\n",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.identifiers.join(&ID_SEPARATOR.to_string()),
            self.match_count,
            sep = FIELD_SEPARATOR,
        )
    }

    pub fn parse_line(line: &str) -> Option<Self> {
        let mut fields = line.trim_end_matches(['\r', '\n']).split(FIELD_SEPARATOR);
        let timestamp = NaiveDateTime::parse_from_str(fields.next()?, TIMESTAMP_FORMAT).ok()?;
        let identifiers = fields.next()?;
        let match_count = fields.next()?.trim().parse().ok()?;
        if fields.next().is_some() {
            return None;
        }

        let identifiers = identifiers
            .split(ID_SEPARATOR)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        Some(Self::new(timestamp, identifiers, match_count))
    }
}

#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry. Creates the file if needed.
    pub fn append(&self, entry: &AuditEntry) -> Result<()> {
        let line = entry.to_line();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        file.flush()?;
        debug!(path = %self.path.display(), matches = entry.match_count, "audit entry appended");
        Ok(())
    }

    /// All readable entries. A missing file reads as empty; malformed lines
    /// are skipped with a warning.
    pub fn read_entries(&self) -> Result<Vec<AuditEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        let mut entries = Vec::new();
        for (number, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match AuditEntry::parse_line(line) {
                Some(entry) => entries.push(entry),
                None => warn!(line = number + 1, "skipping malformed audit line"),
            }
        }
        Ok(entries)
    }

    /// Last `n` entries, oldest first
    pub fn tail(&self, n: usize) -> Result<Vec<AuditEntry>> {
        let mut entries = self.read_entries()?;
        let skip = entries.len().saturating_sub(n);
        Ok(entries.split_off(skip))
    }
}
