//! Parsed-workbook cache
//!
//! Keyed by the SHA-256 of the uploaded bytes, so re-running a search on the
//! same upload (or paging through results) never parses the file twice.
//! Entries live for the session; there is no eviction.

use super::load_workbook;
use crate::error::Result;
use pszl_common::Workbook;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Hex SHA-256 of the content
pub fn fingerprint(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

#[derive(Debug, Default)]
pub struct WorkbookCache {
    entries: HashMap<String, Arc<Workbook>>,
    hits: usize,
    misses: usize,
}

impl WorkbookCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parsed workbook for `bytes`, parsing only on the first request.
    /// Parse failures are not cached.
    pub fn get_or_load(&mut self, bytes: &[u8]) -> Result<Arc<Workbook>> {
        let key = fingerprint(bytes);

        if let Some(workbook) = self.entries.get(&key) {
            self.hits += 1;
            debug!(fingerprint = %key, "workbook cache hit");
            return Ok(Arc::clone(workbook));
        }

        self.misses += 1;
        debug!(fingerprint = %key, size = bytes.len(), "workbook cache miss");
        let workbook = Arc::new(load_workbook(bytes)?);
        self.entries.insert(key, Arc::clone(&workbook));
        Ok(workbook)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (hits, misses)
    pub fn stats(&self) -> (usize, usize) {
        (self.hits, self.misses)
    }
}
