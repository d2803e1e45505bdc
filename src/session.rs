//! Operator session
//!
//! Holds everything that lives between actions: the login flag, the current
//! upload, the parsed-workbook cache, the last result set and the pager.
//! A search replaces the result set wholesale; paging never re-runs the
//! pipeline.

use crate::audit::{AuditEntry, AuditLog};
use crate::auth::Credential;
use crate::config::Config;
use crate::error::{Result, SearchError};
use crate::loader::WorkbookCache;
use pszl_common::export::excel_core;
use pszl_common::{match_sheets, Cell, IdentifierBatch, MatchOptions, Pager, Pesel, ResultSet};
use tracing::{info, warn};

/// An uploaded workbook, kept as raw bytes until a search needs it
#[derive(Debug, Clone)]
pub struct Upload {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// What a search action produced
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Every identifier was rejected: nothing matched, nothing logged
    NoValidIdentifiers { invalid: Vec<String> },
    Completed(SearchSummary),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchSummary {
    pub identifiers: Vec<Pesel>,
    pub invalid: Vec<String>,
    pub match_count: usize,
    pub sheets_total: usize,
    /// Sheets without the insured-person column
    pub sheets_skipped: Vec<String>,
    /// Set when the audit entry could not be written
    pub audit_warning: Option<String>,
}

impl SearchSummary {
    /// `Znaleziono 3 rekordów.`
    pub fn message(&self) -> String {
        format!("Znaleziono {} rekordów.", self.match_count)
    }
}

#[derive(Debug)]
pub struct Session {
    authenticated: bool,
    options: MatchOptions,
    export_sheet_name: String,
    audit: AuditLog,
    cache: WorkbookCache,
    upload: Option<Upload>,
    results: Option<ResultSet>,
    pager: Pager,
}

impl Session {
    pub fn new(options: MatchOptions, audit: AuditLog, page_size: usize) -> Self {
        let mut pager = Pager::default();
        pager.set_page_size(page_size);

        Self {
            authenticated: false,
            options,
            export_sheet_name: excel_core::DEFAULT_SHEET_NAME.to_string(),
            audit,
            cache: WorkbookCache::new(),
            upload: None,
            results: None,
            pager,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let mut session = Self::new(
            config.columns.clone(),
            AuditLog::new(&config.audit_log),
            config.default_page_size,
        );
        session.export_sheet_name = config.export_sheet_name.clone();
        session
    }

    /// Check the password once for the whole session
    pub fn login(&mut self, candidate: &str, credential: &Credential) -> Result<()> {
        if credential.verify(candidate) {
            self.authenticated = true;
            info!("operator logged in");
            Ok(())
        } else {
            warn!("rejected login attempt");
            Err(SearchError::Unauthorized)
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    fn ensure_authenticated(&self) -> Result<()> {
        if self.authenticated {
            Ok(())
        } else {
            Err(SearchError::Unauthorized)
        }
    }

    pub fn upload(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        let name = name.into();
        info!(file = %name, size = bytes.len(), "workbook uploaded");
        self.upload = Some(Upload { name, bytes });
    }

    pub fn current_upload(&self) -> Option<&Upload> {
        self.upload.as_ref()
    }

    /// Run the full pipeline for newline-separated identifier text.
    ///
    /// Order of checks: login, upload present, at least one valid identifier,
    /// workbook parses. Only a search that reaches matching is audited.
    pub fn search(&mut self, raw_identifiers: &str) -> Result<SearchOutcome> {
        self.ensure_authenticated()?;

        let upload = self
            .upload
            .as_ref()
            .ok_or_else(|| SearchError::MissingInput("prześlij plik PSZL.xlsx".into()))?;

        let batch = IdentifierBatch::parse(raw_identifiers);
        if !batch.has_valid() {
            self.pager.go_to(1);
            return Ok(SearchOutcome::NoValidIdentifiers {
                invalid: batch.invalid,
            });
        }

        let workbook = self.cache.get_or_load(&upload.bytes)?;
        let valid = batch.valid_set();
        let results = match_sheets(&workbook.sheets, &valid, &self.options);

        let sheets_skipped: Vec<String> = workbook
            .sheets
            .iter()
            .filter(|s| !s.has_column(&self.options.insured_column))
            .map(|s| s.name.clone())
            .collect();

        let match_count = results.len();
        info!(
            identifiers = batch.valid.len(),
            invalid = batch.invalid.len(),
            sheets = workbook.len(),
            skipped = sheets_skipped.len(),
            matches = match_count,
            "search completed"
        );

        let identifiers: Vec<String> = batch.valid.iter().map(|p| p.as_str().to_string()).collect();
        let audit_warning = match self.audit.append(&AuditEntry::now(identifiers, match_count)) {
            Ok(()) => None,
            Err(e) => {
                warn!(path = %self.audit.path().display(), error = %e, "audit log write failed");
                Some(format!("Nie udało się zapisać logu zapytań: {}", e))
            }
        };

        self.pager.reset(match_count);
        self.results = Some(results);

        Ok(SearchOutcome::Completed(SearchSummary {
            identifiers: batch.valid,
            invalid: batch.invalid,
            match_count,
            sheets_total: workbook.len(),
            sheets_skipped,
            audit_warning,
        }))
    }

    pub fn results(&self) -> Option<&ResultSet> {
        self.results.as_ref()
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    /// Rows of the current page
    pub fn current_page(&self) -> Result<&[Vec<Cell>]> {
        let results = self.results.as_ref().ok_or(SearchError::NoResults)?;
        Ok(self.pager.current_slice(&results.rows))
    }

    pub fn next_page(&mut self) -> bool {
        self.pager.next()
    }

    pub fn previous_page(&mut self) -> bool {
        self.pager.previous()
    }

    pub fn go_to_page(&mut self, page: usize) -> usize {
        self.pager.go_to(page)
    }

    pub fn set_page_size(&mut self, page_size: usize) -> usize {
        self.pager.set_page_size(page_size)
    }

    /// Full result set as an xlsx workbook
    pub fn export_bytes(&self) -> Result<Vec<u8>> {
        self.ensure_authenticated()?;
        let results = self.results.as_ref().ok_or(SearchError::NoResults)?;
        Ok(excel_core::generate_results_buffer(results, &self.export_sheet_name)?)
    }

    /// (hits, misses) of the workbook cache
    pub fn cache_stats(&self) -> (usize, usize) {
        self.cache.stats()
    }
}
