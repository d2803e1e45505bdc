use crate::auth::Credential;
use crate::error::{Result, SearchError};
use pszl_common::export::excel_core::DEFAULT_SHEET_NAME;
use pszl_common::pager::DEFAULT_PAGE_SIZE;
use pszl_common::MatchOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Secret for the shared operator credential
pub const PASSWORD_ENV: &str = "PSZL_ADMIN_PASSWORD";
/// Overrides `audit_log`
pub const AUDIT_LOG_ENV: &str = "PSZL_AUDIT_LOG";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Append-only search log
    pub audit_log: PathBuf,
    pub default_page_size: usize,
    pub export_file_name: String,
    pub export_sheet_name: String,
    pub columns: MatchOptions,
    /// SHA-256 hex digest of the operator password
    pub admin_password_sha256: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            audit_log: PathBuf::from("query_logs.csv"),
            default_page_size: DEFAULT_PAGE_SIZE,
            export_file_name: "wyniki_zwolnienia.xlsx".into(),
            export_sheet_name: DEFAULT_SHEET_NAME.into(),
            columns: MatchOptions::default(),
            admin_password_sha256: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            serde_json::from_str(&content)?
        } else {
            Self::default()
        };

        config.apply_env();
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SearchError::Config("nie znaleziono katalogu domowego".into()))?;
        Ok(home.join(".config").join("pszl-search").join("config.json"))
    }

    fn apply_env(&mut self) {
        if let Ok(path) = std::env::var(AUDIT_LOG_ENV) {
            if !path.trim().is_empty() {
                self.audit_log = PathBuf::from(path);
            }
        }
    }

    /// Operator credential: the environment wins over the stored digest
    pub fn credential(&self) -> Result<Credential> {
        if let Ok(secret) = std::env::var(PASSWORD_ENV) {
            if !secret.is_empty() {
                return Ok(Credential::from_secret(&secret));
            }
        }

        match &self.admin_password_sha256 {
            Some(digest) => Credential::from_hex_digest(digest),
            None => Err(SearchError::MissingCredential),
        }
    }

    pub fn set_password(&mut self, secret: &str) -> Result<()> {
        if secret.is_empty() {
            return Err(SearchError::Config("hasło nie może być puste".into()));
        }
        self.admin_password_sha256 = Some(Credential::from_secret(secret).hex_digest());
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default_page_size, 10);
        assert_eq!(config.audit_log, PathBuf::from("query_logs.csv"));
        assert_eq!(config.columns.insured_column, "Ubezpieczony");
        assert_eq!(config.export_file_name, "wyniki_zwolnienia.xlsx");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"default_page_size": 25}"#).unwrap();
        assert_eq!(config.default_page_size, 25);
        assert_eq!(config.export_sheet_name, "Wyniki");
        assert!(config.admin_password_sha256.is_none());
    }

    #[test]
    fn test_stored_digest_credential() {
        let config = Config {
            admin_password_sha256: Some(Credential::from_secret("sekret").hex_digest()),
            ..Default::default()
        };
        // the env override is only checked when set; tests do not set it
        if std::env::var(PASSWORD_ENV).is_err() {
            assert!(config.credential().unwrap().verify("sekret"));
        }
    }
}
