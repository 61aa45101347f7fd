//! Settings loading from erp-schema.toml
//!
//! Every setting has a default, so the file is optional. The `DATABASE_URL`
//! environment variable (possibly set through `.env`) wins over the file.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// File looked for in the working directory
pub const SETTINGS_FILE: &str = "erp-schema.toml";

/// Connection settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// `SeaORM` connection URL
    pub database_url: String,
    /// Upper bound of the connection pool
    pub max_connections: u32,
    /// Whether sqlx logs every statement
    pub sqlx_logging: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: "sqlite://data/erp.sqlite?mode=rwc".to_string(),
            max_connections: 5,
            sqlx_logging: false,
        }
    }
}

impl Settings {
    /// Replaces the database URL when `database_url` carries one.
    #[must_use]
    pub fn with_database_url(self, database_url: Option<String>) -> Self {
        match database_url {
            Some(database_url) if !database_url.trim().is_empty() => Self {
                database_url,
                ..self
            },
            _ => self,
        }
    }
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid or names an unknown setting
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read settings file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {SETTINGS_FILE}: {e}"),
    })
}

/// Loads settings from `./erp-schema.toml`, falling back to the defaults when
/// the file does not exist.
pub fn load_default_settings() -> Result<Settings> {
    if Path::new(SETTINGS_FILE).exists() {
        tracing::debug!("Loading settings from {SETTINGS_FILE}");
        load_settings(SETTINGS_FILE)
    } else {
        Ok(Settings::default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_partial_settings() {
        let toml_str = r#"
            database_url = "sqlite://erp-test.sqlite?mode=rwc"
            sqlx_logging = true
        "#;

        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.database_url, "sqlite://erp-test.sqlite?mode=rwc");
        assert!(settings.sqlx_logging);
        assert_eq!(settings.max_connections, 5);
    }

    #[test]
    fn test_unknown_setting_rejected() {
        let result: std::result::Result<Settings, _> = toml::from_str("pool_size = 3");
        assert!(result.is_err());
    }

    #[test]
    fn test_environment_url_wins() {
        let settings = Settings::default()
            .with_database_url(Some("sqlite::memory:".to_string()));
        assert_eq!(settings.database_url, "sqlite::memory:");

        let unchanged = Settings::default().with_database_url(Some("  ".to_string()));
        assert_eq!(unchanged, Settings::default());
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = load_settings("does-not-exist.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
