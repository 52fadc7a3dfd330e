use serde::{Deserialize, Serialize};
use std::{
    env, fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::ledger::DEFAULT_ACCOUNT;

/// Points at a JSON configuration file; it must exist when set.
pub const CONFIG_ENV: &str = "CASHBOOK_CONFIG";
/// Overrides the database path from any configuration source.
pub const DATABASE_ENV: &str = "CASHBOOK_DB";
/// Configuration picked up from the working directory when present.
pub const LOCAL_CONFIG_FILE: &str = "cashbook.json";
pub const DEFAULT_DATABASE_FILE: &str = "empresa_financeiro.db";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error reading `{path}`: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("Invalid configuration in `{path}`: {message}")]
    Serde { path: PathBuf, message: String },
    #[error("Configuration file `{0}` not found")]
    NotFound(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database_path: PathBuf,
    pub default_account: String,
    pub currency_symbol: String,
    pub plain_output: bool,
    pub chart: ChartSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_FILE),
            default_account: DEFAULT_ACCOUNT.into(),
            currency_symbol: "R$".into(),
            plain_output: false,
            chart: ChartSettings::default(),
        }
    }
}

/// Upper bounds for the balance chart, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub width: u16,
    pub height: u16,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            width: 78,
            height: 14,
        }
    }
}

impl Config {
    /// Resolves configuration from the process environment and working directory.
    pub fn resolve() -> Result<Self, ConfigError> {
        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::resolve_with(
            env::var_os(CONFIG_ENV).map(PathBuf::from),
            env::var_os(DATABASE_ENV).map(PathBuf::from),
            &cwd,
        )
    }

    /// Resolution order: explicit file, `cashbook.json` in `cwd`, defaults.
    /// A database override is applied last.
    pub fn resolve_with(
        config_file: Option<PathBuf>,
        database_override: Option<PathBuf>,
        cwd: &Path,
    ) -> Result<Self, ConfigError> {
        let mut config = match config_file {
            Some(path) if path.exists() => Self::load(&path)?,
            Some(path) => return Err(ConfigError::NotFound(path)),
            None => {
                let local = cwd.join(LOCAL_CONFIG_FILE);
                if local.exists() {
                    Self::load(&local)?
                } else {
                    Self::default()
                }
            }
        };

        if let Some(path) = database_override.filter(|path| !path.as_os_str().is_empty()) {
            config.database_path = path;
        }
        if config.default_account.trim().is_empty() {
            config.default_account = DEFAULT_ACCOUNT.into();
        }
        tracing::debug!(database = %config.database_path.display(), "configuration resolved");
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|err| ConfigError::Serde {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_match_the_legacy_layout() {
        let config = Config::default();
        assert_eq!(config.database_path, PathBuf::from("empresa_financeiro.db"));
        assert_eq!(config.default_account, "Caixa");
        assert_eq!(config.currency_symbol, "R$");
    }

    #[test]
    fn missing_local_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::resolve_with(None, None, dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn local_file_is_partial_and_db_override_wins() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(LOCAL_CONFIG_FILE),
            r#"{ "default_account": "Banco1", "chart": { "width": 40 } }"#,
        )
        .unwrap();

        let config =
            Config::resolve_with(None, Some(dir.path().join("other.db")), dir.path()).unwrap();
        assert_eq!(config.default_account, "Banco1");
        assert_eq!(config.chart.width, 40);
        assert_eq!(config.chart.height, ChartSettings::default().height);
        assert_eq!(config.database_path, dir.path().join("other.db"));
    }

    #[test]
    fn explicit_file_must_exist() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let err = Config::resolve_with(Some(missing.clone()), None, dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(path) if path == missing));
    }

    #[test]
    fn malformed_file_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        let err = Config::resolve_with(Some(path), None, dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Serde { .. }));
    }
}
