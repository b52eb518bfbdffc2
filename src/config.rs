//! Support for library configuration options
//!
//! Configuration is read from a TOML file (see [`Config::load`]), then
//! selectively overridden from the environment. Every key has a hard-coded
//! default, so running without any configuration at all is fine

use std::env;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// The file [`Config::load`] reads when no explicit path is given
pub const DEFAULT_CONFIG_FILE: &str = "headcount.toml";

/// Where events are stored when the configuration does not say otherwise
pub const DEFAULT_DATABASE_URL: &str = "sqlite://headcount.db";

/// The URL of a private, non-persistent database
pub const MEMORY_DATABASE_URL: &str = "sqlite::memory:";

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// The whole crate configuration
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
}

/// Where and how to open the event database.
///
/// This is the `[database]` table of the configuration file. The URL carries
/// the whole connection description; there are no separate credential keys
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// A `sqlite:` URL, either a file path or [`MEMORY_DATABASE_URL`]
    pub url: String,
    /// Upper bound of the connection pool
    pub max_connections: u32,
    /// Degrade to an in-memory store when the URL cannot be opened,
    /// instead of returning an error
    pub fallback_to_memory: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            fallback_to_memory: false,
        }
    }
}

impl Config {
    /// Load the configuration.
    ///
    /// Reads `path` (or [`DEFAULT_CONFIG_FILE`] when `None`) if such a file
    /// exists, then applies the `HEADCOUNT_DATABASE_URL` and
    /// `HEADCOUNT_FALLBACK_TO_MEMORY` environment overrides. A missing file is
    /// not an error, a file that does not parse is
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        let mut config = if path.exists() {
            let text = std::fs::read_to_string(path)?;
            let config = Self::from_toml(&text).map_err(|source| Error::Config {
                path: path.to_path_buf(),
                source,
            })?;
            log::info!("Loaded database configuration from {:?}", path);
            config
        } else {
            log::info!("No configuration file at {:?}, using the default configuration", path);
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse a configuration document. Missing keys get their defaults
    pub fn from_toml(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = env::var("HEADCOUNT_DATABASE_URL") {
            self.database.url = url;
        }
        if let Ok(value) = env::var("HEADCOUNT_FALLBACK_TO_MEMORY") {
            match value.parse() {
                Ok(toggle) => self.database.fallback_to_memory = toggle,
                Err(_) => log::warn!("Ignoring non-boolean HEADCOUNT_FALLBACK_TO_MEMORY value {:?}", value),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    #[test]
    fn defaults_need_no_file() {
        let config = Config::default();
        assert_eq!(config.database.url, "sqlite://headcount.db");
        assert_eq!(config.database.max_connections, 5);
        assert!(!config.database.fallback_to_memory);
    }

    #[test]
    fn partial_files_keep_defaults_for_the_rest() {
        let config = Config::from_toml(
            r#"
            [database]
            url = "sqlite:///var/lib/headcount/events.db"
            "#,
        )
        .unwrap();
        assert_eq!(config.database.url, "sqlite:///var/lib/headcount/events.db");
        assert_eq!(config.database.max_connections, 5);
        assert!(!config.database.fallback_to_memory);
    }

    #[test]
    fn full_files_override_everything() {
        let config = Config::from_toml(
            r#"
            [database]
            url = "sqlite::memory:"
            max_connections = 1
            fallback_to_memory = true
            "#,
        )
        .unwrap();
        assert_eq!(config.database.url, MEMORY_DATABASE_URL);
        assert_eq!(config.database.max_connections, 1);
        assert!(config.database.fallback_to_memory);
    }

    #[test]
    fn garbage_does_not_parse() {
        assert!(Config::from_toml("[database").is_err());
        assert!(Config::from_toml("[database]\nmax_connections = \"lots\"").is_err());
    }

    #[test]
    fn loading_a_missing_file_is_not_an_error() {
        let config = Config::load(Some(Path::new("/nonexistent/headcount.toml"))).unwrap();
        assert_eq!(config.database.url, DEFAULT_DATABASE_URL);
    }

    #[test]
    fn loading_reads_the_given_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[database]\nurl = \"sqlite://from-file.db\"").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.database.url, "sqlite://from-file.db");
    }

    #[test]
    fn loading_an_unparseable_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "this is not TOML at all [").unwrap();

        let error = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(error, Error::Config { .. }));
    }
}
