//! TOML configuration.
//!
//! ```toml
//! dialect = "mysql"
//!
//! [generate]
//! pretty = true
//! if_not_exists = false
//!
//! [mysql]
//! engine = "InnoDB"
//! charset = "utf8mb4"
//!
//! [select]
//! include_aliases = false
//! ```
//!
//! Lookup order: an explicit path, `./schemaforge.toml`, then
//! `<config dir>/schemaforge/config.toml`. Missing files fall back to
//! defaults; an explicit path that does not exist is an error.

use crate::error::{SchemaError, SchemaResult};
use crate::transpiler::{
    Dialect, GenerateOptions, MySqlOptions, PostgresOptions, SelectOptions, SqliteOptions,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const LOCAL_CONFIG: &str = "schemaforge.toml";

/// `[generate]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateSection {
    pub include_comments: bool,
    pub if_not_exists: bool,
    pub pretty: bool,
}

impl Default for GenerateSection {
    fn default() -> Self {
        let defaults = GenerateOptions::default();
        Self {
            include_comments: defaults.include_comments,
            if_not_exists: defaults.if_not_exists,
            pretty: defaults.pretty,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dialect: Dialect,
    pub generate: GenerateSection,
    pub mysql: MySqlOptions,
    pub postgres: PostgresOptions,
    pub sqlite: SqliteOptions,
    pub select: SelectOptions,
}

impl Config {
    /// Load from `explicit`, or from the first config file found.
    pub fn load(explicit: Option<&Path>) -> SchemaResult<Self> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(SchemaError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                Self::from_file(path)
            }
            None => match Self::discover() {
                Some(path) => Self::from_file(&path),
                None => Ok(Self::default()),
            },
        }
    }

    /// First existing file among the default locations.
    pub fn discover() -> Option<PathBuf> {
        let local = PathBuf::from(LOCAL_CONFIG);
        if local.is_file() {
            return Some(local);
        }
        dirs::config_dir()
            .map(|dir| dir.join("schemaforge").join("config.toml"))
            .filter(|path| path.is_file())
    }

    pub fn from_file(path: &Path) -> SchemaResult<Self> {
        tracing::debug!(path = %path.display(), "loading config");
        let content = fs::read_to_string(path)?;
        content.parse()
    }

    /// Generation options assembled from the config sections.
    pub fn generate_options(&self) -> GenerateOptions {
        GenerateOptions {
            include_comments: self.generate.include_comments,
            if_not_exists: self.generate.if_not_exists,
            pretty: self.generate.pretty,
            mysql: self.mysql.clone(),
            postgres: self.postgres.clone(),
            sqlite: self.sqlite.clone(),
        }
    }
}

impl std::str::FromStr for Config {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config: Config = "".parse().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.generate_options(), GenerateOptions::default());
    }

    #[test]
    fn test_parse_sections() {
        let config: Config = r#"
            dialect = "sqlite"

            [generate]
            pretty = true

            [mysql]
            engine = "MyISAM"

            [postgres]
            schema = "app"

            [sqlite]
            strict = true

            [select]
            include_aliases = false
        "#
        .parse()
        .unwrap();

        assert_eq!(config.dialect, Dialect::Sqlite);
        let opts = config.generate_options();
        assert!(opts.pretty);
        assert!(opts.if_not_exists);
        assert_eq!(opts.mysql.engine.as_deref(), Some("MyISAM"));
        assert_eq!(opts.mysql.charset.as_deref(), Some("utf8mb4"));
        assert_eq!(opts.postgres.schema.as_deref(), Some("app"));
        assert!(opts.sqlite.strict);
        assert!(!config.select.include_aliases);
    }

    #[test]
    fn test_bad_dialect_is_error() {
        let err = "dialect = \"oracle\"".parse::<Config>().unwrap_err();
        assert!(matches!(err, SchemaError::Toml(_)));
    }

    #[test]
    fn test_missing_explicit_path_is_error() {
        let err = Config::load(Some(Path::new("/nonexistent/schemaforge.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }
}
