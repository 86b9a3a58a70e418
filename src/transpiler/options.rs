//! Generation options.
//!
//! These structs double as the `[generate]`, `[mysql]`, `[postgres]`,
//! `[sqlite]` and `[select]` sections of the TOML config file.

use serde::{Deserialize, Serialize};

/// Options for CREATE TABLE / INSERT generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    pub include_comments: bool,
    pub if_not_exists: bool,
    pub pretty: bool,
    pub mysql: MySqlOptions,
    pub postgres: PostgresOptions,
    pub sqlite: SqliteOptions,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            include_comments: true,
            if_not_exists: true,
            pretty: false,
            mysql: MySqlOptions::default(),
            postgres: PostgresOptions::default(),
            sqlite: SqliteOptions::default(),
        }
    }
}

impl GenerateOptions {
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn if_not_exists(mut self, if_not_exists: bool) -> Self {
        self.if_not_exists = if_not_exists;
        self
    }

    pub fn include_comments(mut self, include_comments: bool) -> Self {
        self.include_comments = include_comments;
        self
    }
}

/// MySQL table options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MySqlOptions {
    pub engine: Option<String>,
    pub charset: Option<String>,
    pub collation: Option<String>,
}

impl Default for MySqlOptions {
    fn default() -> Self {
        Self {
            engine: Some("InnoDB".to_string()),
            charset: Some("utf8mb4".to_string()),
            collation: None,
        }
    }
}

/// PostgreSQL options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostgresOptions {
    /// Schema that qualifies every table name.
    pub schema: Option<String>,
}

/// SQLite options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SqliteOptions {
    /// Emit `STRICT` tables (and strict-compatible type names).
    pub strict: bool,
}

/// Options for the SELECT path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectOptions {
    pub include_aliases: bool,
    pub pretty: bool,
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self {
            include_aliases: true,
            pretty: false,
        }
    }
}
