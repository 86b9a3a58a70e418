use crate::error::SchemaError;
use crate::transpiler::options::GenerateOptions;
use crate::transpiler::sql::mysql::MysqlGenerator;
use crate::transpiler::sql::postgres::PostgresGenerator;
use crate::transpiler::sql::sqlite::SqliteGenerator;
use crate::transpiler::traits::SqlGenerator;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported SQL Dialects.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// MySQL / MariaDB family.
    MySql,
    #[default]
    Postgres,
    Sqlite,
}

impl Dialect {
    pub const ALL: [Dialect; 3] = [Self::MySql, Self::Postgres, Self::Sqlite];

    /// Backend with default options.
    pub fn generator(&self) -> Box<dyn SqlGenerator> {
        self.generator_for(&GenerateOptions::default())
    }

    /// Backend configured from generation options.
    pub fn generator_for(&self, options: &GenerateOptions) -> Box<dyn SqlGenerator> {
        match self {
            Dialect::MySql => Box::new(MysqlGenerator::new(options.mysql.clone())),
            Dialect::Postgres => Box::new(PostgresGenerator::new(options.postgres.schema.clone())),
            Dialect::Sqlite => Box::new(SqliteGenerator::new(options.sqlite.strict)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dialect::MySql => "mysql",
            Dialect::Postgres => "postgres",
            Dialect::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Dialect {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Self::MySql),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            _ => Err(SchemaError::UnknownDialect(s.to_string())),
        }
    }
}
