//! Abstract column types, constraints and relationship tags.
//!
//! Every dialect reads from this one closed vocabulary. Nothing here knows
//! how a type is spelled in a concrete engine; that is the job of the
//! dialect backends in [`crate::transpiler::sql`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dialect-agnostic column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataType {
    TinyInt,
    SmallInt,
    MediumInt,
    Integer,
    BigInt,
    Decimal,
    Numeric,
    Float,
    Double,
    Real,
    Char,
    Varchar,
    Text,
    MediumText,
    LongText,
    Boolean,
    /// Alias spelling of BOOLEAN.
    Bool,
    Date,
    Time,
    DateTime,
    Timestamp,
    /// TIMESTAMP WITH TIME ZONE
    TimestampTz,
    Year,
    Interval,
    Binary,
    VarBinary,
    Blob,
    Bytea,
    Json,
    Jsonb,
    Uuid,
}

impl DataType {
    /// Every variant, in declaration order.
    pub const ALL: [DataType; 31] = [
        Self::TinyInt,
        Self::SmallInt,
        Self::MediumInt,
        Self::Integer,
        Self::BigInt,
        Self::Decimal,
        Self::Numeric,
        Self::Float,
        Self::Double,
        Self::Real,
        Self::Char,
        Self::Varchar,
        Self::Text,
        Self::MediumText,
        Self::LongText,
        Self::Boolean,
        Self::Bool,
        Self::Date,
        Self::Time,
        Self::DateTime,
        Self::Timestamp,
        Self::TimestampTz,
        Self::Year,
        Self::Interval,
        Self::Binary,
        Self::VarBinary,
        Self::Blob,
        Self::Bytea,
        Self::Json,
        Self::Jsonb,
        Self::Uuid,
    ];

    /// Upper-case name used in messages and diffs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TinyInt => "TINYINT",
            Self::SmallInt => "SMALLINT",
            Self::MediumInt => "MEDIUMINT",
            Self::Integer => "INTEGER",
            Self::BigInt => "BIGINT",
            Self::Decimal => "DECIMAL",
            Self::Numeric => "NUMERIC",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::Real => "REAL",
            Self::Char => "CHAR",
            Self::Varchar => "VARCHAR",
            Self::Text => "TEXT",
            Self::MediumText => "MEDIUMTEXT",
            Self::LongText => "LONGTEXT",
            Self::Boolean => "BOOLEAN",
            Self::Bool => "BOOL",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::DateTime => "DATETIME",
            Self::Timestamp => "TIMESTAMP",
            Self::TimestampTz => "TIMESTAMPTZ",
            Self::Year => "YEAR",
            Self::Interval => "INTERVAL",
            Self::Binary => "BINARY",
            Self::VarBinary => "VARBINARY",
            Self::Blob => "BLOB",
            Self::Bytea => "BYTEA",
            Self::Json => "JSON",
            Self::Jsonb => "JSONB",
            Self::Uuid => "UUID",
        }
    }

    /// Integer family (the only family SQLite accepts AUTOINCREMENT on).
    pub const fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::TinyInt | Self::SmallInt | Self::MediumInt | Self::Integer | Self::BigInt
        )
    }

    /// DECIMAL / NUMERIC.
    pub const fn is_exact_decimal(&self) -> bool {
        matches!(self, Self::Decimal | Self::Numeric)
    }

    pub const fn is_boolean(&self) -> bool {
        matches!(self, Self::Boolean | Self::Bool)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse a type name as written by a user (`varchar`, `int`, `bool`...).
impl std::str::FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        let found = match upper.as_str() {
            "INT" => Some(Self::Integer),
            "FLOAT8" | "DOUBLE PRECISION" => Some(Self::Double),
            "TIMESTAMP WITH TIME ZONE" => Some(Self::TimestampTz),
            other => Self::ALL.iter().copied().find(|t| t.name() == other),
        };
        found.ok_or_else(|| format!("unknown data type '{}'", s))
    }
}

/// Column-level constraint tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Constraint {
    PrimaryKey,
    Unique,
    NotNull,
    AutoIncrement,
    /// Descriptive marker; FOREIGN KEY clauses are driven by relationships.
    ForeignKey,
    Check { expression: String },
    /// Descriptive marker; the DEFAULT clause is driven by `Column::default`.
    Default,
}

impl Constraint {
    /// Tag without payload, for messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::PrimaryKey => "PRIMARY_KEY",
            Self::Unique => "UNIQUE",
            Self::NotNull => "NOT_NULL",
            Self::AutoIncrement => "AUTO_INCREMENT",
            Self::ForeignKey => "FOREIGN_KEY",
            Self::Check { .. } => "CHECK",
            Self::Default => "DEFAULT",
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Check { expression } => write!(f, "CHECK ({})", expression),
            other => f.write_str(other.label()),
        }
    }
}

/// Relationship cardinality. Descriptive only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Cardinality {
    OneToOne,
    #[default]
    OneToMany,
    ManyToMany,
}

/// ON DELETE / ON UPDATE action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReferentialAction {
    Cascade,
    Restrict,
    SetNull,
    SetDefault,
    #[default]
    NoAction,
}

impl ReferentialAction {
    pub fn to_sql(&self) -> &'static str {
        match self {
            Self::Cascade => "CASCADE",
            Self::Restrict => "RESTRICT",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
            Self::NoAction => "NO ACTION",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_data_type() {
        assert_eq!("varchar".parse::<DataType>(), Ok(DataType::Varchar));
        assert_eq!("INT".parse::<DataType>(), Ok(DataType::Integer));
        assert_eq!(" timestamptz ".parse::<DataType>(), Ok(DataType::TimestampTz));
        assert!("money".parse::<DataType>().is_err());
    }

    #[test]
    fn test_serde_tags() {
        let json = serde_json::to_string(&DataType::MediumText).unwrap();
        assert_eq!(json, "\"MEDIUMTEXT\"");

        let c: Constraint = serde_json::from_str("\"PRIMARY_KEY\"").unwrap();
        assert_eq!(c, Constraint::PrimaryKey);

        let c: Constraint =
            serde_json::from_str(r#"{"CHECK":{"expression":"age > 0"}}"#).unwrap();
        assert_eq!(c.to_string(), "CHECK (age > 0)");
    }
}
