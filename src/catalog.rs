//! Type and constraint catalog.
//!
//! Closed lookup tables: what each abstract [`DataType`] accepts, and which
//! types and constraints each [`Dialect`] can express. Consulted by the
//! validator (support checks), the transformer (down-level targets) and the
//! backends (default lengths).

use crate::schema::{Constraint, DataType};
use crate::transpiler::Dialect;
use serde::Serialize;
use std::fmt;

/// Display category of a data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeCategory {
    Numeric,
    String,
    Boolean,
    Temporal,
    Binary,
    Other,
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Numeric => "numeric",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Temporal => "temporal",
            Self::Binary => "binary",
            Self::Other => "other",
        };
        f.write_str(s)
    }
}

/// Static metadata for one data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypeInfo {
    pub category: TypeCategory,
    pub accepts_length: bool,
    pub accepts_precision: bool,
    pub default_length: Option<u32>,
    pub description: &'static str,
}

const fn info(
    category: TypeCategory,
    accepts_length: bool,
    accepts_precision: bool,
    default_length: Option<u32>,
    description: &'static str,
) -> TypeInfo {
    TypeInfo {
        category,
        accepts_length,
        accepts_precision,
        default_length,
        description,
    }
}

use TypeCategory as C;

const TINYINT: TypeInfo = info(C::Numeric, false, false, None, "1-byte integer");
const SMALLINT: TypeInfo = info(C::Numeric, false, false, None, "2-byte integer");
const MEDIUMINT: TypeInfo = info(C::Numeric, false, false, None, "3-byte integer");
const INTEGER: TypeInfo = info(C::Numeric, false, false, None, "4-byte integer");
const BIGINT: TypeInfo = info(C::Numeric, false, false, None, "8-byte integer");
const DECIMAL: TypeInfo = info(C::Numeric, false, true, None, "Exact fixed-point number");
const NUMERIC: TypeInfo = info(C::Numeric, false, true, None, "Exact fixed-point number");
const FLOAT: TypeInfo = info(C::Numeric, false, false, None, "Single-precision floating point");
const DOUBLE: TypeInfo = info(C::Numeric, false, false, None, "Double-precision floating point");
const REAL: TypeInfo = info(C::Numeric, false, false, None, "Floating point");
const CHAR: TypeInfo = info(C::String, true, false, Some(1), "Fixed-length string");
const VARCHAR: TypeInfo = info(C::String, true, false, Some(255), "Variable-length string");
const TEXT: TypeInfo = info(C::String, false, false, None, "Unbounded text");
const MEDIUMTEXT: TypeInfo = info(C::String, false, false, None, "Text up to 16 MiB");
const LONGTEXT: TypeInfo = info(C::String, false, false, None, "Text up to 4 GiB");
const BOOLEAN: TypeInfo = info(C::Boolean, false, false, None, "True/false value");
const BOOL: TypeInfo = info(C::Boolean, false, false, None, "Alias of BOOLEAN");
const DATE: TypeInfo = info(C::Temporal, false, false, None, "Calendar date");
const TIME: TypeInfo = info(C::Temporal, false, false, None, "Time of day");
const DATETIME: TypeInfo = info(C::Temporal, false, false, None, "Date and time without zone");
const TIMESTAMP: TypeInfo = info(C::Temporal, false, false, None, "Point in time");
const TIMESTAMPTZ: TypeInfo = info(C::Temporal, false, false, None, "Point in time with zone");
const YEAR: TypeInfo = info(C::Temporal, false, false, None, "Four-digit year");
const INTERVAL: TypeInfo = info(C::Temporal, false, false, None, "Time span");
const BINARY: TypeInfo = info(C::Binary, true, false, Some(1), "Fixed-length bytes");
const VARBINARY: TypeInfo = info(C::Binary, true, false, Some(255), "Variable-length bytes");
const BLOB: TypeInfo = info(C::Binary, false, false, None, "Binary large object");
const BYTEA: TypeInfo = info(C::Binary, false, false, None, "Byte array");
const JSON: TypeInfo = info(C::Other, false, false, None, "JSON document");
const JSONB: TypeInfo = info(C::Other, false, false, None, "Binary JSON document");
const UUID: TypeInfo = info(C::Other, false, false, None, "128-bit universally unique id");

impl DataType {
    /// Catalog entry for this type.
    pub fn info(&self) -> &'static TypeInfo {
        match self {
            Self::TinyInt => &TINYINT,
            Self::SmallInt => &SMALLINT,
            Self::MediumInt => &MEDIUMINT,
            Self::Integer => &INTEGER,
            Self::BigInt => &BIGINT,
            Self::Decimal => &DECIMAL,
            Self::Numeric => &NUMERIC,
            Self::Float => &FLOAT,
            Self::Double => &DOUBLE,
            Self::Real => &REAL,
            Self::Char => &CHAR,
            Self::Varchar => &VARCHAR,
            Self::Text => &TEXT,
            Self::MediumText => &MEDIUMTEXT,
            Self::LongText => &LONGTEXT,
            Self::Boolean => &BOOLEAN,
            Self::Bool => &BOOL,
            Self::Date => &DATE,
            Self::Time => &TIME,
            Self::DateTime => &DATETIME,
            Self::Timestamp => &TIMESTAMP,
            Self::TimestampTz => &TIMESTAMPTZ,
            Self::Year => &YEAR,
            Self::Interval => &INTERVAL,
            Self::Binary => &BINARY,
            Self::VarBinary => &VARBINARY,
            Self::Blob => &BLOB,
            Self::Bytea => &BYTEA,
            Self::Json => &JSON,
            Self::Jsonb => &JSONB,
            Self::Uuid => &UUID,
        }
    }

    pub fn category(&self) -> TypeCategory {
        self.info().category
    }

    pub fn is_numeric(&self) -> bool {
        self.category() == TypeCategory::Numeric
    }
}

use DataType as T;

const MYSQL_TYPES: &[DataType] = &[
    T::TinyInt,
    T::SmallInt,
    T::MediumInt,
    T::Integer,
    T::BigInt,
    T::Decimal,
    T::Numeric,
    T::Float,
    T::Double,
    T::Real,
    T::Char,
    T::Varchar,
    T::Text,
    T::MediumText,
    T::LongText,
    T::Boolean,
    T::Bool,
    T::Date,
    T::Time,
    T::DateTime,
    T::Timestamp,
    T::Year,
    T::Binary,
    T::VarBinary,
    T::Blob,
    T::Json,
];

const POSTGRES_TYPES: &[DataType] = &[
    T::SmallInt,
    T::Integer,
    T::BigInt,
    T::Decimal,
    T::Numeric,
    T::Float,
    T::Double,
    T::Real,
    T::Char,
    T::Varchar,
    T::Text,
    T::Boolean,
    T::Bool,
    T::Date,
    T::Time,
    T::Timestamp,
    T::TimestampTz,
    T::Interval,
    T::Bytea,
    T::Json,
    T::Jsonb,
    T::Uuid,
];

const SQLITE_TYPES: &[DataType] = &[
    T::TinyInt,
    T::SmallInt,
    T::MediumInt,
    T::Integer,
    T::BigInt,
    T::Decimal,
    T::Numeric,
    T::Float,
    T::Double,
    T::Real,
    T::Char,
    T::Varchar,
    T::Text,
    T::Boolean,
    T::Date,
    T::Time,
    T::DateTime,
    T::Timestamp,
    T::Blob,
    T::Json,
    T::Uuid,
];

impl Dialect {
    /// Exactly the abstract types this dialect accepts.
    pub fn supported_types(&self) -> &'static [DataType] {
        match self {
            Self::MySql => MYSQL_TYPES,
            Self::Postgres => POSTGRES_TYPES,
            Self::Sqlite => SQLITE_TYPES,
        }
    }

    pub fn supports(&self, data_type: DataType) -> bool {
        self.supported_types().contains(&data_type)
    }

    /// Whether a column constraint can be expressed in this dialect.
    pub fn supports_constraint(&self, constraint: &Constraint) -> bool {
        !matches!(
            (self, constraint),
            (Self::MySql, Constraint::Check { .. })
        )
    }

    /// Whether a length attribute on this type reaches the generated SQL.
    pub fn honors_length(&self, data_type: DataType) -> bool {
        *self != Self::Sqlite && data_type.info().accepts_length
    }

    /// Whether precision/scale on this type reaches the generated SQL.
    pub fn honors_precision(&self, data_type: DataType) -> bool {
        *self != Self::Sqlite && data_type.info().accepts_precision
    }

    /// Nearest supported type. Identity for supported types, so repeated
    /// substitution is stable.
    pub fn substitute(&self, data_type: DataType) -> DataType {
        if self.supports(data_type) {
            return data_type;
        }
        match (self, data_type) {
            (Self::MySql, T::TimestampTz) => T::Timestamp,
            (Self::MySql, T::Interval) => T::Varchar,
            (Self::MySql, T::Bytea) => T::Blob,
            (Self::MySql, T::Jsonb) => T::Json,
            (Self::MySql, T::Uuid) => T::Char,

            (Self::Postgres, T::TinyInt) => T::SmallInt,
            (Self::Postgres, T::MediumInt) => T::Integer,
            (Self::Postgres, T::MediumText | T::LongText) => T::Text,
            (Self::Postgres, T::DateTime) => T::Timestamp,
            (Self::Postgres, T::Year) => T::SmallInt,
            (Self::Postgres, T::Binary | T::VarBinary | T::Blob) => T::Bytea,

            (Self::Sqlite, T::MediumText | T::LongText) => T::Text,
            (Self::Sqlite, T::Bool) => T::Boolean,
            (Self::Sqlite, T::TimestampTz | T::Interval) => T::Text,
            (Self::Sqlite, T::Year) => T::Integer,
            (Self::Sqlite, T::Binary | T::VarBinary | T::Bytea) => T::Blob,
            (Self::Sqlite, T::Jsonb) => T::Json,

            // Anything left over degrades to text, which all three accept.
            _ => T::Text,
        }
    }

    /// Length given to a substituted type that needs one (e.g. UUID -> CHAR(36)).
    pub fn substitute_length(&self, from: DataType, to: DataType) -> Option<u32> {
        match (from, to) {
            (T::Uuid, T::Char) => Some(36),
            (T::Interval, T::Varchar) => Some(64),
            _ => None,
        }
    }
}
