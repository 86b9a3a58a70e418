//! Error types for schemaforge.

use thiserror::Error;

/// Internal faults raised while assembling SQL, plus the I/O and decoding
/// failures of the configuration layer.
///
/// Generation entry points never return this type directly: they convert it
/// into a single blocking message on [`crate::GeneratedSql::errors`].
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A table id or name could not be resolved.
    #[error("Unknown table: '{0}'")]
    UnknownTable(String),

    /// A column id could not be resolved inside its table.
    #[error("Unknown column '{column}' in table '{table}'")]
    UnknownColumn { table: String, column: String },

    /// The select-query configuration cannot be assembled.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Unknown dialect tag.
    #[error("Unknown dialect: '{0}'. Expected: mysql, postgres, or sqlite")]
    UnknownDialect(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML decoding error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl SchemaError {
    /// Create an unknown column error.
    pub fn unknown_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::UnknownColumn {
            table: table.into(),
            column: column.into(),
        }
    }
}

/// Result type alias for schemaforge operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SchemaError::unknown_column("users", "col_9");
        assert_eq!(err.to_string(), "Unknown column 'col_9' in table 'users'");

        let err = SchemaError::UnknownDialect("oracle".into());
        assert_eq!(
            err.to_string(),
            "Unknown dialect: 'oracle'. Expected: mysql, postgres, or sqlite"
        );
    }
}
