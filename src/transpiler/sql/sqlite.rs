use crate::schema::{Column, DataType, Table};
use crate::transpiler::dialect::Dialect;
use crate::transpiler::options::GenerateOptions;
use crate::transpiler::traits::{ColumnContext, SqlGenerator};

/// SQLite Generator.
#[derive(Default)]
pub struct SqliteGenerator {
    strict: bool,
}

impl SqliteGenerator {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }
}

impl SqlGenerator for SqliteGenerator {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn quote_char(&self) -> char {
        '"'
    }

    fn bool_literal(&self, val: bool) -> String {
        if val {
            "1".to_string()
        } else {
            "0".to_string()
        }
    }

    fn default_function(&self, function: &str) -> Option<String> {
        let sql = match function {
            "CURRENT_TIMESTAMP" | "CURRENT_TIMESTAMP()" | "NOW()" | "LOCALTIMESTAMP" => {
                "CURRENT_TIMESTAMP"
            }
            "CURRENT_DATE" => "CURRENT_DATE",
            "CURRENT_TIME" => "CURRENT_TIME",
            "UUID()" | "GEN_RANDOM_UUID()" => "(lower(hex(randomblob(16))))",
            _ => return None,
        };
        Some(sql.to_string())
    }

    /// Storage-class names. STRICT tables only accept INTEGER, REAL, TEXT,
    /// BLOB and ANY, so NUMERIC degrades to REAL there.
    fn map_type(&self, column: &Column) -> String {
        if let Some(t) = column.extension_value(Dialect::Sqlite, "type") {
            return t.to_string();
        }
        let name = match column.data_type {
            DataType::TinyInt
            | DataType::SmallInt
            | DataType::MediumInt
            | DataType::Integer
            | DataType::BigInt
            | DataType::Boolean
            | DataType::Bool
            | DataType::Year => "INTEGER",
            DataType::Decimal | DataType::Numeric if self.strict => "REAL",
            DataType::Decimal | DataType::Numeric => "NUMERIC",
            DataType::Float | DataType::Double | DataType::Real => "REAL",
            DataType::Char
            | DataType::Varchar
            | DataType::Text
            | DataType::MediumText
            | DataType::LongText
            | DataType::Date
            | DataType::Time
            | DataType::DateTime
            | DataType::Timestamp
            | DataType::TimestampTz
            | DataType::Interval
            | DataType::Json
            | DataType::Jsonb
            | DataType::Uuid => "TEXT",
            DataType::Binary | DataType::VarBinary | DataType::Blob | DataType::Bytea => "BLOB",
        };
        name.to_string()
    }

    fn column_definition(&self, column: &Column, ctx: &ColumnContext) -> String {
        let mut parts = vec![self.quote_identifier(&column.name), self.map_type(column)];

        if let Some(collation) = column.extension_value(Dialect::Sqlite, "collate") {
            parts.push(format!("COLLATE {}", collation));
        }
        if column.is_not_null() {
            parts.push("NOT NULL".to_string());
        }
        if let Some(default) = self.format_default(column) {
            parts.push(format!("DEFAULT {}", default));
        }
        if ctx.inline_primary_key && column.is_primary_key() {
            parts.push("PRIMARY KEY".to_string());
            // Placement was checked by the validator: INTEGER, sole PK.
            if column.is_auto_increment() {
                parts.push("AUTOINCREMENT".to_string());
            }
        }
        for expression in column.check_expressions() {
            parts.push(format!("CHECK ({})", expression));
        }
        parts.join(" ")
    }

    fn table_options(&self, _table: &Table, _options: &GenerateOptions) -> Option<String> {
        self.strict.then(|| "STRICT".to_string())
    }

    fn preamble(&self, has_relationships: bool) -> Option<String> {
        has_relationships.then(|| "PRAGMA foreign_keys = ON;".to_string())
    }

    fn limit_offset(&self, limit: Option<u64>, offset: Option<u64>) -> String {
        match (limit, offset) {
            (None, Some(n)) => format!(" LIMIT -1 OFFSET {}", n),
            (Some(l), Some(n)) => format!(" LIMIT {} OFFSET {}", l, n),
            (Some(l), None) => format!(" LIMIT {}", l),
            (None, None) => String::new(),
        }
    }
}
