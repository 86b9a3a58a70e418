use crate::schema::{Column, DataType, Table};
use crate::transpiler::dialect::Dialect;
use crate::transpiler::options::{GenerateOptions, MySqlOptions};
use crate::transpiler::traits::{ColumnContext, SqlGenerator, precision_suffix, sized};

/// MySQL Generator.
pub struct MysqlGenerator {
    options: MySqlOptions,
}

impl MysqlGenerator {
    pub fn new(options: MySqlOptions) -> Self {
        Self { options }
    }
}

impl Default for MysqlGenerator {
    fn default() -> Self {
        Self::new(MySqlOptions::default())
    }
}

impl SqlGenerator for MysqlGenerator {
    fn dialect(&self) -> Dialect {
        Dialect::MySql
    }

    fn quote_char(&self) -> char {
        '`'
    }

    // MySQL treats backslash as an escape inside string literals by default.
    fn escape_string(&self, value: &str) -> String {
        format!("'{}'", value.replace('\\', "\\\\").replace('\'', "''"))
    }

    fn bool_literal(&self, val: bool) -> String {
        if val { "1".to_string() } else { "0".to_string() }
    }

    fn default_function(&self, function: &str) -> Option<String> {
        let sql = match function {
            "CURRENT_TIMESTAMP" | "CURRENT_TIMESTAMP()" | "NOW()" | "LOCALTIMESTAMP" => {
                "CURRENT_TIMESTAMP"
            }
            // Expression defaults need parentheses (8.0.13+).
            "CURRENT_DATE" => "(CURRENT_DATE)",
            "CURRENT_TIME" => "(CURRENT_TIME)",
            "UUID()" | "GEN_RANDOM_UUID()" => "(UUID())",
            _ => return None,
        };
        Some(sql.to_string())
    }

    fn map_type(&self, column: &Column) -> String {
        if let Some(t) = column.extension_value(Dialect::MySql, "type") {
            return t.to_string();
        }
        match column.data_type {
            DataType::TinyInt => "TINYINT".to_string(),
            DataType::SmallInt => "SMALLINT".to_string(),
            DataType::MediumInt => "MEDIUMINT".to_string(),
            DataType::Integer => "INT".to_string(),
            DataType::BigInt => "BIGINT".to_string(),
            DataType::Decimal => format!("DECIMAL{}", precision_suffix(column)),
            DataType::Numeric => format!("NUMERIC{}", precision_suffix(column)),
            DataType::Float => "FLOAT".to_string(),
            DataType::Double | DataType::Real => "DOUBLE".to_string(),
            DataType::Char => sized("CHAR", column),
            DataType::Varchar => sized("VARCHAR", column),
            DataType::Text => "TEXT".to_string(),
            DataType::MediumText => "MEDIUMTEXT".to_string(),
            DataType::LongText => "LONGTEXT".to_string(),
            DataType::Boolean | DataType::Bool => "BOOLEAN".to_string(),
            DataType::Date => "DATE".to_string(),
            DataType::Time => "TIME".to_string(),
            DataType::DateTime => "DATETIME".to_string(),
            DataType::Timestamp | DataType::TimestampTz => "TIMESTAMP".to_string(),
            DataType::Year => "YEAR".to_string(),
            DataType::Interval => "VARCHAR(64)".to_string(),
            DataType::Binary => sized("BINARY", column),
            DataType::VarBinary => sized("VARBINARY", column),
            DataType::Blob | DataType::Bytea => "BLOB".to_string(),
            DataType::Json | DataType::Jsonb => "JSON".to_string(),
            DataType::Uuid => "CHAR(36)".to_string(),
        }
    }

    fn column_definition(&self, column: &Column, ctx: &ColumnContext) -> String {
        let mut parts = vec![self.quote_identifier(&column.name), self.map_type(column)];

        if column.data_type.is_numeric()
            && column.extension_value(Dialect::MySql, "unsigned") == Some("true")
        {
            parts.push("UNSIGNED".to_string());
        }
        if let Some(collation) = column.extension_value(Dialect::MySql, "collate") {
            parts.push(format!("COLLATE {}", collation));
        }
        if column.is_not_null() {
            parts.push("NOT NULL".to_string());
        }
        if let Some(default) = self.format_default(column) {
            parts.push(format!("DEFAULT {}", default));
        }
        if let Some(on_update) = column.extension_value(Dialect::MySql, "onUpdate") {
            parts.push(format!("ON UPDATE {}", on_update));
        }
        if column.is_auto_increment() {
            parts.push("AUTO_INCREMENT".to_string());
        }
        if ctx.inline_primary_key && column.is_primary_key() {
            parts.push("PRIMARY KEY".to_string());
        }
        if column.is_unique() {
            parts.push("UNIQUE".to_string());
        }
        if ctx.include_comments {
            if let Some(comment) = &column.comment {
                parts.push(format!("COMMENT {}", self.escape_string(comment)));
            }
        }
        parts.join(" ")
    }

    fn table_options(&self, table: &Table, options: &GenerateOptions) -> Option<String> {
        let mut opts = Vec::new();
        if let Some(engine) = &self.options.engine {
            opts.push(format!("ENGINE={}", engine));
        }
        if let Some(charset) = &self.options.charset {
            opts.push(format!("DEFAULT CHARSET={}", charset));
        }
        if let Some(collation) = &self.options.collation {
            opts.push(format!("COLLATE={}", collation));
        }
        if options.include_comments {
            if let Some(comment) = &table.comment {
                opts.push(format!("COMMENT={}", self.escape_string(comment)));
            }
        }
        if opts.is_empty() { None } else { Some(opts.join(" ")) }
    }

    fn supports_index_if_not_exists(&self) -> bool {
        false
    }

    fn limit_offset(&self, limit: Option<u64>, offset: Option<u64>) -> String {
        // MySQL has no OFFSET without LIMIT.
        match (limit, offset) {
            (None, Some(n)) => format!(" LIMIT 18446744073709551615 OFFSET {}", n),
            (Some(l), Some(n)) => format!(" LIMIT {} OFFSET {}", l, n),
            (Some(l), None) => format!(" LIMIT {}", l),
            (None, None) => String::new(),
        }
    }
}
