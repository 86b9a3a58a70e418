use crate::schema::{Column, DataType, Table};
use crate::transpiler::dialect::Dialect;
use crate::transpiler::options::GenerateOptions;
use crate::transpiler::traits::{ColumnContext, SqlGenerator, precision_suffix};

/// PostgreSQL Generator.
#[derive(Default)]
pub struct PostgresGenerator {
    schema: Option<String>,
}

impl PostgresGenerator {
    pub fn new(schema: Option<String>) -> Self {
        Self {
            schema: schema.filter(|s| !s.trim().is_empty()),
        }
    }
}

impl SqlGenerator for PostgresGenerator {
    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }

    fn quote_char(&self) -> char {
        '"'
    }

    fn bool_literal(&self, val: bool) -> String {
        if val {
            "TRUE".to_string()
        } else {
            "FALSE".to_string()
        }
    }

    fn default_function(&self, function: &str) -> Option<String> {
        let sql = match function {
            "CURRENT_TIMESTAMP" | "CURRENT_TIMESTAMP()" | "NOW()" => "CURRENT_TIMESTAMP",
            "LOCALTIMESTAMP" => "LOCALTIMESTAMP",
            "CURRENT_DATE" => "CURRENT_DATE",
            "CURRENT_TIME" => "CURRENT_TIME",
            "UUID()" | "GEN_RANDOM_UUID()" => "gen_random_uuid()",
            _ => return None,
        };
        Some(sql.to_string())
    }

    fn map_type(&self, column: &Column) -> String {
        if let Some(t) = column.extension_value(Dialect::Postgres, "type") {
            return t.to_string();
        }
        match column.data_type {
            DataType::TinyInt | DataType::SmallInt | DataType::Year => "SMALLINT".to_string(),
            DataType::MediumInt | DataType::Integer => "INTEGER".to_string(),
            DataType::BigInt => "BIGINT".to_string(),
            DataType::Decimal => format!("DECIMAL{}", precision_suffix(column)),
            DataType::Numeric => format!("NUMERIC{}", precision_suffix(column)),
            DataType::Float | DataType::Real => "REAL".to_string(),
            DataType::Double => "DOUBLE PRECISION".to_string(),
            DataType::Char => format!("CHAR({})", column.length.unwrap_or(1)),
            DataType::Varchar => match column.length {
                Some(len) => format!("VARCHAR({})", len),
                None => "VARCHAR".to_string(),
            },
            DataType::Text | DataType::MediumText | DataType::LongText => "TEXT".to_string(),
            DataType::Boolean | DataType::Bool => "BOOLEAN".to_string(),
            DataType::Date => "DATE".to_string(),
            DataType::Time => "TIME".to_string(),
            DataType::DateTime | DataType::Timestamp => "TIMESTAMP".to_string(),
            DataType::TimestampTz => "TIMESTAMPTZ".to_string(),
            DataType::Interval => "INTERVAL".to_string(),
            DataType::Binary | DataType::VarBinary | DataType::Blob | DataType::Bytea => {
                "BYTEA".to_string()
            }
            DataType::Json | DataType::Jsonb => "JSONB".to_string(),
            DataType::Uuid => "UUID".to_string(),
        }
    }

    fn column_definition(&self, column: &Column, ctx: &ColumnContext) -> String {
        let mut parts = vec![self.quote_identifier(&column.name), self.map_type(column)];

        if let Some(collation) = column.extension_value(Dialect::Postgres, "collate") {
            parts.push(format!("COLLATE {}", self.quote_identifier(collation)));
        }
        if column.is_not_null() {
            parts.push("NOT NULL".to_string());
        }
        if let Some(default) = self.format_default(column) {
            parts.push(format!("DEFAULT {}", default));
        }
        // AUTO_INCREMENT has no inline spelling here; the validator warns.
        if ctx.inline_primary_key && column.is_primary_key() {
            parts.push("PRIMARY KEY".to_string());
        }
        if column.is_unique() {
            parts.push("UNIQUE".to_string());
        }
        for expression in column.check_expressions() {
            parts.push(format!("CHECK ({})", expression));
        }
        parts.join(" ")
    }

    fn table_name(&self, name: &str) -> String {
        match &self.schema {
            Some(schema) => format!(
                "{}.{}",
                self.quote_identifier(schema),
                self.quote_identifier(name)
            ),
            None => self.quote_identifier(name),
        }
    }

    fn trailing_statements(&self, table: &Table, options: &GenerateOptions) -> Vec<String> {
        if !options.include_comments {
            return Vec::new();
        }
        let table_name = self.table_name(&table.name);
        let mut stmts = Vec::new();
        if let Some(comment) = &table.comment {
            stmts.push(format!(
                "COMMENT ON TABLE {} IS {};",
                table_name,
                self.escape_string(comment)
            ));
        }
        for column in &table.columns {
            if let Some(comment) = &column.comment {
                stmts.push(format!(
                    "COMMENT ON COLUMN {}.{} IS {};",
                    table_name,
                    self.quote_identifier(&column.name),
                    self.escape_string(comment)
                ));
            }
        }
        stmts
    }
}
