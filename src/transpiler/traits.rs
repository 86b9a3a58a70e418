//! Backend capability trait and identifier utilities.

use crate::catalog::TypeCategory;
use crate::literal;
use crate::schema::{Column, DataType, Table};
use crate::transpiler::dialect::Dialect;
use crate::transpiler::options::GenerateOptions;

/// SQL reserved words that must be quoted when used as identifiers, and may
/// not be used as table names at all.
pub const RESERVED_WORDS: &[&str] = &[
    "order",
    "group",
    "user",
    "table",
    "select",
    "from",
    "where",
    "join",
    "left",
    "right",
    "inner",
    "outer",
    "full",
    "on",
    "and",
    "or",
    "not",
    "null",
    "true",
    "false",
    "limit",
    "offset",
    "as",
    "in",
    "is",
    "like",
    "between",
    "having",
    "union",
    "all",
    "distinct",
    "case",
    "when",
    "then",
    "else",
    "end",
    "create",
    "alter",
    "drop",
    "insert",
    "update",
    "delete",
    "index",
    "key",
    "primary",
    "foreign",
    "references",
    "default",
    "constraint",
    "check",
    "unique",
    "values",
    "into",
    "set",
];

pub fn is_reserved_word(name: &str) -> bool {
    RESERVED_WORDS.contains(&name.to_lowercase().as_str())
}

/// Whether an identifier part must be quoted to survive as written.
pub fn needs_quoting(name: &str) -> bool {
    name.is_empty()
        || is_reserved_word(name)
        || name.chars().any(|c| !c.is_ascii_alphanumeric() && c != '_')
        || name.chars().next().map(|c| c.is_ascii_digit()).unwrap_or(false)
}

/// Wrap `name` in `quote`, doubling any embedded quote character.
pub fn quote_with(name: &str, quote: char) -> String {
    let doubled: String = [quote, quote].iter().collect();
    format!("{quote}{}{quote}", name.replace(quote, &doubled))
}

/// Extra flags the generation core passes per column.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnContext {
    /// The column is the table's only PRIMARY_KEY, so the keyword is inlined.
    pub inline_primary_key: bool,
    pub include_comments: bool,
}

/// Trait for dialect-specific SQL generation.
///
/// The generation core never branches on [`Dialect`]; every fragment that
/// differs between engines comes through here.
pub trait SqlGenerator: Send + Sync {
    fn dialect(&self) -> Dialect;

    /// Character used to quote identifiers.
    fn quote_char(&self) -> char;

    /// Quote an identifier (table or column name) unconditionally.
    fn quote_identifier(&self, name: &str) -> String {
        quote_with(name, self.quote_char())
    }

    /// Quote only when needed. Dotted identifiers (`table.column`) are
    /// handled part by part.
    fn escape_identifier(&self, name: &str) -> String {
        name.split('.')
            .map(|part| {
                if needs_quoting(part) {
                    self.quote_identifier(part)
                } else {
                    part.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Inverse of [`quote_identifier`](Self::quote_identifier). `None` if the
    /// text is not a well-formed quoted identifier.
    fn unquote_identifier(&self, quoted: &str) -> Option<String> {
        let q = self.quote_char();
        let inner = quoted.strip_prefix(q)?.strip_suffix(q)?;
        let mut out = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            if c == q && chars.next() != Some(q) {
                return None;
            }
            out.push(c);
        }
        Some(out)
    }

    /// Quoted string literal.
    fn escape_string(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    /// Get the boolean literal (TRUE/FALSE vs 1/0).
    fn bool_literal(&self, val: bool) -> String;

    /// Dialect spelling of a known function default, e.g. `NOW()`.
    fn default_function(&self, function: &str) -> Option<String>;

    /// Render a JSON value as a literal for a column of `data_type`.
    fn format_value(&self, value: &serde_json::Value, data_type: Option<DataType>) -> String {
        use serde_json::Value;
        match value {
            Value::Null => "NULL".to_string(),
            Value::Bool(b) => self.bool_literal(*b),
            Value::Number(n) => n.to_string(),
            Value::String(s) => self.format_text(s, data_type),
            Value::Array(_) | Value::Object(_) => self.escape_string(&value.to_string()),
        }
    }

    /// Render user-entered text as a literal, honouring the column category.
    fn format_text(&self, text: &str, data_type: Option<DataType>) -> String {
        match data_type.map(|t| t.category()) {
            Some(TypeCategory::Numeric) if literal::is_decimal(text.trim()) => {
                text.trim().to_string()
            }
            Some(TypeCategory::Boolean) => match literal::parse_bool(text) {
                Some(b) => self.bool_literal(b),
                None => self.escape_string(text),
            },
            _ => self.escape_string(text),
        }
    }

    /// DEFAULT operand for a column, or `None` to omit the clause.
    fn format_default(&self, column: &Column) -> Option<String> {
        let raw = column.default_value_str()?;
        if raw.eq_ignore_ascii_case("null") {
            return Some("NULL".to_string());
        }
        if let Some(function) = literal::default_function(raw) {
            return self
                .default_function(function)
                .or_else(|| Some(self.escape_string(raw)));
        }
        if literal::is_expression(raw) {
            return Some(raw.to_string());
        }
        let value = literal::unquote(raw);
        Some(self.format_text(&value, Some(column.data_type)))
    }

    /// SQL type token for a column.
    fn map_type(&self, column: &Column) -> String;

    /// Full column definition fragment (no trailing comma).
    fn column_definition(&self, column: &Column, ctx: &ColumnContext) -> String;

    /// Possibly qualified, quoted table name.
    fn table_name(&self, name: &str) -> String {
        self.quote_identifier(name)
    }

    /// Options appended after the closing parenthesis (without leading space).
    fn table_options(&self, _table: &Table, _options: &GenerateOptions) -> Option<String> {
        None
    }

    /// Statement that must precede the table definition.
    fn preamble(&self, _has_relationships: bool) -> Option<String> {
        None
    }

    /// Statements appended after the table definition.
    fn trailing_statements(&self, _table: &Table, _options: &GenerateOptions) -> Vec<String> {
        Vec::new()
    }

    fn supports_index_if_not_exists(&self) -> bool {
        true
    }

    fn limit_offset(&self, limit: Option<u64>, offset: Option<u64>) -> String {
        let mut sql = String::new();
        if let Some(n) = limit {
            sql.push_str(&format!(" LIMIT {}", n));
        }
        if let Some(n) = offset {
            sql.push_str(&format!(" OFFSET {}", n));
        }
        sql
    }
}

/// `(p,s)` / `(p)` / empty.
pub fn precision_suffix(column: &Column) -> String {
    match (column.precision, column.scale) {
        (Some(p), Some(s)) => format!("({},{})", p, s),
        (Some(p), None) => format!("({})", p),
        _ => String::new(),
    }
}

/// `NAME(len)` using the explicit length or the catalog default.
pub fn sized(name: &str, column: &Column) -> String {
    match column.length.or(column.data_type.info().default_length) {
        Some(len) => format!("{}({})", name, len),
        None => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_quoting() {
        assert!(!needs_quoting("users"));
        assert!(needs_quoting("order"));
        assert!(needs_quoting("first name"));
        assert!(needs_quoting("1st"));
    }

    #[test]
    fn test_quote_with_doubles_quote_char() {
        assert_eq!(quote_with("a`b", '`'), "`a``b`");
        assert_eq!(quote_with("a\"b", '"'), "\"a\"\"b\"");
    }
}
