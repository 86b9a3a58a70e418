//! Select-query configuration.
//!
//! A [`QueryConfig`] is the state behind an interactive query builder. It is
//! only ever changed through [`QueryConfig::apply`], and is rendered to SQL by
//! [`crate::generate_select`].

mod action;
mod alias;

pub use action::QueryAction;
pub use alias::{auto_alias, resolve_aliases};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Aggregate function applied to a selected column or HAVING condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Aggregate {
    #[default]
    None,
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl Aggregate {
    /// SQL function name, `None` for a plain column.
    pub fn function(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Count => Some("COUNT"),
            Self::Sum => Some("SUM"),
            Self::Avg => Some("AVG"),
            Self::Min => Some("MIN"),
            Self::Max => Some("MAX"),
        }
    }

    pub fn is_some(&self) -> bool {
        !matches!(self, Self::None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JoinKind {
    #[default]
    Inner,
    Left,
    Right,
    Full,
}

impl JoinKind {
    pub fn to_sql(&self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Full => "FULL JOIN",
        }
    }

    /// Same join seen from the other side: LEFT and RIGHT swap.
    pub fn mirrored(&self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            other => *other,
        }
    }
}

/// Comparison operator of a WHERE or HAVING condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Lte,
    #[serde(rename = "LIKE")]
    Like,
    #[serde(rename = "NOT LIKE")]
    NotLike,
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "NOT IN")]
    NotIn,
    #[serde(rename = "IS NULL")]
    IsNull,
    #[serde(rename = "IS NOT NULL")]
    IsNotNull,
}

impl Operator {
    pub fn to_sql(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
            Self::IsNull => "IS NULL",
            Self::IsNotNull => "IS NOT NULL",
        }
    }

    /// Whether the operator takes a right-hand value.
    pub fn takes_value(&self) -> bool {
        !matches!(self, Self::IsNull | Self::IsNotNull)
    }

    /// `IN` / `NOT IN` take a comma-separated list.
    pub fn takes_list(&self) -> bool {
        matches!(self, Self::In | Self::NotIn)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_sql())
    }
}

/// Logical connective joining a condition to the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Connective {
    #[default]
    And,
    Or,
}

impl Connective {
    pub fn to_sql(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn to_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedColumn {
    pub table: String,
    pub column: String,
    #[serde(default)]
    pub aggregate: Aggregate,
    #[serde(default)]
    pub alias: Option<String>,
}

impl SelectedColumn {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            aggregate: Aggregate::None,
            alias: None,
        }
    }

    pub fn aggregate(mut self, aggregate: Aggregate) -> Self {
        self.aggregate = aggregate;
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Explicit alias, ignoring blank text.
    pub fn explicit_alias(&self) -> Option<&str> {
        self.alias.as_deref().map(str::trim).filter(|a| !a.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Join {
    pub left_table: String,
    pub left_column: String,
    pub right_table: String,
    pub right_column: String,
    #[serde(default)]
    pub kind: JoinKind,
}

impl Join {
    pub fn new(
        kind: JoinKind,
        (left_table, left_column): (&str, &str),
        (right_table, right_column): (&str, &str),
    ) -> Self {
        Self {
            left_table: left_table.to_string(),
            left_column: left_column.to_string(),
            right_table: right_table.to_string(),
            right_column: right_column.to_string(),
            kind,
        }
    }

    pub fn references(&self, table: &str) -> bool {
        self.left_table == table || self.right_table == table
    }
}

/// A WHERE or HAVING condition. `aggregate` is only meaningful in HAVING.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub table: String,
    pub column: String,
    pub operator: Operator,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub connective: Connective,
    #[serde(default)]
    pub aggregate: Aggregate,
}

impl Condition {
    pub fn new(
        table: impl Into<String>,
        column: impl Into<String>,
        operator: Operator,
        value: impl Into<String>,
    ) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            operator,
            value: value.into(),
            connective: Connective::And,
            aggregate: Aggregate::None,
        }
    }

    pub fn or(mut self) -> Self {
        self.connective = Connective::Or;
        self
    }

    pub fn aggregate(mut self, aggregate: Aggregate) -> Self {
        self.aggregate = aggregate;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRef {
    pub table: String,
    pub column: String,
}

impl ColumnRef {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub table: String,
    pub column: String,
    #[serde(default)]
    pub direction: Direction,
}

impl OrderBy {
    pub fn new(table: impl Into<String>, column: impl Into<String>, direction: Direction) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            direction,
        }
    }
}

/// Everything needed to assemble one SELECT statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QueryConfig {
    /// Selected tables; the first one is the FROM table.
    pub tables: Vec<String>,
    pub columns: Vec<SelectedColumn>,
    pub joins: Vec<Join>,
    pub filters: Vec<Condition>,
    pub group_by: Vec<ColumnRef>,
    pub having: Vec<Condition>,
    pub order_by: Vec<OrderBy>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl QueryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_table(&self, table: &str) -> bool {
        self.tables.iter().any(|t| t == table)
    }

    pub fn is_grouped(&self, table: &str, column: &str) -> bool {
        self.group_by
            .iter()
            .any(|g| g.table == table && g.column == column)
    }
}
