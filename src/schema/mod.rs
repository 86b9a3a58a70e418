//! Schema model.
//!
//! Plain data: columns, tables, indexes, relationships and databases, with
//! builder helpers. Behavior lives in the validator, the transformer and the
//! transpiler; this module only answers structural lookups.

pub mod graph;
pub mod types;

pub use graph::{dependency_order, find_cycle};
pub use types::{Cardinality, Constraint, DataType, ReferentialAction};

use crate::transpiler::Dialect;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of a table's data snapshot: column id -> value.
pub type Row = BTreeMap<String, serde_json::Value>;

fn default_true() -> bool {
    true
}

/// A column definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: DataType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,
    #[serde(default = "default_true")]
    pub nullable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default)]
    pub constraints: Vec<Constraint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Per-dialect overrides, read only by the matching backend.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extensions: BTreeMap<Dialect, BTreeMap<String, String>>,
}

impl Column {
    /// A nullable column without constraints.
    pub fn new(id: impl Into<String>, name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            data_type,
            length: None,
            precision: None,
            scale: None,
            nullable: true,
            default: None,
            constraints: Vec::new(),
            comment: None,
            extensions: BTreeMap::new(),
        }
    }

    pub fn length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    /// Set precision and scale.
    pub fn precision(mut self, precision: u32, scale: u32) -> Self {
        self.precision = Some(precision);
        self.scale = Some(scale);
        self
    }

    /// Mark as PRIMARY_KEY (and therefore not nullable).
    pub fn primary_key(mut self) -> Self {
        self.nullable = false;
        self.with_constraint(Constraint::PrimaryKey)
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self.with_constraint(Constraint::NotNull)
    }

    pub fn unique(self) -> Self {
        self.with_constraint(Constraint::Unique)
    }

    pub fn auto_increment(self) -> Self {
        self.with_constraint(Constraint::AutoIncrement)
    }

    pub fn check(self, expression: impl Into<String>) -> Self {
        self.with_constraint(Constraint::Check {
            expression: expression.into(),
        })
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Attach a dialect-specific override.
    pub fn extension(
        mut self,
        dialect: Dialect,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.extensions
            .entry(dialect)
            .or_default()
            .insert(key.into(), value.into());
        self
    }

    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn has(&self, constraint: &Constraint) -> bool {
        self.constraints.contains(constraint)
    }

    pub fn is_primary_key(&self) -> bool {
        self.has(&Constraint::PrimaryKey)
    }

    pub fn is_unique(&self) -> bool {
        self.has(&Constraint::Unique)
    }

    pub fn is_auto_increment(&self) -> bool {
        self.has(&Constraint::AutoIncrement)
    }

    /// Whether generated DDL must carry NOT NULL.
    pub fn is_not_null(&self) -> bool {
        !self.nullable || self.has(&Constraint::NotNull) || self.is_primary_key()
    }

    pub fn check_expressions(&self) -> impl Iterator<Item = &str> {
        self.constraints.iter().filter_map(|c| match c {
            Constraint::Check { expression } => Some(expression.as_str()),
            _ => None,
        })
    }

    /// The default value, or `None` when absent or blank.
    pub fn default_value_str(&self) -> Option<&str> {
        self.default
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    /// Look up a dialect-specific override.
    pub fn extension_value(&self, dialect: Dialect, key: &str) -> Option<&str> {
        self.extensions
            .get(&dialect)
            .and_then(|bag| bag.get(key))
            .map(String::as_str)
    }
}

/// A secondary index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Index {
    pub id: String,
    pub name: String,
    pub column_ids: Vec<String>,
    #[serde(default)]
    pub unique: bool,
}

impl Index {
    pub fn new<I, S>(id: impl Into<String>, name: impl Into<String>, column_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            name: name.into(),
            column_ids: column_ids.into_iter().map(Into::into).collect(),
            unique: false,
        }
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }
}

/// A foreign-key relationship, owned by its source table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub source_table_id: String,
    pub source_column_id: String,
    pub target_table_id: String,
    pub target_column_id: String,
    #[serde(default)]
    pub cardinality: Cardinality,
    #[serde(default)]
    pub on_delete: ReferentialAction,
    #[serde(default)]
    pub on_update: ReferentialAction,
}

impl Relationship {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        source: (&str, &str),
        target: (&str, &str),
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            source_table_id: source.0.to_string(),
            source_column_id: source.1.to_string(),
            target_table_id: target.0.to_string(),
            target_column_id: target.1.to_string(),
            cardinality: Cardinality::default(),
            on_delete: ReferentialAction::default(),
            on_update: ReferentialAction::default(),
        }
    }

    pub fn on_delete(mut self, action: ReferentialAction) -> Self {
        self.on_delete = action;
        self
    }

    pub fn on_update(mut self, action: ReferentialAction) -> Self {
        self.on_update = action;
        self
    }

    pub fn cardinality(mut self, cardinality: Cardinality) -> Self {
        self.cardinality = cardinality;
        self
    }

    /// Name used in messages; falls back to the id.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

/// A table definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
    #[serde(default)]
    pub indexes: Vec<Index>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Explicit name for a composite primary key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composite_key_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            columns: Vec::new(),
            relationships: Vec::new(),
            indexes: Vec::new(),
            comment: None,
            composite_key_name: None,
            rows: Vec::new(),
        }
    }

    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn relationship(mut self, relationship: Relationship) -> Self {
        self.relationships.push(relationship);
        self
    }

    pub fn index(mut self, index: Index) -> Self {
        self.indexes.push(index);
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn composite_key_name(mut self, name: impl Into<String>) -> Self {
        self.composite_key_name = Some(name.into());
        self
    }

    pub fn row(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }

    pub fn column_by_id(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Case-insensitive lookup by name.
    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn primary_key_columns(&self) -> Vec<&Column> {
        self.columns.iter().filter(|c| c.is_primary_key()).collect()
    }
}

/// A database: the full table collection relationships resolve against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Database {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tables: Vec<Table>,
}

impl Database {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tables: Vec::new(),
        }
    }

    pub fn table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }

    pub fn table_by_id(&self, id: &str) -> Option<&Table> {
        find_table(&self.tables, id)
    }
}

/// Find a table by id in a table list.
pub fn find_table<'a>(tables: &'a [Table], id: &str) -> Option<&'a Table> {
    tables.iter().find(|t| t.id == id)
}

/// Both ends of a relationship, resolved to names.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedRelationship<'a> {
    pub source_column: &'a Column,
    pub target_table: &'a Table,
    pub target_column: &'a Column,
}

/// Resolve a relationship owned by `table` against the database-wide table
/// list. A self-reference resolves even when `tables` omits `table`.
///
/// The error is a human-readable reason.
pub fn resolve_relationship<'a>(
    table: &'a Table,
    relationship: &Relationship,
    tables: &'a [Table],
) -> Result<ResolvedRelationship<'a>, String> {
    let source_column = table
        .column_by_id(&relationship.source_column_id)
        .ok_or_else(|| {
            format!(
                "source column '{}' not found in table '{}'",
                relationship.source_column_id, table.name
            )
        })?;
    let target_table = find_table(tables, &relationship.target_table_id)
        .or_else(|| (relationship.target_table_id == table.id).then_some(table))
        .ok_or_else(|| format!("target table '{}' not found", relationship.target_table_id))?;
    let target_column = target_table
        .column_by_id(&relationship.target_column_id)
        .ok_or_else(|| {
            format!(
                "target column '{}' not found in table '{}'",
                relationship.target_column_id, target_table.name
            )
        })?;
    Ok(ResolvedRelationship {
        source_column,
        target_table,
        target_column,
    })
}

/// Warning text for a relationship whose FOREIGN KEY clause is skipped.
pub fn unresolved_relationship(relationship: &Relationship, reason: &str) -> String {
    format!(
        "Relationship '{}' skipped: {}",
        relationship.display_name(),
        reason
    )
}
