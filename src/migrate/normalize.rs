//! Canonical form for schemas.

use crate::schema::{Column, Constraint, Database, Table};

fn trimmed(value: &str) -> String {
    value.trim().to_string()
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Trim identifiers, drop duplicate constraints (first one wins), and make
/// every PRIMARY_KEY column NOT_NULL and non-nullable.
pub fn normalize_table(table: &Table) -> Table {
    let mut out = table.clone();
    out.name = trimmed(&table.name);
    out.composite_key_name = non_blank(&table.composite_key_name);
    out.columns = table.columns.iter().map(normalize_column).collect();
    for index in &mut out.indexes {
        index.name = trimmed(&index.name);
    }
    for rel in &mut out.relationships {
        rel.name = trimmed(&rel.name);
    }
    out
}

fn normalize_column(column: &Column) -> Column {
    let mut col = column.clone();
    col.name = trimmed(&column.name);
    col.default = non_blank(&column.default);

    col.constraints.clear();
    for constraint in &column.constraints {
        if !col.constraints.contains(constraint) {
            col.constraints.push(constraint.clone());
        }
    }

    if col.is_primary_key() {
        col.nullable = false;
        if !col.constraints.contains(&Constraint::NotNull) {
            col.constraints.push(Constraint::NotNull);
        }
    }
    col
}

/// [`normalize_table`] over every table, trimming the database name too.
pub fn normalize_database(database: &Database) -> Database {
    let mut out = database.clone();
    out.name = trimmed(&database.name);
    out.tables = database.tables.iter().map(normalize_table).collect();
    out
}
