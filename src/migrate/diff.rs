//! Schema diff.
//!
//! Reports the differences between two versions of a table or database as a
//! flat list of [`SchemaChange`] values.

use crate::schema::{Column, Constraint, DataType, Database, Table};
use std::fmt;

/// One difference between two schema versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaChange {
    TableAdded {
        table: String,
    },
    TableRemoved {
        table: String,
    },
    TableRenamed {
        from: String,
        to: String,
    },
    ColumnAdded {
        table: String,
        column: String,
    },
    ColumnRemoved {
        table: String,
        column: String,
    },
    ColumnRenamed {
        table: String,
        from: String,
        to: String,
    },
    TypeChanged {
        table: String,
        column: String,
        from: DataType,
        to: DataType,
    },
    NullabilityChanged {
        table: String,
        column: String,
        nullable: bool,
    },
    LengthChanged {
        table: String,
        column: String,
        from: Option<u32>,
        to: Option<u32>,
    },
    PrecisionChanged {
        table: String,
        column: String,
        from: (Option<u32>, Option<u32>),
        to: (Option<u32>, Option<u32>),
    },
    DefaultChanged {
        table: String,
        column: String,
        from: Option<String>,
        to: Option<String>,
    },
    ConstraintAdded {
        table: String,
        column: String,
        constraint: Constraint,
    },
    ConstraintRemoved {
        table: String,
        column: String,
        constraint: Constraint,
    },
}

fn opt<T: fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "none".to_string(),
    }
}

fn precision(value: &(Option<u32>, Option<u32>)) -> String {
    match value {
        (Some(p), Some(s)) => format!("({},{})", p, s),
        (Some(p), None) => format!("({})", p),
        _ => "none".to_string(),
    }
}

impl fmt::Display for SchemaChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TableAdded { table } => write!(f, "Table '{}' added", table),
            Self::TableRemoved { table } => write!(f, "Table '{}' removed", table),
            Self::TableRenamed { from, to } => {
                write!(f, "Table '{}' renamed to '{}'", from, to)
            }
            Self::ColumnAdded { table, column } => {
                write!(f, "Column '{}.{}' added", table, column)
            }
            Self::ColumnRemoved { table, column } => {
                write!(f, "Column '{}.{}' removed", table, column)
            }
            Self::ColumnRenamed { table, from, to } => {
                write!(f, "Column '{}.{}' renamed to '{}'", table, from, to)
            }
            Self::TypeChanged {
                table,
                column,
                from,
                to,
            } => write!(
                f,
                "Column '{}.{}' type changed from {} to {}",
                table, column, from, to
            ),
            Self::NullabilityChanged {
                table,
                column,
                nullable,
            } => write!(
                f,
                "Column '{}.{}' is now {}",
                table,
                column,
                if *nullable { "nullable" } else { "NOT NULL" }
            ),
            Self::LengthChanged {
                table,
                column,
                from,
                to,
            } => write!(
                f,
                "Column '{}.{}' length changed from {} to {}",
                table,
                column,
                opt(from),
                opt(to)
            ),
            Self::PrecisionChanged {
                table,
                column,
                from,
                to,
            } => write!(
                f,
                "Column '{}.{}' precision changed from {} to {}",
                table,
                column,
                precision(from),
                precision(to)
            ),
            Self::DefaultChanged {
                table,
                column,
                from,
                to,
            } => write!(
                f,
                "Column '{}.{}' default changed from {} to {}",
                table,
                column,
                opt(from),
                opt(to)
            ),
            Self::ConstraintAdded {
                table,
                column,
                constraint,
            } => write!(
                f,
                "Column '{}.{}' gained {}",
                table, column, constraint
            ),
            Self::ConstraintRemoved {
                table,
                column,
                constraint,
            } => write!(f, "Column '{}.{}' lost {}", table, column, constraint),
        }
    }
}

/// Pair each column of `old` with its counterpart in `new`: by id first,
/// then by case-insensitive name among the columns not yet claimed.
fn match_columns(old: &Table, new: &Table) -> Vec<Option<usize>> {
    let mut claimed = vec![false; new.columns.len()];
    let mut matches: Vec<Option<usize>> = old
        .columns
        .iter()
        .map(|col| {
            let found = new.columns.iter().position(|c| c.id == col.id);
            if let Some(j) = found {
                claimed[j] = true;
            }
            found
        })
        .collect();

    for (i, col) in old.columns.iter().enumerate() {
        if matches[i].is_some() {
            continue;
        }
        let found = new
            .columns
            .iter()
            .enumerate()
            .position(|(j, c)| !claimed[j] && c.name.eq_ignore_ascii_case(&col.name));
        if let Some(j) = found {
            claimed[j] = true;
            matches[i] = Some(j);
        }
    }
    matches
}

/// Differences from `old` to `new`: table rename, added columns, removed
/// columns, then per-column changes in `old`'s column order.
pub fn diff_tables(old: &Table, new: &Table) -> Vec<SchemaChange> {
    let mut changes = Vec::new();
    let table = new.name.clone();

    if old.name != new.name {
        changes.push(SchemaChange::TableRenamed {
            from: old.name.clone(),
            to: new.name.clone(),
        });
    }

    let matches = match_columns(old, new);

    for (j, col) in new.columns.iter().enumerate() {
        if !matches.contains(&Some(j)) {
            changes.push(SchemaChange::ColumnAdded {
                table: table.clone(),
                column: col.name.clone(),
            });
        }
    }
    for (i, col) in old.columns.iter().enumerate() {
        if matches[i].is_none() {
            changes.push(SchemaChange::ColumnRemoved {
                table: table.clone(),
                column: col.name.clone(),
            });
        }
    }
    for (i, col) in old.columns.iter().enumerate() {
        if let Some(j) = matches[i] {
            diff_column(&table, col, &new.columns[j], &mut changes);
        }
    }

    changes
}

fn diff_column(table: &str, old: &Column, new: &Column, changes: &mut Vec<SchemaChange>) {
    let t = || table.to_string();
    let c = || new.name.clone();

    if old.name != new.name {
        changes.push(SchemaChange::ColumnRenamed {
            table: t(),
            from: old.name.clone(),
            to: new.name.clone(),
        });
    }
    if old.data_type != new.data_type {
        changes.push(SchemaChange::TypeChanged {
            table: t(),
            column: c(),
            from: old.data_type,
            to: new.data_type,
        });
    }
    if old.is_not_null() != new.is_not_null() {
        changes.push(SchemaChange::NullabilityChanged {
            table: t(),
            column: c(),
            nullable: !new.is_not_null(),
        });
    }
    if old.length != new.length {
        changes.push(SchemaChange::LengthChanged {
            table: t(),
            column: c(),
            from: old.length,
            to: new.length,
        });
    }
    if (old.precision, old.scale) != (new.precision, new.scale) {
        changes.push(SchemaChange::PrecisionChanged {
            table: t(),
            column: c(),
            from: (old.precision, old.scale),
            to: (new.precision, new.scale),
        });
    }
    if old.default_value_str() != new.default_value_str() {
        changes.push(SchemaChange::DefaultChanged {
            table: t(),
            column: c(),
            from: old.default_value_str().map(str::to_string),
            to: new.default_value_str().map(str::to_string),
        });
    }
    for constraint in &new.constraints {
        if !old.constraints.contains(constraint) {
            changes.push(SchemaChange::ConstraintAdded {
                table: t(),
                column: c(),
                constraint: constraint.clone(),
            });
        }
    }
    for constraint in &old.constraints {
        if !new.constraints.contains(constraint) {
            changes.push(SchemaChange::ConstraintRemoved {
                table: t(),
                column: c(),
                constraint: constraint.clone(),
            });
        }
    }
}

/// Added tables, removed tables, then [`diff_tables`] for each table present
/// in both. Tables match by id, then by case-insensitive name.
pub fn diff_databases(old: &Database, new: &Database) -> Vec<SchemaChange> {
    let mut claimed = vec![false; new.tables.len()];
    let mut matches: Vec<Option<usize>> = old
        .tables
        .iter()
        .map(|t| {
            let found = new.tables.iter().position(|n| n.id == t.id);
            if let Some(j) = found {
                claimed[j] = true;
            }
            found
        })
        .collect();
    for (i, t) in old.tables.iter().enumerate() {
        if matches[i].is_none() {
            let found = new
                .tables
                .iter()
                .enumerate()
                .position(|(j, n)| !claimed[j] && n.name.eq_ignore_ascii_case(&t.name));
            if let Some(j) = found {
                claimed[j] = true;
                matches[i] = Some(j);
            }
        }
    }

    let mut changes = Vec::new();
    for (j, t) in new.tables.iter().enumerate() {
        if !claimed[j] {
            changes.push(SchemaChange::TableAdded {
                table: t.name.clone(),
            });
        }
    }
    for (i, t) in old.tables.iter().enumerate() {
        if matches[i].is_none() {
            changes.push(SchemaChange::TableRemoved {
                table: t.name.clone(),
            });
        }
    }
    for (i, t) in old.tables.iter().enumerate() {
        if let Some(j) = matches[i] {
            changes.extend(diff_tables(t, &new.tables[j]));
        }
    }
    changes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> Table {
        Table::new("t1", "users")
            .column(Column::new("c1", "id", DataType::Integer).primary_key())
            .column(Column::new("c2", "email", DataType::Varchar).length(100))
            .column(Column::new("c3", "bio", DataType::Text))
    }

    #[test]
    fn test_identical_tables_have_no_changes() {
        assert!(diff_tables(&users(), &users()).is_empty());
    }

    #[test]
    fn test_column_changes_in_order() {
        let mut new = users();
        new.name = "accounts".to_string();
        new.columns[1] = Column::new("c2", "email", DataType::Varchar)
            .length(255)
            .not_null()
            .unique();
        new.columns.remove(2);
        new.columns.push(Column::new("c4", "age", DataType::SmallInt));

        let text: Vec<String> = diff_tables(&users(), &new)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            text,
            vec![
                "Table 'users' renamed to 'accounts'",
                "Column 'accounts.age' added",
                "Column 'accounts.bio' removed",
                "Column 'accounts.email' is now NOT NULL",
                "Column 'accounts.email' length changed from 100 to 255",
                "Column 'accounts.email' gained NOT_NULL",
                "Column 'accounts.email' gained UNIQUE",
            ]
        );
    }

    #[test]
    fn test_columns_match_by_name_when_ids_differ() {
        let mut new = users();
        new.columns[2].id = "other".to_string();
        new.columns[2].data_type = DataType::LongText;
        let changes = diff_tables(&users(), &new);
        assert_eq!(
            changes,
            vec![SchemaChange::TypeChanged {
                table: "users".to_string(),
                column: "bio".to_string(),
                from: DataType::Text,
                to: DataType::LongText,
            }]
        );
    }

    #[test]
    fn test_diff_databases() {
        let posts = Table::new("t2", "posts")
            .column(Column::new("p1", "id", DataType::Integer).primary_key());
        let tags = Table::new("t3", "tags")
            .column(Column::new("g1", "id", DataType::Integer).primary_key());
        let old = Database::new("d", "blog").table(users()).table(posts);
        let new = Database::new("d", "blog").table(users()).table(tags);
        let text: Vec<String> = diff_databases(&old, &new)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(text, vec!["Table 'tags' added", "Table 'posts' removed"]);
    }
}
