//! Dialect down-leveling.

use crate::schema::{Column, Constraint, Database, Table};
use crate::transpiler::Dialect;

/// Adapt a table so it is expressible in `dialect`.
///
/// Unsupported types are substituted, length and precision the dialect
/// ignores are stripped, and constraints it cannot express are dropped.
/// Applying it to its own output changes nothing.
pub fn transform_table(table: &Table, dialect: Dialect) -> Table {
    let pk_count = table.primary_key_columns().len();
    let mut out = table.clone();
    out.columns = table
        .columns
        .iter()
        .map(|col| transform_column(&table.name, col, pk_count, dialect))
        .collect();
    out
}

/// [`transform_table`] over every table.
pub fn transform_database(database: &Database, dialect: Dialect) -> Database {
    let mut out = database.clone();
    out.tables = database
        .tables
        .iter()
        .map(|t| transform_table(t, dialect))
        .collect();
    out
}

fn transform_column(table: &str, column: &Column, pk_count: usize, dialect: Dialect) -> Column {
    let mut col = column.clone();

    let target = dialect.substitute(column.data_type);
    if target != column.data_type {
        tracing::debug!(
            table,
            column = %column.name,
            from = %column.data_type,
            to = %target,
            %dialect,
            "substituting type"
        );
        col.data_type = target;
        col.length = dialect.substitute_length(column.data_type, target);
        col.precision = None;
        col.scale = None;
    }
    if !dialect.honors_length(col.data_type) {
        col.length = None;
    }
    if !dialect.honors_precision(col.data_type) {
        col.precision = None;
        col.scale = None;
    }

    col.constraints.retain(|c| dialect.supports_constraint(c));

    // SQLite only accepts AUTOINCREMENT on an INTEGER sole primary key.
    if dialect == Dialect::Sqlite
        && col.is_auto_increment()
        && !(col.data_type.is_integer() && col.is_primary_key() && pk_count == 1)
    {
        tracing::debug!(table, column = %column.name, "dropping AUTO_INCREMENT");
        col.constraints.retain(|c| *c != Constraint::AutoIncrement);
    }

    col
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DataType;
    use crate::validator::validate_table;

    fn portable() -> Table {
        Table::new("t1", "sessions")
            .column(Column::new("c1", "id", DataType::Uuid).primary_key())
            .column(Column::new("c2", "user_id", DataType::BigInt).auto_increment())
            .column(Column::new("c3", "token", DataType::Varchar).length(64))
            .column(Column::new("c4", "amount", DataType::Decimal).precision(10, 2).check("amount >= 0"))
            .column(Column::new("c5", "expires_at", DataType::TimestampTz))
            .column(Column::new("c6", "active", DataType::Bool))
            .column(Column::new("c7", "created", DataType::DateTime))
            .column(Column::new("c8", "payload", DataType::Bytea))
    }

    #[test]
    fn test_mysql_substitutions() {
        let t = transform_table(&portable(), Dialect::MySql);
        assert_eq!(t.columns[0].data_type, DataType::Char);
        assert_eq!(t.columns[0].length, Some(36));
        assert_eq!(t.columns[4].data_type, DataType::Timestamp);
        assert_eq!(t.columns[7].data_type, DataType::Blob);
        assert_eq!(t.columns[3].check_expressions().count(), 0);
        assert_eq!(t.columns[3].precision, Some(10));
    }

    #[test]
    fn test_postgres_substitutions() {
        let t = transform_table(&portable(), Dialect::Postgres);
        assert_eq!(t.columns[0].data_type, DataType::Uuid);
        assert_eq!(t.columns[6].data_type, DataType::Timestamp);
        assert_eq!(t.columns[3].check_expressions().count(), 1);
    }

    #[test]
    fn test_sqlite_substitutions() {
        let t = transform_table(&portable(), Dialect::Sqlite);
        assert_eq!(t.columns[4].data_type, DataType::Text);
        assert_eq!(t.columns[5].data_type, DataType::Boolean);
        assert_eq!(t.columns[2].length, None);
        assert_eq!(t.columns[3].precision, None);
        assert!(!t.columns[1].is_auto_increment());
    }

    #[test]
    fn test_transform_is_idempotent() {
        for dialect in Dialect::ALL {
            let once = transform_table(&portable(), dialect);
            let twice = transform_table(&once, dialect);
            assert_eq!(once, twice, "{}", dialect);
        }
    }

    #[test]
    fn test_transformed_types_validate() {
        for dialect in Dialect::ALL {
            let t = transform_table(&portable(), dialect);
            let report = validate_table(&t, dialect);
            assert!(report.is_valid(), "{}: {:?}", dialect, report.errors);
        }
    }
}
