//! Schema and query validation.
//!
//! Checks a schema against a target dialect before any SQL is generated.
//! Findings are split into blocking errors and warnings; nothing is ever
//! repaired here (see [`crate::migrate`] for that).

use crate::literal;
use crate::query::QueryConfig;
use crate::schema::{
    Column, Constraint, DataType, Database, ReferentialAction, Table, find_cycle,
    resolve_relationship, unresolved_relationship,
};
use crate::transpiler::{Dialect, is_reserved_word};
use serde::Serialize;
use std::collections::HashSet;
use strsim::levenshtein;

/// Errors block generation; warnings are advisory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        if !self.warnings.contains(&message) {
            self.warnings.push(message);
        }
    }

    fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        for warning in other.warnings {
            self.warn(warning);
        }
    }
}

/// `^[A-Za-z_][A-Za-z0-9_]*$`
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Validate one table for `dialect`.
///
/// A table without columns yields exactly one error and nothing else.
pub fn validate_table(table: &Table, dialect: Dialect) -> ValidationReport {
    let mut report = ValidationReport::default();

    if table.columns.is_empty() {
        report.error(format!(
            "Table '{}' must have at least one column",
            table.name
        ));
        return report;
    }

    let name = table.name.trim();
    if name.is_empty() {
        report.error(format!("Table '{}' must have a name", table.id));
    } else if !is_valid_identifier(name) {
        report.error(format!(
            "Table name '{}' is invalid: use letters, digits and underscores, starting with a letter or underscore",
            table.name
        ));
    } else if is_reserved_word(name) {
        report.error(format!("Table name '{}' is a reserved word", table.name));
    }

    let mut seen = HashSet::new();
    for column in &table.columns {
        let key = column.name.trim().to_lowercase();
        if !key.is_empty() && !seen.insert(key) {
            report.error(format!(
                "Duplicate column name '{}' in table '{}'",
                column.name, table.name
            ));
        }
    }

    let pk_count = table.primary_key_columns().len();
    for column in &table.columns {
        validate_column(table, column, pk_count, dialect, &mut report);
    }

    match pk_count {
        0 => report.warn(format!("Table '{}' has no primary key", table.name)),
        1 => {}
        _ => {
            let named = table
                .composite_key_name
                .as_deref()
                .is_some_and(|n| !n.trim().is_empty());
            if !named {
                report.warn(format!(
                    "Table '{}' has {} PRIMARY KEY columns; give the composite key a name",
                    table.name, pk_count
                ));
            }
        }
    }

    for index in &table.indexes {
        if index.column_ids.is_empty() {
            report.error(format!("Index '{}' has no columns", index.name));
        }
        for id in &index.column_ids {
            if table.column_by_id(id).is_none() {
                report.error(format!(
                    "Index '{}' references unknown column '{}' in table '{}'",
                    index.name, id, table.name
                ));
            }
        }
    }

    for rel in &table.relationships {
        if rel.source_table_id != table.id {
            report.warn(format!(
                "Relationship '{}' is stored on table '{}' but its source is '{}'; ignored",
                rel.display_name(),
                table.name,
                rel.source_table_id
            ));
            continue;
        }
        if table.column_by_id(&rel.source_column_id).is_none() {
            report.error(format!(
                "Relationship '{}' references unknown column '{}' in table '{}'",
                rel.display_name(),
                rel.source_column_id,
                table.name
            ));
        }
        if dialect == Dialect::MySql
            && (rel.on_delete == ReferentialAction::SetDefault
                || rel.on_update == ReferentialAction::SetDefault)
        {
            report.warn(format!(
                "Relationship '{}': SET DEFAULT is rejected by InnoDB",
                rel.display_name()
            ));
        }
    }

    report
}

fn validate_column(
    table: &Table,
    column: &Column,
    pk_count: usize,
    dialect: Dialect,
    report: &mut ValidationReport,
) {
    let label = format!("{}.{}", table.name, column.name);
    let name = column.name.trim();
    if name.is_empty() {
        report.error(format!(
            "Column '{}' in table '{}' must have a name",
            column.id, table.name
        ));
    } else if !is_valid_identifier(name) {
        report.error(format!(
            "Column name '{}' in table '{}' is invalid: use letters, digits and underscores, starting with a letter or underscore",
            column.name, table.name
        ));
    }

    let data_type = column.data_type;
    if !dialect.supports(data_type) {
        report.error(format!(
            "Column '{}': type {} is not supported by {}",
            label, data_type, dialect
        ));
    }

    if column.nullable && column.constraints.contains(&Constraint::NotNull) {
        report.error(format!(
            "Column '{}' is nullable but carries NOT NULL",
            label
        ));
    }

    if let Some(raw) = column.default_value_str() {
        if !literal::is_valid_default(data_type, raw) {
            report.error(format!(
                "Column '{}': default {} is not a valid {} value",
                label, raw, data_type
            ));
        }
    }

    if column.is_auto_increment() {
        if !data_type.is_numeric() {
            report.error(format!(
                "Column '{}': AUTO_INCREMENT requires a numeric type, found {}",
                label, data_type
            ));
        } else if dialect == Dialect::Sqlite {
            if !(data_type.is_integer() && column.is_primary_key() && pk_count == 1) {
                report.error(format!(
                    "Column '{}': SQLite AUTOINCREMENT is only allowed on an INTEGER column that is the sole PRIMARY KEY",
                    label
                ));
            }
        } else {
            if !column.is_primary_key() {
                report.warn(format!(
                    "Column '{}' has AUTO_INCREMENT without PRIMARY KEY",
                    label
                ));
            }
            if dialect == Dialect::Postgres {
                report.warn(format!(
                    "Column '{}': AUTO_INCREMENT is not emitted for postgres; use an identity column or a sequence",
                    label
                ));
            }
        }
    }

    let ignored = if dialect == Dialect::Sqlite {
        "; sqlite ignores it but other engines need one"
    } else {
        ""
    };
    if data_type == DataType::Varchar && column.length.is_none() {
        report.warn(format!(
            "Column '{}': VARCHAR has no length{}",
            label, ignored
        ));
    }
    if data_type.info().accepts_precision && column.precision.is_none() {
        report.warn(format!(
            "Column '{}': {} has no precision{}",
            label, data_type, ignored
        ));
    }

    if column.check_expressions().next().is_some()
        && !dialect.supports_constraint(&Constraint::Check {
            expression: String::new(),
        })
    {
        report.warn(format!(
            "Column '{}': CHECK constraints are not emitted for {}",
            label, dialect
        ));
    }
}

/// Validate every table plus the cross-table rules: duplicate table names,
/// dangling relationship targets and relationship cycles.
pub fn validate_database(database: &Database, dialect: Dialect) -> ValidationReport {
    let mut report = ValidationReport::default();

    let mut seen = HashSet::new();
    for table in &database.tables {
        let key = table.name.trim().to_lowercase();
        if !key.is_empty() && !seen.insert(key) {
            report.error(format!("Duplicate table name '{}'", table.name));
        }
    }

    for table in &database.tables {
        report.merge(validate_table(table, dialect));

        for rel in table
            .relationships
            .iter()
            .filter(|r| r.source_table_id == table.id)
        {
            // A missing source column is already an error above.
            if table.column_by_id(&rel.source_column_id).is_none() {
                continue;
            }
            if let Err(reason) = resolve_relationship(table, rel, &database.tables) {
                report.warn(unresolved_relationship(rel, &reason));
            }
        }
    }

    if let Some(cycle) = find_cycle(&database.tables) {
        report.warn(format!(
            "Relationship cycle detected: {}",
            cycle.join(" -> ")
        ));
    }

    report
}

/// Structural checks on a select-query configuration.
pub fn validate_query(config: &QueryConfig) -> ValidationReport {
    let mut report = ValidationReport::default();

    if config.tables.is_empty() {
        report.error("Select at least one table");
        return report;
    }

    let check_table = |report: &mut ValidationReport, what: &str, table: &str, column: &str| {
        if !config.has_table(table) {
            report.error(format!(
                "{} '{}.{}' references table '{}', which is not selected",
                what, table, column, table
            ));
        }
    };

    for col in &config.columns {
        check_table(&mut report, "Column", &col.table, &col.column);
    }
    for join in &config.joins {
        if join.left_column.trim().is_empty() || join.right_column.trim().is_empty() {
            report.error(format!(
                "Join between '{}' and '{}' is missing a column",
                join.left_table, join.right_table
            ));
        }
        for table in [&join.left_table, &join.right_table] {
            if !config.has_table(table) {
                report.error(format!(
                    "Join references table '{}', which is not selected",
                    table
                ));
            }
        }
    }
    for cond in &config.filters {
        check_table(&mut report, "Filter", &cond.table, &cond.column);
        if cond.aggregate.is_some() {
            report.error(format!(
                "Filter on '{}.{}' uses an aggregate; move it to HAVING",
                cond.table, cond.column
            ));
        }
    }
    for cond in &config.having {
        check_table(&mut report, "HAVING condition", &cond.table, &cond.column);
    }
    for cond in config.filters.iter().chain(&config.having) {
        if cond.operator.takes_value() && cond.value.trim().is_empty() {
            report.warn(format!(
                "Condition on '{}.{}' has an empty value",
                cond.table, cond.column
            ));
        }
    }
    for group in &config.group_by {
        check_table(&mut report, "GROUP BY column", &group.table, &group.column);
    }
    for order in &config.order_by {
        check_table(&mut report, "ORDER BY column", &order.table, &order.column);
    }

    if !config.group_by.is_empty() {
        for col in &config.columns {
            if !col.aggregate.is_some() && !config.is_grouped(&col.table, &col.column) {
                report.warn(format!(
                    "Column '{}.{}' is neither aggregated nor in GROUP BY",
                    col.table, col.column
                ));
            }
        }
    }

    report
}

/// [`validate_query`] plus existence checks against a schema, with
/// "did you mean" suggestions for misspelled names.
pub fn validate_query_with_schema(config: &QueryConfig, database: &Database) -> ValidationReport {
    let mut report = validate_query(config);
    let table_names: Vec<&str> = database.tables.iter().map(|t| t.name.as_str()).collect();

    let mut refs: Vec<(&str, &str)> = Vec::new();
    refs.extend(config.columns.iter().map(|c| (c.table.as_str(), c.column.as_str())));
    for join in &config.joins {
        refs.push((join.left_table.as_str(), join.left_column.as_str()));
        refs.push((join.right_table.as_str(), join.right_column.as_str()));
    }
    refs.extend(
        config
            .filters
            .iter()
            .chain(&config.having)
            .map(|c| (c.table.as_str(), c.column.as_str())),
    );
    refs.extend(config.group_by.iter().map(|g| (g.table.as_str(), g.column.as_str())));
    refs.extend(config.order_by.iter().map(|o| (o.table.as_str(), o.column.as_str())));

    let mut reported = HashSet::new();
    for table in &config.tables {
        if lookup_table(database, table).is_none() && reported.insert(table.to_lowercase()) {
            report.error(not_found("Table", table, None, &table_names));
        }
    }
    for (table, column) in refs {
        if column.trim().is_empty() {
            continue;
        }
        let Some(schema_table) = lookup_table(database, table) else {
            continue;
        };
        if schema_table.column_by_name(column).is_none()
            && reported.insert(format!("{}.{}", table, column).to_lowercase())
        {
            let columns: Vec<&str> = schema_table.columns.iter().map(|c| c.name.as_str()).collect();
            report.error(not_found("Column", column, Some(table), &columns));
        }
    }

    report
}

fn lookup_table<'a>(database: &'a Database, name: &str) -> Option<&'a Table> {
    database
        .tables
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
}

fn not_found(what: &str, name: &str, table: Option<&str>, candidates: &[&str]) -> String {
    let mut message = match table {
        Some(t) => format!("{} '{}' not found in table '{}'.", what, name, t),
        None => format!("{} '{}' not found.", what, name),
    };
    if let Some(s) = did_you_mean(name, candidates) {
        message.push_str(&format!(" Did you mean '{}'?", s));
    }
    message
}

/// Closest candidate within a length-dependent Levenshtein threshold.
fn did_you_mean(input: &str, candidates: &[&str]) -> Option<String> {
    let threshold = match input.len() {
        0..=2 => 0,
        3..=5 => 2,
        _ => 3,
    };
    candidates
        .iter()
        .map(|c| (levenshtein(&input.to_lowercase(), &c.to_lowercase()), *c))
        .filter(|(dist, _)| *dist <= threshold)
        .min_by_key(|(dist, _)| *dist)
        .map(|(_, c)| c.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{Aggregate, Condition, Join, JoinKind, Operator, SelectedColumn};
    use crate::schema::{Index, Relationship};

    fn users() -> Table {
        Table::new("t1", "users")
            .column(
                Column::new("c1", "id", DataType::Integer)
                    .primary_key()
                    .auto_increment(),
            )
            .column(
                Column::new("c2", "email", DataType::Varchar)
                    .length(255)
                    .not_null()
                    .unique(),
            )
    }

    #[test]
    fn test_valid_table() {
        for dialect in Dialect::ALL {
            let report = validate_table(&users(), dialect);
            assert!(report.is_valid(), "{}: {:?}", dialect, report.errors);
        }
        assert!(validate_table(&users(), Dialect::Sqlite).warnings.is_empty());
    }

    #[test]
    fn test_zero_columns_single_error() {
        let table = Table::new("t1", "order");
        let report = validate_table(&table, Dialect::MySql);
        assert_eq!(
            report.errors,
            vec!["Table 'order' must have at least one column".to_string()]
        );
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_duplicate_columns_case_insensitive() {
        let table = users().column(Column::new("c3", "Email", DataType::Text));
        let report = validate_table(&table, Dialect::Postgres);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("Duplicate column name 'Email'"));
    }

    #[test]
    fn test_reserved_and_malformed_table_names() {
        let mut table = users();
        table.name = "order".to_string();
        assert!(!validate_table(&table, Dialect::MySql).is_valid());
        table.name = "1users".to_string();
        assert!(!validate_table(&table, Dialect::MySql).is_valid());
    }

    #[test]
    fn test_auto_increment_on_text_single_error() {
        let table = Table::new("t1", "notes").column(
            Column::new("c1", "body", DataType::Text)
                .primary_key()
                .auto_increment(),
        );
        for dialect in Dialect::ALL {
            let report = validate_table(&table, dialect);
            assert_eq!(report.errors.len(), 1, "{}: {:?}", dialect, report.errors);
            assert!(report.errors[0].contains("AUTO_INCREMENT requires a numeric type"));
        }
    }

    #[test]
    fn test_sqlite_autoincrement_placement() {
        let table = Table::new("t1", "events").column(
            Column::new("c1", "id", DataType::BigInt).auto_increment(),
        );
        let report = validate_table(&table, Dialect::Sqlite);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("SQLite AUTOINCREMENT"));
        assert!(validate_table(&table, Dialect::MySql).is_valid());
    }

    #[test]
    fn test_unsupported_type_is_error() {
        let table = users().column(Column::new("c3", "token", DataType::Uuid));
        assert!(!validate_table(&table, Dialect::MySql).is_valid());
        assert!(validate_table(&table, Dialect::Postgres).is_valid());
    }

    #[test]
    fn test_nullable_with_not_null() {
        let table = users().column(
            Column::new("c3", "name", DataType::Text).with_constraint(Constraint::NotNull),
        );
        let report = validate_table(&table, Dialect::Postgres);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("nullable but carries NOT NULL"));
    }

    #[test]
    fn test_invalid_default() {
        let table = users().column(
            Column::new("c3", "age", DataType::Integer).default_value("abc"),
        );
        assert!(!validate_table(&table, Dialect::Sqlite).is_valid());
        let table = users().column(
            Column::new("c3", "created", DataType::Timestamp).default_value("CURRENT_TIMESTAMP"),
        );
        assert!(validate_table(&table, Dialect::Sqlite).is_valid());
    }

    #[test]
    fn test_dialect_warnings() {
        let table = users()
            .column(Column::new("c3", "nick", DataType::Varchar))
            .column(Column::new("c4", "price", DataType::Decimal).check("price > 0"));
        let mysql = validate_table(&table, Dialect::MySql);
        assert!(mysql.warnings.iter().any(|w| w.contains("VARCHAR has no length")));
        assert!(mysql.warnings.iter().any(|w| w.contains("CHECK constraints")));
        assert!(mysql.warnings.iter().any(|w| w.contains("DECIMAL has no precision")));

        let pg = validate_table(&users(), Dialect::Postgres);
        assert!(pg.warnings.iter().any(|w| w.contains("AUTO_INCREMENT is not emitted")));

        let sqlite = validate_table(&table, Dialect::Sqlite);
        assert_eq!(
            sqlite.warnings,
            vec![
                "Column 'users.nick': VARCHAR has no length; sqlite ignores it but other engines need one",
                "Column 'users.price': DECIMAL has no precision; sqlite ignores it but other engines need one",
            ]
        );
    }

    #[test]
    fn test_index_unknown_column() {
        let table = users().index(Index::new("i1", "idx_missing", ["c9"]));
        let report = validate_table(&table, Dialect::Postgres);
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn test_database_duplicates_and_dangling() {
        let orders = Table::new("t2", "orders")
            .column(Column::new("o1", "id", DataType::Integer).primary_key())
            .column(Column::new("o2", "user_id", DataType::Integer))
            .relationship(Relationship::new("r1", "fk_orders_user", ("t2", "o2"), ("t9", "c1")));
        let mut dup = users();
        dup.id = "t3".to_string();
        dup.name = "USERS".to_string();
        let db = Database::new("d1", "shop").table(users()).table(orders).table(dup);

        let report = validate_database(&db, Dialect::Postgres);
        assert!(report.errors.contains(&"Duplicate table name 'USERS'".to_string()));
        assert!(
            report
                .warnings
                .contains(&"Relationship 'fk_orders_user' skipped: target table 't9' not found".to_string())
        );
    }

    #[test]
    fn test_database_cycle_warning() {
        let a = Table::new("a", "a")
            .column(Column::new("id", "id", DataType::Integer).primary_key())
            .relationship(Relationship::new("r1", "", ("a", "id"), ("b", "id")));
        let b = Table::new("b", "b")
            .column(Column::new("id", "id", DataType::Integer).primary_key())
            .relationship(Relationship::new("r2", "", ("b", "id"), ("a", "id")));
        let db = Database::new("d", "d").table(a).table(b);
        let report = validate_database(&db, Dialect::Postgres);
        assert!(report.is_valid());
        assert!(
            report
                .warnings
                .contains(&"Relationship cycle detected: a -> b -> a".to_string())
        );
    }

    #[test]
    fn test_query_requires_table() {
        let report = validate_query(&QueryConfig::default());
        assert_eq!(report.errors, vec!["Select at least one table".to_string()]);
    }

    #[test]
    fn test_query_errors() {
        let config = QueryConfig {
            tables: vec!["orders".to_string()],
            columns: vec![SelectedColumn::new("customers", "name")],
            joins: vec![Join::new(JoinKind::Left, ("orders", ""), ("customers", "id"))],
            filters: vec![
                Condition::new("orders", "id", Operator::Gt, "5").aggregate(Aggregate::Count),
            ],
            ..Default::default()
        };
        let report = validate_query(&config);
        assert_eq!(report.errors.len(), 4, "{:?}", report.errors);
    }

    #[test]
    fn test_query_group_by_warning() {
        let config = QueryConfig {
            tables: vec!["orders".to_string()],
            columns: vec![
                SelectedColumn::new("orders", "status"),
                SelectedColumn::new("orders", "id").aggregate(Aggregate::Count),
                SelectedColumn::new("orders", "total"),
            ],
            group_by: vec![crate::query::ColumnRef::new("orders", "status")],
            ..Default::default()
        };
        let report = validate_query(&config);
        assert!(report.is_valid());
        assert_eq!(
            report.warnings,
            vec!["Column 'orders.total' is neither aggregated nor in GROUP BY".to_string()]
        );
    }

    #[test]
    fn test_query_with_schema_suggests() {
        let db = Database::new("d", "d").table(users());
        let config = QueryConfig {
            tables: vec!["usrs".to_string()],
            ..Default::default()
        };
        let report = validate_query_with_schema(&config, &db);
        assert_eq!(
            report.errors,
            vec!["Table 'usrs' not found. Did you mean 'users'?".to_string()]
        );

        let config = QueryConfig {
            tables: vec!["users".to_string()],
            columns: vec![SelectedColumn::new("users", "emial")],
            ..Default::default()
        };
        let report = validate_query_with_schema(&config, &db);
        assert_eq!(
            report.errors,
            vec!["Column 'emial' not found in table 'users'. Did you mean 'email'?".to_string()]
        );
    }
}
