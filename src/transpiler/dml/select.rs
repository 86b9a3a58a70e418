//! SELECT SQL generation.

use crate::error::{SchemaError, SchemaResult};
use crate::literal;
use crate::query::{Aggregate, Condition, QueryConfig, resolve_aliases};
use crate::transpiler::options::SelectOptions;
use crate::transpiler::traits::SqlGenerator;

/// Build a SELECT statement from a query configuration.
///
/// Assumes the configuration already passed query validation; anything that
/// still cannot be assembled is an [`SchemaError::InvalidQuery`].
pub fn build_select(
    config: &QueryConfig,
    generator: &dyn SqlGenerator,
    options: &SelectOptions,
) -> SchemaResult<String> {
    let from = config
        .tables
        .first()
        .ok_or_else(|| SchemaError::InvalidQuery("no tables selected".to_string()))?;

    let mut clauses = Vec::new();

    let aliases = resolve_aliases(config, options.include_aliases);
    let select_list = if config.columns.is_empty() {
        "*".to_string()
    } else {
        config
            .columns
            .iter()
            .zip(&aliases)
            .map(|(col, alias)| {
                let expr = aggregate_expr(generator, col.aggregate, &col.table, &col.column);
                match alias {
                    Some(a) => format!("{} AS {}", expr, generator.escape_identifier(a)),
                    None => expr,
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    };
    clauses.push(format!("SELECT {}", select_list));
    clauses.push(format!("FROM {}", generator.escape_identifier(from)));

    let mut joined: Vec<&str> = vec![from.as_str()];
    for join in &config.joins {
        let (table, kind) = if !joined.contains(&join.right_table.as_str()) {
            (&join.right_table, join.kind)
        } else if !joined.contains(&join.left_table.as_str()) {
            (&join.left_table, join.kind.mirrored())
        } else {
            return Err(SchemaError::InvalidQuery(format!(
                "join between '{}' and '{}' would join a table twice",
                join.left_table, join.right_table
            )));
        };
        joined.push(table);
        clauses.push(format!(
            "{} {} ON {} = {}",
            kind.to_sql(),
            generator.escape_identifier(table),
            column_ref(generator, &join.left_table, &join.left_column),
            column_ref(generator, &join.right_table, &join.right_column)
        ));
    }
    // Selected tables no join reaches.
    for table in &config.tables {
        if !joined.contains(&table.as_str()) {
            joined.push(table);
            clauses.push(format!("CROSS JOIN {}", generator.escape_identifier(table)));
        }
    }

    if !config.filters.is_empty() {
        clauses.push(format!(
            "WHERE {}",
            conditions(generator, &config.filters, false)
        ));
    }
    if !config.group_by.is_empty() {
        let cols: Vec<String> = config
            .group_by
            .iter()
            .map(|g| column_ref(generator, &g.table, &g.column))
            .collect();
        clauses.push(format!("GROUP BY {}", cols.join(", ")));
    }
    if !config.having.is_empty() {
        clauses.push(format!(
            "HAVING {}",
            conditions(generator, &config.having, true)
        ));
    }
    if !config.order_by.is_empty() {
        let cols: Vec<String> = config
            .order_by
            .iter()
            .map(|o| {
                format!(
                    "{} {}",
                    column_ref(generator, &o.table, &o.column),
                    o.direction.to_sql()
                )
            })
            .collect();
        clauses.push(format!("ORDER BY {}", cols.join(", ")));
    }

    let limit = generator.limit_offset(config.limit, config.offset);
    if !limit.is_empty() {
        clauses.push(limit.trim_start().to_string());
    }

    let separator = if options.pretty { "\n" } else { " " };
    Ok(format!("{};", clauses.join(separator)))
}

/// `table.column`, each part escaped only when needed.
fn column_ref(generator: &dyn SqlGenerator, table: &str, column: &str) -> String {
    format!(
        "{}.{}",
        generator.escape_identifier(table),
        generator.escape_identifier(column)
    )
}

fn aggregate_expr(
    generator: &dyn SqlGenerator,
    aggregate: Aggregate,
    table: &str,
    column: &str,
) -> String {
    let col = column_ref(generator, table, column);
    match aggregate.function() {
        Some(func) => format!("{}({})", func, col),
        None => col,
    }
}

/// Conditions joined by each entry's connective; the first one's is ignored.
fn conditions(generator: &dyn SqlGenerator, conds: &[Condition], having: bool) -> String {
    let mut sql = String::new();
    for (i, cond) in conds.iter().enumerate() {
        if i > 0 {
            sql.push(' ');
            sql.push_str(cond.connective.to_sql());
            sql.push(' ');
        }
        let lhs = if having {
            aggregate_expr(generator, cond.aggregate, &cond.table, &cond.column)
        } else {
            column_ref(generator, &cond.table, &cond.column)
        };
        sql.push_str(&lhs);
        sql.push(' ');
        sql.push_str(cond.operator.to_sql());
        if cond.operator.takes_list() {
            let items: Vec<String> = cond
                .value
                .split(',')
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| operand(generator, v))
                .collect();
            sql.push_str(&format!(" ({})", items.join(", ")));
        } else if cond.operator.takes_value() {
            sql.push(' ');
            sql.push_str(&operand(generator, cond.value.trim()));
        }
    }
    sql
}

/// Numbers stay bare, `true`/`false` use the dialect literal, everything
/// else is a string literal. Quoted values and zero-padded digits such as
/// `01234` are strings.
fn operand(generator: &dyn SqlGenerator, value: &str) -> String {
    if literal::is_decimal(value) && !literal::has_leading_zero(value) {
        return value.to_string();
    }
    if value.eq_ignore_ascii_case("true") {
        return generator.bool_literal(true);
    }
    if value.eq_ignore_ascii_case("false") {
        return generator.bool_literal(false);
    }
    generator.escape_string(&literal::unquote(value))
}
