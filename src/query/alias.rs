//! Output-name aliasing for selected columns.

use super::{Aggregate, QueryConfig, SelectedColumn};
use std::collections::{HashMap, HashSet};

/// `table_column`, or `func_table_column` for aggregates.
pub fn auto_alias(column: &SelectedColumn) -> String {
    match column.aggregate.function() {
        Some(func) => format!(
            "{}_{}_{}",
            func.to_lowercase(),
            column.table,
            column.column
        ),
        None => format!("{}_{}", column.table, column.column),
    }
}

/// Name the engine would give the expression without an alias.
fn natural_name(column: &SelectedColumn) -> (Aggregate, String) {
    (column.aggregate, column.column.to_lowercase())
}

/// Alias for every selected column, in selection order.
///
/// Explicit aliases always win. Columns without one that would render to
/// the same output name as another (same column name, or same function and
/// column name) all get [`auto_alias`], as does a plain column whose name
/// is taken by an explicit alias. Remaining aggregates get
/// [`auto_alias`] too; remaining plain columns get none. With
/// `include_aliases` off no alias is emitted at all.
pub fn resolve_aliases(config: &QueryConfig, include_aliases: bool) -> Vec<Option<String>> {
    if !include_aliases {
        return vec![None; config.columns.len()];
    }

    let mut counts: HashMap<(Aggregate, String), usize> = HashMap::new();
    for col in config.columns.iter().filter(|c| c.explicit_alias().is_none()) {
        *counts.entry(natural_name(col)).or_default() += 1;
    }
    let taken: HashSet<String> = config
        .columns
        .iter()
        .filter_map(|c| c.explicit_alias())
        .map(|a| a.to_lowercase())
        .collect();

    config
        .columns
        .iter()
        .map(|col| {
            if let Some(alias) = col.explicit_alias() {
                return Some(alias.to_string());
            }
            let (aggregate, name) = natural_name(col);
            let collides = (!aggregate.is_some() && taken.contains(&name))
                || counts.get(&(aggregate, name)).copied().unwrap_or(0) > 1;
            (collides || col.aggregate.is_some()).then(|| auto_alias(col))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(columns: Vec<SelectedColumn>) -> QueryConfig {
        QueryConfig {
            columns,
            ..Default::default()
        }
    }

    #[test]
    fn test_colliding_columns_get_table_prefix() {
        let cfg = config(vec![
            SelectedColumn::new("orders", "id"),
            SelectedColumn::new("customers", "id"),
            SelectedColumn::new("customers", "name"),
        ]);
        assert_eq!(
            resolve_aliases(&cfg, true),
            vec![
                Some("orders_id".to_string()),
                Some("customers_id".to_string()),
                None
            ]
        );
    }

    #[test]
    fn test_aggregate_gets_function_alias() {
        let cfg = config(vec![
            SelectedColumn::new("orders", "id").aggregate(Aggregate::Count),
            SelectedColumn::new("orders", "id"),
        ]);
        assert_eq!(
            resolve_aliases(&cfg, true),
            vec![Some("count_orders_id".to_string()), None]
        );
    }

    #[test]
    fn test_explicit_alias_wins() {
        let cfg = config(vec![
            SelectedColumn::new("orders", "id").alias("order_id"),
            SelectedColumn::new("customers", "id"),
        ]);
        assert_eq!(
            resolve_aliases(&cfg, true),
            vec![Some("order_id".to_string()), None]
        );
    }

    #[test]
    fn test_explicit_alias_claims_its_name() {
        let cfg = config(vec![
            SelectedColumn::new("orders", "customer_id").alias("ID"),
            SelectedColumn::new("customers", "id"),
            SelectedColumn::new("customers", "name"),
        ]);
        assert_eq!(
            resolve_aliases(&cfg, true),
            vec![
                Some("ID".to_string()),
                Some("customers_id".to_string()),
                None
            ]
        );
    }

    #[test]
    fn test_aliases_disabled() {
        let cfg = config(vec![
            SelectedColumn::new("orders", "id").aggregate(Aggregate::Sum),
        ]);
        assert_eq!(resolve_aliases(&cfg, false), vec![None]);
    }
}
