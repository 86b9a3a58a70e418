//! Pure reducer over [`QueryConfig`].

use super::{Aggregate, ColumnRef, Condition, Join, OrderBy, QueryConfig, SelectedColumn};

/// A single edit to a query configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryAction {
    /// Select the table, or deselect it together with everything that
    /// references it.
    ToggleTable(String),
    /// Add a plain column, or remove every selection of it.
    ToggleColumn { table: String, column: String },
    /// Append a selection as-is (e.g. the same column twice with different
    /// aggregates).
    AddColumn(SelectedColumn),
    RemoveColumn(usize),
    SetAggregate {
        table: String,
        column: String,
        aggregate: Aggregate,
    },
    SetAlias {
        table: String,
        column: String,
        alias: Option<String>,
    },
    AddJoin(Join),
    RemoveJoin(usize),
    AddFilter(Condition),
    RemoveFilter(usize),
    AddHaving(Condition),
    RemoveHaving(usize),
    ToggleGroupBy { table: String, column: String },
    AddOrderBy(OrderBy),
    RemoveOrderBy(usize),
    SetLimit(Option<u64>),
    SetOffset(Option<u64>),
    Reset,
}

impl QueryConfig {
    /// Apply one action and return the new configuration.
    ///
    /// Out-of-range indexes are ignored.
    pub fn apply(mut self, action: QueryAction) -> QueryConfig {
        match action {
            QueryAction::ToggleTable(table) => {
                if self.has_table(&table) {
                    self.remove_table(&table);
                } else {
                    self.tables.push(table);
                }
            }
            QueryAction::ToggleColumn { table, column } => {
                let before = self.columns.len();
                self.columns
                    .retain(|c| !(c.table == table && c.column == column));
                if self.columns.len() == before {
                    self.select_table(&table);
                    self.columns.push(SelectedColumn::new(table, column));
                }
            }
            QueryAction::AddColumn(selected) => {
                self.select_table(&selected.table);
                self.columns.push(selected);
            }
            QueryAction::RemoveColumn(idx) => remove_at(&mut self.columns, idx),
            QueryAction::SetAggregate {
                table,
                column,
                aggregate,
            } => {
                for c in self.columns_mut(&table, &column) {
                    c.aggregate = aggregate;
                }
            }
            QueryAction::SetAlias {
                table,
                column,
                alias,
            } => {
                for c in self.columns_mut(&table, &column) {
                    c.alias = alias.clone();
                }
            }
            QueryAction::AddJoin(join) => self.joins.push(join),
            QueryAction::RemoveJoin(idx) => remove_at(&mut self.joins, idx),
            QueryAction::AddFilter(cond) => self.filters.push(cond),
            QueryAction::RemoveFilter(idx) => remove_at(&mut self.filters, idx),
            QueryAction::AddHaving(cond) => self.having.push(cond),
            QueryAction::RemoveHaving(idx) => remove_at(&mut self.having, idx),
            QueryAction::ToggleGroupBy { table, column } => {
                if self.is_grouped(&table, &column) {
                    self.group_by
                        .retain(|g| !(g.table == table && g.column == column));
                } else {
                    self.group_by.push(ColumnRef::new(table, column));
                }
            }
            QueryAction::AddOrderBy(order) => self.order_by.push(order),
            QueryAction::RemoveOrderBy(idx) => remove_at(&mut self.order_by, idx),
            QueryAction::SetLimit(limit) => self.limit = limit,
            QueryAction::SetOffset(offset) => self.offset = offset,
            QueryAction::Reset => return QueryConfig::default(),
        }
        self
    }

    fn select_table(&mut self, table: &str) {
        if !self.has_table(table) {
            self.tables.push(table.to_string());
        }
    }

    fn remove_table(&mut self, table: &str) {
        self.tables.retain(|t| t != table);
        self.columns.retain(|c| c.table != table);
        self.joins.retain(|j| !j.references(table));
        self.filters.retain(|f| f.table != table);
        self.having.retain(|h| h.table != table);
        self.group_by.retain(|g| g.table != table);
        self.order_by.retain(|o| o.table != table);
    }

    fn columns_mut<'a>(
        &'a mut self,
        table: &'a str,
        column: &'a str,
    ) -> impl Iterator<Item = &'a mut SelectedColumn> {
        self.columns
            .iter_mut()
            .filter(move |c| c.table == table && c.column == column)
    }
}

fn remove_at<T>(items: &mut Vec<T>, idx: usize) {
    if idx < items.len() {
        items.remove(idx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{Direction, JoinKind, Operator};

    fn toggle_column(table: &str, column: &str) -> QueryAction {
        QueryAction::ToggleColumn {
            table: table.to_string(),
            column: column.to_string(),
        }
    }

    #[test]
    fn test_toggle_column_selects_table() {
        let config = QueryConfig::new().apply(toggle_column("orders", "id"));
        assert_eq!(config.tables, vec!["orders"]);
        assert_eq!(config.columns.len(), 1);

        let config = config.apply(toggle_column("orders", "id"));
        assert!(config.columns.is_empty());
        assert_eq!(config.tables, vec!["orders"]);
    }

    #[test]
    fn test_deselect_table_cascades() {
        let config = QueryConfig::new()
            .apply(toggle_column("orders", "id"))
            .apply(toggle_column("customers", "name"))
            .apply(QueryAction::AddJoin(Join::new(
                JoinKind::Inner,
                ("orders", "customer_id"),
                ("customers", "id"),
            )))
            .apply(QueryAction::AddFilter(Condition::new(
                "customers",
                "name",
                Operator::Like,
                "A%",
            )))
            .apply(QueryAction::ToggleGroupBy {
                table: "customers".to_string(),
                column: "name".to_string(),
            })
            .apply(QueryAction::AddOrderBy(OrderBy::new(
                "customers",
                "name",
                Direction::Desc,
            )))
            .apply(QueryAction::ToggleTable("customers".to_string()));

        assert_eq!(config.tables, vec!["orders"]);
        assert_eq!(config.columns, vec![SelectedColumn::new("orders", "id")]);
        assert!(config.joins.is_empty());
        assert!(config.filters.is_empty());
        assert!(config.group_by.is_empty());
        assert!(config.order_by.is_empty());
    }

    #[test]
    fn test_set_aggregate_and_alias() {
        let config = QueryConfig::new()
            .apply(toggle_column("orders", "id"))
            .apply(QueryAction::SetAggregate {
                table: "orders".to_string(),
                column: "id".to_string(),
                aggregate: Aggregate::Count,
            })
            .apply(QueryAction::SetAlias {
                table: "orders".to_string(),
                column: "id".to_string(),
                alias: Some("n".to_string()),
            });
        assert_eq!(config.columns[0].aggregate, Aggregate::Count);
        assert_eq!(config.columns[0].alias.as_deref(), Some("n"));
    }

    #[test]
    fn test_out_of_range_remove_is_ignored() {
        let config = QueryConfig::new()
            .apply(toggle_column("orders", "id"))
            .apply(QueryAction::RemoveColumn(5));
        assert_eq!(config.columns.len(), 1);
    }

    #[test]
    fn test_limit_offset_and_reset() {
        let config = QueryConfig::new()
            .apply(QueryAction::SetLimit(Some(10)))
            .apply(QueryAction::SetOffset(Some(20)));
        assert_eq!((config.limit, config.offset), (Some(10), Some(20)));
        assert_eq!(config.apply(QueryAction::Reset), QueryConfig::default());
    }
}
