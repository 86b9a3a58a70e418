//! Table dependency graph built from relationships.
//!
//! An edge runs from a relationship's source table to its target table.
//! Self-references and unresolved targets add no edge.

use super::Table;
use std::collections::BTreeSet;

/// Deduplicated dependency indexes for every table.
fn edges(tables: &[Table]) -> Vec<BTreeSet<usize>> {
    tables
        .iter()
        .enumerate()
        .map(|(i, table)| {
            table
                .relationships
                .iter()
                .filter(|r| r.source_table_id == table.id)
                .filter_map(|r| tables.iter().position(|t| t.id == r.target_table_id))
                .filter(|&j| j != i)
                .collect()
        })
        .collect()
}

/// Table indexes ordered so that referenced tables come first.
///
/// Ties keep declared order. Returns `None` when the graph has a cycle.
pub fn dependency_order(tables: &[Table]) -> Option<Vec<usize>> {
    let deps = edges(tables);
    let mut pending: Vec<usize> = deps.iter().map(BTreeSet::len).collect();
    let mut ready: BTreeSet<usize> = (0..tables.len()).filter(|&i| pending[i] == 0).collect();
    let mut order = Vec::with_capacity(tables.len());

    while let Some(next) = ready.pop_first() {
        order.push(next);
        for (i, d) in deps.iter().enumerate() {
            if d.contains(&next) {
                pending[i] -= 1;
                if pending[i] == 0 {
                    ready.insert(i);
                }
            }
        }
    }

    (order.len() == tables.len()).then_some(order)
}

/// First relationship cycle found, as table names with the start repeated
/// at the end (`a -> b -> a`).
pub fn find_cycle(tables: &[Table]) -> Option<Vec<String>> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        New,
        Active,
        Done,
    }

    fn visit(
        node: usize,
        deps: &[BTreeSet<usize>],
        marks: &mut [Mark],
        path: &mut Vec<usize>,
    ) -> Option<Vec<usize>> {
        marks[node] = Mark::Active;
        path.push(node);
        for &next in &deps[node] {
            match marks[next] {
                Mark::Active => {
                    let start = path.iter().position(|&n| n == next)?;
                    let mut cycle = path[start..].to_vec();
                    cycle.push(next);
                    return Some(cycle);
                }
                Mark::New => {
                    if let Some(cycle) = visit(next, deps, marks, path) {
                        return Some(cycle);
                    }
                }
                Mark::Done => {}
            }
        }
        path.pop();
        marks[node] = Mark::Done;
        None
    }

    let deps = edges(tables);
    let mut marks = vec![Mark::New; tables.len()];
    for start in 0..tables.len() {
        if marks[start] == Mark::New {
            let mut path = Vec::new();
            if let Some(cycle) = visit(start, &deps, &mut marks, &mut path) {
                return Some(cycle.into_iter().map(|i| tables[i].name.clone()).collect());
            }
        }
    }
    None
}
