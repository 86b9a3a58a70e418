//! INSERT SQL generation from a table's row snapshot.

use crate::error::SchemaResult;
use crate::schema::{Column, Table};
use crate::transpiler::options::GenerateOptions;
use crate::transpiler::traits::SqlGenerator;

/// Build one multi-row INSERT for `table.rows`.
///
/// Only columns that appear in at least one row are listed; rows missing a
/// listed column get `NULL`. Values keyed by an unknown column id are
/// dropped with a warning. Returns an empty string when there is nothing
/// to insert.
pub fn build_insert(
    table: &Table,
    generator: &dyn SqlGenerator,
    options: &GenerateOptions,
    warnings: &mut Vec<String>,
) -> SchemaResult<String> {
    if table.rows.is_empty() {
        warnings.push(format!("Table '{}' has no row data", table.name));
        return Ok(String::new());
    }

    for (i, row) in table.rows.iter().enumerate() {
        for key in row.keys() {
            if table.column_by_id(key).is_none() {
                warnings.push(format!(
                    "Row {} of table '{}' has a value for unknown column '{}'; ignored",
                    i + 1,
                    table.name,
                    key
                ));
            }
        }
    }

    let columns: Vec<&Column> = table
        .columns
        .iter()
        .filter(|col| table.rows.iter().any(|row| row.contains_key(&col.id)))
        .collect();
    if columns.is_empty() {
        warnings.push(format!("Table '{}' has no row data", table.name));
        return Ok(String::new());
    }

    let names: Vec<String> = columns
        .iter()
        .map(|col| generator.quote_identifier(&col.name))
        .collect();
    let tuples: Vec<String> = table
        .rows
        .iter()
        .map(|row| {
            let values: Vec<String> = columns
                .iter()
                .map(|col| match row.get(&col.id) {
                    Some(value) => generator.format_value(value, Some(col.data_type)),
                    None => "NULL".to_string(),
                })
                .collect();
            format!("({})", values.join(", "))
        })
        .collect();

    let (lead, separator) = if options.pretty {
        ("\n  ", ",\n  ")
    } else {
        (" ", ", ")
    };
    Ok(format!(
        "INSERT INTO {} ({}) VALUES{}{};",
        generator.table_name(&table.name),
        names.join(", "),
        lead,
        tuples.join(separator)
    ))
}
