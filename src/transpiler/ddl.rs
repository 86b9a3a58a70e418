//! DDL generation: CREATE TABLE and CREATE INDEX.

use crate::error::{SchemaError, SchemaResult};
use crate::schema::{
    Index, ReferentialAction, Relationship, Table, resolve_relationship, unresolved_relationship,
};
use crate::transpiler::options::GenerateOptions;
use crate::transpiler::traits::{ColumnContext, SqlGenerator};

/// Build the CREATE TABLE statement for `table`, followed by the backend's
/// trailing statements and one CREATE INDEX per index.
///
/// `tables` is the database-wide table list used to resolve relationship
/// targets. Relationships that cannot be resolved are skipped and reported
/// through `warnings`.
pub fn build_create_table(
    table: &Table,
    tables: &[Table],
    generator: &dyn SqlGenerator,
    options: &GenerateOptions,
    warnings: &mut Vec<String>,
) -> SchemaResult<String> {
    let pk_columns = table.primary_key_columns();
    let composite = pk_columns.len() > 1;
    let ctx = ColumnContext {
        inline_primary_key: !composite,
        include_comments: options.include_comments,
    };

    let mut defs: Vec<String> = table
        .columns
        .iter()
        .map(|col| generator.column_definition(col, &ctx))
        .collect();

    if composite {
        let cols: Vec<String> = pk_columns
            .iter()
            .map(|col| generator.quote_identifier(&col.name))
            .collect();
        let key = format!("PRIMARY KEY ({})", cols.join(", "));
        match table.composite_key_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => defs.push(format!(
                "CONSTRAINT {} {}",
                generator.quote_identifier(name),
                key
            )),
            _ => defs.push(key),
        }
    }

    for rel in table
        .relationships
        .iter()
        .filter(|r| r.source_table_id == table.id)
    {
        match foreign_key_clause(table, rel, tables, generator) {
            Ok(clause) => defs.push(clause),
            Err(reason) => {
                let message = unresolved_relationship(rel, &reason);
                tracing::warn!(table = %table.name, "{}", message);
                warnings.push(message);
            }
        }
    }

    let mut sql = String::from("CREATE TABLE ");
    if options.if_not_exists {
        sql.push_str("IF NOT EXISTS ");
    }
    sql.push_str(&generator.table_name(&table.name));
    if options.pretty {
        sql.push_str(" (\n  ");
        sql.push_str(&defs.join(",\n  "));
        sql.push_str("\n)");
    } else {
        sql.push_str(" (");
        sql.push_str(&defs.join(", "));
        sql.push(')');
    }
    if let Some(table_options) = generator.table_options(table, options) {
        sql.push(' ');
        sql.push_str(&table_options);
    }
    sql.push(';');

    let mut stmts = vec![sql];
    stmts.extend(generator.trailing_statements(table, options));
    for index in &table.indexes {
        stmts.push(build_create_index(table, index, generator, options)?);
    }
    Ok(stmts.join("\n"))
}

/// `CONSTRAINT name FOREIGN KEY (col) REFERENCES target (col) [ON ...]`.
///
/// The error is the reason the relationship cannot be rendered.
fn foreign_key_clause(
    table: &Table,
    rel: &Relationship,
    tables: &[Table],
    generator: &dyn SqlGenerator,
) -> Result<String, String> {
    let resolved = resolve_relationship(table, rel, tables)?;
    let name = match rel.name.trim() {
        "" => format!("fk_{}_{}", table.name, resolved.source_column.name),
        name => name.to_string(),
    };

    let mut clause = format!(
        "CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
        generator.quote_identifier(&name),
        generator.quote_identifier(&resolved.source_column.name),
        generator.table_name(&resolved.target_table.name),
        generator.quote_identifier(&resolved.target_column.name)
    );
    // NO ACTION is every engine's default.
    if rel.on_delete != ReferentialAction::NoAction {
        clause.push_str(" ON DELETE ");
        clause.push_str(rel.on_delete.to_sql());
    }
    if rel.on_update != ReferentialAction::NoAction {
        clause.push_str(" ON UPDATE ");
        clause.push_str(rel.on_update.to_sql());
    }
    Ok(clause)
}

/// `CREATE [UNIQUE] INDEX [IF NOT EXISTS] name ON table (cols);`
pub fn build_create_index(
    table: &Table,
    index: &Index,
    generator: &dyn SqlGenerator,
    options: &GenerateOptions,
) -> SchemaResult<String> {
    let cols = index
        .column_ids
        .iter()
        .map(|id| {
            table
                .column_by_id(id)
                .map(|col| generator.quote_identifier(&col.name))
                .ok_or_else(|| SchemaError::unknown_column(&table.name, id))
        })
        .collect::<SchemaResult<Vec<_>>>()?;

    let mut sql = String::from("CREATE ");
    if index.unique {
        sql.push_str("UNIQUE ");
    }
    sql.push_str("INDEX ");
    if options.if_not_exists && generator.supports_index_if_not_exists() {
        sql.push_str("IF NOT EXISTS ");
    }
    sql.push_str(&format!(
        "{} ON {} ({});",
        generator.quote_identifier(&index.name),
        generator.table_name(&table.name),
        cols.join(", ")
    ));
    Ok(sql)
}
