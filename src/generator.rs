//! Generation entry points.
//!
//! Every entry point validates first, then assembles SQL through the
//! dialect backend. Internal faults never escape: they become a single
//! blocking error on the returned [`GeneratedSql`].

use crate::error::SchemaError;
use crate::query::QueryConfig;
use crate::schema::{Database, Row, Table, dependency_order};
use crate::transpiler::ddl::build_create_table;
use crate::transpiler::dml::{build_insert, build_select};
use crate::transpiler::{Dialect, GenerateOptions, SelectOptions};
use crate::validator::{ValidationReport, validate_database, validate_query, validate_table};
use serde::{Deserialize, Serialize};

/// Output of a generation call.
///
/// When `errors` is non-empty `sql` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedSql {
    pub sql: String,
    pub dialect: Dialect,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl GeneratedSql {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            sql: String::new(),
            dialect,
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record a warning once, keeping first-seen order.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        if !self.warnings.contains(&message) {
            self.warnings.push(message);
        }
    }

    /// Record a blocking error and drop any SQL.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.sql.clear();
        self.errors.push(message.into());
    }

    fn from_report(dialect: Dialect, report: ValidationReport) -> Self {
        let mut out = Self::new(dialect);
        for warning in report.warnings {
            out.warn(warning);
        }
        if !report.errors.is_empty() {
            tracing::debug!(%dialect, errors = report.errors.len(), "validation failed");
        }
        out.errors = report.errors;
        out
    }

    fn finish(mut self, result: Result<String, SchemaError>, warnings: Vec<String>) -> Self {
        for warning in warnings {
            self.warn(warning);
        }
        match result {
            Ok(sql) => self.sql = sql,
            Err(e) => self.fail(e.to_string()),
        }
        self
    }
}

/// Result of running generated SQL in an external sandbox.
///
/// The core never executes SQL; this is the shape callers exchange with
/// whatever does.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub success: bool,
    pub rows: Vec<Row>,
    pub row_count: usize,
    pub elapsed_ms: u64,
    pub error: Option<String>,
}

impl ExecutionResult {
    pub fn succeeded(rows: Vec<Row>, elapsed_ms: u64) -> Self {
        Self {
            success: true,
            row_count: rows.len(),
            rows,
            elapsed_ms,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>, elapsed_ms: u64) -> Self {
        Self {
            success: false,
            elapsed_ms,
            error: Some(error.into()),
            ..Default::default()
        }
    }
}

/// CREATE TABLE (plus COMMENT ON and CREATE INDEX statements) for one table.
///
/// `tables` is the database-wide list used to resolve relationship targets.
pub fn generate_table(
    table: &Table,
    tables: &[Table],
    dialect: Dialect,
    options: &GenerateOptions,
) -> GeneratedSql {
    tracing::debug!(table = %table.name, %dialect, "generating table");
    let out = GeneratedSql::from_report(dialect, validate_table(table, dialect));
    if !out.is_ok() {
        return out;
    }

    let generator = dialect.generator_for(options);
    let mut warnings = Vec::new();
    let result = build_create_table(table, tables, generator.as_ref(), options, &mut warnings)
        .map(|sql| {
            let has_relationships = table
                .relationships
                .iter()
                .any(|r| r.source_table_id == table.id);
            match generator.preamble(has_relationships) {
                Some(preamble) => format!("{}\n{}", preamble, sql),
                None => sql,
            }
        });
    out.finish(result, warnings)
}

/// Every table of a database, referenced tables first.
///
/// A relationship cycle falls back to declared order with a warning.
pub fn generate_database(
    database: &Database,
    dialect: Dialect,
    options: &GenerateOptions,
) -> GeneratedSql {
    tracing::debug!(database = %database.name, %dialect, tables = database.tables.len(), "generating database");
    let mut out = GeneratedSql::from_report(dialect, validate_database(database, dialect));
    if !out.is_ok() {
        return out;
    }

    let order = dependency_order(&database.tables).unwrap_or_else(|| {
        tracing::warn!(database = %database.name, "relationship cycle, using declared order");
        out.warn("Tables are emitted in declared order because of a relationship cycle");
        (0..database.tables.len()).collect()
    });

    let generator = dialect.generator_for(options);
    let mut warnings = Vec::new();
    let result = order
        .iter()
        .map(|&i| {
            build_create_table(
                &database.tables[i],
                &database.tables,
                generator.as_ref(),
                options,
                &mut warnings,
            )
        })
        .collect::<Result<Vec<_>, _>>()
        .map(|stmts| {
            let has_relationships = database.tables.iter().any(|t| {
                t.relationships.iter().any(|r| r.source_table_id == t.id)
            });
            let mut parts = Vec::with_capacity(stmts.len() + 1);
            parts.extend(generator.preamble(has_relationships));
            parts.extend(stmts);
            parts.join("\n\n")
        });
    out.finish(result, warnings)
}

/// INSERT for the table's row snapshot.
pub fn generate_insert(table: &Table, dialect: Dialect, options: &GenerateOptions) -> GeneratedSql {
    tracing::debug!(table = %table.name, %dialect, rows = table.rows.len(), "generating insert");
    let out = GeneratedSql::from_report(dialect, validate_table(table, dialect));
    if !out.is_ok() {
        return out;
    }

    let generator = dialect.generator_for(options);
    let mut warnings = Vec::new();
    let result = build_insert(table, generator.as_ref(), options, &mut warnings);
    out.finish(result, warnings)
}

/// SELECT for a query configuration.
pub fn generate_select(
    config: &QueryConfig,
    dialect: Dialect,
    options: &SelectOptions,
) -> GeneratedSql {
    tracing::debug!(%dialect, tables = config.tables.len(), "generating select");
    let out = GeneratedSql::from_report(dialect, validate_query(config));
    if !out.is_ok() {
        return out;
    }

    let generator = dialect.generator();
    let result = build_select(config, generator.as_ref(), options);
    out.finish(result, Vec::new())
}
