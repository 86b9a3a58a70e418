//! schemaforge command-line interface.
//!
//! Validate, down-level and generate SQL from JSON schema files.
//!
//! # Usage
//!
//! ```bash
//! # CREATE TABLE statements for MySQL
//! schemaforge generate shop.json --dialect mysql
//!
//! # Check a schema against SQLite
//! schemaforge validate shop.json --dialect sqlite
//!
//! # Adapt a PostgreSQL schema for MySQL
//! schemaforge transform shop.json --to mysql -o shop.mysql.json
//! ```

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::*;
use schemaforge::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schemaforge")]
#[command(version)]
#[command(about = "Dialect-aware schema compiler for MySQL, PostgreSQL and SQLite", long_about = None)]
#[command(after_help = "EXAMPLES:
    schemaforge generate shop.json --dialect sqlite --pretty
    schemaforge generate shop.json --table users --inserts
    schemaforge diff v1.json v2.json
    schemaforge select report.json --dialect postgres")]
struct Cli {
    /// Config file (default: ./schemaforge.toml, then the user config dir)
    #[arg(short, long, global = true, env = "SCHEMAFORGE_CONFIG")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate CREATE TABLE (and optionally INSERT) statements
    Generate {
        /// Schema file (a database or a single table, JSON)
        schema: PathBuf,
        /// Target dialect (mysql, postgres, sqlite)
        #[arg(short, long, value_parser = parse_dialect)]
        dialect: Option<Dialect>,
        /// Only this table (by name)
        #[arg(short, long)]
        table: Option<String>,
        /// Append INSERT statements for the row snapshots
        #[arg(long)]
        inserts: bool,
        /// One definition per line
        #[arg(long)]
        pretty: bool,
        /// Omit IF NOT EXISTS
        #[arg(long)]
        no_if_not_exists: bool,
        /// Omit table and column comments
        #[arg(long)]
        no_comments: bool,
        /// MySQL storage engine
        #[arg(long)]
        engine: Option<String>,
        /// MySQL default charset
        #[arg(long)]
        charset: Option<String>,
        /// MySQL table collation
        #[arg(long)]
        collation: Option<String>,
        /// PostgreSQL schema qualifying table names
        #[arg(long = "schema")]
        schema_name: Option<String>,
        /// SQLite STRICT tables
        #[arg(long)]
        strict: bool,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
        /// Write SQL to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a schema against a dialect
    Validate {
        schema: PathBuf,
        #[arg(short, long, value_parser = parse_dialect)]
        dialect: Option<Dialect>,
    },
    /// Down-level a schema for another dialect
    Transform {
        schema: PathBuf,
        /// Target dialect
        #[arg(long, value_parser = parse_dialect)]
        to: Dialect,
        /// Write the transformed schema here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show differences between two schema versions
    Diff { old: PathBuf, new: PathBuf },
    /// Build a SELECT from a query configuration (JSON)
    Select {
        query: PathBuf,
        #[arg(short, long, value_parser = parse_dialect)]
        dialect: Option<Dialect>,
        /// Check table and column names against this schema
        #[arg(long)]
        against: Option<PathBuf>,
        /// Do not emit column aliases
        #[arg(long)]
        no_aliases: bool,
        /// One clause per line
        #[arg(long)]
        pretty: bool,
    },
    /// List the data types each dialect supports
    Types {
        #[arg(short, long, value_parser = parse_dialect)]
        dialect: Option<Dialect>,
    },
}

fn parse_dialect(s: &str) -> Result<Dialect, String> {
    s.parse().map_err(|e: SchemaError| e.to_string())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("schemaforge=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("schemaforge=warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Returns `false` when the command reported blocking errors.
fn run(cli: Cli) -> Result<bool> {
    let config = Config::load(cli.config.as_deref()).context("loading config")?;

    match cli.command {
        Commands::Generate {
            schema,
            dialect,
            table,
            inserts,
            pretty,
            no_if_not_exists,
            no_comments,
            engine,
            charset,
            collation,
            schema_name,
            strict,
            json,
            output,
        } => {
            let dialect = dialect.unwrap_or(config.dialect);
            let mut options = config.generate_options();
            options.pretty |= pretty;
            options.if_not_exists &= !no_if_not_exists;
            options.include_comments &= !no_comments;
            if engine.is_some() {
                options.mysql.engine = engine;
            }
            if charset.is_some() {
                options.mysql.charset = charset;
            }
            if collation.is_some() {
                options.mysql.collation = collation;
            }
            if schema_name.is_some() {
                options.postgres.schema = schema_name;
            }
            options.sqlite.strict |= strict;

            let database = load_schema(&schema)?;
            let mut results = Vec::new();
            match &table {
                Some(name) => {
                    let Some(t) = database
                        .tables
                        .iter()
                        .find(|t| t.name.eq_ignore_ascii_case(name))
                    else {
                        bail!("table '{}' not found in {}", name, schema.display());
                    };
                    results.push(generate_table(t, &database.tables, dialect, &options));
                    if inserts {
                        results.push(generate_insert(t, dialect, &options));
                    }
                }
                None => {
                    results.push(generate_database(&database, dialect, &options));
                    if inserts {
                        results.extend(
                            database
                                .tables
                                .iter()
                                .filter(|t| !t.rows.is_empty())
                                .map(|t| generate_insert(t, dialect, &options)),
                        );
                    }
                }
            }

            let merged = merge_results(dialect, results);
            if json {
                println!("{}", serde_json::to_string_pretty(&merged)?);
                return Ok(merged.is_ok());
            }
            report(&merged.warnings, &merged.errors);
            if !merged.is_ok() {
                return Ok(false);
            }
            emit(&merged.sql, output.as_deref())?;
            Ok(true)
        }
        Commands::Validate { schema, dialect } => {
            let dialect = dialect.unwrap_or(config.dialect);
            let database = load_schema(&schema)?;
            let result = validate_database(&database, dialect);
            report(&result.warnings, &result.errors);
            if result.is_valid() {
                println!(
                    "{} {} is valid for {}",
                    "✓".green(),
                    schema.display().to_string().cyan(),
                    dialect.to_string().cyan()
                );
            }
            Ok(result.is_valid())
        }
        Commands::Transform { schema, to, output } => {
            let database = load_schema(&schema)?;
            let transformed = transform_database(&database, to);
            for change in diff_databases(&database, &transformed) {
                eprintln!("{} {}", "~".yellow(), change);
            }
            let json = serde_json::to_string_pretty(&transformed)?;
            emit(&json, output.as_deref())?;
            Ok(true)
        }
        Commands::Diff { old, new } => {
            let changes = diff_databases(&load_schema(&old)?, &load_schema(&new)?);
            if changes.is_empty() {
                println!("{}", "No changes".dimmed());
            }
            for change in &changes {
                let marker = match change {
                    SchemaChange::TableAdded { .. } | SchemaChange::ColumnAdded { .. } => {
                        "+".green()
                    }
                    SchemaChange::TableRemoved { .. } | SchemaChange::ColumnRemoved { .. } => {
                        "-".red()
                    }
                    _ => "~".yellow(),
                };
                println!("{} {}", marker, change);
            }
            Ok(true)
        }
        Commands::Select {
            query,
            dialect,
            against,
            no_aliases,
            pretty,
        } => {
            let dialect = dialect.unwrap_or(config.dialect);
            let content = fs::read_to_string(&query)
                .with_context(|| format!("reading {}", query.display()))?;
            let query_config: QueryConfig = serde_json::from_str(&content)
                .with_context(|| format!("parsing {}", query.display()))?;

            if let Some(path) = against {
                let checked = validate_query_with_schema(&query_config, &load_schema(&path)?);
                if !checked.is_valid() {
                    report(&checked.warnings, &checked.errors);
                    return Ok(false);
                }
            }

            let mut options = config.select.clone();
            options.include_aliases &= !no_aliases;
            options.pretty |= pretty;
            let out = generate_select(&query_config, dialect, &options);
            report(&out.warnings, &out.errors);
            if out.is_ok() {
                println!("{}", out.sql);
            }
            Ok(out.is_ok())
        }
        Commands::Types { dialect } => {
            let dialects = match dialect {
                Some(d) => vec![d],
                None => Dialect::ALL.to_vec(),
            };
            show_types(&dialects);
            Ok(true)
        }
    }
}

/// A schema file holds either a whole database or a single table.
fn load_schema(path: &Path) -> Result<Database> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;

    if value.get("tables").is_some() {
        return serde_json::from_value(value)
            .with_context(|| format!("{} is not a valid database schema", path.display()));
    }
    let table: Table = serde_json::from_value(value)
        .with_context(|| format!("{} is not a valid table schema", path.display()))?;
    Ok(Database::new(table.id.clone(), table.name.clone()).table(table))
}

fn merge_results(dialect: Dialect, results: Vec<GeneratedSql>) -> GeneratedSql {
    let mut merged = GeneratedSql::new(dialect);
    let mut parts = Vec::new();
    for result in results {
        for warning in result.warnings {
            merged.warn(warning);
        }
        merged.errors.extend(result.errors);
        if !result.sql.is_empty() {
            parts.push(result.sql);
        }
    }
    if merged.is_ok() {
        merged.sql = parts.join("\n\n");
    }
    merged
}

fn report(warnings: &[String], errors: &[String]) {
    for warning in warnings {
        eprintln!("{} {}", "warning:".yellow().bold(), warning);
    }
    for error in errors {
        eprintln!("{} {}", "error:".red().bold(), error);
    }
}

fn emit(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, format!("{}\n", text))
                .with_context(|| format!("writing {}", path.display()))?;
            eprintln!(
                "{} Wrote {}",
                "✓".green(),
                path.display().to_string().cyan()
            );
        }
        None => println!("{}", text),
    }
    Ok(())
}

fn show_types(dialects: &[Dialect]) {
    let mut header = vec!["TYPE".to_string(), "CATEGORY".to_string()];
    header.extend(dialects.iter().map(|d| d.to_string().to_uppercase()));
    let widths: Vec<usize> = header
        .iter()
        .enumerate()
        .map(|(i, h)| if i == 0 { 11 } else { h.len().max(8) })
        .collect();

    let pad = |cells: &[String]| -> Vec<String> {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", c, width = *w))
            .collect()
    };

    println!("{}", pad(&header).join(" │ ").white().bold());
    let sep: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
    println!("{}", sep.join("─┼─").dimmed());

    for data_type in DataType::ALL {
        let mut cells = vec![data_type.to_string(), data_type.category().to_string()];
        for dialect in dialects {
            let cell = if dialect.supports(data_type) {
                "yes".to_string()
            } else {
                format!("-> {}", dialect.substitute(data_type))
            };
            cells.push(cell);
        }
        println!("{}", pad(&cells).join(" │ "));
    }
}
