//! # schemaforge
//!
//! > **Describe the schema once. Emit it for every engine.**
//!
//! schemaforge turns a dialect-agnostic schema model into CREATE TABLE,
//! CREATE INDEX, INSERT and SELECT text for MySQL, PostgreSQL and SQLite.
//! It validates the schema against the target first, can down-level a
//! schema written for one engine so it fits another, and diffs two schema
//! versions.
//!
//! ## Quick Example
//!
//! ```
//! use schemaforge::prelude::*;
//!
//! let users = Table::new("t1", "users")
//!     .column(Column::new("c1", "id", DataType::Integer).primary_key().auto_increment())
//!     .column(Column::new("c2", "email", DataType::Varchar).length(255).not_null().unique());
//!
//! let out = generate_table(&users, &[], Dialect::Sqlite, &GenerateOptions::default());
//! assert!(out.errors.is_empty());
//! assert_eq!(
//!     out.sql,
//!     r#"CREATE TABLE IF NOT EXISTS "users" ("id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT, "email" TEXT NOT NULL);"#
//! );
//! ```
//!
//! ## Layers
//!
//! | Module        | Role                                              |
//! |---------------|---------------------------------------------------|
//! | `schema`      | Tables, columns, relationships, indexes           |
//! | `catalog`     | Type metadata and per-dialect support             |
//! | `validator`   | Errors and warnings before generation             |
//! | `transpiler`  | Dialect backends and statement assembly           |
//! | `migrate`     | Down-leveling, diffing, normalization             |
//! | `query`       | Select-query configuration and its reducer        |

pub mod catalog;
pub mod config;
pub mod error;
pub mod generator;
pub mod literal;
pub mod migrate;
pub mod query;
pub mod schema;
pub mod transpiler;
pub mod validator;

pub use generator::{
    ExecutionResult, GeneratedSql, generate_database, generate_insert, generate_select,
    generate_table,
};

pub mod prelude {
    pub use crate::catalog::{TypeCategory, TypeInfo};
    pub use crate::config::Config;
    pub use crate::error::*;
    pub use crate::generator::{
        ExecutionResult, GeneratedSql, generate_database, generate_insert, generate_select,
        generate_table,
    };
    pub use crate::migrate::{
        SchemaChange, diff_databases, diff_tables, normalize_database, normalize_table,
        transform_database, transform_table,
    };
    pub use crate::query::{
        Aggregate, ColumnRef, Condition, Connective, Direction, Join, JoinKind, Operator, OrderBy,
        QueryAction, QueryConfig, SelectedColumn,
    };
    pub use crate::schema::{
        Cardinality, Column, Constraint, DataType, Database, Index, ReferentialAction,
        Relationship, Row, Table,
    };
    pub use crate::transpiler::{Dialect, GenerateOptions, SelectOptions, SqlGenerator};
    pub use crate::validator::{
        ValidationReport, validate_database, validate_query, validate_query_with_schema,
        validate_table,
    };
}
