//! SQL Transpiler for schemaforge.
//!
//! Dialect-independent assembly of CREATE TABLE, CREATE INDEX, INSERT and
//! SELECT text. Everything that differs between engines is delegated to a
//! [`SqlGenerator`] backend chosen through [`Dialect`].

pub mod ddl;
pub mod dialect;
pub mod dml;
pub mod options;
pub mod sql;
pub mod traits;

#[cfg(test)]
mod tests;

pub use dialect::Dialect;
pub use options::{GenerateOptions, MySqlOptions, PostgresOptions, SelectOptions, SqliteOptions};
pub use traits::{ColumnContext, SqlGenerator, is_reserved_word, needs_quoting, quote_with};
