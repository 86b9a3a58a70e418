//! Schema migration helpers.
//!
//! - [`transform_table`] down-levels a schema for another dialect
//! - [`diff_tables`] reports what changed between two versions
//! - [`normalize_table`] tidies a schema into canonical form
//!
//! All three return new values and never fail.

pub mod diff;
pub mod normalize;
pub mod transform;

pub use diff::{SchemaChange, diff_databases, diff_tables};
pub use normalize::{normalize_database, normalize_table};
pub use transform::{transform_database, transform_table};
