//! Dialect backends.

pub mod mysql;
pub mod postgres;
pub mod sqlite;
