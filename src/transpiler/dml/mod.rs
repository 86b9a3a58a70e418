//! DML generation: INSERT and SELECT.

pub mod insert;
pub mod select;

pub use insert::build_insert;
pub use select::build_select;
