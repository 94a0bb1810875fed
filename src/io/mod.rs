//! I/O module
//!
//! Handles CSV output of normalized statements.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (column layout, row serialization)

pub mod csv_format;

pub use csv_format::write_statement_csv;
