//! Core conversion logic module
//!
//! This module contains the two halves of the conversion pipeline:
//! - `extract` - Field descriptors and typed value extraction
//! - `builder` - Statement assembly from parsed camt documents

pub mod builder;
pub mod extract;

pub use builder::{build_statement, StatementBuilder};
pub use extract::Field;
