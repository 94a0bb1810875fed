//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `statement`: Normalized statement model and host configuration
//! - `transaction`: Transaction record and credit/debit indicator
//! - `error`: Error types for statement parsing

pub mod error;
pub mod statement;
pub mod transaction;

pub use error::ParseError;
pub use statement::{Statement, StatementConfig};
pub use transaction::{CreditDebit, Transaction};
