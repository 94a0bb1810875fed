//! camt Statements Library
//! # Overview
//!
//! This library converts ISO-20022 camt bank statement documents (camt.052,
//! camt.053, camt.054) into a normalized statement model and exports it as CSV
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Statement, Transaction, etc.)
//! - [`cli`] - CLI arguments parsing
//! - [`xml`] - Namespace-agnostic XML tree parsing
//! - [`core`] - Conversion logic components:
//!   - [`core::extract`] - Field descriptors and typed value extraction
//!   - [`core::builder`] - Statement assembly and resolution rules
//! - [`io`] - CSV output of normalized statements
//! - [`convert`] - End-to-end file-to-CSV pipeline
//!
//! # Statement Model
//!
//! A built statement carries:
//!
//! - **Account identity**: IBAN or other identifier, currency, servicing bank
//! - **Balances**: opening and closing booked balances with their dates
//! - **Transactions**: signed amounts, booking and value dates, payee, memo,
//!   and a stable identifier per entry
//!
//! # Resolution Rules
//!
//! Values found in the document always win over configured fallbacks. A
//! statement that resolves neither a currency nor an account identifier is
//! rejected as a whole, as is any entry missing a mandatory field. Entries
//! booked in a foreign currency are dropped rather than converted.

// Module declarations
pub mod cli;
pub mod convert;
pub mod core;
pub mod io;
pub mod types;
pub mod xml;

pub use convert::convert;
pub use core::{build_statement, Field, StatementBuilder};
pub use io::write_statement_csv;
pub use types::{CreditDebit, ParseError, Statement, StatementConfig, Transaction};
pub use xml::{parse_document, XmlNode};
