//! Statement-related types for camt statements
//!
//! This module defines the normalized statement model and the host
//! configuration used to fill gaps the document leaves open.

use super::transaction::Transaction;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Host-supplied fallbacks for fields a document may omit
///
/// Some banks ship camt documents without an account currency or without
/// an IBAN. The host (here: the CLI) can provide fallbacks; the document
/// always wins when it declares the value itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatementConfig {
    /// Fallback ISO-4217 currency code (e.g. `EUR`)
    ///
    /// Used only when the statement's account block declares no currency.
    pub currency: Option<String>,

    /// Fallback account identifier
    ///
    /// Used only when the statement's account block declares neither an
    /// IBAN nor another account identifier.
    pub iban: Option<String>,
}

/// Normalized bank statement
///
/// The result of parsing one camt document: resolved account identity,
/// optional balances, and the retained transactions in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// Resolved account identifier (IBAN or fallback identifier)
    pub account_id: String,

    /// Resolved ISO-4217 currency code
    ///
    /// Entries in any other currency were dropped during parsing.
    pub currency: String,

    /// Servicing bank identifier
    ///
    /// The servicer's BIC when the document carries one, else the
    /// servicer's name, else `None`.
    pub bank_id: Option<String>,

    /// Booked balance at the start of the statement period
    pub opening_balance: Option<Decimal>,

    /// Date of the opening balance
    pub opening_date: Option<NaiveDate>,

    /// Booked balance at the end of the statement period
    pub closing_balance: Option<Decimal>,

    /// Date of the closing balance
    pub closing_date: Option<NaiveDate>,

    /// Retained transactions in document order
    pub transactions: Vec<Transaction>,
}

impl Statement {
    /// Create an empty statement for a resolved account
    ///
    /// # Arguments
    ///
    /// * `account_id` - The resolved account identifier
    /// * `currency` - The resolved ISO-4217 currency code
    ///
    /// # Returns
    ///
    /// A Statement with no bank id, no balances and no transactions
    pub fn new(account_id: String, currency: String) -> Self {
        Statement {
            account_id,
            currency,
            bank_id: None,
            opening_balance: None,
            opening_date: None,
            closing_balance: None,
            closing_date: None,
            transactions: Vec::new(),
        }
    }
}
