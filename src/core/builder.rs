//! Statement builder
//!
//! This module provides the StatementBuilder that turns a parsed camt
//! document into a normalized [`Statement`]: it locates the statement
//! block, resolves account identity against the host configuration, reads
//! the booked balances, and walks the entry list in document order.
//!
//! The builder enforces the statement rules:
//! - Document values win over configured fallbacks
//! - Entries in a foreign currency are dropped, never converted
//! - Mandatory entry fields (amount, date) abort the whole document
//! - Transaction ids are stable across re-parses and unique per statement

use crate::core::extract::Field;
use crate::types::{CreditDebit, ParseError, Statement, StatementConfig, Transaction};
use crate::xml::XmlNode;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet};

/// Statement blocks across the camt family: bank-to-customer statement
/// (camt.053), account report (camt.052) and debit/credit notification
/// (camt.054). Documents carry exactly one of these wrappers.
const STATEMENT_BLOCKS: [&str; 3] = [
    "BkToCstmrStmt/Stmt",
    "BkToCstmrAcctRpt/Rpt",
    "BkToCstmrDbtCdtNtfctn/Ntfctn",
];

/// Balance type codes, ISO-20022 external code set
const OPENING_BOOKED: &str = "OPBD";
const PREVIOUSLY_CLOSED: &str = "PRCD";
const CLOSING_BOOKED: &str = "CLBD";

/// Field descriptors for everything read out of a statement block.
///
/// Account fields are relative to the `Acct` block, balance fields to a
/// `Bal` block, entry fields to an `Ntry` block. The `Pty`-wrapped party
/// and `BICFI` variants cover the element renames of newer camt versions.
mod fields {
    use crate::core::extract::Field;

    pub const ACCOUNT_IBAN: Field = Field::new("Id/IBAN");
    pub const ACCOUNT_OTHER_ID: Field = Field::new("Id/Othr/Id");
    pub const ACCOUNT_CURRENCY: Field = Field::new("Ccy");
    pub const SERVICER_BIC: Field = Field::new("Svcr/FinInstnId/BIC");
    pub const SERVICER_BICFI: Field = Field::new("Svcr/FinInstnId/BICFI");
    pub const SERVICER_NAME: Field = Field::new("Svcr/FinInstnId/Nm");

    pub const BALANCE_CODE: Field = Field::new("Tp/CdOrPrtry/Cd");
    pub const BALANCE_AMOUNT: Field = Field::new("Amt");
    pub const BALANCE_INDICATOR: Field = Field::new("CdtDbtInd");
    pub const BALANCE_DATE: Field = Field::new("Dt");

    pub const ENTRY_AMOUNT: Field = Field::required("Amt");
    pub const ENTRY_INDICATOR: Field = Field::new("CdtDbtInd");
    pub const ENTRY_BOOKING_DATE: Field = Field::new("BookgDt");
    pub const ENTRY_VALUE_DATE: Field = Field::new("ValDt");
    pub const ENTRY_REFERENCE: Field = Field::new("AcctSvcrRef");
    pub const ENTRY_TX_REFERENCE: Field = Field::new("NtryDtls/TxDtls/Refs/AcctSvcrRef");
    pub const ENTRY_CREDITOR: Field = Field::new("NtryDtls/TxDtls/RltdPties/Cdtr/Nm");
    pub const ENTRY_CREDITOR_PARTY: Field = Field::new("NtryDtls/TxDtls/RltdPties/Cdtr/Pty/Nm");
    pub const ENTRY_DEBTOR: Field = Field::new("NtryDtls/TxDtls/RltdPties/Dbtr/Nm");
    pub const ENTRY_DEBTOR_PARTY: Field = Field::new("NtryDtls/TxDtls/RltdPties/Dbtr/Pty/Nm");
    pub const ENTRY_REMITTANCE: Field = Field::new("NtryDtls/TxDtls/RmtInf/Ustrd");
    pub const ENTRY_INFO: Field = Field::new("AddtlNtryInf");
}

/// Statement builder
///
/// Holds the host configuration and builds statements from parsed camt
/// documents. One builder can process any number of documents.
pub struct StatementBuilder<'a> {
    config: &'a StatementConfig,
}

impl<'a> StatementBuilder<'a> {
    /// Create a builder with the given host configuration
    pub fn new(config: &'a StatementConfig) -> Self {
        StatementBuilder { config }
    }

    /// Build a normalized statement from a parsed camt document
    ///
    /// # Arguments
    ///
    /// * `document` - Root element of the camt document
    ///
    /// # Returns
    ///
    /// The normalized statement with transactions in document order
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The document carries no statement or account block
    /// - Neither document nor configuration resolves a currency or
    ///   account identifier
    /// - A mandatory entry field is missing or malformed
    pub fn build(&self, document: &XmlNode) -> Result<Statement, ParseError> {
        let block = statement_block(document)?;
        let account = block
            .child("Acct")
            .ok_or_else(|| ParseError::invalid_structure("account block (Acct)"))?;

        let currency = self.resolve_currency(account)?;
        let account_id = self.resolve_account_id(account)?;

        let mut statement = Statement::new(account_id, currency);
        statement.bank_id = bank_id(account)?;
        read_balances(block, &mut statement)?;
        read_entries(block, &mut statement)?;
        deduplicate_ids(&mut statement.transactions);

        Ok(statement)
    }

    /// Resolve the statement currency
    ///
    /// The account block wins over the configured fallback.
    fn resolve_currency(&self, account: &XmlNode) -> Result<String, ParseError> {
        if let Some(currency) = fields::ACCOUNT_CURRENCY.text(account)? {
            return Ok(currency);
        }
        self.config
            .currency
            .clone()
            .ok_or(ParseError::UnresolvedCurrency)
    }

    /// Resolve the account identifier
    ///
    /// Prefers the IBAN, then any other document identifier, then the
    /// configured fallback.
    fn resolve_account_id(&self, account: &XmlNode) -> Result<String, ParseError> {
        if let Some(id) = first_text(account, &[fields::ACCOUNT_IBAN, fields::ACCOUNT_OTHER_ID])? {
            return Ok(id);
        }
        self.config
            .iban
            .clone()
            .ok_or(ParseError::UnresolvedAccount)
    }
}

/// Build a normalized statement in one call
///
/// # Arguments
///
/// * `document` - Root element of the camt document
/// * `config` - Host-supplied fallbacks for currency and account id
///
/// # Errors
///
/// Same as [`StatementBuilder::build`].
pub fn build_statement(
    document: &XmlNode,
    config: &StatementConfig,
) -> Result<Statement, ParseError> {
    StatementBuilder::new(config).build(document)
}

/// Locate the statement block under the document root
///
/// Multi-account documents are not supported: when a document carries
/// several blocks, the first one is converted and a warning is printed.
fn statement_block(document: &XmlNode) -> Result<&XmlNode, ParseError> {
    for path in STATEMENT_BLOCKS {
        let blocks = document.find_all(path);
        if let Some(first) = blocks.first() {
            if blocks.len() > 1 {
                eprintln!(
                    "Warning: document contains {} statement blocks, converting only the first",
                    blocks.len()
                );
            }
            return Ok(first);
        }
    }
    Err(ParseError::invalid_structure(
        "statement block (BkToCstmrStmt, BkToCstmrAcctRpt or BkToCstmrDbtCdtNtfctn)",
    ))
}

/// Servicing bank identity: BIC, the BICFI rename, then the plain name
fn bank_id(account: &XmlNode) -> Result<Option<String>, ParseError> {
    first_text(
        account,
        &[
            fields::SERVICER_BIC,
            fields::SERVICER_BICFI,
            fields::SERVICER_NAME,
        ],
    )
}

/// Read the booked balances into the statement
///
/// Balance blocks are keyed by their type code. Blocks in a foreign
/// currency are ignored like entries. Opening is `OPBD`, falling back to
/// `PRCD` for banks that only carry the previous closing; closing is
/// `CLBD`. A debit indicator marks an overdrawn account and negates the
/// amount.
fn read_balances(block: &XmlNode, statement: &mut Statement) -> Result<(), ParseError> {
    let mut amounts: HashMap<String, Decimal> = HashMap::new();
    let mut dates: HashMap<String, NaiveDate> = HashMap::new();

    for balance in block.children_named("Bal") {
        let Some(code) = fields::BALANCE_CODE.text(balance)? else {
            continue;
        };
        let currency = fields::BALANCE_AMOUNT.attr(balance, "Ccy");
        if currency.as_deref() != Some(statement.currency.as_str()) {
            continue;
        }
        let Some(amount) = fields::BALANCE_AMOUNT.amount(balance)? else {
            continue;
        };
        let amount = match read_indicator(balance, fields::BALANCE_INDICATOR)? {
            Some(direction) => direction.apply(amount),
            None => amount,
        };

        if let Some(date) = fields::BALANCE_DATE.date(balance)? {
            dates.insert(code.clone(), date);
        }
        amounts.insert(code, amount);
    }

    let opening = if amounts.contains_key(OPENING_BOOKED) {
        OPENING_BOOKED
    } else {
        PREVIOUSLY_CLOSED
    };
    statement.opening_balance = amounts.get(opening).copied();
    statement.opening_date = dates.get(opening).copied();
    statement.closing_balance = amounts.get(CLOSING_BOOKED).copied();
    statement.closing_date = dates.get(CLOSING_BOOKED).copied();

    Ok(())
}

/// Walk the entry list in document order
///
/// The document position of every entry feeds the derived-id hash, so
/// dropped entries do not disturb the ids of the entries around them.
fn read_entries(block: &XmlNode, statement: &mut Statement) -> Result<(), ParseError> {
    for (position, entry) in block.children_named("Ntry").enumerate() {
        if let Some(transaction) = build_transaction(entry, position, &statement.currency)? {
            statement.transactions.push(transaction);
        }
    }
    Ok(())
}

/// Convert one entry, or drop it when its currency does not match
///
/// Mandatory fields are validated before the currency filter runs, so a
/// foreign-currency entry with a malformed amount or no date still
/// invalidates the whole document.
fn build_transaction(
    entry: &XmlNode,
    position: usize,
    currency: &str,
) -> Result<Option<Transaction>, ParseError> {
    let magnitude = fields::ENTRY_AMOUNT
        .amount(entry)?
        .ok_or_else(|| ParseError::missing_field(fields::ENTRY_AMOUNT.path()))?;
    let indicator = read_indicator(entry, fields::ENTRY_INDICATOR)?;
    let amount = match indicator {
        Some(direction) => direction.apply(magnitude),
        None => magnitude,
    };

    let value_date = fields::ENTRY_VALUE_DATE.date(entry)?;
    let date = fields::ENTRY_BOOKING_DATE
        .date(entry)?
        .or(value_date)
        .ok_or_else(|| ParseError::missing_field(fields::ENTRY_BOOKING_DATE.path()))?;

    if fields::ENTRY_AMOUNT.attr(entry, "Ccy").as_deref() != Some(currency) {
        return Ok(None);
    }

    // Money leaving the account goes to the creditor, money arriving
    // comes from the debtor. Without an indicator the sign decides.
    let direction = indicator.unwrap_or(if amount.is_sign_negative() {
        CreditDebit::Debit
    } else {
        CreditDebit::Credit
    });
    let payee = match direction {
        CreditDebit::Debit => first_text(
            entry,
            &[fields::ENTRY_CREDITOR, fields::ENTRY_CREDITOR_PARTY],
        )?,
        CreditDebit::Credit => {
            first_text(entry, &[fields::ENTRY_DEBTOR, fields::ENTRY_DEBTOR_PARTY])?
        }
    }
    .unwrap_or_default();

    let lines = fields::ENTRY_REMITTANCE.texts(entry);
    let memo = if lines.is_empty() {
        fields::ENTRY_INFO.text(entry)?.unwrap_or_default()
    } else {
        lines.join(" ")
    };

    let ref_num = first_text(entry, &[fields::ENTRY_REFERENCE, fields::ENTRY_TX_REFERENCE])?;
    let id = match &ref_num {
        Some(reference) => reference.clone(),
        None => derived_id(date, amount, &payee, &memo, position),
    };

    Ok(Some(Transaction {
        id,
        date,
        value_date,
        amount,
        payee,
        memo,
        ref_num,
    }))
}

/// Read and validate a credit/debit indicator
///
/// Absence is fine (the amount then keeps its own sign); unrecognized
/// indicator text is an error.
fn read_indicator(node: &XmlNode, field: Field) -> Result<Option<CreditDebit>, ParseError> {
    let Some(code) = field.text(node)? else {
        return Ok(None);
    };
    CreditDebit::from_code(&code)
        .map(Some)
        .ok_or_else(|| ParseError::invalid_field(field.path(), &code))
}

/// First present value among several descriptors
fn first_text(node: &XmlNode, candidates: &[Field]) -> Result<Option<String>, ParseError> {
    for field in candidates {
        if let Some(value) = field.text(node)? {
            return Ok(Some(value));
        }
    }
    Ok(None)
}

/// Derive a transaction id from the entry's stable fields
///
/// Used when the bank provides no reference. The document position is
/// part of the input, so two otherwise identical entries still get
/// distinct ids, and re-parsing the same document reproduces them.
fn derived_id(
    date: NaiveDate,
    amount: Decimal,
    payee: &str,
    memo: &str,
    position: usize,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{date}|{amount}|{payee}|{memo}|{position}"));
    format!("{:x}", hasher.finalize())
}

/// Disambiguate repeated ids
///
/// Banks reuse their reference for the entries of one batch. Later
/// occurrences get a numeric suffix; the first keeps the bare id.
/// Document order makes the outcome deterministic.
fn deduplicate_ids(transactions: &mut [Transaction]) {
    let mut seen: HashSet<String> = HashSet::new();

    for transaction in transactions.iter_mut() {
        if seen.insert(transaction.id.clone()) {
            continue;
        }
        let mut counter = 2;
        loop {
            let candidate = format!("{}-{}", transaction.id, counter);
            if seen.insert(candidate.clone()) {
                transaction.id = candidate;
                break;
            }
            counter += 1;
        }
    }
}
