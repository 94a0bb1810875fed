//! Transaction-related types for camt statements
//!
//! This module defines the normalized transaction record produced for each
//! retained statement entry, plus the credit/debit indicator used to map
//! unsigned camt amounts onto signed decimals.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Direction of a statement entry or balance
///
/// camt documents carry unsigned magnitudes and mark the direction in a
/// separate `CdtDbtInd` element. Debits are money leaving the account and
/// map to negative amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditDebit {
    /// Money entering the account (`CRDT`)
    Credit,

    /// Money leaving the account (`DBIT`)
    Debit,
}

impl CreditDebit {
    /// Parse an ISO-20022 credit/debit indicator code
    ///
    /// # Arguments
    ///
    /// * `code` - The indicator text, `CRDT` or `DBIT`
    ///
    /// # Returns
    ///
    /// The parsed indicator, or `None` for any other text
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "CRDT" => Some(CreditDebit::Credit),
            "DBIT" => Some(CreditDebit::Debit),
            _ => None,
        }
    }

    /// Apply the direction to an unsigned magnitude
    ///
    /// Debits negate the amount; credits leave it untouched.
    pub fn apply(&self, amount: Decimal) -> Decimal {
        match self {
            CreditDebit::Credit => amount,
            CreditDebit::Debit => -amount,
        }
    }
}

/// Normalized statement transaction
///
/// Represents a single retained entry of a camt statement. Amounts are
/// signed (negative for debits), dates carry no time component, and every
/// transaction holds an identifier that is stable across re-parses of the
/// same document and unique within its statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Stable unique transaction identifier
    ///
    /// The bank's own entry reference when the document carries one,
    /// otherwise a hash derived from the entry's stable fields. Duplicate
    /// bank references are disambiguated with a numeric suffix.
    pub id: String,

    /// Posting date (booking date, value date when no booking date exists)
    pub date: NaiveDate,

    /// Value date, when the entry carries one
    pub value_date: Option<NaiveDate>,

    /// Signed transaction amount in the statement currency
    pub amount: Decimal,

    /// Counterparty name
    ///
    /// The creditor for debits, the debtor for credits. Empty when the
    /// document names no counterparty.
    pub payee: String,

    /// Remittance information
    ///
    /// Unstructured remittance lines joined with single spaces. Empty when
    /// the document carries none.
    pub memo: String,

    /// The bank's own entry reference (`AcctSvcrRef`), when present
    pub ref_num: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case::credit("CRDT", Some(CreditDebit::Credit))]
    #[case::debit("DBIT", Some(CreditDebit::Debit))]
    #[case::lowercase("crdt", None)]
    #[case::empty("", None)]
    #[case::garbage("BOTH", None)]
    fn test_indicator_from_code(#[case] code: &str, #[case] expected: Option<CreditDebit>) {
        assert_eq!(CreditDebit::from_code(code), expected);
    }

    #[rstest]
    #[case::credit_keeps_sign(CreditDebit::Credit, "1.29", "1.29")]
    #[case::debit_negates(CreditDebit::Debit, "1.29", "-1.29")]
    #[case::debit_zero(CreditDebit::Debit, "0", "0")]
    fn test_indicator_apply(
        #[case] indicator: CreditDebit,
        #[case] magnitude: &str,
        #[case] expected: &str,
    ) {
        let amount = Decimal::from_str(magnitude).unwrap();
        let expected = Decimal::from_str(expected).unwrap();
        assert_eq!(indicator.apply(amount), expected);
    }
}
