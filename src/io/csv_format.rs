//! CSV output for normalized statements
//!
//! This module centralizes the CSV format concerns:
//! - Column layout of the exported transaction rows
//! - Serialization of a statement to any writer
//!
//! The writer is the only consumer of a built statement, so the row
//! structure lives here rather than in the domain types.

use crate::types::{ParseError, Statement, Transaction};
use csv::WriterBuilder;
use serde::Serialize;
use std::io::Write;

/// Column order of the exported CSV
const COLUMNS: [&str; 9] = [
    "account_id",
    "currency",
    "id",
    "date",
    "value_date",
    "amount",
    "payee",
    "memo",
    "ref_num",
];

/// One exported transaction row
///
/// Every row repeats the statement-level account id and currency so the
/// file stays self-describing when statements are concatenated. Optional
/// fields serialize as empty cells.
#[derive(Debug, Serialize)]
struct Row<'a> {
    account_id: &'a str,
    currency: &'a str,
    id: &'a str,
    date: String,
    value_date: String,
    amount: String,
    payee: &'a str,
    memo: &'a str,
    ref_num: &'a str,
}

impl<'a> Row<'a> {
    fn new(statement: &'a Statement, transaction: &'a Transaction) -> Self {
        Row {
            account_id: &statement.account_id,
            currency: &statement.currency,
            id: &transaction.id,
            date: transaction.date.to_string(),
            value_date: transaction
                .value_date
                .map(|date| date.to_string())
                .unwrap_or_default(),
            amount: transaction.amount.to_string(),
            payee: &transaction.payee,
            memo: &transaction.memo,
            ref_num: transaction.ref_num.as_deref().unwrap_or(""),
        }
    }
}

/// Write a statement's transactions as CSV
///
/// Writes the header row followed by one row per transaction, in
/// statement order. A statement without transactions produces just the
/// header.
///
/// # Arguments
///
/// * `statement` - The normalized statement to export
/// * `output` - Mutable reference to a writer for outputting CSV
///
/// # Errors
///
/// Returns [`ParseError::Io`] when the underlying writer fails.
pub fn write_statement_csv(
    statement: &Statement,
    output: &mut dyn Write,
) -> Result<(), ParseError> {
    // The header is written explicitly so empty statements still
    // produce one; serde-driven headers only appear with the first row.
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(output);
    writer.write_record(COLUMNS)?;

    for transaction in &statement.transactions {
        writer.serialize(Row::new(statement, transaction))?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    const HEADER: &str = "account_id,currency,id,date,value_date,amount,payee,memo,ref_num\n";

    fn statement_with(transactions: Vec<Transaction>) -> Statement {
        let mut statement =
            Statement::new("LT000000000000000000".to_string(), "EUR".to_string());
        statement.transactions = transactions;
        statement
    }

    fn transaction(id: &str, amount: &str, payee: &str, memo: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            date: NaiveDate::from_str("2016-01-01").unwrap(),
            value_date: Some(NaiveDate::from_str("2015-12-31").unwrap()),
            amount: Decimal::from_str(amount).unwrap(),
            payee: payee.to_string(),
            memo: memo.to_string(),
            ref_num: Some(id.to_string()),
        }
    }

    fn render(statement: &Statement) -> String {
        let mut output = Vec::new();
        write_statement_csv(statement, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_empty_statement_writes_header_only() {
        let output = render(&statement_with(Vec::new()));

        assert_eq!(output, HEADER);
    }

    #[test]
    fn test_single_transaction_row() {
        let statement = statement_with(vec![transaction(
            "FC1261858984",
            "-0.29",
            "AB DNB Bankas",
            "Sąskaitos aptarnavimo mokestis",
        )]);

        let output = render(&statement);

        assert_eq!(
            output,
            format!(
                "{HEADER}LT000000000000000000,EUR,FC1261858984,2016-01-01,2015-12-31,\
                 -0.29,AB DNB Bankas,Sąskaitos aptarnavimo mokestis,FC1261858984\n"
            )
        );
    }

    #[test]
    fn test_missing_optionals_serialize_as_empty_cells() {
        let mut tx = transaction("abc123", "5.00", "", "");
        tx.value_date = None;
        tx.ref_num = None;
        let statement = statement_with(vec![tx]);

        let output = render(&statement);

        assert_eq!(
            output,
            format!("{HEADER}LT000000000000000000,EUR,abc123,2016-01-01,,5.00,,,\n")
        );
    }

    #[test]
    fn test_memo_with_comma_is_quoted() {
        let statement = statement_with(vec![transaction(
            "R1",
            "1.00",
            "Shop",
            "Invoice 42, March rent",
        )]);

        let output = render(&statement);

        assert!(output.contains("\"Invoice 42, March rent\""));
    }

    #[rstest]
    #[case::document_order(vec![("B", "2.00"), ("A", "1.00"), ("C", "3.00")])]
    #[case::single(vec![("only", "0.10")])]
    fn test_rows_follow_statement_order(#[case] entries: Vec<(&str, &str)>) {
        let transactions = entries
            .iter()
            .map(|(id, amount)| transaction(id, amount, "", ""))
            .collect();
        let statement = statement_with(transactions);

        let output = render(&statement);

        let ids: Vec<&str> = output
            .lines()
            .skip(1)
            .map(|line| line.split(',').nth(2).unwrap())
            .collect();
        let expected: Vec<&str> = entries.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, expected);
    }
}
