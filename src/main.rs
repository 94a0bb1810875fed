//! camt Statements CLI
//!
//! Command-line interface for converting ISO-20022 camt bank statement
//! documents to CSV.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- statement.xml > statement.csv
//! cargo run -- --currency EUR statement.xml > statement.csv
//! cargo run -- --currency CHF --iban CH2609000000924238861 statement.xml > statement.csv
//! ```
//!
//! The program parses the camt document, builds the normalized statement,
//! and writes one CSV row per transaction to stdout. The `--currency` and
//! `--iban` fallbacks fill in values the document does not carry itself;
//! values found in the document always win.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, malformed document, etc.)

use camt_statements::cli;
use camt_statements::convert;
use std::process;

fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();
    let config = args.to_statement_config();

    // Convert the document, writing CSV rows to stdout
    let mut output = std::io::stdout();
    if let Err(e) = convert(&args.input_file, &config, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
