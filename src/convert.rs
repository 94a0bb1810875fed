//! End-to-end conversion pipeline
//!
//! This module provides the single entry point shared by the binary and
//! the integration tests: open a camt file, parse the XML tree, build
//! the normalized statement, and export it as CSV.
//!
//! # Error Handling
//!
//! Any failure aborts the conversion before a byte of CSV is written, so
//! a non-zero exit never leaves a partial export behind.

use crate::core::build_statement;
use crate::io::write_statement_csv;
use crate::types::{ParseError, StatementConfig};
use crate::xml::parse_document;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Convert a camt file to CSV
///
/// # Arguments
///
/// * `input` - Path to the camt XML document
/// * `config` - Host-supplied fallbacks for currency and account id
/// * `output` - Mutable reference to a writer for the exported CSV
///
/// # Returns
///
/// * `Ok(())` if the document was converted and written completely
/// * `Err(ParseError)` if reading, parsing or building failed
///
/// # Examples
///
/// ```no_run
/// use camt_statements::{convert, StatementConfig};
/// use std::io;
/// use std::path::Path;
///
/// let config = StatementConfig::default();
/// let mut output = io::stdout();
///
/// convert(Path::new("statement.xml"), &config, &mut output)
///     .expect("Conversion failed");
/// ```
pub fn convert(
    input: &Path,
    config: &StatementConfig,
    output: &mut dyn Write,
) -> Result<(), ParseError> {
    let file = File::open(input).map_err(|error| open_error(input, error))?;
    let document = parse_document(BufReader::new(file))?;
    let statement = build_statement(&document, config)?;
    write_statement_csv(&statement, output)
}

/// Keep the path in the error so the user knows which file failed
fn open_error(input: &Path, error: std::io::Error) -> ParseError {
    match error.kind() {
        std::io::ErrorKind::NotFound => {
            ParseError::file_not_found(&input.display().to_string())
        }
        _ => ParseError::Io {
            message: format!("Failed to open {}: {}", input.display(), error),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary camt file for testing
    fn create_temp_xml(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    const MINIMAL_STATEMENT: &str = "\
        <Document xmlns=\"urn:iso:std:iso:20022:tech:xsd:camt.053.001.02\">\
        <BkToCstmrStmt><Stmt>\
        <Acct><Id><IBAN>LT000000000000000000</IBAN></Id><Ccy>EUR</Ccy></Acct>\
        <Ntry><Amt Ccy=\"EUR\">0.29</Amt><CdtDbtInd>DBIT</CdtDbtInd>\
        <BookgDt><Dt>2016-01-01</Dt></BookgDt>\
        <AcctSvcrRef>FC1261858984</AcctSvcrRef></Ntry>\
        </Stmt></BkToCstmrStmt></Document>";

    #[test]
    fn test_convert_writes_header_and_rows() {
        let file = create_temp_xml(MINIMAL_STATEMENT);
        let mut output = Vec::new();

        let result = convert(file.path(), &StatementConfig::default(), &mut output);
        assert!(result.is_ok());

        let output_str = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = output_str.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("account_id,currency,id"));
        assert!(lines[1].contains("LT000000000000000000,EUR,FC1261858984,2016-01-01"));
        assert!(lines[1].contains("-0.29"));
    }

    #[test]
    fn test_convert_applies_config_fallbacks() {
        let xml = "<Document><BkToCstmrStmt><Stmt><Acct/></Stmt></BkToCstmrStmt></Document>";
        let file = create_temp_xml(xml);
        let config = StatementConfig {
            currency: Some("XXX".to_string()),
            iban: Some("CH2609000000924238861".to_string()),
        };
        let mut output = Vec::new();

        let result = convert(file.path(), &config, &mut output);
        assert!(result.is_ok());

        let output_str = String::from_utf8(output).unwrap();
        assert_eq!(output_str.lines().count(), 1);
    }

    #[test]
    fn test_convert_missing_file() {
        let mut output = Vec::new();

        let result = convert(
            Path::new("no-such-statement.xml"),
            &StatementConfig::default(),
            &mut output,
        );

        assert_eq!(
            result,
            Err(ParseError::file_not_found("no-such-statement.xml"))
        );
    }

    #[test]
    fn test_convert_malformed_xml() {
        let file = create_temp_xml("<Document><BkToCstmrStmt></Document>");
        let mut output = Vec::new();

        let result = convert(file.path(), &StatementConfig::default(), &mut output);

        assert!(matches!(result, Err(ParseError::Xml { .. })));
    }

    #[test]
    fn test_failed_conversion_writes_nothing() {
        // Entry without any date is a fatal field error
        let xml = "<Document><BkToCstmrStmt><Stmt>\
                   <Acct><Id><IBAN>LT0</IBAN></Id><Ccy>EUR</Ccy></Acct>\
                   <Ntry><Amt Ccy=\"EUR\">1.00</Amt><CdtDbtInd>CRDT</CdtDbtInd></Ntry>\
                   </Stmt></BkToCstmrStmt></Document>";
        let file = create_temp_xml(xml);
        let mut output = Vec::new();

        let result = convert(file.path(), &StatementConfig::default(), &mut output);

        assert_eq!(result, Err(ParseError::missing_field("BookgDt")));
        assert!(output.is_empty());
    }
}
