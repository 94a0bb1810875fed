//! Error types for camt statement parsing
//!
//! This module defines all error types that can occur while turning a
//! camt XML document into a normalized statement. Errors are designed to
//! be descriptive and user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **XML Errors**: Malformed markup, encoding failures
//! - **Structure Errors**: Required document blocks absent
//! - **Field Errors**: Mandatory fields missing or malformed
//! - **Resolution Errors**: Currency or account identity cannot be
//!   determined from document or configuration

use thiserror::Error;

/// Main error type for statement parsing
///
/// This enum represents all possible errors that can occur while
/// parsing a camt document. Each variant includes relevant context
/// to help diagnose and resolve the issue. Any of these errors aborts
/// the document: no partial statement is ever produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading the document or writing output
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// XML markup could not be parsed
    #[error("XML error: {message}")]
    Xml {
        /// Description of the XML error
        message: String,
    },

    /// A required document block is absent
    ///
    /// Raised when the document carries no statement block at all, or a
    /// statement carries no account block.
    #[error("Invalid document structure: missing {element}")]
    InvalidStructure {
        /// Human-readable name of the missing block
        element: String,
    },

    /// A mandatory field is absent
    ///
    /// Entry dates and amounts are mandatory; an entry without them
    /// invalidates the whole document.
    #[error("Mandatory field {path} is missing")]
    MissingField {
        /// Slash-separated path of the field, relative to its block
        path: String,
    },

    /// A field is present but its text cannot be interpreted
    #[error("Invalid value '{value}' for field {path}")]
    InvalidField {
        /// Slash-separated path of the field, relative to its block
        path: String,
        /// The offending text
        value: String,
    },

    /// Neither the document nor the configuration declares a currency
    #[error(
        "No account currency found in statement; provide a fallback with the currency option (e.g. --currency EUR)"
    )]
    UnresolvedCurrency,

    /// Neither the document nor the configuration declares an account
    #[error(
        "No account identifier found in statement; provide a fallback with the iban option (e.g. --iban LT121000011101001000)"
    )]
    UnresolvedAccount,
}

// Conversion from io::Error to ParseError
impl From<std::io::Error> for ParseError {
    fn from(error: std::io::Error) -> Self {
        ParseError::Io {
            message: error.to_string(),
        }
    }
}

// Conversion from quick_xml::Error to ParseError
impl From<quick_xml::Error> for ParseError {
    fn from(error: quick_xml::Error) -> Self {
        ParseError::Xml {
            message: error.to_string(),
        }
    }
}

// Conversion from attribute errors raised while walking element attributes
impl From<quick_xml::events::attributes::AttrError> for ParseError {
    fn from(error: quick_xml::events::attributes::AttrError) -> Self {
        ParseError::Xml {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to ParseError
impl From<csv::Error> for ParseError {
    fn from(error: csv::Error) -> Self {
        ParseError::Io {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl ParseError {
    /// Create a FileNotFound error
    pub fn file_not_found(path: &str) -> Self {
        ParseError::FileNotFound {
            path: path.to_string(),
        }
    }

    /// Create an Xml error from any displayable cause
    pub fn xml(message: impl ToString) -> Self {
        ParseError::Xml {
            message: message.to_string(),
        }
    }

    /// Create an InvalidStructure error
    pub fn invalid_structure(element: &str) -> Self {
        ParseError::InvalidStructure {
            element: element.to_string(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(path: &str) -> Self {
        ParseError::MissingField {
            path: path.to_string(),
        }
    }

    /// Create an InvalidField error
    pub fn invalid_field(path: &str, value: &str) -> Self {
        ParseError::InvalidField {
            path: path.to_string(),
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::file_not_found(
        ParseError::FileNotFound { path: "statement.xml".to_string() },
        "File not found: statement.xml"
    )]
    #[case::io_error(
        ParseError::Io { message: "Permission denied".to_string() },
        "I/O error: Permission denied"
    )]
    #[case::xml_error(
        ParseError::Xml { message: "unexpected end of file".to_string() },
        "XML error: unexpected end of file"
    )]
    #[case::invalid_structure(
        ParseError::InvalidStructure { element: "statement block".to_string() },
        "Invalid document structure: missing statement block"
    )]
    #[case::missing_field(
        ParseError::MissingField { path: "Ntry/Amt".to_string() },
        "Mandatory field Ntry/Amt is missing"
    )]
    #[case::invalid_field(
        ParseError::InvalidField { path: "BookgDt".to_string(), value: "tomorrow".to_string() },
        "Invalid value 'tomorrow' for field BookgDt"
    )]
    fn test_error_display(#[case] error: ParseError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::currency(ParseError::UnresolvedCurrency, "currency")]
    #[case::account(ParseError::UnresolvedAccount, "iban")]
    fn test_resolution_errors_name_the_config_option(
        #[case] error: ParseError,
        #[case] option: &str,
    ) {
        assert!(error.to_string().contains(option));
    }

    #[rstest]
    #[case::file_not_found(
        ParseError::file_not_found("a.xml"),
        ParseError::FileNotFound { path: "a.xml".to_string() }
    )]
    #[case::invalid_structure(
        ParseError::invalid_structure("Acct"),
        ParseError::InvalidStructure { element: "Acct".to_string() }
    )]
    #[case::missing_field(
        ParseError::missing_field("Amt"),
        ParseError::MissingField { path: "Amt".to_string() }
    )]
    #[case::invalid_field(
        ParseError::invalid_field("Amt", "12,3,4"),
        ParseError::InvalidField { path: "Amt".to_string(), value: "12,3,4".to_string() }
    )]
    fn test_helper_functions(#[case] result: ParseError, #[case] expected: ParseError) {
        assert_eq!(result, expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: ParseError = io_error.into();
        assert!(matches!(error, ParseError::Io { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }
}
