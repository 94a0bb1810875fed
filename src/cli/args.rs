use crate::types::StatementConfig;
use clap::Parser;
use std::path::PathBuf;

/// Convert ISO-20022 camt bank statements to CSV
#[derive(Parser, Debug)]
#[command(name = "camt-statements")]
#[command(about = "Convert ISO-20022 camt bank statements to CSV", long_about = None)]
pub struct CliArgs {
    /// Input camt XML document
    #[arg(value_name = "INPUT", help = "Path to the camt XML document")]
    pub input_file: PathBuf,

    /// Fallback currency for documents that carry none
    #[arg(
        long = "currency",
        value_name = "CODE",
        help = "Currency code used when the account block has no Ccy element (e.g. EUR)"
    )]
    pub currency: Option<String>,

    /// Fallback account identifier for documents that carry none
    #[arg(
        long = "iban",
        value_name = "ID",
        help = "Account identifier used when the account block has no Id element"
    )]
    pub iban: Option<String>,
}

impl CliArgs {
    /// Create a StatementConfig from CLI arguments
    ///
    /// The configured values only take effect for documents that do not
    /// carry the matching element themselves.
    ///
    /// # Returns
    ///
    /// A `StatementConfig` with the optional fallbacks from the command line.
    pub fn to_statement_config(&self) -> StatementConfig {
        StatementConfig {
            currency: self.currency.clone(),
            iban: self.iban.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::no_fallbacks(&["program", "input.xml"], None, None)]
    #[case::currency(&["program", "--currency", "EUR", "input.xml"], Some("EUR"), None)]
    #[case::iban(&["program", "--iban", "LT121000011101001000", "input.xml"], None, Some("LT121000011101001000"))]
    #[case::both(
        &["program", "--currency", "CHF", "--iban", "CH2609000000924238861", "input.xml"],
        Some("CHF"),
        Some("CH2609000000924238861")
    )]
    fn test_fallback_options(
        #[case] args: &[&str],
        #[case] currency: Option<&str>,
        #[case] iban: Option<&str>,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.currency.as_deref(), currency);
        assert_eq!(parsed.iban.as_deref(), iban);
    }

    #[test]
    fn test_input_path_is_positional() {
        let parsed = CliArgs::try_parse_from(["program", "statement.xml"]).unwrap();
        assert_eq!(parsed.input_file, PathBuf::from("statement.xml"));
    }

    #[test]
    fn test_statement_config_conversion() {
        let parsed =
            CliArgs::try_parse_from(["program", "--currency", "XXX", "input.xml"]).unwrap();
        let config = parsed.to_statement_config();

        assert_eq!(config.currency.as_deref(), Some("XXX"));
        assert_eq!(config.iban, None);
    }

    #[rstest]
    #[case::missing_input(&["program"])]
    #[case::currency_without_value(&["program", "--currency"])]
    #[case::unknown_option(&["program", "--convert-rates", "input.xml"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
