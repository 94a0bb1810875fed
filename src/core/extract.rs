//! Typed field extraction for camt documents
//!
//! Everything the builder reads out of a document goes through a [`Field`]
//! descriptor: a slash-separated path of local element names plus a flag
//! marking the field as mandatory. The typed accessors interpret the
//! located element as text, a decimal amount or a date container, so bank
//! quirks (comma decimal separators, `DtTm` instead of `Dt`, stray
//! non-breaking spaces) are normalized in one place instead of at every
//! call site.

use crate::types::ParseError;
use crate::xml::XmlNode;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Descriptor for a single value inside a camt subtree
///
/// Paths are evaluated relative to the node handed to the accessor, with
/// backtracking over repeated elements. A `required` descriptor turns an
/// absent value into `ParseError::MissingField`; optional descriptors
/// yield `Ok(None)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    path: &'static str,
    required: bool,
}

impl Field {
    /// Create an optional field descriptor
    pub const fn new(path: &'static str) -> Self {
        Field {
            path,
            required: false,
        }
    }

    /// Create a mandatory field descriptor
    pub const fn required(path: &'static str) -> Self {
        Field {
            path,
            required: true,
        }
    }

    /// The path this descriptor evaluates
    pub fn path(&self) -> &'static str {
        self.path
    }

    /// Extract the field as trimmed text
    ///
    /// Whitespace-only content counts as absent.
    pub fn text(&self, node: &XmlNode) -> Result<Option<String>, ParseError> {
        let value = node
            .find(self.path)
            .map(|found| found.text().trim())
            .filter(|text| !text.is_empty())
            .map(str::to_string);
        self.finish(value)
    }

    /// Extract every match of the field as trimmed text, in document order
    ///
    /// Whitespace-only matches are skipped. Used for repeatable elements
    /// such as unstructured remittance lines.
    pub fn texts(&self, node: &XmlNode) -> Vec<String> {
        node.find_all(self.path)
            .into_iter()
            .map(|found| found.text().trim())
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Extract an attribute of the first match
    ///
    /// Absence of the element or the attribute is `None`; the required
    /// flag does not apply to attributes.
    pub fn attr(&self, node: &XmlNode, name: &str) -> Option<String> {
        node.find(self.path)
            .and_then(|found| found.attr(name))
            .map(str::to_string)
    }

    /// Extract the field as a decimal amount
    ///
    /// Accepts a leading sign, a comma as decimal separator, and embedded
    /// spaces or non-breaking spaces as digit grouping.
    ///
    /// # Errors
    ///
    /// `ParseError::InvalidField` when the text does not parse as a
    /// decimal; `ParseError::MissingField` when the field is required and
    /// absent.
    pub fn amount(&self, node: &XmlNode) -> Result<Option<Decimal>, ParseError> {
        let value = match node.find(self.path) {
            Some(found) if !found.text().trim().is_empty() => {
                Some(self.parse_amount(found.text())?)
            }
            _ => None,
        };
        self.finish(value)
    }

    /// Extract the field as a date
    ///
    /// The located element is a camt date container: the actual value
    /// lives in a `Dt` or `DtTm` child. Any time component is truncated,
    /// only the leading `YYYY-MM-DD` is kept.
    ///
    /// # Errors
    ///
    /// `ParseError::InvalidField` when the value does not start with a
    /// valid ISO-8601 date; `ParseError::MissingField` when the field is
    /// required and no date is present.
    pub fn date(&self, node: &XmlNode) -> Result<Option<NaiveDate>, ParseError> {
        let value = match node.find(self.path) {
            Some(container) => self.parse_date_container(container)?,
            None => None,
        };
        self.finish(value)
    }

    fn parse_amount(&self, raw: &str) -> Result<Decimal, ParseError> {
        let normalized: String = raw
            .trim()
            .chars()
            .filter(|c| *c != ' ' && *c != '\u{a0}')
            .map(|c| if c == ',' { '.' } else { c })
            .collect();
        let unsigned = normalized.strip_prefix('+').unwrap_or(&normalized);

        Decimal::from_str(unsigned).map_err(|_| ParseError::invalid_field(self.path, raw.trim()))
    }

    fn parse_date_container(&self, container: &XmlNode) -> Result<Option<NaiveDate>, ParseError> {
        let value = container.child("Dt").or_else(|| container.child("DtTm"));
        let raw = match value {
            Some(node) => node.text().trim(),
            None => return Ok(None),
        };
        if raw.is_empty() {
            return Ok(None);
        }

        let prefix = raw
            .get(..10)
            .ok_or_else(|| ParseError::invalid_field(self.path, raw))?;
        let date = NaiveDate::parse_from_str(prefix, "%Y-%m-%d")
            .map_err(|_| ParseError::invalid_field(self.path, raw))?;
        Ok(Some(date))
    }

    fn finish<T>(&self, value: Option<T>) -> Result<Option<T>, ParseError> {
        if self.required && value.is_none() {
            return Err(ParseError::missing_field(self.path));
        }
        Ok(value)
    }
}
