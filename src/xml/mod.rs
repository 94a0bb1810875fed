//! XML module
//!
//! Owned element tree plus the quick-xml loader that builds it.
//! Everything downstream works on local element names, so camt namespace
//! versions never leak past this module.

pub mod reader;
pub mod tree;

pub use reader::parse_document;
pub use tree::XmlNode;
