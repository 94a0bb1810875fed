//! XML document loading
//!
//! Builds an [`XmlNode`] tree from a camt document with quick-xml's event
//! reader. Text is accumulated exactly as written, with character and
//! entity references resolved in place; self-closing elements become
//! childless nodes. Trimming is left to the consumers, so whitespace
//! around a reference (`Fish &amp; Chips`) survives the event split.
//!
//! # Namespace Handling
//!
//! camt namespaces encode the message version
//! (`urn:iso:std:iso:20022:tech:xsd:camt.053.001.02` and friends), and some
//! banks prefix every element. Element and attribute names are therefore
//! reduced to their local part while building the tree, so the rest of the
//! crate never deals with namespaces at all.

use super::tree::XmlNode;
use crate::types::ParseError;
use quick_xml::events::{BytesRef, BytesStart, Event};
use quick_xml::Reader;
use std::io::BufRead;

/// Parse an XML document into an element tree
///
/// # Arguments
///
/// * `input` - Buffered reader over the document bytes
///
/// # Returns
///
/// The root element of the document
///
/// # Errors
///
/// Returns `ParseError::Xml` for malformed markup and
/// `ParseError::InvalidStructure` when the input contains no root element.
pub fn parse_document<R: BufRead>(input: R) -> Result<XmlNode, ParseError> {
    let mut reader = Reader::from_reader(input);

    let mut buf = Vec::new();
    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => stack.push(node_from_start(&e)?),
            Event::Empty(e) => {
                let node = node_from_start(&e)?;
                attach(node, &mut stack, &mut root)?;
            }
            Event::End(_) => {
                // The reader validates tag nesting, so the top of the
                // stack is always the element being closed.
                let node = stack
                    .pop()
                    .ok_or_else(|| ParseError::xml("closing tag without opening tag"))?;
                attach(node, &mut stack, &mut root)?;
            }
            Event::Text(e) => {
                let text = e.decode().map_err(ParseError::xml)?;
                if let Some(node) = stack.last_mut() {
                    node.append_text(&text);
                }
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(e.as_ref()).to_string();
                if let Some(node) = stack.last_mut() {
                    node.append_text(&text);
                }
            }
            // References arrive as separate events between text fragments
            Event::GeneralRef(e) => {
                let text = resolve_reference(&e)?;
                if let Some(node) = stack.last_mut() {
                    node.append_text(&text);
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions and doctypes
            // carry nothing a statement needs.
            _ => {}
        }
        buf.clear();
    }

    root.ok_or_else(|| ParseError::invalid_structure("root element"))
}

/// Build a childless node from an opening tag, local names only
fn node_from_start(e: &BytesStart) -> Result<XmlNode, ParseError> {
    let name = String::from_utf8_lossy(e.name().local_name().as_ref()).to_string();
    let mut node = XmlNode::new(name);

    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).to_string();
        let value = String::from_utf8_lossy(&attr.value).to_string();
        node.push_attr(key, value);
    }

    Ok(node)
}

/// Resolve a character or entity reference to its replacement text
///
/// Character references (`&#38;`, `&#x263A;`) and the five predefined XML
/// entities are supported. camt documents declare no custom entities, so
/// anything else is malformed markup.
fn resolve_reference(reference: &BytesRef) -> Result<String, ParseError> {
    if let Some(ch) = reference.resolve_char_ref().map_err(ParseError::xml)? {
        return Ok(ch.to_string());
    }

    let name = reference.decode().map_err(ParseError::xml)?;
    let replacement = match name.as_ref() {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "apos" => "'",
        "quot" => "\"",
        _ => return Err(ParseError::xml(format!("unknown entity reference &{name};"))),
    };
    Ok(replacement.to_string())
}

/// Hand a completed element to its parent, or promote it to root
fn attach(
    node: XmlNode,
    stack: &mut Vec<XmlNode>,
    root: &mut Option<XmlNode>,
) -> Result<(), ParseError> {
    match stack.last_mut() {
        Some(parent) => parent.push_child(node),
        None => {
            if root.is_some() {
                return Err(ParseError::xml("multiple root elements"));
            }
            *root = Some(node);
        }
    }
    Ok(())
}
