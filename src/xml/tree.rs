//! Owned element tree for camt documents
//!
//! camt statements are small enough to hold fully in memory, so the reader
//! materializes them into this tree and the rest of the crate navigates it
//! by slash-separated paths of local element names.

/// A single XML element: local name, text content, attributes, children
///
/// Element names are stored without namespace prefixes, so lookups work
/// identically across camt namespace versions and prefixed documents.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlNode {
    name: String,
    text: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl XmlNode {
    /// Create an element with no text, attributes or children
    pub(crate) fn new(name: String) -> Self {
        XmlNode {
            name,
            text: String::new(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub(crate) fn push_attr(&mut self, key: String, value: String) {
        self.attributes.push((key, value));
    }

    pub(crate) fn push_child(&mut self, child: XmlNode) {
        self.children.push(child);
    }

    pub(crate) fn append_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Local element name (namespace prefix stripped)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Text content of this element
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Value of an attribute, if present
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// All direct children in document order
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// Direct children with the given local name, in document order
    ///
    /// The returned references borrow only from `self`, so they outlive
    /// the name they were looked up with.
    pub fn children_named<'s>(&'s self, name: &str) -> impl Iterator<Item = &'s XmlNode> + 's {
        let name = name.to_owned();
        self.children.iter().filter(move |child| child.name == name)
    }

    /// First direct child with the given local name
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|child| child.name == name)
    }

    /// First element matching a slash-separated path
    ///
    /// Matches the path segment by segment with backtracking, so
    /// `find("NtryDtls/TxDtls/Refs")` locates the first `Refs` anywhere
    /// under any `NtryDtls/TxDtls` chain, in document order.
    pub fn find(&self, path: &str) -> Option<&XmlNode> {
        let segments: Vec<&str> = path.split('/').collect();
        find_in(self, &segments)
    }

    /// All elements matching a slash-separated path, in document order
    pub fn find_all(&self, path: &str) -> Vec<&XmlNode> {
        let mut current = vec![self];
        for segment in path.split('/') {
            let mut next = Vec::new();
            for node in current {
                next.extend(node.children_named(segment));
            }
            current = next;
        }
        current
    }
}

fn find_in<'a>(node: &'a XmlNode, segments: &[&str]) -> Option<&'a XmlNode> {
    match segments.split_first() {
        None => Some(node),
        Some((name, rest)) => node
            .children_named(name)
            .find_map(|child| find_in(child, rest)),
    }
}
