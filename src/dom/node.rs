//! XML Node representation
//!
//! Uses NodeId (u32) for compact node references into the document arena.

/// Compact node identifier (index into arena)
pub type NodeId = u32;

/// Type of XML node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Document root
    Document,
    /// Element node
    Element,
    /// Text content (CDATA sections are folded in)
    Text,
    /// Comment
    Comment,
    /// Processing instruction
    ProcessingInstruction,
}

/// An XML node in the arena
#[derive(Debug, Clone)]
pub struct XmlNode {
    /// Type of this node
    pub kind: NodeKind,
    /// Parent node (None for document root)
    pub parent: Option<NodeId>,
    /// First child node
    pub first_child: Option<NodeId>,
    /// Last child node
    pub last_child: Option<NodeId>,
    /// Previous sibling
    pub prev_sibling: Option<NodeId>,
    /// Next sibling
    pub next_sibling: Option<NodeId>,
    /// Qualified name for elements and PIs, content for text and comments
    pub value: String,
    /// Start of attributes in attribute arena (for elements)
    pub attr_start: u32,
    /// Number of attributes
    pub attr_count: u32,
    /// Depth in document tree
    pub depth: u16,
}

impl XmlNode {
    fn new(kind: NodeKind, value: String, parent: Option<NodeId>, depth: u16) -> Self {
        XmlNode {
            kind,
            parent,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            value,
            attr_start: 0,
            attr_count: 0,
            depth,
        }
    }

    /// Create a new document root node
    pub fn document() -> Self {
        Self::new(NodeKind::Document, String::new(), None, 0)
    }

    /// Create a new element node
    pub fn element(name: impl Into<String>, parent: NodeId, depth: u16) -> Self {
        Self::new(NodeKind::Element, name.into(), Some(parent), depth)
    }

    /// Create a new text node
    pub fn text(content: impl Into<String>, parent: NodeId, depth: u16) -> Self {
        Self::new(NodeKind::Text, content.into(), Some(parent), depth)
    }

    /// Create a new comment node
    pub fn comment(content: impl Into<String>, parent: NodeId, depth: u16) -> Self {
        Self::new(NodeKind::Comment, content.into(), Some(parent), depth)
    }

    /// Create a processing instruction node
    pub fn processing_instruction(target: impl Into<String>, parent: NodeId, depth: u16) -> Self {
        Self::new(NodeKind::ProcessingInstruction, target.into(), Some(parent), depth)
    }

    /// Check if this is an element node
    #[inline]
    pub fn is_element(&self) -> bool {
        self.kind == NodeKind::Element
    }

    /// Check if this is a text node
    #[inline]
    pub fn is_text(&self) -> bool {
        self.kind == NodeKind::Text
    }

    /// Check if this node has children
    #[inline]
    pub fn has_children(&self) -> bool {
        self.first_child.is_some()
    }
}

/// Stored attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    /// Qualified attribute name (`prefix:local` when namespaced)
    pub name: String,
    /// Attribute value, entities already decoded
    pub value: String,
}

impl XmlAttribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        XmlAttribute {
            name: name.into(),
            value: value.into(),
        }
    }
}
