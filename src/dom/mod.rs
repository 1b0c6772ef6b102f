//! DOM Module - Arena-based XML Document
//!
//! The mapping engine consumes trees through the [`DocumentAccess`] trait.
//! [`XmlDocument`] is the bundled implementation:
//! - Arena allocation for nodes
//! - NodeId (u32) indices with parent/sibling links
//! - Qualified (`prefix:local`) element and attribute names

pub mod document;
pub mod node;

pub use document::XmlDocument;
pub use node::{NodeId, NodeKind, XmlAttribute, XmlNode};

/// Trait for document access - the mapper only ever reads trees through this,
/// so any arena that can answer these questions can be mapped.
///
/// Every method is object safe; the engine works on `&dyn DocumentAccess`.
pub trait DocumentAccess {
    /// ID of the document node (parent of the root element)
    fn document_node_id(&self) -> NodeId {
        0
    }

    /// Get root element ID
    fn root_element_id(&self) -> Option<NodeId>;

    /// Get a node by ID
    fn get_node(&self, id: NodeId) -> Option<&XmlNode>;

    /// Get node kind
    fn node_kind(&self, id: NodeId) -> Option<NodeKind> {
        self.get_node(id).map(|n| n.kind)
    }

    /// Get qualified node name (elements and PIs only)
    fn node_name(&self, id: NodeId) -> Option<&str>;

    /// Get parent node ID
    fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.get_node(id).and_then(|n| n.parent)
    }

    /// Get the value of a text node
    fn text(&self, id: NodeId) -> Option<&str>;

    /// Get attribute value by qualified name
    fn get_attribute(&self, node_id: NodeId, name: &str) -> Option<&str>;

    /// Get all attribute names and values, in document order
    fn get_attribute_values(&self, node_id: NodeId) -> Vec<(&str, &str)>;

    /// Direct children, all kinds, in document order
    fn children_vec(&self, id: NodeId) -> Vec<NodeId>;

    /// Direct element children in document order
    fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children_vec(id)
            .into_iter()
            .filter(|&c| self.node_kind(c) == Some(NodeKind::Element))
            .collect()
    }

    /// Concatenated text of all descendant text nodes
    fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            match self.node_kind(current) {
                Some(NodeKind::Text) => out.push_str(self.text(current).unwrap_or("")),
                Some(NodeKind::Element) | Some(NodeKind::Document) => {
                    // reversed so the first child pops first
                    stack.extend(self.children_vec(current).into_iter().rev());
                }
                _ => {}
            }
        }
        out
    }
}
