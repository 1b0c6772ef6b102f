//! XML Document - Arena-based DOM representation
//!
//! Owned arena storage with:
//! - Arena allocation for nodes and attributes
//! - NodeId indices for traversal
//! - Qualified names resolved once at build time
//!
//! Text-to-tree parsing is delegated to `roxmltree`; the result is copied
//! into the arena so documents are owned, `Send + Sync` and lifetime free.

use super::node::{NodeId, NodeKind, XmlAttribute, XmlNode};
use super::DocumentAccess;
use crate::error::{MapError, Result};

/// An XML document stored in arena format
#[derive(Debug, Clone)]
pub struct XmlDocument {
    /// Arena of nodes, index 0 is the document node
    nodes: Vec<XmlNode>,
    /// Arena of attributes
    attributes: Vec<XmlAttribute>,
    /// Root element node ID (not document node)
    root_element: Option<NodeId>,
}

impl XmlDocument {
    /// Parse an XML document from text.
    ///
    /// DTDs are accepted (entities they declare are expanded by the parser).
    /// Namespace prefixes must be declared, as required by XML Namespaces.
    pub fn parse(text: &str) -> Result<Self> {
        let options = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..roxmltree::ParsingOptions::default()
        };
        let parsed = roxmltree::Document::parse_with_options(text, options)?;
        let doc = Self::from_roxmltree(&parsed);
        tracing::trace!(nodes = doc.node_count(), "built document arena");
        Ok(doc)
    }

    /// Copy an already parsed `roxmltree` document into an arena
    pub fn from_roxmltree(source: &roxmltree::Document<'_>) -> Self {
        let mut doc = XmlDocument {
            nodes: vec![XmlNode::document()],
            attributes: Vec::new(),
            root_element: None,
        };

        // (source node, arena parent, depth)
        let mut stack: Vec<(roxmltree::Node<'_, '_>, NodeId, u16)> = source
            .root()
            .children()
            .rev()
            .map(|child| (child, 0, 1))
            .collect();

        while let Some((source_node, parent_id, depth)) = stack.pop() {
            let node_id = match source_node.node_type() {
                roxmltree::NodeType::Element => doc.push_element(source_node, parent_id, depth),
                roxmltree::NodeType::Text => {
                    let content = source_node.text().unwrap_or("");
                    doc.push(XmlNode::text(content, parent_id, depth))
                }
                roxmltree::NodeType::Comment => {
                    let content = source_node.text().unwrap_or("");
                    doc.push(XmlNode::comment(content, parent_id, depth))
                }
                roxmltree::NodeType::PI => {
                    let target = source_node.pi().map(|pi| pi.target).unwrap_or("");
                    doc.push(XmlNode::processing_instruction(target, parent_id, depth))
                }
                roxmltree::NodeType::Root => continue,
            };

            if source_node.is_element() {
                stack.extend(
                    source_node
                        .children()
                        .rev()
                        .map(|child| (child, node_id, depth.saturating_add(1))),
                );
            }
        }

        doc
    }

    /// Add an element with its attributes, resolving qualified names
    fn push_element(
        &mut self,
        source: roxmltree::Node<'_, '_>,
        parent_id: NodeId,
        depth: u16,
    ) -> NodeId {
        let mut node = XmlNode::element(qualified_name(source), parent_id, depth);

        let attributes = source.attributes().map(|attr| {
            let name = match attr.namespace().and_then(|uri| prefix_for(source, uri)) {
                Some(prefix) => format!("{prefix}:{}", attr.name()),
                None => attr.name().to_string(),
            };
            XmlAttribute::new(name, attr.value())
        });
        self.push_attributes(&mut node, attributes);

        let node_id = self.push(node);
        if self.root_element.is_none() && parent_id == 0 {
            self.root_element = Some(node_id);
        }
        node_id
    }

    /// Append `attributes` to the arena as `node`'s attribute slice
    fn push_attributes(
        &mut self,
        node: &mut XmlNode,
        attributes: impl Iterator<Item = XmlAttribute>,
    ) {
        let attr_start = self.attributes.len();
        self.attributes.extend(attributes);
        node.attr_start = attr_start as u32;
        node.attr_count = (self.attributes.len() - attr_start) as u32;
    }

    /// Add a node to the arena and link it under its parent
    fn push(&mut self, node: XmlNode) -> NodeId {
        let parent_id = node.parent.unwrap_or(0);
        let node_id = self.nodes.len() as NodeId;
        self.nodes.push(node);
        self.link_child(parent_id, node_id);
        node_id
    }

    /// Link a child node to its parent
    fn link_child(&mut self, parent_id: NodeId, child_id: NodeId) {
        let last_child_opt = self.nodes[parent_id as usize].last_child;

        if let Some(last_child_id) = last_child_opt {
            self.nodes[child_id as usize].prev_sibling = Some(last_child_id);
            self.nodes[last_child_id as usize].next_sibling = Some(child_id);
        } else {
            self.nodes[parent_id as usize].first_child = Some(child_id);
        }
        self.nodes[parent_id as usize].last_child = Some(child_id);
    }

    /// Root element ID, or an error for documents without one
    pub fn require_root(&self) -> Result<NodeId> {
        self.root_element.ok_or(MapError::NoRootElement)
    }

    /// Get attributes for an element
    pub fn attributes(&self, id: NodeId) -> &[XmlAttribute] {
        match self.nodes.get(id as usize) {
            Some(node) => {
                let start = node.attr_start as usize;
                let end = start + node.attr_count as usize;
                &self.attributes[start..end]
            }
            None => &[],
        }
    }

    /// Iterate over children of a node
    pub fn children(&self, id: NodeId) -> ChildIter<'_> {
        let first = self.nodes.get(id as usize).and_then(|n| n.first_child);
        ChildIter { doc: self, next: first }
    }

    /// Get total number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// `prefix:local` when the element's namespace is bound to a prefix
fn qualified_name(node: roxmltree::Node<'_, '_>) -> String {
    let tag = node.tag_name();
    match tag.namespace().and_then(|uri| prefix_for(node, uri)) {
        Some(prefix) => format!("{prefix}:{}", tag.name()),
        None => tag.name().to_string(),
    }
}

fn prefix_for<'input>(node: roxmltree::Node<'_, 'input>, uri: &str) -> Option<&'input str> {
    node.lookup_prefix(uri).filter(|prefix| !prefix.is_empty())
}

/// Iterator over child nodes
pub struct ChildIter<'d> {
    doc: &'d XmlDocument,
    next: Option<NodeId>,
}

impl<'d> Iterator for ChildIter<'d> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.doc.nodes.get(current as usize).and_then(|n| n.next_sibling);
        Some(current)
    }
}

impl DocumentAccess for XmlDocument {
    fn root_element_id(&self) -> Option<NodeId> {
        self.root_element
    }

    fn get_node(&self, id: NodeId) -> Option<&XmlNode> {
        self.nodes.get(id as usize)
    }

    fn node_name(&self, id: NodeId) -> Option<&str> {
        let node = self.get_node(id)?;
        match node.kind {
            NodeKind::Element | NodeKind::ProcessingInstruction => Some(node.value.as_str()),
            _ => None,
        }
    }

    fn text(&self, id: NodeId) -> Option<&str> {
        let node = self.get_node(id)?;
        node.is_text().then_some(node.value.as_str())
    }

    fn get_attribute(&self, node_id: NodeId, name: &str) -> Option<&str> {
        self.attributes(node_id)
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    fn get_attribute_values(&self, node_id: NodeId) -> Vec<(&str, &str)> {
        self.attributes(node_id)
            .iter()
            .map(|attr| (attr.name.as_str(), attr.value.as_str()))
            .collect()
    }

    fn children_vec(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let doc = XmlDocument::parse("<root>hello</root>").unwrap();
        let root = doc.root_element_id().unwrap();
        assert_eq!(doc.node_name(root), Some("root"));
        assert_eq!(doc.text_content(root), "hello");
    }

    #[test]
    fn test_siblings_and_kinds() {
        let doc = XmlDocument::parse("<root><a/> <!--c--><b/><?pi x?></root>").unwrap();
        let root = doc.root_element_id().unwrap();
        let kinds: Vec<_> = doc
            .children(root)
            .map(|id| doc.node_kind(id).unwrap())
            .collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Element,
                NodeKind::Text,
                NodeKind::Comment,
                NodeKind::Element,
                NodeKind::ProcessingInstruction,
            ]
        );
        assert_eq!(doc.element_children(root).len(), 2);

        let first = doc.get_node(doc.element_children(root)[0]).unwrap();
        assert!(first.prev_sibling.is_none());
        assert!(first.next_sibling.is_some());
        assert_eq!(first.parent, Some(root));
    }

    #[test]
    fn test_qualified_names() {
        let doc = XmlDocument::parse(
            concat!(
                r#"<ns:root xmlns:ns="urn:test" xmlns="urn:default">"#,
                r#"<ns:item ns:id="1" id="2"/><plain/></ns:root>"#,
            ),
        )
        .unwrap();
        let root = doc.root_element_id().unwrap();
        assert_eq!(doc.node_name(root), Some("ns:root"));

        let children = doc.element_children(root);
        assert_eq!(doc.node_name(children[0]), Some("ns:item"));
        assert_eq!(doc.node_name(children[1]), Some("plain"));
        assert_eq!(doc.get_attribute(children[0], "ns:id"), Some("1"));
        assert_eq!(doc.get_attribute(children[0], "id"), Some("2"));
        assert_eq!(
            doc.get_attribute_values(children[0]),
            vec![("ns:id", "1"), ("id", "2")]
        );
    }

    #[test]
    fn test_text_content_concatenates_descendants() {
        let doc = XmlDocument::parse("<r>a<b>b<c>c</c></b><![CDATA[d]]></r>").unwrap();
        let root = doc.require_root().unwrap();
        assert_eq!(doc.text_content(root), "abcd");
    }

    #[test]
    fn test_wide_element_keeps_every_attribute() {
        let count = u16::MAX as usize + 10;
        let mut doc = XmlDocument::from_roxmltree(&roxmltree::Document::parse("<r/>").unwrap());
        let mut node = XmlNode::element("wide", 0, 1);
        let attributes = (0..count).map(|i| XmlAttribute::new(format!("a{i}"), i.to_string()));
        doc.push_attributes(&mut node, attributes);
        let wide = doc.push(node);

        assert_eq!(doc.attributes(wide).len(), count);
        let last = format!("a{}", count - 1);
        assert_eq!(doc.get_attribute(wide, &last), Some((count - 1).to_string().as_str()));
        assert!(doc.attributes(doc.root_element_id().unwrap()).is_empty());
    }

    #[test]
    fn test_parse_error() {
        let err = XmlDocument::parse("<root><open></root>").unwrap_err();
        assert!(matches!(err, MapError::Document(_)));
    }
}
