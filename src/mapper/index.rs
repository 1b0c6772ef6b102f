//! Child Index
//!
//! Name-to-node lookup over one element's direct element children. Fields
//! remove what they consume; whatever is left afterwards was never claimed.

use indexmap::IndexMap;

use super::key::names_match;
use crate::dom::{DocumentAccess, NodeId};

#[derive(Debug)]
pub struct ChildIndex {
    /// Qualified name to (sibling position, node); a later same-named sibling
    /// replaces the entry but keeps the name's first position
    entries: IndexMap<String, (usize, NodeId)>,
}

impl ChildIndex {
    /// Index the element children of `element`, skipping text, comments and PIs
    pub fn build(doc: &dyn DocumentAccess, element: NodeId) -> Self {
        let children = doc.element_children(element);
        let mut entries = IndexMap::with_capacity(children.len());
        for (position, child) in children.into_iter().enumerate() {
            if let Some(name) = doc.node_name(child) {
                entries.insert(name.to_string(), (position, child));
            }
        }
        ChildIndex { entries }
    }

    /// Find `key`. In case-insensitive mode every casing of the name is a
    /// candidate and the last one in document order wins.
    pub fn lookup(&self, key: &str, ignore_case: bool) -> Option<NodeId> {
        if !ignore_case {
            return self.entries.get(key).map(|&(_, node)| node);
        }
        self.entries
            .iter()
            .filter(|(name, _)| names_match(name, key, true))
            .max_by_key(|(_, entry)| entry.0)
            .map(|(_, entry)| entry.1)
    }

    /// Mark every name matching `key` consumed
    pub fn remove_matching(&mut self, key: &str, ignore_case: bool) {
        self.entries.retain(|name, _| !names_match(name, key, ignore_case));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Unconsumed names, in document order
    pub fn leftover_keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::XmlDocument;

    fn index_of(xml: &str) -> (XmlDocument, ChildIndex) {
        let doc = XmlDocument::parse(xml).unwrap();
        let root = doc.root_element_id().unwrap();
        let index = ChildIndex::build(&doc, root);
        (doc, index)
    }

    #[test]
    fn test_skips_non_elements() {
        let (_, index) = index_of("<r> text <a/><!-- c --><b/><?pi?></r>");
        assert_eq!(index.leftover_keys(), vec!["a", "b"]);
    }

    #[test]
    fn test_last_sibling_wins() {
        let (doc, index) = index_of("<r><item>1</item><other/><item>2</item></r>");
        assert_eq!(index.len(), 2);
        assert_eq!(index.leftover_keys(), vec!["item", "other"]);

        let node = index.lookup("item", false).unwrap();
        assert_eq!(doc.text_content(node), "2");
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let (doc, mut index) = index_of("<r><String>x</String></r>");
        assert!(index.lookup("string", false).is_none());

        let node = index.lookup("string", true).unwrap();
        assert_eq!(doc.node_name(node), Some("String"));

        index.remove_matching("string", true);
        assert!(index.is_empty());
    }

    #[test]
    fn test_case_variants_collapse_to_last_sibling() {
        let (doc, mut index) = index_of("<r><item>1</item><Item>2</Item><other/></r>");
        assert_eq!(doc.text_content(index.lookup("item", true).unwrap()), "2");
        assert_eq!(doc.text_content(index.lookup("ITEM", true).unwrap()), "2");
        assert_eq!(doc.text_content(index.lookup("item", false).unwrap()), "1");

        index.remove_matching("item", true);
        assert_eq!(index.leftover_keys(), vec!["other"]);
    }

    #[test]
    fn test_remove_matching() {
        let (_, mut index) = index_of("<r><Item/><item/><keep/></r>");
        index.remove_matching("item", false);
        assert_eq!(index.leftover_keys(), vec!["Item", "keep"]);
        index.remove_matching("item", true);
        assert_eq!(index.leftover_keys(), vec!["keep"]);
    }
}
