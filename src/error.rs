//! Mapping errors and path reporting
//!
//! Every failure raised while walking a tree carries the slash-separated path
//! of the element it concerns plus that element's [`NodeId`], so a caller can
//! locate the problem without re-walking the document.

use crate::dom::{DocumentAccess, NodeId, NodeKind};

/// Result type alias for mapping operations
pub type Result<T> = std::result::Result<T, MapError>;

/// Structured mapping failure
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// A required field resolved to nothing
    #[error("key {key} is required on {path}")]
    MissingRequiredField { key: String, path: String, node: NodeId },

    /// Strict mode found children no schema field claimed
    #[error("unknown key(s) {} in {path}", quote_keys(.keys))]
    UnknownKeys { keys: Vec<String>, path: String, node: NodeId },

    /// A mapper was pointed at a node it cannot read
    #[error("{mapper} got invalid source node from {path} key: {key}")]
    InvalidSourceNode {
        mapper: &'static str,
        key: String,
        path: String,
        node: NodeId,
    },

    /// A leaf value could not be converted to its target type
    #[error("key {key} in {path}: cannot convert {value:?} to {target}")]
    ValueCoercion {
        key: String,
        value: String,
        target: &'static str,
        path: String,
        node: NodeId,
    },

    /// A typed record field held a value of another shape
    #[error("field {field} does not hold {expected}")]
    RecordShape { field: String, expected: &'static str },

    /// The XML text could not be parsed into a tree
    #[error("XML document error: {0}")]
    Document(#[from] roxmltree::Error),

    #[error("document has no root element")]
    NoRootElement,
}

impl MapError {
    /// Required field missing under `node`
    pub fn missing_required(
        doc: &dyn DocumentAccess,
        node: NodeId,
        key: impl Into<String>,
    ) -> Self {
        MapError::MissingRequiredField {
            key: key.into(),
            path: build_path(doc, node),
            node,
        }
    }

    /// Unclaimed children of `node`
    pub fn unknown_keys(doc: &dyn DocumentAccess, node: NodeId, keys: Vec<String>) -> Self {
        MapError::UnknownKeys {
            keys,
            path: build_path(doc, node),
            node,
        }
    }

    /// `mapper` cannot read `node`
    pub fn invalid_source(
        doc: &dyn DocumentAccess,
        node: NodeId,
        mapper: &'static str,
        key: impl Into<String>,
    ) -> Self {
        MapError::InvalidSourceNode {
            mapper,
            key: key.into(),
            path: build_path(doc, node),
            node,
        }
    }

    /// `value` read from `node` is not a valid `target`
    pub fn coercion(
        doc: &dyn DocumentAccess,
        node: NodeId,
        key: impl Into<String>,
        value: impl Into<String>,
        target: &'static str,
    ) -> Self {
        MapError::ValueCoercion {
            key: key.into(),
            value: value.into(),
            target,
            path: build_path(doc, node),
            node,
        }
    }

    /// Element path the failure refers to, if it refers to one
    pub fn path(&self) -> Option<&str> {
        match self {
            MapError::MissingRequiredField { path, .. }
            | MapError::UnknownKeys { path, .. }
            | MapError::InvalidSourceNode { path, .. }
            | MapError::ValueCoercion { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Offending node, if the failure refers to one
    pub fn node(&self) -> Option<NodeId> {
        match self {
            MapError::MissingRequiredField { node, .. }
            | MapError::UnknownKeys { node, .. }
            | MapError::InvalidSourceNode { node, .. }
            | MapError::ValueCoercion { node, .. } => Some(*node),
            _ => None,
        }
    }
}

pub(crate) fn quote_keys(keys: &[String]) -> String {
    keys.iter()
        .map(|k| format!("'{k}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render the root-to-node path of `node`, e.g. `root/object/name`.
///
/// Walks parent links up to the document node. Only element names appear;
/// a text node reports the path of its element.
pub fn build_path(doc: &dyn DocumentAccess, node: NodeId) -> String {
    let mut names = Vec::new();
    let mut current = Some(node);
    while let Some(id) = current {
        if doc.node_kind(id) == Some(NodeKind::Element) {
            names.push(doc.node_name(id).unwrap_or("?"));
        }
        current = doc.parent_of(id);
    }
    names.reverse();
    names.join("/")
}
