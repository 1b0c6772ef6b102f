//! Attribute Mappers

use super::convert::convert;
use crate::dom::{DocumentAccess, NodeId, NodeKind};
use crate::error::Result;
use crate::mapper::key::names_match;
use crate::mapper::ParseContext;
use crate::schema::{AttrScope, LeafKind};
use crate::value::Value;

/// Read attribute `name` (or the field's key) off the scoped element
pub fn attribute_value(
    ctx: &ParseContext<'_>,
    name: Option<&str>,
    kind: LeafKind,
    scope: AttrScope,
) -> Result<Value> {
    let node = match scope {
        AttrScope::Enclosing => ctx.root_node,
        AttrScope::Own => match ctx.current_node {
            Some(node) => node,
            None => return Ok(Value::Null),
        },
    };
    if ctx.doc.node_kind(node) != Some(NodeKind::Element) {
        let mapper = match scope {
            AttrScope::Own => "attr_value",
            AttrScope::Enclosing => "root_attr_value",
        };
        return Err(ctx.invalid_source(mapper));
    }

    let attr = name.unwrap_or(ctx.lookup_key);
    match find_attribute(ctx.doc, node, attr, ctx.ignore_case) {
        Some(raw) => convert(ctx, node, raw, kind),
        None => Ok(Value::Null),
    }
}

fn find_attribute<'d>(
    doc: &'d dyn DocumentAccess,
    node: NodeId,
    name: &str,
    ignore_case: bool,
) -> Option<&'d str> {
    if let Some(value) = doc.get_attribute(node, name) {
        return Some(value);
    }
    if !ignore_case {
        return None;
    }
    doc.get_attribute_values(node)
        .into_iter()
        .find(|(attr, _)| names_match(attr, name, true))
        .map(|(_, value)| value)
}
