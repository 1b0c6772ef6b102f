//! Leaf Mappers
//!
//! Mappers that turn text or attributes into scalar values:
//! - element text (`string_value`, `integer_value`, `date_value`)
//! - text of the enclosing element (`root_*_value`)
//! - attributes of the field's element or of the enclosing one
//! - `unknown_value`, which only reports what it finds

mod attr;
pub mod convert;

pub(crate) use attr::attribute_value;

use crate::dom::NodeKind;
use crate::error::Result;
use crate::mapper::ParseContext;
use crate::schema::{AttrScope, LeafKind, Mapper};
use crate::value::Value;

pub fn string_value() -> Mapper {
    Mapper::Element(LeafKind::String)
}

pub fn integer_value() -> Mapper {
    Mapper::Element(LeafKind::Integer)
}

pub fn date_value() -> Mapper {
    Mapper::Element(LeafKind::Date)
}

/// Text of the element being mapped, rather than of a child
pub fn root_string_value() -> Mapper {
    Mapper::Root(LeafKind::String)
}

pub fn root_integer_value() -> Mapper {
    Mapper::Root(LeafKind::Integer)
}

pub fn root_date_value() -> Mapper {
    Mapper::Root(LeafKind::Date)
}

fn attribute(name: Option<&str>, kind: LeafKind, scope: AttrScope) -> Mapper {
    Mapper::Attribute {
        name: name.map(str::to_string),
        kind,
        scope,
    }
}

/// Attribute of the field's element; `None` reads the attribute named like
/// the field
pub fn attr_string_value(name: Option<&str>) -> Mapper {
    attribute(name, LeafKind::String, AttrScope::Own)
}

pub fn attr_integer_value(name: Option<&str>) -> Mapper {
    attribute(name, LeafKind::Integer, AttrScope::Own)
}

pub fn attr_date_value(name: Option<&str>) -> Mapper {
    attribute(name, LeafKind::Date, AttrScope::Own)
}

/// Attribute of the element being mapped
pub fn root_attr_string_value(name: Option<&str>) -> Mapper {
    attribute(name, LeafKind::String, AttrScope::Enclosing)
}

pub fn root_attr_integer_value(name: Option<&str>) -> Mapper {
    attribute(name, LeafKind::Integer, AttrScope::Enclosing)
}

pub fn root_attr_date_value(name: Option<&str>) -> Mapper {
    attribute(name, LeafKind::Date, AttrScope::Enclosing)
}

/// Claims the field's element, reports its text and yields null
pub fn unknown_value() -> Mapper {
    Mapper::Unknown
}

/// Text of the field's element. The element must hold text only.
pub(crate) fn element_value(ctx: &ParseContext<'_>, kind: LeafKind) -> Result<Value> {
    let Some(node) = ctx.current_node else {
        return Ok(Value::Null);
    };
    let name = Mapper::Element(kind).name();
    if ctx.doc.node_kind(node) != Some(NodeKind::Element) {
        return Err(ctx.invalid_source(name));
    }

    let mut text = String::new();
    for child in ctx.doc.children_vec(node) {
        match ctx.doc.node_kind(child) {
            Some(NodeKind::Text) => text.push_str(ctx.doc.text(child).unwrap_or("")),
            Some(NodeKind::Element) => return Err(ctx.invalid_source(name)),
            _ => {}
        }
    }
    convert::convert(ctx, node, &text, kind)
}

/// Text content of the enclosing element
pub(crate) fn root_value(ctx: &ParseContext<'_>, kind: LeafKind) -> Result<Value> {
    let text = ctx.doc.text_content(ctx.root_node);
    convert::convert(ctx, ctx.root_node, &text, kind)
}

pub(crate) fn unknown(ctx: &ParseContext<'_>) -> Result<Value> {
    if let Some(node) = ctx.current_node {
        let text = ctx.doc.text_content(node);
        let text = text.trim();
        if !text.is_empty() {
            ctx.options.warn(&format!(
                "unknown value for key {}: '{text}'",
                ctx.lookup_key
            ));
        }
    }
    Ok(Value::Null)
}
