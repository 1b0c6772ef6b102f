//! Mapping Engine
//!
//! Walks a [`Schema`] against an element tree:
//! - `key` resolves field names to qualified lookup keys
//! - `index` tracks which children fields have claimed
//! - `object` maps one element to one [`Record`]
//! - `array` implements the nested, direct and inline array strategies
//!
//! Mappers are interpreted by [`Mapper::map`]; leaf conversions live in
//! [`crate::leaf`].

pub mod array;
pub mod index;
pub mod key;
pub mod object;

use std::sync::Arc;

pub use object::map_object;

use crate::dom::{DocumentAccess, NodeId};
use crate::error::{MapError, Result};
use crate::leaf;
use crate::options::{ParserOptions, ParserOverrides};
use crate::schema::{Mapper, Schema};
use crate::value::{FromRecord, Record, Value};

/// Everything a mapper sees for one field
pub struct ParseContext<'a> {
    pub doc: &'a dyn DocumentAccess,
    /// Resolved qualified key of the field
    pub lookup_key: &'a str,
    /// Source node located for the field, if any
    pub current_node: Option<NodeId>,
    /// Element whose children are being mapped
    pub root_node: NodeId,
    pub options: &'a ParserOptions,
    pub is_required: bool,
    pub empty_as_null: bool,
    /// Effective case mode for names this field matches
    pub ignore_case: bool,
    /// Namespace of the field, applied to array wrapper and item names
    pub namespace: Option<&'a str>,
}

impl ParseContext<'_> {
    /// `InvalidSourceNode` for `mapper` at the current node (or the
    /// enclosing element when there is none)
    pub fn invalid_source(&self, mapper: &'static str) -> MapError {
        let node = self.current_node.unwrap_or(self.root_node);
        MapError::invalid_source(self.doc, node, mapper, self.lookup_key)
    }
}

impl Mapper {
    /// Produce this mapper's value for `ctx`
    pub fn map(&self, ctx: &ParseContext<'_>) -> Result<Value> {
        match self {
            Mapper::Element(kind) => leaf::element_value(ctx, *kind),
            Mapper::Root(kind) => leaf::root_value(ctx, *kind),
            Mapper::Attribute { name, kind, scope } => {
                leaf::attribute_value(ctx, name.as_deref(), *kind, *scope)
            }
            Mapper::Unknown => leaf::unknown(ctx),
            Mapper::Object(schema) => match ctx.current_node {
                Some(node) => map_object(ctx.doc, node, schema, ctx.options).map(Value::Record),
                None => Ok(Value::Null),
            },
            Mapper::NestedArray(schema) => array::nested_array(ctx, schema),
            Mapper::DirectArray { wrapper, item, schema } => {
                array::direct_array(ctx, wrapper, item.as_deref(), schema)
            }
            Mapper::InlineArray { item, mapper } => array::inline_array(ctx, item, mapper),
            Mapper::Custom { func, .. } => func(ctx),
        }
    }
}

/// Map the field's element through `schema`
pub fn object_value(schema: Schema) -> Mapper {
    Mapper::Object(schema)
}

/// Map every element child of the field's element through `schema`
pub fn array_value(schema: Schema) -> Mapper {
    Mapper::NestedArray(schema)
}

/// Map every element child of the enclosing element's `wrapper` child
pub fn direct_array_value(wrapper: impl Into<String>, schema: Schema) -> Mapper {
    Mapper::DirectArray {
        wrapper: wrapper.into(),
        item: None,
        schema,
    }
}

/// Like [`direct_array_value`], reporting a diagnostic when no child of the
/// wrapper is named `item`
pub fn direct_array_value_of(
    wrapper: impl Into<String>,
    item: impl Into<String>,
    schema: Schema,
) -> Mapper {
    Mapper::DirectArray {
        wrapper: wrapper.into(),
        item: Some(item.into()),
        schema,
    }
}

/// Map every child of the enclosing element named `item` with `mapper`
pub fn inline_array_value(item: impl Into<String>, mapper: Mapper) -> Mapper {
    Mapper::InlineArray {
        item: item.into(),
        mapper: Box::new(mapper),
    }
}

/// Caller-defined mapper
pub fn custom<F>(name: &'static str, func: F) -> Mapper
where
    F: Fn(&ParseContext<'_>) -> Result<Value> + Send + Sync + 'static,
{
    Mapper::Custom {
        name,
        func: Arc::new(func),
    }
}

// ============================================================================
// Entry Points
// ============================================================================

/// Map `root` through `schema` with the defaults overlaid by `overrides`
pub fn parse(
    doc: &dyn DocumentAccess,
    root: NodeId,
    schema: &Schema,
    overrides: &ParserOverrides,
) -> Result<Record> {
    let options = ParserOptions::effective(overrides);
    let _span = tracing::debug_span!(
        "parse",
        root = doc.node_name(root).unwrap_or(""),
        strict = options.is_strict,
        ignore_case = options.ignore_case
    )
    .entered();
    map_object(doc, root, schema, &options)
}

/// [`parse`] starting at the document's root element
pub fn parse_document(
    doc: &dyn DocumentAccess,
    schema: &Schema,
    overrides: &ParserOverrides,
) -> Result<Record> {
    let root = doc.root_element_id().ok_or(MapError::NoRootElement)?;
    parse(doc, root, schema, overrides)
}

/// [`parse`] with `T`'s schema, converting the record into `T`
pub fn parse_into<T: FromRecord>(
    doc: &dyn DocumentAccess,
    root: NodeId,
    overrides: &ParserOverrides,
) -> Result<T> {
    let record = parse(doc, root, &T::schema(), overrides)?;
    T::from_record(record)
}
