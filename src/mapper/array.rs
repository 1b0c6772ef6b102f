//! Array Strategies
//!
//! - Nested: every element child of the field's element is an item
//! - Direct: every element child of a named wrapper child is an item
//! - Inline: items are same-named children of the enclosing element,
//!   possibly interleaved with other fields
//!
//! Items always come out in document order.

use super::key::{names_match, qualify};
use super::object::map_object;
use super::ParseContext;
use crate::dom::NodeId;
use crate::error::{build_path, MapError, Result};
use crate::schema::{Mapper, Schema};
use crate::value::Value;

/// Nested array over the field's own element
pub fn nested_array(ctx: &ParseContext<'_>, schema: &Schema) -> Result<Value> {
    match ctx.current_node {
        Some(container) => map_items(ctx, container, schema),
        None => absent_array(ctx),
    }
}

/// Array over the children of the enclosing element's `wrapper` child.
/// Warns when no child carries `item` (default: the field's key).
pub fn direct_array(
    ctx: &ParseContext<'_>,
    wrapper: &str,
    item: Option<&str>,
    schema: &Schema,
) -> Result<Value> {
    let doc = ctx.doc;
    let wrapper_key = qualify(wrapper, ctx.namespace);
    let container = doc.element_children(ctx.root_node).into_iter().find(|&child| {
        doc.node_name(child)
            .is_some_and(|name| names_match(name, &wrapper_key, ctx.ignore_case))
    });

    let Some(container) = container else {
        return absent_array(ctx);
    };

    // items are expected to carry the field's key unless named explicitly
    let item_key = match item {
        Some(item) => qualify(item, ctx.namespace),
        None => ctx.lookup_key.to_string(),
    };
    let has_item = doc.element_children(container).into_iter().any(|child| {
        doc.node_name(child)
            .is_some_and(|name| names_match(name, &item_key, ctx.ignore_case))
    });
    if !has_item {
        ctx.options.warn(&format!(
            "no '{item_key}' items in {}",
            build_path(doc, container)
        ));
    }

    map_items(ctx, container, schema)
}

/// Array over the enclosing element's children named `item`. Items mapping
/// to null are dropped.
pub fn inline_array(ctx: &ParseContext<'_>, item: &str, mapper: &Mapper) -> Result<Value> {
    let doc = ctx.doc;
    let item_key = qualify(item, ctx.namespace);
    let siblings: Vec<_> = doc
        .element_children(ctx.root_node)
        .into_iter()
        .filter(|&child| {
            doc.node_name(child)
                .is_some_and(|name| names_match(name, &item_key, ctx.ignore_case))
        })
        .collect();

    if siblings.is_empty() {
        ctx.options.debug(&format!(
            "no '{item_key}' items in {}",
            build_path(doc, ctx.root_node)
        ));
        return Ok(Value::Array(Vec::new()));
    }

    let mut out = Vec::with_capacity(siblings.len());
    for sibling in siblings {
        let item_ctx = ParseContext {
            doc,
            lookup_key: &item_key,
            current_node: Some(sibling),
            root_node: ctx.root_node,
            options: ctx.options,
            is_required: ctx.is_required,
            empty_as_null: ctx.empty_as_null,
            ignore_case: ctx.ignore_case,
            namespace: ctx.namespace,
        };
        let value = mapper.map(&item_ctx)?;
        if !value.is_null() {
            out.push(value);
        }
    }
    tracing::trace!(item = %item_key, count = out.len(), "inline array");
    Ok(Value::Array(out))
}

/// Map each element child of `container` through `schema`
fn map_items(ctx: &ParseContext<'_>, container: NodeId, schema: &Schema) -> Result<Value> {
    let items = ctx
        .doc
        .element_children(container)
        .into_iter()
        .map(|child| map_object(ctx.doc, child, schema, ctx.options).map(Value::Record))
        .collect::<Result<Vec<_>>>()?;
    tracing::trace!(key = ctx.lookup_key, count = items.len(), "array");
    Ok(Value::Array(items))
}

/// Absent container: required fails, otherwise `[]` or null per options
fn absent_array(ctx: &ParseContext<'_>) -> Result<Value> {
    if ctx.is_required {
        Err(MapError::missing_required(ctx.doc, ctx.root_node, ctx.lookup_key))
    } else if ctx.options.empty_array_as_array {
        Ok(Value::Array(Vec::new()))
    } else {
        Ok(Value::Null)
    }
}
