//! Object Mapping
//!
//! One element against one schema: every field is resolved in declaration
//! order, then any child no field claimed is reported.

use super::index::ChildIndex;
use super::key::{qualify, resolve_key};
use super::ParseContext;
use crate::dom::{DocumentAccess, NodeId, NodeKind};
use crate::error::{build_path, quote_keys, MapError, Result};
use crate::options::ParserOptions;
use crate::schema::Schema;
use crate::value::Record;

/// Map `element` through `schema`.
///
/// `element` may also be the document node, in which case the root element
/// is its only candidate child.
///
/// The returned record holds exactly the schema's fields, in declaration
/// order; fields without a source hold `Value::Null`.
///
/// # Errors
///
/// - `InvalidSourceNode` if `element` is neither an element nor the document
/// - `MissingRequiredField` if a required field maps to null
/// - `UnknownKeys` in strict mode when children are left unclaimed
/// - whatever a field's mapper raises
pub fn map_object(
    doc: &dyn DocumentAccess,
    element: NodeId,
    schema: &Schema,
    options: &ParserOptions,
) -> Result<Record> {
    if !matches!(
        doc.node_kind(element),
        Some(NodeKind::Element | NodeKind::Document)
    ) {
        return Err(MapError::invalid_source(doc, element, "object_value", ""));
    }

    let mut index = ChildIndex::build(doc, element);
    let mut record = Record::with_capacity(schema.len());

    for (field, spec) in schema.iter() {
        let resolved = resolve_key(field, spec, options);

        // attribute-sourced fields read the element itself and claim no child
        let node = if spec.attribute {
            Some(element)
        } else {
            index.lookup(&resolved.key, resolved.ignore_case)
        };

        let ctx = ParseContext {
            doc,
            lookup_key: &resolved.key,
            current_node: node,
            root_node: element,
            options,
            is_required: spec.required,
            empty_as_null: spec.empty_as_null,
            ignore_case: resolved.ignore_case,
            namespace: spec.namespace.as_deref(),
        };
        let value = spec.mapper.map(&ctx)?;
        tracing::trace!(
            field,
            key = %resolved.key,
            found = node.is_some(),
            null = value.is_null(),
            "mapped field"
        );

        if spec.required && value.is_null() {
            return Err(MapError::missing_required(doc, element, resolved.key));
        }
        record.insert(field, value);

        if !spec.attribute {
            index.remove_matching(&resolved.key, resolved.ignore_case);
        }
        if let Some(claimed) = spec.mapper.claimed_name() {
            let claimed = qualify(claimed, spec.namespace.as_deref());
            index.remove_matching(&claimed, resolved.ignore_case);
        }
    }

    if !index.is_empty() {
        let keys = index.leftover_keys();
        if options.is_strict {
            return Err(MapError::unknown_keys(doc, element, keys));
        }
        options.warn(&format!(
            "unknown key(s) {} in {}",
            quote_keys(&keys),
            build_path(doc, element)
        ));
    }

    Ok(record)
}
