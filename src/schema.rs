//! Schema Declarations
//!
//! A [`Schema`] is an ordered list of output fields, each described by a
//! [`FieldSpec`]. Declaration order is the order fields are resolved in.
//! Schemas are built once, are immutable afterwards and clone cheaply.

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::mapper::ParseContext;
use crate::value::Value;

/// Primitive target of a leaf mapper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafKind {
    String,
    Integer,
    Date,
}

impl LeafKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeafKind::String => "string",
            LeafKind::Integer => "integer",
            LeafKind::Date => "date",
        }
    }
}

/// Which element an attribute mapper reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrScope {
    /// The field's source node
    Own,
    /// The element currently being mapped
    Enclosing,
}

/// Caller-defined mapper function
pub type CustomFn = Arc<dyn Fn(&ParseContext<'_>) -> Result<Value> + Send + Sync>;

/// How a field's value is produced
#[derive(Clone)]
pub enum Mapper {
    /// Text of the field's element
    Element(LeafKind),
    /// Text of the enclosing element
    Root(LeafKind),
    /// Attribute value; `name: None` uses the field's resolved key
    Attribute {
        name: Option<String>,
        kind: LeafKind,
        scope: AttrScope,
    },
    /// Reports the node's text as a diagnostic and yields null
    Unknown,
    /// The field's element mapped through a nested schema
    Object(Schema),
    /// Every element child of the field's element is one item
    NestedArray(Schema),
    /// Every element child of the enclosing element's `wrapper` child is one
    /// item; `item` is the tag items are expected to carry
    DirectArray {
        wrapper: String,
        item: Option<String>,
        schema: Schema,
    },
    /// Children of the enclosing element named `item`, wherever they appear
    InlineArray { item: String, mapper: Box<Mapper> },
    /// Caller-defined function
    Custom { name: &'static str, func: CustomFn },
}

impl Mapper {
    /// Name used in diagnostics and `InvalidSourceNode` errors
    pub fn name(&self) -> &'static str {
        match self {
            Mapper::Element(LeafKind::String) => "string_value",
            Mapper::Element(LeafKind::Integer) => "integer_value",
            Mapper::Element(LeafKind::Date) => "date_value",
            Mapper::Root(LeafKind::String) => "root_string_value",
            Mapper::Root(LeafKind::Integer) => "root_integer_value",
            Mapper::Root(LeafKind::Date) => "root_date_value",
            Mapper::Attribute { scope: AttrScope::Own, .. } => "attr_value",
            Mapper::Attribute { scope: AttrScope::Enclosing, .. } => "root_attr_value",
            Mapper::Unknown => "unknown_value",
            Mapper::Object(_) => "object_value",
            Mapper::NestedArray(_) => "array_value",
            Mapper::DirectArray { .. } => "direct_array_value",
            Mapper::InlineArray { .. } => "inline_array_value",
            Mapper::Custom { name, .. } => *name,
        }
    }

    /// Child tag this mapper consumes from the enclosing element besides the
    /// field's own key
    pub(crate) fn claimed_name(&self) -> Option<&str> {
        match self {
            Mapper::DirectArray { wrapper, .. } => Some(wrapper),
            Mapper::InlineArray { item, .. } => Some(item),
            _ => None,
        }
    }
}

impl fmt::Debug for Mapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mapper::Element(kind) => f.debug_tuple("Element").field(kind).finish(),
            Mapper::Root(kind) => f.debug_tuple("Root").field(kind).finish(),
            Mapper::Attribute { name, kind, scope } => f
                .debug_struct("Attribute")
                .field("name", name)
                .field("kind", kind)
                .field("scope", scope)
                .finish(),
            Mapper::Unknown => f.write_str("Unknown"),
            Mapper::Object(schema) => f.debug_tuple("Object").field(schema).finish(),
            Mapper::NestedArray(schema) => f.debug_tuple("NestedArray").field(schema).finish(),
            Mapper::DirectArray { wrapper, item, schema } => f
                .debug_struct("DirectArray")
                .field("wrapper", wrapper)
                .field("item", item)
                .field("schema", schema)
                .finish(),
            Mapper::InlineArray { item, mapper } => f
                .debug_struct("InlineArray")
                .field("item", item)
                .field("mapper", mapper)
                .finish(),
            Mapper::Custom { name, .. } => f.debug_struct("Custom").field("name", name).finish(),
        }
    }
}

/// Per-field configuration
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub mapper: Mapper,
    /// A null result is an error
    pub required: bool,
    /// Prefix prepended to the source name as `namespace:name`
    pub namespace: Option<String>,
    /// Source name when it differs from the output field name
    pub name: Option<String>,
    /// Overrides the parse-wide `ignore_case` option for this field
    pub ignore_case: Option<bool>,
    /// Source is the enclosing element itself; the field claims no child
    pub attribute: bool,
    /// Elements without text map to null rather than `""`
    pub empty_as_null: bool,
}

impl FieldSpec {
    pub fn new(mapper: Mapper) -> Self {
        FieldSpec {
            mapper,
            required: false,
            namespace: None,
            name: None,
            ignore_case: None,
            attribute: false,
            empty_as_null: true,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn ignore_case(mut self, value: bool) -> Self {
        self.ignore_case = Some(value);
        self
    }

    pub fn attribute(mut self) -> Self {
        self.attribute = true;
        self
    }

    pub fn empty_as_null(mut self, value: bool) -> Self {
        self.empty_as_null = value;
        self
    }
}

impl From<Mapper> for FieldSpec {
    fn from(mapper: Mapper) -> Self {
        FieldSpec::new(mapper)
    }
}

/// Ordered field declarations for one record
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Arc<Vec<(String, FieldSpec)>>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field. Redeclaring a name replaces the earlier spec in place.
    pub fn field(mut self, name: impl Into<String>, spec: impl Into<FieldSpec>) -> Self {
        let name = name.into();
        let spec = spec.into();
        let fields = Arc::make_mut(&mut self.fields);
        match fields.iter().position(|(existing, _)| *existing == name) {
            Some(index) => fields[index].1 = spec,
            None => fields.push((name, spec)),
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.fields.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaf::{integer_value, string_value};

    #[test]
    fn test_declaration_order() {
        let schema = Schema::new()
            .field("zeta", string_value())
            .field("alpha", FieldSpec::new(integer_value()).required())
            .field("mid", string_value());
        let names: Vec<_> = schema.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_redeclare_replaces() {
        let schema = Schema::new()
            .field("a", string_value())
            .field("b", string_value())
            .field("a", FieldSpec::new(integer_value()).required());
        assert_eq!(schema.len(), 2);
        let (name, spec) = schema.iter().next().unwrap();
        assert_eq!(name, "a");
        assert!(spec.required);
        assert_eq!(spec.mapper.name(), "integer_value");
    }

    #[test]
    fn test_clone_shares_until_modified() {
        let base = Schema::new().field("a", string_value());
        let extended = base.clone().field("b", string_value());
        assert_eq!(base.len(), 1);
        assert_eq!(extended.len(), 2);
    }
}
