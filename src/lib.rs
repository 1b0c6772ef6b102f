//! xmlmap - Schema-driven mapping of XML trees into records
//!
//! A [`Schema`] declares the output fields; each field names a [`Mapper`]
//! that finds its source in the tree and converts it:
//! - Leaf mappers: element text, enclosing-element text, attributes
//! - Objects: a child element mapped through a nested schema
//! - Arrays: nested, direct (named wrapper) and inline (repeated siblings)
//! - Custom closures for anything else
//!
//! ```
//! use xmlmap::{integer_value, parse_document, string_value, FieldSpec};
//! use xmlmap::{ParserOverrides, Schema, Value, XmlDocument};
//!
//! let doc = XmlDocument::parse("<root><string>abc</string><number>5</number></root>")?;
//! let schema = Schema::new()
//!     .field("string", FieldSpec::new(string_value()).required())
//!     .field("number", integer_value());
//!
//! let record = parse_document(&doc, &schema, &ParserOverrides::default())?;
//! assert_eq!(record.get("number"), Some(&Value::Integer(5)));
//! # Ok::<(), xmlmap::MapError>(())
//! ```
//!
//! Mapping is pure: the tree is only read, and diagnostics go to the
//! configured [`Logger`].

pub mod dom;
pub mod error;
pub mod leaf;
pub mod logger;
pub mod mapper;
pub mod options;
pub mod schema;
pub mod strategy;
pub mod value;

pub use dom::{DocumentAccess, NodeId, NodeKind, XmlDocument};
pub use error::{MapError, Result};
pub use leaf::{
    attr_date_value, attr_integer_value, attr_string_value, date_value, integer_value,
    root_attr_date_value, root_attr_integer_value, root_attr_string_value, root_date_value,
    root_integer_value, root_string_value, string_value, unknown_value,
};
pub use logger::{set_logger, Logger, SetLoggerError, TracingLogger};
pub use mapper::{
    array_value, custom, direct_array_value, direct_array_value_of, inline_array_value,
    object_value, parse, parse_document, parse_into, ParseContext,
};
pub use options::{ParserOptions, ParserOverrides};
pub use schema::{FieldSpec, Mapper, Schema};
pub use strategy::{parse_many, parse_many_text};
pub use value::{FromRecord, FromValue, Nested, Record, Value};
