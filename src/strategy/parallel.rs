//! Parallel Batch Mapping
//!
//! Uses Rayon to map many independent documents against one schema.
//! Results keep input order and fail independently.

use rayon::prelude::*;

use crate::dom::{DocumentAccess, XmlDocument};
use crate::error::{MapError, Result};
use crate::mapper::map_object;
use crate::options::{ParserOptions, ParserOverrides};
use crate::schema::Schema;
use crate::value::Record;

/// Map every document from its root element
pub fn parse_many<D: DocumentAccess + Sync>(
    docs: &[D],
    schema: &Schema,
    overrides: &ParserOverrides,
) -> Vec<Result<Record>> {
    let options = ParserOptions::effective(overrides);
    tracing::debug!(documents = docs.len(), "parse_many");
    docs.par_iter()
        .map(|doc| map_root(doc, schema, &options))
        .collect()
}

/// Parse and map raw XML texts; a text that fails to parse yields
/// `MapError::Document` in its slot
pub fn parse_many_text(
    texts: &[&str],
    schema: &Schema,
    overrides: &ParserOverrides,
) -> Vec<Result<Record>> {
    let options = ParserOptions::effective(overrides);
    tracing::debug!(documents = texts.len(), "parse_many_text");
    texts
        .par_iter()
        .map(|text| {
            let doc = XmlDocument::parse(text)?;
            map_root(&doc, schema, &options)
        })
        .collect()
}

fn map_root(doc: &dyn DocumentAccess, schema: &Schema, options: &ParserOptions) -> Result<Record> {
    let root = doc.root_element_id().ok_or(MapError::NoRootElement)?;
    map_object(doc, root, schema, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaf::{integer_value, string_value};
    use crate::schema::FieldSpec;

    fn schema() -> Schema {
        Schema::new()
            .field("id", FieldSpec::new(integer_value()).required())
            .field("name", string_value())
    }

    #[test]
    fn test_parse_many_keeps_order() {
        let docs: Vec<XmlDocument> = (0..32)
            .map(|i| XmlDocument::parse(&format!("<r><id>{i}</id><name>n{i}</name></r>")).unwrap())
            .collect();

        let results = parse_many(&docs, &schema(), &ParserOverrides::default());
        assert_eq!(results.len(), 32);
        for (i, result) in results.into_iter().enumerate() {
            let record = result.unwrap();
            assert_eq!(record.get("id").and_then(|v| v.as_i64()), Some(i as i64));
        }
    }

    #[test]
    fn test_parse_many_text_independent_failures() {
        let texts = [
            "<r><id>1</id></r>",
            "<r><name>x</name></r>",
            "<r><id>",
            "<r><id>3</id><x/></r>",
        ];
        let results = parse_many_text(&texts, &schema(), &ParserOverrides::new().strict(true));

        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(MapError::MissingRequiredField { .. })));
        assert!(matches!(results[2], Err(MapError::Document(_))));
        assert!(matches!(results[3], Err(MapError::UnknownKeys { .. })));
    }
}
