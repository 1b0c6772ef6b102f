//! Key Resolution
//!
//! Turns a schema field into the qualified name it is looked up by.

use crate::options::ParserOptions;
use crate::schema::FieldSpec;

/// Lookup key of one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedKey {
    /// `namespace:name`, or just `name`
    pub key: String,
    /// Effective case mode for this field
    pub ignore_case: bool,
}

/// Resolve the key for `field_name`.
///
/// The explicit source-name override wins over the field name, the namespace
/// is prepended, and the field's own `ignore_case` beats the parse-wide one.
pub fn resolve_key(field_name: &str, spec: &FieldSpec, options: &ParserOptions) -> ResolvedKey {
    let base = spec.name.as_deref().unwrap_or(field_name);
    ResolvedKey {
        key: qualify(base, spec.namespace.as_deref()),
        ignore_case: spec.ignore_case.unwrap_or(options.ignore_case),
    }
}

/// `namespace:name` when a namespace is declared
pub fn qualify(name: &str, namespace: Option<&str>) -> String {
    match namespace {
        Some(ns) if !ns.is_empty() => format!("{ns}:{name}"),
        _ => name.to_string(),
    }
}

/// Compare a name found in the tree against a resolved key
#[inline]
pub fn names_match(found: &str, key: &str, ignore_case: bool) -> bool {
    if ignore_case {
        found == key || found.to_lowercase() == key.to_lowercase()
    } else {
        found == key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaf::string_value;

    #[test]
    fn test_plain_key() {
        let spec = FieldSpec::new(string_value());
        let key = resolve_key("name", &spec, ParserOptions::defaults());
        assert_eq!(key.key, "name");
        assert!(!key.ignore_case);
    }

    #[test]
    fn test_override_and_namespace() {
        let spec = FieldSpec::new(string_value()).name("Title").namespace("dc");
        let key = resolve_key("title", &spec, ParserOptions::defaults());
        assert_eq!(key.key, "dc:Title");
    }

    #[test]
    fn test_field_case_override() {
        let options = ParserOptions {
            ignore_case: true,
            ..ParserOptions::default()
        };
        let spec = FieldSpec::new(string_value()).ignore_case(false);
        assert!(!resolve_key("a", &spec, &options).ignore_case);
        assert!(resolve_key("a", &FieldSpec::new(string_value()), &options).ignore_case);
    }

    #[test]
    fn test_names_match() {
        assert!(names_match("ArrAy", "array", true));
        assert!(!names_match("ArrAy", "array", false));
        assert!(!names_match("b:name", "a:name", true));
        assert!(names_match("NS:Name", "ns:name", true));
    }
}
