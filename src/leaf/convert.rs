//! Text Conversions
//!
//! Raw text to typed [`Value`]s. Integers and dates treat blank text as
//! absent; strings consult the field's `empty_as_null`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::dom::NodeId;
use crate::error::{MapError, Result};
use crate::mapper::ParseContext;
use crate::schema::LeafKind;
use crate::value::Value;

/// Convert `raw`, read from `node`, into `kind`
pub fn convert(ctx: &ParseContext<'_>, node: NodeId, raw: &str, kind: LeafKind) -> Result<Value> {
    match kind {
        LeafKind::String => Ok(string(raw, ctx.empty_as_null)),
        LeafKind::Integer => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Ok(Value::Null);
            }
            trimmed
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|_| MapError::coercion(ctx.doc, node, ctx.lookup_key, raw, kind.as_str()))
        }
        LeafKind::Date => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Ok(Value::Null);
            }
            parse_date(trimmed).map(Value::Date).ok_or_else(|| {
                MapError::coercion(ctx.doc, node, ctx.lookup_key, raw, kind.as_str())
            })
        }
    }
}

fn string(raw: &str, empty_as_null: bool) -> Value {
    if raw.is_empty() && empty_as_null {
        Value::Null
    } else {
        Value::String(raw.to_string())
    }
}

/// RFC 3339 first, then a zone-less timestamp or a bare date, both as UTC
pub fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_parse_date_formats() {
        let noon = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(parse_date("2024-03-01T12:00:00Z"), Some(noon));
        assert_eq!(parse_date("2024-03-01T14:00:00+02:00"), Some(noon));
        assert_eq!(parse_date("2024-03-01T12:00:00"), Some(noon));
        assert_eq!(
            parse_date("2024-03-01"),
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_date("01/03/2024"), None);
        assert_eq!(parse_date("2024-13-01"), None);
    }

    #[test]
    fn test_fractional_seconds() {
        let parsed = parse_date("2024-03-01T12:00:00.250").unwrap();
        assert_eq!(parsed.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn test_string_empty() {
        assert_eq!(string("", true), Value::Null);
        assert_eq!(string("", false), Value::from(""));
        assert_eq!(string(" ", true), Value::from(" "));
    }
}
