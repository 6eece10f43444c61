//! Grammar of `fieldsV1` keys.
//!
//! Every key of an ownership tree is one path segment:
//!
//! | Key                        | Segment                          |
//! |----------------------------|----------------------------------|
//! | `.`                        | the current node itself          |
//! | `f:replicas`               | mapping field by name            |
//! | `k:{"name":"nginx"}`       | sequence item by field values    |
//! | `v:"example.com/foo"`      | sequence scalar by value         |
//! | `i:0`                      | sequence item by position        |

use serde_json::Value;

/// One parsed segment of an ownership path
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// `.`
    Dot,
    /// `f:<name>`
    Field(String),
    /// `k:<json object>`, field name and required value pairs
    AssociativeKey(Vec<(String, Value)>),
    /// `v:<json scalar>`
    SetValue(Value),
    /// `i:<index>`
    Index(usize),
    /// Anything else, kept verbatim
    Unknown(String),
}

/// Parse a single `fieldsV1` key. Never fails: keys that do not fit the
/// grammar come back as [`PathSegment::Unknown`].
#[must_use]
pub fn parse_segment(key: &str) -> PathSegment {
    if key == "." {
        return PathSegment::Dot;
    }
    let Some((prefix, payload)) = key.split_once(':') else {
        return PathSegment::Unknown(key.to_string());
    };

    let parsed = match prefix {
        "f" => Some(PathSegment::Field(payload.to_string())),
        "k" => match serde_json::from_str::<Value>(payload) {
            Ok(Value::Object(fields)) => Some(PathSegment::AssociativeKey(
                fields.into_iter().collect(),
            )),
            _ => None,
        },
        "v" => serde_json::from_str::<Value>(payload)
            .ok()
            .map(PathSegment::SetValue),
        "i" => payload.parse::<usize>().ok().map(PathSegment::Index),
        _ => None,
    };

    parsed.unwrap_or_else(|| {
        log::debug!("unrecognized fieldsV1 key {key:?}");
        PathSegment::Unknown(key.to_string())
    })
}

/// Text a YAML scalar must have to equal a decoded JSON value.
///
/// Strings compare as-is, numbers by their JSON formatting and booleans as
/// `true`/`false`. Other JSON types never match anything.
#[must_use]
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_dot() {
        assert_eq!(parse_segment("."), PathSegment::Dot);
    }

    #[test]
    fn test_parse_field() {
        assert_eq!(
            parse_segment("f:replicas"),
            PathSegment::Field("replicas".to_string())
        );
        // only the first colon separates prefix and payload
        assert_eq!(
            parse_segment("f:example.com/key:with:colons"),
            PathSegment::Field("example.com/key:with:colons".to_string())
        );
        assert_eq!(parse_segment("f:"), PathSegment::Field(String::new()));
    }

    #[test]
    fn test_parse_associative_key() {
        assert_eq!(
            parse_segment(r#"k:{"containerPort":80,"protocol":"TCP"}"#),
            PathSegment::AssociativeKey(vec![
                ("containerPort".to_string(), json!(80)),
                ("protocol".to_string(), json!("TCP")),
            ])
        );
    }

    #[test]
    fn test_parse_set_value() {
        assert_eq!(
            parse_segment(r#"v:"example.com/foo""#),
            PathSegment::SetValue(json!("example.com/foo"))
        );
        assert_eq!(parse_segment("v:8080"), PathSegment::SetValue(json!(8080)));
    }

    #[test]
    fn test_parse_index() {
        assert_eq!(parse_segment("i:3"), PathSegment::Index(3));
    }

    #[test]
    fn test_malformed_keys_are_unknown() {
        for key in [
            "replicas",
            "x:whatever",
            "k:not-json",
            r#"k:["name"]"#,
            "v:{unterminated",
            "i:-1",
            "i:two",
        ] {
            assert_eq!(
                parse_segment(key),
                PathSegment::Unknown(key.to_string()),
                "key {key}"
            );
        }
    }

    #[test]
    fn test_scalar_text() {
        assert_eq!(scalar_text(&json!("nginx")), Some("nginx".to_string()));
        assert_eq!(scalar_text(&json!(80)), Some("80".to_string()));
        assert_eq!(scalar_text(&json!(false)), Some("false".to_string()));
        assert_eq!(scalar_text(&json!(null)), None);
        assert_eq!(scalar_text(&json!({"a": 1})), None);
    }
}
