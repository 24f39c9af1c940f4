//! Domain models returned by face providers.
//!
//! Every model keeps the decoded provider record it was built from (`raw`)
//! so fields this layer doesn't map stay reachable for callers.

mod album;
mod compare;
mod face;
mod search;

pub use album::{AlbumFields, FaceAlbum};
pub use compare::Comparison;
pub use face::{Face, FaceFields};
pub use search::{SearchItem, SearchResult};

use serde_json::Value;

/// Render a scalar JSON value as a string. Null and empty strings are absent.
pub(crate) fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Drop values a provider uses to mean "unset": `""` and `"0"`.
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty() && v != "0")
}

/// Read a JSON value as a float, accepting numeric strings.
pub(crate) fn scalar_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_string() {
        assert_eq!(scalar_string(&json!("abc")).as_deref(), Some("abc"));
        assert_eq!(scalar_string(&json!(42)).as_deref(), Some("42"));
        assert_eq!(scalar_string(&json!("")), None);
        assert_eq!(scalar_string(&Value::Null), None);
    }

    #[test]
    fn test_present() {
        assert_eq!(present(Some("42".to_string())).as_deref(), Some("42"));
        assert_eq!(present(Some("0".to_string())), None);
        assert_eq!(present(Some(String::new())), None);
        assert_eq!(present(None), None);
    }

    #[test]
    fn test_scalar_f64() {
        assert_eq!(scalar_f64(&json!(97.5)), Some(97.5));
        assert_eq!(scalar_f64(&json!("123")), Some(123.0));
        assert_eq!(scalar_f64(&json!("high")), None);
        assert_eq!(scalar_f64(&json!([1])), None);
    }
}
