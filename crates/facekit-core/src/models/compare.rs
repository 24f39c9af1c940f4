use serde::Serialize;
use serde_json::Value;

use super::scalar_f64;

/// Likelihood that two images show the same person.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Comparison {
    confidence: Option<f64>,
    thresholds: Option<Value>,
    #[serde(skip)]
    raw: Value,
}

impl Comparison {
    pub fn from_raw(raw: Value) -> Self {
        Self {
            raw,
            ..Self::default()
        }
    }

    /// Set the confidence from a provider value (number or numeric string).
    pub fn with_confidence(mut self, value: &Value) -> Self {
        self.confidence = scalar_f64(value);
        self
    }

    /// Set the provider's reference thresholds (false-accept rate -> score).
    pub fn with_thresholds(mut self, thresholds: Option<Value>) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// `None` when either image had no detectable face.
    pub fn confidence(&self) -> Option<f64> {
        self.confidence
    }

    pub fn thresholds(&self) -> Option<&Value> {
        self.thresholds.as_ref()
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Whether the confidence reaches the threshold stored under `key`
    /// (e.g. `"1e-4"`). False when either value is missing.
    pub fn is_match(&self, key: &str) -> bool {
        let threshold = self
            .thresholds
            .as_ref()
            .and_then(|t| t.get(key))
            .and_then(scalar_f64);
        matches!((self.confidence, threshold), (Some(c), Some(t)) if c >= t)
    }

    /// Projection with `confidence` and `thresholds`.
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "confidence": self.confidence,
            "thresholds": self.thresholds,
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.to_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_match_against_threshold() {
        let comparison = Comparison::from_raw(Value::Null)
            .with_confidence(&json!(80.1))
            .with_thresholds(Some(json!({"1e-3": 62.3, "1e-4": 69.1, "1e-5": 85.0})));

        assert!(comparison.is_match("1e-4"));
        assert!(!comparison.is_match("1e-5"));
        assert!(!comparison.is_match("1e-9"));
    }

    #[test]
    fn test_no_confidence_never_matches() {
        let comparison =
            Comparison::default().with_thresholds(Some(json!({"1e-3": 62.3})));
        assert_eq!(comparison.confidence(), None);
        assert!(!comparison.is_match("1e-3"));
        assert_eq!(
            comparison.to_value(),
            json!({"confidence": null, "thresholds": {"1e-3": 62.3}})
        );
    }
}
