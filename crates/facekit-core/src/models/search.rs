use serde::Serialize;
use serde_json::Value;

use super::scalar_f64;

/// One search hit.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchItem {
    confidence: Option<f64>,
    id: Option<String>,
    raw: Value,
}

impl SearchItem {
    pub fn from_raw(raw: Value) -> Self {
        Self {
            raw,
            ..Self::default()
        }
    }

    /// Set the matched face token.
    pub fn with_id(mut self, id: Option<String>) -> Self {
        self.id = id;
        self
    }

    /// Set the confidence from a provider value (number or numeric string).
    ///
    /// The range is whatever the provider reports; no normalization happens here.
    pub fn with_confidence(mut self, value: &Value) -> Self {
        self.confidence = scalar_f64(value);
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn confidence(&self) -> Option<f64> {
        self.confidence
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Projection with `confidence`, `id` and `raw`.
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "confidence": self.confidence,
            "id": self.id,
            "raw": self.raw,
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.to_value())
    }
}

/// Outcome of a similarity search against an album.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchResult {
    total: u64,
    results: Vec<SearchItem>,
    #[serde(skip)]
    raw: Value,
}

impl SearchResult {
    pub fn from_raw(raw: Value) -> Self {
        Self {
            raw,
            ..Self::default()
        }
    }

    /// Build the hits from raw entries through `map`, and set `total` to their count.
    ///
    /// `map` receives a [`SearchItem`] that already carries the entry as its raw
    /// payload, plus the entry itself for reading vendor fields.
    pub fn set_results<F>(mut self, entries: Vec<Value>, map: F) -> Self
    where
        F: Fn(SearchItem, &Value) -> SearchItem,
    {
        self.results = entries
            .into_iter()
            .map(|entry| map(SearchItem::from_raw(entry.clone()), &entry))
            .collect();
        self.total = self.results.len() as u64;
        self
    }

    /// Set `total` from a provider value. Absent, negative or non-numeric values become 0.
    pub fn set_total(mut self, total: &Value) -> Self {
        self.total = scalar_f64(total)
            .filter(|t| t.is_finite() && *t >= 1.0)
            .map(|t| t as u64)
            .unwrap_or(0);
        self
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn results(&self) -> &[SearchItem] {
        &self.results
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Projection with `total` and `results`.
    pub fn to_value(&self) -> Value {
        let results: Vec<Value> = self.results.iter().map(SearchItem::to_value).collect();
        serde_json::json!({
            "total": self.total,
            "results": results,
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

    fn hits() -> Vec<Value> {
        vec![
            json!({"face_token": "a", "confidence": 97.1}),
            json!({"face_token": "b", "confidence": "80.5"}),
        ]
    }

    #[test]
    fn test_set_results_counts_items() {
        let result = SearchResult::default().set_results(hits(), |item, raw| {
            item.with_confidence(&raw["confidence"])
                .with_id(raw["face_token"].as_str().map(String::from))
        });

        assert_eq!(result.total(), 2);
        assert_eq!(result.results()[0].id(), Some("a"));
        assert_eq!(result.results()[1].confidence(), Some(80.5));
        assert_eq!(result.results()[1].raw()["face_token"], "b");
    }

    #[test]
    fn test_total_coercion() {
        let total = |v: Value| SearchResult::default().set_total(&v).total();
        assert_eq!(total(json!(-3)), 0);
        assert_eq!(total(json!("many")), 0);
        assert_eq!(total(Value::Null), 0);
        assert_eq!(total(json!(5)), 5);
        assert_eq!(total(json!("7")), 7);
    }

    #[test]
    fn test_empty_result_has_zero_total() {
        let result = SearchResult::default().set_results(Vec::new(), |item, _| item);
        assert!(result.is_empty());
        assert_eq!(result.total(), 0);
        assert_eq!(result.to_value(), json!({"total": 0, "results": []}));
    }

    #[test]
    fn test_total_is_not_recomputed() {
        let result = SearchResult::default()
            .set_results(hits(), |item, _| item)
            .set_total(&json!(10));
        assert_eq!(result.total(), 10);
        assert_eq!(result.results().len(), 2);
    }
}
