//! Image metadata returned alongside (or instead of) predictions.
//!
//! The backend sends a flat JSON object; every key is optional. Display rules:
//! absent, `null` and `""` mean "not available"; numbers print without a
//! trailing `.0`; nested values print as compact JSON.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Flat key/value metadata about the uploaded image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(Map<String, Value>);

impl Metadata {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Display text for `key`, or `None` when not available.
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(display_value)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    /// Whether `key` holds a truthy value (`false`, `0`, `""`, `null` are not).
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).is_some_and(is_truthy)
    }

    /// EXIF tags sorted by key in UTF-8 byte order. Empty when there is no
    /// EXIF object.
    ///
    /// Byte order matches UTF-16 order except for keys holding characters at
    /// U+E000 and above next to ones outside the BMP.
    pub fn exif_entries(&self) -> Vec<(String, String)> {
        let Some(Value::Object(exif)) = self.get("exif") else {
            return Vec::new();
        };
        let mut entries: Vec<(String, String)> = exif
            .iter()
            .map(|(key, value)| (key.clone(), display_value(value).unwrap_or_default()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// Hex codes of the dominant colors, in the order given.
    pub fn dominant_colors(&self) -> Vec<String> {
        let Some(Value::Array(colors)) = self.get("dominant_colors") else {
            return Vec::new();
        };
        colors
            .iter()
            .filter_map(|color| color.get("hex").and_then(Value::as_str))
            .map(str::to_string)
            .collect()
    }
}

impl From<Map<String, Value>> for Metadata {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Display text for a JSON value, or `None` for "not available".
pub fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (_, Some(u), _) => u.to_string(),
            (_, _, Some(f)) => f.to_string(),
            _ => n.to_string(),
        }),
        Value::Array(_) | Value::Object(_) => serde_json::to_string(value).ok(),
    }
}

/// JavaScript-style truthiness, as the backend's optional flags expect.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metadata(value: Value) -> Metadata {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_display_rules() {
        let meta = metadata(json!({
            "filename": "a.jpg",
            "empty": "",
            "missing": null,
            "width": 640,
            "aspect_ratio": 1.33,
            "whole_float": 2.0,
            "has_location": true,
            "gps_data": { "GPSVersionID": "2.2" }
        }));

        assert_eq!(meta.text("filename").as_deref(), Some("a.jpg"));
        assert_eq!(meta.text("empty"), None);
        assert_eq!(meta.text("missing"), None);
        assert_eq!(meta.text("absent"), None);
        assert_eq!(meta.text("width").as_deref(), Some("640"));
        assert_eq!(meta.text("aspect_ratio").as_deref(), Some("1.33"));
        assert_eq!(meta.text("whole_float").as_deref(), Some("2"));
        assert_eq!(meta.text("has_location").as_deref(), Some("true"));
        assert_eq!(
            meta.text("gps_data").as_deref(),
            Some(r#"{"GPSVersionID":"2.2"}"#)
        );
    }

    #[test]
    fn test_zero_is_displayed_but_not_truthy() {
        let meta = metadata(json!({ "contrast": 0, "iso": 0 }));
        assert_eq!(meta.text("iso").as_deref(), Some("0"));
        assert!(!meta.flag("contrast"));
    }

    #[test]
    fn test_exif_entries_sorted_by_key() {
        let meta = metadata(json!({
            "exif": { "Make": "Acme", "ISO": "100", "DateTime": "2024:01:02 03:04:05", "Model": "X1" }
        }));

        let keys: Vec<String> = meta.exif_entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["DateTime", "ISO", "Make", "Model"]);
    }

    #[test]
    fn test_exif_entries_any_key_set_is_ascending() {
        let meta = metadata(json!({
            "exif": { "b": 1, "a": 2, "B": 3, "_": 4, "10": 5, "9": 6 }
        }));

        let keys: Vec<String> = meta.exif_entries().into_iter().map(|(k, _)| k).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn test_exif_keys_compare_by_bytes() {
        let meta = metadata(json!({
            "exif": { "\u{1F4F7}": "camera", "\u{FF21}": "fullwidth" }
        }));

        let keys: Vec<String> = meta.exif_entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["\u{FF21}", "\u{1F4F7}"]);
    }

    #[test]
    fn test_exif_absent_or_wrong_type() {
        assert!(metadata(json!({})).exif_entries().is_empty());
        assert!(metadata(json!({ "exif": "none" })).exif_entries().is_empty());
    }

    #[test]
    fn test_dominant_colors_skip_malformed_entries() {
        let meta = metadata(json!({
            "dominant_colors": [
                { "rgb": "rgb(1,2,3)", "hex": "#010203" },
                { "rgb": "rgb(4,5,6)" },
                "oops",
                { "hex": "#aabbcc" }
            ]
        }));
        assert_eq!(meta.dominant_colors(), vec!["#010203", "#aabbcc"]);
    }
}
