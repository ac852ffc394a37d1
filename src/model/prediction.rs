//! A single labeled prediction.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Detection box in image pixel coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundingBox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

/// One labeled result with a confidence score in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub score: f64,
    /// Present for object-detection models
    pub bbox: Option<BoundingBox>,
}

impl Prediction {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
            bbox: None,
        }
    }

    /// Decode one entry leniently.
    ///
    /// A missing or empty label becomes `"Unknown"`, a missing or non-numeric
    /// score becomes `0`. Any non-null `box` marks a detection. Only an object
    /// is read for coordinates; any other shape gives a zeroed box.
    pub fn from_value(value: &Value) -> Self {
        let label = match value.get("label") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => "Unknown".to_string(),
        };
        let score = value
            .get("score")
            .and_then(Value::as_f64)
            .filter(|s| s.is_finite())
            .unwrap_or(0.0);
        let bbox = match value.get("box") {
            None | Some(Value::Null) | Some(Value::Bool(false)) => None,
            Some(raw @ Value::Object(_)) => {
                Some(serde_json::from_value(raw.clone()).unwrap_or_default())
            }
            Some(_) => Some(BoundingBox::default()),
        };

        Self { label, score, bbox }
    }

    /// Score as a percentage with two decimals, e.g. `"97.00"`.
    pub fn percentage(&self) -> String {
        format!("{:.2}", self.score * 100.0)
    }

    /// Width of the progress bar fill, clamped to `0..=100`.
    pub fn bar_width(&self) -> f64 {
        (self.score * 100.0).clamp(0.0, 100.0)
    }
}
