//! Candidate items.
//!
//! Remote candidates are JSON records whose shape is owned by the backend;
//! local candidates are plain `{ label, value }` pairs supplied by the form.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Stable identity of a rendered candidate row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemKey {
    /// An identifying value carried by the item itself.
    Value(String),
    /// No identifying value; the row position in the list.
    Position(usize),
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.write_str(value),
            Self::Position(position) => write!(f, "#{position}"),
        }
    }
}

/// Fields tried, in order, for a remote record's identity.
const KEY_FIELDS: [&str; 2] = ["id", "soil_id"];

/// A remote search result.
///
/// Beyond its label, a record carries arbitrary attributes (location, soil
/// classification, nutrient levels, ...) that are forwarded untouched to the
/// consumer of the selection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateItem {
    fields: Map<String, Value>,
}

impl CandidateItem {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Wrap a JSON value, if it is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// The display label under `label_key`.
    ///
    /// A string is shown as is and any other non-null value as its JSON
    /// text. A missing or null label falls back to the whole record as JSON.
    pub fn label(&self, label_key: &str) -> String {
        match self.fields.get(label_key) {
            Some(Value::String(label)) => label.clone(),
            Some(Value::Null) | None => Value::Object(self.fields.clone()).to_string(),
            Some(other) => other.to_string(),
        }
    }

    /// The row identity: `id`, then `soil_id`, then `position`.
    ///
    /// Empty identifiers (null, `false`, `0`, `""`) do not count.
    pub fn key(&self, position: usize) -> ItemKey {
        KEY_FIELDS
            .iter()
            .filter_map(|field| self.fields.get(*field))
            .find_map(key_text)
            .map(ItemKey::Value)
            .unwrap_or(ItemKey::Position(position))
    }

    /// A non-empty string attribute.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// A numeric attribute. Numeric strings such as `"6.8"` are accepted.
    pub fn number(&self, field: &str) -> Option<f64> {
        match self.fields.get(field)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl From<Map<String, Value>> for CandidateItem {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

fn key_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
        _ => None,
    }
}

/// An entry of a local candidate list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalItem {
    pub label: String,
    pub value: String,
}

impl LocalItem {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Case-insensitive substring match on label or value.
    ///
    /// `needle` must already be lower-cased.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.label.to_lowercase().contains(needle) || self.value.to_lowercase().contains(needle)
    }
}

/// Local items for a crop catalog, labelled `"<name> (<season>)"`.
#[cfg(feature = "networking")]
pub fn crop_items(crops: &[terra_select_net::Crop]) -> Vec<LocalItem> {
    crops
        .iter()
        .map(|crop| LocalItem::new(format!("{} ({})", crop.name, crop.season), crop.value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: Value) -> CandidateItem {
        CandidateItem::from_value(value).unwrap()
    }

    #[test]
    fn test_label_lookup() {
        let soil = item(json!({"id": 1, "label": "Black soil - Kurnool", "location": "Kurnool"}));
        assert_eq!(soil.label("label"), "Black soil - Kurnool");
        assert_eq!(soil.label("location"), "Kurnool");
        assert_eq!(soil.label("id"), "1");
    }

    #[test]
    fn test_label_falls_back_to_record() {
        let soil = item(json!({"district": "Anantapur", "label": null}));
        let label = soil.label("label");
        let reparsed: Value = serde_json::from_str(&label).unwrap();
        assert_eq!(reparsed, json!({"district": "Anantapur", "label": null}));

        let unlabeled = item(json!({"district": "Anantapur"}));
        assert_eq!(unlabeled.label("label"), r#"{"district":"Anantapur"}"#);
    }

    #[test]
    fn test_key_precedence() {
        assert_eq!(
            item(json!({"id": 4, "soil_id": 9})).key(0),
            ItemKey::Value("4".to_string())
        );
        assert_eq!(
            item(json!({"soil_id": 9})).key(0),
            ItemKey::Value("9".to_string())
        );
        assert_eq!(item(json!({"id": 0, "soil_id": ""})).key(3), ItemKey::Position(3));
        assert_eq!(item(json!({"id": "abc"})).key(3).to_string(), "abc");
        assert_eq!(ItemKey::Position(3).to_string(), "#3");
    }

    #[test]
    fn test_typed_accessors() {
        let soil = item(json!({
            "location": "Kurnool",
            "state": "",
            "ph": 6.8,
            "nitrogen": "90",
            "moisture": null,
            "season": ["Kharif"]
        }));

        assert_eq!(soil.text("location"), Some("Kurnool"));
        assert_eq!(soil.text("state"), None);
        assert_eq!(soil.text("ph"), None);
        assert_eq!(soil.number("ph"), Some(6.8));
        assert_eq!(soil.number("nitrogen"), Some(90.0));
        assert_eq!(soil.number("moisture"), None);
        assert_eq!(soil.number("season"), None);
        assert_eq!(soil.number("absent"), None);
    }

    #[test]
    fn test_non_objects_are_not_items() {
        assert!(CandidateItem::from_value(json!([1, 2])).is_none());
        assert!(CandidateItem::from_value(json!("Kurnool")).is_none());
    }

    #[test]
    fn test_local_match() {
        let rice = LocalItem::new("Rice (Kharif)", "rice");
        assert!(rice.matches("ric"));
        assert!(rice.matches("kharif"));
        assert!(!rice.matches("wheat"));
    }

    #[cfg(feature = "networking")]
    #[test]
    fn test_crop_items() {
        let crops = vec![terra_select_net::Crop {
            name: "Rice".to_string(),
            value: "rice".to_string(),
            season: "Kharif".to_string(),
            duration: "120-150 days".to_string(),
        }];
        assert_eq!(crop_items(&crops), vec![LocalItem::new("Rice (Kharif)", "rice")]);
    }
}
