//! Data Model: InputRecord, Message, ProofResult
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A submitted chat export.
///
/// The whole parsed document is kept because fingerprinting and the
/// ownership containment check look at every field, not only the typed ones.
#[derive(Debug, Clone, PartialEq)]
pub struct InputRecord {
    raw: Value,
}

impl InputRecord {
    pub fn from_value(raw: Value) -> Self {
        Self { raw }
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes).map(Self::from_value)
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Declared export type (`personal_chat`, `ai_chat`, ...).
    pub fn record_type(&self) -> Option<&str> {
        self.raw.get("type").and_then(Value::as_str)
    }

    /// Top-level field passed through untouched, or `""` when absent.
    pub fn passthrough(&self, field: &str) -> Value {
        self.raw
            .get(field)
            .cloned()
            .unwrap_or_else(|| Value::String(String::new()))
    }

    /// Messages in submission order. A missing or non-array `messages`
    /// field reads as an empty sequence.
    pub fn messages(&self) -> Vec<Message> {
        match self.raw.get("messages") {
            Some(Value::Array(items)) => items.iter().map(Message::from_value).collect(),
            _ => Vec::new(),
        }
    }

    /// Stable string form used for fingerprints and identity containment.
    pub fn canonical_string(&self) -> String {
        crate::fingerprint::canonical_json(&self.raw)
    }
}

/// One chat message. Fields stay as raw JSON because exports encode rich
/// text as arrays of entities and ids as numbers or strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub text: Option<Value>,
    #[serde(default)]
    pub date: Option<Value>,
    #[serde(default)]
    pub reply_to_message_id: Option<Value>,
}

impl Message {
    /// Non-object entries become a message with every field absent.
    pub fn from_value(value: &Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        serde_json::from_value(value.clone()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        !self.text.as_ref().map(is_truthy).unwrap_or(false)
    }

    pub fn is_reply(&self) -> bool {
        self.reply_to_message_id.as_ref().map(is_truthy).unwrap_or(false)
    }

    pub fn date_str(&self) -> Option<&str> {
        self.date.as_ref().and_then(Value::as_str)
    }
}

/// JSON truthiness: null, false, zero and empty containers are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Output contract handed to the caller for persistence.
///
/// Field names and their nesting are consumed downstream; do not rename.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofResult {
    pub dlp_id: u64,
    pub uniqueness: f64,
    pub ownership: f64,
    pub authenticity: f64,
    pub quality: f64,
    pub score: f64,
    pub valid: bool,
    /// Free-form details for downstream consumers.
    pub attributes: Map<String, Value>,
    /// Written to the public record.
    pub metadata: Map<String, Value>,
}

impl ProofResult {
    pub fn new(dlp_id: u64) -> Self {
        Self {
            dlp_id,
            uniqueness: 0.0,
            ownership: 0.0,
            authenticity: 0.0,
            quality: 0.0,
            score: 0.0,
            valid: false,
            attributes: Map::new(),
            metadata: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_accessors() {
        let record = InputRecord::from_value(json!({
            "type": "personal_chat",
            "character_slug": "alice",
            "messages": [
                {"text": "hi", "date": "2024-01-01T00:00:00", "reply_to_message_id": 7},
                "not a message"
            ]
        }));

        assert_eq!(record.record_type(), Some("personal_chat"));
        assert_eq!(record.passthrough("character_slug"), json!("alice"));
        assert_eq!(record.passthrough("character_level"), json!(""));

        let messages = record.messages();
        assert_eq!(messages.len(), 2);
        assert!(!messages[0].is_empty());
        assert!(messages[0].is_reply());
        assert_eq!(messages[0].date_str(), Some("2024-01-01T00:00:00"));
        assert_eq!(messages[1], Message::default());
        assert!(messages[1].is_empty());
    }

    #[test]
    fn test_non_object_record() {
        let record = InputRecord::from_value(json!([1, 2, 3]));
        assert_eq!(record.record_type(), None);
        assert!(record.messages().is_empty());

        let record = InputRecord::from_value(json!({"messages": null, "type": 3}));
        assert_eq!(record.record_type(), None);
        assert!(record.messages().is_empty());
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!([])));
        assert!(is_truthy(&json!([{"type": "bold", "text": "x"}])));
        assert!(is_truthy(&json!(12)));
        assert!(is_truthy(&json!("x")));
    }

    #[test]
    fn test_result_field_order() {
        let result = ProofResult::new(8);
        let encoded = serde_json::to_string(&result).unwrap();
        assert!(encoded.starts_with(r#"{"dlp_id":8,"uniqueness":0.0,"ownership":0.0"#));
        assert!(encoded.ends_with(r#""valid":false,"attributes":{},"metadata":{}}"#));
    }
}
