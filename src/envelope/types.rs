use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One entry of an envelope's `content` list. Only text parts carry
/// anything this crate reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentPart {
    Text { text: String },
    #[serde(other)]
    Other,
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text { text: text.into() }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentPart::Text { text } => Some(text),
            ContentPart::Other => None,
        }
    }
}

/// The outer JSON body returned by every tool endpoint.
///
/// Deserialization is lenient: a non-boolean `isError` is judged by
/// truthiness, a non-list `content` is treated as absent, and parts that do
/// not decode become [`ContentPart::Other`]. Unknown top-level keys land in
/// `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "isError", default, deserialize_with = "truthy")]
    pub is_error: bool,
    #[serde(default, deserialize_with = "lenient_parts", skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<ContentPart>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Envelope {
    /// Builds an envelope from any JSON value. Non-object values produce an
    /// empty envelope.
    pub fn from_value(value: &Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        Envelope::deserialize(value).unwrap_or_default()
    }

    pub fn first_text(&self) -> Option<&str> {
        self.content
            .as_deref()?
            .iter()
            .find_map(ContentPart::as_text)
    }
}

/// JavaScript-style truthiness, which is how backend payloads are probed.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(is_truthy(&value))
}

fn lenient_parts<'de, D>(deserializer: D) -> Result<Option<Vec<ContentPart>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(None);
    };
    let parts = items
        .into_iter()
        .map(|item| serde_json::from_value(item).unwrap_or(ContentPart::Other))
        .collect();
    Ok(Some(parts))
}
