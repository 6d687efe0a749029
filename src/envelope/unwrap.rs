use serde_json::Value;

use super::types::Envelope;

/// Message used when an error envelope has no readable text part.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// A response body, decoded as far as it allows.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

/// Decodes `raw` as JSON when the content type says so. A body that claims
/// JSON but does not parse degrades to text; this never fails.
pub fn unwrap_body(raw: &str, content_type: &str) -> ResponseBody {
    if content_type.to_ascii_lowercase().contains("application/json") {
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => return ResponseBody::Json(value),
            Err(err) => tracing::debug!(%err, "body labelled as JSON did not parse"),
        }
    }
    ResponseBody::Text(raw.to_string())
}

/// Returns the error message of an envelope flagged with `isError`.
pub fn classify_error(envelope: &Envelope) -> Option<String> {
    if !envelope.is_error {
        return None;
    }
    Some(
        envelope
            .first_text()
            .unwrap_or(UNKNOWN_ERROR)
            .to_string(),
    )
}

/// Digs the tool payload out of an envelope.
///
/// The first text part is tried as JSON of the form
/// `{"content": {"result": ...}}`; when that shape is there the nested
/// `result` is returned as-is (`Null` if the key is missing). Any other text
/// is returned unchanged as a string. No text part yields `Null`.
pub fn inner_result(envelope: &Envelope) -> Value {
    let Some(text) = envelope.first_text() else {
        return Value::Null;
    };

    if let Ok(Value::Object(inner)) = serde_json::from_str::<Value>(text) {
        match inner.get("content") {
            Some(content @ (Value::Object(_) | Value::Array(_))) => {
                return content.get("result").cloned().unwrap_or(Value::Null);
            }
            _ => tracing::debug!("text part is JSON without a content object, using raw text"),
        }
    }

    Value::String(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::types::ContentPart;
    use serde_json::json;

    fn text_envelope(text: &str) -> Envelope {
        Envelope {
            content: Some(vec![ContentPart::text(text)]),
            ..Default::default()
        }
    }

    #[test]
    fn test_unwrap_body_json() {
        let body = unwrap_body(r#"{"a":1}"#, "Application/JSON; charset=utf-8");
        assert_eq!(body, ResponseBody::Json(json!({"a": 1})));
    }

    #[test]
    fn test_unwrap_body_bad_json_degrades_to_text() {
        let body = unwrap_body("<html>oops</html>", "application/json");
        assert_eq!(body, ResponseBody::Text("<html>oops</html>".to_string()));
    }

    #[test]
    fn test_unwrap_body_wrong_content_type() {
        let body = unwrap_body(r#"{"a":1}"#, "text/html");
        assert_eq!(body, ResponseBody::Text(r#"{"a":1}"#.to_string()));
    }

    #[test]
    fn test_classify_error_uses_text_part() {
        let mut env = text_envelope("rate limited");
        env.is_error = true;
        assert_eq!(classify_error(&env), Some("rate limited".to_string()));
    }

    #[test]
    fn test_classify_error_fallback() {
        let env = Envelope {
            is_error: true,
            content: Some(vec![ContentPart::Other]),
            ..Default::default()
        };
        assert_eq!(classify_error(&env), Some(UNKNOWN_ERROR.to_string()));

        let env = Envelope {
            is_error: true,
            ..Default::default()
        };
        assert_eq!(classify_error(&env), Some(UNKNOWN_ERROR.to_string()));
    }

    #[test]
    fn test_classify_error_not_flagged() {
        assert_eq!(classify_error(&text_envelope("fine")), None);
    }

    #[test]
    fn test_inner_result_returns_nested_value_exactly() {
        for v in [json!(null), json!(0), json!([]), json!([{"title": "T"}]), json!("md")] {
            let text = json!({"content": {"result": v.clone()}}).to_string();
            assert_eq!(inner_result(&text_envelope(&text)), v);
        }
    }

    #[test]
    fn test_inner_result_missing_result_key_is_null() {
        let env = text_envelope(r#"{"content": {"other": 1}}"#);
        assert_eq!(inner_result(&env), Value::Null);
    }

    #[test]
    fn test_inner_result_plain_text_round_trips() {
        for text in ["# Title\n\nbody", "{not json", "42", r#"{"no_content": true}"#] {
            assert_eq!(inner_result(&text_envelope(text)), Value::String(text.to_string()));
        }
    }

    #[test]
    fn test_inner_result_without_text_part() {
        assert_eq!(inner_result(&Envelope::default()), Value::Null);
        let env = Envelope {
            content: Some(vec![ContentPart::Other]),
            ..Default::default()
        };
        assert_eq!(inner_result(&env), Value::Null);
    }
}
