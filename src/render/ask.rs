use serde_json::{json, Map, Value};

use super::read::markdown_card;
use super::references::{render_refs, strip_reference_section};
use super::{text_field, MarkdownRenderer};
use crate::envelope::{inner_result, Envelope};

const CARD_TITLE: &str = "Summary";

/// Pulls the `{summary, refs}` object out of an ask response.
///
/// The ask endpoint answers with `summary`/`refs` at the top level of the
/// body. When they are absent the regular inner result is used instead: an
/// object is taken as-is and plain text becomes the summary.
pub fn ask_payload(envelope: &Envelope) -> Value {
    if envelope.extra.contains_key("summary") || envelope.extra.contains_key("refs") {
        let mut payload = Map::new();
        for key in ["summary", "refs"] {
            if let Some(value) = envelope.extra.get(key) {
                payload.insert(key.to_string(), value.clone());
            }
        }
        return Value::Object(payload);
    }

    match inner_result(envelope) {
        object @ Value::Object(_) => object,
        Value::String(summary) => json!({ "summary": summary }),
        _ => json!({}),
    }
}

/// Answer summary as Markdown, minus any embedded reference section, with
/// the structured references listed underneath.
pub fn render(payload: &Value, markdown: &dyn MarkdownRenderer) -> String {
    let summary = text_field(payload, &["summary"]).unwrap_or_default();
    let summary = strip_reference_section(&summary);
    let refs = payload.get("refs").unwrap_or(&Value::Null);

    markdown_card(CARD_TITLE, &summary, &render_refs(refs), markdown)
}
