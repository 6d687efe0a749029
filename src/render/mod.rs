//! HTML renderers, one per tool.
//!
//! Every renderer is a pure function from the unwrapped tool payload to an
//! HTML fragment. Backend text is always escaped before it is embedded; URLs
//! are escaped for attribute context but otherwise passed through.

pub mod ask;
pub mod availability;
pub mod markdown;
pub mod read;
pub mod recommend;
pub mod references;
pub mod regions;
pub mod search;

use serde_json::Value;

use crate::envelope::is_truthy;
use crate::errors::{truncate_chars, DispatchError, MAX_ERROR_CHARS};
use crate::tools::ToolKind;

pub use markdown::{CmarkRenderer, MarkdownRenderer, PlainRenderer};

/// Output of one render pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rendered {
    pub html: String,
    /// Markdown shown by the read tool, offered to the copy action. `None`
    /// for every other tool and for an empty document.
    pub read_markdown: Option<String>,
}

impl Rendered {
    pub fn html(html: String) -> Self {
        Self {
            html,
            read_markdown: None,
        }
    }
}

/// How a payload lines up with what a list renderer expects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape<'a> {
    Items(&'a [Value]),
    Empty,
    /// Any non-list payload; rendered as a JSON dump where supported.
    Unknown(&'a Value),
    /// `null`: nothing could be extracted at all.
    Missing,
}

impl<'a> Shape<'a> {
    pub fn of(payload: &'a Value) -> Self {
        match payload {
            Value::Null => Shape::Missing,
            Value::Array(items) if items.is_empty() => Shape::Empty,
            Value::Array(items) => Shape::Items(items),
            other => Shape::Unknown(other),
        }
    }
}

/// Renders `payload` with the renderer belonging to `tool`.
///
/// The only failure is an availability payload of `null`, which means the
/// envelope held nothing usable.
pub fn render_tool(
    tool: ToolKind,
    payload: &Value,
    markdown: &dyn MarkdownRenderer,
) -> Result<Rendered, DispatchError> {
    let rendered = match tool {
        ToolKind::Search => Rendered::html(search::render(payload)),
        ToolKind::Ask => Rendered::html(ask::render(payload, markdown)),
        ToolKind::Read => read::render(payload, markdown),
        ToolKind::Recommend => Rendered::html(recommend::render(payload)),
        ToolKind::ListRegions => Rendered::html(regions::render(payload)),
        ToolKind::RegionalAvailability => Rendered::html(availability::render(payload)?),
    };
    Ok(rendered)
}

/// Escapes element text, quotes included.
pub fn escape_html(text: &str) -> String {
    html_escape::encode_quoted_attribute(text).into_owned()
}

/// Escapes for a double-quoted attribute value; newlines become spaces.
pub fn escape_attr(text: &str) -> String {
    html_escape::encode_double_quoted_attribute(text).replace(['\r', '\n'], " ")
}

/// First truthy value among `keys` on a JSON object.
pub fn first_truthy<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let object = record.as_object()?;
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find(|value| is_truthy(value))
}

/// Strings as they are, everything else as compact JSON.
pub fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn text_field(record: &Value, keys: &[&str]) -> Option<String> {
    first_truthy(record, keys).map(display_text)
}

pub fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

pub fn error_box(message: &str) -> String {
    format!(
        r#"<div class="error-box"><div class="error-title">Error</div><div class="error-text">{}</div></div>"#,
        escape_html(truncate_chars(message, MAX_ERROR_CHARS))
    )
}

pub(crate) fn notice(message: &str) -> String {
    format!(r#"<div class="notice">{}</div>"#, escape_html(message))
}

pub(crate) fn json_dump(value: &Value) -> String {
    format!(
        r#"<div class="raw-box"><div class="raw-json">{}</div></div>"#,
        escape_html(&pretty_json(value))
    )
}

pub(crate) fn card_list(cards: impl IntoIterator<Item = String>) -> String {
    let body: String = cards.into_iter().collect();
    format!(r#"<div class="card-list">{body}</div>"#)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_escape_html() {
        let escaped = escape_html(r#"<script>"a" & 'b'</script>"#);
        assert!(escaped.starts_with("&lt;script&gt;&quot;a&quot; &amp; "));
        assert!(escaped.ends_with("&lt;/script&gt;"));
        assert!(!escaped.contains(['<', '>', '"', '\'']));
    }

    #[test]
    fn test_escape_html_leaves_plain_text() {
        assert_eq!(escape_html("https://docs/s3 ok"), "https://docs/s3 ok");
    }

    #[test]
    fn test_escape_attr_strips_newlines() {
        assert_eq!(escape_attr("http://x\n\"y\""), "http://x &quot;y&quot;");
        assert_eq!(escape_attr("a\r\nb&c"), "a  b&amp;c");
    }

    #[test]
    fn test_first_truthy_order() {
        let record = json!({"id": "", "name": "second", "code": "third"});
        assert_eq!(
            first_truthy(&record, &["missing", "id", "name", "code"]),
            Some(&json!("second"))
        );
        assert_eq!(first_truthy(&json!("str"), &["id"]), None);
    }

    #[test]
    fn test_shape_of() {
        assert_eq!(Shape::of(&Value::Null), Shape::Missing);
        assert_eq!(Shape::of(&json!([])), Shape::Empty);
        assert!(matches!(Shape::of(&json!([1])), Shape::Items(items) if items.len() == 1));
        assert!(matches!(Shape::of(&json!({"a": 1})), Shape::Unknown(_)));
    }

    #[test]
    fn test_error_box_escapes_and_truncates() {
        let html = error_box(&format!("<b>{}", "e".repeat(5000)));
        assert!(html.contains("&lt;b&gt;"));
        assert!(!html.contains(&"e".repeat(MAX_ERROR_CHARS)));
    }

    #[test]
    fn test_render_tool_availability_null_fails() {
        let err = render_tool(ToolKind::RegionalAvailability, &Value::Null, &PlainRenderer);
        assert_eq!(err, Err(DispatchError::ExtractionFailed));
    }

    #[test]
    fn test_every_renderer_escapes_script_titles() -> anyhow::Result<()> {
        let hostile = "<script>alert(1)</script>";
        let record = json!([{
            "title": hostile,
            "url": hostile,
            "context": hostile,
            "name": hostile,
            "resource": hostile,
        }]);
        let ask = json!({"summary": "", "refs": [{"title": hostile, "url": hostile}]});

        for tool in ToolKind::ALL {
            let payload = match tool {
                ToolKind::Ask => &ask,
                _ => &record,
            };
            let html = render_tool(tool, payload, &PlainRenderer)?.html;
            assert!(!html.contains("<script>"), "{tool} leaked raw markup");
            assert!(html.contains("&lt;script&gt;"), "{tool} dropped the title");
        }

        let read = render_tool(ToolKind::Read, &json!(hostile), &PlainRenderer)?.html;
        assert!(read.contains("&lt;script&gt;"));
        Ok(())
    }
}
