use serde_json::Value;

use super::{card_list, escape_attr, escape_html, notice, text_field, Shape};

pub const NO_RESULTS: &str = "No results found.";
pub const NO_TITLE: &str = "(no title)";

/// Search hits: `[{title, url, context}]`. Anything that is not a non-empty
/// list renders the "no results" notice.
pub fn render(payload: &Value) -> String {
    match Shape::of(payload) {
        Shape::Items(items) => card_list(items.iter().map(card)),
        _ => notice(NO_RESULTS),
    }
}

fn card(item: &Value) -> String {
    let title = text_field(item, &["title"]).unwrap_or_else(|| NO_TITLE.to_string());
    let url = text_field(item, &["url"]).unwrap_or_default();
    let context = text_field(item, &["context"]).unwrap_or_default();

    format!(
        concat!(
            r#"<div class="card">"#,
            r#"<div class="card-head">"#,
            r#"<a class="card-title" href="{href}" target="_blank" rel="noopener noreferrer">{title}</a>"#,
            r#"<button class="copy-url" data-copy="{href}">Copy URL</button>"#,
            r#"</div>"#,
            r#"<div class="card-url">{url}</div>"#,
            r#"<div class="card-context">{context}</div>"#,
            r#"</div>"#
        ),
        href = escape_attr(&url),
        title = escape_html(&title),
        url = escape_html(&url),
        context = escape_html(&context),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_results() {
        assert!(render(&json!([])).contains(NO_RESULTS));
        assert!(render(&Value::Null).contains(NO_RESULTS));
        assert!(render(&json!("plain text")).contains(NO_RESULTS));
    }

    #[test]
    fn test_single_card() {
        let html = render(&json!([{"title": "T", "url": "http://x", "context": "ctx"}]));
        assert_eq!(html.matches(r#"<div class="card">"#).count(), 1);
        assert!(html.contains(r#"href="http://x""#));
        assert!(html.contains(">T</a>"));
        assert!(html.contains("ctx"));
        assert!(!html.contains(NO_RESULTS));
    }

    #[test]
    fn test_missing_fields_fall_back() {
        let html = render(&json!([{}]));
        assert!(html.contains(NO_TITLE));
        assert!(html.contains(r#"href="""#));
    }

    #[test]
    fn test_url_attribute_is_escaped() {
        let html = render(&json!([{"title": "t", "url": "http://x/\"onmouseover=\"a\nb"}]));
        assert!(html.contains(r#"href="http://x/&quot;onmouseover=&quot;a b""#));
    }
}
