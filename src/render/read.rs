use serde_json::Value;

use super::{display_text, escape_html, MarkdownRenderer, Rendered};

const CARD_TITLE: &str = "Markdown (rendered)";

/// A documentation page as Markdown. An empty page still renders; only a
/// non-empty one is handed back for copying.
pub fn render(payload: &Value, markdown: &dyn MarkdownRenderer) -> Rendered {
    let text = match payload {
        Value::Null => String::new(),
        other => display_text(other),
    };

    Rendered {
        html: markdown_card(CARD_TITLE, &text, "", markdown),
        read_markdown: (!text.is_empty()).then_some(text),
    }
}

/// A titled card around rendered Markdown; `footer` is trusted markup
/// placed after the document.
pub(crate) fn markdown_card(
    title: &str,
    text: &str,
    footer: &str,
    markdown: &dyn MarkdownRenderer,
) -> String {
    format!(
        r#"<div class="md-card"><div class="card-heading">{}</div><div class="md">{}</div>{footer}</div>"#,
        escape_html(title),
        markdown.to_html(text)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{CmarkRenderer, PlainRenderer};
    use serde_json::json;

    #[test]
    fn test_read_markdown() {
        let rendered = render(&json!("# Lambda\n\nRuns code."), &CmarkRenderer);
        assert!(rendered.html.contains("<h1>Lambda</h1>"));
        assert_eq!(rendered.read_markdown.as_deref(), Some("# Lambda\n\nRuns code."));
    }

    #[test]
    fn test_empty_read_disables_copy() {
        let rendered = render(&json!(""), &PlainRenderer);
        assert!(rendered.html.contains(CARD_TITLE));
        assert_eq!(rendered.read_markdown, None);

        let rendered = render(&Value::Null, &PlainRenderer);
        assert_eq!(rendered.read_markdown, None);
    }
}
