use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use super::{escape_attr, escape_html, text_field};

/// At most this many references are shown under an answer.
pub const MAX_REFS: usize = 3;

const UNTITLED: &str = "(link)";

fn reference_heading() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^##[ \t]*(?:参考URL|References)").expect("valid regex"))
}

fn section_heading() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^##(?:[ \t]|$)").expect("valid regex"))
}

/// Drops every `## References` section (heading through the line before the
/// next level-2 heading, or the end) from a generated answer, then trims it.
/// Applying it twice gives the same result as applying it once.
pub fn strip_reference_section(markdown: &str) -> String {
    let mut text = markdown.trim().to_string();

    while let Some(heading) = reference_heading().find(&text) {
        let line_end = text[heading.end()..]
            .find('\n')
            .map_or(text.len(), |i| heading.end() + i);
        let section_end = section_heading()
            .find_at(&text, line_end)
            .map_or(text.len(), |next| next.start());
        text.replace_range(heading.start()..section_end, "");
    }

    text.trim().to_string()
}

/// One entry of an answer's reference list.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    pub title: String,
    pub url: Option<String>,
}

/// Reads up to [`MAX_REFS`] references. The title falls back to the URL,
/// then to a placeholder.
pub fn references(refs: &Value) -> Vec<Reference> {
    let Some(items) = refs.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .take(MAX_REFS)
        .map(|item| {
            let url = text_field(item, &["url"]);
            let title = text_field(item, &["title"])
                .or_else(|| url.clone())
                .unwrap_or_else(|| UNTITLED.to_string());
            Reference { title, url }
        })
        .collect()
}

/// Reference list markup, or an empty string when there is nothing to show.
pub fn render_refs(refs: &Value) -> String {
    let picked = references(refs);
    if picked.is_empty() {
        return String::new();
    }

    let items: String = picked
        .iter()
        .map(|r| match &r.url {
            Some(url) => format!(
                r#"<li><a class="ref-link" href="{}" target="_blank" rel="noopener noreferrer">{}</a></li>"#,
                escape_attr(url),
                escape_html(&r.title)
            ),
            None => format!("<li>{}</li>", escape_html(&r.title)),
        })
        .collect();

    format!(r#"<div class="refs"><div class="card-heading">References</div><ul class="ref-list">{items}</ul></div>"#)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ANSWER: &str = "## Conclusion\nUse Lambda.\n\n## 参考URL\n- https://a\n- https://b\n\n## Caveats\nCold starts.\n";

    #[test]
    fn test_strip_middle_section() {
        assert_eq!(
            strip_reference_section(ANSWER),
            "## Conclusion\nUse Lambda.\n\n## Caveats\nCold starts."
        );
    }

    #[test]
    fn test_strip_trailing_section_and_subheadings() {
        let text = "Summary line\n\n## References\n### Primary\n- a\n### Secondary\n- b\n";
        assert_eq!(strip_reference_section(text), "Summary line");
    }

    #[test]
    fn test_strip_leading_section() {
        assert_eq!(strip_reference_section("## References\n- a\n## Next\nbody"), "## Next\nbody");
        assert_eq!(strip_reference_section("  \n## 参考URL\n- a"), "");
    }

    #[test]
    fn test_strip_keeps_other_headings() {
        let text = "## Reference architecture notes\nkeep\n### References\nnested stays";
        assert_eq!(strip_reference_section(text), text);
        assert_eq!(strip_reference_section("### References\nx"), "### References\nx");
    }

    #[test]
    fn test_strip_is_idempotent() {
        let inputs = [
            ANSWER,
            "",
            "   ## References\nindented",
            "a\n## References\n## References\nb\n## Other\nc",
            "## Other\r\n## 参考URL\r\n- x\r\n",
            "no headings at all\n",
        ];
        for input in inputs {
            let once = strip_reference_section(input);
            assert_eq!(strip_reference_section(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_references_cap_and_fallbacks() {
        let refs = json!([{"url": "a"}, {"title": "B"}, {"url": "c", "title": "C"}, {"url": "d"}]);
        let picked = references(&refs);
        assert_eq!(
            picked,
            vec![
                Reference { title: "a".into(), url: Some("a".into()) },
                Reference { title: "B".into(), url: None },
                Reference { title: "C".into(), url: Some("c".into()) },
            ]
        );

        let html = render_refs(&refs);
        assert_eq!(html.matches("<li>").count(), 3);
        assert!(html.contains("<li>B</li>"));
        assert!(html.contains(r#"href="c""#));
        assert!(!html.contains(r#"href="d""#));
    }

    #[test]
    fn test_no_refs_renders_nothing() {
        assert_eq!(render_refs(&json!([])), "");
        assert_eq!(render_refs(&Value::Null), "");
        assert!(render_refs(&json!(["junk"])).contains(UNTITLED));
    }
}
