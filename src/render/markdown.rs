use pulldown_cmark::{html, Options, Parser};

use super::escape_html;

/// Turns Markdown into an HTML fragment.
pub trait MarkdownRenderer {
    fn to_html(&self, markdown: &str) -> String;
}

/// CommonMark renderer backed by pulldown-cmark, with tables and
/// strikethrough enabled. Headings get no generated ids.
#[derive(Debug, Default, Clone, Copy)]
pub struct CmarkRenderer;

impl MarkdownRenderer for CmarkRenderer {
    fn to_html(&self, markdown: &str) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);

        let parser = Parser::new_ext(markdown, options);
        let mut out = String::new();
        html::push_html(&mut out, parser);
        out
    }
}

/// Shows Markdown verbatim inside `<pre>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainRenderer;

impl MarkdownRenderer for PlainRenderer {
    fn to_html(&self, markdown: &str) -> String {
        format!("<pre>{}</pre>", escape_html(markdown))
    }
}
