use serde_json::Value;

use super::search::NO_TITLE;
use super::{card_list, escape_attr, escape_html, notice, text_field, Shape};

pub const NO_RECOMMENDATIONS: &str = "No recommendations found.";

/// Related pages: `[{title, url, context?}]`. The context block is left out
/// when a record has none.
pub fn render(payload: &Value) -> String {
    match Shape::of(payload) {
        Shape::Items(items) => card_list(items.iter().map(card)),
        _ => notice(NO_RECOMMENDATIONS),
    }
}

fn card(item: &Value) -> String {
    let title = text_field(item, &["title"]).unwrap_or_else(|| NO_TITLE.to_string());
    let url = text_field(item, &["url"]).unwrap_or_default();
    let context = text_field(item, &["context"])
        .map(|context| format!(r#"<div class="card-context">{}</div>"#, escape_html(&context)))
        .unwrap_or_default();

    format!(
        r#"<div class="card"><a class="card-title" href="{}" target="_blank" rel="noopener noreferrer">{}</a><div class="card-url">{}</div>{}</div>"#,
        escape_attr(&url),
        escape_html(&title),
        escape_html(&url),
        context,
    )
}
