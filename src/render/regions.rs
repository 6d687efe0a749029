use serde_json::Value;

use super::{card_list, escape_html, json_dump, pretty_json, text_field, Shape};

/// Keys probed, in order, for a region's display name.
pub const NAME_KEYS: &[&str] = &["region_id", "name", "region", "id", "code"];
/// Keys probed, in order, for a region's long description.
pub const DESCRIPTION_KEYS: &[&str] = &["region_long_name", "description", "label", "long_name"];

const UNNAMED: &str = "(region)";

/// Region list. Accepts records, plain strings, or a mix; anything that is
/// not a non-empty list is dumped as JSON.
pub fn render(payload: &Value) -> String {
    match Shape::of(payload) {
        Shape::Items(items) => card_list(items.iter().map(card)),
        Shape::Empty | Shape::Unknown(_) | Shape::Missing => json_dump(payload),
    }
}

fn card(item: &Value) -> String {
    if let Value::String(name) = item {
        return format!(
            r#"<div class="card"><div class="card-name">{}</div></div>"#,
            escape_html(name)
        );
    }

    let name = text_field(item, NAME_KEYS).unwrap_or_else(|| UNNAMED.to_string());
    let description = text_field(item, DESCRIPTION_KEYS)
        .map(|d| format!(r#"<div class="card-description">{}</div>"#, escape_html(&d)))
        .unwrap_or_default();

    format!(
        r#"<div class="card"><div class="card-name">{}</div>{}<div class="card-raw">{}</div></div>"#,
        escape_html(&name),
        description,
        escape_html(&pretty_json(item)),
    )
}
