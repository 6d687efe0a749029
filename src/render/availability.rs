use serde_json::Value;

use super::search::NO_RESULTS;
use super::{card_list, escape_html, first_truthy, json_dump, notice, pretty_json, text_field, Shape};
use crate::errors::DispatchError;

// Compatibility shim: the backend has shipped several spellings for each
// field. Candidates are probed in order and the first truthy one wins.

pub const RESOURCE_KEYS: &[&str] = &["resource", "resource_id", "id", "name", "filter", "identifier"];
pub const AVAILABLE_KEYS: &[&str] = &["isAvailableIn", "available", "availableIn"];
pub const NOT_AVAILABLE_KEYS: &[&str] = &["isNotAvailableIn", "notAvailable", "notAvailableIn"];
pub const PLANNED_KEYS: &[&str] = &["isPlannedIn", "plannedIn"];

const UNNAMED: &str = "(resource)";

/// Availability rows, each labelled with its canonical key name.
const STATUS_ROWS: [(&str, &str, &[&str]); 3] = [
    ("isAvailableIn", "status-available", AVAILABLE_KEYS),
    ("isNotAvailableIn", "status-unavailable", NOT_AVAILABLE_KEYS),
    ("isPlannedIn", "status-planned", PLANNED_KEYS),
];

/// Regional availability of resources.
///
/// A `null` payload is an extraction failure, unlike `[]` which is a valid
/// empty answer. Non-list payloads are dumped as JSON.
pub fn render(payload: &Value) -> Result<String, DispatchError> {
    match Shape::of(payload) {
        Shape::Missing => Err(DispatchError::ExtractionFailed),
        Shape::Empty => Ok(notice(NO_RESULTS)),
        Shape::Items(items) => Ok(card_list(items.iter().map(card))),
        Shape::Unknown(value) => Ok(json_dump(value)),
    }
}

fn card(item: &Value) -> String {
    let title = text_field(item, RESOURCE_KEYS).unwrap_or_else(|| UNNAMED.to_string());

    let rows: String = STATUS_ROWS
        .iter()
        .filter_map(|(label, class, keys)| {
            let value = first_truthy(item, keys)?;
            Some(format!(
                r#"<div><span class="{class}">{label}</span>: <span class="status-value">{}</span></div>"#,
                escape_html(&value.to_string())
            ))
        })
        .collect();

    format!(
        r#"<div class="card"><div class="card-name">{}</div><div class="card-status">{}</div><div class="card-raw">{}</div></div>"#,
        escape_html(&title),
        rows,
        escape_html(&pretty_json(item)),
    )
}
