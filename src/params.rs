//! Request parameters for each tool.

use serde_json::{json, Map, Number, Value};

use crate::errors::DispatchError;
use crate::tools::ToolKind;

pub const SEARCH_LIMIT: u32 = 10;
pub const MAX_TOPICS: usize = 3;
pub const DEFAULT_READ_TOP_K: i64 = 3;
pub const DEFAULT_READ_MAX_LENGTH: i64 = 6000;

/// Raw user input for a run. Fields a tool does not use are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolInput {
    pub search_phrase: String,
    pub topics: Vec<String>,
    pub read_top_k: Option<String>,
    pub read_max_length: Option<String>,
    pub url: String,
    pub max_length: Option<String>,
    pub start_index: Option<String>,
    pub region: String,
    pub resource_type: String,
    /// Comma-separated.
    pub filters: String,
    pub next_token: String,
    /// Raw JSON object for the availability tool; takes precedence over the
    /// individual fields when it parses.
    pub params_json: Option<String>,
}

/// Builds the `params` object sent to `tool`.
///
/// Only the availability tool is validated here: `region` and
/// `resource_type` must be present, otherwise nothing is sent.
pub fn build_params(tool: ToolKind, input: &ToolInput) -> Result<Value, DispatchError> {
    let mut params = Map::new();

    match tool {
        ToolKind::Search | ToolKind::Ask => {
            params.insert("search_phrase".into(), json!(input.search_phrase));
            params.insert("limit".into(), json!(SEARCH_LIMIT));
            if !input.topics.is_empty() {
                let topics: Vec<&str> = input.topics.iter().take(MAX_TOPICS).map(String::as_str).collect();
                params.insert("topics".into(), json!(topics));
            }
            if tool == ToolKind::Ask {
                params.insert(
                    "read_top_k".into(),
                    json!(parse_number(input.read_top_k.as_deref()).unwrap_or_else(|| DEFAULT_READ_TOP_K.into())),
                );
                params.insert(
                    "read_max_length".into(),
                    json!(parse_number(input.read_max_length.as_deref())
                        .unwrap_or_else(|| DEFAULT_READ_MAX_LENGTH.into())),
                );
            }
        }
        ToolKind::Read | ToolKind::Recommend => {
            params.insert("url".into(), json!(input.url));
            if tool == ToolKind::Read {
                if let Some(n) = parse_number(input.max_length.as_deref()) {
                    params.insert("max_length".into(), json!(n));
                }
                if let Some(n) = parse_number(input.start_index.as_deref()) {
                    params.insert("start_index".into(), json!(n));
                }
            }
        }
        ToolKind::ListRegions => {}
        ToolKind::RegionalAvailability => {
            params = availability_params(input);
            let missing = missing_availability_fields(&params);
            if !missing.is_empty() {
                return Err(DispatchError::MissingParams(missing));
            }
        }
    }

    Ok(Value::Object(params))
}

/// Request body for a tool call.
pub fn request_body(params: Value) -> Value {
    json!({ "params": params })
}

fn availability_params(input: &ToolInput) -> Map<String, Value> {
    if let Some(raw) = input.params_json.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(object)) => return object,
            Ok(_) => tracing::warn!("availability params must be a JSON object, using individual fields"),
            Err(err) => tracing::warn!(%err, "availability params are not valid JSON, using individual fields"),
        }
    }

    let mut params = Map::new();
    let region = input.region.trim();
    let resource_type = input.resource_type.trim();
    let next_token = input.next_token.trim();
    let filters = split_comma_list(&input.filters);

    if !region.is_empty() {
        params.insert("region".into(), json!(region));
    }
    if !resource_type.is_empty() {
        params.insert("resource_type".into(), json!(resource_type));
    }
    if !filters.is_empty() {
        params.insert("filters".into(), json!(filters));
    }
    if !next_token.is_empty() {
        params.insert("next_token".into(), json!(next_token));
    }
    params
}

fn missing_availability_fields(params: &Map<String, Value>) -> Vec<String> {
    ["region", "resource_type"]
        .into_iter()
        .filter(|key| !params.get(*key).is_some_and(crate::envelope::is_truthy))
        .map(String::from)
        .collect()
}

pub fn split_comma_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Any finite decimal number; whole values are sent as integers.
fn parse_number(text: Option<&str>) -> Option<Number> {
    let n: f64 = text.map(str::trim).filter(|s| !s.is_empty())?.parse().ok()?;
    if !n.is_finite() {
        return None;
    }
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Some(Number::from(n as i64))
    } else {
        Number::from_f64(n)
    }
}
