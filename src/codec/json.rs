use super::config::CodecConfig;
use crate::collection::Entry;
use crate::core::Result;
use serde_json::Value as JsonValue;

/// Renders entries as `[[key, value], ...]`.
pub(crate) fn entries_to_json(entries: &[Entry], config: &CodecConfig) -> Result<String> {
    let rows = JsonValue::Array(
        entries
            .iter()
            .map(|entry| JsonValue::Array(vec![entry.key.to_json(), entry.value.to_json()]))
            .collect(),
    );

    let rendered = if config.pretty_json {
        serde_json::to_string_pretty(&rows)?
    } else {
        serde_json::to_string(&rows)?
    };
    Ok(rendered)
}
