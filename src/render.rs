//! Fully-expanded rendering of analysis payloads.

use serde_json::Value;

/// Render `value` as fully-expanded, human-readable text.
///
/// Every nesting level is emitted (no depth truncation), object keys appear
/// in sorted order, and the output is byte-identical for identical values.
pub fn expanded(value: &Value) -> String {
    // Serializing a Value cannot fail: all map keys are strings.
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
