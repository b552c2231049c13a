//! Repair strategies for the JSON the synthesis service sends back.
//!
//! The service is told to answer with strict JSON and regularly does not:
//! markdown fences, trailing commas, and a wrapper object around the real
//! payload are the recurring failure shapes. Everything here is a cheap
//! deterministic fix applied before giving up on a response.

use serde_json::Value;
use tracing::warn;

use crate::error::{SynthError, SynthResult};

/// Parse a response into a JSON object, trying repair strategies in order.
///
/// 1. Direct `serde_json` parse
/// 2. Extract the payload from a markdown code fence
/// 3. Strip trailing commas and retry
/// 4. Fence extraction and comma stripping combined
///
/// A parse that succeeds but yields a non-object still counts as a failure;
/// every payload in the protocol is an object. A single-key wrapper around
/// an object (`{"world": {...}}`) is unwrapped transparently.
pub fn parse_object(raw: &str) -> SynthResult<Value> {
    let trimmed = raw.trim();
    let mut reason = String::from("empty response");

    let attempts = [
        trimmed.to_string(),
        strip_code_fences(trimmed).to_string(),
        strip_trailing_commas(trimmed),
        strip_trailing_commas(strip_code_fences(trimmed)),
    ];
    for attempt in &attempts {
        match serde_json::from_str::<Value>(attempt) {
            Ok(value) => {
                let value = unwrap_single_key(value);
                if value.is_object() {
                    return Ok(value);
                }
                reason = "top-level JSON value is not an object".to_string();
            }
            Err(err) => reason = err.to_string(),
        }
    }

    warn!(
        reason = %reason,
        raw_response = raw,
        "all repair strategies failed for synthesis response"
    );
    Err(SynthError::Parse {
        reason,
        raw: raw.to_string(),
    })
}

/// Extract the body of the first markdown code fence, tolerating a `json`
/// language tag and prose around the fence. Returns the input unchanged when
/// there is no fence.
pub fn strip_code_fences(text: &str) -> &str {
    let Some(start) = text.find("```") else {
        return text;
    };
    let after = &text[start + 3..];
    let after = after.strip_prefix("json").unwrap_or(after);
    let body = match after.find("```") {
        Some(end) => &after[..end],
        None => after,
    };
    body.trim()
}

/// Remove commas that sit directly before a closing brace or bracket,
/// leaving commas inside string literals alone.
pub fn strip_trailing_commas(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            result.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                result.push(c);
            }
            ',' => {
                let mut whitespace = String::new();
                while let Some(&next) = chars.peek() {
                    if next.is_whitespace() {
                        whitespace.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if !matches!(chars.peek(), Some('}') | Some(']')) {
                    result.push(c);
                }
                result.push_str(&whitespace);
            }
            _ => result.push(c),
        }
    }
    result
}

/// Unwrap `{"anything": {...}}` to the inner object. The service sometimes
/// wraps the payload it was asked for in a single labelled key.
pub fn unwrap_single_key(value: Value) -> Value {
    if let Value::Object(map) = &value
        && map.len() == 1
        && let Some(inner) = map.values().next()
        && inner.is_object()
    {
        return inner.clone();
    }
    value
}
