use serde_json::Value;

use crate::error::{ReleaseNotesError, Result};

const TRUE_LITERALS: [&str; 3] = ["true", "t", "1"];
const FALSE_LITERALS: [&str; 3] = ["false", "f", "0"];

/// Coerce a loosely typed flag (as found in invocation events) into a bool.
///
/// Booleans pass through unchanged. Strings are matched case-insensitively
/// against `true`/`t`/`1` and `false`/`f`/`0`. Anything else is rejected.
pub fn to_boolean(value: &Value) -> Result<bool> {
    match value {
        Value::Bool(flag) => Ok(*flag),
        Value::String(text) => parse_flag(text),
        other => Err(ReleaseNotesError::InvalidBooleanLiteral(other.to_string())),
    }
}

/// String form of [`to_boolean`]
pub fn parse_flag(text: &str) -> Result<bool> {
    let lowered = text.to_lowercase();
    if TRUE_LITERALS.contains(&lowered.as_str()) {
        Ok(true)
    } else if FALSE_LITERALS.contains(&lowered.as_str()) {
        Ok(false)
    } else {
        Err(ReleaseNotesError::InvalidBooleanLiteral(text.to_string()))
    }
}
