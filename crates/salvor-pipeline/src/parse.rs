use serde_json::Value;

use salvor_types::{CanonicalResult, FieldKind, ResultData};

use crate::{Error, Result};

/// Strict structured parse of raw content into a canonical result.
///
/// `content` must be a JSON object. Field semantics follow the tool reply
/// convention: only an explicit boolean `false` marks failure (a tool that
/// replies with plain structured data is reporting success), `message`
/// defaults to empty, and only the `data` object feeds payload
/// classification.
pub fn parse_strict(content: &str) -> Result<CanonicalResult> {
    let value: Value =
        serde_json::from_str(content).map_err(|err| Error::Parse(err.to_string()))?;
    canonicalize(&value)
}

/// Canonicalize an already-parsed JSON value.
pub fn canonicalize(value: &Value) -> Result<CanonicalResult> {
    let Some(object) = value.as_object() else {
        return Err(Error::Parse(format!(
            "expected a JSON object, found {}",
            FieldKind::of(value)
        )));
    };

    let success = !matches!(object.get("success"), Some(Value::Bool(false)));

    let message = match object.get("message") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };

    let data = match object.get("data") {
        Some(Value::Object(map)) => ResultData::from_object(map),
        _ => ResultData::new(),
    };

    Ok(CanonicalResult::new(success, message, data))
}
