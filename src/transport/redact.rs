//! Redaction of secrets before request/response data reaches the logs.
//!
//! Keys are matched case-insensitively against [`SENSITIVE_KEYS`]. Matching
//! values are replaced with [`REDACTED`] at any depth of a JSON document,
//! inside URL-encoded form bodies, and inside JSON documents nested in form
//! fields.

use std::collections::BTreeMap;

use serde_json::Value;

/// Marker written in place of a sensitive value.
pub const REDACTED: &str = "[REDACTED]";

/// Keys whose values never leave the process through diagnostics.
pub static SENSITIVE_KEYS: &[&str] = &[
    "authorization",
    "secret",
    "secret_key",
    "secretkey",
    "token",
    "api_key",
    "apikey",
    "password",
    "client_secret",
    "access_token",
    "refresh_token",
];

/// Returns true if `key` names a sensitive value.
#[must_use]
pub fn is_sensitive_key(key: &str) -> bool {
    SENSITIVE_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

/// Returns a copy of `value` with every sensitive key's value redacted.
#[must_use]
pub fn redact_json(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, nested)| {
                    let redacted = if is_sensitive_key(key) {
                        Value::String(REDACTED.to_string())
                    } else {
                        redact_json(nested)
                    };
                    (key.clone(), redacted)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact_json).collect()),
        other => other.clone(),
    }
}

/// Redacts an `application/x-www-form-urlencoded` body.
///
/// Fields with sensitive names are replaced outright. Fields whose value is
/// itself a JSON object or array (such as a refund's `meta`) are redacted
/// recursively and re-serialized.
#[must_use]
pub fn redact_form(body: &str) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in url::form_urlencoded::parse(body.as_bytes()) {
        if is_sensitive_key(&key) {
            serializer.append_pair(&key, REDACTED);
            continue;
        }
        match serde_json::from_str::<Value>(&value) {
            Ok(nested @ (Value::Object(_) | Value::Array(_))) => {
                serializer.append_pair(&key, &redact_json(&nested).to_string());
            }
            _ => {
                serializer.append_pair(&key, &value);
            }
        }
    }
    serializer.finish()
}

/// Renders a header map for logging, redacting sensitive header names.
///
/// Non-UTF-8 header values are shown as `<binary>`.
#[must_use]
pub fn redact_headers(headers: &http::HeaderMap) -> BTreeMap<String, String> {
    headers
        .iter()
        .map(|(name, value)| {
            let shown = if is_sensitive_key(name.as_str()) {
                REDACTED.to_string()
            } else {
                value.to_str().unwrap_or("<binary>").to_string()
            };
            (name.as_str().to_string(), shown)
        })
        .collect()
}

/// Renders a raw body for logging according to its content type.
///
/// JSON and form bodies are redacted; anything else is summarized by length
/// so unknown formats never leak.
#[must_use]
pub fn redact_body(content_type: Option<&str>, body: &[u8]) -> String {
    if body.is_empty() {
        return String::new();
    }
    let is_form = content_type.is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));
    if is_form {
        if let Ok(text) = std::str::from_utf8(body) {
            return redact_form(text);
        }
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(json) => redact_json(&json).to_string(),
        Err(_) => format!("<{} bytes>", body.len()),
    }
}
