//! Schema-driven validation of operation options.

use serde_json::{Map, Value};

use crate::operation::Operation;

use super::ValidationError;
use super::rules::{Field, MOBILE_MESSAGE, Rule, is_email, is_mobile, is_url};
use super::schema::schema;

/// Validates `options` against the schema of `operation`.
///
/// Stops at the first violation, in schema declaration order. On success
/// returns a normalized copy: numbers given for text fields become strings,
/// every other value (including undeclared keys) is kept as is.
///
/// # Errors
///
/// Returns [`ValidationError`] describing the first violated constraint.
///
/// # Example
///
/// ```
/// use chapa::operation::Operation;
/// use chapa::validation::validate;
/// use serde_json::json;
///
/// let err = validate(Operation::Initialize, &json!({"amount": "100"})).unwrap_err();
/// assert_eq!(err.message(), "currency is a required field");
/// ```
pub fn validate(operation: Operation, options: &Value) -> Result<Value, ValidationError> {
    let fields = schema(operation);
    match options {
        Value::Object(map) => validate_object(map, fields, "").map(Value::Object),
        // Listing operations accept a missing options object
        Value::Null if fields.is_empty() => Ok(Value::Object(Map::new())),
        _ => Err(ValidationError::new("", "options must be a `object` type")),
    }
}

fn validate_object(
    map: &Map<String, Value>,
    fields: &[Field],
    prefix: &str,
) -> Result<Map<String, Value>, ValidationError> {
    let mut normalized = map.clone();

    for field in fields {
        let path = join(prefix, field.name);
        match map.get(field.name) {
            None | Some(Value::Null) => {
                if field.required {
                    return Err(required(&path));
                }
            }
            Some(value) => {
                if field.required && is_blank(value) {
                    return Err(required(&path));
                }
                let checked = check(value, field.rule, &path)?;
                normalized.insert(field.name.to_string(), checked);
            }
        }
    }

    Ok(normalized)
}

fn check(value: &Value, rule: Rule, path: &str) -> Result<Value, ValidationError> {
    match rule {
        Rule::Text => text(value, path).map(Value::String),
        Rule::Email => {
            let s = text(value, path)?;
            if s.is_empty() || is_email(&s) {
                Ok(Value::String(s))
            } else {
                Err(ValidationError::new(path, format!("{path} must be a valid email")))
            }
        }
        Rule::Url => {
            let s = text(value, path)?;
            if s.is_empty() || is_url(&s) {
                Ok(Value::String(s))
            } else {
                Err(ValidationError::new(path, format!("{path} must be a valid URL")))
            }
        }
        Rule::Mobile => {
            let s = text(value, path)?;
            if is_mobile(&s) {
                Ok(Value::String(s))
            } else {
                Err(ValidationError::new(path, MOBILE_MESSAGE))
            }
        }
        Rule::Number => match value {
            Value::Number(_) => Ok(value.clone()),
            _ => Err(type_error(path, "number")),
        },
        Rule::OneOf(allowed) => {
            let s = text(value, path)?;
            if allowed.contains(&s.as_str()) {
                Ok(Value::String(s))
            } else {
                Err(ValidationError::new(
                    path,
                    format!(
                        "{path} must be one of the following values: {}",
                        allowed.join(", ")
                    ),
                ))
            }
        }
        Rule::Object(fields) => match value {
            Value::Object(map) => validate_object(map, fields, path).map(Value::Object),
            _ => Err(type_error(path, "object")),
        },
        Rule::List { item, min } => {
            let Value::Array(items) = value else {
                return Err(type_error(path, "array"));
            };
            if items.len() < min {
                return Err(ValidationError::new(
                    path,
                    format!("{path} field must have at least {min} items"),
                ));
            }
            items
                .iter()
                .enumerate()
                .map(|(index, element)| {
                    let element_path = format!("{path}[{index}]");
                    match element {
                        Value::Object(map) => {
                            validate_object(map, item, &element_path).map(Value::Object)
                        }
                        _ => Err(type_error(&element_path, "object")),
                    }
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array)
        }
        Rule::Any => Ok(value.clone()),
    }
}

/// Reads a text value, converting numbers to their string form.
fn text(value: &Value, path: &str) -> Result<String, ValidationError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(type_error(path, "string")),
    }
}

const fn is_blank(value: &Value) -> bool {
    matches!(value, Value::String(s) if s.is_empty())
}

fn required(path: &str) -> ValidationError {
    ValidationError::new(path, format!("{path} is a required field"))
}

fn type_error(path: &str, expected: &str) -> ValidationError {
    ValidationError::new(path, format!("{path} must be a `{expected}` type"))
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}
