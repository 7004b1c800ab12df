//! Schema coercion: convert an untyped [`Value`] into one consistent with a
//! [`TypeSchema`], applying safe implicit conversions.
//!
//! Failure semantics are strict and local: the first node whose runtime
//! shape cannot be converted produces a [`CoercionError`] carrying the
//! expected schema kind and the actual runtime kind. Nothing is retried —
//! union resolution is the only multi-attempt construct, and its member
//! order is the caller's deliberate tie-break.

use crate::error::CoercionError;
use crate::schema::TypeSchema;
use crate::value::Value;

/// Coerce `value` to fit `schema`.
///
/// # Errors
///
/// Returns [`CoercionError`] from the first node where the value's runtime
/// shape does not match the requested schema.
pub fn coerce(value: &Value, schema: &TypeSchema) -> Result<Value, CoercionError> {
    match schema {
        TypeSchema::String => coerce_string(value),
        TypeSchema::Int => coerce_int(value),
        TypeSchema::Float => coerce_float(value),
        TypeSchema::Bool => coerce_bool(value),
        TypeSchema::Null => match value {
            Value::Null => Ok(Value::Null),
            other => Err(CoercionError::new("null", other.kind_label())),
        },
        TypeSchema::LiteralString(expected) => match coerce_string(value)? {
            Value::String(text) if text == *expected => Ok(Value::String(text)),
            other => Err(CoercionError::new(
                format!("literal \"{expected}\""),
                describe(&other),
            )),
        },
        TypeSchema::LiteralInt(expected) => match coerce_int(value)? {
            Value::Int(int) if int == *expected => Ok(Value::Int(int)),
            other => Err(CoercionError::new(
                format!("literal {expected}"),
                describe(&other),
            )),
        },
        TypeSchema::LiteralBool(expected) => match coerce_bool(value)? {
            Value::Bool(flag) if flag == *expected => Ok(Value::Bool(flag)),
            other => Err(CoercionError::new(
                format!("literal {expected}"),
                describe(&other),
            )),
        },
        TypeSchema::Optional(inner) => match value {
            Value::Null => Ok(Value::Null),
            other => coerce(other, inner),
        },
        TypeSchema::List(element) => match value {
            Value::Array(items) => {
                // All-or-nothing: the first failing element fails the list.
                let coerced = items
                    .iter()
                    .map(|item| coerce(item, element))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::Array(coerced))
            }
            other => Err(CoercionError::new("list", other.kind_label())),
        },
        TypeSchema::Map(_key, value_schema) => match value {
            Value::Map(entries) => {
                // JSON object keys are always strings; the key schema is
                // accepted but not separately validated.
                let coerced = entries
                    .iter()
                    .map(|(key, entry)| Ok((key.clone(), coerce(entry, value_schema)?)))
                    .collect::<Result<Vec<_>, CoercionError>>()?;
                Ok(Value::Map(coerced))
            }
            other => Err(CoercionError::new("map", other.kind_label())),
        },
        TypeSchema::Union(members) => {
            for member in members {
                if let Ok(coerced) = coerce(value, member) {
                    return Ok(coerced);
                }
            }
            Err(CoercionError::new("union", value.kind_label()))
        }
        TypeSchema::Reference(_) => Ok(value.clone()),
    }
}

fn coerce_string(value: &Value) -> Result<Value, CoercionError> {
    match value {
        Value::String(text) => Ok(Value::String(text.clone())),
        Value::Int(int) => Ok(Value::String(int.to_string())),
        Value::Float(float) => Ok(Value::String(float.to_string())),
        Value::Bool(flag) => Ok(Value::String(flag.to_string())),
        other => Err(CoercionError::new("string", other.kind_label())),
    }
}

fn coerce_int(value: &Value) -> Result<Value, CoercionError> {
    match value {
        Value::Int(int) => Ok(Value::Int(*int)),
        Value::Float(float) => float_to_int(*float)
            .map(Value::Int)
            .ok_or_else(|| CoercionError::new("int", "float with decimal")),
        Value::String(text) => {
            let trimmed = text.trim();
            if let Ok(int) = trimmed.parse::<i64>() {
                return Ok(Value::Int(int));
            }
            trimmed
                .parse::<f64>()
                .ok()
                .and_then(float_to_int)
                .map(Value::Int)
                .ok_or_else(|| CoercionError::new("int", "string"))
        }
        Value::Bool(flag) => Ok(Value::Int(i64::from(*flag))),
        other => Err(CoercionError::new("int", other.kind_label())),
    }
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn float_to_int(float: f64) -> Option<i64> {
    if float.is_finite()
        && float.fract() == 0.0
        && float >= i64::MIN as f64
        && float <= i64::MAX as f64
    {
        Some(float as i64)
    } else {
        None
    }
}

#[allow(clippy::cast_precision_loss)]
fn coerce_float(value: &Value) -> Result<Value, CoercionError> {
    match value {
        Value::Float(float) => Ok(Value::Float(*float)),
        Value::Int(int) => Ok(Value::Float(*int as f64)),
        Value::String(text) => text
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| CoercionError::new("float", "string")),
        other => Err(CoercionError::new("float", other.kind_label())),
    }
}

fn coerce_bool(value: &Value) -> Result<Value, CoercionError> {
    match value {
        Value::Bool(flag) => Ok(Value::Bool(*flag)),
        Value::Int(int) => Ok(Value::Bool(*int != 0)),
        Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(Value::Bool(true)),
            "false" | "0" | "no" => Ok(Value::Bool(false)),
            _ => Err(CoercionError::new("bool", "string")),
        },
        other => Err(CoercionError::new("bool", other.kind_label())),
    }
}

/// Describe a coerced value for literal-mismatch diagnostics.
fn describe(value: &Value) -> String {
    match value {
        Value::String(text) => format!("string \"{text}\""),
        Value::Int(int) => format!("int {int}"),
        Value::Bool(flag) => format!("bool {flag}"),
        other => other.kind_label().to_string(),
    }
}

#[cfg(test)]
#[path = "coerce_tests.rs"]
mod tests;
