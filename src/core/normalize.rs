use crate::domain::model::{Part, RawRecord, Specifications};
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormalizeError {
    #[error("missing required field '{field}'")]
    MissingField { field: String },

    #[error("field '{field}' is empty")]
    EmptyField { field: String },

    #[error("field '{field}' is not numeric: '{value}'")]
    NotNumeric { field: String, value: String },

    #[error("field '{field}' must be non-negative, got {value}")]
    Negative { field: String, value: String },
}

type NormalizeResult<T> = std::result::Result<T, NormalizeError>;

/// Validates a raw record against the catalog invariants and produces the
/// canonical `Part`. Pure: no I/O, no shared state. Field values may arrive
/// as JSON numbers (JSON feed) or as strings (XML text content).
pub fn normalize(raw: &RawRecord) -> NormalizeResult<Part> {
    let name = required_text(&raw.data, "name")?;
    let part_type = required_text(&raw.data, "type")?;
    let manufacturer = required_text(&raw.data, "manufacturer")?;
    let price = required_number(&raw.data, "price")?;

    let id = optional_text(&raw.data, "id");
    let stock = optional_count(&raw.data, "stock")?;
    let quantity = optional_count(&raw.data, "quantity")?;
    let specifications = normalize_specifications(&raw.data)?;

    Ok(Part {
        id,
        name,
        part_type,
        price,
        manufacturer,
        stock,
        quantity,
        specifications,
    })
}

/// Normalizes every record, skipping defective ones with a diagnostic.
/// A single malformed record never aborts the rest of the document.
pub fn normalize_all(raws: Vec<RawRecord>) -> (Vec<Part>, usize) {
    let mut parts = Vec::with_capacity(raws.len());
    let mut skipped = 0;

    for (index, raw) in raws.iter().enumerate() {
        match normalize(raw) {
            Ok(part) => parts.push(part),
            Err(e) => {
                tracing::warn!("Skipping defective record #{}: {}", index, e);
                skipped += 1;
            }
        }
    }

    (parts, skipped)
}

fn normalize_specifications(
    data: &serde_json::Map<String, Value>,
) -> NormalizeResult<Option<Specifications>> {
    let Some(Value::Object(spec)) = data.get("specifications") else {
        return Ok(None);
    };

    let cores = optional_count(spec, "cores").map_err(|e| prefix_spec(e))?;
    let clock_speed = optional_text(spec, "clockSpeed");

    if cores.is_none() && clock_speed.is_none() {
        return Ok(None);
    }

    Ok(Some(Specifications { cores, clock_speed }))
}

fn prefix_spec(e: NormalizeError) -> NormalizeError {
    match e {
        NormalizeError::NotNumeric { field, value } => NormalizeError::NotNumeric {
            field: format!("specifications.{}", field),
            value,
        },
        NormalizeError::Negative { field, value } => NormalizeError::Negative {
            field: format!("specifications.{}", field),
            value,
        },
        other => other,
    }
}

fn required_text(data: &serde_json::Map<String, Value>, field: &str) -> NormalizeResult<String> {
    match data.get(field) {
        None | Some(Value::Null) => Err(NormalizeError::MissingField {
            field: field.to_string(),
        }),
        Some(value) => {
            let text = text_of(value);
            if text.trim().is_empty() {
                Err(NormalizeError::EmptyField {
                    field: field.to_string(),
                })
            } else {
                Ok(text)
            }
        }
    }
}

fn optional_text(data: &serde_json::Map<String, Value>, field: &str) -> Option<String> {
    match data.get(field) {
        None | Some(Value::Null) => None,
        Some(value) => {
            let text = text_of(value);
            if text.trim().is_empty() {
                None
            } else {
                Some(text)
            }
        }
    }
}

fn required_number(data: &serde_json::Map<String, Value>, field: &str) -> NormalizeResult<f64> {
    let value = data
        .get(field)
        .filter(|v| !v.is_null())
        .ok_or_else(|| NormalizeError::MissingField {
            field: field.to_string(),
        })?;

    let number = coerce_f64(value).ok_or_else(|| NormalizeError::NotNumeric {
        field: field.to_string(),
        value: text_of(value),
    })?;

    if number < 0.0 {
        return Err(NormalizeError::Negative {
            field: field.to_string(),
            value: text_of(value),
        });
    }

    Ok(number)
}

fn optional_count(
    data: &serde_json::Map<String, Value>,
    field: &str,
) -> NormalizeResult<Option<u32>> {
    let Some(value) = data.get(field).filter(|v| !v.is_null()) else {
        return Ok(None);
    };

    let number = coerce_i64(value).ok_or_else(|| NormalizeError::NotNumeric {
        field: field.to_string(),
        value: text_of(value),
    })?;

    let count = u32::try_from(number).map_err(|_| NormalizeError::Negative {
        field: field.to_string(),
        value: number.to_string(),
    })?;

    Ok(Some(count))
}

fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
