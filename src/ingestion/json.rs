//! JSON ingestion implementation.
//!
//! Supported inputs:
//! - A JSON array of objects: `[{"a":1}, {"a":2}]`
//! - A single object: `{"a":1}`
//! - Newline-delimited JSON (NDJSON): `{"a":1}\n{"a":2}\n`
//!
//! Without a schema, nested objects are flattened into dot-path fields (`user.name`) and the
//! schema is the union of keys across all rows. With a schema, fields are looked up by the same
//! dot paths and every row must contain every field.

use std::fs;
use std::path::Path;

use serde_json::Map;

use crate::error::{DashboardError, DashboardResult};
use crate::types::{DataSet, DataType, Record, Schema, Value};

/// Ingest JSON into an in-memory `DataSet`.
pub fn ingest_json_from_path(
    path: impl AsRef<Path>,
    schema: Option<&Schema>,
) -> DashboardResult<DataSet> {
    let text = fs::read_to_string(path)?;
    ingest_json_from_str(&text, schema)
}

/// Ingest JSON from an in-memory string into a [`DataSet`].
pub fn ingest_json_from_str(input: &str, schema: Option<&Schema>) -> DashboardResult<DataSet> {
    let values = parse_documents(input)?;
    match schema {
        Some(schema) => ingest_with_schema(&values, schema),
        None => {
            let records = values
                .iter()
                .enumerate()
                .map(|(idx0, v)| {
                    let obj = as_row_object(idx0 + 1, v)?;
                    let mut record = Record::new();
                    flatten_into(&mut record, "", obj);
                    Ok(record)
                })
                .collect::<DashboardResult<Vec<Record>>>()?;
            Ok(DataSet::from_records(&records))
        }
    }
}

fn parse_documents(input: &str) -> DashboardResult<Vec<serde_json::Value>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DashboardError::SchemaMismatch {
            message: "json input is empty".to_string(),
        });
    }

    // A single JSON value first, NDJSON otherwise.
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(trimmed) {
        return match v {
            serde_json::Value::Array(items) => Ok(items),
            serde_json::Value::Object(_) => Ok(vec![v]),
            _ => Err(DashboardError::SchemaMismatch {
                message: "json must be an object, an array of objects, or NDJSON".to_string(),
            }),
        };
    }

    let mut values = Vec::new();
    for (i, line) in trimmed.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let v = serde_json::from_str::<serde_json::Value>(line).map_err(|e| {
            DashboardError::SchemaMismatch {
                message: format!("invalid ndjson at line {}: {}", i + 1, e),
            }
        })?;
        values.push(v);
    }
    Ok(values)
}

fn as_row_object(row_num: usize, v: &serde_json::Value) -> DashboardResult<&Map<String, serde_json::Value>> {
    v.as_object().ok_or_else(|| DashboardError::SchemaMismatch {
        message: format!("row {row_num} is not a json object"),
    })
}

fn flatten_into(record: &mut Record, prefix: &str, obj: &Map<String, serde_json::Value>) {
    for (key, v) in obj {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match v {
            serde_json::Value::Object(nested) => flatten_into(record, &path, nested),
            other => {
                record.insert(path, scalar_value(other));
            }
        }
    }
}

/// Arrays are kept as their JSON text.
fn scalar_value(v: &serde_json::Value) -> Value {
    match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
        serde_json::Value::String(s) => Value::Text(s.clone()),
        other => Value::Text(other.to_string()),
    }
}

fn ingest_with_schema(values: &[serde_json::Value], schema: &Schema) -> DashboardResult<DataSet> {
    let mut rows: Vec<Vec<Value>> = Vec::with_capacity(values.len());

    for (idx0, v) in values.iter().enumerate() {
        let row_num = idx0 + 1;
        let obj = as_row_object(row_num, v)?;

        let mut row: Vec<Value> = Vec::with_capacity(schema.fields.len());
        for field in &schema.fields {
            let jv = get_by_dot_path(obj, &field.name).ok_or_else(|| DashboardError::SchemaMismatch {
                message: format!("row {row_num} missing required field '{}'", field.name),
            })?;
            row.push(convert_json_value(row_num, &field.name, field.data_type, jv)?);
        }
        rows.push(row);
    }

    Ok(DataSet::new(schema.clone(), rows))
}

fn get_by_dot_path<'a>(
    root: &'a Map<String, serde_json::Value>,
    path: &str,
) -> Option<&'a serde_json::Value> {
    let mut segments = path.split('.');
    let mut current = root.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

fn convert_json_value(
    row: usize,
    column: &str,
    data_type: DataType,
    v: &serde_json::Value,
) -> DashboardResult<Value> {
    if v.is_null() {
        return Ok(Value::Null);
    }

    let converted = match data_type {
        DataType::Text => v.as_str().map(|s| Value::Text(s.to_string())),
        DataType::Bool => v.as_bool().map(Value::Bool),
        DataType::Number => v.as_f64().map(Value::Number),
    };
    converted.ok_or_else(|| DashboardError::ParseError {
        row,
        column: column.to_string(),
        raw: v.to_string(),
        message: match data_type {
            DataType::Text => "expected string",
            DataType::Bool => "expected bool",
            DataType::Number => "expected number",
        }
        .to_string(),
    })
}
