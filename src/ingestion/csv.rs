//! CSV ingestion implementation.

use std::path::Path;

use crate::error::{DashboardError, DashboardResult};
use crate::types::{DataSet, DataType, Field, Schema, Value};

/// Ingest a CSV file into an in-memory [`DataSet`].
///
/// Rules:
///
/// - CSV must have headers.
/// - With a `schema`, headers must contain all schema fields (order can differ) and each value
///   is parsed according to the field type.
/// - Without a `schema`, every header becomes a field and its type is inferred from the column.
pub fn ingest_csv_from_path(
    path: impl AsRef<Path>,
    schema: Option<&Schema>,
) -> DashboardResult<DataSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_path(path)?;
    ingest_csv_from_reader(&mut rdr, schema)
}

/// Ingest CSV data from an existing CSV reader.
pub fn ingest_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    schema: Option<&Schema>,
) -> DashboardResult<DataSet> {
    match schema {
        Some(schema) => ingest_with_schema(rdr, schema),
        None => ingest_inferred(rdr),
    }
}

fn ingest_with_schema<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    schema: &Schema,
) -> DashboardResult<DataSet> {
    let headers = rdr.headers()?.clone();

    // Map schema fields -> CSV column indexes (allows re-ordered CSV columns).
    let mut col_idxs = Vec::with_capacity(schema.fields.len());
    for field in &schema.fields {
        match headers.iter().position(|h| h == field.name) {
            Some(idx) => col_idxs.push(idx),
            None => {
                return Err(DashboardError::SchemaMismatch {
                    message: format!(
                        "missing required column '{field}'. headers={:?}",
                        headers.iter().collect::<Vec<_>>(),
                        field = field.name
                    ),
                });
            }
        }
    }

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        // 1-based, and the header occupies row 1.
        let user_row = row_idx0 + 2;
        let record = result?;

        let mut row: Vec<Value> = Vec::with_capacity(schema.fields.len());
        for (field, &csv_idx) in schema.fields.iter().zip(col_idxs.iter()) {
            let raw = record.get(csv_idx).unwrap_or("");
            row.push(parse_typed_value(user_row, &field.name, field.data_type, raw)?);
        }
        rows.push(row);
    }

    Ok(DataSet::new(schema.clone(), rows))
}

fn ingest_inferred<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> DashboardResult<DataSet> {
    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_owned).collect();

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        raw_rows.push(
            (0..headers.len())
                .map(|i| record.get(i).unwrap_or("").trim().to_owned())
                .collect(),
        );
    }

    let types: Vec<DataType> = (0..headers.len())
        .map(|col| infer_column_type(raw_rows.iter().map(|r| r[col].as_str())))
        .collect();

    let rows = raw_rows
        .into_iter()
        .map(|cells| {
            cells
                .into_iter()
                .zip(&types)
                .map(|(cell, &data_type)| inferred_value(cell, data_type))
                .collect()
        })
        .collect();

    let fields = headers
        .into_iter()
        .zip(types)
        .map(|(name, data_type)| Field::new(name, data_type))
        .collect();

    Ok(DataSet::new(Schema::new(fields), rows))
}

/// Number if every non-blank cell is a finite float, Bool if every one is `true`/`false`,
/// Text otherwise (including all-blank columns).
fn infer_column_type<'a>(cells: impl Iterator<Item = &'a str>) -> DataType {
    let mut numeric = true;
    let mut boolean = true;
    let mut any = false;
    for cell in cells.filter(|c| !c.is_empty()) {
        any = true;
        numeric &= parse_finite(cell).is_some();
        boolean &= cell.eq_ignore_ascii_case("true") || cell.eq_ignore_ascii_case("false");
        if !numeric && !boolean {
            return DataType::Text;
        }
    }
    match (any, numeric, boolean) {
        (true, true, _) => DataType::Number,
        (true, _, true) => DataType::Bool,
        _ => DataType::Text,
    }
}

fn inferred_value(cell: String, data_type: DataType) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }
    match data_type {
        DataType::Number => parse_finite(&cell).map_or(Value::Null, Value::Number),
        DataType::Bool => Value::Bool(cell.eq_ignore_ascii_case("true")),
        DataType::Text => Value::Text(cell),
    }
}

fn parse_finite(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_typed_value(
    row: usize,
    column: &str,
    data_type: DataType,
    raw: &str,
) -> DashboardResult<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }

    let parse_error = |message: String| DashboardError::ParseError {
        row,
        column: column.to_owned(),
        raw: raw.to_owned(),
        message,
    };

    match data_type {
        DataType::Text => Ok(Value::Text(trimmed.to_owned())),
        DataType::Number => trimmed
            .parse::<f64>()
            .map(Value::Number)
            .map_err(|e| parse_error(e.to_string())),
        DataType::Bool => parse_bool(trimmed).map(Value::Bool).map_err(parse_error),
    }
}

fn parse_bool(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" => Ok(true),
        "false" | "f" | "0" | "no" | "n" => Ok(false),
        _ => Err("expected bool (true/false/1/0/yes/no)".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(input: &str) -> csv::Reader<&[u8]> {
        csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(input.as_bytes())
    }

    #[test]
    fn infers_column_types() {
        let ds = ingest_csv_from_reader(
            &mut reader("month,revenue,active\nJan,100,true\nFeb,,false\nMar,1e2,TRUE\n"),
            None,
        )
        .unwrap();
        let types: Vec<DataType> = ds.schema.fields.iter().map(|f| f.data_type).collect();
        assert_eq!(types, vec![DataType::Text, DataType::Number, DataType::Bool]);
        assert_eq!(ds.rows[1][1], Value::Null);
        assert_eq!(ds.numeric_values("revenue"), vec![100.0, 100.0]);
    }

    #[test]
    fn mixed_column_stays_text() {
        let ds = ingest_csv_from_reader(&mut reader("v\n1\nn/a\n2\n"), None).unwrap();
        assert_eq!(ds.schema.fields[0].data_type, DataType::Text);
        assert_eq!(ds.text_values("v"), vec!["1", "n/a", "2"]);
    }

    #[test]
    fn non_finite_text_is_not_numeric() {
        assert_eq!(infer_column_type(["1", "inf"].into_iter()), DataType::Text);
        assert_eq!(infer_column_type(["", ""].into_iter()), DataType::Text);
    }

    #[test]
    fn schema_parse_error_reports_row_and_column() {
        let schema = Schema::new(vec![Field::new("revenue", DataType::Number)]);
        let err = ingest_csv_from_reader(&mut reader("revenue\n1\nabc\n"), Some(&schema)).unwrap_err();
        match err {
            DashboardError::ParseError { row, column, .. } => {
                assert_eq!(row, 3);
                assert_eq!(column, "revenue");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
