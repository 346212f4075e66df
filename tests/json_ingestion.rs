use dashboard_analytics::ingestion::json::{ingest_json_from_path, ingest_json_from_str};
use dashboard_analytics::types::{DataType, Field, Schema, Value};

#[test]
fn ingest_json_array_from_path_flattens_nested_objects() {
    let ds = ingest_json_from_path("tests/fixtures/sales.json", None).unwrap();

    assert_eq!(ds.row_count(), 4);
    let names: Vec<&str> = ds.schema.field_names().collect();
    assert_eq!(
        names,
        vec!["metrics.revenue", "metrics.units", "month", "note", "region"]
    );
    assert_eq!(ds.numeric_values("metrics.revenue"), vec![250.0, 200.0, 300.0, 240.0]);
    // Explicit null and absent key both become Null.
    assert_eq!(ds.rows[3][1], Value::Null);
    assert_eq!(ds.rows[0][3], Value::Null);
    assert_eq!(ds.text_values("note"), vec!["late"]);
}

#[test]
fn ingest_ndjson_skips_blank_lines() {
    let ds = ingest_json_from_path("tests/fixtures/traffic.ndjson", None).unwrap();
    assert_eq!(ds.row_count(), 6);
    let visitors_idx = ds.schema.index_of("visitors").unwrap();
    assert_eq!(ds.schema.fields[visitors_idx].data_type, DataType::Number);
}

#[test]
fn ingest_json_with_schema_uses_dot_paths() {
    let schema = Schema::new(vec![
        Field::new("region", DataType::Text),
        Field::new("metrics.units", DataType::Number),
    ]);
    let ds = ingest_json_from_path("tests/fixtures/sales.json", Some(&schema)).unwrap();
    assert_eq!(ds.rows[0], vec![Value::Text("North".into()), Value::Number(10.0)]);
    assert_eq!(ds.rows[3][1], Value::Null);
}

#[test]
fn ingest_json_with_schema_errors_on_missing_field() {
    let schema = Schema::new(vec![Field::new("note", DataType::Text)]);
    let err = ingest_json_from_path("tests/fixtures/sales.json", Some(&schema)).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("row 1 missing required field 'note'"));
}

#[test]
fn ingest_json_single_object() {
    let ds = ingest_json_from_str(r#"{"a": 1, "b": "x"}"#, None).unwrap();
    assert_eq!(ds.row_count(), 1);
    assert_eq!(ds.rows[0], vec![Value::Number(1.0), Value::Text("x".into())]);
}

#[test]
fn ingest_json_rejects_non_object_rows() {
    let err = ingest_json_from_str("[1, 2]", None).unwrap_err();
    assert!(err.to_string().contains("row 1 is not a json object"));
}

#[test]
fn ingest_invalid_ndjson_reports_line() {
    let err = ingest_json_from_str("{\"a\":1}\n{oops}\n", None).unwrap_err();
    assert!(err.to_string().contains("invalid ndjson at line 2"));
}
