use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use dashboard_analytics::ingestion::{
    ingest_from_path, IngestionFormat, IngestionOptions, IngestionRequest,
};
use dashboard_analytics::types::{DataType, Field, Schema, Value};

fn tmp_file(ext: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("dashboard-analytics-unified-{nanos}.{ext}"))
}

#[test]
fn unified_csv_by_extension() {
    let ds = ingest_from_path("tests/fixtures/sales.csv", &IngestionOptions::default()).unwrap();
    assert_eq!(ds.row_count(), 7);
}

#[test]
fn unified_json_and_ndjson_by_extension() {
    let json = ingest_from_path("tests/fixtures/sales.json", &IngestionOptions::default()).unwrap();
    assert_eq!(json.row_count(), 4);

    let ndjson =
        ingest_from_path("tests/fixtures/traffic.ndjson", &IngestionOptions::default()).unwrap();
    assert_eq!(ndjson.row_count(), 6);
}

#[test]
fn unified_format_override_without_extension() {
    let path = tmp_file("data");
    std::fs::write(&path, "region,revenue\nNorth,1.5\n").unwrap();

    let opts = IngestionOptions {
        format: Some(IngestionFormat::Csv),
        ..Default::default()
    };
    let ds = ingest_from_path(&path, &opts).unwrap();
    assert_eq!(ds.rows[0], vec![Value::Text("North".into()), Value::Number(1.5)]);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn unified_with_explicit_schema() {
    let opts = IngestionOptions {
        schema: Some(Schema::new(vec![Field::new("units", DataType::Text)])),
        ..Default::default()
    };
    let ds = ingest_from_path("tests/fixtures/sales.csv", &opts).unwrap();
    assert_eq!(ds.text_values("units")[0], "10");
}

#[test]
fn unified_errors_without_extension() {
    let err = ingest_from_path("tests/fixtures/no_extension", &IngestionOptions::default())
        .unwrap_err();
    assert!(err.to_string().contains("cannot infer format"));
}

#[test]
fn request_runs_with_defaults() {
    let ds = IngestionRequest::new("tests/fixtures/sales.csv").run().unwrap();
    assert_eq!(ds.schema.len(), 5);
}
