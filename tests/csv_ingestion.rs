use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use eda_report::ingestion::csv::{ingest_csv_from_path, ingest_csv_from_reader, ingest_csv_from_str, CsvOptions};
use eda_report::ingestion::{ingest_from_path, IngestionOptions};
use eda_report::types::Value;
use eda_report::EdaError;

fn tmp_file(ext: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("eda-report-ingest-{nanos}.{ext}"))
}

#[test]
fn ingest_csv_from_path_infers_column_types() {
    let table = ingest_csv_from_path("tests/fixtures/users.csv", &CsvOptions::default()).unwrap();

    assert_eq!(table.row_count(), 12);
    assert_eq!(table.column_count(), 8);

    let age = table.column("age").unwrap();
    assert_eq!(age.values[0], Value::Int64(25));
    assert_eq!(age.values[2], Value::Null);
    assert_eq!(age.values[4], Value::Null);

    assert_eq!(table.column("revenue").unwrap().values[0], Value::Float64(100.5));
    // "yes"/"no" mixed with true/false keeps the column as text
    assert_eq!(table.column("is_active").unwrap().values[3], Value::Utf8("yes".to_string()));
    assert_eq!(table.column("country").unwrap().values[7], Value::Null);
    assert_eq!(
        table.column("signup_date").unwrap().values[0],
        Value::Utf8("2024-01-05".to_string())
    );
}

#[test]
fn ingest_csv_keeps_text_when_inference_is_off() {
    let options = CsvOptions {
        infer_types: false,
        ..Default::default()
    };
    let table = ingest_csv_from_str("id,flag\n1,yes\n,no\n", &options).unwrap();
    let id = table.column("id").unwrap();
    assert_eq!(id.values, vec![Value::Utf8("1".to_string()), Value::Null]);
}

#[test]
fn ingest_csv_keeps_letter_codes_and_dashes_as_text() {
    let input = "answer,grade,done\nY,A,true\nN,-,FALSE\nY,B,true\nY,-,\n";
    let table = ingest_csv_from_str(input, &CsvOptions::default()).unwrap();

    let answer = table.column("answer").unwrap();
    assert_eq!(answer.values[0], Value::Utf8("Y".to_string()));
    let grade = table.column("grade").unwrap();
    assert_eq!(grade.missing_count(), 0);
    assert_eq!(grade.values[1], Value::Utf8("-".to_string()));
    assert_eq!(
        table.column("done").unwrap().values,
        vec![Value::Bool(true), Value::Bool(false), Value::Bool(true), Value::Null]
    );

    let options = CsvOptions {
        missing_markers: vec!["-".to_string()],
        ..Default::default()
    };
    let table = ingest_csv_from_str("grade\nA\n-\nB\n-\n", &options).unwrap();
    assert_eq!(table.column("grade").unwrap().missing_count(), 2);
}

#[test]
fn ingest_csv_from_reader_trims_headers() {
    let input = " id , name \n1,Ada\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input.as_bytes());

    let table = ingest_csv_from_reader(&mut rdr, &CsvOptions::default()).unwrap();
    let names: Vec<_> = table.column_names().collect();
    assert_eq!(names, vec!["id", "name"]);
}

#[test]
fn ingest_csv_errors_on_ragged_row_with_line_number() {
    let err = ingest_csv_from_path("tests/fixtures/ragged.csv", &CsvOptions::default()).unwrap_err();
    assert!(matches!(err, EdaError::InputShape { .. }));
    let msg = err.to_string();
    assert!(msg.contains("line 3"), "{msg}");
    assert!(msg.contains("expected 2"), "{msg}");
}

#[test]
fn ingest_csv_errors_on_duplicate_header() {
    let err = ingest_csv_from_str("a,a\n1,2\n", &CsvOptions::default()).unwrap_err();
    assert!(matches!(err, EdaError::DuplicateColumn { ref name } if name == "a"));
}

#[test]
fn header_only_file_is_an_empty_table() {
    let table = ingest_csv_from_str("a,b\n", &CsvOptions::default()).unwrap();
    assert_eq!(table.row_count(), 0);
    assert_eq!(table.column_count(), 2);
    assert!(table.is_empty());
}

#[test]
fn unified_ingest_infers_tab_delimiter_from_extension() {
    let table = ingest_from_path("tests/fixtures/scores.tsv", &IngestionOptions::default()).unwrap();
    assert_eq!(table.row_count(), 3);
    assert_eq!(table.column("score").unwrap().values[2], Value::Null);
    assert_eq!(table.column("grade").unwrap().values[1], Value::Utf8("B".to_string()));
}

#[test]
fn unified_ingest_decodes_windows_1251_with_explicit_delimiter() {
    let opts = IngestionOptions {
        delimiter: Some(b';'),
        encoding: "windows-1251".to_string(),
        ..Default::default()
    };
    let table = ingest_from_path("tests/fixtures/cities_cp1251.csv", &opts).unwrap();
    let city = table.column("city").unwrap();
    assert_eq!(city.values[0], Value::Utf8("Москва".to_string()));
    assert_eq!(city.values[1], Value::Utf8("Казань".to_string()));
    assert_eq!(table.column("population").unwrap().values[1], Value::Float64(1.3));
}

#[test]
fn unified_ingest_rejects_invalid_utf8() {
    let opts = IngestionOptions {
        delimiter: Some(b';'),
        ..Default::default()
    };
    let err = ingest_from_path("tests/fixtures/cities_cp1251.csv", &opts).unwrap_err();
    assert!(matches!(err, EdaError::Decode { .. }));
}

#[test]
fn unified_ingest_reports_missing_file() {
    let err = ingest_from_path("tests/fixtures/does_not_exist.csv", &IngestionOptions::default()).unwrap_err();
    assert!(matches!(err, EdaError::NotFound { .. }));
    assert!(err.to_string().contains("not found"));
}

#[test]
fn unified_ingest_requires_known_extension_without_delimiter() {
    let path = tmp_file("dat");
    std::fs::write(&path, "a|b\n1|2\n").unwrap();

    let err = ingest_from_path(&path, &IngestionOptions::default()).unwrap_err();
    assert!(matches!(err, EdaError::InvalidInput { .. }));

    let table = ingest_from_path(
        &path,
        &IngestionOptions {
            delimiter: Some(b'|'),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(table.column("b").unwrap().values, vec![Value::Int64(2)]);

    let _ = std::fs::remove_file(&path);
}
