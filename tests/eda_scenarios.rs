use eda_report::execution::{analyze, AnalysisOptions};
use eda_report::ingestion::{ingest_from_path, IngestionOptions};
use eda_report::profiling::{
    correlation_matrix, flatten_for_display, missing_table, quality_flags, summarize, top_categories,
    CategoryCount, NOT_APPLICABLE,
};
use eda_report::types::{Column, DtypeKind, Table, Value};

fn scenario_a() -> Table {
    Table::new(vec![
        Column::new("age", [Some(10_i64), Some(20), Some(30), None]),
        Column::new("height", [140_i64, 150, 160, 170]),
        Column::new("city", [Some("A"), Some("B"), Some("A"), None]),
    ])
    .unwrap()
}

#[test]
fn scenario_a_small_mixed_table() {
    let table = scenario_a();

    let summary = summarize(&table);
    assert_eq!(summary.n_rows, 4);
    assert_eq!(summary.n_cols, 3);

    let missing = missing_table(&table);
    assert_eq!(missing.get("age").unwrap().missing_count, 1);
    assert_eq!(missing.get("city").unwrap().missing_count, 1);
    assert!(missing.get("height").is_none());

    let top = top_categories(&table, 5, 2);
    assert_eq!(
        top.get("city").unwrap(),
        &[CategoryCount::new("A", 2), CategoryCount::new("B", 1)][..]
    );

    let age = summary.column("age").unwrap();
    assert_eq!(age.dtype_kind, DtypeKind::Numeric);
    assert_eq!(age.non_null_count + age.missing_count, 4);
    let stats = age.numeric.as_ref().unwrap();
    assert_eq!(stats.min, Some(10.0));
    assert_eq!(stats.max, Some(30.0));
    assert_eq!(stats.mean, Some(20.0));
    assert_eq!(stats.median, Some(20.0));

    let corr = correlation_matrix(&table);
    assert_eq!(corr.columns(), ["age".to_string(), "height".to_string()]);
    let r = corr.get("age", "height").unwrap().unwrap();
    assert!((r - 1.0).abs() < 1e-12);
}

#[test]
fn scenario_b_constant_column() {
    let table = Table::new(vec![
        Column::new("id", 1_i64..=5),
        Column::new("constant_col", [10_i64, 10, 10, 10, 10]),
    ])
    .unwrap();

    let summary = summarize(&table);
    let flags = quality_flags(&summary, &missing_table(&table), &table);
    assert!(flags.has_constant_columns);
    assert!(flags.constant_columns.contains(&"constant_col".to_string()));
    assert!(!flags.constant_columns.contains(&"id".to_string()));

    // zero variance: undefined everywhere in its row and column, including the diagonal
    let corr = correlation_matrix(&table);
    assert_eq!(corr.get("constant_col", "id"), Some(None));
    assert_eq!(corr.get("id", "constant_col"), Some(None));
    assert_eq!(corr.get("constant_col", "constant_col"), Some(None));
    assert_eq!(corr.get("id", "id"), Some(Some(1.0)));
}

#[test]
fn scenario_c_high_cardinality_categorical() {
    let values: Vec<String> = (0..100).map(|i| format!("user_{i}")).collect();
    let table = Table::new(vec![Column::new("high_card_col", values.iter().map(String::as_str))]).unwrap();

    let summary = summarize(&table);
    let flags = quality_flags(&summary, &missing_table(&table), &table);
    assert!(flags.has_high_cardinality_categoricals);
    assert_eq!(flags.high_cardinality_columns, vec!["high_card_col".to_string()]);
    assert!(!flags.too_few_rows);
}

#[test]
fn scenario_d_zero_heavy_numeric_column() {
    let table = Table::new(vec![Column::new("zero_col", [0_i64, 0, 0, 0, 0, 1, 2, 3, 4, 5])]).unwrap();

    let summary = summarize(&table);
    let flags = quality_flags(&summary, &missing_table(&table), &table);
    assert!(flags.has_many_zero_values);
    assert_eq!(flags.zero_columns, vec!["zero_col".to_string()]);
}

#[test]
fn scenario_e_empty_table() {
    let table = Table::new(vec![
        Column::new("a", Vec::<i64>::new()),
        Column::new("b", Vec::<&str>::new()),
    ])
    .unwrap();

    let summary = summarize(&table);
    assert_eq!(summary.n_rows, 0);
    assert_eq!(summary.n_cols, 2);

    let missing = missing_table(&table);
    assert!(missing.is_empty());

    let flags = quality_flags(&summary, &missing, &table);
    assert!(!flags.too_few_rows);
    assert!(!flags.too_many_columns);
    assert!(!flags.too_many_missing);
    assert!(!flags.has_constant_columns);
    assert!(!flags.has_high_cardinality_categoricals);
    assert!(!flags.has_many_zero_values);
    assert_eq!(flags.quality_score, 0.0);

    let display = flatten_for_display(&summary);
    assert_eq!(display.rows.len(), 2);
    assert_eq!(display.rows[0][7], NOT_APPLICABLE);
}

#[test]
fn single_numeric_column_has_empty_correlation() {
    let table = Table::new(vec![
        Column::new("x", [1.0, 2.0, 3.0]),
        Column::new("label", ["a", "b", "c"]),
    ])
    .unwrap();
    assert!(correlation_matrix(&table).is_empty());
}

#[test]
fn numeric_text_and_nan_are_handled() {
    let table = Table::new(vec![
        Column::new("as_text", ["1.5", "2.5", "3.5"]),
        Column::new("with_nan", [Value::Float64(1.0), Value::Float64(f64::NAN), Value::Float64(3.0)]),
    ])
    .unwrap();

    let summary = summarize(&table);
    assert_eq!(summary.column("as_text").unwrap().dtype_kind, DtypeKind::Numeric);
    let with_nan = summary.column("with_nan").unwrap();
    assert_eq!(with_nan.missing_count, 1);
    assert_eq!(with_nan.numeric.as_ref().unwrap().mean, Some(2.0));
}

#[test]
fn letter_coded_answers_get_top_categories() {
    let table = eda_report::ingestion::csv::ingest_csv_from_str(
        "answer\nY\nN\nY\nY\n",
        &eda_report::ingestion::csv::CsvOptions::default(),
    )
    .unwrap();
    assert_eq!(table.column("answer").unwrap().values[0], Value::Utf8("Y".to_string()));

    let top = top_categories(&table, 5, 5);
    assert_eq!(
        top.get("answer").unwrap(),
        &[CategoryCount::new("Y", 3), CategoryCount::new("N", 1)][..]
    );
}

#[test]
fn infinite_values_do_not_make_a_numeric_constant() {
    let table = Table::new(vec![Column::new("x", [f64::INFINITY, 5.0, 5.0])]).unwrap();
    let summary = summarize(&table);
    let x = summary.column("x").unwrap();
    assert_eq!(x.dtype_kind, DtypeKind::Other);
    assert_eq!(x.non_null_count, 3);
    assert_eq!(x.distinct_count, 2);

    let flags = quality_flags(&summary, &missing_table(&table), &table);
    assert!(flags.constant_columns.is_empty());
}

#[test]
fn fixture_file_end_to_end() {
    let table = ingest_from_path("tests/fixtures/users.csv", &IngestionOptions::default()).unwrap();
    let report = analyze(&table, &AnalysisOptions::default());

    let kind = |name: &str| report.summary.column(name).unwrap().dtype_kind;
    assert_eq!(kind("user_id"), DtypeKind::Numeric);
    assert_eq!(kind("country"), DtypeKind::Categorical);
    assert_eq!(kind("signup_date"), DtypeKind::Datetime);
    assert_eq!(kind("is_active"), DtypeKind::Boolean);

    assert_eq!(report.missing.get("age").unwrap().missing_count, 2);
    assert_eq!(report.missing.len(), 3);

    assert_eq!(
        report.correlation.columns(),
        ["user_id", "age", "revenue", "purchases"].map(String::from)
    );
    let r = report.correlation.get("revenue", "purchases").unwrap().unwrap();
    assert!(r > 0.9, "{r}");

    let q = &report.quality;
    assert!(!q.too_few_rows);
    assert!(!q.too_many_missing);
    assert_eq!(q.constant_columns, vec!["plan".to_string()]);
    assert_eq!(q.zero_columns, vec!["revenue".to_string(), "purchases".to_string()]);
    // eleven distinct signup dates out of eleven present values
    assert_eq!(q.high_cardinality_columns, vec!["signup_date".to_string()]);
    let expected = 1.0 - (0.40 * (2.0 / 12.0) + 0.10 + 0.10 + 0.10);
    assert!((q.quality_score - expected).abs() < 1e-9);

    let country = report.top_categories.get("country").unwrap();
    assert_eq!(country[0], CategoryCount::new("RU", 6));
    assert_eq!(country[1], CategoryCount::new("KZ", 3));
    assert_eq!(country[2], CategoryCount::new("BY", 2));
    assert_eq!(report.top_categories.get("plan").unwrap(), &[CategoryCount::new("basic", 12)][..]);
    let profiled: Vec<&str> = report.top_categories.columns().iter().map(|t| t.column.as_str()).collect();
    assert_eq!(profiled, vec!["country", "signup_date", "is_active", "plan"]);
    assert_eq!(report.top_categories.get("is_active").unwrap()[0], CategoryCount::new("true", 6));
}
