//! Shared test utilities and fixture generators

#![allow(dead_code)]

use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Binned feature data with known WoE characteristics
///
/// This DataFrame includes:
/// - `target`: Binary target column (0/1), 6 events and 6 non-events
/// - `feature`: Category `C` holds only non-events (infinite WoE)
/// - `feature_balanced`: Every category holds both classes
/// - `feature_missing`: Two null values
pub fn sample_df_woe_calculator() -> DataFrame {
    df! {
        "target" => [1i32, 1, 0, 1, 0, 0, 1, 1, 0, 1, 0, 0],
        "feature" => ["A", "A", "A", "B", "B", "C", "A", "B", "C", "B", "C", "C"],
        "feature_balanced" => ["X", "X", "X", "Y", "Y", "Y", "Z", "Z", "Z", "X", "Y", "Z"],
        "feature_missing" => [Some("P"), None, Some("P"), Some("Q"), None, Some("Q"),
                              Some("P"), Some("Q"), Some("P"), Some("Q"), Some("Q"), Some("P")],
    }
    .unwrap()
}

/// Same binned feature observed over two months
///
/// `2024-01` and `2024-02` both contain events and non-events.
pub fn sample_df_by_period() -> DataFrame {
    df! {
        "period" => ["2024-01", "2024-01", "2024-01", "2024-01", "2024-01", "2024-01",
                     "2024-02", "2024-02", "2024-02", "2024-02", "2024-02", "2024-02"],
        "feature" => ["A", "A", "B", "B", "C", "C",
                      "A", "A", "B", "B", "C", "C"],
        "target" => [1i32, 0, 1, 0, 0, 1,
                     1, 1, 0, 1, 0, 0],
    }
    .unwrap()
}

/// Global WoE table of a numeric (integer-valued) feature, totals row included
pub fn numeric_woe_table() -> DataFrame {
    df! {
        "score" => ["10", "20", "30", "40", "50", "60", "__TOTAL__"],
        "woe" => [-0.8f64, -0.4, -0.1, 0.1, 0.5, 0.9, f64::NAN],
    }
    .unwrap()
}

/// Global WoE table of an interval-binned feature, totals row included
pub fn interval_woe_table() -> DataFrame {
    df! {
        "age" => ["<=1", "(1,3]", "(3,5]", "(5,7]", "__TOTAL__"],
        "woe" => [-0.5f64, -0.2, 0.3, 0.7, f64::NAN],
    }
    .unwrap()
}

/// Random binned data for larger runs
pub fn create_large_binned_dataframe(rows: usize, n_categories: usize) -> DataFrame {
    use rand::Rng;
    let mut rng = rand::thread_rng();

    let target: Vec<i32> = (0..rows).map(|_| rng.gen_range(0..2)).collect();
    let feature: Vec<String> = (0..rows)
        .map(|_| format!("bin_{}", rng.gen_range(0..n_categories)))
        .collect();
    let period: Vec<String> = (0..rows)
        .map(|_| format!("2024-{:02}", rng.gen_range(1..=12)))
        .collect();

    DataFrame::new(vec![
        Column::new("target".into(), target),
        Column::new("feature".into(), feature),
        Column::new("period".into(), period),
    ])
    .unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("test_data.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Assert two floats are within `tol`, treating equal infinities as equal
pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    if expected.is_infinite() {
        assert_eq!(actual, expected, "Expected {}, got {}", expected, actual);
    } else {
        assert!(
            (actual - expected).abs() < tol,
            "Expected {} (±{}), got {}",
            expected,
            tol,
            actual
        );
    }
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}
