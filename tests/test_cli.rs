//! Tests for CLI argument parsing and the woetrack binary

use assert_cmd::Command;
use clap::Parser;
use predicates::prelude::*;
use std::path::PathBuf;
use woetrack::cli::{Cli, Commands, Groups};
use woetrack::pipeline::PeriodGranularity;
use woetrack::report::DEFAULT_DRIFT_THRESHOLD;

#[path = "common/mod.rs"]
mod common;

fn woetrack() -> Command {
    Command::cargo_bin("woetrack").unwrap()
}

#[test]
fn test_table_default_values() {
    let cli = Cli::parse_from(["woetrack", "table", "-i", "data.csv", "-t", "target", "-f", "grade"]);

    match cli.command {
        Commands::Table { data, no_totals } => {
            assert_eq!(data.input, PathBuf::from("data.csv"));
            assert_eq!(data.target, "target");
            assert_eq!(data.feature, "grade");
            assert_eq!(data.event_value, "1", "Default event value should be 1");
            assert_eq!(data.infer_schema_length, 10000);
            assert!(data.output.is_none());
            assert!(!no_totals);
        }
        other => panic!("expected table command, got {:?}", other),
    }
}

#[test]
fn test_periodic_arguments() {
    let cli = Cli::parse_from([
        "woetrack",
        "periodic",
        "-i",
        "data.parquet",
        "-t",
        "bad",
        "-f",
        "age_bin",
        "-d",
        "open_date",
        "--granularity",
        "quarter",
        "--drift-threshold",
        "0.2",
        "--event-value",
        "Y",
    ]);

    match cli.command {
        Commands::Periodic {
            data,
            date,
            granularity,
            drift_threshold,
        } => {
            assert_eq!(data.event_value, "Y");
            assert_eq!(date, "open_date");
            assert_eq!(granularity, PeriodGranularity::Quarter);
            assert_eq!(drift_threshold, 0.2);
        }
        other => panic!("expected periodic command, got {:?}", other),
    }
}

#[test]
fn test_periodic_defaults() {
    let cli = Cli::parse_from([
        "woetrack", "periodic", "-i", "d.csv", "-t", "t", "-f", "f", "-d", "date",
    ]);

    match cli.command {
        Commands::Periodic {
            granularity,
            drift_threshold,
            ..
        } => {
            assert_eq!(granularity, PeriodGranularity::Month);
            assert_eq!(drift_threshold, DEFAULT_DRIFT_THRESHOLD);
        }
        other => panic!("expected periodic command, got {:?}", other),
    }
}

#[test]
fn test_group_arguments() {
    let cli = Cli::parse_from([
        "woetrack",
        "group",
        "-i",
        "d.csv",
        "-t",
        "t",
        "-f",
        "f",
        "-g",
        "[[0,1],[4,5]]",
        "--ordered",
    ]);

    match cli.command {
        Commands::Group { groups, ordered, .. } => {
            assert_eq!(groups, Groups(vec![vec![0, 1], vec![4, 5]]));
            assert!(ordered);
        }
        other => panic!("expected group command, got {:?}", other),
    }
}

#[test]
fn test_invalid_arguments_rejected() {
    let base = ["woetrack", "periodic", "-i", "d.csv", "-t", "t", "-f", "f", "-d", "date"];

    let negative_threshold = [&base[..], &["--drift-threshold", "-1"][..]].concat();
    assert!(Cli::try_parse_from(negative_threshold).is_err());

    let bad_granularity = [&base[..], &["--granularity", "week"][..]].concat();
    assert!(Cli::try_parse_from(bad_granularity).is_err());

    let bad_groups = ["woetrack", "group", "-i", "d.csv", "-t", "t", "-f", "f", "-g", "0,1"];
    assert!(Cli::try_parse_from(bad_groups).is_err());

    let missing_feature = ["woetrack", "table", "-i", "d.csv", "-t", "t"];
    assert!(Cli::try_parse_from(missing_feature).is_err());
}

#[test]
fn test_binary_table_command() {
    let mut df = common::sample_df_woe_calculator();
    let (temp_dir, csv_path) = common::create_temp_csv(&mut df);
    let output = temp_dir.path().join("woe.csv");

    woetrack()
        .args(["table", "-t", "target", "-f", "feature"])
        .arg("-i")
        .arg(&csv_path)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("__TOTAL__"))
        .stdout(predicate::str::contains("Infinite WoE"));

    assert!(output.exists());
}

#[test]
fn test_binary_periodic_command() {
    let mut df = common::sample_df_by_period();
    let (_temp_dir, csv_path) = common::create_temp_csv(&mut df);

    woetrack()
        .args(["periodic", "-t", "target", "-f", "feature", "-d", "period"])
        .arg("-i")
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-02"))
        .stdout(predicate::str::contains("drifting"));
}

#[test]
fn test_binary_group_command() {
    let mut df = common::sample_df_woe_calculator();
    let (_temp_dir, csv_path) = common::create_temp_csv(&mut df);

    woetrack()
        .args(["group", "-t", "target", "-f", "feature", "-g", "[[1,2]]"])
        .arg("-i")
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("B | C"));
}

#[test]
fn test_binary_reports_missing_column() {
    let mut df = common::sample_df_woe_calculator();
    let (_temp_dir, csv_path) = common::create_temp_csv(&mut df);

    woetrack()
        .args(["table", "-t", "target", "-f", "nope"])
        .arg("-i")
        .arg(&csv_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope"));
}

#[test]
fn test_binary_group_index_out_of_range() {
    let mut df = common::sample_df_woe_calculator();
    let (_temp_dir, csv_path) = common::create_temp_csv(&mut df);

    woetrack()
        .args(["group", "-t", "target", "-f", "feature", "-g", "[[0,9]]"])
        .arg("-i")
        .arg(&csv_path)
        .assert()
        .failure();
}

#[test]
fn test_bins_argument() {
    let cli = Cli::parse_from([
        "woetrack", "table", "-i", "d.csv", "-t", "t", "-f", "age", "--bins", "-5,20,40.5",
    ]);

    match cli.command {
        Commands::Table { data, .. } => {
            assert_eq!(data.bins, Some(vec![-5.0, 20.0, 40.5]));
        }
        other => panic!("expected table command, got {:?}", other),
    }

    let cli = Cli::parse_from(["woetrack", "table", "-i", "d.csv", "-t", "t", "-f", "age"]);
    match cli.command {
        Commands::Table { data, .. } => assert!(data.bins.is_none()),
        other => panic!("expected table command, got {:?}", other),
    }
}

#[test]
fn test_binary_table_with_bins() {
    let mut df = polars::prelude::df! {
        "age" => [Some(18i64), Some(25), Some(33), Some(47), Some(52), None],
        "bad" => [1i32, 0, 1, 0, 1, 0],
    }
    .unwrap();
    let (_temp_dir, csv_path) = common::create_temp_csv(&mut df);

    woetrack()
        .args(["table", "-t", "bad", "-f", "age", "--bins", "30,50"])
        .arg("-i")
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("(30, 50]"))
        .stdout(predicate::str::contains("N/A"));
}

#[test]
fn test_binary_rejects_unsorted_bins() {
    let mut df = common::sample_df_woe_calculator();
    let (_temp_dir, csv_path) = common::create_temp_csv(&mut df);

    woetrack()
        .args(["table", "-t", "target", "-f", "target", "--bins", "5,3"])
        .arg("-i")
        .arg(&csv_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("strictly increasing"));
}
