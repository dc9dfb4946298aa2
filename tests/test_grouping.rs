//! Tests for category grouping and interval merging

use polars::prelude::*;
use woetrack::pipeline::interval::merge_labels;
use woetrack::pipeline::{
    apply_mapping, compute_table, CategoryMapper, CategoryMapping, WoeError, MISSING_CATEGORY,
    TOTAL_CATEGORY,
};

#[path = "common/mod.rs"]
mod common;

use common::{interval_woe_table, numeric_woe_table, sample_df_woe_calculator};

#[test]
fn test_interval_adjacent_group_merges() {
    let mut mapper = CategoryMapper::new();
    let mapping = mapper
        .create_map(&interval_woe_table(), "age", "age", &[vec![0, 1]], true)
        .unwrap();

    assert_eq!(mapping["<=1"], "<=3");
    assert_eq!(mapping["(1,3]"], "<=3");
    assert_eq!(mapping["(3,5]"], "(3,5]");
    assert_eq!(mapping["(5,7]"], "(5,7]");
}

#[test]
fn test_interval_gap_falls_back_to_concat() {
    let mut mapper = CategoryMapper::new();
    let mapping = mapper
        .create_map(&interval_woe_table(), "age", "age", &[vec![0, 2]], true)
        .unwrap();

    assert_eq!(mapping["<=1"], "<=1 | (3,5]");
    assert_eq!(mapping["(3,5]"], "<=1 | (3,5]");
    assert_eq!(mapping["(1,3]"], "(1,3]");
}

#[test]
fn test_interval_bounded_merge() {
    let mut mapper = CategoryMapper::new();
    let mapping = mapper
        .create_map(&interval_woe_table(), "age", "age", &[vec![1, 2, 3]], true)
        .unwrap();

    assert_eq!(mapping["(1,3]"], "(1,7]");
    assert_eq!(mapping["(5,7]"], "(1,7]");
}

#[test]
fn test_numeric_ordered_labels() {
    let mut mapper = CategoryMapper::new();
    let mapping = mapper
        .create_map(
            &numeric_woe_table(),
            "score",
            "score",
            &[vec![0, 1], vec![2, 3], vec![4, 5]],
            true,
        )
        .unwrap();

    assert_eq!(mapping["10"], "<=20");
    assert_eq!(mapping["20"], "<=20");
    assert_eq!(mapping["30"], "[30, 40]");
    assert_eq!(mapping["40"], "[30, 40]");
    assert_eq!(mapping["50"], ">=50");
    assert_eq!(mapping["60"], ">=50");
}

#[test]
fn test_unordered_groups_concatenate() {
    let mut mapper = CategoryMapper::new();
    let mapping = mapper
        .create_map(&numeric_woe_table(), "score", "score", &[vec![3, 0]], false)
        .unwrap();

    assert_eq!(mapping["40"], "40 | 10");
    assert_eq!(mapping["10"], "40 | 10");
}

#[test]
fn test_create_map_is_total_and_skips_totals() {
    let tables = [
        (interval_woe_table(), "age", 4usize),
        (numeric_woe_table(), "score", 6usize),
    ];

    for (table, col, n) in tables {
        let mut mapper = CategoryMapper::new();
        let mapping = mapper.create_map(&table, col, col, &[vec![0, 1]], true).unwrap();

        assert_eq!(mapping.len(), n);
        assert!(!mapping.contains_key(TOTAL_CATEGORY));

        let categories = table.column(col).unwrap().str().unwrap();
        for cat in categories.into_iter().flatten().filter(|c| *c != TOTAL_CATEGORY) {
            assert!(mapping.contains_key(cat), "{} missing from mapping", cat);
        }
    }
}

#[test]
fn test_no_groups_is_identity() {
    let mut mapper = CategoryMapper::new();
    let mapping = mapper
        .create_map(&interval_woe_table(), "age", "age", &[], true)
        .unwrap();

    assert!(mapping.iter().all(|(k, v)| k == v));
}

#[test]
fn test_registry_replace_get_and_set() {
    let mut mapper = CategoryMapper::new();
    assert!(mapper.get("age").is_none());

    mapper
        .create_map(&interval_woe_table(), "age", "age", &[vec![0, 1]], true)
        .unwrap();
    mapper
        .create_map(&interval_woe_table(), "age", "age", &[vec![2, 3]], true)
        .unwrap();

    // The second call replaces the first mapping
    let age = mapper.get("age").unwrap();
    assert_eq!(age["<=1"], "<=1");
    assert_eq!(age["(3,5]"], "(3,7]");

    let manual: CategoryMapping = [("x", "anything")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    mapper.set("score", manual.clone());

    assert_eq!(mapper.get("score"), Some(&manual));
    assert_eq!(mapper.get_all().len(), 2);
}

#[test]
fn test_out_of_range_index() {
    let mut mapper = CategoryMapper::new();
    let err = mapper
        .create_map(&interval_woe_table(), "age", "age", &[vec![0, 4]], true)
        .unwrap_err();

    // The totals row does not count as a category
    assert!(matches!(err, WoeError::GroupIndexOutOfRange { index: 4, len: 4 }));
    assert!(mapper.get("age").is_none());
}

#[test]
fn test_missing_category_column() {
    let mut mapper = CategoryMapper::new();
    let err = mapper
        .create_map(&interval_woe_table(), "age", "bucket", &[vec![0]], true)
        .unwrap_err();

    assert!(matches!(err, WoeError::MissingColumn(ref c) if c == "bucket"));
}

#[test]
fn test_merge_single_interval_unchanged() {
    assert_eq!(merge_labels(&["(5,7]"]).unwrap().as_deref(), Some("(5,7]"));
}

#[test]
fn test_merge_is_order_independent() {
    let forward = merge_labels(&["<=1", "(1,3]"]).unwrap();
    let backward = merge_labels(&["(1,3]", "<=1"]).unwrap();

    assert_eq!(forward.as_deref(), Some("<=3"));
    assert_eq!(forward, backward);
}

#[test]
fn test_merge_malformed_label() {
    let err = merge_labels(&["<=1", "(1;3]"]).unwrap_err();
    assert!(matches!(err, WoeError::MalformedIntervalLabel { .. }));
}

#[test]
fn test_grouped_table_from_raw_data() {
    let df = sample_df_woe_calculator();
    let table = compute_table(&df, "target", "feature", "1", true).unwrap();

    let mut mapper = CategoryMapper::new();
    let mapping = mapper
        .create_map(&table.to_dataframe().unwrap(), "feature", "feature", &[vec![1, 2]], false)
        .unwrap();
    assert_eq!(mapping["C"], "B | C");

    let grouped = apply_mapping(&df, "feature", mapping, "feature_grouped").unwrap();
    let regrouped = compute_table(&grouped, "target", "feature_grouped", "1", true).unwrap();

    // Merging the single-class bin C with B removes the infinite WoE
    let bc = regrouped.get("B | C").unwrap();
    assert_eq!((bc.n_events, bc.n_non_events), (3, 5));
    assert!(bc.woe.is_finite());
    assert!(regrouped.iv_total().is_finite());
    assert_eq!(regrouped.category_rows().count(), 2);
}

fn income_with_null() -> DataFrame {
    df! {
        "income" => [Some(10i64), Some(20), Some(30), Some(40), Some(50), Some(60), None, Some(10), Some(60)],
        "target" => [1i32, 0, 1, 0, 1, 0, 1, 0, 1],
    }
    .unwrap()
}

#[test]
fn test_numeric_grouping_with_missing_category() {
    let df = income_with_null();
    let table = compute_table(&df, "target", "income", "1", true).unwrap();

    let categories: Vec<&str> = table.category_rows().map(|r| r.category.as_str()).collect();
    assert_eq!(categories, vec!["10", "20", "30", "40", "50", "60", MISSING_CATEGORY]);

    let mut mapper = CategoryMapper::new();
    let mapping = mapper
        .create_map(
            &table.to_dataframe().unwrap(),
            "income",
            "income",
            &[vec![0, 1], vec![2, 3]],
            true,
        )
        .unwrap();

    assert_eq!(mapping["10"], "<=20");
    assert_eq!(mapping["20"], "<=20");
    assert_eq!(mapping["30"], "[30, 40]");
    assert_eq!(mapping[MISSING_CATEGORY], MISSING_CATEGORY);
}

#[test]
fn test_missing_category_grouped_with_numeric() {
    let df = income_with_null();
    let table = compute_table(&df, "target", "income", "1", true).unwrap();

    let mut mapper = CategoryMapper::new();
    let mapping = mapper
        .create_map(
            &table.to_dataframe().unwrap(),
            "income",
            "income",
            &[vec![0, 1], vec![5, 6]],
            true,
        )
        .unwrap()
        .clone();

    assert_eq!(mapping["10"], "<=20");
    assert_eq!(mapping["60"], "60 | __MISSING__");

    let grouped = apply_mapping(&df, "income", &mapping, "income_grouped").unwrap();
    let labels: Vec<Option<&str>> = grouped
        .column("income_grouped")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(labels[6], Some("60 | __MISSING__"));
}
