//! Index properties checked against a real SQLite file.

use proptest::prelude::*;
use tsindex_core::{index_name, IndexBackend, IndexError, IndexOutcome, SqliteBackend};
use tsindex_testkit::prelude::*;

const ALL_RECOGNIZED: &[&str] = &[
    "id INTEGER",
    "ts_code VARCHAR(32)",
    "trade_date DATE",
    "f_ann_date DATE",
    "close DOUBLE",
];

#[test]
fn second_call_issues_no_ddl() {
    let db = TestSqlite::new();
    db.create_table("daily", ALL_RECOGNIZED);

    let first = db.ensure_index("daily").unwrap();
    assert_eq!(first.created().len(), 3);
    let after_first = db.index_names("daily");

    let second = db.ensure_index("daily").unwrap();
    assert_eq!(second, IndexOutcome::AlreadyIndexed);
    assert_eq!(db.index_names("daily"), after_first);
}

#[test]
fn only_present_columns_are_indexed() {
    let db = TestSqlite::new();
    db.create_table("trade_cal", &["trade_date DATE", "is_open INTEGER"]);

    let outcome = db.ensure_index("trade_cal").unwrap();
    assert_eq!(outcome.created(), ["idx_trade_cal_trade_date"]);
    assert_eq!(db.index_names("trade_cal"), ["idx_trade_cal_trade_date"]);
}

#[test]
fn unrelated_index_skips_table() {
    let db = TestSqlite::new();
    db.create_table("daily", ALL_RECOGNIZED);
    db.create_raw_index("manual_close", "daily", "close");

    assert!(db.index_exists("daily").unwrap());
    let outcome = db.ensure_index("daily").unwrap();
    assert_eq!(outcome, IndexOutcome::AlreadyIndexed);
    // ts_code stays unindexed: the existence check is deliberately coarse.
    assert_eq!(db.index_names("daily"), ["manual_close"]);
}

#[test]
fn missing_table_is_query_error() {
    let db = TestSqlite::new();
    db.create_table("daily", ALL_RECOGNIZED);

    let err = db.ensure_index("nonexistent_table").unwrap_err();
    assert!(err.is_query());
    assert!(matches!(err, IndexError::TableNotFound { .. }));
    assert!(db.index_names("nonexistent_table").is_empty());
    assert!(db.index_names("daily").is_empty());
}

#[test]
fn created_names_follow_table_and_column() {
    let db = TestSqlite::new();
    db.create_table("fina_indicator", &["ts_code VARCHAR(32)", "f_ann_date DATE"]);

    let outcome = db.ensure_index("fina_indicator").unwrap();
    assert_eq!(
        outcome.created(),
        [
            index_name("fina_indicator", "ts_code"),
            index_name("fina_indicator", "f_ann_date"),
        ]
    );
    assert_eq!(db.index_columns("idx_fina_indicator_ts_code"), ["ts_code"]);
    assert_eq!(db.index_columns("idx_fina_indicator_f_ann_date"), ["f_ann_date"]);
}

#[test]
fn indexes_survive_reopen() {
    let db = TestSqlite::new();
    db.create_table("daily", ALL_RECOGNIZED);
    db.ensure_index("daily").unwrap();

    let reopened = SqliteBackend::open_path(db.path()).unwrap();
    assert_eq!(
        reopened.ensure_index("daily").unwrap(),
        IndexOutcome::AlreadyIndexed
    );
    assert_eq!(reopened.list_indexes("daily").unwrap().len(), 3);
}

#[test]
fn tables_are_independent() {
    let db = TestSqlite::new();
    db.create_table("daily", ALL_RECOGNIZED);
    db.create_table("weekly", ALL_RECOGNIZED);

    db.ensure_index("daily").unwrap();
    assert!(!db.index_exists("weekly").unwrap());

    let outcome = db.ensure_index("weekly").unwrap();
    assert_eq!(outcome.created().len(), 3);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn exactly_recognized_columns_indexed(
        table in table_name_strategy(),
        layout in table_layout_strategy(),
    ) {
        let db = TestSqlite::new();
        db.create_table(&table, &layout.definition_refs());

        let outcome = db.ensure_index(&table).unwrap();
        let expected: Vec<String> = layout
            .recognized
            .iter()
            .map(|column| format!("idx_{}_{}", table, column))
            .collect();
        prop_assert_eq!(outcome.created(), expected.as_slice());

        let mut sorted = expected;
        sorted.sort();
        prop_assert_eq!(db.index_names(&table), sorted);

        let again = db.ensure_index(&table).unwrap();
        let expected_again = if layout.recognized.is_empty() {
            IndexOutcome::Created(Vec::new())
        } else {
            IndexOutcome::AlreadyIndexed
        };
        prop_assert_eq!(again, expected_again);
    }
}
