//! Property-based tests for the pipeline stages and selection.
//!
//! Uses proptest to check ordering, coverage and selection guarantees across
//! many random record sets.

use proptest::prelude::*;

use datatable_lib::engine::filter;
use datatable_lib::engine::page::Paginator;
use datatable_lib::engine::sort;
use datatable_lib::schema::FilterField;
use datatable_lib::{
    Column, FilterKind, FilterSet, Record, SortState, TableConfig, TableController, TableSchema,
    Value,
};

const NAMES: &[&str] = &["Amy", "amy", "Bo", "Cy", "Émile", "emile", "Zoë"];
const STATUSES: &[&str] = &["Active", "Inactive"];

fn schema() -> TableSchema<Record> {
    TableSchema::<Record>::keyed_by_field("id")
        .column(Column::field("name", "Name").sortable())
        .column(Column::field("score", "Score").sortable())
        .column(Column::field("status", "Status"))
        .filter_field(FilterField::on_field(
            "status",
            "Status",
            FilterKind::select([("Active", "Active"), ("Inactive", "Inactive")]),
            "status",
        ))
        .build()
        .unwrap()
}

/// Records with ids `0..n`, a name, an optional score and a status.
fn records_strategy(max: usize) -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(
        (
            0..NAMES.len(),
            prop::option::weighted(0.8, 0..5i32),
            0..STATUSES.len(),
        ),
        0..max,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(id, (name, score, status))| {
                Record::new()
                    .set("id", id as i64)
                    .set("name", NAMES[name])
                    .set("score", score)
                    .set("status", STATUSES[status])
            })
            .collect()
    })
}

fn all_rows(records: &[Record]) -> Vec<usize> {
    (0..records.len()).collect()
}

// ============================================================================
// Filter
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Filtering never grows the set, keeps input order and is repeatable.
    #[test]
    fn filter_monotone_ordered_idempotent(
        records in records_strategy(40),
        status in 0..STATUSES.len(),
        search in prop::sample::select(vec!["", "a", "MY", "é", "zz"]),
    ) {
        let schema = schema();
        let filters = FilterSet::new().with("status", Value::from(STATUSES[status]));
        let first = filter::apply(&records, &schema, None, &filters, search);
        let second = filter::apply(&records, &schema, None, &filters, search);

        prop_assert!(first.len() <= records.len());
        prop_assert!(first.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(first, second);
    }
}

// ============================================================================
// Sort
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// With distinct keys, descending is the reverse of ascending.
    #[test]
    fn sort_desc_reverses_asc_without_ties(
        scores in prop::collection::btree_set(-1000..1000i32, 0..30)
            .prop_map(|set| set.into_iter().collect::<Vec<_>>())
            .prop_shuffle()
    ) {
        let records: Vec<Record> = scores
            .iter()
            .enumerate()
            .map(|(id, score)| Record::new().set("id", id as i64).set("score", *score))
            .collect();
        let schema = schema();
        let rows = all_rows(&records);

        let asc = sort::apply(&records, &rows, &schema, Some(&SortState::asc("score")));
        let mut desc = sort::apply(&records, &rows, &schema, Some(&SortState::desc("score")));
        desc.reverse();
        prop_assert_eq!(asc, desc);
    }

    /// Tied rows keep input order in both directions, and nulls come last.
    #[test]
    fn sort_stable_with_nulls_last(records in records_strategy(40), desc in any::<bool>()) {
        let schema = schema();
        let rows = all_rows(&records);
        let state = if desc { SortState::desc("score") } else { SortState::asc("score") };
        let ordered = sort::apply(&records, &rows, &schema, Some(&state));

        let mut sorted = ordered.clone();
        sorted.sort_unstable();
        prop_assert_eq!(&sorted, &rows);

        for pair in ordered.windows(2) {
            let a = records[pair[0]].value("score");
            let b = records[pair[1]].value("score");
            prop_assert!(!(a.is_null() && !b.is_null()), "null before value");
            if a == b {
                prop_assert!(pair[0] < pair[1], "tie out of input order");
            }
        }
    }

    /// Integers and floats near 2^53 compare as a total preorder: sorted
    /// output is non-decreasing under the same comparison, pair by pair and
    /// against every later row.
    #[test]
    fn sort_mixed_numbers_consistent_past_f64_precision(
        offsets in prop::collection::vec((-4..4i64, any::<bool>()), 0..40)
    ) {
        let base = 1i64 << 53;
        let records: Vec<Record> = offsets
            .iter()
            .enumerate()
            .map(|(id, &(offset, float))| {
                let score = if float {
                    Value::Float((base + offset) as f64)
                } else {
                    Value::Long(base + offset)
                };
                Record::new().set("id", id as i64).set("score", score)
            })
            .collect();
        let rows = all_rows(&records);
        let ordered = sort::apply(&records, &rows, &schema(), Some(&SortState::asc("score")));

        for (i, &earlier) in ordered.iter().enumerate() {
            let a = records[earlier].value("score");
            for &later in &ordered[i + 1..] {
                let b = records[later].value("score");
                prop_assert!(
                    sort::compare_values(&a, &b) != std::cmp::Ordering::Greater,
                    "{:?} sorted before {:?}", a, b
                );
            }
        }
    }

    /// Names sort the same way every time, including accented and cased variants.
    #[test]
    fn sort_idempotent(records in records_strategy(40)) {
        let schema = schema();
        let rows = all_rows(&records);
        let state = SortState::asc("name");
        let once = sort::apply(&records, &rows, &schema, Some(&state));
        let twice = sort::apply(&records, &once, &schema, Some(&state));
        prop_assert_eq!(once, twice);
    }
}

// ============================================================================
// Paginate
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Concatenating every page reproduces the input exactly.
    #[test]
    fn pages_cover_sequence(len in 0usize..60, page_size in 1usize..12) {
        let items: Vec<usize> = (0..len).collect();
        let pager = Paginator::new(page_size).unwrap();
        let total_pages = pager.total_pages(len);

        let mut joined = Vec::new();
        for page in 1..=total_pages {
            let slice = pager.apply(&items, page);
            prop_assert_eq!(slice.page(), page);
            prop_assert!(!slice.is_empty() || len == 0);
            joined.extend_from_slice(slice.items());
        }
        prop_assert_eq!(joined, items);
    }
}

// ============================================================================
// Selection
// ============================================================================

#[derive(Debug, Clone)]
enum ViewOp {
    Search(&'static str),
    Filter(usize),
    ResetFilters,
    Sort(&'static str),
    Page(usize),
}

fn view_op() -> impl Strategy<Value = ViewOp> {
    prop_oneof![
        prop::sample::select(vec!["", "a", "bo", "zz"]).prop_map(ViewOp::Search),
        (0..STATUSES.len()).prop_map(ViewOp::Filter),
        Just(ViewOp::ResetFilters),
        prop::sample::select(vec!["name", "score", "status"]).prop_map(ViewOp::Sort),
        (0usize..8).prop_map(ViewOp::Page),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// View changes never touch the selection.
    #[test]
    fn selection_survives_navigation(
        records in records_strategy(30).prop_filter("need records", |r| !r.is_empty()),
        pick in any::<prop::sample::Index>(),
        ops in prop::collection::vec(view_op(), 0..12),
    ) {
        let config = TableConfig::default().with_selectable(true).with_page_size(3);
        let mut table = TableController::with_records(schema(), config, records).unwrap();
        let keys: Vec<String> = table.records().iter().map(|r| r.value("id").to_string()).collect();
        let key = pick.get(&keys).clone();
        prop_assert!(table.toggle_selection(&key));

        for op in ops {
            match op {
                ViewOp::Search(text) => table.set_search_text(text),
                ViewOp::Filter(status) => {
                    table.set_filter("status", Value::from(STATUSES[status]));
                    table.apply_filters();
                }
                ViewOp::ResetFilters => table.reset_filters(),
                ViewOp::Sort(column) => {
                    table.set_sort(column);
                }
                ViewOp::Page(page) => table.set_page(page),
            }
            prop_assert_eq!(table.selected_keys(), vec![key.clone()]);
            prop_assert!(table.current_page() >= 1 && table.current_page() <= table.total_pages());
        }
    }

    /// Replacing records prunes exactly the identities that disappeared.
    #[test]
    fn replace_prunes_only_missing(
        records in records_strategy(30),
        keep in prop::collection::vec(any::<bool>(), 30),
    ) {
        let config = TableConfig::default().with_selectable(true);
        let mut table = TableController::with_records(schema(), config, records.clone()).unwrap();
        table.select_all_matching();

        let kept: Vec<Record> = records
            .into_iter()
            .zip(&keep)
            .filter(|(_, keep)| **keep)
            .map(|(record, _)| record)
            .collect();
        let mut expected: Vec<String> = kept.iter().map(|r| r.value("id").to_string()).collect();
        expected.sort();

        table.replace_records(kept).unwrap();
        prop_assert_eq!(table.selected_keys(), expected);
    }
}
