//! Integration tests for the filter -> sort -> paginate pipeline.

use datatable_lib::engine::filter;
use datatable_lib::engine::page::Paginator;
use datatable_lib::engine::sort;
use datatable_lib::schema::FilterField;
use datatable_lib::{
    Column, FilterKind, FilterSet, Record, SortState, Tab, TableConfig, TableController,
    TableSchema, Value,
};

fn schema() -> TableSchema<Record> {
    TableSchema::<Record>::keyed_by_field("id")
        .column(Column::field("id", "ID").sortable().not_searchable())
        .column(Column::field("name", "Name").sortable())
        .column(Column::field("status", "Status"))
        .filter_field(FilterField::on_field(
            "status",
            "Status",
            FilterKind::select([("Active", "Active"), ("Inactive", "Inactive")]),
            "status",
        ))
        .tab(Tab::all("all", "All"))
        .tab(Tab::new("active", "Active", |r: &Record| {
            r.get_string("status").ok().flatten() == Some("Active")
        }))
        .build()
        .unwrap()
}

fn people() -> Vec<Record> {
    vec![
        Record::new().set("id", 1).set("name", "Amy").set("status", "Active"),
        Record::new().set("id", 2).set("name", "Bo").set("status", "Inactive"),
        Record::new().set("id", 3).set("name", "Cy").set("status", "Active"),
    ]
}

fn names(records: &[&Record]) -> Vec<String> {
    records.iter().map(|r| r.value("name").to_string()).collect()
}

// =============================================================================
// Stages used directly
// =============================================================================

#[test]
fn test_stages_compose_into_visible_slice() {
    let records = people();
    let schema = schema();
    let filters = FilterSet::new().with("status", Value::from("Active"));

    let filtered = filter::apply(&records, &schema, None, &filters, "");
    let ordered = sort::apply(&records, &filtered, &schema, Some(&SortState::asc("name")));
    let pager = Paginator::new(10).unwrap();
    let page = pager.apply(&ordered, 1);

    let visible: Vec<&Record> = page.items().iter().map(|&row| &records[row]).collect();
    assert_eq!(names(&visible), vec!["Amy", "Cy"]);
    assert_eq!(page.total_pages(), 1);
}

#[test]
fn test_pure_stages_are_idempotent() {
    let records = people();
    let schema = schema();
    let filters = FilterSet::new().with("status", Value::from("Active"));

    let first = filter::apply(&records, &schema, Some("all"), &filters, "y");
    let second = filter::apply(&records, &schema, Some("all"), &filters, "y");
    assert_eq!(first, second);

    let sort_state = SortState::desc("name");
    assert_eq!(
        sort::apply(&records, &first, &schema, Some(&sort_state)),
        sort::apply(&records, &second, &schema, Some(&sort_state)),
    );
}

// =============================================================================
// Through the controller
// =============================================================================

#[test]
fn test_filter_active_sorted_by_name() {
    let mut table = TableController::with_records(schema(), TableConfig::default(), people()).unwrap();
    table.set_filter("status", Value::from("Active"));
    table.apply_filters();
    table.set_sort("name");

    assert_eq!(names(&table.visible()), vec!["Amy", "Cy"]);
    assert_eq!(table.total_pages(), 1);
}

#[test]
fn test_descending_across_two_pages() {
    let config = TableConfig::default().with_page_size(2);
    let mut table = TableController::with_records(schema(), config, people()).unwrap();
    table.set_sort("name");
    table.set_sort("name");

    assert_eq!(names(&table.visible()), vec!["Cy", "Bo"]);
    assert_eq!(table.total_pages(), 2);

    table.set_page(2);
    assert_eq!(names(&table.visible()), vec!["Amy"]);
    assert_eq!(table.total_pages(), 2);
}

#[test]
fn test_tab_filter_and_search_combine() {
    let mut table = TableController::with_records(schema(), TableConfig::default(), people()).unwrap();
    assert!(table.set_tab("active"));
    assert_eq!(names(&table.visible()), vec!["Amy", "Cy"]);

    table.set_search_text("CY");
    assert_eq!(names(&table.visible()), vec!["Cy"]);

    table.set_filter("status", Value::from("Inactive"));
    table.apply_filters();
    assert!(table.visible().is_empty());
    assert_eq!(table.filtered_count(), 0);
}

#[test]
fn test_search_ignores_unsearchable_id() {
    let mut table = TableController::with_records(schema(), TableConfig::default(), people()).unwrap();
    table.set_search_text("2");
    assert!(table.visible().is_empty());
}

#[test]
fn test_sort_keeps_filtered_order_for_ties() {
    let records = vec![
        Record::new().set("id", 1).set("name", "Amy").set("status", "Active"),
        Record::new().set("id", 2).set("name", "amy").set("status", "Active"),
        Record::new().set("id", 3).set("name", "Amy").set("status", "Active"),
    ];
    let schema = TableSchema::<Record>::keyed_by_field("id")
        .column(Column::field("status", "Status").sortable())
        .build()
        .unwrap();
    let rows = vec![2, 0, 1];
    assert_eq!(
        sort::apply(&records, &rows, &schema, Some(&SortState::asc("status"))),
        rows
    );
    assert_eq!(
        sort::apply(&records, &rows, &schema, Some(&SortState::desc("status"))),
        rows
    );
}

#[test]
fn test_empty_records_yield_single_empty_page() {
    let table = TableController::with_records(schema(), TableConfig::default(), Vec::new()).unwrap();
    assert!(table.visible().is_empty());
    assert_eq!(table.current_page(), 1);
    assert_eq!(table.total_pages(), 1);
}
