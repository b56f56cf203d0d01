//! Plain-text rendering of a table's visible slice.

use std::fmt::Write;

use datatable_lib::{Record, TableController, TableStatus};

/// Render the header, the current page and a footer.
///
/// Cells are tab-separated; selected rows are marked with `*`.
pub fn render(table: &TableController<Record>) -> String {
    let mut out = String::new();
    let columns = table.schema().columns();

    let header: Vec<&str> = columns.iter().map(|c| c.header.as_str()).collect();
    let _ = writeln!(out, " \t{}", header.join("\t"));

    let keys = table.visible_keys();
    for (record, key) in table.visible().into_iter().zip(keys) {
        let marker = if table.is_selected(key) { "*" } else { " " };
        let cells: Vec<String> = columns
            .iter()
            .map(|c| c.value(record).to_string().replace(['\t', '\n'], " "))
            .collect();
        let _ = writeln!(out, "{}\t{}", marker, cells.join("\t"));
    }

    let _ = match table.status() {
        TableStatus::NoRecords => writeln!(out, "no records loaded"),
        TableStatus::NoMatches => writeln!(
            out,
            "no matching records ({} total, {} selected)",
            table.total_count(),
            table.selection_count()
        ),
        TableStatus::Ready => writeln!(
            out,
            "page {}/{}, {} matching of {}, {} selected",
            table.current_page(),
            table.total_pages(),
            table.filtered_count(),
            table.total_count(),
            table.selection_count()
        ),
    };
    out
}
