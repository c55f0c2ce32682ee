use crate::domain::entities::row::RowId;
use crate::domain::entities::search::SearchQuery;
use crate::domain::entities::table::TableStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRow {
    pub id: RowId,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<ViewRow>,
    pub total_rows: usize,
}

/// Derives the displayed table: canonical columns and the rows matching `query`.
///
/// Cells are aligned to the first row's columns; a missing key renders empty.
pub fn table_view(store: &TableStore, query: &str) -> TableView {
    let columns = store.columns();
    let query = SearchQuery::new(query);
    let rows = store
        .filter(&query)
        .map(|stored| ViewRow {
            id: stored.id,
            cells: columns
                .iter()
                .map(|column| stored.row.get(column).unwrap_or("").to_string())
                .collect(),
        })
        .collect();

    TableView {
        columns,
        rows,
        total_rows: store.len(),
    }
}
