use thiserror::Error;
use tracing::debug;

use crate::domain::entities::edit::{EditBuffer, NewRowBuffer};
use crate::domain::entities::row::{Row, RowId};
use crate::domain::entities::search::SearchQuery;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("row {0} no longer exists")]
    RowNotFound(RowId),
    #[error("no row is being edited")]
    NoActiveEdit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRow {
    pub id: RowId,
    pub row: Row,
}

/// The authoritative rows plus the edit and new-row buffers.
///
/// Rows are addressed by [`RowId`], assigned when a row enters the store and
/// never reused, so a filtered view can refer to rows without translating
/// positions.
#[derive(Debug, Clone, Default)]
pub struct TableStore {
    rows: Vec<StoredRow>,
    next_id: u64,
    editing: Option<EditBuffer>,
    new_row: NewRowBuffer,
}

impl TableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, rows: Vec<Row>) {
        let mut stored = Vec::with_capacity(rows.len());
        for row in rows {
            let id = self.allocate_id();
            stored.push(StoredRow { id, row });
        }
        self.rows = stored;
        self.editing = None;
        debug!(row_count = self.rows.len(), "table replaced");
    }

    pub fn rows(&self) -> &[StoredRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, id: RowId) -> Option<&Row> {
        self.position(id).map(|idx| &self.rows[idx].row)
    }

    /// Column names taken from the first row.
    pub fn columns(&self) -> Vec<String> {
        self.rows
            .first()
            .map(|first| first.row.keys().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn filter<'a>(&'a self, query: &SearchQuery) -> impl Iterator<Item = &'a StoredRow> + 'a {
        let query = query.clone();
        self.rows.iter().filter(move |stored| query.matches(&stored.row))
    }

    pub fn editing(&self) -> Option<&EditBuffer> {
        self.editing.as_ref()
    }

    pub fn is_editing(&self, id: RowId) -> bool {
        self.editing.as_ref().is_some_and(|edit| edit.row_id == id)
    }

    /// Opens a row for editing, discarding any edit already in progress.
    pub fn begin_edit(&mut self, id: RowId) -> Result<(), TableError> {
        let row = self.get(id).cloned().ok_or(TableError::RowNotFound(id))?;
        if let Some(previous) = self.editing.replace(EditBuffer { row_id: id, row }) {
            if previous.row_id != id {
                debug!(discarded = %previous.row_id, "edit replaced");
            }
        }
        debug!(row = %id, "edit started");
        Ok(())
    }

    pub fn update_edit_field(&mut self, key: &str, value: &str) -> Result<(), TableError> {
        let edit = self.editing.as_mut().ok_or(TableError::NoActiveEdit)?;
        edit.row.set(key, value);
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Writes the edit buffer back to its row and closes the edit.
    pub fn commit_edit(&mut self) -> Result<RowId, TableError> {
        let row_id = self
            .editing
            .as_ref()
            .map(|edit| edit.row_id)
            .ok_or(TableError::NoActiveEdit)?;
        let position = self.position(row_id).ok_or(TableError::RowNotFound(row_id))?;
        if let Some(edit) = self.editing.take() {
            self.rows[position].row = edit.row;
        }
        debug!(row = %row_id, "edit committed");
        Ok(row_id)
    }

    pub fn delete_row(&mut self, id: RowId) -> Result<Row, TableError> {
        let position = self.position(id).ok_or(TableError::RowNotFound(id))?;
        let removed = self.rows.remove(position);
        if self.is_editing(id) {
            self.editing = None;
        }
        debug!(row = %id, remaining = self.rows.len(), "row deleted");
        Ok(removed.row)
    }

    pub fn new_row(&self) -> &NewRowBuffer {
        &self.new_row
    }

    pub fn update_new_row_field(&mut self, key: &str, value: &str) {
        self.new_row.values.set(key, value);
    }

    pub fn append_new_row(&mut self) -> RowId {
        let columns = self.columns();
        let row = self.new_row.build_row(&columns);
        let id = self.allocate_id();
        self.rows.push(StoredRow { id, row });
        self.new_row.values.clear();
        debug!(row = %id, total = self.rows.len(), "row appended");
        id
    }

    fn position(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|stored| stored.id == id)
    }

    fn allocate_id(&mut self) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        id
    }
}
