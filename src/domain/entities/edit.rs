use crate::domain::entities::row::{Row, RowId};

/// The one row currently open for in-place editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    pub row_id: RowId,
    pub row: Row,
}

/// Scratch values for the row being composed for append.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewRowBuffer {
    pub values: Row,
}

impl NewRowBuffer {
    pub fn value(&self, key: &str) -> &str {
        self.values.get(key).unwrap_or("")
    }

    /// Builds the row to append: `columns` in order, then any extra keys.
    pub fn build_row(&self, columns: &[String]) -> Row {
        let mut row = Row::new();
        for column in columns {
            row.set(column.as_str(), self.value(column));
        }
        for (key, value) in self.values.iter() {
            if !columns.iter().any(|column| column == key) {
                row.set(key, value);
            }
        }
        row
    }
}
