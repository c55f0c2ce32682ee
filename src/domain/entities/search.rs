use crate::domain::entities::row::Row;

/// A case-insensitive substring query over every cell of a row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    pub fn new(text: &str) -> Self {
        Self {
            needle: text.to_lowercase(),
        }
    }

    pub fn matches(&self, row: &Row) -> bool {
        // an empty query is a substring of anything, including a row with no cells
        if self.needle.is_empty() {
            return true;
        }
        row.values()
            .any(|value| value.to_lowercase().contains(&self.needle))
    }
}

impl From<&str> for SearchQuery {
    fn from(value: &str) -> Self {
        SearchQuery::new(value)
    }
}
