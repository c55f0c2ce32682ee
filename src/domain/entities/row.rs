#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub u64);

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An ordered mapping from column name to cell value.
///
/// Key order is the order in which keys were first inserted. Setting an
/// existing key keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<(String, String)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.cells.iter().position(|(name, _)| *name == key) {
            Some(idx) => self.cells[idx].1 = value,
            None => self.cells.push((key, value)),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (key, value) in iter {
            row.set(key, value);
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_existing_key_keeps_position() {
        let mut row: Row = [("name", "Ann"), ("age", "30")].into_iter().collect();
        row.set("name", "Annie");

        assert_eq!(row.keys().collect::<Vec<_>>(), vec!["name", "age"]);
        assert_eq!(row.get("name"), Some("Annie"));
    }

    #[test]
    fn set_new_key_appends() {
        let mut row: Row = [("name", "Ann")].into_iter().collect();
        row.set("city", "Oslo");

        assert_eq!(row.values().collect::<Vec<_>>(), vec!["Ann", "Oslo"]);
        assert_eq!(row.get("missing"), None);
    }
}
