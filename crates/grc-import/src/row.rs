//! Already-parsed sheet rows.

use serde::{Deserialize, Serialize};

/// One sheet row as an ordered heading → cell mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    cells: Vec<(String, String)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zip a header line with a value line. Extra values without a heading
    /// are dropped, missing trailing values read as empty.
    pub fn from_lines<H, V>(headers: &[H], values: &[V]) -> Self
    where
        H: AsRef<str>,
        V: AsRef<str>,
    {
        let cells = headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let value: &str = values.get(i).map_or("", |v| v.as_ref());
                (h.as_ref().to_string(), value.to_string())
            })
            .collect();
        Self { cells }
    }

    /// Builder-style cell insertion; a repeated heading replaces the earlier value.
    #[must_use]
    pub fn with(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        let label = label.into();
        let value = value.into();
        if let Some(cell) = self.cells.iter_mut().find(|(l, _)| *l == label) {
            cell.1 = value;
        } else {
            self.cells.push((label, value));
        }
        self
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(l, _)| l.as_str())
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, v)| v.trim().is_empty())
    }
}

impl<L: Into<String>, V: Into<String>> FromIterator<(L, V)> for Row {
    fn from_iter<T: IntoIterator<Item = (L, V)>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Self::new(), |row, (label, value)| row.with(label, value))
    }
}
