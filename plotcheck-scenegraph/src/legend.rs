use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    /// Index of the labelled mark within its axes
    pub mark: usize,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub entries: Vec<LegendEntry>,
}

impl Legend {
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }

    /// Legend text shown for the mark at `mark`, if it has an entry
    pub fn label_for(&self, mark: usize) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.mark == mark)
            .map(|e| e.label.as_str())
    }
}
