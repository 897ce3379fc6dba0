//! Category counting
//!
//! Every chart on the dashboard is driven by the same operation: count the
//! rows of a table per value of one categorical column.

use std::collections::HashMap;

use serde::Serialize;

/// Label used for rows whose category is empty or missing
pub const MISSING_LABEL: &str = "Não informado";

/// A single category with its row count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

/// Row counts per category, most frequent first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    entries: Vec<CategoryCount>,
}

impl CategoryCounts {
    pub fn entries(&self) -> &[CategoryCount] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts (equals the number of rows counted)
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.label.clone()).collect()
    }

    pub fn counts(&self) -> Vec<usize> {
        self.entries.iter().map(|e| e.count).collect()
    }

    /// Count for a given label (0 when absent)
    pub fn get(&self, label: &str) -> usize {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.count)
            .unwrap_or(0)
    }

    /// The `n` most frequent categories
    pub fn top(&self, n: usize) -> &[CategoryCount] {
        &self.entries[..n.min(self.entries.len())]
    }
}

/// Count rows per category.
///
/// Ordering is by descending count; categories with equal counts keep the
/// order in which they first appear. `None` values are counted under
/// [`MISSING_LABEL`], so the counts always sum to the number of input values.
pub fn value_counts<'a, I>(values: I) -> CategoryCounts
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<CategoryCount> = Vec::new();

    for value in values {
        let label = value.unwrap_or(MISSING_LABEL);
        match index.get(label) {
            Some(&i) => entries[i].count += 1,
            None => {
                index.insert(label, entries.len());
                entries.push(CategoryCount {
                    label: label.to_string(),
                    count: 1,
                });
            }
        }
    }

    // Stable sort keeps first-appearance order among ties
    entries.sort_by(|a, b| b.count.cmp(&a.count));

    CategoryCounts { entries }
}
