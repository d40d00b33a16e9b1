use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::grid::RawGrid;
use crate::schema::ColumnSchema;

/// The deduplicated table of string literals found in string-valued cells,
/// with occurrence counts. The generator assigns interning indices from the
/// iteration order, so the order must be a pure function of the contents:
/// value ascending (byte-wise), count descending as the secondary key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StringLiteralTable {
    entries: Vec<(String, u64)>,
}

impl StringLiteralTable {
    /// Scan the content rows of `grid` and collect comma-separated values
    /// from every column whose processor is string-valued. Rows for which
    /// `is_comment_row` returns true contribute nothing.
    ///
    /// Splitting does not trim and does not drop empty tokens: a cell
    /// holding `a,,b` yields `a`, `` and `b`.
    pub fn build<F>(
        grid: &RawGrid,
        columns: &[ColumnSchema],
        content_start_row: usize,
        is_comment_row: F,
    ) -> Self
    where
        F: Fn(usize) -> bool,
    {
        let mut counts: HashMap<String, u64> = HashMap::new();

        for row in content_start_row..grid.row_count() {
            if is_comment_row(row) {
                continue;
            }
            for (col, schema) in columns.iter().enumerate() {
                if !schema.is_string_valued() {
                    continue;
                }
                for value in grid.cell(row, col).split(',') {
                    *counts.entry(value.to_string()).or_insert(0) += 1;
                }
            }
        }

        let mut entries: Vec<(String, u64)> = counts.into_iter().collect();
        // Keys are unique, so the count key never actually decides; it is
        // kept as an explicit secondary ordering all the same.
        entries.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

        debug!(literals = entries.len(), "built string literal table");
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(value, count)` pairs in interning order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(v, c)| (v.as_str(), *c))
    }

    /// The interning index the generator will assign to `value`.
    pub fn index_of(&self, value: &str) -> Option<usize> {
        self.entries
            .binary_search_by(|(v, _)| v.as_str().cmp(value))
            .ok()
    }
}
