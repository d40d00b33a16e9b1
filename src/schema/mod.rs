use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::error::{Result, SheetError};
use crate::grid::RawGrid;
use crate::layout::LayoutSpec;
use crate::processor::{ProcessorRegistry, ValueProcessor};

/// One resolved column: its metadata from the header rows plus the processor
/// bound to it. The processor is shared with the registry that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnSchema {
    pub name: String,
    pub type_keyword: String,
    pub default_value: Option<String>,
    pub comment: Option<String>,
    pub processor: Arc<ValueProcessor>,
}

impl ColumnSchema {
    pub fn is_string_valued(&self) -> bool {
        self.processor.is_string_valued()
    }
}

/// Resolve every column of the grid against the registry.
///
/// The column at `layout.id_column` always binds the `id` processor, whatever
/// its type row declares; every other column binds the processor registered
/// under its declared keyword.
pub fn resolve_columns(
    grid: &RawGrid,
    layout: &LayoutSpec,
    registry: &ProcessorRegistry,
) -> Result<Vec<ColumnSchema>> {
    let mut columns = Vec::with_capacity(grid.column_count());

    for i in 0..grid.column_count() {
        let declared = grid.cell(layout.type_row, i);
        let keyword = if i == layout.id_column { "id" } else { declared };

        let processor =
            registry
                .lookup(keyword)
                .ok_or_else(|| SheetError::UnknownTypeKeyword {
                    keyword: keyword.to_string(),
                    column: i,
                })?;

        columns.push(ColumnSchema {
            name: grid.cell(layout.name_row, i).to_string(),
            type_keyword: declared.to_string(),
            default_value: layout
                .default_value_row
                .map(|row| grid.cell(row, i).to_string()),
            comment: layout.comment_row.map(|row| grid.cell(row, i).to_string()),
            processor: Arc::clone(processor),
        });
    }

    debug!(columns = columns.len(), "resolved column schemas");
    Ok(columns)
}
