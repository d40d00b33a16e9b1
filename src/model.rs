use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::grid::RawGrid;
use crate::intern::StringLiteralTable;
use crate::layout::LayoutSpec;
use crate::processor::ProcessorRegistry;
use crate::schema::{resolve_columns, ColumnSchema};

/// The finished, validated data-table model handed to the generator: the
/// normalized grid, the validated layout, one schema per column and the
/// interned string literal table. Immutable once built.
#[derive(Debug)]
pub struct DataTableModel {
    grid: RawGrid,
    layout: LayoutSpec,
    columns: Vec<ColumnSchema>,
    strings: StringLiteralTable,
    content_rows: Vec<usize>,
}

impl DataTableModel {
    /// One-call path: load the first sheet of the workbook at `path`, then
    /// [`compile`](Self::compile) it.
    pub fn load<P, F>(
        path: P,
        layout: LayoutSpec,
        registry: &ProcessorRegistry,
        is_comment_row: F,
    ) -> Result<Self>
    where
        P: AsRef<Path>,
        F: Fn(&RawGrid, usize) -> bool,
    {
        let grid = RawGrid::load_xlsx(path)?;
        Self::compile(grid, layout, registry, is_comment_row)
    }

    /// Validate `layout` against the grid, resolve every column against the
    /// registry, and build the string literal table. Any failure aborts
    /// construction; there is no partial model.
    pub fn compile<F>(
        grid: RawGrid,
        layout: LayoutSpec,
        registry: &ProcessorRegistry,
        is_comment_row: F,
    ) -> Result<Self>
    where
        F: Fn(&RawGrid, usize) -> bool,
    {
        layout.validate(&grid)?;
        let columns = resolve_columns(&grid, &layout, registry)?;

        let content_rows: Vec<usize> = (layout.content_start_row..grid.row_count())
            .filter(|&row| !is_comment_row(&grid, row))
            .collect();

        let strings = StringLiteralTable::build(&grid, &columns, layout.content_start_row, |row| {
            is_comment_row(&grid, row)
        });

        info!(
            columns = columns.len(),
            content_rows = content_rows.len(),
            literals = strings.len(),
            "compiled data table model"
        );

        Ok(Self {
            grid,
            layout,
            columns,
            strings,
            content_rows,
        })
    }

    pub fn content_start_row(&self) -> usize {
        self.layout.content_start_row
    }

    pub fn id_column(&self) -> usize {
        self.layout.id_column
    }

    pub fn layout(&self) -> &LayoutSpec {
        &self.layout
    }

    pub fn grid(&self) -> &RawGrid {
        &self.grid
    }

    pub fn columns(&self) -> &[ColumnSchema] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn strings(&self) -> &StringLiteralTable {
        &self.strings
    }

    /// Data-bearing rows in order: every row at or after the content start
    /// that the comment predicate did not exclude.
    pub fn content_rows(&self) -> impl Iterator<Item = (usize, &[String])> {
        self.content_rows.iter().map(|&row| (row, self.grid.row(row)))
    }
}

/// The stock comment-row policy: a row is a comment when its id-column cell
/// starts with `marker`. Kept as a constructor rather than a hardcoded rule
/// so callers with a different convention can supply their own predicate.
pub fn marker_comment_predicate(
    id_column: usize,
    marker: char,
) -> impl Fn(&RawGrid, usize) -> bool {
    move |grid, row| grid.cell(row, id_column).starts_with(marker)
}
