//! sheetc — compile a spreadsheet into a validated, typed data-table model.
//!
//! A workbook's first sheet encodes column metadata (name row, type row,
//! optional default-value and comment rows) above row-wise records. This
//! crate normalizes the sheet into a rectangular grid, validates the caller's
//! layout indices against it, binds a value processor to every column and
//! builds the deduplicated string literal table a downstream code/data
//! generator interns from. Rendering output code and per-type value parsing
//! stay with that generator.

pub mod error;
pub mod grid;
pub mod intern;
pub mod layout;
pub mod model;
pub mod processor;
pub mod schema;

pub use error::{Result, SheetError};
pub use grid::RawGrid;
pub use intern::StringLiteralTable;
pub use layout::LayoutSpec;
pub use model::{marker_comment_predicate, DataTableModel};
pub use processor::{ProcessorRegistry, ValueProcessor};
pub use schema::{resolve_columns, ColumnSchema};
