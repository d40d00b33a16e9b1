use serde::{Deserialize, Serialize};

use crate::error::{Result, SheetError};
use crate::grid::RawGrid;

/// The caller-supplied row/column indices describing where a table's
/// metadata lives inside the grid. All indices are 0-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSpec {
    pub name_row: usize,
    pub type_row: usize,
    pub default_value_row: Option<usize>,
    pub comment_row: Option<usize>,
    pub content_start_row: usize,
    pub id_column: usize,
}

impl LayoutSpec {
    /// Check every index against the grid's actual dimensions, in a fixed
    /// order. `content_start_row == row_count` is allowed and means the
    /// table has no content rows. The metadata rows are deliberately not
    /// checked for distinctness; overlapping rows are the caller's business.
    pub fn validate(&self, grid: &RawGrid) -> Result<()> {
        let row_count = grid.row_count();
        let column_count = grid.column_count();

        if self.name_row >= row_count {
            return Err(SheetError::IndexOutOfRange {
                what: "name row",
                value: self.name_row,
                bound: row_count,
            });
        }
        if self.type_row >= row_count {
            return Err(SheetError::IndexOutOfRange {
                what: "type row",
                value: self.type_row,
                bound: row_count,
            });
        }
        if let Some(row) = self.default_value_row {
            if row >= row_count {
                return Err(SheetError::IndexOutOfRange {
                    what: "default value row",
                    value: row,
                    bound: row_count,
                });
            }
        }
        if let Some(row) = self.comment_row {
            if row >= row_count {
                return Err(SheetError::IndexOutOfRange {
                    what: "comment row",
                    value: row,
                    bound: row_count,
                });
            }
        }
        if self.content_start_row > row_count {
            return Err(SheetError::IndexOutOfRange {
                what: "content start row",
                value: self.content_start_row,
                bound: row_count,
            });
        }
        if self.id_column >= column_count {
            return Err(SheetError::IndexOutOfRange {
                what: "id column",
                value: self.id_column,
                bound: column_count,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: usize, cols: usize) -> RawGrid {
        RawGrid::from_rows(vec![vec![String::from("x"); cols]; rows])
    }

    fn layout() -> LayoutSpec {
        LayoutSpec {
            name_row: 0,
            type_row: 1,
            default_value_row: None,
            comment_row: None,
            content_start_row: 2,
            id_column: 0,
        }
    }

    #[test]
    fn accepts_indices_within_bounds() {
        let spec = LayoutSpec {
            default_value_row: Some(2),
            comment_row: Some(3),
            content_start_row: 4,
            ..layout()
        };
        assert!(spec.validate(&grid(4, 3)).is_ok());
    }

    #[test]
    fn rejects_name_row_at_row_count() {
        let spec = LayoutSpec {
            name_row: 4,
            ..layout()
        };
        let err = spec.validate(&grid(4, 3)).unwrap_err();
        assert!(
            matches!(
                err,
                SheetError::IndexOutOfRange {
                    what: "name row",
                    value: 4,
                    bound: 4,
                }
            ),
            "{err}"
        );
    }

    #[test]
    fn rejects_type_row_out_of_range() {
        let spec = LayoutSpec {
            type_row: 9,
            ..layout()
        };
        assert!(matches!(
            spec.validate(&grid(4, 3)).unwrap_err(),
            SheetError::IndexOutOfRange {
                what: "type row",
                ..
            }
        ));
    }

    #[test]
    fn rejects_optional_rows_out_of_range() {
        let spec = LayoutSpec {
            default_value_row: Some(4),
            ..layout()
        };
        assert!(matches!(
            spec.validate(&grid(4, 3)).unwrap_err(),
            SheetError::IndexOutOfRange {
                what: "default value row",
                ..
            }
        ));

        let spec = LayoutSpec {
            comment_row: Some(7),
            ..layout()
        };
        assert!(matches!(
            spec.validate(&grid(4, 3)).unwrap_err(),
            SheetError::IndexOutOfRange {
                what: "comment row",
                ..
            }
        ));
    }

    #[test]
    fn content_start_row_may_equal_row_count() {
        let spec = LayoutSpec {
            content_start_row: 4,
            ..layout()
        };
        assert!(spec.validate(&grid(4, 3)).is_ok());

        let spec = LayoutSpec {
            content_start_row: 5,
            ..layout()
        };
        assert!(matches!(
            spec.validate(&grid(4, 3)).unwrap_err(),
            SheetError::IndexOutOfRange {
                what: "content start row",
                ..
            }
        ));
    }

    #[test]
    fn rejects_id_column_out_of_range() {
        let spec = LayoutSpec {
            id_column: 3,
            ..layout()
        };
        assert!(matches!(
            spec.validate(&grid(4, 3)).unwrap_err(),
            SheetError::IndexOutOfRange {
                what: "id column",
                value: 3,
                bound: 3,
            }
        ));
    }

    #[test]
    fn overlapping_metadata_rows_are_allowed() {
        let spec = LayoutSpec {
            name_row: 0,
            type_row: 0,
            default_value_row: Some(0),
            comment_row: Some(0),
            content_start_row: 0,
            id_column: 0,
        };
        assert!(spec.validate(&grid(1, 1)).is_ok());
    }
}
