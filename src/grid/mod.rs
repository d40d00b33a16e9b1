use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};
use tracing::debug;

use crate::error::{Result, SheetError};

/// The normalized, rectangular in-memory copy of a workbook's first sheet.
///
/// Every row holds exactly `column_count` cells; cells the source never
/// populated are empty strings. Built once, immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawGrid {
    rows: Vec<Vec<String>>,
    column_count: usize,
}

impl RawGrid {
    /// Open `path`, read the first sheet and normalize it into a grid.
    ///
    /// The workbook handle is scoped to this call and released before
    /// returning, on success and failure alike.
    #[tracing::instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_xlsx<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let name = path.to_string_lossy();
        if name.is_empty() {
            return Err(SheetError::InvalidArgument(
                "data table file name is empty".to_string(),
            ));
        }
        if path.extension().and_then(|e| e.to_str()) != Some("xlsx") {
            return Err(SheetError::InvalidArgument(format!(
                "data table file `{}` is not an .xlsx workbook",
                name
            )));
        }
        if !path.exists() {
            return Err(SheetError::SourceNotFound(path.to_path_buf()));
        }

        let mut workbook: Xlsx<_> =
            open_workbook(path).map_err(|e: calamine::XlsxError| SheetError::SourceRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| SheetError::SourceRead {
                path: path.to_path_buf(),
                reason: "workbook has no sheets".to_string(),
            })?
            .map_err(|e| SheetError::SourceRead {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        // Sheet coordinates are absolute: a sheet whose data starts at B2
        // still yields row/column indices counted from A1, matching how the
        // layout indices are specified.
        let (last_row, last_col) = match range.end() {
            Some(end) => end,
            None => {
                debug!("first sheet is empty");
                return Ok(Self {
                    rows: Vec::new(),
                    column_count: 0,
                });
            }
        };

        let row_count = last_row as usize + 1;

        // Column count comes from the last populated cell of the *last* row.
        let mut column_count = 0usize;
        for col in 0..=last_col {
            match range.get_value((last_row, col)) {
                None | Some(Data::Empty) => {}
                Some(_) => column_count = col as usize + 1,
            }
        }

        let mut rows = Vec::with_capacity(row_count);
        for r in 0..row_count {
            let mut row = Vec::with_capacity(column_count);
            for c in 0..column_count {
                let text = match range.get_value((r as u32, c as u32)) {
                    None => String::new(),
                    Some(cell) => cell_text(cell),
                };
                row.push(text);
            }
            rows.push(row);
        }

        debug!(rows = row_count, columns = column_count, "loaded grid");
        Ok(Self { rows, column_count })
    }

    /// Build a grid from in-memory rows, applying the same normalization as
    /// the workbook loader: trailing all-empty rows are dropped, the column
    /// count is the cell count of the last remaining row, and every row is
    /// padded or truncated to that width.
    pub fn from_rows(mut rows: Vec<Vec<String>>) -> Self {
        while rows
            .last()
            .is_some_and(|row| row.iter().all(|cell| cell.is_empty()))
        {
            rows.pop();
        }

        let column_count = rows.last().map_or(0, |row| row.len());
        for row in &mut rows {
            row.resize(column_count, String::new());
        }

        Self { rows, column_count }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Cell text at `(row, col)`. Panics if either index is out of bounds;
    /// callers index only through validated layouts.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        &self.rows[row][col]
    }

    pub fn row(&self, row: usize) -> &[String] {
        &self.rows[row]
    }
}

/// Render one cell the way the downstream generator expects: numbers without
/// a trailing `.0` when integral, booleans uppercased, everything else via
/// its natural textual form.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => format_float(*f),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::DateTime(dt) => format_float(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
    }
}

fn format_float(f: f64) -> String {
    if f == f.trunc() && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn rows(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn from_rows_pads_and_truncates_to_last_row_width() {
        let grid = RawGrid::from_rows(rows(&[
            &["a"],
            &["a", "b", "c", "d"],
            &["a", "b", "c"],
        ]));

        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.column_count(), 3);
        // Short row padded with empty strings.
        assert_eq!(grid.row(0), &["a", "", ""]);
        // Wide row truncated.
        assert_eq!(grid.row(1), &["a", "b", "c"]);
    }

    #[test]
    fn from_rows_drops_trailing_empty_rows() {
        let grid = RawGrid::from_rows(rows(&[&["a", "b"], &["", ""], &[""]]));
        assert_eq!(grid.row_count(), 1);
        assert_eq!(grid.column_count(), 2);
    }

    #[test]
    fn from_rows_empty_input_is_empty_grid() {
        let grid = RawGrid::from_rows(Vec::new());
        assert_eq!(grid.row_count(), 0);
        assert_eq!(grid.column_count(), 0);
    }

    #[test]
    fn load_rejects_wrong_extension() {
        let err = RawGrid::load_xlsx("tables/items.csv").unwrap_err();
        assert!(matches!(err, SheetError::InvalidArgument(_)), "{err}");
    }

    #[test]
    fn load_rejects_empty_name() {
        let err = RawGrid::load_xlsx("").unwrap_err();
        assert!(matches!(err, SheetError::InvalidArgument(_)), "{err}");
    }

    #[test]
    fn load_rejects_missing_file() {
        let err = RawGrid::load_xlsx("does/not/exist.xlsx").unwrap_err();
        assert!(matches!(err, SheetError::SourceNotFound(_)), "{err}");
    }

    #[test]
    fn load_rejects_malformed_container() {
        let mut tmp = Builder::new().suffix(".xlsx").tempfile().unwrap();
        tmp.write_all(b"this is not a zip archive").unwrap();
        tmp.flush().unwrap();

        let err = RawGrid::load_xlsx(tmp.path()).unwrap_err();
        assert!(matches!(err, SheetError::SourceRead { .. }), "{err}");
    }
}
