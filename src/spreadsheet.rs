//! Reads single rows out of an Excel workbook by column letter.

use calamine::{Reader, open_workbook_auto};
use regex::Regex;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::extract::cell_text;

/// Column references such as `A`, `Q`, `AB` (up to Excel's `XFD`).
const COLUMN_PATTERN: &str = r"^[A-Za-z]{1,3}$";

/// Highest column index Excel supports (`XFD`, 0-based).
const MAX_COLUMN_INDEX: u32 = 16_383;

#[derive(Debug, Error)]
pub enum SpreadsheetError {
    #[error("workbook not found: {}", .0.display())]
    WorkbookNotFound(PathBuf),
    #[error("sheet not found: {sheet} (available: {available:?})")]
    SheetNotFound {
        sheet: String,
        available: Vec<String>,
    },
    #[error("invalid column reference: {0:?}")]
    InvalidColumn(String),
    #[error("invalid row number {0}, rows start at 1")]
    InvalidRow(u32),
    #[error(transparent)]
    Pattern(#[from] regex::Error),
    #[error("failed to open workbook {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },
}

/// Converts a column reference to a 0-based index (`A` → 0, `AA` → 26).
pub fn column_index(letters: &str) -> Result<u32, SpreadsheetError> {
    let column_regex = Regex::new(COLUMN_PATTERN)?;
    if !column_regex.is_match(letters) {
        return Err(SpreadsheetError::InvalidColumn(letters.to_string()));
    }

    let index = letters
        .bytes()
        .map(|b| u32::from(b.to_ascii_uppercase() - b'A') + 1)
        .fold(0u32, |acc, digit| acc * 26 + digit)
        - 1;

    if index > MAX_COLUMN_INDEX {
        return Err(SpreadsheetError::InvalidColumn(letters.to_string()));
    }
    Ok(index)
}

/// Reads `columns` at 1-based `row` of `sheet_name`.
///
/// Returns one string per requested column, `""` for empty cells, in request
/// order.
pub fn read_cells<S: AsRef<str>>(
    file_path: &Path,
    sheet_name: &str,
    row: u32,
    columns: &[S],
) -> Result<Vec<String>, SpreadsheetError> {
    if row == 0 {
        return Err(SpreadsheetError::InvalidRow(row));
    }
    let indices = columns
        .iter()
        .map(|c| column_index(c.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    if !file_path.is_file() {
        return Err(SpreadsheetError::WorkbookNotFound(file_path.to_path_buf()));
    }

    let mut workbook = open_workbook_auto(file_path).map_err(|source| SpreadsheetError::Open {
        path: file_path.to_path_buf(),
        source,
    })?;

    let available = workbook.sheet_names();
    if !available.iter().any(|name| name == sheet_name) {
        return Err(SpreadsheetError::SheetNotFound {
            sheet: sheet_name.to_string(),
            available,
        });
    }

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|source| SpreadsheetError::Open {
            path: file_path.to_path_buf(),
            source,
        })?;

    let values = indices
        .into_iter()
        .map(|col| cell_text(range.get_value((row - 1, col))))
        .collect();

    tracing::debug!(
        "Read row {} of {} from {}",
        row,
        sheet_name,
        file_path.display()
    );
    Ok(values)
}
