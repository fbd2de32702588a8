//! Excel (`.xlsx`) reader.

use super::{assemble, ExcelOptions, SheetSelector, Shaping};
use crate::data::{Cell, Table};
use crate::error::{HypothesisError, Result};
use calamine::{open_workbook, Data, Reader, Xlsx};
use std::path::Path;

fn to_cell(value: &Data) -> Cell {
    match value {
        Data::Empty => Cell::Empty,
        Data::Int(i) => Cell::Int(*i),
        Data::Float(x) if x.is_nan() => Cell::Empty,
        Data::Float(x) => Cell::Float(*x),
        Data::Bool(b) => Cell::Bool(*b),
        Data::String(s) => Cell::Text(s.clone()),
        other => Cell::Text(other.to_string()),
    }
}

pub(super) fn read_excel(path: &Path, options: &ExcelOptions) -> Result<Table> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .map_err(|e| HypothesisError::load(path, format!("Failed to open workbook: {e}")))?;

    let range = match &options.sheet {
        SheetSelector::Index(i) => workbook
            .worksheet_range_at(*i)
            .ok_or_else(|| HypothesisError::load(path, format!("Workbook has no sheet {i}")))?,
        SheetSelector::Name(name) => workbook.worksheet_range(name),
    }
    .map_err(|e| HypothesisError::load(path, format!("Failed to read sheet: {e}")))?;

    let mut rows = range.rows();
    // header row; an empty sheet yields an empty table
    let headers: Vec<String> = rows
        .next()
        .map(|header| header.iter().map(ToString::to_string).collect())
        .unwrap_or_default();
    let rows: Vec<Vec<Cell>> = rows.map(|row| row.iter().map(to_cell).collect()).collect();
    tracing::debug!(path = %path.display(), rows = rows.len(), "worksheet rows read");

    assemble(
        headers,
        rows,
        &Shaping {
            usecols: options.usecols.as_deref(),
            index_col: options.index_col.as_ref(),
            dtype: options.dtype.as_ref(),
        },
    )
}
