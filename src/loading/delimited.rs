//! CSV reader.

use super::{assemble, CsvOptions, Shaping};
use crate::data::{Cell, Table};
use crate::error::{HypothesisError, Result};
use std::path::Path;

pub(super) fn read_csv(path: &Path, options: &CsvOptions) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.sep)
        .has_headers(options.names.is_none())
        .flexible(true)
        .from_path(path)
        .map_err(|e| HypothesisError::load(path, format!("Failed to open CSV: {e}")))?;

    let headers: Vec<String> = match &options.names {
        Some(names) => names.clone(),
        None => reader
            .headers()
            .map_err(|e| HypothesisError::load(path, format!("Failed to read headers: {e}")))?
            .iter()
            .map(str::to_string)
            .collect(),
    };

    let mut rows = Vec::new();
    // line 1 is the header unless names were supplied
    let first_line = if options.names.is_some() { 1 } else { 2 };
    for (i, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            HypothesisError::load(path, format!("Failed to read line {}: {e}", first_line + i))
        })?;
        rows.push(record.iter().map(|f| Cell::Text(f.to_string())).collect());
    }
    tracing::debug!(path = %path.display(), rows = rows.len(), "CSV records read");

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
