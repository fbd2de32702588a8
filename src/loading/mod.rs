//! Table loading from CSV and Excel files.
//!
//! [`DataLoader`] reads a file into a [`Table`] and keeps the most recent one
//! for [`DataLoader::get`]. The file extension is checked against the
//! requested format before anything is read. Every failure after that point
//! (I/O, parsing, a `dtype` cast, a missing column) is reported as
//! [`HypothesisError::Load`] naming the file.
//!
//! # Example
//!
//! ```no_run
//! use hypotest::loading::{CsvOptions, DataLoader};
//!
//! let mut loader = DataLoader::new();
//! let table = loader
//!     .load_csv("measurements.csv", CsvOptions::default())
//!     .expect("readable CSV");
//! let weights = table.numeric("weight").expect("numeric column");
//! ```

mod delimited;
mod workbook;

use crate::data::{Cell, Column, ColumnType, Table};
use crate::error::{HypothesisError, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableFormat {
    /// Delimited text, extension `.csv`.
    Csv,
    /// Excel workbook, extension `.xlsx`.
    Excel,
}

impl TableFormat {
    /// File extension, including the dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => ".csv",
            Self::Excel => ".xlsx",
        }
    }

    fn extension_error(self) -> &'static str {
        match self {
            Self::Csv => "File should be in CSV format.",
            Self::Excel => "File should be in Excel (.xlsx) format.",
        }
    }
}

/// Picks a column by header name or by zero-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSelector {
    /// Header name.
    Name(String),
    /// Zero-based position.
    Position(usize),
}

impl From<&str> for ColumnSelector {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<usize> for ColumnSelector {
    fn from(position: usize) -> Self {
        Self::Position(position)
    }
}

/// Picks a worksheet by name or zero-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetSelector {
    /// Sheet name.
    Name(String),
    /// Zero-based position.
    Index(usize),
}

impl Default for SheetSelector {
    fn default() -> Self {
        Self::Index(0)
    }
}

/// Options for [`DataLoader::load_csv`].
#[derive(Debug, Clone, PartialEq)]
pub struct CsvOptions {
    /// Field delimiter. Default `b','`.
    pub sep: u8,
    /// Columns to keep, by header name or file position. `None` keeps all.
    pub usecols: Option<Vec<ColumnSelector>>,
    /// Column names to use instead of a header row. When set, the first line
    /// is data.
    pub names: Option<Vec<String>>,
    /// Column (among those kept) to move into the table index. `None` means
    /// no index.
    pub index_col: Option<ColumnSelector>,
    /// Forced column types by name. Unlisted columns are inferred per cell.
    pub dtype: Option<BTreeMap<String, ColumnType>>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            sep: b',',
            usecols: None,
            names: None,
            index_col: None,
            dtype: None,
        }
    }
}

/// Options for [`DataLoader::load_excel`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExcelOptions {
    /// Worksheet to read. Default: the first sheet.
    pub sheet: SheetSelector,
    /// Columns to keep, by header name or sheet position. `None` keeps all.
    pub usecols: Option<Vec<ColumnSelector>>,
    /// Column (among those kept) to move into the table index.
    pub index_col: Option<ColumnSelector>,
    /// Forced column types by name.
    pub dtype: Option<BTreeMap<String, ColumnType>>,
}

/// Format-specific options for [`DataLoader::load`].
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOptions {
    /// Options for a CSV file.
    Csv(CsvOptions),
    /// Options for an Excel workbook.
    Excel(ExcelOptions),
}

impl LoadOptions {
    /// Default options for `format`.
    #[must_use]
    pub fn default_for(format: TableFormat) -> Self {
        match format {
            TableFormat::Csv => Self::Csv(CsvOptions::default()),
            TableFormat::Excel => Self::Excel(ExcelOptions::default()),
        }
    }

    /// Format these options apply to.
    #[must_use]
    pub fn format(&self) -> TableFormat {
        match self {
            Self::Csv(_) => TableFormat::Csv,
            Self::Excel(_) => TableFormat::Excel,
        }
    }
}

impl From<CsvOptions> for LoadOptions {
    fn from(options: CsvOptions) -> Self {
        Self::Csv(options)
    }
}

impl From<ExcelOptions> for LoadOptions {
    fn from(options: ExcelOptions) -> Self {
        Self::Excel(options)
    }
}

/// Loads tables and remembers the most recent one.
#[derive(Debug, Default)]
pub struct DataLoader {
    data: Option<Table>,
}

impl DataLoader {
    /// Creates a loader with nothing loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `path` as `format`.
    ///
    /// # Errors
    ///
    /// - validation error if the extension does not match `format`, or if
    ///   `options` are for a different format
    /// - [`HypothesisError::Load`] for any failure while reading the file
    pub fn load(
        &mut self,
        path: impl AsRef<Path>,
        format: TableFormat,
        options: LoadOptions,
    ) -> Result<&Table> {
        let path = path.as_ref();
        if !path.to_string_lossy().ends_with(format.extension()) {
            return Err(HypothesisError::validation(format.extension_error()));
        }
        if options.format() != format {
            return Err(HypothesisError::validation(format!(
                "{:?} options cannot load a {:?} file",
                options.format(),
                format
            )));
        }

        let table = match &options {
            LoadOptions::Csv(opts) => delimited::read_csv(path, opts),
            LoadOptions::Excel(opts) => workbook::read_excel(path, opts),
        }
        .map_err(|err| match err {
            err @ HypothesisError::Load { .. } => err,
            other => HypothesisError::load(path, other),
        })?;

        tracing::info!(
            path = %path.display(),
            rows = table.n_rows(),
            cols = table.n_cols(),
            "{format:?} file loaded successfully"
        );
        Ok(self.data.insert(table))
    }

    /// Loads a CSV file.
    ///
    /// # Errors
    ///
    /// See [`DataLoader::load`].
    pub fn load_csv(&mut self, path: impl AsRef<Path>, options: CsvOptions) -> Result<&Table> {
        self.load(path, TableFormat::Csv, options.into())
    }

    /// Loads one worksheet of an `.xlsx` workbook.
    ///
    /// # Errors
    ///
    /// See [`DataLoader::load`].
    pub fn load_excel(&mut self, path: impl AsRef<Path>, options: ExcelOptions) -> Result<&Table> {
        self.load(path, TableFormat::Excel, options.into())
    }

    /// The most recently loaded table.
    ///
    /// # Errors
    ///
    /// Returns a validation error if nothing has been loaded yet.
    pub fn get(&self) -> Result<&Table> {
        self.data.as_ref().ok_or_else(|| {
            HypothesisError::validation("No dataset loaded. Please load a dataset first.")
        })
    }
}

/// Column-selection and typing options shared by both readers.
struct Shaping<'a> {
    usecols: Option<&'a [ColumnSelector]>,
    index_col: Option<&'a ColumnSelector>,
    dtype: Option<&'a BTreeMap<String, ColumnType>>,
}

fn resolve(selector: &ColumnSelector, headers: &[String]) -> Result<usize> {
    match selector {
        ColumnSelector::Name(name) => headers.iter().position(|h| h == name).ok_or_else(|| {
            HypothesisError::validation(format!(
                "Column '{name}' not found. Available columns: {headers:?}"
            ))
        }),
        ColumnSelector::Position(i) if *i < headers.len() => Ok(*i),
        ColumnSelector::Position(i) => Err(HypothesisError::validation(format!(
            "Column position {i} out of range for {} columns",
            headers.len()
        ))),
    }
}

/// Names blank headers `Unnamed: {position}` and suffixes repeats with
/// `.1`, `.2`, ... in order of appearance.
fn unique_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut headers = Vec::with_capacity(raw.len());
    for (j, header) in raw.into_iter().enumerate() {
        let base = if header.trim().is_empty() {
            format!("Unnamed: {j}")
        } else {
            header
        };
        let mut name = base.clone();
        let mut suffix = 0;
        while seen.contains(&name) {
            suffix += 1;
            name = format!("{base}.{suffix}");
        }
        seen.insert(name.clone());
        headers.push(name);
    }
    headers
}

/// Builds a table from a header row and raw rows of cells.
///
/// Rows shorter than the header are padded with empty cells. Typed columns
/// are cast; the others have their text cells inferred. Selectors by name
/// see the headers after [`unique_headers`].
fn assemble(headers: Vec<String>, rows: Vec<Vec<Cell>>, shaping: &Shaping<'_>) -> Result<Table> {
    let headers = unique_headers(headers);
    let mut keep: Vec<usize> = match shaping.usecols {
        Some(selectors) => selectors
            .iter()
            .map(|s| resolve(s, &headers))
            .collect::<Result<_>>()?,
        None => (0..headers.len()).collect(),
    };
    keep.sort_unstable();
    keep.dedup();

    let mut columns: Vec<Column> = Vec::with_capacity(keep.len());
    for &j in &keep {
        let name = &headers[j];
        let ty = shaping.dtype.and_then(|d| d.get(name)).copied();
        let cells = rows
            .iter()
            .enumerate()
            .map(|(row, record)| {
                let cell = record.get(j).cloned().unwrap_or(Cell::Empty);
                match (ty, cell) {
                    (Some(ty), cell) => cell.cast(ty).ok_or_else(|| {
                        HypothesisError::validation(format!(
                            "Cannot cast column '{name}' row {row} to {ty}"
                        ))
                    }),
                    (None, Cell::Text(raw)) => Ok(Cell::infer(&raw)),
                    (None, cell) => Ok(cell),
                }
            })
            .collect::<Result<Vec<_>>>()?;
        columns.push(Column::new(name.clone(), cells));
    }

    let index = match shaping.index_col {
        Some(selector) => {
            let names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();
            let i = resolve(selector, &names)?;
            Some(columns.remove(i))
        }
        None => None,
    };

    Table::new(columns, index)
}

#[cfg(test)]
#[path = "loading_tests.rs"]
mod tests;
