//! In-memory table of named columns.
//!
//! A [`Table`] is what the loader produces: named columns of [`Cell`] values
//! plus an optional index column. Columns are pulled out as `f64` samples
//! for the numeric tests or as strings for the categorical ones.

use crate::error::{HypothesisError, Result};
use serde::{Deserialize, Serialize};

/// One value in a table.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Missing value.
    Empty,
    /// Integer.
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// Boolean.
    Bool(bool),
    /// Anything else.
    Text(String),
}

/// Type a column can be forced to when loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// 64-bit signed integer.
    Int,
    /// 64-bit float.
    Float,
    /// `true` / `false`, any case.
    Bool,
    /// Raw text.
    Text,
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::Bool => write!(f, "bool"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// Field values read as missing, besides the empty string.
const MISSING_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || MISSING_MARKERS.contains(&trimmed)
}

fn parse_bool(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

impl Cell {
    /// Infers the narrowest cell for a raw field: empty, integer, float,
    /// boolean, then text.
    ///
    /// Blank fields and the usual missing-value markers (`NA`, `NaN`,
    /// `null`, `#N/A`, ...) are [`Cell::Empty`].
    ///
    /// # Examples
    ///
    /// ```
    /// use hypotest::data::Cell;
    ///
    /// assert_eq!(Cell::infer(""), Cell::Empty);
    /// assert_eq!(Cell::infer("NaN"), Cell::Empty);
    /// assert_eq!(Cell::infer("42"), Cell::Int(42));
    /// assert_eq!(Cell::infer("4.5"), Cell::Float(4.5));
    /// assert_eq!(Cell::infer("TRUE"), Cell::Bool(true));
    /// assert_eq!(Cell::infer("red"), Cell::Text("red".into()));
    /// ```
    #[must_use]
    pub fn infer(raw: &str) -> Self {
        let trimmed = raw.trim();
        if is_missing(trimmed) {
            Self::Empty
        } else if let Ok(i) = trimmed.parse::<i64>() {
            Self::Int(i)
        } else if let Ok(x) = trimmed.parse::<f64>() {
            // "nan" in any case parses as NaN
            if x.is_nan() {
                Self::Empty
            } else {
                Self::Float(x)
            }
        } else if let Some(b) = parse_bool(trimmed) {
            Self::Bool(b)
        } else {
            Self::Text(raw.to_string())
        }
    }

    /// Converts this cell to `ty`. Empty cells and missing-value markers
    /// become empty.
    ///
    /// Returns `None` when the value has no faithful representation in `ty`
    /// (text that does not parse, a float with a fractional part as an
    /// integer).
    #[must_use]
    pub fn cast(&self, ty: ColumnType) -> Option<Self> {
        match (self, ty) {
            (Self::Empty, _) => Some(Self::Empty),
            (Self::Text(s), _) if is_missing(s) => Some(Self::Empty),
            (Self::Float(x), _) if x.is_nan() => Some(Self::Empty),
            (Self::Int(i), ColumnType::Int) => Some(Self::Int(*i)),
            (Self::Int(i), ColumnType::Float) => Some(Self::Float(*i as f64)),
            (Self::Float(x), ColumnType::Int) if x.fract() == 0.0 && x.is_finite() => {
                Some(Self::Int(*x as i64))
            }
            (Self::Float(x), ColumnType::Float) => Some(Self::Float(*x)),
            (Self::Bool(b), ColumnType::Bool) => Some(Self::Bool(*b)),
            (Self::Text(s), ColumnType::Int) => s.trim().parse().ok().map(Self::Int),
            (Self::Text(s), ColumnType::Float) => s
                .trim()
                .parse::<f64>()
                .ok()
                .map(|x| if x.is_nan() { Self::Empty } else { Self::Float(x) }),
            (Self::Text(s), ColumnType::Bool) => parse_bool(s.trim()).map(Self::Bool),
            (Self::Text(s), ColumnType::Text) => Some(Self::Text(s.clone())),
            (other, ColumnType::Text) => Some(Self::Text(other.to_string())),
            _ => None,
        }
    }

    /// True for [`Cell::Empty`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Numeric value; booleans count as 0 / 1. `None` for empty and text.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(x) => Some(*x),
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Empty | Self::Text(_) => None,
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// A named column of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    cells: Vec<Cell>,
}

impl Column {
    /// Creates a column.
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// Column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All cells, in row order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True if the column has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A table of equally long named columns with an optional index column.
///
/// # Examples
///
/// ```
/// use hypotest::data::{Cell, Column, Table};
///
/// let table = Table::new(
///     vec![
///         Column::new("score", vec![Cell::Int(3), Cell::Float(4.5), Cell::Empty]),
///         Column::new("group", vec![Cell::infer("a"), Cell::infer("b"), Cell::infer("a")]),
///     ],
///     None,
/// )
/// .expect("valid columns");
///
/// assert_eq!(table.shape(), (3, 2));
/// assert_eq!(table.numeric("score").expect("numeric column"), vec![3.0, 4.5]);
/// assert_eq!(table.categorical("group").expect("column exists"), vec!["a", "b", "a"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    index: Option<Column>,
    n_rows: usize,
}

impl Table {
    /// Creates a table from data columns and an optional index column.
    ///
    /// # Errors
    ///
    /// Returns a validation error if columns differ in length, or if a name
    /// is empty or duplicated.
    pub fn new(columns: Vec<Column>, index: Option<Column>) -> Result<Self> {
        let n_rows = columns
            .first()
            .or(index.as_ref())
            .map_or(0, Column::len);

        for col in columns.iter().chain(index.as_ref()) {
            if col.len() != n_rows {
                return Err(HypothesisError::validation(format!(
                    "Column '{}' has {} rows, expected {n_rows}",
                    col.name(),
                    col.len()
                )));
            }
        }

        let mut names: Vec<&str> = columns.iter().map(Column::name).collect();
        if names.iter().any(|n| n.is_empty()) {
            return Err(HypothesisError::validation("Column names cannot be empty"));
        }
        names.sort_unstable();
        if let Some(w) = names.windows(2).find(|w| w[0] == w[1]) {
            return Err(HypothesisError::validation(format!(
                "Duplicate column name '{}'",
                w[0]
            )));
        }

        Ok(Self {
            columns,
            index,
            n_rows,
        })
    }

    /// (rows, data columns). The index column is not counted.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.columns.len())
    }

    /// Number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of data columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Data column names, in file order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Looks up a data column by name.
    ///
    /// # Errors
    ///
    /// Returns a validation error listing the available columns.
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| {
                HypothesisError::validation(format!(
                    "Column '{name}' not found. Available columns: {:?}",
                    self.column_names()
                ))
            })
    }

    /// The index column, if one was set.
    #[must_use]
    pub fn index(&self) -> Option<&Column> {
        self.index.as_ref()
    }

    /// Iterates over the data columns.
    pub fn iter_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    /// Non-empty values of a column as `f64`.
    ///
    /// # Errors
    ///
    /// Fails if the column is missing or holds text.
    pub fn numeric(&self, name: &str) -> Result<Vec<f64>> {
        self.column(name)?
            .cells()
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_empty())
            .map(|(row, cell)| {
                cell.as_f64().ok_or_else(|| {
                    HypothesisError::validation(format!(
                        "Column '{name}' row {row} is not numeric: '{cell}'"
                    ))
                })
            })
            .collect()
    }

    /// Non-empty values of a column as strings.
    ///
    /// # Errors
    ///
    /// Fails if the column is missing.
    pub fn categorical(&self, name: &str) -> Result<Vec<String>> {
        Ok(self
            .column(name)?
            .cells()
            .iter()
            .filter(|cell| !cell.is_empty())
            .map(ToString::to_string)
            .collect())
    }
}
