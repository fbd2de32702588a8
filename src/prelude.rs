//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use hypotest::prelude::*;
//! ```

pub use crate::advisory::{CollectingHandler, LogHandler, Notice, NoticeHandler, NoticeSeverity};
pub use crate::config::{EngineConfig, SignificanceLevel};
pub use crate::data::{Cell, Column, ColumnType, Table};
pub use crate::engine::{HypothesisEngine, TestResult, VarianceMethod, Verdict};
pub use crate::error::HypothesisError;
pub use crate::loading::{CsvOptions, DataLoader, ExcelOptions, LoadOptions, TableFormat};
