//! Hypotest: hypothesis-test selection and significance reporting.
//!
//! Hypotest takes numeric or categorical samples, checks the assumptions a
//! test relies on (normality, equal sizes, equal variances, enough expected
//! counts), runs the test, and reports whether the null hypothesis is
//! rejected at a fixed significance level.
//!
//! # Quick Start
//!
//! ```
//! use hypotest::prelude::*;
//!
//! let engine = HypothesisEngine::new(0.05).expect("valid alpha");
//!
//! let control = [20.1, 19.8, 20.4, 20.0, 19.9, 20.2, 20.3, 19.7];
//! let treated = [21.0, 20.8, 21.3, 21.1, 20.9, 21.2, 21.4, 20.7];
//!
//! let result = engine.two_sample_ttest(&control, &treated, false).expect("normal samples");
//! assert_eq!(result.verdict(), Verdict::Rejected);
//! ```
//!
//! # Modules
//!
//! - [`engine`]: the [`HypothesisEngine`] and its test operations
//! - [`stats`]: statistic and p-value kernels for every test
//! - [`advisory`]: verdict and warning notices
//! - [`config`]: significance level and decision thresholds
//! - [`data`]: in-memory [`Table`] of named columns
//! - [`loading`]: CSV and Excel loader
//! - [`error`]: [`HypothesisError`]

pub mod advisory;
pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod loading;
pub mod prelude;
pub mod stats;

pub use advisory::{Notice, NoticeHandler};
pub use config::{EngineConfig, SignificanceLevel};
pub use data::Table;
pub use engine::{HypothesisEngine, TestResult, VarianceMethod, Verdict};
pub use error::{HypothesisError, Result};
pub use loading::DataLoader;
