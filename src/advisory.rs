//! Advisory notices: verdicts and non-fatal warnings.
//!
//! Every test operation reports its verdict here, and some operations raise
//! warnings (unequal ANOVA group sizes, a better-suited test exists). Notices
//! are observational only. Anything that must stop an operation is a
//! [`crate::error::HypothesisError`] instead.
//!
//! # Example
//!
//! ```
//! use hypotest::advisory::{CollectingHandler, NoticeSeverity};
//! use hypotest::engine::HypothesisEngine;
//! use std::sync::Arc;
//!
//! let handler = Arc::new(CollectingHandler::new());
//! let engine = HypothesisEngine::default().with_handler(handler.clone());
//!
//! let result = engine.check_significance(0.01);
//! assert!(result.rejected);
//! assert_eq!(handler.notices()[0].severity(), NoticeSeverity::Info);
//! ```

use std::sync::Mutex;

/// Severity levels for notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeSeverity {
    /// Informational (verdicts).
    Info,
    /// The result is still produced but may be less reliable.
    Warning,
}

impl std::fmt::Display for NoticeSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARNING"),
        }
    }
}

/// Things an operation can report without failing.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// Outcome of a significance check.
    Verdict {
        /// Whether the null hypothesis was rejected.
        rejected: bool,
        /// p-value that was compared.
        p_value: f64,
        /// Significance level it was compared against.
        alpha: f64,
    },
    /// ANOVA groups have different sizes.
    UnequalGroupSizes {
        /// Size of every group, in input order.
        sizes: Vec<usize>,
    },
    /// Mann-Whitney inputs differ a lot in size.
    SizeImbalance {
        /// First sample size.
        n1: usize,
        /// Second sample size.
        n2: usize,
    },
    /// Both samples are normal, so a parametric test would be stronger.
    PreferParametric {
        /// The operation that ran.
        test: &'static str,
        /// The suggested alternative.
        suggested: &'static str,
    },
    /// Fisher's exact test was asked for on inputs long enough for chi-square.
    PreferChiSquare {
        /// First sample length.
        n1: usize,
        /// Second sample length.
        n2: usize,
    },
}

impl Notice {
    /// Severity of this notice.
    #[must_use]
    pub fn severity(&self) -> NoticeSeverity {
        match self {
            Self::Verdict { .. } => NoticeSeverity::Info,
            Self::UnequalGroupSizes { .. }
            | Self::SizeImbalance { .. }
            | Self::PreferParametric { .. }
            | Self::PreferChiSquare { .. } => NoticeSeverity::Warning,
        }
    }

    /// True for warnings.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        self.severity() == NoticeSeverity::Warning
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Verdict { rejected: true, .. } => write!(
                f,
                "Null hypothesis rejected. There is a significant difference."
            ),
            Self::Verdict {
                rejected: false, ..
            } => write!(
                f,
                "Not enough evidence to reject the null hypothesis. There is no significant difference."
            ),
            Self::UnequalGroupSizes { sizes } => write!(
                f,
                "Please ensure all the samples are of same length (sizes {sizes:?}). Try downsampling the larger samples."
            ),
            Self::SizeImbalance { n1, n2 } => write!(
                f,
                "Large sample size difference ({n1} vs {n2}) may affect test accuracy"
            ),
            Self::PreferParametric { test, suggested } => write!(
                f,
                "Samples are normal, consider using {suggested} instead of {test}"
            ),
            Self::PreferChiSquare { n1, n2 } => write!(
                f,
                "Sample lengths are >= 5 ({n1}, {n2}). Try using the chi-square test."
            ),
        }
    }
}

/// Receives notices from the engine.
///
/// Implement this trait to route notices somewhere other than the log.
pub trait NoticeHandler: Send + Sync {
    /// Called once per notice, in emission order.
    fn on_notice(&self, notice: &Notice);
}

/// Default handler: forwards verdicts to `tracing::info!` and warnings to
/// `tracing::warn!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogHandler;

impl NoticeHandler for LogHandler {
    fn on_notice(&self, notice: &Notice) {
        match notice {
            Notice::Verdict {
                rejected,
                p_value,
                alpha,
            } => tracing::info!(rejected, p_value, alpha, "{notice}"),
            _ => tracing::warn!(severity = %notice.severity(), "{notice}"),
        }
    }
}

/// Handler that records every notice, for tests and for callers that want
/// to inspect warnings after the fact.
#[derive(Debug, Default)]
pub struct CollectingHandler {
    notices: Mutex<Vec<Notice>>,
}

impl CollectingHandler {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every notice received so far.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|n| n.clone())
            .unwrap_or_default()
    }

    /// Only the warnings.
    #[must_use]
    pub fn warnings(&self) -> Vec<Notice> {
        self.notices()
            .into_iter()
            .filter(Notice::is_warning)
            .collect()
    }

    /// Drops everything collected so far.
    pub fn clear(&self) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.clear();
        }
    }
}

impl NoticeHandler for CollectingHandler {
    fn on_notice(&self, notice: &Notice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice.clone());
        }
    }
}
