//! Statistical kernels behind the hypothesis engine.
//!
//! Each kernel is a plain function from samples to a statistic and p-value.
//! Kernels validate only what they need to produce a number; test-selection
//! rules (normality, CLT, size warnings) live in [`crate::engine`].
//!
//! - [`descriptive`]: mean, variance, median, ranks
//! - [`distribution`]: reference distribution tails (t, F, χ², normal, Kolmogorov)
//! - [`normality`]: Shapiro-Wilk, Kolmogorov-Smirnov
//! - [`variance`]: Levene, Bartlett
//! - [`hypothesis`]: t-tests, one-way ANOVA
//! - [`rank`]: Mann-Whitney U, Wilcoxon signed-rank, Kruskal-Wallis
//! - [`contingency`]: crosstab, chi-square independence, Fisher exact
//! - [`correlation`]: Pearson, Spearman
//!
//! # Examples
//!
//! ```
//! use hypotest::stats::{shapiro, ttest_ind};
//!
//! let a = [5.1, 4.9, 5.0, 5.2, 4.8, 5.0];
//! let b = [6.1, 5.9, 6.0, 6.2, 5.8, 6.0];
//!
//! assert!(shapiro(&a).expect("enough data").pvalue > 0.05);
//! assert!(ttest_ind(&a, &b, true).expect("valid samples").pvalue < 0.001);
//! ```

pub mod contingency;
pub mod correlation;
pub mod descriptive;
pub mod distribution;
pub mod hypothesis;
pub mod normality;
pub mod rank;
pub mod variance;

pub use contingency::{
    chi2_contingency, fisher_exact, Chi2ContingencyResult, ContingencyTable, FisherResult,
};
pub use correlation::{pearsonr, spearmanr, CorrelationResult};
pub use descriptive::{mean, median, rankdata, std_dev, variance};
pub use hypothesis::{f_oneway, ttest_1samp, ttest_ind, ttest_rel, AnovaResult, TTestResult};
pub use normality::{kstest_normal, shapiro, NormalityResult};
pub use rank::{kruskal, mannwhitneyu, wilcoxon, RankTestResult};
pub use variance::{bartlett, levene, VarianceTestResult};
