//! Statistical computation library for the statlab workspace.
//!
//! This crate turns samples of real numbers into point estimates, interval
//! estimates, test statistics and p-values:
//!
//! - **Special functions**: normal, Student-t and chi-square CDFs and their inverses, gamma
//! - **Descriptive statistics**: mean, variance, median, correlation, summaries and histograms
//! - **Interval estimation**: Z/t intervals for a mean, Wald intervals for a proportion
//! - **Parameter estimation**: MLE and method of moments for Normal, Exponential, Poisson
//! - **Hypothesis testing**: t, z and chi-square tests in every direction
//! - **Distribution models**: normal, binomial and Poisson curves for plotting
//!
//! # Modules
//!
//! - [`special`]: Numeric approximations of distribution functions
//! - [`sample`]: Data points, datasets and filtered univariate samples
//! - [`descriptive`]: Descriptive statistics for summarizing samples
//! - [`histogram`]: Equal-width frequency bins for the data view
//! - [`interval`]: Confidence intervals
//! - [`estimation`]: Closed-form parameter estimators
//! - [`hypothesis`]: One-sample hypothesis tests
//! - [`distribution`]: Densities and plotting curves
//! - [`regression`]: Least-squares trend lines
//! - [`error`]: The shared error type
//!
//! # Examples
//!
//! ## Summarizing a sample
//!
//! ```
//! use statlab_stats::descriptive::DescriptiveSummary;
//!
//! let summary = DescriptiveSummary::new([1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
//! assert_eq!(summary.mean, 3.0);
//! assert_eq!(summary.median, 3.0);
//! ```
//!
//! ## Testing a mean
//!
//! ```
//! use statlab_stats::hypothesis::{
//!     run_test, HypothesisTestConfig, Reference, SignificanceLevel, TestDirection, TestFamily,
//! };
//!
//! let values = [5.1, 4.9, 5.6, 5.8, 6.0, 5.7, 5.5, 6.1];
//! let config = HypothesisTestConfig {
//!     family: TestFamily::T,
//!     direction: TestDirection::RightTailed,
//!     null_value: 5.0,
//!     significance: SignificanceLevel::new(0.05).unwrap(),
//!     reference: Reference::StudentT,
//! };
//! let result = run_test(&values, &config).unwrap();
//! assert!(result.reject_null);
//! assert_eq!(result.reject_null, result.p_value < 0.05);
//! ```
//!
//! ## Estimating parameters
//!
//! ```
//! use statlab_stats::estimation::{estimate, EstimationFamily};
//!
//! let result = estimate(EstimationFamily::Poisson, &[2.0, 4.0, 3.0, 5.0, 1.0]).unwrap();
//! assert_eq!(result.mle_params, result.mom_params);
//! ```

pub mod descriptive;
pub mod distribution;
pub mod error;
pub mod estimation;
pub mod histogram;
pub mod hypothesis;
pub mod interval;
pub mod regression;
pub mod sample;
pub mod special;

pub use self::error::{StatsError, StatsResult};
