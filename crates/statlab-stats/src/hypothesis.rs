//! One-sample hypothesis tests for a mean or a variance.
//!
//! A test is configured once with [`HypothesisTestConfig`] and evaluated with
//! [`run_test`]. Every result satisfies `reject_null == (p_value < alpha)`.

use std::str::FromStr;

use serde::Serialize;

use crate::{
    descriptive::{self, VarianceKind},
    error::{StatsError, StatsResult},
    interval::{self, ConfidenceInterval, ConfidenceLevel, IntervalMethod},
    special,
};

/// Which statistic is tested.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TestFamily {
    /// Mean with unknown variance, Student-t reference.
    #[default]
    T,
    /// Mean with the variance taken as known, standard normal reference.
    Z,
    /// Variance against `σ₀²`, chi-square reference.
    ChiSquare,
}

impl FromStr for TestFamily {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "t" | "t-test" => Ok(Self::T),
            "z" | "z-test" => Ok(Self::Z),
            "chi-square" | "chisquare" | "chi2" => Ok(Self::ChiSquare),
            _ => Err(StatsError::unknown("test family", s)),
        }
    }
}

/// Alternative hypothesis relative to the null value.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TestDirection {
    #[default]
    TwoTailed,
    LeftTailed,
    RightTailed,
}

impl FromStr for TestDirection {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "two-tailed" | "two" | "both" => Ok(Self::TwoTailed),
            "left-tailed" | "left" | "less" => Ok(Self::LeftTailed),
            "right-tailed" | "right" | "greater" => Ok(Self::RightTailed),
            _ => Err(StatsError::unknown("test direction", s)),
        }
    }
}

/// Significance level `α`, strictly inside `(0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SignificanceLevel(f64);

impl SignificanceLevel {
    /// # Examples
    ///
    /// ```
    /// # use statlab_stats::hypothesis::SignificanceLevel;
    /// assert!(SignificanceLevel::new(0.05).is_ok());
    /// assert!(SignificanceLevel::new(0.0).is_err());
    /// assert!(SignificanceLevel::new(1.0).is_err());
    /// ```
    pub fn new(value: f64) -> StatsResult<Self> {
        if value > 0.0 && value < 1.0 {
            Ok(Self(value))
        } else {
            Err(StatsError::InvalidSignificanceLevel { value })
        }
    }

    /// The level as a probability.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// The matching two-sided confidence level `1 - α`.
    #[must_use]
    pub fn confidence_level(self) -> ConfidenceLevel {
        ConfidenceLevel::new(1.0 - self.0)
    }
}

impl Default for SignificanceLevel {
    fn default() -> Self {
        Self(0.05)
    }
}

impl FromStr for SignificanceLevel {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<f64>()
            .map_err(|_| StatsError::unknown("significance level", s))?;
        Self::new(value)
    }
}

/// Distribution the t statistic `(x̄ - μ₀) / (s / √n)` is referred to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Reference {
    /// Student's t with `n - 1` degrees of freedom.
    #[default]
    StudentT,
    /// The standard normal, the large-sample approximation.
    Normal,
}

impl FromStr for Reference {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student-t" | "studentt" | "t" => Ok(Self::StudentT),
            "normal" | "z" => Ok(Self::Normal),
            _ => Err(StatsError::unknown("reference distribution", s)),
        }
    }
}

/// Everything needed to run one test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HypothesisTestConfig {
    /// Which statistic to compute.
    pub family: TestFamily,
    /// The alternative hypothesis.
    pub direction: TestDirection,
    /// `μ₀` for the mean tests, `σ₀²` for the variance test.
    pub null_value: f64,
    /// Rejection threshold for the p-value.
    pub significance: SignificanceLevel,
    /// Reference distribution of the t statistic; ignored by the z and
    /// chi-square families.
    pub reference: Reference,
}

impl HypothesisTestConfig {
    /// Two-sided test of `μ = null_value` with the sample standard deviation,
    /// referred to the standard normal.
    ///
    /// # Examples
    ///
    /// ```
    /// # use statlab_stats::hypothesis::{run_test, HypothesisTestConfig, SignificanceLevel};
    /// // 25 values with mean 12 and sample standard deviation 5: t = 2
    /// let mut values = vec![17.0; 12];
    /// values.extend([7.0; 12]);
    /// values.push(12.0);
    ///
    /// let at_five = SignificanceLevel::new(0.05).unwrap();
    /// let result = run_test(&values, &HypothesisTestConfig::two_sided_mean(10.0, at_five)).unwrap();
    /// assert!(result.reject_null);
    ///
    /// let at_one = SignificanceLevel::new(0.01).unwrap();
    /// let result = run_test(&values, &HypothesisTestConfig::two_sided_mean(10.0, at_one)).unwrap();
    /// assert!(!result.reject_null);
    /// ```
    #[must_use]
    pub fn two_sided_mean(null_value: f64, significance: SignificanceLevel) -> Self {
        Self {
            family: TestFamily::T,
            direction: TestDirection::TwoTailed,
            null_value,
            significance,
            reference: Reference::Normal,
        }
    }
}

/// Moments of the tested sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampleMoments {
    /// Number of values.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Standard deviation with divisor `n - 1`.
    pub std_dev_sample: f64,
    /// Standard deviation with divisor `n`.
    pub std_dev_population: f64,
}

impl SampleMoments {
    /// Computes the moments of raw values; needs at least two finite values.
    pub fn from_values(values: &[f64]) -> StatsResult<Self> {
        Ok(Self {
            count: values.len(),
            mean: descriptive::mean(values)?,
            std_dev_sample: descriptive::std_dev(values, VarianceKind::Sample)?,
            std_dev_population: descriptive::std_dev(values, VarianceKind::Population)?,
        })
    }

    /// Moments from a reported summary `(n, x̄, s)`.
    #[expect(clippy::cast_precision_loss)]
    pub fn from_summary(count: usize, mean: f64, std_dev_sample: f64) -> StatsResult<Self> {
        if count < 2 {
            return Err(StatsError::degenerate("sample moments", 2, count));
        }
        if !mean.is_finite() {
            return Err(StatsError::invalid("mean", mean, "mean must be finite"));
        }
        if !std_dev_sample.is_finite() || std_dev_sample < 0.0 {
            return Err(StatsError::invalid(
                "std_dev_sample",
                std_dev_sample,
                "standard deviation must be finite and non-negative",
            ));
        }
        let n = count as f64;
        Ok(Self {
            count,
            mean,
            std_dev_sample,
            std_dev_population: std_dev_sample * ((n - 1.0) / n).sqrt(),
        })
    }

    fn degrees_of_freedom(&self) -> u64 {
        self.count as u64 - 1
    }
}

/// Critical values bounding the rejection region of the statistic.
///
/// The null is rejected when the statistic is below `lower` or above `upper`;
/// a one-tailed test has only one bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RejectionRegion {
    /// Lower critical value, if the left tail rejects.
    pub lower: Option<f64>,
    /// Upper critical value, if the right tail rejects.
    pub upper: Option<f64>,
}

impl RejectionRegion {
    /// Whether `statistic` falls in the region.
    #[must_use]
    pub fn contains(&self, statistic: f64) -> bool {
        self.lower.is_some_and(|l| statistic < l) || self.upper.is_some_and(|u| statistic > u)
    }
}

/// Outcome of a test, with everything needed to report it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HypothesisTestResult {
    /// The test that was run.
    pub family: TestFamily,
    /// The alternative hypothesis.
    pub direction: TestDirection,
    /// Distribution the statistic was referred to; `None` for the z and
    /// chi-square families, which have a single reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<Reference>,
    /// The hypothesized mean or variance.
    pub null_value: f64,
    /// Value of the test statistic.
    pub statistic: f64,
    /// Degrees of freedom of the reference distribution, when it has any.
    pub degrees_of_freedom: Option<u64>,
    /// Probability under the null of a statistic at least this extreme.
    pub p_value: f64,
    /// The `α` the p-value was compared against.
    pub significance_level: f64,
    /// `p_value < significance_level`.
    pub reject_null: bool,
    /// Critical values for the chosen direction.
    pub rejection_region: RejectionRegion,
    /// Two-sided interval at confidence `1 - α`, whatever the direction.
    pub confidence_interval: Option<ConfidenceInterval>,
    /// Moments of the tested sample.
    pub sample: SampleMoments,
}

/// Runs the configured test on raw values.
///
/// # Examples
///
/// ```
/// # use statlab_stats::hypothesis::{
/// #     run_test, HypothesisTestConfig, Reference, SignificanceLevel, TestDirection, TestFamily,
/// # };
/// let values = [9.8, 10.2, 10.1, 9.9, 10.0, 10.3, 9.7];
/// let config = HypothesisTestConfig {
///     family: TestFamily::T,
///     direction: TestDirection::TwoTailed,
///     null_value: 10.0,
///     significance: SignificanceLevel::default(),
///     reference: Reference::StudentT,
/// };
/// let result = run_test(&values, &config).unwrap();
/// assert!(!result.reject_null);
/// assert_eq!(result.degrees_of_freedom, Some(6));
/// ```
pub fn run_test(values: &[f64], config: &HypothesisTestConfig) -> StatsResult<HypothesisTestResult> {
    let moments = SampleMoments::from_values(values)?;
    let mut result = run_test_with_moments(&moments, config)?;
    if config.family == TestFamily::ChiSquare {
        let level = config.significance.confidence_level();
        result.confidence_interval = Some(interval::variance_interval(values, level)?);
    }
    Ok(result)
}

/// Runs the configured test from sample moments alone.
///
/// The variance test reports its interval only through [`run_test`].
#[expect(clippy::cast_precision_loss)]
pub fn run_test_with_moments(
    moments: &SampleMoments,
    config: &HypothesisTestConfig,
) -> StatsResult<HypothesisTestResult> {
    if moments.count < 2 {
        return Err(StatsError::degenerate("hypothesis test", 2, moments.count));
    }
    let alpha = config.significance.value();
    let direction = config.direction;
    let sqrt_n = (moments.count as f64).sqrt();
    let df = moments.degrees_of_freedom();

    let (statistic, p_value, rejection_region, degrees_of_freedom, confidence_interval) =
        match config.family {
            TestFamily::T => {
                let sd = spread(moments.std_dev_sample, moments.count)?;
                let se = sd / sqrt_n;
                let t = (moments.mean - config.null_value) / se;
                match config.reference {
                    Reference::StudentT => {
                        let p = tail_probability(special::t_cdf(t, df), direction);
                        let region =
                            symmetric_region(|q| special::t_inverse_cdf(q, df), alpha, direction);
                        let ci = mean_interval(
                            moments.mean,
                            se,
                            special::t_inverse_cdf(1.0 - alpha / 2.0, df),
                            config.significance,
                            IntervalMethod::MeanT,
                        );
                        (t, p, region, Some(df), Some(ci))
                    }
                    Reference::Normal => {
                        let p = tail_probability(special::normal_cdf(t), direction);
                        let region =
                            symmetric_region(special::inverse_normal_cdf, alpha, direction);
                        let ci = mean_interval(
                            moments.mean,
                            se,
                            config.significance.confidence_level().z_critical(),
                            config.significance,
                            IntervalMethod::MeanZ,
                        );
                        (t, p, region, None, Some(ci))
                    }
                }
            }
            TestFamily::Z => {
                let sd = spread(moments.std_dev_population, moments.count)?;
                let se = sd / sqrt_n;
                let z = (moments.mean - config.null_value) / se;
                let p = tail_probability(special::normal_cdf(z), direction);
                let region = symmetric_region(special::inverse_normal_cdf, alpha, direction);
                let ci = mean_interval(
                    moments.mean,
                    se,
                    config.significance.confidence_level().z_critical(),
                    config.significance,
                    IntervalMethod::MeanZ,
                );
                (z, p, region, None, Some(ci))
            }
            TestFamily::ChiSquare => {
                if config.null_value.is_nan() || config.null_value <= 0.0 {
                    return Err(StatsError::invalid(
                        "null_value",
                        config.null_value,
                        "hypothesized variance must be positive",
                    ));
                }
                let variance = moments.std_dev_sample.powi(2);
                let chi2 = df as f64 * variance / config.null_value;
                let p = tail_probability(special::chi_square_cdf(chi2, df), direction);
                let quantile = |q| special::chi_square_inverse_cdf(q, df);
                let region = match direction {
                    TestDirection::TwoTailed => RejectionRegion {
                        lower: Some(quantile(alpha / 2.0)),
                        upper: Some(quantile(1.0 - alpha / 2.0)),
                    },
                    TestDirection::LeftTailed => RejectionRegion {
                        lower: Some(quantile(alpha)),
                        upper: None,
                    },
                    TestDirection::RightTailed => RejectionRegion {
                        lower: None,
                        upper: Some(quantile(1.0 - alpha)),
                    },
                };
                (chi2, p, region, Some(df), None)
            }
        };

    Ok(HypothesisTestResult {
        family: config.family,
        direction,
        reference: (config.family == TestFamily::T).then_some(config.reference),
        null_value: config.null_value,
        statistic,
        degrees_of_freedom,
        p_value,
        significance_level: alpha,
        reject_null: p_value < alpha,
        rejection_region,
        confidence_interval,
        sample: *moments,
    })
}

fn spread(std_dev: f64, count: usize) -> StatsResult<f64> {
    if std_dev > 0.0 {
        Ok(std_dev)
    } else {
        Err(StatsError::degenerate("test statistic", 2, count))
    }
}

/// P-value from the reference CDF evaluated at the statistic.
///
/// The two-tailed form doubles the smaller tail, which equals `2(1 - F(|t|))`
/// for the symmetric references.
fn tail_probability(cdf: f64, direction: TestDirection) -> f64 {
    let p = match direction {
        TestDirection::TwoTailed => 2.0 * cdf.min(1.0 - cdf),
        TestDirection::LeftTailed => cdf,
        TestDirection::RightTailed => 1.0 - cdf,
    };
    p.clamp(0.0, 1.0)
}

fn symmetric_region<F>(quantile: F, alpha: f64, direction: TestDirection) -> RejectionRegion
where
    F: Fn(f64) -> f64,
{
    match direction {
        TestDirection::TwoTailed => {
            let c = quantile(1.0 - alpha / 2.0);
            RejectionRegion {
                lower: Some(-c),
                upper: Some(c),
            }
        }
        TestDirection::LeftTailed => RejectionRegion {
            lower: Some(-quantile(1.0 - alpha)),
            upper: None,
        },
        TestDirection::RightTailed => RejectionRegion {
            lower: None,
            upper: Some(quantile(1.0 - alpha)),
        },
    }
}

fn mean_interval(
    mean: f64,
    standard_error: f64,
    critical_value: f64,
    significance: SignificanceLevel,
    method: IntervalMethod,
) -> ConfidenceInterval {
    let margin = critical_value * standard_error;
    ConfidenceInterval {
        lower: mean - margin,
        upper: mean + margin,
        level: significance.confidence_level(),
        critical_value,
        method,
    }
}
