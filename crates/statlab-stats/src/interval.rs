//! Confidence intervals for a mean, a proportion and a variance.

use serde::Serialize;

use crate::{
    descriptive::{self, VarianceKind},
    error::{StatsError, StatsResult},
    sample::{Axis, Dataset},
    special,
};

/// Confidence level `1 - α` of an interval.
///
/// The three classroom levels use their textbook table values; any other level
/// strictly inside `(0, 1)` gets a computed critical value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ConfidenceLevel(f64);

impl Default for ConfidenceLevel {
    fn default() -> Self {
        Self::NINETY_FIVE
    }
}

impl ConfidenceLevel {
    /// 90% confidence.
    pub const NINETY: Self = Self(0.90);
    /// 95% confidence, the fallback for invalid levels.
    pub const NINETY_FIVE: Self = Self(0.95);
    /// 99% confidence.
    pub const NINETY_NINE: Self = Self(0.99);

    /// Accepts any level strictly inside `(0, 1)`; anything else becomes `0.95`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use statlab_stats::interval::ConfidenceLevel;
    /// assert_eq!(ConfidenceLevel::new(0.99).value(), 0.99);
    /// assert_eq!(ConfidenceLevel::new(1.5).value(), 0.95);
    /// ```
    #[must_use]
    pub fn new(level: f64) -> Self {
        if level > 0.0 && level < 1.0 {
            Self(level)
        } else {
            Self::NINETY_FIVE
        }
    }

    /// The level as a probability, e.g. `0.95`.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// `α = 1 - level`.
    #[must_use]
    pub fn alpha(self) -> f64 {
        1.0 - self.0
    }

    fn table_z(self) -> Option<f64> {
        const TABLE: [(f64, f64); 3] = [(0.90, 1.645), (0.95, 1.96), (0.99, 2.576)];
        TABLE
            .iter()
            .find(|(level, _)| (level - self.0).abs() < 1e-9)
            .map(|&(_, z)| z)
    }

    /// Two-sided standard normal critical value `z_{1-α/2}`.
    #[must_use]
    pub fn z_critical(self) -> f64 {
        self.table_z()
            .unwrap_or_else(|| special::inverse_normal_cdf(1.0 - self.alpha() / 2.0))
    }

    /// Two-sided Student-t critical value `t_{1-α/2, df}`.
    #[must_use]
    pub fn t_critical(self, df: u64) -> f64 {
        special::t_inverse_cdf(1.0 - self.alpha() / 2.0, df)
    }
}

/// Reference distribution for the critical value of a mean interval.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum CriticalValueMethod {
    /// Large-sample normal quantile.
    #[default]
    Z,
    /// Student-t quantile with `n - 1` degrees of freedom.
    T,
}

/// How an interval was constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntervalMethod {
    MeanZ,
    MeanT,
    ProportionWald,
    VarianceChiSquare,
}

/// A two-sided interval estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfidenceInterval {
    /// Lower bound.
    pub lower: f64,
    /// Upper bound.
    pub upper: f64,
    /// Confidence level the bounds were computed at.
    pub level: ConfidenceLevel,
    /// Quantile multiplying the standard error (upper chi-square quantile for a variance).
    pub critical_value: f64,
    /// How the interval was constructed.
    pub method: IntervalMethod,
}

impl ConfidenceInterval {
    /// Distance between the bounds.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Whether `value` lies within the closed interval.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// Interval for the population mean: `x̄ ∓ c · s/√n` with the sample standard
/// deviation `s`.
///
/// # Examples
///
/// ```
/// # use statlab_stats::interval::{mean_interval, ConfidenceLevel, CriticalValueMethod};
/// let ci = mean_interval(&[1.0, 2.0, 3.0, 4.0, 5.0], ConfidenceLevel::NINETY_FIVE, CriticalValueMethod::Z)
///     .unwrap();
/// assert!(ci.lower < 3.0 && 3.0 < ci.upper);
/// assert_eq!(ci.critical_value, 1.96);
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn mean_interval(
    values: &[f64],
    level: ConfidenceLevel,
    method: CriticalValueMethod,
) -> StatsResult<ConfidenceInterval> {
    let n = values.len();
    let mean = descriptive::mean(values)?;
    let sd = descriptive::std_dev(values, VarianceKind::Sample)?;
    let (critical_value, method) = match method {
        CriticalValueMethod::Z => (level.z_critical(), IntervalMethod::MeanZ),
        CriticalValueMethod::T => (level.t_critical(n as u64 - 1), IntervalMethod::MeanT),
    };
    let margin = critical_value * sd / (n as f64).sqrt();
    Ok(ConfidenceInterval {
        lower: mean - margin,
        upper: mean + margin,
        level,
        critical_value,
        method,
    })
}

/// Wald interval for the fraction of non-zero values, clamped to `[0, 1]`.
#[expect(clippy::cast_precision_loss)]
pub fn proportion_interval(
    values: &[f64],
    level: ConfidenceLevel,
) -> StatsResult<ConfidenceInterval> {
    if values.is_empty() {
        return Err(StatsError::degenerate("proportion", 1, 0));
    }
    StatsError::ensure_finite("proportion", values)?;
    let n = values.len() as f64;
    let successes = values.iter().filter(|&&v| v != 0.0).count() as f64;
    let p = successes / n;
    let critical_value = level.z_critical();
    let margin = critical_value * (p * (1.0 - p) / n).sqrt();
    Ok(ConfidenceInterval {
        lower: (p - margin).clamp(0.0, 1.0),
        upper: (p + margin).clamp(0.0, 1.0),
        level,
        critical_value,
        method: IntervalMethod::ProportionWald,
    })
}

/// Chi-square interval for the population variance:
/// `[(n-1)s² / χ²_{1-α/2}, (n-1)s² / χ²_{α/2}]`.
///
/// The reported critical value is the upper quantile `χ²_{1-α/2}`.
#[expect(clippy::cast_precision_loss)]
pub fn variance_interval(
    values: &[f64],
    level: ConfidenceLevel,
) -> StatsResult<ConfidenceInterval> {
    let n = values.len();
    let var = descriptive::variance(values, VarianceKind::Sample)?;
    let df = n as u64 - 1;
    let alpha = level.alpha();
    let upper_quantile = special::chi_square_inverse_cdf(1.0 - alpha / 2.0, df);
    let lower_quantile = special::chi_square_inverse_cdf(alpha / 2.0, df);
    let scaled = (n - 1) as f64 * var;
    Ok(ConfidenceInterval {
        lower: scaled / upper_quantile,
        upper: scaled / lower_quantile,
        level,
        critical_value: upper_quantile,
        method: IntervalMethod::VarianceChiSquare,
    })
}

/// What an interval is estimating.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum IntervalTarget {
    /// The population mean.
    #[default]
    Mean,
    /// The share of non-zero values.
    Proportion,
}

/// The interval for one axis with the sample it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisInterval {
    /// Number of finite values on the axis.
    pub count: usize,
    /// Sample mean.
    pub mean: f64,
    /// Standard deviation with divisor `n - 1`; absent for a single value.
    pub std_dev_sample: Option<f64>,
    /// The interval itself.
    pub interval: ConfidenceInterval,
}

impl AxisInterval {
    fn compute(
        values: &[f64],
        target: IntervalTarget,
        level: ConfidenceLevel,
        method: CriticalValueMethod,
    ) -> StatsResult<Self> {
        let interval = match target {
            IntervalTarget::Mean => mean_interval(values, level, method)?,
            IntervalTarget::Proportion => proportion_interval(values, level)?,
        };
        Ok(Self {
            count: values.len(),
            mean: descriptive::mean(values)?,
            std_dev_sample: descriptive::std_dev(values, VarianceKind::Sample).ok(),
            interval,
        })
    }
}

/// Intervals for both axes of a dataset, computed with the same settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisIntervals {
    /// Interval for the x coordinates.
    pub x: AxisInterval,
    /// Interval for the y coordinates.
    pub y: AxisInterval,
}

impl AxisIntervals {
    /// Computes the intervals of both axes; non-finite coordinates are dropped
    /// per axis.
    pub fn compute(
        dataset: &Dataset,
        target: IntervalTarget,
        level: ConfidenceLevel,
        method: CriticalValueMethod,
    ) -> StatsResult<Self> {
        let interval =
            |axis| AxisInterval::compute(dataset.axis(axis).as_slice(), target, level, method);
        Ok(Self {
            x: interval(Axis::X)?,
            y: interval(Axis::Y)?,
        })
    }
}
