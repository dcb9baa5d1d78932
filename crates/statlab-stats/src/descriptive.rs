//! Descriptive statistics over finite samples.
//!
//! Every function here rejects `NaN` and infinities with
//! [`StatsError::NonFiniteValue`]; filter through
//! [`Sample`](crate::sample::Sample) first to drop them instead.

use serde::Serialize;

use crate::error::{StatsError, StatsResult};

/// Divisor used for a variance.
///
/// Descriptive summaries report the population form, inferential procedures use
/// the Bessel-corrected sample form; every call site picks one explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VarianceKind {
    /// Divide by `n`.
    Population,
    /// Divide by `n - 1`.
    Sample,
}

impl VarianceKind {
    const fn min_count(self) -> usize {
        match self {
            Self::Population => 1,
            Self::Sample => 2,
        }
    }

    const fn statistic(self) -> &'static str {
        match self {
            Self::Population => "population variance",
            Self::Sample => "sample variance",
        }
    }
}

/// Arithmetic mean.
///
/// # Examples
///
/// ```
/// # use statlab_stats::descriptive::mean;
/// assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap(), 3.0);
/// assert!(mean(&[]).is_err());
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn mean(values: &[f64]) -> StatsResult<f64> {
    if values.is_empty() {
        return Err(StatsError::degenerate("mean", 1, 0));
    }
    StatsError::ensure_finite("mean", values)?;
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Variance with the divisor chosen by `kind`.
///
/// The sample form needs two values; the population form is zero for one value.
#[expect(clippy::cast_precision_loss)]
pub fn variance(values: &[f64], kind: VarianceKind) -> StatsResult<f64> {
    let n = values.len();
    if n < kind.min_count() {
        return Err(StatsError::degenerate(kind.statistic(), kind.min_count(), n));
    }
    let mean = mean(values)?;
    let sum_sq = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    let divisor = match kind {
        VarianceKind::Population => n as f64,
        VarianceKind::Sample => (n - 1) as f64,
    };
    Ok(sum_sq / divisor)
}

/// Standard deviation, the square root of [`variance`] with the same divisor.
///
/// # Examples
///
/// ```
/// # use statlab_stats::descriptive::{std_dev, VarianceKind};
/// let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert_eq!(std_dev(&values, VarianceKind::Population).unwrap(), 2.0);
/// assert!(std_dev(&[1.0], VarianceKind::Sample).is_err());
/// ```
pub fn std_dev(values: &[f64], kind: VarianceKind) -> StatsResult<f64> {
    variance(values, kind).map(f64::sqrt)
}

/// Median, averaging the two central order statistics for an even count.
pub fn median(values: &[f64]) -> StatsResult<f64> {
    StatsError::ensure_finite("median", values)?;
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    median_of_sorted(&sorted)
}

fn median_of_sorted(sorted: &[f64]) -> StatsResult<f64> {
    let n = sorted.len();
    if n == 0 {
        return Err(StatsError::degenerate("median", 1, 0));
    }
    if n % 2 == 0 {
        Ok(f64::midpoint(sorted[n / 2 - 1], sorted[n / 2]))
    } else {
        Ok(sorted[n / 2])
    }
}

/// Pearson product-moment correlation of paired samples.
///
/// Returns `0` when there is at most one pair or either sample has no spread,
/// and is clamped to `[-1, 1]` against rounding.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> StatsResult<f64> {
    if x.len() != y.len() {
        return Err(StatsError::LengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    if x.is_empty() {
        return Err(StatsError::degenerate("correlation", 1, 0));
    }
    StatsError::ensure_finite("correlation", x)?;
    StatsError::ensure_finite("correlation", y)?;
    if x.len() == 1 {
        return Ok(0.0);
    }

    let mean_x = mean(x)?;
    let mean_y = mean(y)?;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return Ok(0.0);
    }
    Ok((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

/// Descriptive statistics summarizing one axis of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveSummary {
    /// Number of values.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Standard deviation with divisor `n - 1`; absent for a single value.
    pub std_dev_sample: Option<f64>,
    /// Standard deviation with divisor `n`.
    pub std_dev_population: f64,
    /// The median value.
    pub median: f64,
    /// The minimum value.
    pub min: f64,
    /// The maximum value.
    pub max: f64,
}

impl DescriptiveSummary {
    /// Computes the summary from unsorted values.
    ///
    /// Non-finite values are an error rather than being skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// # use statlab_stats::descriptive::DescriptiveSummary;
    /// let summary = DescriptiveSummary::new([5.0, 2.0, 4.0, 1.0, 3.0]).unwrap();
    /// assert_eq!(summary.min, 1.0);
    /// assert_eq!(summary.max, 5.0);
    /// assert_eq!(summary.mean, 3.0);
    /// assert_eq!(summary.median, 3.0);
    /// ```
    pub fn new<I>(values: I) -> StatsResult<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes the summary from values already sorted in ascending order.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    pub fn from_sorted(sorted_values: &[f64]) -> StatsResult<Self> {
        StatsError::ensure_finite("descriptive summary", sorted_values)?;
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let count = sorted_values.len();
        let (Some(&min), Some(&max)) = (sorted_values.first(), sorted_values.last()) else {
            return Err(StatsError::degenerate("descriptive summary", 1, 0));
        };
        let mean = mean(sorted_values)?;
        let median = median_of_sorted(sorted_values)?;
        let std_dev_population = std_dev(sorted_values, VarianceKind::Population)?;
        let std_dev_sample = std_dev(sorted_values, VarianceKind::Sample).ok();

        Ok(Self {
            count,
            // rounding can push the mean of near-constant data just outside the range
            mean: mean.clamp(min, max),
            std_dev_sample,
            std_dev_population,
            median,
            min,
            max,
        })
    }
}

/// Qualitative reading of a correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CorrelationStrength {
    None,
    WeakPositive,
    WeakNegative,
    ModeratePositive,
    ModerateNegative,
    StrongPositive,
    StrongNegative,
}

impl CorrelationStrength {
    /// Buckets `|r|` at `0.1`, `0.3` and `0.7`.
    #[must_use]
    pub fn classify(r: f64) -> Self {
        let positive = r > 0.0;
        match r.abs() {
            a if a < 0.1 => Self::None,
            a if a < 0.3 && positive => Self::WeakPositive,
            a if a < 0.3 => Self::WeakNegative,
            a if a < 0.7 && positive => Self::ModeratePositive,
            a if a < 0.7 => Self::ModerateNegative,
            _ if positive => Self::StrongPositive,
            _ => Self::StrongNegative,
        }
    }
}

/// Summary of both axes plus their correlation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BivariateSummary {
    /// Summary of the x coordinates.
    pub x: DescriptiveSummary,
    /// Summary of the y coordinates.
    pub y: DescriptiveSummary,
    /// Pearson correlation between the axes.
    pub correlation: f64,
    /// Bucketed reading of `correlation`.
    pub correlation_strength: CorrelationStrength,
}

impl BivariateSummary {
    /// Summarizes paired samples of equal length.
    pub fn new(x: &[f64], y: &[f64]) -> StatsResult<Self> {
        let correlation = pearson_correlation(x, y)?;
        Ok(Self {
            x: DescriptiveSummary::new(x.iter().copied())?,
            y: DescriptiveSummary::new(y.iter().copied())?,
            correlation,
            correlation_strength: CorrelationStrength::classify(correlation),
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_distr::{Distribution as _, Normal};
    use rand_pcg::Pcg32;

    use super::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_one_to_five_summary() {
        let summary = DescriptiveSummary::new([1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(summary.count, 5);
        assert_eq!(summary.mean, 3.0);
        assert_eq!(summary.median, 3.0);
        assert_close(summary.std_dev_population, 1.414_213_6, 1e-6);
        assert_close(summary.std_dev_sample.unwrap(), 1.581_138_8, 1e-6);
    }

    #[test]
    fn test_median_even_count() {
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]).unwrap(), 2.5);
        assert_eq!(median(&[7.0]).unwrap(), 7.0);
        assert!(median(&[]).is_err());
    }

    #[test]
    fn test_single_value_is_degenerate_for_sample_variance() {
        assert_eq!(mean(&[4.0]).unwrap(), 4.0);
        assert_eq!(variance(&[4.0], VarianceKind::Population).unwrap(), 0.0);
        assert_eq!(
            variance(&[4.0], VarianceKind::Sample),
            Err(StatsError::degenerate("sample variance", 2, 1))
        );

        let summary = DescriptiveSummary::new([4.0]).unwrap();
        assert_eq!(summary.std_dev_sample, None);
        assert_eq!(summary.std_dev_population, 0.0);
    }

    #[test]
    fn test_empty_sample_errors() {
        assert!(matches!(
            DescriptiveSummary::new([]),
            Err(StatsError::DegenerateSample { actual: 0, .. })
        ));
        assert!(variance(&[], VarianceKind::Population).is_err());
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        assert!(matches!(
            mean(&[f64::NAN]),
            Err(StatsError::NonFiniteValue {
                statistic: "mean",
                index: 0,
                ..
            })
        ));
        assert!(matches!(
            mean(&[1.0, f64::NAN]),
            Err(StatsError::NonFiniteValue { index: 1, .. })
        ));
        assert!(matches!(
            DescriptiveSummary::new([1.0, f64::NAN, 2.0]),
            Err(StatsError::NonFiniteValue { .. })
        ));
        assert!(matches!(
            median(&[f64::INFINITY, 1.0]),
            Err(StatsError::NonFiniteValue { index: 0, .. })
        ));
        assert!(matches!(
            pearson_correlation(&[1.0, 2.0], &[3.0, f64::NEG_INFINITY]),
            Err(StatsError::NonFiniteValue { index: 1, .. })
        ));
    }

    #[test]
    fn test_order_statistics_bound_center() {
        let mut rng = Pcg32::seed_from_u64(7);
        let normal = Normal::new(50.0, 20.0).unwrap();
        for len in [1, 2, 3, 10, 101] {
            let values: Vec<f64> = normal.sample_iter(&mut rng).take(len).collect();
            let summary = DescriptiveSummary::new(values).unwrap();
            assert!(summary.min <= summary.median && summary.median <= summary.max);
            assert!(summary.min <= summary.mean && summary.mean <= summary.max);
        }
    }

    #[test]
    fn test_correlation_of_identical_samples_is_one() {
        let x = [1.5, -2.0, 3.25, 8.0, 0.1];
        assert_eq!(pearson_correlation(&x, &x).unwrap(), 1.0);
    }

    #[test]
    fn test_correlation_bounds_and_sign() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [10.0, 8.0, 6.5, 4.0, 2.0];
        let r = pearson_correlation(&x, &y).unwrap();
        assert!((-1.0..=-0.9).contains(&r));

        let mut rng = Pcg32::seed_from_u64(11);
        let normal = Normal::new(0.0, 1.0).unwrap();
        let a: Vec<f64> = normal.sample_iter(&mut rng).take(200).collect();
        let b: Vec<f64> = normal.sample_iter(&mut rng).take(200).collect();
        let r = pearson_correlation(&a, &b).unwrap();
        assert!((-1.0..=1.0).contains(&r));
    }

    #[test]
    fn test_correlation_degenerate_cases() {
        assert_eq!(pearson_correlation(&[1.0], &[2.0]).unwrap(), 0.0);
        assert_eq!(
            pearson_correlation(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).unwrap(),
            0.0
        );
        assert!(pearson_correlation(&[], &[]).is_err());
        assert_eq!(
            pearson_correlation(&[1.0, 2.0], &[1.0]),
            Err(StatsError::LengthMismatch { x_len: 2, y_len: 1 })
        );
    }

    #[test]
    fn test_correlation_strength_buckets() {
        assert_eq!(CorrelationStrength::classify(0.05), CorrelationStrength::None);
        assert_eq!(
            CorrelationStrength::classify(-0.2),
            CorrelationStrength::WeakNegative
        );
        assert_eq!(
            CorrelationStrength::classify(0.5),
            CorrelationStrength::ModeratePositive
        );
        assert_eq!(
            CorrelationStrength::classify(-0.95),
            CorrelationStrength::StrongNegative
        );
    }

    #[test]
    fn test_bivariate_summary() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [2.0, 4.0, 6.0, 8.0];
        let summary = BivariateSummary::new(&x, &y).unwrap();
        assert_eq!(summary.x.median, 2.5);
        assert_eq!(summary.y.mean, 5.0);
        assert_close(summary.correlation, 1.0, 1e-12);
        assert_eq!(
            summary.correlation_strength,
            CorrelationStrength::StrongPositive
        );
    }
}
