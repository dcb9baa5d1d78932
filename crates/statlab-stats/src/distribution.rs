//! Parametric densities and the plotting curves derived from them.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    error::{StatsError, StatsResult},
    special,
};

/// Largest `k` for which `k!` is finite in `f64`.
const FACTORIAL_LIMIT: i64 = 170;

/// Normal density; zero when `std_dev` is not positive.
///
/// # Examples
///
/// ```
/// # use statlab_stats::distribution::normal_pdf;
/// assert!((normal_pdf(0.0, 0.0, 1.0) - 0.398_942_28).abs() < 1e-8);
/// assert_eq!(normal_pdf(0.0, 0.0, -1.0), 0.0);
/// ```
#[must_use]
pub fn normal_pdf(x: f64, mean: f64, std_dev: f64) -> f64 {
    if std_dev <= 0.0 || std_dev.is_nan() {
        return 0.0;
    }
    special::standard_normal_pdf((x - mean) / std_dev) / std_dev
}

/// Binomial probability mass `C(n, k) pᵏ (1 - p)ⁿ⁻ᵏ`; zero outside `0 <= k <= n`
/// or for `p` outside `[0, 1]`.
///
/// When the direct product overflows or underflows (`n` above roughly 1000) the
/// mass is evaluated in log space, so it stays finite for any `n`.
///
/// # Examples
///
/// ```
/// # use statlab_stats::distribution::binomial_pmf;
/// assert_eq!(binomial_pmf(2, 4, 0.5), 0.375);
/// let central = binomial_pmf(1000, 2000, 0.5);
/// assert!(central.is_finite() && (central - 0.017_839).abs() < 1e-5);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn binomial_pmf(k: i64, n: u64, p: f64) -> f64 {
    let Ok(k) = u64::try_from(k) else {
        return 0.0;
    };
    if k > n || !(0.0..=1.0).contains(&p) {
        return 0.0;
    }
    // degenerate trials put all mass on one end
    if p == 0.0 {
        return if k == 0 { 1.0 } else { 0.0 };
    }
    if p == 1.0 {
        return if k == n { 1.0 } else { 0.0 };
    }
    if let (Ok(successes), Ok(failures)) = (i32::try_from(k), i32::try_from(n - k)) {
        let direct = special::combination(n, k) * p.powi(successes) * (1.0 - p).powi(failures);
        // underflow to zero is as wrong as overflow for 0 < p < 1
        if direct.is_finite() && direct > 0.0 {
            return direct;
        }
    }
    let (n, k) = (n as f64, k as f64);
    let ln_choose =
        special::ln_gamma(n + 1.0) - special::ln_gamma(k + 1.0) - special::ln_gamma(n - k + 1.0);
    (ln_choose + k * p.ln() + (n - k) * (-p).ln_1p()).exp()
}

/// Poisson probability mass `λᵏ e^-λ / k!`; zero for `k < 0` or `λ <= 0`.
///
/// Large `k` switches to log space instead of overflowing `k!`.
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
#[must_use]
pub fn poisson_pmf(k: i64, lambda: f64) -> f64 {
    if k < 0 || lambda <= 0.0 || lambda.is_nan() {
        return 0.0;
    }
    if k <= FACTORIAL_LIMIT {
        let direct = lambda.powi(k as i32) * (-lambda).exp() / special::factorial(k as u64);
        if direct.is_finite() {
            return direct;
        }
    }
    let k = k as f64;
    (k * lambda.ln() - lambda - special::ln_gamma(k + 1.0)).exp()
}

/// A fully parameterized distribution for the explorer views.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "distribution", rename_all = "lowercase")]
pub enum DistributionModel {
    Normal { mean: f64, std_dev: f64 },
    Binomial { trials: u64, probability: f64 },
    Poisson { rate: f64 },
}

impl DistributionModel {
    /// Normal model; `sigma` must be positive and `mu` finite.
    pub fn normal(mean: f64, std_dev: f64) -> StatsResult<Self> {
        if !mean.is_finite() {
            return Err(StatsError::invalid("mu", mean, "must be finite"));
        }
        if !(std_dev.is_finite() && std_dev > 0.0) {
            return Err(StatsError::invalid("sigma", std_dev, "must be positive"));
        }
        Ok(Self::Normal { mean, std_dev })
    }

    /// Binomial model; `p` must lie within `[0, 1]`.
    pub fn binomial(trials: u64, probability: f64) -> StatsResult<Self> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(StatsError::invalid(
                "p",
                probability,
                "probability must lie within [0, 1]",
            ));
        }
        Ok(Self::Binomial {
            trials,
            probability,
        })
    }

    /// Poisson model; `lambda` must be positive.
    pub fn poisson(rate: f64) -> StatsResult<Self> {
        if !(rate.is_finite() && rate > 0.0) {
            return Err(StatsError::invalid("lambda", rate, "must be positive"));
        }
        Ok(Self::Poisson { rate })
    }

    /// Builds a model from a distribution name and named parameters.
    ///
    /// Missing parameters take the explorer defaults: `mu = 0, sigma = 1`,
    /// `n = 10, p = 0.5` and `lambda = 3`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::collections::BTreeMap;
    /// # use statlab_stats::distribution::DistributionModel;
    /// let params = BTreeMap::from([("lambda".to_owned(), 4.0)]);
    /// let model = DistributionModel::from_params("poisson", &params).unwrap();
    /// assert_eq!(model, DistributionModel::Poisson { rate: 4.0 });
    /// ```
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_params(name: &str, params: &BTreeMap<String, f64>) -> StatsResult<Self> {
        let param = |key: &str, default: f64| params.get(key).copied().unwrap_or(default);
        match name.trim().to_ascii_lowercase().as_str() {
            "normal" => Self::normal(param("mu", 0.0), param("sigma", 1.0)),
            "binomial" => {
                let n = param("n", 10.0);
                if !(n.is_finite() && n >= 0.0 && n.fract() == 0.0) {
                    return Err(StatsError::invalid(
                        "n",
                        n,
                        "trials must be a non-negative integer",
                    ));
                }
                Self::binomial(n as u64, param("p", 0.5))
            }
            "poisson" => Self::poisson(param("lambda", 3.0)),
            _ => Err(StatsError::UnsupportedDistribution {
                name: name.to_owned(),
            }),
        }
    }

    /// Whether the model has a probability mass rather than a density.
    #[must_use]
    pub const fn is_discrete(&self) -> bool {
        matches!(self, Self::Binomial { .. } | Self::Poisson { .. })
    }

    /// Expected value of the model.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn mean(&self) -> f64 {
        match *self {
            Self::Normal { mean, .. } => mean,
            Self::Binomial {
                trials,
                probability,
            } => trials as f64 * probability,
            Self::Poisson { rate } => rate,
        }
    }

    /// Variance of the model.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn variance(&self) -> f64 {
        match *self {
            Self::Normal { std_dev, .. } => std_dev * std_dev,
            Self::Binomial {
                trials,
                probability,
            } => trials as f64 * probability * (1.0 - probability),
            Self::Poisson { rate } => rate,
        }
    }

    /// Density at `x`, or probability mass when `x` is a whole number for the
    /// discrete families (zero otherwise).
    #[expect(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn density(&self, x: f64) -> f64 {
        match *self {
            Self::Normal { mean, std_dev } => normal_pdf(x, mean, std_dev),
            Self::Binomial { .. } | Self::Poisson { .. } if x.fract() != 0.0 => 0.0,
            Self::Binomial {
                trials,
                probability,
            } => binomial_pmf(x as i64, trials, probability),
            Self::Poisson { rate } => poisson_pmf(x as i64, rate),
        }
    }

    /// Samples the density for plotting.
    ///
    /// The normal curve has `point_count` evenly spaced points including both
    /// ends of `domain`. Discrete curves ignore the domain and cover
    /// `k = 0..=min(n, point_count)` (binomial) or `k = 0..=point_count` (Poisson).
    ///
    /// # Examples
    ///
    /// ```
    /// # use statlab_stats::distribution::DistributionModel;
    /// let model = DistributionModel::normal(0.0, 1.0).unwrap();
    /// let curve = model.curve((-4.0, 4.0), 81).unwrap();
    /// assert_eq!(curve.points.len(), 81);
    /// assert_eq!(curve.points[40].x, 0.0);
    /// ```
    #[expect(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
    pub fn curve(&self, domain: (f64, f64), point_count: usize) -> StatsResult<DistributionCurve> {
        let points = match *self {
            Self::Normal { .. } => {
                let (from, to) = domain;
                if !(from.is_finite() && to.is_finite() && from < to) {
                    return Err(StatsError::invalid(
                        "domain",
                        to - from,
                        "domain must be a finite, non-empty range",
                    ));
                }
                if point_count < 2 {
                    return Err(StatsError::degenerate("continuous curve", 2, point_count));
                }
                let step = (to - from) / (point_count - 1) as f64;
                (0..point_count)
                    .map(|i| {
                        let x = if i == point_count - 1 {
                            to
                        } else {
                            from + step * i as f64
                        };
                        CurvePoint {
                            x,
                            y: self.density(x),
                        }
                    })
                    .collect()
            }
            Self::Binomial {
                trials,
                probability,
            } => {
                let last = trials.min(point_count as u64);
                (0..=last)
                    .map(|k| CurvePoint {
                        x: k as f64,
                        y: binomial_pmf(k as i64, trials, probability),
                    })
                    .collect()
            }
            Self::Poisson { rate } => (0..=point_count)
                .map(|k| CurvePoint {
                    x: k as f64,
                    y: poisson_pmf(k as i64, rate),
                })
                .collect(),
        };
        Ok(DistributionCurve {
            model: *self,
            points,
        })
    }
}

/// One sample of a density or mass function.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    /// Point of evaluation; an integer `k` for discrete models.
    pub x: f64,
    /// Density or probability mass at `x`.
    pub y: f64,
}

/// Density samples of one model, in increasing `x`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionCurve {
    /// The model the curve was drawn from.
    pub model: DistributionModel,
    /// Samples in increasing `x`.
    pub points: Vec<CurvePoint>,
}

impl DistributionCurve {
    /// Sum of the sampled masses (discrete) or trapezoidal area (continuous).
    #[must_use]
    pub fn total_mass(&self) -> f64 {
        if self.model.is_discrete() {
            self.points.iter().map(|p| p.y).sum()
        } else {
            self.points
                .windows(2)
                .map(|w| (w[1].x - w[0].x) * (w[0].y + w[1].y) / 2.0)
                .sum()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_normal_pdf() {
        assert_close(normal_pdf(1.0, 0.0, 1.0), 0.241_970_72, 1e-8);
        assert_close(normal_pdf(12.0, 10.0, 2.0), 0.120_985_36, 1e-8);
    }

    #[test]
    fn test_binomial_pmf() {
        assert_close(binomial_pmf(3, 10, 0.5), 120.0 / 1024.0, 1e-12);
        assert_eq!(binomial_pmf(-1, 10, 0.5), 0.0);
        assert_eq!(binomial_pmf(11, 10, 0.5), 0.0);
        assert_eq!(binomial_pmf(2, 10, 1.5), 0.0);
        assert_eq!(binomial_pmf(0, 0, 0.3), 1.0);
        let total: f64 = (0..=20).map(|k| binomial_pmf(k, 20, 0.3)).sum();
        assert_close(total, 1.0, 1e-12);
    }

    #[test]
    fn test_binomial_pmf_large_trials() {
        // central term of C(2000, k) / 2^2000, about 1 / sqrt(1000 pi)
        assert_close(binomial_pmf(1000, 2000, 0.5), 0.017_839, 1e-5);
        assert!(binomial_pmf(515, 1030, 0.5).is_finite());
        assert_eq!(binomial_pmf(0, 5000, 0.0), 1.0);
        assert_eq!(binomial_pmf(5000, 5000, 1.0), 1.0);
        assert_eq!(binomial_pmf(10, 5000, 1.0), 0.0);

        let model = DistributionModel::binomial(1100, 0.5).unwrap();
        let curve = model.curve((0.0, 0.0), 1100).unwrap();
        assert_eq!(curve.points.len(), 1101);
        assert!(curve.points.iter().all(|p| p.y.is_finite() && p.y >= 0.0));
        assert_close(curve.total_mass(), 1.0, 1e-8);
    }

    #[test]
    fn test_poisson_pmf() {
        assert_close(poisson_pmf(2, 3.0), 4.5 * (-3.0_f64).exp(), 1e-12);
        assert_eq!(poisson_pmf(-1, 3.0), 0.0);
        assert_eq!(poisson_pmf(2, 0.0), 0.0);
        // large k takes the logarithmic route
        let mass = poisson_pmf(500, 480.0);
        assert!(mass.is_finite() && mass > 0.0 && mass < 0.02);
    }

    #[test]
    fn test_validated_constructors() {
        assert!(DistributionModel::normal(0.0, 0.0).is_err());
        assert!(DistributionModel::binomial(10, -0.1).is_err());
        assert!(DistributionModel::poisson(0.0).is_err());
        assert!(matches!(
            DistributionModel::from_params("cauchy", &BTreeMap::new()),
            Err(StatsError::UnsupportedDistribution { .. })
        ));
        let params = BTreeMap::from([("n".to_owned(), 2.5)]);
        assert!(DistributionModel::from_params("binomial", &params).is_err());
    }

    #[test]
    fn test_normal_curve_spans_domain() {
        let model = DistributionModel::normal(0.0, 1.0).unwrap();
        let curve = model.curve((-5.0, 5.0), 201).unwrap();
        assert_eq!(curve.points.first().unwrap().x, -5.0);
        assert_eq!(curve.points.last().unwrap().x, 5.0);
        assert!(curve.points.windows(2).all(|w| w[0].x < w[1].x));
        assert_close(curve.total_mass(), 1.0, 1e-3);

        assert!(model.curve((1.0, 1.0), 10).is_err());
        assert!(model.curve((0.0, 1.0), 1).is_err());
    }

    #[test]
    fn test_discrete_curves() {
        let binomial = DistributionModel::binomial(10, 0.4).unwrap();
        let curve = binomial.curve((-100.0, 100.0), 50).unwrap();
        assert_eq!(curve.points.len(), 11);
        assert_close(curve.total_mass(), 1.0, 1e-12);

        let truncated = binomial.curve((0.0, 0.0), 4).unwrap();
        assert_eq!(truncated.points.len(), 5);

        let poisson = DistributionModel::poisson(3.0).unwrap();
        let curve = poisson.curve((0.0, 1.0), 30).unwrap();
        assert_eq!(curve.points.len(), 31);
        assert_close(curve.total_mass(), 1.0, 1e-9);
    }

    #[test]
    fn test_density_and_moments() {
        let poisson = DistributionModel::poisson(3.0).unwrap();
        assert_eq!(poisson.density(2.5), 0.0);
        assert_close(poisson.density(2.0), poisson_pmf(2, 3.0), 0.0);
        let binomial = DistributionModel::binomial(20, 0.25).unwrap();
        assert_eq!(binomial.mean(), 5.0);
        assert_eq!(binomial.variance(), 3.75);
        assert!(binomial.is_discrete());
    }
}
