//! Simple linear regression for the scatter-plot trend line.

use serde::Serialize;

use crate::{
    error::{StatsError, StatsResult},
    sample::DataPoint,
};

/// Least-squares line `y = slope · x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    /// Change in `y` per unit of `x`.
    pub slope: f64,
    /// Value of `y` at `x = 0`.
    pub intercept: f64,
}

impl LinearFit {
    /// Fits paired samples by ordinary least squares.
    ///
    /// Fails when fewer than two pairs are given or all `x` are equal.
    ///
    /// # Examples
    ///
    /// ```
    /// # use statlab_stats::regression::LinearFit;
    /// let fit = LinearFit::fit(&[0.0, 1.0, 2.0], &[1.0, 3.0, 5.0]).unwrap();
    /// assert_eq!(fit.slope, 2.0);
    /// assert_eq!(fit.intercept, 1.0);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn fit(x: &[f64], y: &[f64]) -> StatsResult<Self> {
        if x.len() != y.len() {
            return Err(StatsError::LengthMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        if x.len() < 2 {
            return Err(StatsError::degenerate("linear fit", 2, x.len()));
        }
        StatsError::ensure_finite("linear fit", x)?;
        StatsError::ensure_finite("linear fit", y)?;

        let n = x.len() as f64;
        let sum_x = x.iter().sum::<f64>();
        let sum_y = y.iter().sum::<f64>();
        let sum_xy = x.iter().zip(y).map(|(a, b)| a * b).sum::<f64>();
        let sum_xx = x.iter().map(|a| a * a).sum::<f64>();

        let denominator = n * sum_xx - sum_x * sum_x;
        if denominator == 0.0 {
            return Err(StatsError::degenerate("linear fit", 2, x.len()));
        }
        let slope = (n * sum_xy - sum_x * sum_y) / denominator;
        let intercept = (sum_y - slope * sum_x) / n;
        Ok(Self { slope, intercept })
    }

    /// Fitted `y` at `x`.
    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// The two end points of the line over `[x_min, x_max]` of the data.
    #[must_use]
    pub fn line_over(&self, x: &[f64]) -> Option<[DataPoint; 2]> {
        let min = x.iter().copied().reduce(f64::min)?;
        let max = x.iter().copied().reduce(f64::max)?;
        Some([
            DataPoint::new(min, self.predict(min)),
            DataPoint::new(max, self.predict(max)),
        ])
    }
}

/// A fitted line with the segment to draw over the data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendLine {
    /// The fitted coefficients.
    pub fit: LinearFit,
    /// End points of the fitted line over the observed `x` range.
    pub segment: [DataPoint; 2],
}

/// Fits paired samples and returns the line spanning the observed `x` range,
/// or `None` when no line is defined.
#[must_use]
pub fn fit_line(x: &[f64], y: &[f64]) -> Option<TrendLine> {
    let fit = LinearFit::fit(x, y).ok()?;
    let segment = fit.line_over(x)?;
    Some(TrendLine { fit, segment })
}
