//! Equal-width histograms for the data view.

use std::ops::Range;

use serde::Serialize;

use crate::error::{StatsError, StatsResult};

/// Upper limit on the number of bins.
pub const MAX_BINS: usize = 20;

/// Frequency counts over equal-width bins spanning `[min, max]` of the data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// Bins in ascending order. Empty for an empty sample.
    pub bins: Vec<HistogramBin>,
}

/// A single bin in a histogram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    /// Values covered by this bin: inclusive start, exclusive end, except that
    /// the last bin also includes its end (the sample maximum).
    pub range: Range<f64>,
    /// The number of values that fall within this bin's range.
    pub count: u64,
}

impl Histogram {
    /// Number of bins used for `n` values: `min(20, ⌈√n⌉)`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use statlab_stats::histogram::Histogram;
    /// assert_eq!(Histogram::bin_count(0), 0);
    /// assert_eq!(Histogram::bin_count(10), 4);
    /// assert_eq!(Histogram::bin_count(16), 4);
    /// assert_eq!(Histogram::bin_count(5000), 20);
    /// ```
    #[must_use]
    pub fn bin_count(n: usize) -> usize {
        let root = n.isqrt();
        let ceil = if root * root < n { root + 1 } else { root };
        ceil.min(MAX_BINS)
    }

    /// Creates a histogram from unsorted values.
    ///
    /// # Examples
    ///
    /// ```
    /// # use statlab_stats::histogram::Histogram;
    /// let values = [5.0, 2.0, 8.0, 1.0, 9.0, 3.0, 7.0, 4.0, 6.0, 10.0];
    /// let histogram = Histogram::new(values).unwrap();
    /// assert_eq!(histogram.bins.len(), 4);
    /// assert_eq!(histogram.total_count(), 10);
    /// ```
    pub fn new<I>(values: I) -> StatsResult<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values.into_iter().collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted)
    }

    /// Creates a histogram from values sorted in ascending order.
    ///
    /// When every value is equal there is a single bin holding all of them,
    /// with an empty range at that value.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    pub fn from_sorted(sorted_values: &[f64]) -> StatsResult<Self> {
        StatsError::ensure_finite("histogram", sorted_values)?;
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let (Some(&min), Some(&max)) = (sorted_values.first(), sorted_values.last()) else {
            return Ok(Self { bins: vec![] });
        };
        let total = sorted_values.len() as u64;
        if min == max {
            return Ok(Self {
                bins: vec![HistogramBin {
                    range: min..max,
                    count: total,
                }],
            });
        }

        let num_bins = Self::bin_count(sorted_values.len());
        let bin_width = (max - min) / num_bins as f64;
        let mut bins = (0..num_bins)
            .map(|i| {
                let start = min + i as f64 * bin_width;
                // pin the last edge to the maximum so rounding cannot leave it out
                let end = if i == num_bins - 1 {
                    max
                } else {
                    min + (i + 1) as f64 * bin_width
                };
                HistogramBin {
                    range: start..end,
                    count: 0,
                }
            })
            .collect::<Vec<_>>();

        for &val in sorted_values {
            let idx = (((val - min) / bin_width).floor() as usize).min(num_bins - 1);
            bins[idx].count += 1;
        }

        Ok(Self { bins })
    }

    /// Sum of all bin counts.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).sum()
    }
}
