//! Raw bivariate data and the filtered univariate samples derived from it.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StatsError;

/// One observation as supplied by a data source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl DataPoint {
    /// Creates a point from its coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The coordinate selected by `axis`.
    #[must_use]
    pub const fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Whether both coordinates are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Coordinate selector for univariate procedures.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    #[default]
    Y,
}

impl FromStr for Axis {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            _ => Err(StatsError::unknown("axis", s)),
        }
    }
}

/// An ordered sequence of finite values.
///
/// Construction drops `NaN` and infinities, so every procedure downstream can
/// assume finite input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sample {
    values: Vec<f64>,
}

impl Sample {
    /// Builds a sample, discarding non-finite values.
    ///
    /// # Examples
    ///
    /// ```
    /// use statlab_stats::sample::Sample;
    ///
    /// let sample = Sample::from_values([1.0, f64::NAN, 3.0, f64::INFINITY]);
    /// assert_eq!(sample.as_slice(), &[1.0, 3.0]);
    /// ```
    #[must_use]
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        Self {
            values: values.into_iter().filter(|v| v.is_finite()).collect(),
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the values sorted in ascending order.
    #[must_use]
    pub fn sorted(&self) -> Vec<f64> {
        let mut values = self.values.clone();
        values.sort_by(f64::total_cmp);
        values
    }
}

impl AsRef<[f64]> for Sample {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

/// The current bivariate data set, kept exactly as it was supplied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    points: Vec<DataPoint>,
}

impl Dataset {
    /// Wraps points as supplied, non-finite coordinates included.
    #[must_use]
    pub fn new(points: Vec<DataPoint>) -> Self {
        Self { points }
    }

    /// Wraps a flat numeric sequence as points `(index, value)`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sequence<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let points = values
            .into_iter()
            .enumerate()
            .map(|(i, y)| DataPoint::new(i as f64, y))
            .collect();
        Self { points }
    }

    /// All points, including non-finite ones, in input order.
    #[must_use]
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// One coordinate as a univariate sample; non-finite entries of that
    /// coordinate are dropped independently of the other axis.
    #[must_use]
    pub fn axis(&self, axis: Axis) -> Sample {
        Sample::from_values(self.points.iter().map(|p| p.get(axis)))
    }

    /// Both coordinates of every fully finite point, in parallel.
    #[must_use]
    pub fn paired(&self) -> (Vec<f64>, Vec<f64>) {
        self.points
            .iter()
            .filter(|p| p.is_finite())
            .map(|p| (p.x, p.y))
            .unzip()
    }

    /// Number of points with at least one non-finite coordinate.
    #[must_use]
    pub fn non_finite_count(&self) -> usize {
        self.points.iter().filter(|p| !p.is_finite()).count()
    }
}

impl From<Vec<DataPoint>> for Dataset {
    fn from(points: Vec<DataPoint>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<DataPoint> for Dataset {
    fn from_iter<T: IntoIterator<Item = DataPoint>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset::new(vec![
            DataPoint::new(1.0, 10.0),
            DataPoint::new(f64::NAN, 20.0),
            DataPoint::new(3.0, f64::INFINITY),
            DataPoint::new(4.0, 40.0),
        ])
    }

    #[test]
    fn test_axis_filters_each_coordinate_independently() {
        let data = dataset();
        assert_eq!(data.axis(Axis::X).as_slice(), &[1.0, 3.0, 4.0]);
        assert_eq!(data.axis(Axis::Y).as_slice(), &[10.0, 20.0, 40.0]);
    }

    #[test]
    fn test_paired_drops_partially_invalid_points() {
        let data = dataset();
        let (x, y) = data.paired();
        assert_eq!(x, vec![1.0, 4.0]);
        assert_eq!(y, vec![10.0, 40.0]);
        assert_eq!(data.non_finite_count(), 2);
    }

    #[test]
    fn test_from_sequence_uses_index_as_x() {
        let data = Dataset::from_sequence([5.0, 6.5]);
        assert_eq!(
            data.points(),
            &[DataPoint::new(0.0, 5.0), DataPoint::new(1.0, 6.5)]
        );
    }

    #[test]
    fn test_axis_from_str() {
        assert_eq!("x".parse::<Axis>().unwrap(), Axis::X);
        assert_eq!(" Y ".parse::<Axis>().unwrap(), Axis::Y);
        assert!("z".parse::<Axis>().is_err());
    }

    #[test]
    fn test_dataset_json_shape() {
        let data: Dataset = serde_json::from_str(r#"[{"x": 1.0, "y": 2.0}]"#).unwrap();
        assert_eq!(data.points(), &[DataPoint::new(1.0, 2.0)]);
    }
}
