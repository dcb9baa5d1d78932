//! Error kinds produced by the statistical procedures.

/// Result alias used throughout the crate.
pub type StatsResult<T> = Result<T, StatsError>;

/// A recoverable failure of a statistical computation.
///
/// Every variant describes bad input rather than a broken invariant, so callers
/// can re-prompt for valid data or configuration and retry.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum StatsError {
    /// The sample is too small (or has no spread) for the requested statistic.
    #[display("{statistic} needs at least {required} value(s) with spread, got {actual}")]
    DegenerateSample {
        statistic: &'static str,
        required: usize,
        actual: usize,
    },
    /// A configuration value lies outside its domain.
    #[display("invalid parameter '{name}' = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    /// The significance level is not strictly between 0 and 1.
    #[display("significance level {value} must lie strictly within (0, 1)")]
    InvalidSignificanceLevel { value: f64 },
    /// The distribution identifier is unknown or has no estimator.
    #[display("unsupported distribution '{name}'")]
    UnsupportedDistribution { name: String },
    /// A selector string (axis, test family, direction, ...) is not recognized.
    #[display("unknown {kind} '{name}'")]
    UnknownIdentifier { kind: &'static str, name: String },
    /// A raw value slice contains `NaN` or an infinity.
    #[display("{statistic} needs finite values, got {value} at index {index}")]
    NonFiniteValue {
        statistic: &'static str,
        index: usize,
        value: f64,
    },
    /// Paired samples have different lengths.
    #[display("paired samples differ in length: {x_len} vs {y_len}")]
    LengthMismatch { x_len: usize, y_len: usize },
}

impl StatsError {
    pub(crate) fn degenerate(statistic: &'static str, required: usize, actual: usize) -> Self {
        Self::DegenerateSample {
            statistic,
            required,
            actual,
        }
    }

    pub(crate) fn unknown(kind: &'static str, name: &str) -> Self {
        Self::UnknownIdentifier {
            kind,
            name: name.to_owned(),
        }
    }

    /// Fails on the first non-finite entry of `values`.
    pub(crate) fn ensure_finite(statistic: &'static str, values: &[f64]) -> Result<(), Self> {
        match values.iter().position(|v| !v.is_finite()) {
            Some(index) => Err(Self::NonFiniteValue {
                statistic,
                index,
                value: values[index],
            }),
            None => Ok(()),
        }
    }

    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}
