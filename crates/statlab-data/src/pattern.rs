//! Keyword-driven synthesis of numeric sequences from a free-text description.
//!
//! This stands in for the remote text-to-data generator: a description is
//! matched against a few keywords and a sequence with that shape is produced.
//! A partial response from the remote side can be completed with
//! [`complete_sequence`].

use std::f64::consts::TAU;

use rand::Rng;
use rand_distr::{Distribution as _, Normal};

/// Shape of a synthesized sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Independent draws from `N(10, 5)`.
    Gaussian,
    /// `5 sin(f·0.1·i + φ)` plus uniform noise on `[0, 2)`.
    Sine,
    /// `a i² + b i + c`.
    Quadratic,
    /// `slope · i + intercept` plus uniform noise on `[-2.5, 2.5)`.
    Linear,
}

const GAUSSIAN_KEYWORDS: [&str; 3] = ["gaussian", "正态", "高斯"];
const SINE_KEYWORDS: [&str; 3] = ["sin", "正弦", "周期"];
const QUADRATIC_KEYWORDS: [&str; 2] = ["quadratic", "二次"];

const GAUSSIAN_MEAN: f64 = 10.0;
const GAUSSIAN_STD_DEV: f64 = 5.0;

impl Pattern {
    /// Picks the pattern named by `description`; the first match wins in the order
    /// gaussian, sine, quadratic, and anything else is linear.
    ///
    /// # Examples
    ///
    /// ```
    /// use statlab_data::pattern::Pattern;
    ///
    /// assert_eq!(Pattern::from_description("Gaussian noise"), Pattern::Gaussian);
    /// assert_eq!(Pattern::from_description("周期性的温度"), Pattern::Sine);
    /// assert_eq!(Pattern::from_description("house prices"), Pattern::Linear);
    /// ```
    #[must_use]
    pub fn from_description(description: &str) -> Self {
        let description = description.to_lowercase();
        let mentions = |keywords: &[&str]| keywords.iter().any(|k| description.contains(k));
        if mentions(&GAUSSIAN_KEYWORDS) {
            Self::Gaussian
        } else if mentions(&SINE_KEYWORDS) {
            Self::Sine
        } else if mentions(&QUADRATIC_KEYWORDS) {
            Self::Quadratic
        } else {
            Self::Linear
        }
    }

    /// Produces `count` values rounded to six decimals.
    ///
    /// Shape coefficients are drawn once per sequence; noise is drawn per value.
    #[expect(clippy::cast_precision_loss)]
    pub fn synthesize<R>(self, count: usize, rng: &mut R) -> Vec<f64>
    where
        R: Rng,
    {
        let values: Vec<f64> = match self {
            Self::Gaussian => match Normal::new(GAUSSIAN_MEAN, GAUSSIAN_STD_DEV) {
                Ok(normal) => normal.sample_iter(&mut *rng).take(count).collect(),
                Err(_) => vec![GAUSSIAN_MEAN; count],
            },
            Self::Sine => {
                let frequency = rng.random_range(0.5..2.5);
                let phase = rng.random_range(0.0..TAU);
                (0..count)
                    .map(|i| {
                        (frequency * i as f64 * 0.1 + phase).sin() * 5.0
                            + rng.random_range(0.0..2.0)
                    })
                    .collect()
            }
            Self::Quadratic => {
                let a = rng.random_range(-0.05..0.05);
                let b = rng.random_range(-1.0..1.0);
                let c = rng.random_range(0.0..10.0);
                (0..count)
                    .map(|i| {
                        let i = i as f64;
                        a * i * i + b * i + c
                    })
                    .collect()
            }
            Self::Linear => {
                let slope = rng.random_range(-1.0..1.0);
                let intercept = rng.random_range(0.0..10.0);
                (0..count)
                    .map(|i| slope * i as f64 + intercept + rng.random_range(-2.5..2.5))
                    .collect()
            }
        };
        values.into_iter().map(round_to_micros).collect()
    }
}

/// Rounds to six decimal places.
#[must_use]
pub fn round_to_micros(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}

/// Normalizes a remotely generated sequence to exactly `count` values.
///
/// Non-finite entries are dropped and the rest rounded to six decimals; a long
/// sequence is truncated and a short one is padded with values synthesized from
/// `description`.
pub fn complete_sequence<R>(
    received: &[f64],
    description: &str,
    count: usize,
    rng: &mut R,
) -> Vec<f64>
where
    R: Rng,
{
    let mut values: Vec<f64> = received
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .map(round_to_micros)
        .take(count)
        .collect();
    let missing = count - values.len();
    if missing > 0 {
        values.extend(Pattern::from_description(description).synthesize(missing, rng));
    }
    values
}

#[cfg(test)]
mod tests {
    use statlab_stats::descriptive;

    use super::*;
    use crate::generator::rng_from_seed;

    #[test]
    fn test_keyword_priority() {
        assert_eq!(
            Pattern::from_description("gaussian sine wave"),
            Pattern::Gaussian
        );
        assert_eq!(
            Pattern::from_description("quadratic with a SIN component"),
            Pattern::Sine
        );
        assert_eq!(Pattern::from_description("二次曲线"), Pattern::Quadratic);
        assert_eq!(Pattern::from_description("正态分布的身高"), Pattern::Gaussian);
        assert_eq!(Pattern::from_description(""), Pattern::Linear);
    }

    #[test]
    fn test_values_are_rounded() {
        let mut rng = rng_from_seed(Some(8));
        for pattern in [
            Pattern::Gaussian,
            Pattern::Sine,
            Pattern::Quadratic,
            Pattern::Linear,
        ] {
            let values = pattern.synthesize(40, &mut rng);
            assert_eq!(values.len(), 40);
            assert!(values.iter().all(|&v| round_to_micros(v) == v));
        }
    }

    #[test]
    fn test_sine_stays_in_band() {
        let mut rng = rng_from_seed(Some(9));
        let values = Pattern::Sine.synthesize(200, &mut rng);
        assert!(values.iter().all(|&v| (-5.0..=7.0).contains(&v)));
    }

    #[test]
    fn test_gaussian_center() {
        let mut rng = rng_from_seed(Some(10));
        let values = Pattern::Gaussian.synthesize(2000, &mut rng);
        let mean = descriptive::mean(&values).unwrap();
        assert!((mean - GAUSSIAN_MEAN).abs() < 0.5);
    }

    #[test]
    fn test_complete_sequence() {
        let mut rng = rng_from_seed(Some(11));
        let received = [1.234_567_89, f64::NAN, 3.0];
        let values = complete_sequence(&received, "linear trend", 5, &mut rng);
        assert_eq!(values.len(), 5);
        assert_eq!(&values[..2], &[1.234_568, 3.0]);

        let values = complete_sequence(&[1.0, 2.0, 3.0], "anything", 2, &mut rng);
        assert_eq!(values, vec![1.0, 2.0]);
    }
}
